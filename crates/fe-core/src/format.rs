//! Number formatting for reported values

const THOUSAND: f64 = 1e3;
const MILLION: f64 = 1e6;
const BILLION: f64 = 1e9;

/// Render `value` with two decimals and a K/M/B suffix.
///
/// Thresholds are checked on the absolute value with inclusive lower bounds,
/// so `1000.0` renders as `"1.00K"`. The sign is kept.
pub fn human_readable_magnitude(value: f64) -> String {
    // -0.0 would otherwise print as "-0.00"
    let value = if value == 0.0 { 0.0 } else { value };
    let abs = value.abs();

    if abs < THOUSAND {
        format!("{:.2}", value)
    } else if abs < MILLION {
        format!("{:.2}K", value / THOUSAND)
    } else if abs < BILLION {
        format!("{:.2}M", value / MILLION)
    } else {
        format!("{:.2}B", value / BILLION)
    }
}

/// Render a fraction as a percentage with two decimals, e.g. `0.1234` as
/// `"12.34%"`.
pub fn format_percentage(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}
