//! Parsing of free-text numeric fields
//!
//! Fields are read the way a browser number box is: leading whitespace is
//! skipped, an optional sign and the leading run of digits are taken, and
//! anything after them is ignored. No digits at all means "no value".

/// Parse the leading integer of `input`.
///
/// Returns `None` when there are no leading digits or the value does not fit
/// in an `i64`.
pub fn parse_integer(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }

    let magnitude: i64 = rest[..digits_end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Parse a year field
pub fn parse_year(input: &str) -> Option<i32> {
    parse_integer(input).and_then(|y| i32::try_from(y).ok())
}

/// Parse a population field. Negative populations are not a value.
pub fn parse_population(input: &str) -> Option<f64> {
    parse_integer(input)
        .filter(|p| *p >= 0)
        .map(|p| p as f64)
}
