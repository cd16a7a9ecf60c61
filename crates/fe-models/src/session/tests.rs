//! Tests for calculator sessions

use approx::assert_abs_diff_eq;

use fe_core::config::CalculatorConfig;
use fe_core::data::{
    DataError, Dataset, DatasetBuilder, RegressionRecord, ScenarioDataset, ScenarioDatasetBuilder,
};

use super::*;
use crate::base::ModelError;
use crate::compare::Delta;

// ==================== Test Fixtures ====================

fn dataset() -> Dataset {
    DatasetBuilder::new()
        .with_country(
            "Testland",
            RegressionRecord::new(
                vec![1_000_000.0, 200_000.0, 50_000.0, 10_000.0],
                vec![20_000_000.4, 0.35, 2005.0],
                vec![5_000_000.0, 0.05, 10.0],
                0.0421,
            )
            .unwrap(),
        )
        .unwrap()
        .with_country(
            "Otherland",
            RegressionRecord::new(
                vec![500.0, 10.0, 1.0, 1.0],
                vec![1_000.0, 0.8, 2000.0],
                vec![100.0, 0.1, 5.0],
                0.3,
            )
            .unwrap(),
        )
        .unwrap()
        .build()
}

fn scenario_dataset() -> ScenarioDataset {
    let means = vec![10_000_000.0, 0.5];
    let stds = vec![1_000_000.0, 0.1];
    ScenarioDatasetBuilder::new()
        .with_record(
            "Testland",
            "Enteric Fermentation",
            RegressionRecord::new(vec![100.0, 10.0, -5.0], means.clone(), stds.clone(), 0.05)
                .unwrap(),
        )
        .unwrap()
        .with_record(
            "Testland",
            "Savanna Fires",
            RegressionRecord::new(vec![0.0, 0.0, 0.0], means.clone(), stds.clone(), 0.5).unwrap(),
        )
        .unwrap()
        .build()
}

// ==================== PopulationInputs ====================

#[test]
fn test_inputs_population_split() {
    let mut inputs = PopulationInputs::new(25.0);
    assert_eq!(inputs.total_population(), None);
    assert_eq!(inputs.urban_population(), 0.0);
    assert_eq!(inputs.rural_population(), 0.0);

    inputs.set_total_population("1000");
    assert_abs_diff_eq!(inputs.urban_population(), 250.0);
    assert_abs_diff_eq!(inputs.rural_population(), 750.0);

    // Unparseable population counts as zero for the split
    inputs.set_total_population("lots");
    assert_eq!(inputs.urban_population(), 0.0);
    assert!(inputs.features().is_none());
}

#[test]
fn test_inputs_urban_percentage_is_clamped() {
    let mut inputs = PopulationInputs::new(150.0);
    assert_eq!(inputs.urban_percentage(), 100.0);

    inputs.set_urban_percentage(-3.0);
    assert_eq!(inputs.urban_percentage(), 0.0);

    inputs.set_urban_percentage(42.0);
    inputs.set_urban_percentage(f64::NAN);
    assert_eq!(inputs.urban_percentage(), 42.0);
}

#[test]
fn test_inputs_fields_are_independent() {
    let mut inputs = PopulationInputs::new(50.0);
    inputs.set_total_population("5000");

    inputs.set_urban_percentage(80.0);
    assert_eq!(inputs.total_population(), Some(5000.0));

    inputs.set_total_population("7000");
    assert_eq!(inputs.urban_percentage(), 80.0);

    inputs.clear_total_population();
    assert_eq!(inputs.urban_percentage(), 80.0);
    assert_eq!(inputs.total_population_input(), None);
}

// ==================== CalculatorSession ====================

#[test]
fn test_session_defaults() {
    let dataset = dataset();
    let session = CalculatorSession::new(&dataset);

    assert_eq!(session.country(), None);
    assert_eq!(session.year(), Some(2025));
    assert_eq!(session.urban_percentage(), 50.0);
    assert_eq!(session.total_population(), None);
    assert!(session.prediction().is_none());
}

#[test]
fn test_session_with_config() {
    let dataset = dataset();
    let config = CalculatorConfig {
        default_year: 2040,
        default_urban_percent: 33.0,
        ..CalculatorConfig::default()
    };
    let session = CalculatorSession::with_config(&dataset, &config);

    assert_eq!(session.year_input(), "2040");
    assert_eq!(session.urban_percentage(), 33.0);
}

#[test]
fn test_select_country_resets_to_means() {
    let dataset = dataset();
    let mut session = CalculatorSession::new(&dataset);

    session.set_total_population("123");
    session.set_urban_percentage(90.0);
    session.select_country("Testland").unwrap();

    assert_eq!(session.country(), Some("Testland"));
    assert_eq!(session.inputs().total_population_input(), Some("20000000"));
    assert_eq!(session.total_population(), Some(20_000_000.0));
    assert_abs_diff_eq!(session.urban_percentage(), 35.0, epsilon = 1e-9);

    session.select_country("Otherland").unwrap();
    assert_eq!(session.total_population(), Some(1_000.0));
    assert_abs_diff_eq!(session.urban_percentage(), 80.0, epsilon = 1e-9);
}

#[test]
fn test_select_unknown_country() {
    let dataset = dataset();
    let mut session = CalculatorSession::new(&dataset);

    let result = session.select_country("Atlantis");
    assert!(matches!(
        result,
        Err(ModelError::Data(DataError::CountryNotFound(_)))
    ));
    assert_eq!(session.country(), None);
}

#[test]
fn test_prediction_at_means() {
    let dataset = dataset();
    let mut session = CalculatorSession::new(&dataset);
    session.select_country("Testland").unwrap();
    session.set_year("2005");

    let prediction = session.prediction().unwrap();
    // Population mean is rounded to whole people: (20e6 - 20000000.4) / 5e6 * 2e5
    assert_abs_diff_eq!(prediction.value, 1_000_000.0 - 0.016, epsilon = 1e-6);
    assert_eq!(prediction.mape, 0.0421);
    // Just under a million stays in the thousands band
    assert_eq!(prediction.formatted_value(), "1000.00K");
    assert_eq!(prediction.formatted_mape(), "4.21%");
}

#[test]
fn test_prediction_follows_inputs() {
    let dataset = dataset();
    let mut session = CalculatorSession::new(&dataset);
    session.select_country("Otherland").unwrap();
    session.set_year("2010");
    session.set_total_population("1100");
    session.set_urban_percentage(90.0);

    // 500 + 10 * 1 + 1 * 1 + 1 * 2
    let prediction = session.prediction().unwrap();
    assert_abs_diff_eq!(prediction.value, 513.0, epsilon = 1e-9);
}

#[test]
fn test_prediction_withheld_for_incomplete_input() {
    let dataset = dataset();
    let mut session = CalculatorSession::new(&dataset);
    session.set_total_population("1000");
    // No country yet
    assert!(session.prediction().is_none());

    session.select_country("Otherland").unwrap();
    assert!(session.prediction().is_some());

    session.set_year("");
    assert!(session.prediction().is_none());

    session.set_year("2020");
    session.set_total_population("");
    assert!(session.prediction().is_none());

    session.set_total_population("abc");
    assert!(session.prediction().is_none());
}

#[test]
fn test_year_input_parsing() {
    let dataset = dataset();
    let mut session = CalculatorSession::new(&dataset);

    session.set_year("2031.9");
    assert_eq!(session.year(), Some(2031));

    session.set_year("next year");
    assert_eq!(session.year(), None);
    assert_eq!(session.year_input(), "next year");
}

#[test]
fn test_urban_change_leaves_population_alone() {
    let dataset = dataset();
    let mut session = CalculatorSession::new(&dataset);
    session.select_country("Testland").unwrap();

    let population = session.total_population();
    session.set_urban_percentage(10.0);
    assert_eq!(session.total_population(), population);

    session.set_total_population("42");
    assert_eq!(session.urban_percentage(), 10.0);
    assert_abs_diff_eq!(session.urban_population(), 4.2, epsilon = 1e-12);
    assert_abs_diff_eq!(session.rural_population(), 37.8, epsilon = 1e-12);
}

// ==================== ScenarioSession ====================

#[test]
fn test_scenario_select_country_resets_both_sides() {
    let dataset = scenario_dataset();
    let mut session = ScenarioSession::new(&dataset);
    assert!(session.comparison().is_none());

    session.scenario_mut().set_urban_percentage(5.0);
    session.select_country("Testland").unwrap();

    for inputs in [session.baseline(), session.scenario()] {
        assert_eq!(inputs.total_population(), Some(10_000_000.0));
        assert_abs_diff_eq!(inputs.urban_percentage(), 50.0, epsilon = 1e-9);
    }
}

#[test]
fn test_scenario_comparison_table() {
    let dataset = scenario_dataset();
    let mut session = ScenarioSession::new(&dataset);
    session.select_country("Testland").unwrap();

    session.scenario_mut().set_total_population("12000000");
    session.scenario_mut().set_urban_percentage(60.0);

    let rows = session.comparison().unwrap();
    assert_eq!(rows.len(), 2);

    let enteric = &rows[0];
    assert_eq!(enteric.category, "Enteric Fermentation");
    assert_abs_diff_eq!(enteric.baseline.unwrap(), 100.0, epsilon = 1e-9);
    // +2 std population (+20), +1 std urban (-5)
    assert_abs_diff_eq!(enteric.new.unwrap(), 115.0, epsilon = 1e-9);
    assert_abs_diff_eq!(enteric.delta.percent().unwrap(), 15.0, epsilon = 1e-7);

    let fires = &rows[1];
    assert_eq!(fires.delta, Delta::Undefined);
    assert_eq!(fires.mape, 0.5);
}

#[test]
fn test_scenario_comparison_needs_populations() {
    let dataset = scenario_dataset();
    let mut session = ScenarioSession::new(&dataset);
    session.select_country("Testland").unwrap();

    session.baseline_mut().clear_total_population();
    assert!(session.comparison().is_none());
}

#[test]
fn test_scenario_unknown_country() {
    let dataset = scenario_dataset();
    let mut session = ScenarioSession::new(&dataset);
    assert!(session.select_country("Atlantis").is_err());
    assert!(session.categories().is_none());
}
