//! Tests for data module

use std::io::Write;

use approx::assert_abs_diff_eq;

use super::*;

const SIMPLE_JSON: &str = r#"{
    "Japan": {
        "betas": [[5000.0], [120.0], [-30.0], [15.0]],
        "means": [125000000.0, 0.91, 2005.0],
        "stds": [2000000.0, 0.02, 10.0],
        "mape": 0.034
    },
    "Chad": {
        "coefficients": [800.0, 60.0, 5.0, 2.0],
        "means": [12000000.0, 0.235, 2005.0],
        "stds": [3000000.0, 0.01, 10.0],
        "mape": 0.12
    }
}"#;

const SCENARIO_JSON: &str = r#"{
    "Brazil": {
        "Enteric Fermentation": {
            "betas": [[300.0], [40.0], [-10.0]],
            "means": [180000000.0, 0.82],
            "stds": [20000000.0, 0.05],
            "mape": 0.05
        },
        "Rice Cultivation": {
            "betas": [[90.0], [4.0], [1.0]],
            "means": [175000000.0, 0.8],
            "stds": [15000000.0, 0.04],
            "mape": 0.08
        }
    }
}"#;

fn record(coefficients: Vec<f64>, means: Vec<f64>, stds: Vec<f64>) -> RegressionRecord {
    RegressionRecord::new(coefficients, means, stds, 0.1).unwrap()
}

// ==================== RegressionRecord ====================

#[test]
fn test_record_creation() {
    let r = record(vec![100.0, 50.0, 20.0], vec![1000.0, 0.4], vec![500.0, 0.1]);

    assert_eq!(r.intercept(), 100.0);
    assert_eq!(r.feature_coefficients(), &[50.0, 20.0]);
    assert_eq!(r.n_features(), 2);
    assert_eq!(r.layout(), Some(FeatureLayout::PopulationUrban));
    assert_eq!(r.mape(), 0.1);
}

#[test]
fn test_record_dimension_mismatch() {
    let too_few = RegressionRecord::new(vec![1.0, 2.0], vec![0.0, 0.0], vec![1.0, 1.0], 0.0);
    assert!(matches!(too_few, Err(DataError::DimensionMismatch { .. })));

    let uneven = RegressionRecord::new(vec![1.0, 2.0, 3.0], vec![0.0, 0.0], vec![1.0], 0.0);
    assert!(matches!(uneven, Err(DataError::DimensionMismatch { .. })));
}

#[test]
fn test_record_unknown_layout() {
    let r = record(vec![1.0, 2.0], vec![0.0], vec![1.0]);
    assert_eq!(r.layout(), None);
}

#[test]
fn test_record_json_forms() {
    let column: RegressionRecord =
        serde_json::from_str(r#"{"betas": [[1.0], [2.0], [3.0]], "means": [0, 0], "stds": [1, 1], "mape": 0.2}"#)
            .unwrap();
    let flat: RegressionRecord =
        serde_json::from_str(r#"{"coefficients": [1.0, 2.0, 3.0], "means": [0, 0], "stds": [1, 1], "mape": 0.2}"#)
            .unwrap();
    assert_eq!(column, flat);

    let json = serde_json::to_value(&column).unwrap();
    assert_eq!(json["betas"][2][0], 3.0);
}

#[test]
fn test_record_json_rejects_bad_shapes() {
    let wide = serde_json::from_str::<RegressionRecord>(
        r#"{"betas": [[1.0, 9.0], [2.0], [3.0]], "means": [0, 0], "stds": [1, 1]}"#,
    );
    assert!(wide.is_err());

    let short = serde_json::from_str::<RegressionRecord>(
        r#"{"betas": [[1.0], [2.0]], "means": [0, 0], "stds": [1, 1]}"#,
    );
    assert!(short.is_err());
}

// ==================== FeatureVector ====================

#[test]
fn test_feature_vector_raw_layouts() {
    let features = FeatureVector::new(2_000_000.0, 40.0);

    let raw = features.raw(FeatureLayout::PopulationUrban).unwrap();
    assert_eq!(raw.len(), 2);
    assert_abs_diff_eq!(raw[0], 2_000_000.0);
    assert_abs_diff_eq!(raw[1], 0.4, epsilon = 1e-12);

    // Year layout needs a year
    assert!(features.raw(FeatureLayout::PopulationUrbanYear).is_none());

    let raw = features
        .with_year(2030)
        .raw(FeatureLayout::PopulationUrbanYear)
        .unwrap();
    assert_eq!(raw, vec![2_000_000.0, 0.4, 2030.0]);
}

#[test]
fn test_feature_vector_split() {
    let features = FeatureVector::new(1_000.0, 25.0);
    assert_abs_diff_eq!(features.urban_population(), 250.0);
    assert_abs_diff_eq!(features.rural_population(), 750.0);
}

#[test]
fn test_feature_vector_from_means() {
    let r = record(
        vec![1.0, 2.0, 3.0, 4.0],
        vec![12_345_678.6, 0.235, 2005.0],
        vec![1.0, 1.0, 1.0],
    );
    let features = FeatureVector::from_record_means(&r);

    assert_eq!(features.population, 12_345_679.0);
    assert_abs_diff_eq!(features.urban_percent, 23.5, epsilon = 1e-10);
    assert_eq!(features.year, None);
}

#[test]
fn test_layout_names() {
    assert_eq!(FeatureLayout::PopulationUrban.n_features(), 2);
    assert_eq!(FeatureLayout::PopulationUrbanYear.n_features(), 3);
    assert_eq!(FeatureLayout::PopulationUrbanYear.names()[2], "year");
    assert_eq!(FeatureLayout::from_len(4), None);
}

// ==================== Datasets ====================

#[test]
fn test_dataset_from_json() {
    let dataset = Dataset::from_json_str(SIMPLE_JSON).unwrap();

    assert_eq!(dataset.len(), 2);
    // Dataset order is preserved
    assert_eq!(dataset.countries().collect::<Vec<_>>(), vec!["Japan", "Chad"]);

    let japan = dataset.get("Japan").unwrap();
    assert_eq!(japan.intercept(), 5000.0);
    assert_eq!(japan.layout(), Some(FeatureLayout::PopulationUrbanYear));

    assert!(dataset.get("Atlantis").is_none());
    assert!(matches!(
        dataset.record("Atlantis"),
        Err(DataError::CountryNotFound(_))
    ));
}

#[test]
fn test_dataset_from_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SIMPLE_JSON.as_bytes()).unwrap();

    let dataset = Dataset::from_path(file.path()).unwrap();
    assert_eq!(dataset.len(), 2);

    let missing = Dataset::from_path("/nonexistent/dataset.json");
    assert!(matches!(missing, Err(DataError::Io { .. })));
}

#[test]
fn test_dataset_malformed_json() {
    assert!(matches!(
        Dataset::from_json_str("{\"Japan\": 3}"),
        Err(DataError::Json(_))
    ));
}

#[test]
fn test_scenario_dataset_from_json() {
    let dataset = ScenarioDataset::from_json_str(SCENARIO_JSON).unwrap();

    assert_eq!(dataset.len(), 1);
    let categories = dataset.categories("Brazil").unwrap();
    assert_eq!(
        categories.keys().collect::<Vec<_>>(),
        vec!["Enteric Fermentation", "Rice Cultivation"]
    );

    let rice = dataset.record("Brazil", "Rice Cultivation").unwrap();
    assert_eq!(rice.intercept(), 90.0);

    let primary = dataset.primary_record("Brazil").unwrap();
    assert_eq!(primary.intercept(), 300.0);

    assert!(matches!(
        dataset.record("Brazil", "Burning"),
        Err(DataError::CategoryNotFound { .. })
    ));
    assert!(matches!(
        dataset.record("Peru", "Burning"),
        Err(DataError::CountryNotFound(_))
    ));
}

#[test]
fn test_scenario_dataset_rejects_empty_country() {
    let result = ScenarioDataset::from_json_str(r#"{"Peru": {}}"#);
    assert!(result.is_err());
}

#[test]
fn test_dataset_builder() {
    let r = record(vec![1.0, 2.0, 3.0], vec![0.0, 0.0], vec![1.0, 1.0]);

    let dataset = DatasetBuilder::new()
        .with_country("A", r.clone())
        .unwrap()
        .with_country("B", r.clone())
        .unwrap()
        .build();
    assert_eq!(dataset.countries().collect::<Vec<_>>(), vec!["A", "B"]);

    let duplicate = DatasetBuilder::new()
        .with_country("A", r.clone())
        .unwrap()
        .with_country("A", r);
    assert!(matches!(duplicate, Err(DataError::DuplicateCountry(_))));
}

#[test]
fn test_scenario_dataset_builder() {
    let r = record(vec![1.0, 2.0, 3.0], vec![0.0, 0.0], vec![1.0, 1.0]);

    let dataset = ScenarioDatasetBuilder::new()
        .with_record("A", "Manure", r.clone())
        .unwrap()
        .with_record("A", "Rice", r.clone())
        .unwrap()
        .build();
    assert_eq!(dataset.categories("A").unwrap().len(), 2);

    let duplicate = ScenarioDatasetBuilder::new()
        .with_record("A", "Manure", r.clone())
        .unwrap()
        .with_record("A", "Manure", r);
    assert!(matches!(
        duplicate,
        Err(DataError::DuplicateCategory { .. })
    ));
}

#[test]
fn test_dataset_serialization_roundtrip_keeps_order() {
    let dataset = Dataset::from_json_str(SIMPLE_JSON).unwrap();
    let json = serde_json::to_string(&dataset).unwrap();
    let reloaded = Dataset::from_json_str(&json).unwrap();
    assert_eq!(dataset, reloaded);
}
