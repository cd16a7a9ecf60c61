//! Interactive calculator sessions
//!
//! A session owns the inputs of one user and borrows the dataset. Every
//! field is independent and every result is recomputed when asked for; an
//! incomplete input simply yields no result.

use serde::{Deserialize, Serialize};
use tracing::debug;

use fe_core::config::CalculatorConfig;
use fe_core::data::{CategoryMap, Dataset, FeatureVector, RegressionRecord, ScenarioDataset};
use fe_core::format::{format_percentage, human_readable_magnitude};
use fe_core::input::{parse_population, parse_year};

use crate::base::{EmissionModel, Result};
use crate::compare::{compare_categories, ComparisonRow};
use crate::lm::StandardizedRegression;

#[cfg(test)]
mod tests;

/// A prediction ready to be shown
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionView {
    /// Predicted emissions, kgCO2eq
    pub value: f64,
    /// Held-out error of the model, as a fraction
    pub mape: f64,
}

impl PredictionView {
    /// e.g. `"1.23M"`
    pub fn formatted_value(&self) -> String {
        human_readable_magnitude(self.value)
    }

    /// e.g. `"4.20%"`
    pub fn formatted_mape(&self) -> String {
        format_percentage(self.mape)
    }
}

/// Total population and urban share as entered by the user
#[derive(Debug, Clone, PartialEq)]
pub struct PopulationInputs {
    total_population: Option<String>,
    urban_percent: f64,
}

impl PopulationInputs {
    pub fn new(urban_percent: f64) -> Self {
        Self {
            total_population: None,
            urban_percent: urban_percent.clamp(0.0, 100.0),
        }
    }

    /// Store the population field as typed; it is parsed when read
    pub fn set_total_population(&mut self, input: impl Into<String>) {
        self.total_population = Some(input.into());
    }

    pub fn clear_total_population(&mut self) {
        self.total_population = None;
    }

    pub fn total_population_input(&self) -> Option<&str> {
        self.total_population.as_deref()
    }

    /// Parsed population, `None` when empty or not a number
    pub fn total_population(&self) -> Option<f64> {
        self.total_population.as_deref().and_then(parse_population)
    }

    /// Set the urban share, clamped to [0, 100]. Non-finite values are ignored.
    pub fn set_urban_percentage(&mut self, percent: f64) {
        if percent.is_finite() {
            self.urban_percent = percent.clamp(0.0, 100.0);
        }
    }

    pub fn urban_percentage(&self) -> f64 {
        self.urban_percent
    }

    /// Urban headcount; zero while the population is missing
    pub fn urban_population(&self) -> f64 {
        self.total_population()
            .map_or(0.0, |p| p * self.urban_percent / 100.0)
    }

    /// Rural headcount; zero while the population is missing
    pub fn rural_population(&self) -> f64 {
        self.total_population()
            .map_or(0.0, |p| p - self.urban_population())
    }

    /// Feature vector without a year, `None` while the population is missing
    pub fn features(&self) -> Option<FeatureVector> {
        Some(FeatureVector::new(
            self.total_population()?,
            self.urban_percent,
        ))
    }

    /// Overwrite both fields from a feature vector
    pub fn reset_to(&mut self, features: &FeatureVector) {
        self.total_population = Some(format!("{:.0}", features.population));
        self.set_urban_percentage(features.urban_percent);
    }
}

// ==================== Single-Model Session ====================

/// Session over a dataset with one model per country
#[derive(Debug, Clone)]
pub struct CalculatorSession<'a> {
    dataset: &'a Dataset,
    country: Option<String>,
    year: String,
    inputs: PopulationInputs,
}

impl<'a> CalculatorSession<'a> {
    pub fn new(dataset: &'a Dataset) -> Self {
        Self::with_config(dataset, &CalculatorConfig::default())
    }

    pub fn with_config(dataset: &'a Dataset, config: &CalculatorConfig) -> Self {
        Self {
            dataset,
            country: None,
            year: config.default_year.to_string(),
            inputs: PopulationInputs::new(config.default_urban_percent),
        }
    }

    /// Select a country and reset population and urban share to its
    /// training means
    pub fn select_country(&mut self, country: &str) -> Result<()> {
        let record = self.dataset.record(country)?;
        self.inputs.reset_to(&FeatureVector::from_record_means(record));
        self.country = Some(country.to_string());

        debug!(
            country,
            population = ?self.inputs.total_population_input(),
            urban_percent = self.inputs.urban_percentage(),
            "selected country"
        );
        Ok(())
    }

    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    /// Record of the selected country
    pub fn record(&self) -> Option<&'a RegressionRecord> {
        let dataset = self.dataset;
        self.country.as_deref().and_then(|c| dataset.get(c))
    }

    pub fn set_year(&mut self, input: impl Into<String>) {
        self.year = input.into();
    }

    pub fn year_input(&self) -> &str {
        &self.year
    }

    pub fn year(&self) -> Option<i32> {
        parse_year(&self.year)
    }

    pub fn inputs(&self) -> &PopulationInputs {
        &self.inputs
    }

    pub fn inputs_mut(&mut self) -> &mut PopulationInputs {
        &mut self.inputs
    }

    pub fn set_total_population(&mut self, input: impl Into<String>) {
        self.inputs.set_total_population(input);
    }

    pub fn set_urban_percentage(&mut self, percent: f64) {
        self.inputs.set_urban_percentage(percent);
    }

    pub fn total_population(&self) -> Option<f64> {
        self.inputs.total_population()
    }

    pub fn urban_percentage(&self) -> f64 {
        self.inputs.urban_percentage()
    }

    pub fn urban_population(&self) -> f64 {
        self.inputs.urban_population()
    }

    pub fn rural_population(&self) -> f64 {
        self.inputs.rural_population()
    }

    /// Model of the selected country
    pub fn model(&self) -> Option<StandardizedRegression<'a>> {
        let country = self.country.as_deref()?;
        Some(StandardizedRegression::new(self.record()?).with_label(country))
    }

    /// Current inputs as a feature vector, year included when it parses
    pub fn features(&self) -> Option<FeatureVector> {
        let features = self.inputs.features()?;
        Some(match self.year() {
            Some(year) => features.with_year(year),
            None => features,
        })
    }

    /// Prediction for the current inputs, `None` while anything it needs is
    /// missing or the result is not a finite number
    pub fn prediction(&self) -> Option<PredictionView> {
        let model = self.model()?;
        let value = model.predict_features(&self.features()?)?;
        Some(PredictionView {
            value,
            mape: model.mape(),
        })
    }
}

// ==================== Scenario Session ====================

/// Session comparing a baseline against a scenario over every emission
/// category of a country
#[derive(Debug, Clone)]
pub struct ScenarioSession<'a> {
    dataset: &'a ScenarioDataset,
    country: Option<String>,
    baseline: PopulationInputs,
    scenario: PopulationInputs,
}

impl<'a> ScenarioSession<'a> {
    pub fn new(dataset: &'a ScenarioDataset) -> Self {
        Self::with_config(dataset, &CalculatorConfig::default())
    }

    pub fn with_config(dataset: &'a ScenarioDataset, config: &CalculatorConfig) -> Self {
        Self {
            dataset,
            country: None,
            baseline: PopulationInputs::new(config.default_urban_percent),
            scenario: PopulationInputs::new(config.default_urban_percent),
        }
    }

    /// Select a country; baseline and scenario both reset to the means of
    /// its first category
    pub fn select_country(&mut self, country: &str) -> Result<()> {
        let record = self.dataset.primary_record(country)?;
        let means = FeatureVector::from_record_means(record);
        self.baseline.reset_to(&means);
        self.scenario.reset_to(&means);
        self.country = Some(country.to_string());

        debug!(country, "selected scenario country");
        Ok(())
    }

    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    /// Categories of the selected country
    pub fn categories(&self) -> Option<&'a CategoryMap> {
        let dataset = self.dataset;
        self.country.as_deref().and_then(|c| dataset.get(c))
    }

    pub fn baseline(&self) -> &PopulationInputs {
        &self.baseline
    }

    pub fn baseline_mut(&mut self) -> &mut PopulationInputs {
        &mut self.baseline
    }

    pub fn scenario(&self) -> &PopulationInputs {
        &self.scenario
    }

    pub fn scenario_mut(&mut self) -> &mut PopulationInputs {
        &mut self.scenario
    }

    /// Comparison table for the current inputs, `None` until a country is
    /// selected and both populations parse
    pub fn comparison(&self) -> Option<Vec<ComparisonRow>> {
        let categories = self.categories()?;
        let baseline = self.baseline.features()?;
        let scenario = self.scenario.features()?;
        Some(compare_categories(categories, &baseline, &scenario))
    }
}
