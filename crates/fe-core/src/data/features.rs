//! Raw feature vectors and their layouts

use serde::{Deserialize, Serialize};

use super::*;

/// Order and meaning of the raw features a record was trained on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureLayout {
    /// `[population, urban_fraction]`, used by the per-category scenario models
    PopulationUrban,
    /// `[population, urban_fraction, year]`, used by the single-country model
    PopulationUrbanYear,
}

impl FeatureLayout {
    /// Layout for a record with `n` features
    pub fn from_len(n: usize) -> Option<Self> {
        match n {
            2 => Some(FeatureLayout::PopulationUrban),
            3 => Some(FeatureLayout::PopulationUrbanYear),
            _ => None,
        }
    }

    /// Number of raw features
    pub fn n_features(self) -> usize {
        self.names().len()
    }

    pub fn needs_year(self) -> bool {
        matches!(self, FeatureLayout::PopulationUrbanYear)
    }

    /// Feature names, in order
    pub fn names(self) -> &'static [&'static str] {
        match self {
            FeatureLayout::PopulationUrban => &["population", "urban_fraction"],
            FeatureLayout::PopulationUrbanYear => &["population", "urban_fraction", "year"],
        }
    }
}

/// User-supplied inputs for one prediction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Total population
    pub population: f64,
    /// Urban share of the population, 0 to 100
    pub urban_percent: f64,
    /// Year, only used by layouts that include it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

impl FeatureVector {
    /// Create a feature vector without a year
    pub fn new(population: f64, urban_percent: f64) -> Self {
        Self {
            population,
            urban_percent,
            year: None,
        }
    }

    /// Set the year
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Feature vector at a record's training means: population in people,
    /// urban share as a percentage. The year is left unset.
    pub fn from_record_means(record: &RegressionRecord) -> Self {
        let means = record.means();
        Self::new(
            means.first().map_or(0.0, |m| m.round()),
            means.get(1).map_or(0.0, |m| m * 100.0),
        )
    }

    /// Urban share as the fraction the models were trained on
    pub fn urban_fraction(&self) -> f64 {
        self.urban_percent / 100.0
    }

    pub fn urban_population(&self) -> f64 {
        self.population * self.urban_fraction()
    }

    pub fn rural_population(&self) -> f64 {
        self.population - self.urban_population()
    }

    /// Raw values in `layout` order, or `None` when the layout needs a year
    /// and none is set.
    pub fn raw(&self, layout: FeatureLayout) -> Option<Vec<f64>> {
        let mut values = vec![self.population, self.urban_fraction()];
        if layout.needs_year() {
            values.push(f64::from(self.year?));
        }
        Some(values)
    }
}
