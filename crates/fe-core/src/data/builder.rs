//! Builder pattern for constructing datasets

use indexmap::IndexMap;

use super::*;

/// Builder for creating a [`Dataset`]
#[derive(Debug, Default)]
pub struct DatasetBuilder {
    records: IndexMap<String, RegressionRecord>,
}

impl DatasetBuilder {
    /// Create a new DatasetBuilder
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a country's record
    pub fn with_country<S: Into<String>>(mut self, name: S, record: RegressionRecord) -> Result<Self> {
        let name = name.into();

        if self.records.contains_key(&name) {
            return Err(DataError::DuplicateCountry(name));
        }

        self.records.insert(name, record);
        Ok(self)
    }

    /// Build the Dataset
    pub fn build(self) -> Dataset {
        Dataset {
            records: self.records,
        }
    }
}

/// Builder for creating a [`ScenarioDataset`]
#[derive(Debug, Default)]
pub struct ScenarioDatasetBuilder {
    countries: IndexMap<String, CategoryMap>,
}

impl ScenarioDatasetBuilder {
    /// Create a new ScenarioDatasetBuilder
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the record of one emission-source category of a country
    pub fn with_record<C, K>(mut self, country: C, category: K, record: RegressionRecord) -> Result<Self>
    where
        C: Into<String>,
        K: Into<String>,
    {
        let country = country.into();
        let category = category.into();

        let categories = self.countries.entry(country.clone()).or_default();
        if categories.contains_key(&category) {
            return Err(DataError::DuplicateCategory { country, category });
        }

        categories.insert(category, record);
        Ok(self)
    }

    /// Build the ScenarioDataset
    pub fn build(self) -> ScenarioDataset {
        ScenarioDataset {
            countries: self.countries,
        }
    }
}
