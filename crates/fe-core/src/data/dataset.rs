//! Country-keyed collections of regression records

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::*;

/// One regression record per country
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    pub(crate) records: IndexMap<String, RegressionRecord>,
}

impl Dataset {
    /// Parse a dataset from a JSON object keyed by country
    pub fn from_json_str(json: &str) -> Result<Self> {
        let dataset: Self = serde_json::from_str(json)?;
        debug!(countries = dataset.len(), "loaded dataset");
        Ok(dataset)
    }

    /// Parse a dataset from a JSON reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let dataset: Self = serde_json::from_reader(reader)?;
        debug!(countries = dataset.len(), "loaded dataset");
        Ok(dataset)
    }

    /// Load a dataset from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_reader(open(path.as_ref())?)
    }

    /// Country names, in dataset order
    pub fn countries(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn get(&self, country: &str) -> Option<&RegressionRecord> {
        self.records.get(country)
    }

    /// Like [`Dataset::get`], but a missing country is an error
    pub fn record(&self, country: &str) -> Result<&RegressionRecord> {
        self.get(country)
            .ok_or_else(|| DataError::CountryNotFound(country.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RegressionRecord)> {
        self.records.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Per-country map of emission-source category to regression record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "IndexMap<String, CategoryMap>", into = "IndexMap<String, CategoryMap>")]
pub struct ScenarioDataset {
    pub(crate) countries: IndexMap<String, CategoryMap>,
}

impl ScenarioDataset {
    /// Parse a scenario dataset from a JSON object keyed by country, then by
    /// category
    pub fn from_json_str(json: &str) -> Result<Self> {
        let dataset: Self = serde_json::from_str(json)?;
        debug!(countries = dataset.len(), "loaded scenario dataset");
        Ok(dataset)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let dataset: Self = serde_json::from_reader(reader)?;
        debug!(countries = dataset.len(), "loaded scenario dataset");
        Ok(dataset)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_reader(open(path.as_ref())?)
    }

    /// Country names, in dataset order
    pub fn countries(&self) -> impl Iterator<Item = &str> {
        self.countries.keys().map(String::as_str)
    }

    /// All categories of a country, in dataset order
    pub fn get(&self, country: &str) -> Option<&CategoryMap> {
        self.countries.get(country)
    }

    pub fn categories(&self, country: &str) -> Result<&CategoryMap> {
        self.get(country)
            .ok_or_else(|| DataError::CountryNotFound(country.to_string()))
    }

    /// Record for one country and category
    pub fn record(&self, country: &str, category: &str) -> Result<&RegressionRecord> {
        self.categories(country)?
            .get(category)
            .ok_or_else(|| DataError::CategoryNotFound {
                country: country.to_string(),
                category: category.to_string(),
            })
    }

    /// First category record of a country; its means seed new sessions
    pub fn primary_record(&self, country: &str) -> Result<&RegressionRecord> {
        self.categories(country)?
            .values()
            .next()
            .ok_or_else(|| DataError::EmptyCountry(country.to_string()))
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }
}

impl TryFrom<IndexMap<String, CategoryMap>> for ScenarioDataset {
    type Error = DataError;

    fn try_from(countries: IndexMap<String, CategoryMap>) -> Result<Self> {
        if let Some((country, _)) = countries.iter().find(|(_, c)| c.is_empty()) {
            return Err(DataError::EmptyCountry(country.clone()));
        }
        Ok(Self { countries })
    }
}

impl From<ScenarioDataset> for IndexMap<String, CategoryMap> {
    fn from(dataset: ScenarioDataset) -> Self {
        dataset.countries
    }
}

fn open(path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })
}
