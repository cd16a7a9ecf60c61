use std::path::PathBuf;

use crate::data::DataError;

#[derive(thiserror::Error, Debug)]
pub enum FoodEmissionError {
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Configuration error in '{}': {message}", path.display())]
    Config { path: PathBuf, message: String },
}

/// Result type for top-level calculator operations
pub type Result<T> = std::result::Result<T, FoodEmissionError>;
