//! Error types for dialorm

use crate::dialect::Dialect;
use crate::filters::FilterOp;
use thiserror::Error;

/// Result type alias for dialorm operations
pub type OrmResult<T> = Result<T, OrmError>;

/// Error types for filter translation and configuration
#[derive(Debug, Error)]
pub enum OrmError {
    /// Invalid identifier, filter key or filter value
    #[error("Validation error: {0}")]
    Validation(String),

    /// The active dialect has neither an override nor a default for the operator
    #[error("Filter '{op}' is not supported by {dialect}")]
    Unsupported { op: FilterOp, dialect: Dialect },

    /// Configuration file could not be read or parsed
    #[error("Config error: {0}")]
    Config(String),
}

impl OrmError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an unsupported-operator error
    pub fn unsupported(op: FilterOp, dialect: Dialect) -> Self {
        Self::Unsupported { op, dialect }
    }

    /// Check if this is an unsupported-operator error
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<toml::de::Error> for OrmError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}
