//! Error types for uservalue-core

use thiserror::Error;

use crate::collaborators::{ConversionError, ValidationError};

/// Result type alias for uservalue-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while guarding a value
#[derive(Error, Debug)]
pub enum Error {
    /// A mandatory value would be accepted or read as empty
    #[error("value is mandatory")]
    Mandatory,

    /// The attached validator rejected the input
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The attached converter could not convert the input
    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

impl Error {
    /// Whether this is a mandatory violation
    pub fn is_mandatory(&self) -> bool {
        matches!(self, Self::Mandatory)
    }

    /// Whether this error came from the validator
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Whether this error came from the converter
    pub fn is_conversion(&self) -> bool {
        matches!(self, Self::Conversion(_))
    }
}
