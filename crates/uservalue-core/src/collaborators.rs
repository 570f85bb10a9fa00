//! Validator and converter collaborators
//!
//! A [`GuardedValue`](crate::GuardedValue) delegates the actual rules to two
//! narrow capabilities. Anything implementing them can be attached, including
//! plain closures:
//!
//! ```rust
//! use uservalue_core::{ConversionError, GuardedValue, ValidationError};
//!
//! let mut port = GuardedValue::mandatory();
//! port.attach_validator(|v: &str| {
//!     v.parse::<u16>()
//!         .map(|_| ())
//!         .map_err(|e| ValidationError::with_source("not a port number", e))
//! });
//! port.attach_converter(|v: &str| Ok::<_, ConversionError>(v.trim_start_matches('0').to_string()));
//! port.set_value("08080")?;
//! assert_eq!(port.value()?, "8080");
//! # Ok::<(), uservalue_core::Error>(())
//! ```

use std::error::Error as StdError;
use std::fmt;

type BoxedSource = Box<dyn StdError + Send + Sync + 'static>;

/// Checks a raw value against domain rules.
pub trait Validator {
    /// Return an error if `value` is not acceptable.
    fn validate(&self, value: &str) -> Result<(), ValidationError>;
}

/// Rewrites an already validated value.
pub trait Converter {
    /// Convert `value` into its replacement.
    fn convert(&self, value: &str) -> Result<String, ConversionError>;
}

impl<F> Validator for F
where
    F: Fn(&str) -> Result<(), ValidationError>,
{
    fn validate(&self, value: &str) -> Result<(), ValidationError> {
        self(value)
    }
}

impl<F> Converter for F
where
    F: Fn(&str) -> Result<String, ConversionError>,
{
    fn convert(&self, value: &str) -> Result<String, ConversionError> {
        self(value)
    }
}

/// Rejection raised by a [`Validator`]
#[derive(Debug)]
pub struct ValidationError {
    message: String,
    source: Option<BoxedSource>,
}

impl ValidationError {
    /// Create a rejection with a message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Create a rejection wrapping the collaborator's own error
    pub fn with_source(message: impl Into<String>, source: impl Into<BoxedSource>) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Description of why the value was rejected
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for ValidationError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source.as_deref().map(|e| e as &(dyn StdError + 'static))
    }
}

/// Failure raised by a [`Converter`]
#[derive(Debug)]
pub struct ConversionError {
    message: String,
    source: Option<BoxedSource>,
}

impl ConversionError {
    /// Create a failure with a message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Create a failure wrapping the collaborator's own error
    pub fn with_source(message: impl Into<String>, source: impl Into<BoxedSource>) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Description of why conversion failed
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for ConversionError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source.as_deref().map(|e| e as &(dyn StdError + 'static))
    }
}
