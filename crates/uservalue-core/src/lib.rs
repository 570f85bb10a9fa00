//! Uservalue Core Library
//!
//! Guards a single scalar value of untrusted origin: CLI parameters, form
//! fields, configuration entries. A [`GuardedValue`] decides how a raw string
//! becomes a trusted value:
//! - Trimming (on by default)
//! - Mandatory / optional enforcement
//! - Validation and conversion through pluggable collaborators
//! - Default values and their precedence against explicit input
//!
//! # Flow
//!
//! ```text
//! ┌─────────┐     ┌──────────┐     ┌───────────┐     ┌───────────┐
//! │   Raw   │────▶│   Trim   │────▶│ Validator │────▶│ Converter │──▶ stored
//! │  input  │     │+Mandatory│     │ (optional)│     │ (optional)│
//! └─────────┘     └──────────┘     └───────────┘     └───────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use uservalue_core::GuardedValue;
//!
//! let mut start = GuardedValue::mandatory();
//! start.set_default("02:00:00")?;
//! assert_eq!(start.value()?, "02:00:00");
//!
//! start.set_value("  03:00:00 ")?;
//! assert_eq!(start.value()?, "03:00:00");
//! # Ok::<(), uservalue_core::Error>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod collaborators;
pub mod config;
pub mod error;
pub mod value;

pub use collaborators::{ConversionError, Converter, ValidationError, Validator};
pub use config::ValueConfig;
pub use error::{Error, Result};
pub use value::{GuardedValue, is_empty};
