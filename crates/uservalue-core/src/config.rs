//! Declarative value definitions
//!
//! A [`ValueConfig`] describes how a [`GuardedValue`] is set up, so the
//! flags can live next to the rest of an application's settings.
//!
//! # Example
//!
//! ```yaml
//! mandatory: true
//! default: "02:00:00"
//! trim: false
//! ```
//!
//! Validators and converters are code and are attached after
//! [`ValueConfig::build`].

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::value::GuardedValue;

/// Setup of a single guarded value
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValueConfig {
    /// Reject empty values
    #[serde(default = "default_true")]
    pub mandatory: bool,

    /// Fallback used while no value has been set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,

    /// Accept an empty default on a mandatory value (fails on read instead)
    #[serde(default)]
    pub allow_empty_default: bool,

    /// Trim leading and trailing whitespace from input
    #[serde(default = "default_true")]
    pub trim: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ValueConfig {
    fn default() -> Self {
        Self {
            mandatory: default_true(),
            default: None,
            allow_empty_default: false,
            trim: default_true(),
        }
    }
}

impl ValueConfig {
    /// Build a [`GuardedValue`] from this definition
    ///
    /// # Errors
    ///
    /// [`Error::Mandatory`](crate::Error::Mandatory) if the value is mandatory,
    /// the default is empty and `allow_empty_default` is off.
    pub fn build(&self) -> Result<GuardedValue> {
        let mut value = if self.mandatory {
            GuardedValue::mandatory()
        } else {
            GuardedValue::optional()
        };

        if !self.trim {
            value.disable_trim();
        }

        if let Some(default) = &self.default {
            if self.allow_empty_default {
                value.set_default_allow_empty(default.as_str());
            } else {
                value.set_default(default.as_str())?;
            }
        }

        Ok(value)
    }
}
