//! Guarded value
//!
//! [`GuardedValue`] holds one scalar of untrusted origin together with the
//! rules deciding what may come out of it.
//!
//! A value that was never set (`None`) and a value explicitly set to `""`
//! are distinct states. An explicit empty value always beats the default.

use std::fmt;

use crate::collaborators::{Converter, Validator};
use crate::error::{Error, Result};

/// Whether `value` counts as empty.
///
/// Only a missing value and the empty string are empty; `"0"`, `"0.0"` and
/// whitespace are not.
pub fn is_empty(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.is_empty())
}

/// A scalar value of untrusted origin
pub struct GuardedValue {
    stored: Option<String>,
    default: Option<String>,
    mandatory: bool,
    trim: bool,
    validator: Option<Box<dyn Validator>>,
    converter: Option<Box<dyn Converter>>,
}

impl GuardedValue {
    fn new(mandatory: bool) -> Self {
        Self {
            stored: None,
            default: None,
            mandatory,
            trim: true,
            validator: None,
            converter: None,
        }
    }

    /// Create a value which must never be empty
    pub fn mandatory() -> Self {
        Self::new(true)
    }

    /// Create a value which may be left empty
    pub fn optional() -> Self {
        Self::new(false)
    }

    /// Keep leading and trailing whitespace of values passed to
    /// [`set_value`](Self::set_value).
    pub fn disable_trim(&mut self) {
        self.trim = false;
    }

    /// Attach the validator run on every non-empty value. Replaces any
    /// previously attached validator.
    pub fn attach_validator(&mut self, validator: impl Validator + 'static) {
        self.validator = Some(Box::new(validator));
    }

    /// Attach the converter run after validation. Replaces any previously
    /// attached converter.
    pub fn attach_converter(&mut self, converter: impl Converter + 'static) {
        self.converter = Some(Box::new(converter));
    }

    /// Set the fallback returned while no value has been set.
    ///
    /// The default is neither trimmed, validated nor converted.
    ///
    /// # Errors
    ///
    /// [`Error::Mandatory`] if this value is mandatory and `value` is empty.
    pub fn set_default(&mut self, value: impl Into<String>) -> Result<()> {
        let value = value.into();
        self.check_mandatory(Some(value.as_str()))?;
        self.default = Some(value);
        Ok(())
    }

    /// Set the fallback without checking it against the mandatory flag.
    ///
    /// An empty default on a mandatory value is accepted here and rejected
    /// later by [`value`](Self::value) unless a non-empty value is set.
    pub fn set_default_allow_empty(&mut self, value: impl Into<String>) {
        self.default = Some(value.into());
    }

    /// Accept raw input.
    ///
    /// The input is trimmed (unless disabled), checked against the mandatory
    /// flag, validated and converted. Empty input on an optional value is
    /// stored as-is without reaching the collaborators.
    ///
    /// # Errors
    ///
    /// - [`Error::Mandatory`] if this value is mandatory and the input is empty
    /// - [`Error::Validation`] if the validator rejects the input
    /// - [`Error::Conversion`] if the converter fails
    ///
    /// On error the previously stored value is left untouched.
    pub fn set_value(&mut self, raw: &str) -> Result<()> {
        let value = if self.trim {
            let trimmed = raw.trim();
            if trimmed.len() != raw.len() {
                tracing::trace!(raw, trimmed, "trimmed user value");
            }
            trimmed
        } else {
            raw
        };

        self.check_mandatory(Some(value))?;

        if is_empty(Some(value)) {
            tracing::trace!("empty user value, skipping validation and conversion");
            self.stored = Some(String::new());
            return Ok(());
        }

        if let Some(validator) = &self.validator {
            validator.validate(value)?;
        }

        let value = match &self.converter {
            Some(converter) => {
                let converted = converter.convert(value)?;
                tracing::debug!(input = value, output = %converted, "converted user value");
                converted
            }
            None => value.to_string(),
        };

        self.stored = Some(value);
        Ok(())
    }

    /// The effective value.
    ///
    /// Returns the stored value if [`set_value`](Self::set_value) succeeded,
    /// otherwise the default if it is non-empty, otherwise `""`.
    ///
    /// # Errors
    ///
    /// [`Error::Mandatory`] if this value is mandatory and the effective value
    /// would be empty.
    pub fn value(&self) -> Result<&str> {
        if self.stored.is_none()
            && let Some(default) = self.default.as_deref().filter(|d| !d.is_empty())
        {
            tracing::debug!(default, "no user value, using default");
            return Ok(default);
        }

        self.check_mandatory(self.stored.as_deref())?;
        Ok(self.stored.as_deref().unwrap_or_default())
    }

    /// Whether empty values are rejected
    pub fn is_mandatory(&self) -> bool {
        self.mandatory
    }

    /// Whether [`set_value`](Self::set_value) has succeeded at least once
    pub fn has_value(&self) -> bool {
        self.stored.is_some()
    }

    /// The configured default, if any
    pub fn default_value(&self) -> Option<&str> {
        self.default.as_deref()
    }

    /// Whether input is trimmed before use
    pub fn is_trim_enabled(&self) -> bool {
        self.trim
    }

    fn check_mandatory(&self, value: Option<&str>) -> Result<()> {
        if self.mandatory && is_empty(value) {
            return Err(Error::Mandatory);
        }
        Ok(())
    }
}

impl fmt::Debug for GuardedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuardedValue")
            .field("stored", &self.stored)
            .field("default", &self.default)
            .field("mandatory", &self.mandatory)
            .field("trim", &self.trim)
            .field("validator", &self.validator.is_some())
            .field("converter", &self.converter.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::{ConversionError, ValidationError};
    use rstest::rstest;
    use std::cell::Cell;
    use std::rc::Rc;

    fn reject_bad(value: &str) -> std::result::Result<(), ValidationError> {
        if value == "bad" {
            Err(ValidationError::new("value is bad"))
        } else {
            Ok(())
        }
    }

    #[rstest]
    #[case(None, true)]
    #[case(Some(""), true)]
    #[case(Some("Dog"), false)]
    #[case(Some("0"), false)]
    #[case(Some("0.0"), false)]
    #[case(Some(" "), false)]
    fn test_is_empty(#[case] value: Option<&str>, #[case] expected: bool) {
        assert_eq!(is_empty(value), expected);
    }

    #[test]
    fn test_factories_fix_mandatory_flag() {
        assert!(GuardedValue::mandatory().is_mandatory());
        assert!(!GuardedValue::optional().is_mandatory());
    }

    #[test]
    fn test_get_unset_optional_is_empty_string() {
        let value = GuardedValue::optional();
        assert_eq!(value.value().unwrap(), "");
        assert!(!value.has_value());
    }

    #[test]
    fn test_get_unset_mandatory_fails() {
        let value = GuardedValue::mandatory();
        assert!(value.value().unwrap_err().is_mandatory());
    }

    #[test]
    fn test_set_empty_mandatory_fails() {
        let mut value = GuardedValue::mandatory();
        assert!(value.set_value("").unwrap_err().is_mandatory());
        assert!(!value.has_value());
    }

    #[test]
    fn test_set_whitespace_mandatory_fails_when_trimmed() {
        let mut value = GuardedValue::mandatory();
        assert!(value.set_value("   ").unwrap_err().is_mandatory());
    }

    #[test]
    fn test_set_whitespace_mandatory_kept_without_trim() {
        let mut value = GuardedValue::mandatory();
        value.disable_trim();
        value.set_value("   ").unwrap();
        assert_eq!(value.value().unwrap(), "   ");
    }

    #[test]
    fn test_zero_is_not_empty() {
        let mut value = GuardedValue::mandatory();
        value.set_value("0").unwrap();
        assert_eq!(value.value().unwrap(), "0");
    }

    #[rstest]
    #[case(true, "  x  ", "x")]
    #[case(false, "  x  ", "  x  ")]
    #[case(true, "\tJonas Wagner \n", "Jonas Wagner")]
    fn test_trim(#[case] trim: bool, #[case] input: &str, #[case] expected: &str) {
        let mut value = GuardedValue::mandatory();
        if !trim {
            value.disable_trim();
        }
        assert_eq!(value.is_trim_enabled(), trim);
        value.set_value(input).unwrap();
        assert_eq!(value.value().unwrap(), expected);
    }

    #[test]
    fn test_validator_rejection_preserves_previous_value() {
        let mut value = GuardedValue::optional();
        value.attach_validator(reject_bad);
        value.set_value("good").unwrap();

        let err = value.set_value("bad").unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "value is bad");
        assert_eq!(value.value().unwrap(), "good");
    }

    #[test]
    fn test_validator_rejection_preserves_absent_value() {
        let mut value = GuardedValue::optional();
        value.attach_validator(reject_bad);
        value.set_default("D").unwrap();

        assert!(value.set_value("bad").is_err());
        assert!(!value.has_value());
        assert_eq!(value.value().unwrap(), "D");
    }

    #[test]
    fn test_validator_sees_trimmed_value() {
        let mut value = GuardedValue::mandatory();
        value.attach_validator(reject_bad);
        assert!(value.set_value("  bad ").unwrap_err().is_validation());
    }

    #[test]
    fn test_empty_optional_skips_collaborators() {
        let calls = Rc::new(Cell::new(0));
        let validator_calls = Rc::clone(&calls);
        let converter_calls = Rc::clone(&calls);

        let mut value = GuardedValue::optional();
        value.attach_validator(move |_: &str| {
            validator_calls.set(validator_calls.get() + 1);
            Err::<(), _>(ValidationError::new("always rejects"))
        });
        value.attach_converter(move |v: &str| {
            converter_calls.set(converter_calls.get() + 1);
            Ok::<_, ConversionError>(v.to_string())
        });

        value.set_value("").unwrap();
        value.set_value("   ").unwrap();
        assert_eq!(calls.get(), 0);
        assert_eq!(value.value().unwrap(), "");
    }

    #[test]
    fn test_converter_output_is_stored() {
        let mut value = GuardedValue::mandatory();
        value.attach_validator(reject_bad);
        value.attach_converter(|v: &str| Ok::<_, ConversionError>(v.to_uppercase()));
        value.set_value("good").unwrap();
        assert_eq!(value.value().unwrap(), "GOOD");
    }

    #[test]
    fn test_converter_failure_preserves_previous_value() {
        let mut value = GuardedValue::mandatory();
        value.set_value("first").unwrap();
        value.attach_converter(|_: &str| Err::<String, _>(ConversionError::new("cannot convert")));

        let err = value.set_value("second").unwrap_err();
        assert!(err.is_conversion());
        assert_eq!(value.value().unwrap(), "first");
    }

    #[test]
    fn test_last_attached_validator_wins() {
        let mut value = GuardedValue::mandatory();
        value.attach_validator(|_: &str| Err::<(), _>(ValidationError::new("first")));
        value.attach_validator(reject_bad);
        value.set_value("fine").unwrap();
        assert_eq!(value.value().unwrap(), "fine");
    }

    #[test]
    fn test_default_is_not_validated_or_converted() {
        let mut value = GuardedValue::optional();
        value.attach_validator(reject_bad);
        value.attach_converter(|v: &str| Ok::<_, ConversionError>(v.to_uppercase()));
        value.set_default(" bad ").unwrap();
        assert_eq!(value.value().unwrap(), " bad ");
    }

    #[rstest]
    #[case::optional(GuardedValue::optional())]
    #[case::mandatory(GuardedValue::mandatory())]
    fn test_default_without_value(#[case] mut value: GuardedValue) {
        value.set_default("D").unwrap();
        assert_eq!(value.value().unwrap(), "D");
        assert_eq!(value.default_value(), Some("D"));
    }

    #[rstest]
    #[case::optional(GuardedValue::optional())]
    #[case::mandatory(GuardedValue::mandatory())]
    fn test_value_beats_default(#[case] mut value: GuardedValue) {
        value.set_default("D").unwrap();
        value.set_value("V").unwrap();
        assert_eq!(value.value().unwrap(), "V");
    }

    #[test]
    fn test_explicit_empty_beats_default_on_optional() {
        let mut value = GuardedValue::optional();
        value.set_default("D").unwrap();
        value.set_value("").unwrap();
        assert_eq!(value.value().unwrap(), "");
    }

    #[test]
    fn test_explicit_empty_rejected_on_mandatory_with_default() {
        let mut value = GuardedValue::mandatory();
        value.set_default("D").unwrap();
        assert!(value.set_value("").unwrap_err().is_mandatory());
        assert_eq!(value.value().unwrap(), "D");
    }

    #[test]
    fn test_empty_default_rejected_on_mandatory() {
        let mut value = GuardedValue::mandatory();
        assert!(value.set_default("").unwrap_err().is_mandatory());
        assert_eq!(value.default_value(), None);
    }

    #[test]
    fn test_empty_default_allowed_defers_failure() {
        let mut value = GuardedValue::mandatory();
        value.set_default_allow_empty("");
        assert_eq!(value.default_value(), Some(""));
        assert!(value.value().unwrap_err().is_mandatory());

        value.set_value("late").unwrap();
        assert_eq!(value.value().unwrap(), "late");
    }

    #[test]
    fn test_empty_default_on_optional_reads_empty() {
        let mut value = GuardedValue::optional();
        value.set_default("").unwrap();
        assert_eq!(value.value().unwrap(), "");
    }

    #[test]
    fn test_later_default_overwrites() {
        let mut value = GuardedValue::optional();
        value.set_default("first").unwrap();
        value.set_default("second").unwrap();
        assert_eq!(value.value().unwrap(), "second");
    }

    #[test]
    fn test_value_is_idempotent() {
        let mut value = GuardedValue::mandatory();
        value.set_value("x").unwrap();
        assert_eq!(value.value().unwrap(), "x");
        assert_eq!(value.value().unwrap(), "x");
    }

    #[test]
    fn test_debug_reports_collaborators() {
        let mut value = GuardedValue::optional();
        value.attach_validator(reject_bad);
        let debug = format!("{value:?}");
        assert!(debug.contains("validator: true"));
        assert!(debug.contains("converter: false"));
    }
}
