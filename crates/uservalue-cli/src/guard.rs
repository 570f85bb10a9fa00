//! Guard command

use std::io::BufRead;

use anyhow::{Context, Result};
use uservalue_core::ValueConfig;

/// Flags controlling how the value is guarded
#[derive(Debug, Default)]
pub struct Options {
    pub optional: bool,
    pub default: Option<String>,
    pub allow_empty_default: bool,
    pub no_trim: bool,
}

/// Where the raw value comes from
#[derive(Debug)]
pub enum Input {
    /// Positional argument
    Arg(String),
    /// First line of stdin
    Stdin,
    /// Nothing given; the value is never set
    Missing,
}

impl Options {
    fn to_config(&self) -> ValueConfig {
        ValueConfig {
            mandatory: !self.optional,
            default: self.default.clone(),
            allow_empty_default: self.allow_empty_default,
            trim: !self.no_trim,
        }
    }
}

/// Guard one value and return its effective form
pub fn run(options: &Options, input: Input) -> Result<String> {
    let raw = match input {
        Input::Arg(value) => Some(value),
        Input::Stdin => Some(read_line(std::io::stdin().lock())?),
        Input::Missing => None,
    };
    guard(options, raw.as_deref())
}

fn guard(options: &Options, raw: Option<&str>) -> Result<String> {
    let config = options.to_config();
    tracing::debug!(?config, "guarding value");

    let mut value = config.build().context("Invalid default value")?;

    if let Some(raw) = raw {
        value.set_value(raw).context("Rejected value")?;
    }

    let effective = value.value().context("No value given")?;
    Ok(effective.to_string())
}

fn read_line(mut reader: impl BufRead) -> Result<String> {
    let mut line = String::new();
    reader
        .read_line(&mut line)
        .context("Failed to read value from stdin")?;

    let len = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(len);
    Ok(line)
}
