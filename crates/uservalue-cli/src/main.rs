//! Uservalue CLI
//!
//! Guards a single value passed on the command line or through stdin and
//! prints the effective value.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod guard;

/// Uservalue - check a single untrusted value
#[derive(Parser)]
#[command(name = "uservalue")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Value to guard; leave out to rely on the default
    value: Option<String>,

    /// Read the value from the first line of stdin
    #[arg(long, conflicts_with = "value")]
    stdin: bool,

    /// Allow the value to be empty
    #[arg(long)]
    optional: bool,

    /// Fallback used when no value is given
    #[arg(short, long, env = "USERVALUE_DEFAULT")]
    default: Option<String>,

    /// Accept an empty default even if the value is mandatory
    #[arg(long, requires = "default")]
    allow_empty_default: bool,

    /// Keep leading and trailing whitespace
    #[arg(long)]
    no_trim: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let input = if cli.stdin {
        guard::Input::Stdin
    } else {
        match cli.value {
            Some(value) => guard::Input::Arg(value),
            None => guard::Input::Missing,
        }
    };

    let options = guard::Options {
        optional: cli.optional,
        default: cli.default,
        allow_empty_default: cli.allow_empty_default,
        no_trim: cli.no_trim,
    };

    let value = guard::run(&options, input)?;
    println!("{value}");
    Ok(())
}
