//! Library interface for the `semver-isvalid` CLI.
//!
//! This crate exposes the CLI's argument parser and command implementation
//! as a library, primarily for documentation generation and testing. The
//! actual entry point is in `main.rs`.
//!
//! # Structure
//!
//! - [`Cli`] - The root argument parser (clap derive)
//! - [`commands`] - Command implementations
//!
//! # Documentation Generation
//!
//! The [`command()`] function returns the clap `Command` for generating man pages
//! and shell completions via `xtask`.

pub mod commands;

use clap::{CommandFactory, Parser};
use std::path::PathBuf;

/// Color output preference.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect terminal capabilities automatically.
    #[default]
    Auto,
    /// Always emit colors.
    Always,
    /// Never emit colors.
    Never,
}

impl ColorChoice {
    /// Configure global color output based on this choice.
    ///
    /// Call this once at startup to set the color mode.
    pub fn apply(self) {
        match self {
            Self::Auto => {} // owo-colors auto-detects by default
            Self::Always => owo_colors::set_override(true),
            Self::Never => owo_colors::set_override(false),
        }
    }
}

const LONG_ABOUT: &str = "\
semver-isvalid allows you to validate a single semantic version

In addition to validating a semantic version, semver-isvalid will tell you
information about the version it has discovered. This can include specific
details about validation issues, what it found about the version, and notices
that may help in understanding the version.

    $ semver-isvalid 1.2.3
    Found major version of 1
    Found minor version of 2
    Found patch version of 3
    Semantic Version is valid

The \"v\" at the start of a version is NOT part of Semantic Versioning. Use
--with-v (or `with_v = true` in a config file) to strip one leading \"v\"
before validating.";

const AFTER_LONG_HELP: &str = "\
EXIT CODES:
    0    The version is valid
    1    Wrong number of arguments (exactly one version is required) or another usage error
    2    A general invalid semantic version (including numeric overflow)
    3    The version is an empty string
    4    The version does not have 3 parts
    5    Invalid characters were found in a part of the version
    6    A numeric segment starts with 0
    7    The run failed before validation (bad config file, -C directory, logging setup)

ENVIRONMENT VARIABLES:
    RUST_LOG                   Log filter (e.g., debug, semver_isvalid=trace)
    SEMVER_ISVALID_LOG_PATH    Explicit log file path
    SEMVER_ISVALID_LOG_DIR     Log directory

For more information on Semantic Versions see https://semver.org
";

/// Command-line interface definition for semver-isvalid.
#[derive(Parser)]
#[command(name = "semver-isvalid")]
#[command(about = "Validate a single semantic version", long_about = LONG_ABOUT)]
#[command(version)]
#[command(after_long_help = AFTER_LONG_HELP)]
pub struct Cli {
    /// The version to validate and how to treat it.
    #[command(flatten)]
    pub check: commands::validate::ValidateArgs,

    /// Path to configuration file (overrides discovery)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Run as if started in DIR
    #[arg(short = 'C', long)]
    pub chdir: Option<PathBuf>,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,

    /// More log detail (repeatable; e.g. -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Colorize output
    #[arg(long, value_enum, default_value_t)]
    pub color: ColorChoice,

    /// Output the report as JSON (for scripting)
    #[arg(long)]
    pub json: bool,
}

/// Returns the clap command for documentation generation
pub fn command() -> clap::Command {
    Cli::command()
}
