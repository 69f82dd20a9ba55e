//! Validate command — check one version string and report what was found.

use std::io::{self, Write};

use clap::Args;
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;
use tracing::{debug, instrument};

use semver_isvalid_core::config::Config;
use semver_isvalid_core::validate::{
    Outcome, ParsedVersion, Part, Validation, strip_v_prefix, validate,
};

/// Exit status when anything other than exactly one version is supplied.
///
/// Also used for any other command-line usage error.
pub const EXIT_WRONG_ARGUMENT_COUNT: u8 = 1;

/// Exit status when the run fails before validation (chdir, config, logging).
///
/// Kept outside the range used for validation outcomes.
pub const EXIT_SETUP_FAILURE: u8 = 7;

const SPEC_URL: &str = "https://semver.org";

/// Arguments for validating a version.
#[derive(Args, Debug, Default)]
pub struct ValidateArgs {
    /// The version to validate (exactly one)
    #[arg(value_name = "VERSION")]
    pub versions: Vec<String>,

    /// Allow a "v" at the start of the version
    #[arg(long)]
    pub with_v: bool,
}

/// Map an outcome to the process exit status scripted callers branch on.
pub const fn exit_code_for(outcome: &Outcome) -> u8 {
    match outcome {
        Outcome::Valid => 0,
        Outcome::GenericInvalid { .. } | Outcome::IntegerOverflow { .. } => 2,
        Outcome::EmptyString => 3,
        Outcome::WrongSegmentCount { .. } => 4,
        Outcome::InvalidCharacters { .. } => 5,
        Outcome::LeadingZeroSegment { .. } => 6,
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    version: &'a str,
    valid: bool,
    outcome: &'static str,
    description: &'static str,
    exit_code: u8,
    diagnostics: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    part: Option<Part>,
    #[serde(skip_serializing_if = "Option::is_none")]
    parsed: Option<&'a ParsedVersion>,
}

impl<'a> JsonReport<'a> {
    fn new(version: &'a str, report: &'a Validation) -> Self {
        Self {
            version,
            valid: report.outcome.is_valid(),
            outcome: report.outcome.code(),
            description: report.outcome.description(),
            exit_code: exit_code_for(&report.outcome),
            diagnostics: &report.diagnostics,
            part: report.outcome.part(),
            parsed: report.version.as_ref(),
        }
    }
}

/// Validate the single version in `args`, print the report and return the
/// exit status.
///
/// With no version, prints the long help and returns 0. With more than one,
/// prints an error and returns [`EXIT_WRONG_ARGUMENT_COUNT`].
///
/// # Arguments
/// * `global_json` - Global `--json` flag from CLI
/// * `config` - Loaded configuration; `with_v` there enables stripping too
#[instrument(name = "cmd_validate", skip_all, fields(json_output = global_json))]
pub fn cmd_validate(
    args: ValidateArgs,
    global_json: bool,
    config: &Config,
) -> anyhow::Result<u8> {
    let version = match args.versions.as_slice() {
        [] => {
            crate::command().print_long_help()?;
            return Ok(0);
        }
        [version] => version,
        many => {
            let line = format!(
                "Wrong number of arguments supplied. 1 argument required but found {}",
                many.len()
            );
            eprintln!("{}", line.if_supports_color(Stream::Stderr, |t| t.red()));
            return Ok(EXIT_WRONG_ARGUMENT_COUNT);
        }
    };

    let with_v = args.with_v || config.with_v;
    let candidate = strip_v_prefix(version, with_v);
    debug!(with_v, stripped = candidate.len() != version.len(), "validating version");

    let report = validate(candidate);

    if global_json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonReport::new(candidate, &report))?
        );
    } else {
        render_text(&report, &mut io::stdout().lock(), &mut io::stderr().lock())?;
    }

    Ok(exit_code_for(&report.outcome))
}

/// Diagnostics go to `out`, one per line; the failure line goes to `err`.
fn render_text(report: &Validation, out: &mut impl Write, err: &mut impl Write) -> io::Result<()> {
    for line in &report.diagnostics {
        writeln!(out, "{line}")?;
    }

    if report.outcome.is_valid() {
        writeln!(out, "{}", report.outcome)?;
    } else {
        let line = format!(
            "Invalid Semantic Version: {}. For more information see {SPEC_URL}",
            report.outcome
        );
        writeln!(err, "{}", line.if_supports_color(Stream::Stderr, |t| t.red()))?;
    }
    Ok(())
}
