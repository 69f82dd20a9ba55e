//! Semantic Version validation with human-readable diagnostics.
//!
//! [`validate`] walks a candidate string through a fixed sequence of gates:
//!
//! 1. empty check
//! 2. split into three dot-separated parts
//! 3. peel off build metadata (`+`) and then pre-release (`-`) from the third part
//! 4. character class and leading-zero checks on major, minor and patch
//! 5. numeric parsing of major, minor and patch as `u64`
//! 6. pre-release identifier checks
//! 7. build metadata identifier checks
//!
//! The first gate that fails decides the [`Outcome`]. Every gate that runs
//! may append diagnostics, so a failed validation still reports what was
//! found before the failure.
//!
//! # Example
//!
//! ```
//! use semver_isvalid_core::validate::{Outcome, validate};
//!
//! let report = validate("1.2.03");
//! assert_eq!(report.outcome.code(), "leading-zero-segment");
//! assert_eq!(report.diagnostics, ["Illegal leading 0 found in \"patch\" part"]);
//!
//! let report = validate("1.2.3");
//! assert_eq!(report.outcome, Outcome::Valid);
//! ```

use std::fmt;
use std::num::IntErrorKind;

use serde::Serialize;
use tracing::{debug, instrument};

/// Notice appended after a well-formed pre-release identifier.
pub const PRE_RELEASE_NOTICE: &str = "NOTICE: A pre-release version indicates that the version is unstable and might not satisfy the intended compatibility requirements as denoted by its associated normal version.";

/// Notice appended after well-formed build metadata.
pub const METADATA_NOTICE: &str = "NOTICE: Build metadata MUST be ignored when determining version precedence. Thus two versions that differ only in the build metadata, have the same precedence.";

/// One of the three numeric core segments of a version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Segment {
    /// `X` in `X.y.z`.
    Major,
    /// `Y` in `x.Y.z`.
    Minor,
    /// `Z` in `x.y.Z`.
    Patch,
}

impl Segment {
    /// The segment name as used in diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Major => "major",
            Self::Minor => "minor",
            Self::Patch => "patch",
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The part of a version a failing check was looking at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum Part {
    /// Major, minor or patch.
    Core(Segment),
    /// A single dot-separated pre-release identifier.
    PreRelease(String),
    /// A single dot-separated build metadata identifier.
    Metadata(String),
}

/// Terminal classification of one validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Every gate passed.
    Valid,
    /// The candidate was the empty string.
    EmptyString,
    /// Splitting on `.` did not produce exactly three parts.
    WrongSegmentCount {
        /// Number of parts found (at most three are ever split off).
        found: usize,
    },
    /// A part contained characters its grammar does not allow.
    InvalidCharacters {
        /// Where the offending characters were found.
        part: Part,
    },
    /// A numeric part longer than one digit started with `0`.
    LeadingZeroSegment {
        /// Where the leading zero was found.
        part: Part,
    },
    /// A core segment does not fit in a `u64`.
    IntegerOverflow {
        /// The segment that overflowed.
        segment: Segment,
    },
    /// A core segment could not be parsed for any other reason (e.g. it is empty).
    GenericInvalid {
        /// The segment that failed to parse.
        segment: Segment,
    },
}

impl Outcome {
    /// Whether this outcome means the candidate is a valid Semantic Version.
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// The part a failing check was looking at, if the outcome names one.
    pub fn part(&self) -> Option<Part> {
        match self {
            Self::InvalidCharacters { part } | Self::LeadingZeroSegment { part } => {
                Some(part.clone())
            }
            Self::IntegerOverflow { segment } | Self::GenericInvalid { segment } => {
                Some(Part::Core(*segment))
            }
            Self::Valid | Self::EmptyString | Self::WrongSegmentCount { .. } => None,
        }
    }

    /// Stable identifier callers can switch on.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Valid => "valid",
            Self::EmptyString => "empty-string",
            Self::WrongSegmentCount { .. } => "wrong-segment-count",
            Self::InvalidCharacters { .. } => "invalid-characters",
            Self::LeadingZeroSegment { .. } => "leading-zero-segment",
            Self::IntegerOverflow { .. } => "integer-overflow",
            Self::GenericInvalid { .. } => "generic-invalid",
        }
    }

    /// Short human description of the outcome.
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Valid => "Semantic Version is valid",
            Self::EmptyString => "Version string empty",
            Self::WrongSegmentCount { .. } => "Version does not have 3 parts",
            Self::InvalidCharacters { .. } => "Invalid characters in version",
            Self::LeadingZeroSegment { .. } => "Version segment starts with 0",
            Self::IntegerOverflow { .. } => "Version segment exceeds 64-bit range",
            Self::GenericInvalid { .. } => "Invalid version",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// The pieces of a version that passed every gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedVersion {
    /// Major version number.
    pub major: u64,
    /// Minor version number.
    pub minor: u64,
    /// Patch version number.
    pub patch: u64,
    /// Pre-release string after the first `-`, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre: Option<String>,
    /// Build metadata after the first `+`, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build: Option<String>,
}

/// Result of validating a single candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    /// How the validation ended.
    pub outcome: Outcome,
    /// Diagnostics in the order the checks produced them.
    pub diagnostics: Vec<String>,
    /// The decomposed version. `Some` only when `outcome` is [`Outcome::Valid`].
    pub version: Option<ParsedVersion>,
}

/// Remove a single leading `v` from `candidate` when `enabled`.
///
/// [`validate`] never does this on its own; a leading `v` is an invalid
/// character there.
pub fn strip_v_prefix(candidate: &str, enabled: bool) -> &str {
    if enabled {
        candidate.strip_prefix('v').unwrap_or(candidate)
    } else {
        candidate
    }
}

/// Validate `candidate` as a Semantic Version 2.0.0 string.
#[instrument(level = "debug", skip_all, fields(len = candidate.len()))]
pub fn validate(candidate: &str) -> Validation {
    let mut diagnostics = Vec::new();
    let (outcome, version) = match run_gates(candidate, &mut diagnostics) {
        Ok(version) => (Outcome::Valid, Some(version)),
        Err(outcome) => (outcome, None),
    };
    debug!(
        outcome = outcome.code(),
        diagnostics = diagnostics.len(),
        "validation finished"
    );
    Validation {
        outcome,
        diagnostics,
        version,
    }
}

fn run_gates(candidate: &str, diagnostics: &mut Vec<String>) -> Result<ParsedVersion, Outcome> {
    if candidate.is_empty() {
        return Err(Outcome::EmptyString);
    }

    // The third part keeps any further dots; they belong to the suffixes.
    let parts: Vec<&str> = candidate.splitn(3, '.').collect();
    let &[major, minor, rest] = parts.as_slice() else {
        diagnostics.push(format!("Found {} number of parts", parts.len()));
        return Err(Outcome::WrongSegmentCount { found: parts.len() });
    };

    // Metadata is the right-most suffix, so it comes off first.
    let (rest, build) = split_suffix(rest, '+');
    let (patch, pre) = split_suffix(rest, '-');

    let core = [
        (Segment::Major, major),
        (Segment::Minor, minor),
        (Segment::Patch, patch),
    ];
    for (segment, text) in core {
        check_core_segment(segment, text, diagnostics)?;
    }

    let mut numbers = [0_u64; 3];
    for (slot, (segment, text)) in numbers.iter_mut().zip(core) {
        *slot = parse_core_segment(segment, text, diagnostics)?;
    }
    let [major, minor, patch] = numbers;

    if let Some(pre) = pre {
        check_pre_release(pre, diagnostics)?;
    }
    if let Some(build) = build {
        check_metadata(build, diagnostics)?;
    }

    Ok(ParsedVersion {
        major,
        minor,
        patch,
        pre: pre.map(str::to_string),
        build: build.map(str::to_string),
    })
}

/// Split once on `sep`. An empty right-hand side counts as no suffix.
fn split_suffix(text: &str, sep: char) -> (&str, Option<&str>) {
    match text.split_once(sep) {
        Some((head, tail)) => (head, (!tail.is_empty()).then_some(tail)),
        None => (text, None),
    }
}

fn check_core_segment(
    segment: Segment,
    text: &str,
    diagnostics: &mut Vec<String>,
) -> Result<(), Outcome> {
    let part = Part::Core(segment);
    if !is_numeric(text) {
        diagnostics.push(format!(
            "Illegal non-numeric characters found in {:?} part",
            segment.name()
        ));
        return Err(Outcome::InvalidCharacters { part });
    }
    if has_leading_zero(text) {
        diagnostics.push(format!(
            "Illegal leading 0 found in {:?} part",
            segment.name()
        ));
        return Err(Outcome::LeadingZeroSegment { part });
    }
    Ok(())
}

fn parse_core_segment(
    segment: Segment,
    text: &str,
    diagnostics: &mut Vec<String>,
) -> Result<u64, Outcome> {
    match text.parse::<u64>() {
        Ok(value) => {
            diagnostics.push(format!("Found {segment} version of {value}"));
            Ok(value)
        }
        Err(err) => {
            debug!(%segment, error = %err, "core segment did not parse");
            diagnostics.push(format!(
                "Unable to parse {segment} part. Must be valid numeric characters [0-9]"
            ));
            match err.kind() {
                IntErrorKind::PosOverflow => Err(Outcome::IntegerOverflow { segment }),
                _ => Err(Outcome::GenericInvalid { segment }),
            }
        }
    }
}

fn check_pre_release(pre: &str, diagnostics: &mut Vec<String>) -> Result<(), Outcome> {
    for id in pre.split('.') {
        if is_numeric(id) {
            if has_leading_zero(id) {
                diagnostics.push(format!(
                    "Illegal leading 0 found in pre-release numeric part {id:?}"
                ));
                return Err(Outcome::LeadingZeroSegment {
                    part: Part::PreRelease(id.to_string()),
                });
            }
        } else if !is_identifier(id) {
            diagnostics.push(format!(
                "Illegal characters found in pre-release non-numeric part {id:?}. Must be [0-9A-Za-z-]"
            ));
            return Err(Outcome::InvalidCharacters {
                part: Part::PreRelease(id.to_string()),
            });
        }
    }
    diagnostics.push(format!(
        "Version is a pre-release version rather than a stable release version with a pre-release identifier of {pre:?}"
    ));
    diagnostics.push(PRE_RELEASE_NOTICE.to_string());
    Ok(())
}

// Metadata identifiers are never numeric, so no leading-zero rule applies.
fn check_metadata(build: &str, diagnostics: &mut Vec<String>) -> Result<(), Outcome> {
    if let Some(id) = build.split('.').find(|id| !is_identifier(id)) {
        diagnostics.push(format!(
            "Illegal characters found in metadata part {id:?}. Must be [0-9A-Za-z-]"
        ));
        return Err(Outcome::InvalidCharacters {
            part: Part::Metadata(id.to_string()),
        });
    }
    diagnostics.push(format!("Found build metadata on version of {build:?}"));
    diagnostics.push(METADATA_NOTICE.to_string());
    Ok(())
}

// An empty string passes both character checks; only parsing rejects it.
fn is_numeric(text: &str) -> bool {
    text.bytes().all(|b| b.is_ascii_digit())
}

fn is_identifier(text: &str) -> bool {
    text.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
}

fn has_leading_zero(text: &str) -> bool {
    text.len() > 1 && text.starts_with('0')
}
