//! Core library for semver-isvalid.
//!
//! This crate provides the Semantic Version validator used by the
//! `semver-isvalid` CLI and any downstream consumers, plus the configuration
//! loader the CLI shares.
//!
//! # Modules
//!
//! - [`validate`] - Version validation and diagnostics
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use semver_isvalid_core::validate;
//!
//! let report = validate("1.2.3-beta.1");
//! assert!(report.outcome.is_valid());
//! for line in &report.diagnostics {
//!     println!("{line}");
//! }
//! ```
#![deny(unsafe_code)]

pub mod config;

pub mod error;

pub mod validate;

pub use config::{Config, ConfigLoader, LogLevel};

pub use error::{ConfigError, ConfigResult};

pub use validate::{Outcome, ParsedVersion, Part, Segment, Validation, strip_v_prefix, validate};
