//! search-doctor: which public search back-ends work from here?
//!
//! Runs the probes from [`search_probes`] in a fixed order against the live
//! services (or whatever endpoints the configuration names), then turns the
//! five pass/fail results into a recommendation tier and a preferred order
//! of back-ends for a downstream dork scanner.
//!
//! # Flow
//!
//! 1. [`DoctorConfig`]: defaults, or a TOML file
//! 2. [`DiagnosticRunner::run`]: probes run one at a time; failures are recorded, never fatal
//! 3. [`report::write_report`]: summary table, [`report::Tier`], priority list

pub mod config;
pub mod error;
pub mod outcome;
pub mod report;
pub mod runner;

pub use config::DoctorConfig;
pub use error::{DoctorError, Result};
pub use outcome::{ProbeOutcomeSet, ProbeResult};
pub use runner::DiagnosticRunner;
