//! Error types for the diagnostic runner.

use search_probes::{ConfigError, ProbeKind};

/// Errors that abort a diagnostic run.
///
/// Probe failures are not in here: they are recorded as failed results and
/// the run continues.
#[derive(Debug, thiserror::Error)]
pub enum DoctorError {
    /// Configuration file unreadable, unparsable or invalid.
    #[error("config error: {0}")]
    Config(String),

    /// Writing the report failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A probe result was recorded twice in one run.
    #[error("duplicate result for probe `{0}`")]
    DuplicateProbe(ProbeKind),
}

impl From<ConfigError> for DoctorError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, DoctorError>;
