//! Error types for the search-probes crate.
//!
//! A probe never panics or propagates a transport error past its own
//! boundary: every failure is folded into a [`ProbeError`] value that the
//! caller records alongside the probe's name.

/// Why a probe did not pass.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProbeError {
    /// The request could not be completed (DNS, refused connection, timeout, body read).
    #[error("request failed: {0}")]
    Network(String),

    /// The endpoint answered with something other than HTTP 200.
    #[error("HTTP {0}")]
    Status(u16),

    /// The body did not have the shape the probe expects (bad JSON, wrong types).
    #[error("unexpected response shape: {0}")]
    Shape(String),

    /// The endpoint answered correctly but had nothing usable in it.
    #[error("no results: {0}")]
    Empty(String),

    /// The search page served a bot-detection challenge instead of results.
    #[error("CAPTCHA detected in response")]
    Captcha,

    /// A connectivity target could not be reached; later targets were skipped.
    #[error("{url} unreachable: {reason}")]
    Unreachable {
        /// The host that failed.
        url: String,
        /// The transport error text.
        reason: String,
    },
}

impl ProbeError {
    /// Returns `true` for failures that are an expected, valid answer from
    /// the service rather than a sign of breakage.
    pub fn is_informational(&self) -> bool {
        matches!(self, Self::Empty(_))
    }

    /// Map a transport error, distinguishing timeouts in the message.
    pub(crate) fn from_transport(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Network(format!("timed out: {err}"))
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// Invalid probe configuration or HTTP client setup failure.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A configuration field has an unusable value.
    #[error("config error: {0}")]
    Invalid(String),

    /// The shared HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}
