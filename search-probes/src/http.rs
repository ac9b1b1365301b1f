//! Shared HTTP client and browser User-Agent rotation for probe requests.
//!
//! The client carries no global timeout: each probe sets its own
//! per-request timeout from its configuration record.

use crate::error::ConfigError;
use rand::seq::SliceRandom;

/// Realistic browser User-Agent strings for the HTML search probe.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:133.0) Gecko/20100101 Firefox/133.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:133.0) Gecko/20100101 Firefox/133.0",
];

/// Build the [`reqwest::Client`] shared by all probes of one run.
///
/// The client has:
/// - Cookie store enabled (consent redirects on search front-ends)
/// - Brotli and gzip decompression
/// - At most 10 redirects
///
/// # Errors
///
/// Returns [`ConfigError::HttpClient`] if the client cannot be constructed.
pub fn build_client() -> Result<reqwest::Client, ConfigError> {
    reqwest::Client::builder()
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| ConfigError::HttpClient(e.to_string()))
}

/// Select a random User-Agent string from the rotation list.
pub fn random_user_agent() -> &'static str {
    let mut rng = rand::thread_rng();
    USER_AGENTS
        .choose(&mut rng)
        .copied()
        // SAFETY: USER_AGENTS is a non-empty const array, choose only returns None on empty slices
        .unwrap_or(USER_AGENTS[0])
}
