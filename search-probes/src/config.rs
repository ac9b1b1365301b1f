//! Per-probe configuration records with the stock endpoints as defaults.
//!
//! Each probe takes its own record, so tests (or a config file) can point
//! any probe at a different endpoint without touching the others.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Instant-answer API endpoint.
pub const DUCKDUCKGO_API_URL: &str = "https://api.duckduckgo.com/";
/// HTML search results endpoint.
pub const BRAVE_SEARCH_URL: &str = "https://search.brave.com/search";
/// Archive CDX index endpoint.
pub const WAYBACK_CDX_URL: &str = "http://web.archive.org/cdx/search/cdx";

/// How many sample URLs a passing probe keeps.
pub const DEFAULT_SAMPLE_LIMIT: usize = 3;

/// Hosts checked by the connectivity probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectivityConfig {
    /// Checked in order; the first failure stops the probe.
    pub urls: Vec<String>,
    /// Per-host timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ConnectivityConfig {
    fn default() -> Self {
        Self {
            urls: vec![
                "https://www.google.com".into(),
                "https://duckduckgo.com".into(),
                "https://www.bing.com".into(),
                "https://api.duckduckgo.com".into(),
            ],
            timeout_secs: 10,
        }
    }
}

impl ConnectivityConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.urls.is_empty() {
            return Err(ConfigError::Invalid(
                "connectivity.urls must not be empty".into(),
            ));
        }
        for url in &self.urls {
            validate_url("connectivity.urls", url)?;
        }
        validate_timeout("connectivity", self.timeout_secs)
    }
}

/// Instant-answer API probe settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstantAnswerConfig {
    pub endpoint: String,
    pub query: String,
    pub timeout_secs: u64,
}

impl Default for InstantAnswerConfig {
    fn default() -> Self {
        Self {
            endpoint: DUCKDUCKGO_API_URL.into(),
            query: "site:github.com php".into(),
            timeout_secs: 15,
        }
    }
}

impl InstantAnswerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        validate_url("instant_answer.endpoint", &self.endpoint)?;
        validate_timeout("instant_answer", self.timeout_secs)
    }
}

/// HTML search-page probe settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HtmlSearchConfig {
    pub endpoint: String,
    pub query: String,
    /// Links containing this domain are the engine's own and do not count.
    pub own_domain: String,
    /// Fixed User-Agent. If `None`, rotates through built-in browser strings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    pub timeout_secs: u64,
}

impl Default for HtmlSearchConfig {
    fn default() -> Self {
        Self {
            endpoint: BRAVE_SEARCH_URL.into(),
            query: "site:github.com".into(),
            own_domain: "brave.com".into(),
            user_agent: None,
            timeout_secs: 15,
        }
    }
}

impl HtmlSearchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        validate_url("html_search.endpoint", &self.endpoint)?;
        if self.own_domain.is_empty() {
            return Err(ConfigError::Invalid(
                "html_search.own_domain must not be empty".into(),
            ));
        }
        validate_timeout("html_search", self.timeout_secs)
    }
}

/// Archive CDX probe settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveConfig {
    pub endpoint: String,
    /// CDX `url` pattern, e.g. `*.github.com/*`.
    pub url_pattern: String,
    pub match_type: String,
    pub limit: u32,
    pub timeout_secs: u64,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            endpoint: WAYBACK_CDX_URL.into(),
            url_pattern: "*.github.com/*".into(),
            match_type: "domain".into(),
            limit: 10,
            timeout_secs: 30,
        }
    }
}

impl ArchiveConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        validate_url("archive.endpoint", &self.endpoint)?;
        validate_limit("archive", self.limit)?;
        validate_timeout("archive", self.timeout_secs)
    }
}

/// Compound dork probe settings: one instant-answer and one archive sub-query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompoundQueryConfig {
    pub instant_answer_endpoint: String,
    pub instant_answer_query: String,
    pub archive_endpoint: String,
    pub archive_url_pattern: String,
    pub archive_match_type: String,
    pub archive_limit: u32,
    /// Applies to each sub-query separately.
    pub timeout_secs: u64,
}

impl Default for CompoundQueryConfig {
    fn default() -> Self {
        Self {
            instant_answer_endpoint: DUCKDUCKGO_API_URL.into(),
            instant_answer_query: "inurl:product.php".into(),
            archive_endpoint: WAYBACK_CDX_URL.into(),
            archive_url_pattern: "*.edu/*id=*".into(),
            archive_match_type: "domain".into(),
            archive_limit: 20,
            timeout_secs: 30,
        }
    }
}

impl CompoundQueryConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        validate_url("compound.instant_answer_endpoint", &self.instant_answer_endpoint)?;
        validate_url("compound.archive_endpoint", &self.archive_endpoint)?;
        validate_limit("compound", self.archive_limit)?;
        validate_timeout("compound", self.timeout_secs)
    }
}

/// All probe settings for one diagnostic run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbesConfig {
    pub connectivity: ConnectivityConfig,
    pub instant_answer: InstantAnswerConfig,
    pub html_search: HtmlSearchConfig,
    pub archive: ArchiveConfig,
    pub compound: CompoundQueryConfig,
}

impl ProbesConfig {
    /// Validates every probe record, returning the first problem found.
    ///
    /// Checks:
    /// - every endpoint parses as an absolute `http`/`https` URL
    /// - every timeout is greater than 0
    /// - archive limits are greater than 0
    /// - the connectivity list is not empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.connectivity.validate()?;
        self.instant_answer.validate()?;
        self.html_search.validate()?;
        self.archive.validate()?;
        self.compound.validate()
    }
}

fn validate_url(field: &str, raw: &str) -> Result<(), ConfigError> {
    let parsed = url::Url::parse(raw)
        .map_err(|e| ConfigError::Invalid(format!("{field}: invalid URL {raw:?}: {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::Invalid(format!(
            "{field}: unsupported scheme {other:?}"
        ))),
    }
}

fn validate_timeout(section: &str, secs: u64) -> Result<(), ConfigError> {
    if secs == 0 {
        return Err(ConfigError::Invalid(format!(
            "{section}.timeout_secs must be greater than 0"
        )));
    }
    Ok(())
}

fn validate_limit(section: &str, limit: u32) -> Result<(), ConfigError> {
    if limit == 0 {
        return Err(ConfigError::Invalid(format!(
            "{section} limit must be greater than 0"
        )));
    }
    Ok(())
}
