//! Wayback Machine CDX index — historical URLs, rarely blocked.
//!
//! With `output=json` the index answers with an array of rows. The first
//! row is the field header (`["original"]` when `fl=original`); every row
//! after it holds one archived URL.

use crate::config::ArchiveConfig;
use crate::error::ProbeError;
use crate::probe::{read_body, Probe};
use crate::types::{Evidence, ProbeKind, Transcript};
use serde_json::Value;

/// Archive index probe.
///
/// Passes when the response has at least one row beyond the header.
pub struct ArchiveProbe {
    config: ArchiveConfig,
    sample_limit: usize,
}

impl ArchiveProbe {
    pub fn new(config: ArchiveConfig) -> Self {
        Self {
            config,
            sample_limit: crate::config::DEFAULT_SAMPLE_LIMIT,
        }
    }

    pub fn with_sample_limit(mut self, limit: usize) -> Self {
        self.sample_limit = limit;
        self
    }
}

impl Probe for ArchiveProbe {
    async fn run(
        &self,
        client: &reqwest::Client,
        transcript: &mut Transcript,
    ) -> Result<Evidence, ProbeError> {
        tracing::trace!(pattern = %self.config.url_pattern, "archive probe");

        let limit = self.config.limit.to_string();
        let response = client
            .get(&self.config.endpoint)
            .query(&[
                ("url", self.config.url_pattern.as_str()),
                ("matchType", self.config.match_type.as_str()),
                ("output", "json"),
                ("fl", "original"),
                ("collapse", "urlkey"),
                ("limit", limit.as_str()),
            ])
            .timeout(self.config.timeout())
            .send()
            .await
            .map_err(|e| ProbeError::from_transport(&e))
            .inspect_err(|e| transcript.fail(format!("Error: {e}")))?;

        let status = response.status().as_u16();
        transcript.note(format!("Status: {status}"));
        if status != 200 {
            transcript.fail(format!("HTTP {status}"));
            return Err(ProbeError::Status(status));
        }

        let body = read_body(response)
            .await
            .inspect_err(|e| transcript.fail(format!("Error: {e}")))?;
        let rows = parse_cdx_rows(&body).inspect_err(|e| transcript.fail(format!("Error: {e}")))?;
        transcript.note(format!("Results count: {}", rows.total));

        if !rows.has_results() {
            transcript.warn("No archived URLs found");
            return Err(ProbeError::Empty(empty_reason(rows.total)));
        }

        let mut evidence = Evidence::from_matches(&rows.urls, self.sample_limit);
        evidence.count = rows.total - 1;
        transcript.pass("Wayback working! Sample URLs:");
        transcript.samples(&evidence.samples);
        Ok(evidence)
    }

    fn kind(&self) -> ProbeKind {
        ProbeKind::Archive
    }
}

/// Decoded CDX JSON rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct CdxRows {
    /// Number of top-level rows, header included.
    pub total: usize,
    /// First field of every data row that is a non-empty array of strings.
    pub urls: Vec<String>,
}

impl CdxRows {
    /// More than the header row came back.
    pub fn has_results(&self) -> bool {
        self.total > 1
    }
}

fn empty_reason(total: usize) -> String {
    match total {
        0 => "no rows came back".to_string(),
        _ => "only the header row came back".to_string(),
    }
}

/// Decode a CDX `output=json` body.
///
/// An empty or whitespace-only body is treated as zero rows: the index
/// answers that way when nothing matches. Anything else that is not a JSON
/// array is a shape error.
pub(crate) fn parse_cdx_rows(body: &str) -> Result<CdxRows, ProbeError> {
    if body.trim().is_empty() {
        return Ok(CdxRows::default());
    }

    let value: Value = serde_json::from_str(body)
        .map_err(|e| ProbeError::Shape(format!("invalid JSON: {e}")))?;
    let Value::Array(rows) = value else {
        return Err(ProbeError::Shape("expected a JSON array of rows".into()));
    };

    let urls: Vec<String> = rows
        .iter()
        .skip(1)
        .filter_map(|row| row.as_array()?.first()?.as_str())
        .map(str::to_owned)
        .collect();

    tracing::debug!(rows = rows.len(), urls = urls.len(), "CDX rows parsed");
    Ok(CdxRows {
        total: rows.len(),
        urls,
    })
}
