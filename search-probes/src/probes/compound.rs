//! A realistic SQL-injection dork run against the instant-answer and
//! archive services, one after the other.
//!
//! Only the archive sub-query decides the outcome: it passes when the index
//! returns at least one URL carrying an `id=` query parameter. The
//! instant-answer sub-query is informational; its result count is reported
//! and nothing else.

use crate::config::CompoundQueryConfig;
use crate::error::ProbeError;
use crate::probe::{read_body, Probe};
use crate::probes::archive::parse_cdx_rows;
use crate::probes::instant_answer::parse_instant_answer;
use crate::types::{Evidence, ProbeKind, Transcript};

/// Sub-queries, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubQuery {
    InstantAnswer,
    Wayback,
}

impl SubQuery {
    pub const ORDER: [SubQuery; 2] = [SubQuery::InstantAnswer, SubQuery::Wayback];

    pub fn name(&self) -> &'static str {
        match self {
            Self::InstantAnswer => "DuckDuckGo API",
            Self::Wayback => "Wayback",
        }
    }
}

/// Compound dork probe.
pub struct CompoundQueryProbe {
    config: CompoundQueryConfig,
    sample_limit: usize,
}

impl CompoundQueryProbe {
    pub fn new(config: CompoundQueryConfig) -> Self {
        Self {
            config,
            sample_limit: crate::config::DEFAULT_SAMPLE_LIMIT,
        }
    }

    pub fn with_sample_limit(mut self, limit: usize) -> Self {
        self.sample_limit = limit;
        self
    }

    /// Number of related topics the instant-answer service has for the dork.
    async fn instant_answer_count(&self, client: &reqwest::Client) -> Result<usize, ProbeError> {
        let response = client
            .get(&self.config.instant_answer_endpoint)
            .query(&[
                ("q", self.config.instant_answer_query.as_str()),
                ("format", "json"),
            ])
            .timeout(self.config.timeout())
            .send()
            .await
            .map_err(|e| ProbeError::from_transport(&e))?;

        let status = response.status().as_u16();
        if status != 200 {
            return Err(ProbeError::Status(status));
        }

        let body = read_body(response).await?;
        Ok(parse_instant_answer(&body)?.topic_count)
    }

    /// Archived URLs matching the dork pattern, plus the row count.
    async fn archived_urls(
        &self,
        client: &reqwest::Client,
    ) -> Result<(usize, Vec<String>), ProbeError> {
        let limit = self.config.archive_limit.to_string();
        let response = client
            .get(&self.config.archive_endpoint)
            .query(&[
                ("url", self.config.archive_url_pattern.as_str()),
                ("matchType", self.config.archive_match_type.as_str()),
                ("output", "json"),
                ("fl", "original"),
                ("limit", limit.as_str()),
            ])
            .timeout(self.config.timeout())
            .send()
            .await
            .map_err(|e| ProbeError::from_transport(&e))?;

        let status = response.status().as_u16();
        if status != 200 {
            return Err(ProbeError::Status(status));
        }

        let body = read_body(response).await?;
        let rows = parse_cdx_rows(&body)?;
        Ok((rows.total.saturating_sub(1), rows.urls))
    }
}

impl Probe for CompoundQueryProbe {
    async fn run(
        &self,
        client: &reqwest::Client,
        transcript: &mut Transcript,
    ) -> Result<Evidence, ProbeError> {
        let mut archive_error = None;

        for sub in SubQuery::ORDER {
            transcript.note(format!("Testing {}...", sub.name()));
            tracing::trace!(sub_query = sub.name(), "compound probe sub-query");

            match sub {
                SubQuery::InstantAnswer => match self.instant_answer_count(client).await {
                    Ok(count) => transcript.note(format!("  Results: {count}")),
                    Err(err) => transcript.note(format!("  {err}")),
                },
                SubQuery::Wayback => match self.archived_urls(client).await {
                    Ok((archived, urls)) => {
                        transcript.note(format!("  Archived URLs: {archived}"));
                        let with_params = parameterized_urls(&urls);
                        if !with_params.is_empty() {
                            let evidence = Evidence::from_matches(&with_params, self.sample_limit);
                            transcript.pass(format!(
                                "Found {} URLs with id parameter!",
                                with_params.len()
                            ));
                            transcript.samples(&evidence.samples);
                            return Ok(evidence);
                        }
                    }
                    Err(err) => {
                        transcript.note(format!("  {err}"));
                        archive_error = Some(err);
                    }
                },
            }
        }

        Err(archive_error
            .unwrap_or_else(|| ProbeError::Empty("no archived URLs with an id= parameter".into())))
    }

    fn kind(&self) -> ProbeKind {
        ProbeKind::CompoundQuery
    }
}

/// URLs that carry a query string with an `id=` parameter.
pub(crate) fn parameterized_urls(urls: &[String]) -> Vec<String> {
    urls.iter()
        .filter(|url| url.contains('?') && url.contains("id="))
        .cloned()
        .collect()
}
