//! Runs every probe once, in a fixed order, and collects the outcomes.
//!
//! A failing probe never stops the run: its error is recorded as a failed
//! result and the next probe starts. Only writing the progress output can
//! abort a run.

use crate::config::DoctorConfig;
use crate::error::Result;
use crate::outcome::{ProbeOutcomeSet, ProbeResult};
use search_probes::probes::{
    ArchiveProbe, CompoundQueryProbe, ConnectivityProbe, HtmlSearchProbe, InstantAnswerProbe,
};
use search_probes::{Probe, Transcript};
use std::io::Write;

/// Drives the five probes sequentially against one shared HTTP client.
pub struct DiagnosticRunner {
    config: DoctorConfig,
    client: reqwest::Client,
}

impl DiagnosticRunner {
    /// Validate `config` and build the HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DoctorError::Config`] if the configuration is invalid
    /// or the client cannot be built.
    pub fn new(config: DoctorConfig) -> Result<Self> {
        config.validate()?;
        let client = search_probes::http::build_client()?;
        Ok(Self { config, client })
    }

    /// Run all probes in order, writing progress to `out`.
    ///
    /// # Errors
    ///
    /// Returns an error only if writing to `out` fails.
    pub async fn run<W: Write + Send>(&self, out: &mut W) -> Result<ProbeOutcomeSet> {
        let probes = &self.config.probes;
        let limit = self.config.sample_limit;
        let mut outcomes = ProbeOutcomeSet::new();

        let connectivity = ConnectivityProbe::new(probes.connectivity.clone());
        self.step(&mut outcomes, 1, &connectivity, out).await?;

        let instant_answer =
            InstantAnswerProbe::new(probes.instant_answer.clone()).with_sample_limit(limit);
        self.step(&mut outcomes, 2, &instant_answer, out).await?;

        let html_search = HtmlSearchProbe::new(probes.html_search.clone()).with_sample_limit(limit);
        self.step(&mut outcomes, 3, &html_search, out).await?;

        let archive = ArchiveProbe::new(probes.archive.clone()).with_sample_limit(limit);
        self.step(&mut outcomes, 4, &archive, out).await?;

        let compound = CompoundQueryProbe::new(probes.compound.clone()).with_sample_limit(limit);
        self.step(&mut outcomes, 5, &compound, out).await?;

        tracing::debug!(
            passing = outcomes.passing(),
            total = outcomes.len(),
            "diagnostic run finished"
        );
        Ok(outcomes)
    }

    async fn step<P: Probe, W: Write + Send>(
        &self,
        outcomes: &mut ProbeOutcomeSet,
        index: usize,
        probe: &P,
        out: &mut W,
    ) -> Result<()> {
        let kind = probe.kind();
        writeln!(out, "\n[{index}] Testing {}...", kind.description())?;
        out.flush()?;

        let mut transcript = Transcript::default();
        let outcome = probe.run(&self.client, &mut transcript).await;

        for line in transcript.lines() {
            writeln!(out, "  {line}")?;
        }

        match &outcome {
            Ok(evidence) => tracing::info!(probe = %kind, count = evidence.count, "probe passed"),
            Err(err) if err.is_informational() => {
                tracing::info!(probe = %kind, reason = %err, "probe found nothing")
            }
            Err(err) => tracing::warn!(probe = %kind, error = %err, "probe failed"),
        }

        outcomes.record(ProbeResult::new(kind, outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_config_rejected() {
        let mut config = DoctorConfig::default();
        config.probes.connectivity.urls.clear();
        let result = DiagnosticRunner::new(config);
        assert!(result.is_err());
    }

    #[test]
    fn default_config_builds_runner() {
        assert!(DiagnosticRunner::new(DoctorConfig::default()).is_ok());
    }
}
