//! Basic internet connectivity: can we get any HTTP answer from well-known hosts?

use crate::config::ConnectivityConfig;
use crate::error::ProbeError;
use crate::probe::Probe;
use crate::types::{Evidence, ProbeKind, Transcript};

/// Plain GET against each configured host, in order.
///
/// Any HTTP status counts as reachable. The first unreachable host ends
/// the probe; hosts after it are not contacted.
pub struct ConnectivityProbe {
    config: ConnectivityConfig,
}

impl ConnectivityProbe {
    pub fn new(config: ConnectivityConfig) -> Self {
        Self { config }
    }
}

impl Probe for ConnectivityProbe {
    async fn run(
        &self,
        client: &reqwest::Client,
        transcript: &mut Transcript,
    ) -> Result<Evidence, ProbeError> {
        let mut reached = Vec::with_capacity(self.config.urls.len());

        for url in &self.config.urls {
            tracing::trace!(%url, "connectivity check");
            match client.get(url).timeout(self.config.timeout()).send().await {
                Ok(response) => {
                    let status = response.status().as_u16();
                    transcript.pass(format!("{url}: HTTP {status}"));
                    reached.push(url.clone());
                }
                Err(err) => {
                    let reason = ProbeError::from_transport(&err).to_string();
                    transcript.fail(format!("{url}: ERROR - {reason}"));
                    return Err(ProbeError::Unreachable {
                        url: url.clone(),
                        reason,
                    });
                }
            }
        }

        tracing::debug!(count = reached.len(), "all connectivity targets reached");
        Ok(Evidence {
            count: reached.len(),
            samples: reached,
        })
    }

    fn kind(&self) -> ProbeKind {
        ProbeKind::Connectivity
    }
}
