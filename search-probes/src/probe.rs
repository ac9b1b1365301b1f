//! Trait definition for the endpoint probes.
//!
//! Each probe (connectivity, instant-answer, HTML search, archive, compound
//! dork) implements [`Probe`] so the runner can drive them uniformly.

use crate::error::ProbeError;
use crate::types::{Evidence, ProbeKind, Transcript};

/// A single reachability/shape check against an external service.
///
/// Implementors own their configuration record and handle their own:
///
/// - request construction (query parameters, headers, timeout)
/// - response decoding and the success decision
/// - conversion of every failure into a [`ProbeError`]
///
/// `run` must never panic on bad input from the network; all
/// implementations must be `Send + Sync`.
pub trait Probe: Send + Sync {
    /// Run the probe once, writing progress lines to `transcript`.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError`] describing why the probe did not pass.
    fn run(
        &self,
        client: &reqwest::Client,
        transcript: &mut Transcript,
    ) -> impl std::future::Future<Output = Result<Evidence, ProbeError>> + Send;

    /// Which [`ProbeKind`] this implementation represents.
    fn kind(&self) -> ProbeKind;
}

/// Read a response body, mapping read failures to [`ProbeError::Network`].
pub(crate) async fn read_body(response: reqwest::Response) -> Result<String, ProbeError> {
    response
        .text()
        .await
        .map_err(|e| ProbeError::from_transport(&e))
}
