//! Probe results collected over one diagnostic run.

use crate::error::{DoctorError, Result};
use search_probes::{Evidence, ProbeError, ProbeKind};

/// The outcome of one probe, labelled by the probe it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    kind: ProbeKind,
    outcome: std::result::Result<Evidence, ProbeError>,
}

impl ProbeResult {
    pub fn new(kind: ProbeKind, outcome: std::result::Result<Evidence, ProbeError>) -> Self {
        Self { kind, outcome }
    }

    pub fn kind(&self) -> ProbeKind {
        self.kind
    }

    /// Summary-table label, e.g. `Wayback Machine`.
    pub fn name(&self) -> &'static str {
        self.kind.label()
    }

    pub fn passed(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn evidence(&self) -> Option<&Evidence> {
        self.outcome.as_ref().ok()
    }

    pub fn error(&self) -> Option<&ProbeError> {
        self.outcome.as_ref().err()
    }
}

/// Results in execution order, at most one per [`ProbeKind`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeOutcomeSet {
    results: Vec<ProbeResult>,
}

impl ProbeOutcomeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a result.
    ///
    /// # Errors
    ///
    /// Returns [`DoctorError::DuplicateProbe`] if this probe already has a result.
    pub fn record(&mut self, result: ProbeResult) -> Result<()> {
        if self.get(result.kind()).is_some() {
            return Err(DoctorError::DuplicateProbe(result.kind()));
        }
        self.results.push(result);
        Ok(())
    }

    pub fn get(&self, kind: ProbeKind) -> Option<&ProbeResult> {
        self.results.iter().find(|r| r.kind() == kind)
    }

    /// Whether `kind` ran and passed. A probe that never ran has not passed.
    pub fn passed(&self, kind: ProbeKind) -> bool {
        self.get(kind).is_some_and(ProbeResult::passed)
    }

    /// Number of passing probes.
    pub fn passing(&self) -> usize {
        self.results.iter().filter(|r| r.passed()).count()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Every known probe has exactly one result.
    pub fn is_complete(&self) -> bool {
        ProbeKind::all().iter().all(|kind| self.get(*kind).is_some())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProbeResult> {
        self.results.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pass(kind: ProbeKind) -> ProbeResult {
        ProbeResult::new(
            kind,
            Ok(Evidence {
                count: 1,
                samples: vec!["https://example.com".into()],
            }),
        )
    }

    fn fail(kind: ProbeKind) -> ProbeResult {
        ProbeResult::new(kind, Err(ProbeError::Status(503)))
    }

    #[test]
    fn result_accessors() {
        let ok = pass(ProbeKind::Archive);
        assert!(ok.passed());
        assert_eq!(ok.name(), "Wayback Machine");
        assert_eq!(ok.evidence().map(|e| e.count), Some(1));
        assert!(ok.error().is_none());

        let bad = fail(ProbeKind::HtmlSearch);
        assert!(!bad.passed());
        assert_eq!(bad.error(), Some(&ProbeError::Status(503)));
        assert!(bad.evidence().is_none());
    }

    #[test]
    fn keeps_insertion_order() {
        let mut set = ProbeOutcomeSet::new();
        set.record(pass(ProbeKind::Connectivity)).expect("record");
        set.record(fail(ProbeKind::InstantAnswer)).expect("record");
        set.record(pass(ProbeKind::Archive)).expect("record");

        let kinds: Vec<ProbeKind> = set.iter().map(ProbeResult::kind).collect();
        assert_eq!(
            kinds,
            vec![
                ProbeKind::Connectivity,
                ProbeKind::InstantAnswer,
                ProbeKind::Archive
            ]
        );
        assert_eq!(set.passing(), 2);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn duplicate_probe_rejected() {
        let mut set = ProbeOutcomeSet::new();
        set.record(pass(ProbeKind::Archive)).expect("record");
        let err = set.record(fail(ProbeKind::Archive)).unwrap_err();
        assert!(matches!(err, DoctorError::DuplicateProbe(ProbeKind::Archive)));
        assert_eq!(set.len(), 1);
        assert!(set.passed(ProbeKind::Archive));
    }

    #[test]
    fn missing_probe_has_not_passed() {
        let set = ProbeOutcomeSet::new();
        assert!(set.is_empty());
        assert!(!set.passed(ProbeKind::Connectivity));
        assert!(!set.is_complete());
    }

    #[test]
    fn complete_after_all_probes() {
        let mut set = ProbeOutcomeSet::new();
        for kind in ProbeKind::all() {
            set.record(fail(*kind)).expect("record");
        }
        assert!(set.is_complete());
        assert_eq!(set.passing(), 0);
    }
}
