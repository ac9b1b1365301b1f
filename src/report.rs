//! Summary table, recommendation tier and back-end priority list.
//!
//! Everything here is a pure function of the [`ProbeOutcomeSet`]; the
//! `write_*` functions only format.

use crate::outcome::ProbeOutcomeSet;
use search_probes::ProbeKind;
use std::fmt;
use std::io::{self, Write};

const RULE_WIDTH: usize = 70;

/// Overall health bucket, chosen by how many probes passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Nothing passed.
    Critical,
    /// One or two probes passed.
    Limited,
    /// Three or more probes passed.
    Good,
}

impl Tier {
    pub fn from_passing(passing: usize) -> Self {
        match passing {
            0 => Self::Critical,
            1 | 2 => Self::Limited,
            _ => Self::Good,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Critical => "CRITICAL",
            Self::Limited => "LIMITED",
            Self::Good => "GOOD",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Tiered guidance for the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation {
    pub tier: Tier,
    pub passing: usize,
    pub total: usize,
}

impl Recommendation {
    pub fn from_outcomes(outcomes: &ProbeOutcomeSet) -> Self {
        let passing = outcomes.passing();
        Self {
            tier: Tier::from_passing(passing),
            passing,
            total: outcomes.len(),
        }
    }

    pub fn headline(&self) -> String {
        let (marker, detail) = match self.tier {
            Tier::Critical => ("[!]", "No search methods working!".to_string()),
            Tier::Limited => (
                "[!]",
                format!("Only {}/{} methods working", self.passing, self.total),
            ),
            Tier::Good => ("[✓]", format!("{}/{} methods working!", self.passing, self.total)),
        };
        format!("{marker} {}: {detail}", self.tier)
    }

    /// Guidance lines under the headline, blank strings separate sections.
    pub fn guidance(&self) -> &'static [&'static str] {
        match self.tier {
            Tier::Critical => &[
                "Possible causes:",
                "  1. No internet connection",
                "  2. Firewall/proxy blocking all search engines",
                "  3. Your IP is banned by search engines",
                "",
                "Solutions:",
                "  • Check your internet connection",
                "  • Try from a different network/VPN",
                "  • Use a paid SERP API (guaranteed to work)",
            ],
            Tier::Limited => &[
                "Working methods should be enough, but:",
                "  • Consider adding a paid SERP API key for better results",
                "  • Try VPN if some engines are blocked",
                "  • Wayback Machine is most reliable (no blocking)",
            ],
            Tier::Good => &[
                "Your setup should work. If the dork engine still fails:",
                "  • Make sure it is built against the improved search backend",
                "  • Check how the search backend is wired into the app",
                "  • Run the dork engine's own test suite",
            ],
        }
    }
}

/// One entry of the recommended back-end order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Priority {
    /// Fixed position in the preference order, kept when earlier entries are filtered out.
    pub rank: usize,
    pub kind: ProbeKind,
    pub reason: &'static str,
}

/// Back-ends in fixed preference order, keeping only those whose probe passed.
const PRIORITY_ORDER: [Priority; 3] = [
    Priority {
        rank: 1,
        kind: ProbeKind::Archive,
        reason: "best for historical URLs",
    },
    Priority {
        rank: 2,
        kind: ProbeKind::InstantAnswer,
        reason: "no rate limit",
    },
    Priority {
        rank: 3,
        kind: ProbeKind::HtmlSearch,
        reason: "no captcha usually",
    },
];

/// Which back-ends to use downstream, most preferred first.
pub fn engine_priority(outcomes: &ProbeOutcomeSet) -> Vec<Priority> {
    PRIORITY_ORDER
        .into_iter()
        .filter(|p| outcomes.passed(p.kind))
        .collect()
}

/// Program banner.
pub fn write_banner<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "╔═══════════════════════════════════════════════════════╗")?;
    writeln!(out, "║         Search Engine Diagnostics                     ║")?;
    writeln!(out, "║         Finding why you're getting no results         ║")?;
    writeln!(out, "╚═══════════════════════════════════════════════════════╝")?;
    Ok(())
}

fn write_section<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    let rule = "=".repeat(RULE_WIDTH);
    writeln!(out, "\n{rule}")?;
    writeln!(out, "{title}")?;
    writeln!(out, "{rule}")
}

/// PASS/FAIL table, with the failure reason for failed probes.
pub fn write_summary<W: Write>(outcomes: &ProbeOutcomeSet, out: &mut W) -> io::Result<()> {
    write_section(out, "DIAGNOSTIC SUMMARY")?;
    for result in outcomes.iter() {
        match result.error() {
            None => writeln!(out, "{:20}: ✓ PASS", result.name())?,
            Some(err) => writeln!(out, "{:20}: ✗ FAIL ({err})", result.name())?,
        }
    }
    Ok(())
}

/// Tier headline, guidance and the back-end priority list.
pub fn write_recommendations<W: Write>(outcomes: &ProbeOutcomeSet, out: &mut W) -> io::Result<()> {
    write_section(out, "RECOMMENDATIONS")?;

    let recommendation = Recommendation::from_outcomes(outcomes);
    writeln!(out, "\n{}", recommendation.headline())?;
    writeln!(out)?;
    for line in recommendation.guidance() {
        writeln!(out, "{line}")?;
    }

    writeln!(out, "\n[!] Recommended engine priority:")?;
    for priority in engine_priority(outcomes) {
        writeln!(out, "  {}. {} ({})", priority.rank, priority.kind, priority.reason)?;
    }

    writeln!(out, "\n{}", "=".repeat(RULE_WIDTH))
}

/// Full end-of-run report: summary table then recommendations.
pub fn write_report<W: Write>(outcomes: &ProbeOutcomeSet, out: &mut W) -> io::Result<()> {
    write_summary(outcomes, out)?;
    write_recommendations(outcomes, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::ProbeResult;
    use search_probes::{Evidence, ProbeError};

    fn outcomes_with(passing: &[ProbeKind]) -> ProbeOutcomeSet {
        let mut set = ProbeOutcomeSet::new();
        for kind in ProbeKind::all() {
            let outcome = if passing.contains(kind) {
                Ok(Evidence::default())
            } else {
                Err(ProbeError::Network("connection refused".into()))
            };
            set.record(ProbeResult::new(*kind, outcome)).expect("record");
        }
        set
    }

    fn render(outcomes: &ProbeOutcomeSet) -> String {
        let mut buf = Vec::new();
        write_report(outcomes, &mut buf).expect("write");
        String::from_utf8(buf).expect("utf8")
    }

    #[test]
    fn tier_boundaries() {
        assert_eq!(Tier::from_passing(0), Tier::Critical);
        assert_eq!(Tier::from_passing(1), Tier::Limited);
        assert_eq!(Tier::from_passing(2), Tier::Limited);
        assert_eq!(Tier::from_passing(3), Tier::Good);
        assert_eq!(Tier::from_passing(5), Tier::Good);
    }

    #[test]
    fn recommendation_counts_passing_probes() {
        let set = outcomes_with(&[ProbeKind::Connectivity, ProbeKind::Archive]);
        let rec = Recommendation::from_outcomes(&set);
        assert_eq!(rec.passing, 2);
        assert_eq!(rec.total, 5);
        assert_eq!(rec.tier, Tier::Limited);
        assert_eq!(rec.headline(), "[!] LIMITED: Only 2/5 methods working");
    }

    #[test]
    fn critical_guidance_suggests_paid_fallback() {
        let rec = Recommendation::from_outcomes(&outcomes_with(&[]));
        assert_eq!(rec.tier, Tier::Critical);
        assert!(rec.guidance().iter().any(|l| l.contains("different network")));
        assert!(rec.guidance().iter().any(|l| l.contains("paid SERP API")));
    }

    #[test]
    fn limited_guidance_points_at_archive() {
        let rec = Recommendation::from_outcomes(&outcomes_with(&[ProbeKind::Connectivity]));
        assert!(rec.guidance().iter().any(|l| l.contains("Wayback Machine is most reliable")));
        assert!(rec.guidance().iter().any(|l| l.contains("VPN")));
    }

    #[test]
    fn priority_is_fixed_order_filtered_by_pass() {
        let set = outcomes_with(ProbeKind::all());
        let kinds: Vec<ProbeKind> = engine_priority(&set).iter().map(|p| p.kind).collect();
        assert_eq!(
            kinds,
            vec![ProbeKind::Archive, ProbeKind::InstantAnswer, ProbeKind::HtmlSearch]
        );

        let set = outcomes_with(&[ProbeKind::HtmlSearch, ProbeKind::InstantAnswer]);
        let kinds: Vec<ProbeKind> = engine_priority(&set).iter().map(|p| p.kind).collect();
        assert_eq!(kinds, vec![ProbeKind::InstantAnswer, ProbeKind::HtmlSearch]);
    }

    #[test]
    fn priority_ignores_connectivity_and_compound() {
        let set = outcomes_with(&[ProbeKind::Connectivity, ProbeKind::CompoundQuery]);
        assert!(engine_priority(&set).is_empty());
    }

    #[test]
    fn summary_lists_every_probe_in_order() {
        let text = render(&outcomes_with(&[ProbeKind::Archive]));
        let internet = text.find("Internet").expect("Internet row");
        let wayback = text.find("Wayback Machine    ").expect("Wayback row");
        let dork = text.find("Actual Dork").expect("Actual Dork row");
        assert!(internet < wayback && wayback < dork);
        assert!(text.contains("Wayback Machine     : ✓ PASS"));
        assert!(text.contains("Internet            : ✗ FAIL (request failed: connection refused)"));
    }

    #[test]
    fn report_keeps_fixed_priority_ranks() {
        let text = render(&outcomes_with(&[ProbeKind::InstantAnswer, ProbeKind::HtmlSearch]));
        assert!(text.contains("  2. DuckDuckGo API (no rate limit)"));
        assert!(text.contains("  3. Brave Search (no captcha usually)"));
        assert!(!text.contains("  1. "));
        assert!(text.contains("[!] LIMITED: Only 2/5 methods working"));

        let text = render(&outcomes_with(&[ProbeKind::InstantAnswer]));
        let line = text
            .lines()
            .find(|l| l.contains("DuckDuckGo API (no rate limit)"))
            .expect("priority line");
        assert_eq!(line, "  2. DuckDuckGo API (no rate limit)");
    }

    #[test]
    fn headline_uses_tier_label() {
        for passing in [&[][..], &[ProbeKind::Archive][..], ProbeKind::all()] {
            let rec = Recommendation::from_outcomes(&outcomes_with(passing));
            assert!(rec.headline().contains(&format!(" {}: ", rec.tier)));
        }
        assert_eq!(
            Recommendation::from_outcomes(&outcomes_with(ProbeKind::all())).headline(),
            "[✓] GOOD: 5/5 methods working!"
        );
        assert_eq!(
            Recommendation::from_outcomes(&outcomes_with(&[])).headline(),
            "[!] CRITICAL: No search methods working!"
        );
    }

    #[test]
    fn banner_mentions_diagnostics() {
        let mut buf = Vec::new();
        write_banner(&mut buf).expect("write");
        let text = String::from_utf8(buf).expect("utf8");
        assert!(text.contains("Search Engine Diagnostics"));
    }
}
