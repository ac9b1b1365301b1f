//! Core types for probe identification, success evidence and progress output.

use std::fmt;

/// The probes a diagnostic run knows about, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeKind {
    /// Plain GETs against well-known hosts.
    Connectivity,
    /// DuckDuckGo Instant Answer JSON API.
    InstantAnswer,
    /// Brave Search HTML results page.
    HtmlSearch,
    /// Wayback Machine CDX index.
    Archive,
    /// A realistic dork against the instant-answer and archive services.
    CompoundQuery,
}

impl ProbeKind {
    /// Label used in the summary table.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Connectivity => "Internet",
            Self::InstantAnswer => "DuckDuckGo API",
            Self::HtmlSearch => "Brave Search",
            Self::Archive => "Wayback Machine",
            Self::CompoundQuery => "Actual Dork",
        }
    }

    /// What the probe exercises, for the progress header.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Connectivity => "basic internet connectivity",
            Self::InstantAnswer => "DuckDuckGo API",
            Self::HtmlSearch => "Brave Search",
            Self::Archive => "Wayback Machine CDX API",
            Self::CompoundQuery => "with actual SQL injection dork",
        }
    }

    /// All probes in execution order.
    pub fn all() -> &'static [ProbeKind] {
        &[
            Self::Connectivity,
            Self::InstantAnswer,
            Self::HtmlSearch,
            Self::Archive,
            Self::CompoundQuery,
        ]
    }
}

impl fmt::Display for ProbeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What a passing probe found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Evidence {
    /// Number of matching items (reached hosts, topics with URLs, links, archived rows).
    pub count: usize,
    /// Up to the configured sample limit of matching URLs.
    pub samples: Vec<String>,
}

impl Evidence {
    /// Build evidence from all matches, keeping the first `limit` as samples.
    pub fn from_matches(matches: &[String], limit: usize) -> Self {
        Self {
            count: matches.len(),
            samples: matches.iter().take(limit).cloned().collect(),
        }
    }
}

/// Human-readable progress lines produced while a probe runs.
///
/// Probes write here instead of stdout so the runner decides where the
/// lines go and tests can inspect them.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    lines: Vec<String>,
}

impl Transcript {
    /// Plain detail line.
    pub fn note(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Success marker line.
    pub fn pass(&mut self, line: impl AsRef<str>) {
        self.lines.push(format!("[✓] {}", line.as_ref()));
    }

    /// Warning marker line.
    pub fn warn(&mut self, line: impl AsRef<str>) {
        self.lines.push(format!("[!] {}", line.as_ref()));
    }

    /// Failure marker line.
    pub fn fail(&mut self, line: impl AsRef<str>) {
        self.lines.push(format!("[✗] {}", line.as_ref()));
    }

    /// Indented sample URL lines.
    pub fn samples(&mut self, urls: &[String]) {
        for url in urls {
            self.lines.push(format!("  - {url}"));
        }
    }

    /// All lines in the order they were written.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Whether any line contains `needle`. Used by integration tests.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|line| line.contains(needle))
    }
}
