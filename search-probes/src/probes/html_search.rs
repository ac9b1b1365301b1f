//! Brave Search HTML results page — independent index, occasional CAPTCHA.
//!
//! Success is judged loosely: any outbound link on the results page means
//! real results were rendered. A page with only Brave's own links is either
//! empty or a bot-detection wall, and the body is checked for `captcha` to
//! tell the two apart.

use crate::config::HtmlSearchConfig;
use crate::error::ProbeError;
use crate::http;
use crate::probe::{read_body, Probe};
use crate::types::{Evidence, ProbeKind, Transcript};
use scraper::{Html, Selector};

/// HTML search-page probe.
pub struct HtmlSearchProbe {
    config: HtmlSearchConfig,
    sample_limit: usize,
}

impl HtmlSearchProbe {
    pub fn new(config: HtmlSearchConfig) -> Self {
        Self {
            config,
            sample_limit: crate::config::DEFAULT_SAMPLE_LIMIT,
        }
    }

    pub fn with_sample_limit(mut self, limit: usize) -> Self {
        self.sample_limit = limit;
        self
    }

    fn user_agent(&self) -> &str {
        match self.config.user_agent {
            Some(ref custom) => custom.as_str(),
            None => http::random_user_agent(),
        }
    }
}

impl Probe for HtmlSearchProbe {
    async fn run(
        &self,
        client: &reqwest::Client,
        transcript: &mut Transcript,
    ) -> Result<Evidence, ProbeError> {
        tracing::trace!(query = %self.config.query, "HTML search probe");

        let response = client
            .get(&self.config.endpoint)
            .query(&[("q", self.config.query.as_str())])
            .header(reqwest::header::USER_AGENT, self.user_agent())
            .header("Accept", "text/html,application/xhtml+xml")
            .header("Accept-Language", "en-US,en;q=0.9")
            .timeout(self.config.timeout())
            .send()
            .await
            .map_err(|e| ProbeError::from_transport(&e))
            .inspect_err(|e| transcript.fail(format!("Error: {e}")))?;

        let status = response.status().as_u16();
        transcript.note(format!("Status: {status}"));

        if status != 200 {
            transcript.fail(format!("HTTP {status}"));
            // An unreadable error page still fails on its status.
            let html = read_body(response).await.unwrap_or_default();
            if mentions_captcha(&html) {
                transcript.warn("CAPTCHA detected in response");
                return Err(ProbeError::Captcha);
            }
            return Err(ProbeError::Status(status));
        }

        let html = read_body(response)
            .await
            .inspect_err(|e| transcript.fail(format!("Error: {e}")))?;
        tracing::trace!(bytes = html.len(), "HTML search response received");

        let links = parse_links(&html, &self.config.own_domain)
            .inspect_err(|e| transcript.fail(format!("Error: {e}")))?;
        transcript.note(format!("Total links found: {}", links.total));
        transcript.note(format!("External links: {}", links.external.len()));

        if links.external.is_empty() {
            transcript.warn("No external links found");
            transcript.warn("Brave might be showing CAPTCHA or blocking");
            if mentions_captcha(&html) {
                transcript.warn("CAPTCHA detected in response");
                return Err(ProbeError::Captcha);
            }
            return Err(ProbeError::Empty(format!(
                "{} links on page, none external",
                links.total
            )));
        }

        let evidence = Evidence::from_matches(&links.external, self.sample_limit);
        transcript.pass("Found some links! Sample:");
        transcript.samples(&evidence.samples);
        Ok(evidence)
    }

    fn kind(&self) -> ProbeKind {
        ProbeKind::HtmlSearch
    }
}

/// Anchors found on a results page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct PageLinks {
    /// Every `a[href]` on the page.
    pub total: usize,
    /// Absolute links that do not point back at the search engine, in page order.
    pub external: Vec<String>,
}

/// Collect anchors from a results page, keeping absolute links that do not
/// contain `own_domain`.
///
/// Extracted as a separate function for testability with mock HTML.
pub(crate) fn parse_links(html: &str, own_domain: &str) -> Result<PageLinks, ProbeError> {
    let document = Html::parse_document(html);
    let anchor_sel = Selector::parse("a[href]")
        .map_err(|e| ProbeError::Shape(format!("invalid anchor selector: {e:?}")))?;

    let mut total = 0;
    let mut external = Vec::new();

    for anchor in document.select(&anchor_sel) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        total += 1;
        if href.starts_with("http") && !href.contains(own_domain) {
            external.push(href.to_string());
        }
    }

    tracing::debug!(total, external = external.len(), "results page links parsed");
    Ok(PageLinks { total, external })
}

/// Case-insensitive check for a CAPTCHA marker anywhere in the body.
pub(crate) fn mentions_captcha(body: &str) -> bool {
    body.to_lowercase().contains("captcha")
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOCK_RESULTS_HTML: &str = r#"<!DOCTYPE html>
<html>
<body>
<nav>
    <a href="/settings">Settings</a>
    <a href="https://search.brave.com/images?q=site%3Agithub.com">Images</a>
    <a href="https://brave.com/download">Get Brave</a>
</nav>
<div id="results">
    <div class="snippet"><a href="https://github.com/rust-lang/rust">rust-lang/rust</a></div>
    <div class="snippet"><a href="https://github.com/tokio-rs/tokio">tokio-rs/tokio</a></div>
    <div class="snippet"><a href="https://github.com/serde-rs/serde">serde-rs/serde</a></div>
    <div class="snippet"><a href="https://github.com/hyperium/hyper">hyperium/hyper</a></div>
    <a name="no-href">anchor without href</a>
</div>
</body>
</html>"#;

    const MOCK_CAPTCHA_HTML: &str = r#"<html><head><title>Brave Search</title></head>
<body>
<div class="challenge">Please complete the hCaptcha below to continue.</div>
<a href="https://search.brave.com/help">Help</a>
</body></html>"#;

    #[test]
    fn parse_keeps_only_external_links() {
        let links = parse_links(MOCK_RESULTS_HTML, "brave.com").expect("should parse");
        assert_eq!(links.total, 7);
        assert_eq!(links.external.len(), 4);
        assert_eq!(links.external[0], "https://github.com/rust-lang/rust");
        assert!(links.external.iter().all(|l| !l.contains("brave.com")));
    }

    #[test]
    fn relative_links_are_not_external() {
        let links = parse_links(r#"<a href="/about">About</a>"#, "brave.com").expect("parse");
        assert_eq!(links.total, 1);
        assert!(links.external.is_empty());
    }

    #[test]
    fn captcha_page_has_no_external_links() {
        let links = parse_links(MOCK_CAPTCHA_HTML, "brave.com").expect("should parse");
        assert!(links.external.is_empty());
        assert!(mentions_captcha(MOCK_CAPTCHA_HTML));
    }

    #[test]
    fn captcha_detection_is_case_insensitive() {
        assert!(mentions_captcha("Solve this CAPTCHA"));
        assert!(mentions_captcha("g-recaptcha"));
        assert!(!mentions_captcha("<html><body>no results</body></html>"));
    }

    #[test]
    fn empty_html_returns_no_links() {
        let links = parse_links("<html><body></body></html>", "brave.com").expect("parse");
        assert_eq!(links, PageLinks::default());
    }

    #[test]
    fn configured_user_agent_wins() {
        let probe = HtmlSearchProbe::new(HtmlSearchConfig {
            user_agent: Some("CustomBot/1.0".into()),
            ..Default::default()
        });
        assert_eq!(probe.user_agent(), "CustomBot/1.0");
    }

    #[test]
    fn default_user_agent_is_a_browser() {
        let probe = HtmlSearchProbe::new(HtmlSearchConfig::default());
        assert!(probe.user_agent().starts_with("Mozilla/5.0"));
    }

    #[test]
    fn kind_is_html_search() {
        let probe = HtmlSearchProbe::new(HtmlSearchConfig::default());
        assert_eq!(probe.kind(), ProbeKind::HtmlSearch);
    }
}
