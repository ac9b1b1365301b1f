//! DuckDuckGo Instant Answer API — JSON, no key, sparse results.
//!
//! The API only has answers for a small set of queries, so an empty
//! `RelatedTopics` list is an expected outcome rather than breakage.

use crate::config::InstantAnswerConfig;
use crate::error::ProbeError;
use crate::probe::{read_body, Probe};
use crate::types::{Evidence, ProbeKind, Transcript};
use serde::Deserialize;
use serde_json::Value;

/// Instant-answer API probe.
///
/// Passes when `RelatedTopics` holds at least one object with a `FirstURL`.
pub struct InstantAnswerProbe {
    config: InstantAnswerConfig,
    sample_limit: usize,
}

impl InstantAnswerProbe {
    pub fn new(config: InstantAnswerConfig) -> Self {
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

impl Probe for InstantAnswerProbe {
    async fn run(
        &self,
        client: &reqwest::Client,
        transcript: &mut Transcript,
    ) -> Result<Evidence, ProbeError> {
        tracing::trace!(query = %self.config.query, "instant-answer probe");

        let response = client
            .get(&self.config.endpoint)
            .query(&[("q", self.config.query.as_str()), ("format", "json")])
            .timeout(self.config.timeout())
            .send()
            .await
            .map_err(|e| ProbeError::from_transport(&e))
            .inspect_err(|e| transcript.fail(format!("Error: {e}")))?;

        let status = response.status().as_u16();
        transcript.note(format!("Status: {status}"));
        if status != 200 {
            transcript.fail(format!("API returned HTTP {status}"));
            return Err(ProbeError::Status(status));
        }

        let body = read_body(response)
            .await
            .inspect_err(|e| transcript.fail(format!("Error: {e}")))?;
        let answer =
            parse_instant_answer(&body).inspect_err(|e| transcript.fail(format!("Error: {e}")))?;

        transcript.note(format!("Response keys: {}", answer.keys.join(", ")));
        transcript.note(format!("RelatedTopics count: {}", answer.topic_count));

        if answer.first_urls.is_empty() {
            transcript.warn("API responded but no results");
            transcript.warn("This is normal - DDG API has limited results");
            return Err(ProbeError::Empty(format!(
                "{} related topics, none with a URL",
                answer.topic_count
            )));
        }

        let evidence = Evidence::from_matches(&answer.first_urls, self.sample_limit);
        transcript.pass("API working! Sample result:");
        transcript.samples(&evidence.samples);
        Ok(evidence)
    }

    fn kind(&self) -> ProbeKind {
        ProbeKind::InstantAnswer
    }
}

/// The parts of an instant-answer response the probes look at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct InstantAnswer {
    /// Top-level keys present in the response object.
    pub keys: Vec<String>,
    /// Length of `RelatedTopics` (0 when absent).
    pub topic_count: usize,
    /// `FirstURL` of every topic object that has one, in order.
    pub first_urls: Vec<String>,
}

#[derive(Deserialize)]
struct RelatedTopicsField {
    #[serde(rename = "RelatedTopics", default)]
    related_topics: Vec<Value>,
}

/// Decode an instant-answer JSON body.
///
/// A missing `RelatedTopics` decodes as an empty list; a body that is not a
/// JSON object, or a `RelatedTopics` that is not an array, is a shape error.
pub(crate) fn parse_instant_answer(body: &str) -> Result<InstantAnswer, ProbeError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| ProbeError::Shape(format!("invalid JSON: {e}")))?;

    let keys = match &value {
        Value::Object(map) => map.keys().cloned().collect(),
        _ => return Err(ProbeError::Shape("expected a JSON object".into())),
    };

    let field: RelatedTopicsField = serde_json::from_value(value)
        .map_err(|e| ProbeError::Shape(format!("RelatedTopics: {e}")))?;

    let first_urls: Vec<String> = field
        .related_topics
        .iter()
        .filter_map(|topic| topic.as_object()?.get("FirstURL")?.as_str())
        .map(str::to_owned)
        .collect();

    tracing::debug!(
        topics = field.related_topics.len(),
        urls = first_urls.len(),
        "instant answer parsed"
    );

    Ok(InstantAnswer {
        keys,
        topic_count: field.related_topics.len(),
        first_urls,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOCK_RESPONSE: &str = r#"{
        "Abstract": "",
        "Heading": "",
        "RelatedTopics": [
            {"FirstURL": "https://duckduckgo.com/PHP", "Text": "PHP - a scripting language"},
            {"Name": "Frameworks", "Topics": [{"FirstURL": "https://duckduckgo.com/Laravel"}]},
            {"FirstURL": "https://duckduckgo.com/Composer", "Text": "Composer"},
            {"FirstURL": "https://duckduckgo.com/PEAR", "Text": "PEAR"},
            {"FirstURL": "https://duckduckgo.com/Zend", "Text": "Zend"}
        ]
    }"#;

    #[test]
    fn parse_collects_first_urls_in_order() {
        let answer = parse_instant_answer(MOCK_RESPONSE).expect("should parse");
        assert_eq!(answer.topic_count, 5);
        assert_eq!(answer.first_urls.len(), 4);
        assert_eq!(answer.first_urls[0], "https://duckduckgo.com/PHP");
        assert_eq!(answer.first_urls[1], "https://duckduckgo.com/Composer");
        assert!(answer.keys.contains(&"RelatedTopics".to_string()));
    }

    #[test]
    fn missing_related_topics_is_empty_not_error() {
        let answer = parse_instant_answer(r#"{"Abstract": "x"}"#).expect("should parse");
        assert_eq!(answer.topic_count, 0);
        assert!(answer.first_urls.is_empty());
        assert_eq!(answer.keys, vec!["Abstract".to_string()]);
    }

    #[test]
    fn topics_without_first_url_yield_no_urls() {
        let answer = parse_instant_answer(r#"{"RelatedTopics": [{"Text": "a"}, "b", 3]}"#)
            .expect("should parse");
        assert_eq!(answer.topic_count, 3);
        assert!(answer.first_urls.is_empty());
    }

    #[test]
    fn malformed_json_is_shape_error() {
        let err = parse_instant_answer("<html>rate limited</html>").unwrap_err();
        assert!(matches!(err, ProbeError::Shape(_)));
    }

    #[test]
    fn non_object_body_is_shape_error() {
        let err = parse_instant_answer("[1, 2]").unwrap_err();
        assert!(matches!(err, ProbeError::Shape(_)));
    }

    #[test]
    fn related_topics_wrong_type_is_shape_error() {
        let err = parse_instant_answer(r#"{"RelatedTopics": "none"}"#).unwrap_err();
        assert!(matches!(err, ProbeError::Shape(_)));
    }

    #[test]
    fn kind_is_instant_answer() {
        let probe = InstantAnswerProbe::new(InstantAnswerConfig::default());
        assert_eq!(probe.kind(), ProbeKind::InstantAnswer);
    }

    #[tokio::test]
    #[ignore] // Live test — run with `cargo test -- --ignored`
    async fn live_instant_answer() {
        let probe = InstantAnswerProbe::new(InstantAnswerConfig::default());
        let client = crate::http::build_client().expect("client");
        let mut transcript = Transcript::default();
        let evidence = probe.run(&client, &mut transcript).await.expect("API answers");
        assert!(!evidence.samples.is_empty());
    }
}
