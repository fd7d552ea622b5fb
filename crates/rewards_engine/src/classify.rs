use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use rewards_logging::{rewards_debug, rewards_info, rewards_warn};
use serde::{Deserialize, Serialize};

use crate::{ClassifyError, FailureKind, LinkReview};

/// Payouts the service is asked to choose from, in rupees.
pub const REWARD_TIERS: [u32; 3] = [2, 5, 10];

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Clone)]
pub struct ClassifierSettings {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-3-flash-preview".to_string(),
            api_key: None,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[async_trait::async_trait]
pub trait Classifier: Send + Sync {
    /// Makes exactly one attempt to title and price `url`.
    async fn classify(&self, url: &str) -> Result<LinkReview, ClassifyError>;
}

/// Classifier backed by the Gemini `generateContent` endpoint.
#[derive(Debug, Clone)]
pub struct GeminiClassifier {
    settings: ClassifierSettings,
}

impl GeminiClassifier {
    pub fn new(settings: ClassifierSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, ClassifyError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| ClassifyError::new(FailureKind::Network, err.to_string()))
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.settings.base_url.trim_end_matches('/'),
            self.settings.model
        )
    }
}

#[async_trait::async_trait]
impl Classifier for GeminiClassifier {
    async fn classify(&self, url: &str) -> Result<LinkReview, ClassifyError> {
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                ClassifyError::new(FailureKind::MissingApiKey, "no api key configured")
            })?;

        let body = serde_json::to_vec(&GenerateContentRequest::for_link(url))
            .map_err(|err| ClassifyError::new(FailureKind::MalformedResponse, err.to_string()))?;
        let client = self.build_client()?;

        rewards_info!("Classifying link url_len={}", url.len());
        let response = client
            .post(self.endpoint())
            .header(API_KEY_HEADER, api_key)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClassifyError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let text = response.text().await.map_err(map_reqwest_error)?;
        let review = parse_response(&text)?;
        if !REWARD_TIERS
            .iter()
            .any(|tier| f64::from(*tier) == review.reward)
        {
            rewards_warn!("Reward {} is outside the requested tiers", review.reward);
        }
        rewards_debug!("Link classified title={:?} reward={}", review.title, review.reward);
        Ok(review)
    }
}

/// Instruction sent to the model for `url`.
pub fn build_prompt(url: &str) -> String {
    let tiers = REWARD_TIERS
        .iter()
        .map(|tier| format!("₹{tier}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "Review this YouTube link: {url}.\n\
         1. Create a catchy Hindi title (less than 40 chars).\n\
         2. Determine reward based on complexity ({tiers}).\n\
         Return JSON: {{ \"title\": \"Hindi Title\", \"reward\": 5 }}"
    )
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
    generation_config: GenerationConfig,
}

impl GenerateContentRequest {
    fn for_link(url: &str) -> Self {
        Self {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart {
                    text: build_prompt(url),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct RequestContent {
    role: &'static str,
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// Extracts the model text from the envelope and decodes it as a [`LinkReview`].
fn parse_response(body: &str) -> Result<LinkReview, ClassifyError> {
    let envelope: GenerateContentResponse = serde_json::from_str(body).map_err(|err| {
        ClassifyError::new(FailureKind::MalformedResponse, format!("envelope: {err}"))
    })?;

    let text: String = envelope
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();
    if text.trim().is_empty() {
        return Err(ClassifyError::new(
            FailureKind::MalformedResponse,
            "response carried no text",
        ));
    }

    parse_review(&text)
}

fn parse_review(text: &str) -> Result<LinkReview, ClassifyError> {
    let review: LinkReview = serde_json::from_str(text.trim()).map_err(|err| {
        ClassifyError::new(FailureKind::MalformedResponse, format!("review: {err}"))
    })?;
    if !review.reward.is_finite() || review.reward <= 0.0 {
        return Err(ClassifyError::new(
            FailureKind::MalformedResponse,
            format!("reward must be positive, got {}", review.reward),
        ));
    }
    Ok(review)
}

fn map_reqwest_error(err: reqwest::Error) -> ClassifyError {
    if err.is_timeout() {
        return ClassifyError::new(FailureKind::Timeout, err.to_string());
    }
    ClassifyError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_url_and_tiers() {
        let prompt = build_prompt("https://youtube.com/watch?v=x");
        assert!(prompt.contains("https://youtube.com/watch?v=x"));
        assert!(prompt.contains("₹2, ₹5, ₹10"));
        assert!(prompt.contains("\"reward\": 5"));
    }

    #[test]
    fn request_asks_for_json_output() {
        let value = serde_json::to_value(GenerateContentRequest::for_link("u")).unwrap();
        assert_eq!(value["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(value["contents"][0]["role"], "user");
        assert!(value["contents"][0]["parts"][0]["text"]
            .as_str()
            .unwrap()
            .contains("Review this YouTube link: u."));
    }

    #[test]
    fn parses_review_from_envelope() {
        let body = concat!(
            r#"{"candidates":[{"content":{"parts":["#,
            r#"{"text":"{\"title\":\"X\",\"reward\":5}"}]}}]}"#
        );
        let review = parse_response(body).unwrap();
        assert_eq!(
            review,
            LinkReview {
                title: "X".to_string(),
                reward: 5.0
            }
        );
    }

    #[test]
    fn joins_split_text_parts() {
        let body = concat!(
            r#"{"candidates":[{"content":{"parts":["#,
            r#"{"text":"{\"title\":"},{"text":"\"Y\",\"reward\":10}"}]}}]}"#
        );
        assert_eq!(parse_response(body).unwrap().reward, 10.0);
    }

    #[test]
    fn rejects_non_json_text() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"sorry, I cannot"}]}}]}"#;
        let err = parse_response(body).unwrap_err();
        assert_eq!(err.kind, FailureKind::MalformedResponse);
    }

    #[test]
    fn rejects_missing_or_mistyped_fields() {
        for text in [
            r#"{"title":"X"}"#,
            r#"{"reward":5}"#,
            r#"{"title":7,"reward":5}"#,
            r#"{"title":"X","reward":"5"}"#,
        ] {
            let err = parse_review(text).unwrap_err();
            assert_eq!(err.kind, FailureKind::MalformedResponse, "{text}");
        }
    }

    #[test]
    fn rejects_non_positive_reward() {
        let err = parse_review(r#"{"title":"X","reward":0}"#).unwrap_err();
        assert_eq!(err.kind, FailureKind::MalformedResponse);
        let err = parse_review(r#"{"title":"X","reward":-2}"#).unwrap_err();
        assert_eq!(err.kind, FailureKind::MalformedResponse);
    }

    #[test]
    fn rejects_empty_candidates() {
        let err = parse_response(r#"{"candidates":[]}"#).unwrap_err();
        assert_eq!(err.kind, FailureKind::MalformedResponse);
        let err = parse_response("not json at all").unwrap_err();
        assert_eq!(err.kind, FailureKind::MalformedResponse);
    }
}
