//! Gemini `generateContent` client.
//!
//! Blocking transport: the TUI calls it from a worker thread and headless
//! commands call it directly, so there is no async runtime in the process.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::prompt::build_prompt;
use super::{PredictionClient, PredictionError, PredictionRequest, PredictionResult, parse_prediction};
use crate::config_file::PredictorConfig;

const USER_AGENT: &str = concat!("admitui/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the Gemini generative language API.
pub struct GeminiClient {
    http: reqwest::blocking::Client,
    url: String,
    api_key: String,
    temperature: f32,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // api_key omitted
        f.debug_struct("GeminiClient")
            .field("url", &self.url)
            .field("temperature", &self.temperature)
            .finish()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<ResponseContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorEnvelope {
    error: ApiError,
}

#[derive(Deserialize)]
struct ApiError {
    message: String,
}

impl GeminiClient {
    /// Create a client for `{endpoint}/models/{model}:generateContent`.
    pub fn new(
        endpoint: &str,
        model: &str,
        api_key: String,
        timeout: Duration,
        temperature: f32,
    ) -> Result<Self, PredictionError> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| PredictionError::Service(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            url: generate_content_url(endpoint, model),
            api_key,
            temperature,
        })
    }

    /// Create a client from a validated configuration and a resolved API key.
    pub fn from_config(config: &PredictorConfig, api_key: String) -> Result<Self, PredictionError> {
        Self::new(
            &config.endpoint,
            &config.model,
            api_key,
            Duration::from_secs(config.timeout_secs),
            config.temperature,
        )
    }

    /// The fully-qualified request URL.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl PredictionClient for GeminiClient {
    fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult, PredictionError> {
        request.validate()?;

        let prompt = build_prompt(request);
        let body = build_request_body(&prompt, self.temperature);

        tracing::info!(
            course = %request.course,
            quota = %request.quota,
            gender = %request.gender,
            subjects = request.marks.len(),
            "Requesting admission prediction"
        );

        let response = self
            .http
            .post(&self.url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .map_err(transport_error)?;

        let status = response.status();
        let text = response.text().map_err(transport_error)?;

        if !status.is_success() {
            let detail = serde_json::from_str::<ApiErrorEnvelope>(&text)
                .map(|envelope| envelope.error.message)
                .unwrap_or_else(|_| text.trim().chars().take(200).collect());
            tracing::warn!(status = status.as_u16(), "Prediction service returned an error");
            return Err(PredictionError::Service(format!(
                "Prediction service error ({}): {}",
                status.as_u16(),
                detail
            )));
        }

        let completion = extract_text(&text)?;
        let result = parse_prediction(&completion)?;

        tracing::info!(
            total_score = result.total_score,
            campuses = result.campus_predictions.len(),
            "Prediction received"
        );
        Ok(result)
    }
}

fn generate_content_url(endpoint: &str, model: &str) -> String {
    format!("{}/models/{}:generateContent", endpoint.trim_end_matches('/'), model)
}

fn build_request_body(prompt: &str, temperature: f32) -> GenerateContentRequest<'_> {
    GenerateContentRequest {
        contents: vec![RequestContent {
            role: "user",
            parts: vec![RequestPart { text: prompt }],
        }],
        generation_config: GenerationConfig {
            response_mime_type: "application/json",
            temperature,
        },
    }
}

fn transport_error(err: reqwest::Error) -> PredictionError {
    tracing::warn!(error = %err, "Prediction transport failure");
    if err.is_timeout() {
        PredictionError::Service("The prediction service did not respond in time.".to_string())
    } else if err.is_connect() {
        PredictionError::Service(format!("Could not reach the prediction service: {}", err))
    } else {
        PredictionError::Service(err.to_string())
    }
}

/// Pull the completion text out of a `generateContent` response body.
fn extract_text(body: &str) -> Result<String, PredictionError> {
    let response: GenerateContentResponse = serde_json::from_str(body).map_err(|e| {
        PredictionError::MalformedResponse(format!(
            "The prediction service returned an unreadable response: {}",
            e
        ))
    })?;

    let candidate = response.candidates.into_iter().next().ok_or_else(|| {
        PredictionError::MalformedResponse(
            "The prediction service returned no candidates.".to_string(),
        )
    })?;

    let text: String = candidate
        .content
        .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        let reason = candidate.finish_reason.unwrap_or_else(|| "unknown".to_string());
        return Err(PredictionError::MalformedResponse(format!(
            "The prediction service returned no text (finish reason: {}).",
            reason
        )));
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marks::SubjectMarks;

    #[test]
    fn test_url_joins_endpoint_and_model() {
        assert_eq!(
            generate_content_url("https://example.test/v1beta/", "gemini-2.5-flash"),
            "https://example.test/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let body = build_request_body("hello", 0.2);
        let json = serde_json::to_value(&body).expect("serialize");
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(json["generationConfig"]["responseMimeType"], "application/json");
    }

    #[test]
    fn test_extract_text_joins_parts() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"{\"a\":"},{"text":"1}"}]},"finishReason":"STOP"}]}"#;
        assert_eq!(extract_text(body).expect("text"), "{\"a\":1}");
    }

    #[test]
    fn test_extract_text_without_candidates() {
        let err = extract_text(r#"{"candidates":[]}"#).unwrap_err();
        assert!(matches!(err, PredictionError::MalformedResponse(_)));
    }

    #[test]
    fn test_extract_text_blocked_candidate() {
        let err = extract_text(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#).unwrap_err();
        assert!(err.to_string().contains("SAFETY"));
    }

    #[test]
    fn test_extract_text_not_json() {
        assert!(matches!(
            extract_text("<html>bad gateway</html>"),
            Err(PredictionError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_invalid_request_fails_before_network() {
        // Port 9 on an unroutable documentation address: must never be contacted
        let client = GeminiClient::new(
            "http://192.0.2.1:9",
            "m",
            "key".into(),
            Duration::from_secs(1),
            0.2,
        )
        .expect("client");
        let request = PredictionRequest {
            course: "B.Tech CSE".into(),
            quota: "general".into(),
            gender: "male".into(),
            marks: SubjectMarks::new(),
        };
        assert!(matches!(
            client.predict(&request),
            Err(PredictionError::Validation(_))
        ));
    }

    #[test]
    fn test_unreachable_service_is_service_error() {
        let client = GeminiClient::new(
            "http://127.0.0.1:9",
            "m",
            "key".into(),
            Duration::from_secs(2),
            0.2,
        )
        .expect("client");
        let request = PredictionRequest {
            course: "B.Tech CSE".into(),
            quota: "general".into(),
            gender: "male".into(),
            marks: SubjectMarks::from_pairs([("Physics", 85.0)]).expect("marks"),
        };
        assert!(matches!(
            client.predict(&request),
            Err(PredictionError::Service(_))
        ));
    }

    #[test]
    fn test_debug_hides_api_key() {
        let client = GeminiClient::new(
            "https://example.test",
            "m",
            "super-secret".into(),
            Duration::from_secs(1),
            0.2,
        )
        .expect("client");
        assert!(!format!("{:?}", client).contains("super-secret"));
    }
}
