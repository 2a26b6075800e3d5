use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::debug;

use crate::config::Config;
use crate::error::DermaError;
use crate::utils::http::get_http_client;
use crate::utils::timing::log_llm_timing;
use crate::utils::truncate_for_log;

/// One ordered piece of a multimodal request.
#[derive(Debug, Clone)]
pub enum Part {
    Text(String),
    InlineData { mime_type: String, data: String },
}

impl Part {
    pub fn text(value: impl Into<String>) -> Self {
        Part::Text(value.into())
    }

    /// `data` is already base64; images arrive encoded from the mobile
    /// client and are forwarded as-is.
    pub fn inline_data(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Part::InlineData {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }
}

/// Exactly one request produces exactly one response; no streaming.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub model: String,
    pub parts: Vec<Part>,
    pub response_schema: Option<Value>,
    pub system_instruction: Option<String>,
    pub operation: &'static str,
}

impl GenerateRequest {
    pub fn new(model: impl Into<String>, parts: Vec<Part>) -> Self {
        GenerateRequest {
            model: model.into(),
            parts,
            response_schema: None,
            system_instruction: None,
            operation: "generate_content",
        }
    }

    pub fn with_schema(mut self, schema: &Value) -> Self {
        self.response_schema = Some(schema.clone());
        self
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    pub fn with_operation(mut self, operation: &'static str) -> Self {
        self.operation = operation;
        self
    }
}

/// The seam the orchestration services depend on. Production code uses
/// [`GeminiClient`]; tests inject canned or failing implementations.
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn generate_content(&self, request: GenerateRequest) -> Result<String>;
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiContent {
    parts: Option<Vec<GeminiResponsePart>>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    text: Option<String>,
}

fn extract_text_from_response(response: GeminiResponse) -> String {
    let mut text_parts = Vec::new();
    for candidate in response.candidates.unwrap_or_default() {
        if let Some(content) = candidate.content {
            for part in content.parts.unwrap_or_default() {
                if let Some(text) = part.text {
                    if !text.trim().is_empty() {
                        text_parts.push(text);
                    }
                }
            }
        }
    }
    text_parts.join("\n")
}

fn summarize_error_body(body: &str) -> (Option<String>, String) {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return (None, "empty response body".to_string());
    }

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        let message = value
            .pointer("/error/message")
            .and_then(|v| v.as_str())
            .map(|v| v.to_string())
            .or_else(|| {
                value
                    .get("message")
                    .and_then(|v| v.as_str())
                    .map(|v| v.to_string())
            });
        return (message, truncate_for_log(&value.to_string(), 2000));
    }

    (None, truncate_for_log(trimmed, 2000))
}

fn summarize_parts(parts: &[Part]) -> Vec<Value> {
    parts
        .iter()
        .map(|part| match part {
            Part::Text(text) => json!({ "text": truncate_for_log(text, 200) }),
            Part::InlineData { mime_type, data } => {
                json!({ "inlineData": { "mimeType": mime_type, "dataLen": data.len() } })
            }
        })
        .collect()
}

/// Handle to the Gemini REST API. Constructed once at process start from
/// [`Config`] and shared by reference; holds no per-request state.
pub struct GeminiClient {
    api_key: String,
    pro_model: String,
    flash_model: String,
    temperature: f32,
    top_k: i32,
    top_p: f32,
    max_output_tokens: i32,
    request_timeout: Duration,
}

impl GeminiClient {
    /// A missing credential here is an unrecoverable startup error, not a
    /// per-request condition.
    pub fn new(config: &Config) -> Result<Self, DermaError> {
        if config.gemini_api_key.trim().is_empty() {
            return Err(DermaError::Config(
                "Gemini API key is missing; set GEMINI_API_KEY".to_string(),
            ));
        }

        Ok(GeminiClient {
            api_key: config.gemini_api_key.clone(),
            pro_model: config.gemini_model.clone(),
            flash_model: config.gemini_flash_model.clone(),
            temperature: config.gemini_temperature,
            top_k: config.gemini_top_k,
            top_p: config.gemini_top_p,
            max_output_tokens: config.gemini_max_output_tokens,
            request_timeout: Duration::from_secs(config.gemini_request_timeout_secs),
        })
    }

    pub fn pro_model(&self) -> &str {
        &self.pro_model
    }

    pub fn flash_model(&self) -> &str {
        &self.flash_model
    }

    fn redact_api_key(&self, text: &str) -> String {
        let key = self.api_key.trim();
        if key.is_empty() {
            return text.to_string();
        }
        text.replace(key, "[redacted]")
    }

    fn build_payload(&self, request: &GenerateRequest) -> Value {
        let parts: Vec<Value> = request
            .parts
            .iter()
            .map(|part| match part {
                Part::Text(text) => json!({ "text": text }),
                Part::InlineData { mime_type, data } => {
                    json!({ "inlineData": { "mimeType": mime_type, "data": data } })
                }
            })
            .collect();

        let mut generation_config = Map::new();
        generation_config.insert("temperature".to_string(), json!(self.temperature));
        generation_config.insert("topK".to_string(), json!(self.top_k));
        generation_config.insert("topP".to_string(), json!(self.top_p));
        generation_config.insert(
            "maxOutputTokens".to_string(),
            json!(self.max_output_tokens),
        );
        if let Some(schema) = &request.response_schema {
            generation_config.insert("responseMimeType".to_string(), json!("application/json"));
            generation_config.insert("responseSchema".to_string(), schema.clone());
        }

        let mut payload = Map::new();
        payload.insert(
            "contents".to_string(),
            json!([{ "role": "user", "parts": parts }]),
        );
        payload.insert(
            "generationConfig".to_string(),
            Value::Object(generation_config),
        );
        if let Some(instruction) = &request.system_instruction {
            payload.insert(
                "systemInstruction".to_string(),
                json!({ "parts": [{ "text": instruction }] }),
            );
        }

        Value::Object(payload)
    }

    async fn call_api(&self, request: &GenerateRequest) -> Result<String> {
        let payload = self.build_payload(request);
        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            request.model, self.api_key
        );

        if tracing::enabled!(tracing::Level::DEBUG) {
            debug!(
                target: "llm.gemini",
                model = %request.model,
                operation = request.operation,
                parts = %serde_json::Value::Array(summarize_parts(&request.parts)),
                has_schema = request.response_schema.is_some(),
            );
        }

        let response = get_http_client()
            .post(&url)
            .timeout(self.request_timeout)
            .json(&payload)
            .send()
            .await
            .map_err(|err| {
                let err_text = self.redact_api_key(&err.to_string());
                anyhow!(
                    "Gemini request failed: {} (timeout={}, connect={})",
                    err_text,
                    err.is_timeout(),
                    err.is_connect()
                )
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let (message, body_summary) = summarize_error_body(&body);
            let detail = message.unwrap_or(body_summary);
            return Err(anyhow!(
                "Gemini request failed with status {}: {}",
                status,
                detail
            ));
        }

        let parsed = response.json::<GeminiResponse>().await?;
        let text = extract_text_from_response(parsed);
        if text.trim().is_empty() {
            return Err(anyhow!("No response text from Gemini"));
        }
        Ok(text)
    }
}

#[async_trait]
impl ModelClient for GeminiClient {
    /// Sends the request and returns the raw response text. When a schema
    /// was supplied the remote service promises JSON of that shape, but this
    /// adapter does not validate it; parsing stays the caller's step. No
    /// retries here: a timed-out call is retried in full by the caller or
    /// not at all.
    async fn generate_content(&self, request: GenerateRequest) -> Result<String> {
        let model = request.model.clone();
        let operation = request.operation;
        log_llm_timing("gemini", &model, operation, None, || async {
            self.call_api(&request).await
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> GeminiClient {
        GeminiClient {
            api_key: "test-key".to_string(),
            pro_model: "gemini-2.5-pro".to_string(),
            flash_model: "gemini-2.5-flash".to_string(),
            temperature: 0.4,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 8192,
            request_timeout: Duration::from_secs(150),
        }
    }

    #[test]
    fn payload_preserves_part_order_and_schema() {
        let client = test_client();
        let request = GenerateRequest::new(
            "gemini-2.5-pro",
            vec![
                Part::text("analyze this"),
                Part::inline_data("image/jpeg", "aGVsbG8="),
            ],
        )
        .with_schema(&json!({ "type": "OBJECT" }))
        .with_system_instruction("persona");

        let payload = client.build_payload(&request);
        let parts = payload["contents"][0]["parts"].as_array().unwrap();
        assert_eq!(parts[0]["text"], "analyze this");
        assert_eq!(parts[1]["inlineData"]["mimeType"], "image/jpeg");
        assert_eq!(
            payload["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(payload["generationConfig"]["responseSchema"]["type"], "OBJECT");
        assert_eq!(
            payload["systemInstruction"]["parts"][0]["text"],
            "persona"
        );
    }

    #[test]
    fn payload_without_schema_leaves_mime_type_unset() {
        let client = test_client();
        let request = GenerateRequest::new("gemini-2.5-pro", vec![Part::text("svg please")]);
        let payload = client.build_payload(&request);
        assert!(payload["generationConfig"].get("responseMimeType").is_none());
        assert!(payload.get("systemInstruction").is_none());
    }

    #[test]
    fn response_text_joins_non_empty_parts() {
        let response: GeminiResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": { "parts": [
                    { "text": "first" },
                    { "text": "   " },
                    { "inlineData": { "mimeType": "image/png", "data": "x" } },
                    { "text": "second" }
                ]}
            }]
        }))
        .unwrap();
        assert_eq!(extract_text_from_response(response), "first\nsecond");
    }

    #[test]
    fn error_body_summary_prefers_nested_message() {
        let (message, _) = summarize_error_body(
            "{\"error\": {\"message\": \"API key not valid\", \"code\": 400}}",
        );
        assert_eq!(message.as_deref(), Some("API key not valid"));

        let (none, summary) = summarize_error_body("plain text failure");
        assert!(none.is_none());
        assert_eq!(summary, "plain text failure");
    }

    #[test]
    fn api_key_is_redacted_from_error_text() {
        let client = test_client();
        let redacted = client.redact_api_key("https://host/path?key=test-key failed");
        assert!(!redacted.contains("test-key"));
        assert!(redacted.contains("[redacted]"));
    }
}
