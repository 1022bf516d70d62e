//! GeminiClient - direct REST implementation of the chat backend.
//!
//! Talks to the Gemini `generateContent` endpoint. The API key comes from
//! secret configuration at runtime; construction fails when no key is
//! configured.

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use mindmend_core::{MindmendError, Result, SecretService};

use crate::chat::{ChatBackend, ChatMessage};

const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1/models";

/// Chat backend that talks to the Gemini HTTP API.
#[derive(Clone, Debug)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    /// Creates a new client with the provided API key and the default model.
    ///
    /// # Errors
    ///
    /// Returns a config error if `api_key` is empty.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(MindmendError::config("Gemini API key must not be empty"));
        }
        Ok(Self {
            client: Client::new(),
            api_key,
            model: DEFAULT_GEMINI_MODEL.to_string(),
        })
    }

    /// Loads configuration through a [`SecretService`].
    ///
    /// Model name defaults to `gemini-1.5-flash` if not specified.
    ///
    /// # Errors
    ///
    /// Returns an error if the secrets cannot be loaded or no usable Gemini
    /// configuration is present. There is no fallback key.
    pub async fn from_secrets(service: &dyn SecretService) -> Result<Self> {
        let secret_config = service.load_secrets().await?;

        let gemini_config = secret_config.gemini().ok_or_else(|| {
            MindmendError::config("Gemini configuration not found in secret.json")
        })?;

        let mut client = Self::new(gemini_config.api_key.clone())?;
        if let Some(model) = &gemini_config.model_name {
            client.model = model.clone();
        }
        Ok(client)
    }

    /// Overrides the model after construction.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Checks whether the configured API key is accepted by the service.
    ///
    /// Sends a minimal probe request. An HTTP error status means the key is
    /// rejected; only transport failures surface as errors.
    pub async fn validate_api_key(&self) -> Result<bool> {
        let request = GenerateContentRequest {
            contents: vec![WireContent {
                role: "user".to_string(),
                parts: vec![WirePart {
                    text: "Hello".to_string(),
                }],
            }],
            generation_config: Some(GenerationConfig::probe()),
        };

        let response = self
            .client
            .post(self.request_url())
            .json(&request)
            .send()
            .await
            .map_err(transport_error)?;

        Ok(response.status().is_success())
    }

    async fn send_request(&self, body: &GenerateContentRequest) -> Result<String> {
        let response = self
            .client
            .post(self.request_url())
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|err| {
            MindmendError::external_service(format!("Failed to parse Gemini response: {err}"))
        })?;

        extract_text_response(parsed)
    }

    fn request_url(&self) -> String {
        format!(
            "{}/{model}:generateContent?key={api_key}",
            BASE_URL,
            model = self.model,
            api_key = self.api_key
        )
    }
}

#[async_trait::async_trait]
impl ChatBackend for GeminiClient {
    async fn send_message(&self, messages: &[ChatMessage]) -> Result<String> {
        let contents = messages
            .iter()
            .map(|message| WireContent {
                role: message.role.as_str().to_string(),
                parts: vec![WirePart {
                    text: message.content.clone(),
                }],
            })
            .collect();

        let request = GenerateContentRequest {
            contents,
            generation_config: Some(GenerationConfig::chat()),
        };

        tracing::debug!(model = %self.model, messages = messages.len(), "sending chat request");
        self.send_request(&request).await
    }
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<WireContent>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
struct WireContent {
    role: String,
    parts: Vec<WirePart>,
}

#[derive(Serialize)]
struct WirePart {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

impl GenerationConfig {
    /// Sampling settings for regular chat turns.
    fn chat() -> Self {
        Self {
            temperature: Some(0.7),
            top_p: Some(0.95),
            top_k: Some(40),
            max_output_tokens: Some(1024),
        }
    }

    /// Minimal settings for the key-validation probe.
    fn probe() -> Self {
        Self {
            temperature: None,
            top_p: None,
            top_k: None,
            max_output_tokens: Some(10),
        }
    }
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

fn extract_text_response(response: GenerateContentResponse) -> Result<String> {
    response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
        .ok_or_else(|| MindmendError::external_service("No response generated"))
}

fn transport_error(err: reqwest::Error) -> MindmendError {
    MindmendError::external_service(format!("Gemini API request failed: {err}"))
}

fn map_http_error(status: StatusCode, body: String) -> MindmendError {
    let message = serde_json::from_str::<ErrorWrapper>(&body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.clone());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.clone());

    MindmendError::external_service_with_status(status.as_u16(), message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mindmend_core::{GeminiConfig, SecretConfig};

    struct StubSecrets(SecretConfig);

    #[async_trait::async_trait]
    impl SecretService for StubSecrets {
        async fn load_secrets(&self) -> Result<SecretConfig> {
            Ok(self.0.clone())
        }

        async fn secret_file_exists(&self) -> bool {
            true
        }
    }

    #[test]
    fn test_chat_request_serialization() {
        let request = GenerateContentRequest {
            contents: vec![
                WireContent {
                    role: "user".to_string(),
                    parts: vec![WirePart {
                        text: "How are you?".to_string(),
                    }],
                },
                WireContent {
                    role: "assistant".to_string(),
                    parts: vec![WirePart {
                        text: "I'm well.".to_string(),
                    }],
                },
            ],
            generation_config: Some(GenerationConfig::chat()),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(value["contents"][0]["parts"][0]["text"], "How are you?");
        assert_eq!(value["contents"][1]["role"], "assistant");
        assert_eq!(value["generationConfig"]["temperature"], 0.7);
        assert_eq!(value["generationConfig"]["topP"], 0.95);
        assert_eq!(value["generationConfig"]["topK"], 40);
        assert_eq!(value["generationConfig"]["maxOutputTokens"], 1024);
    }

    #[test]
    fn test_probe_config_is_minimal() {
        let value = serde_json::to_value(GenerationConfig::probe()).unwrap();
        assert_eq!(value["maxOutputTokens"], 10);
        assert!(value.get("temperature").is_none());
    }

    #[test]
    fn test_extract_text_takes_first_candidate() {
        let json = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "first"}], "role": "model"}},
                {"content": {"parts": [{"text": "second"}], "role": "model"}}
            ]
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(extract_text_response(response).unwrap(), "first");
    }

    #[test]
    fn test_empty_candidates_is_no_response() {
        let response: GenerateContentResponse = serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        let err = extract_text_response(response).unwrap_err();
        assert!(err.is_external_service());
        assert_eq!(
            err.to_string(),
            "External service error: No response generated"
        );
    }

    #[test]
    fn test_map_http_error_parses_wrapper() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT"}}"#;
        let err = map_http_error(StatusCode::BAD_REQUEST, body.to_string());
        match err {
            MindmendError::ExternalService {
                status_code,
                message,
            } => {
                assert_eq!(status_code, Some(400));
                assert_eq!(message, "INVALID_ARGUMENT: API key not valid");
            }
            other => panic!("expected ExternalService, got {other:?}"),
        }
    }

    #[test]
    fn test_map_http_error_falls_back_to_body() {
        let err = map_http_error(StatusCode::BAD_GATEWAY, "upstream down".to_string());
        match err {
            MindmendError::ExternalService { message, .. } => {
                assert_eq!(message, "upstream down");
            }
            other => panic!("expected ExternalService, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_api_key_rejected() {
        assert!(GeminiClient::new("").is_err());
        assert!(GeminiClient::new("   ").is_err());
    }

    #[tokio::test]
    async fn test_from_secrets_fails_closed_without_key() {
        let service = StubSecrets(SecretConfig::default());
        let err = GeminiClient::from_secrets(&service).await.unwrap_err();
        assert!(err.is_config());
    }

    #[tokio::test]
    async fn test_from_secrets_uses_configured_model() {
        let service = StubSecrets(SecretConfig {
            gemini: Some(GeminiConfig {
                api_key: "k".to_string(),
                model_name: Some("gemini-2.0-flash".to_string()),
            }),
        });
        let client = GeminiClient::from_secrets(&service).await.unwrap();
        assert_eq!(client.model, "gemini-2.0-flash");
        assert!(client.request_url().contains("gemini-2.0-flash:generateContent"));
    }
}
