//! LLM Client: the single point of entry for chat-completion calls.
//!
//! Speaks the OpenAI-compatible `/chat/completions` protocol, so any provider
//! exposing that surface (OpenAI, Ollama, Gemini's compatibility layer) works
//! by pointing `LLM_API_BASE` at it.
//!
//! One request per call. No retries.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::LlmConfig;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("OPENAI_API_KEY is not configured")]
    MissingApiKey,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    pub content: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatResponse {
    /// Content of the first choice, if the provider returned any.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl LlmClient {
    pub fn new(config: &LlmConfig) -> Result<Self, LlmError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: format!("{}/chat/completions", config.api_base.trim_end_matches('/')),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Sends `system` + `prompt` and returns the completion text unmodified.
    pub async fn complete(&self, prompt: &str, system: &str) -> Result<String, LlmError> {
        let api_key = self.api_key.as_deref().ok_or(LlmError::MissingApiKey)?;

        let request_body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("LLM API returned {}: {}", status, body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: api_error_message(body),
            });
        }

        let chat: ChatResponse = response.json().await?;

        if let Some(usage) = &chat.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        chat.text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }
}

/// Pulls `error.message` out of a provider error body, falling back to the raw body.
fn api_error_message(body: String) -> String {
    serde_json::from_str::<ApiError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body)
}


#[cfg(test)]
mod tests {
    use super::mock::{completion_body, spawn_completion_server};
    use super::*;
    use axum::http::StatusCode;
    use serde_json::json;

    fn llm_config(api_base: &str, api_key: Option<&str>) -> LlmConfig {
        LlmConfig {
            api_key: api_key.map(str::to_string),
            api_base: api_base.to_string(),
            model: "gpt-4o-mini".to_string(),
            timeout_secs: Some(5),
        }
    }

    #[test]
    fn test_endpoint_tolerates_trailing_slash() {
        let client = LlmClient::new(&llm_config("https://api.openai.com/v1/", None)).unwrap();
        assert_eq!(client.endpoint, "https://api.openai.com/v1/chat/completions");
    }

    #[test]
    fn test_request_serializes_system_then_user() {
        let body = ChatRequest {
            model: "gpt-4o-mini",
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: "be brief",
                },
                ChatMessage {
                    role: "user",
                    content: "hello",
                },
            ],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "hello");
    }

    #[test]
    fn test_response_text_reads_first_choice() {
        let chat: ChatResponse = serde_json::from_value(completion_body("Looks good")).unwrap();
        assert_eq!(chat.text(), Some("Looks good"));
    }

    #[test]
    fn test_response_without_choices_has_no_text() {
        let chat: ChatResponse = serde_json::from_value(json!({"choices": []})).unwrap();
        assert_eq!(chat.text(), None);
    }

    #[test]
    fn test_api_error_message_prefers_structured_body() {
        let body = r#"{"error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}}"#;
        assert_eq!(api_error_message(body.to_string()), "Incorrect API key provided");
        assert_eq!(api_error_message("upstream down".to_string()), "upstream down");
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_any_request() {
        // Nothing listens on port 1; reaching the network would produce an Http error instead.
        let client = LlmClient::new(&llm_config("http://127.0.0.1:1/v1", None)).unwrap();
        let err = client.complete("prompt", "system").await.unwrap_err();
        assert!(matches!(err, LlmError::MissingApiKey));
    }

    #[tokio::test]
    async fn test_complete_returns_content_verbatim() {
        let content = "Match: 70%\n- Missing: Docker\n";
        let base = spawn_completion_server(StatusCode::OK, completion_body(content)).await;
        let client = LlmClient::new(&llm_config(&base, Some("sk-test"))).unwrap();

        let text = client.complete("prompt", "system").await.unwrap();
        assert_eq!(text, content);
    }

    #[tokio::test]
    async fn test_non_success_status_is_api_error() {
        let base = spawn_completion_server(
            StatusCode::UNAUTHORIZED,
            json!({"error": {"message": "Incorrect API key provided"}}),
        )
        .await;
        let client = LlmClient::new(&llm_config(&base, Some("sk-bad"))).unwrap();

        match client.complete("prompt", "system").await.unwrap_err() {
            LlmError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Incorrect API key provided");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_null_content_is_empty_content_error() {
        let base = spawn_completion_server(
            StatusCode::OK,
            json!({"choices": [{"message": {"role": "assistant", "content": null}}]}),
        )
        .await;
        let client = LlmClient::new(&llm_config(&base, Some("sk-test"))).unwrap();

        let err = client.complete("prompt", "system").await.unwrap_err();
        assert!(matches!(err, LlmError::EmptyContent));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_http_error() {
        let client = LlmClient::new(&llm_config("http://127.0.0.1:1/v1", Some("sk-test"))).unwrap();
        let err = client.complete("prompt", "system").await.unwrap_err();
        assert!(matches!(err, LlmError::Http(_)));
    }
}
