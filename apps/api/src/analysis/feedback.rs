//! Feedback generation behind a trait, so the backend is picked once at startup.
//!
//! `AppState` holds an `Arc<dyn FeedbackGenerator>`.

use std::sync::Arc;

use async_trait::async_trait;

use crate::analysis::prompts::{build_feedback_prompt, FEEDBACK_SYSTEM, STUB_FEEDBACK};
use crate::config::{Config, FeedbackMode};
use crate::errors::AppError;
use crate::llm_client::LlmClient;

#[async_trait]
pub trait FeedbackGenerator: Send + Sync {
    async fn feedback(&self, resume_text: &str, jd_text: &str) -> Result<String, AppError>;

    /// Backend label for health output and logs.
    fn backend(&self) -> FeedbackMode;
}

/// Canned feedback. Ignores its input and never fails.
pub struct StubFeedback;

#[async_trait]
impl FeedbackGenerator for StubFeedback {
    async fn feedback(&self, _resume_text: &str, _jd_text: &str) -> Result<String, AppError> {
        Ok(STUB_FEEDBACK.to_string())
    }

    fn backend(&self) -> FeedbackMode {
        FeedbackMode::Stub
    }
}

/// Feedback from the chat-completion API. Any LLM failure fails the request.
pub struct LlmFeedback(pub LlmClient);

#[async_trait]
impl FeedbackGenerator for LlmFeedback {
    async fn feedback(&self, resume_text: &str, jd_text: &str) -> Result<String, AppError> {
        let prompt = build_feedback_prompt(resume_text, jd_text);
        self.0
            .complete(&prompt, FEEDBACK_SYSTEM)
            .await
            .map_err(|e| AppError::Llm(format!("Feedback generation failed: {e}")))
    }

    fn backend(&self) -> FeedbackMode {
        FeedbackMode::Live
    }
}

/// Picks the feedback backend from `FEEDBACK_MODE`.
pub fn build_feedback_generator(config: &Config) -> anyhow::Result<Arc<dyn FeedbackGenerator>> {
    match config.feedback_mode {
        FeedbackMode::Stub => Ok(Arc::new(StubFeedback)),
        FeedbackMode::Live => {
            if config.llm.api_key.is_none() {
                tracing::warn!(
                    "FEEDBACK_MODE=live but OPENAI_API_KEY is not set; /analyze will fail until it is"
                );
            }
            let llm = LlmClient::new(&config.llm)?;
            Ok(Arc::new(LlmFeedback(llm)))
        }
    }
}
