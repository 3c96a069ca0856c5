//! Axum route handler for `POST /analyze`.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, Instrument};
use uuid::Uuid;

use crate::analysis::extract::extract_resume_text;
use crate::analysis::keywords::{score_keywords, ScoreResult};
use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Fields pulled out of the multipart body.
#[derive(Debug)]
pub struct AnalyzeForm {
    pub resume: Bytes,
    pub job_description: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub ats_analysis: ScoreResult,
    pub ai_feedback: String,
}

impl AnalyzeForm {
    /// Reads `resume` (file) and `job_description` (text). Other fields are skipped.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut resume = None;
        let mut job_description = None;

        while let Some(field) = multipart.next_field().await? {
            match field.name() {
                Some("resume") => {
                    debug!(
                        "Received resume upload: filename={:?} content_type={:?}",
                        field.file_name(),
                        field.content_type()
                    );
                    resume = Some(field.bytes().await?);
                }
                Some("job_description") => job_description = Some(field.text().await?),
                other => debug!("Ignoring unexpected multipart field {other:?}"),
            }
        }

        Ok(AnalyzeForm {
            resume: resume
                .ok_or_else(|| AppError::Validation("resume file is required".to_string()))?,
            job_description: job_description
                .ok_or_else(|| AppError::Validation("job_description is required".to_string()))?,
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /analyze
///
/// Extract → score → feedback. Any failure fails the whole request; there is
/// no partial response with a score but no feedback.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalysisResponse>, AppError> {
    let span = tracing::info_span!("analyze", request_id = %Uuid::new_v4());
    analyze(state, multipart).instrument(span).await.map(Json)
}

async fn analyze(state: AppState, multipart: Multipart) -> Result<AnalysisResponse, AppError> {
    let form = AnalyzeForm::from_multipart(multipart).await?;
    info!(
        "Analyzing resume ({} bytes) against job description ({} chars)",
        form.resume.len(),
        form.job_description.len()
    );

    let resume_text = extract_resume_text(form.resume).await?;
    let ats_analysis = score_keywords(resume_text.as_str(), &form.job_description);

    let ai_feedback = state
        .feedback
        .feedback(resume_text.as_str(), &form.job_description)
        .await?;

    info!(
        "Analysis complete: ats_score={} feedback_backend={}",
        ats_analysis.ats_score,
        state.feedback.backend()
    );

    Ok(AnalysisResponse {
        ats_analysis,
        ai_feedback,
    })
}
