//! Axum route handlers for the Matching API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::extract::extract_text;
use crate::matching::ranker::{rank_postings, MatchResult};
use crate::matching::resume_score::resume_score;
use crate::state::AppState;

const MIN_RESUME_LEN: usize = 100;
const MAX_FEEDBACK_LEN: usize = 6000;
/// How much of the extracted text is echoed back in the match response.
const RESUME_PREVIEW_LEN: usize = 1000;

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub filename: String,
    pub resume_text: String,
    pub job_matches: Vec<MatchResult>,
    pub score: u32,
}

#[derive(Debug, Serialize)]
pub struct SuggestionsResponse {
    pub filename: String,
    pub suggestions: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Multipart handling
// ────────────────────────────────────────────────────────────────────────────

struct ResumeUpload {
    filename: String,
    text: String,
    role: String,
}

/// Reads the upload form: required `file` (PDF resume), optional `role`.
async fn read_upload(mut multipart: Multipart) -> Result<ResumeUpload, AppError> {
    let mut filename = None;
    let mut bytes = None;
    let mut role = "General".to_string();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                filename = field.file_name().map(str::to_string);
                bytes = Some(field.bytes().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read uploaded file: {e}"))
                })?);
            }
            Some("role") => {
                role = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read role field: {e}")))?;
            }
            _ => {}
        }
    }

    let bytes = bytes.ok_or_else(|| AppError::Validation("Missing 'file' field".to_string()))?;
    let text = extract_text(&bytes)?;

    Ok(ResumeUpload {
        filename: filename.unwrap_or_else(|| "resume.pdf".to_string()),
        text,
        role,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes/match
///
/// Uploads a PDF resume and ranks every posting in the working set against
/// it by embedding similarity. Embedding or corpus failures never surface
/// here: the ranking degrades instead (possibly to an empty list).
pub async fn handle_match(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<MatchResponse>, AppError> {
    let upload = read_upload(multipart).await?;

    if upload.text.len() < MIN_RESUME_LEN {
        return Err(AppError::Validation(
            "Resume is too short or unreadable.".to_string(),
        ));
    }

    let job_matches = rank_postings(&upload.text, &state.working_set, &state.embedder).await;
    let score = resume_score(&upload.text);

    let preview: String = upload.text.chars().take(RESUME_PREVIEW_LEN).collect();

    Ok(Json(MatchResponse {
        filename: upload.filename,
        resume_text: preview,
        job_matches,
        score,
    }))
}

/// POST /api/v1/resumes/suggestions
///
/// Uploads a PDF resume and returns free-text improvement suggestions for
/// the target role from the feedback client.
pub async fn handle_suggestions(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<SuggestionsResponse>, AppError> {
    let upload = read_upload(multipart).await?;

    if upload.text.len() < MIN_RESUME_LEN {
        return Err(AppError::Validation(
            "Resume is too short for feedback.".to_string(),
        ));
    }
    if upload.text.len() > MAX_FEEDBACK_LEN {
        return Err(AppError::Validation(
            "Resume is too long for feedback.".to_string(),
        ));
    }

    let suggestions = state
        .feedback
        .suggest(&upload.text, &upload.role)
        .await
        .map_err(|e| AppError::Llm(format!("Feedback generation failed: {e}")))?;

    Ok(Json(SuggestionsResponse {
        filename: upload.filename,
        suggestions,
    }))
}
