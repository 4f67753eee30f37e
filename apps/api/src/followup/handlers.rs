//! Axum route handlers for the Follow-up API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dispatch::mock::{mock_send, MockMessage};
use crate::dispatch::{live_send, SendResult};
use crate::errors::AppError;
use crate::followup::session::FollowupSession;
use crate::followup::workflow::generate_followup;
use crate::state::AppState;
use crate::summary::Summary;
use crate::transcript::resolve_recipient;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub transcript: String,
    pub recipient: Option<String>,
    pub student_name: Option<String>,
    /// Session whose draft this generation overwrites, if the page already has one.
    pub session_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub session_id: Uuid,
    pub summary: Summary,
    pub draft_email: String,
    pub recipient: String,
    /// The summary reply was not clean JSON and was recovered from its brace span.
    pub summary_recovered: bool,
}

#[derive(Debug, Serialize)]
pub struct SessionView {
    pub session_id: Uuid,
    pub summary: Summary,
    pub draft_email: String,
    pub recipient: String,
    pub student_name: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<FollowupSession> for SessionView {
    fn from(s: FollowupSession) -> Self {
        Self {
            session_id: s.session_id,
            summary: s.summary,
            draft_email: s.draft.as_str().to_string(),
            recipient: s.recipient,
            student_name: s.student_name,
            created_at: s.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RecipientUpdate {
    pub recipient: String,
}

#[derive(Debug, Serialize)]
pub struct MockSendResponse {
    pub status: String,
    pub message: MockMessage,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

async fn load_session(state: &AppState, session_id: Uuid) -> Result<FollowupSession, AppError> {
    state
        .sessions
        .get(session_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session {session_id} not found")))
}

/// POST /api/v1/followups
///
/// Extracts a summary from the transcript, drafts the email, and opens a session
/// holding the draft for the dispatch step. A `session_id` in the request is
/// replaced once the new draft exists; on failure it is left untouched.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let generated = generate_followup(&request.transcript, state.llm.as_ref()).await?;

    let recipient = resolve_recipient(request.recipient.as_deref());
    let student_name = request
        .student_name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());

    let session = FollowupSession::new(
        generated.summary,
        generated.draft,
        recipient,
        student_name,
    );
    let response = GenerateResponse {
        session_id: session.session_id,
        summary: session.summary.clone(),
        draft_email: session.draft.as_str().to_string(),
        recipient: session.recipient.clone(),
        summary_recovered: generated.summary_recovered,
    };
    if let Some(previous) = request.session_id {
        state.sessions.remove(previous).await;
    }
    state.sessions.insert(session).await;

    Ok(Json(response))
}

/// GET /api/v1/followups/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    Ok(Json(load_session(&state, session_id).await?.into()))
}

/// PUT /api/v1/followups/:id/recipient
pub async fn handle_update_recipient(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(update): Json<RecipientUpdate>,
) -> Result<Json<SessionView>, AppError> {
    // Stored as given; a blank recipient is rejected by live send, not here.
    let recipient = update.recipient.trim().to_string();
    let session = state
        .sessions
        .update(session_id, |s| s.recipient = recipient)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session {session_id} not found")))?;
    Ok(Json(session.into()))
}

/// DELETE /api/v1/followups/:id
pub async fn handle_end_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state
        .sessions
        .remove(session_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session {session_id} not found")))?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/followups/:id/send
///
/// Live send through the email service. No retry.
pub async fn handle_live_send(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SendResult>, AppError> {
    let session = load_session(&state, session_id).await?;
    let result = live_send(&session.draft, &session.recipient, state.mailer.as_ref()).await?;
    Ok(Json(result))
}

/// POST /api/v1/followups/:id/mock-send
///
/// Renders the message locally; nothing is transmitted.
pub async fn handle_mock_send(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<MockSendResponse>, AppError> {
    let session = load_session(&state, session_id).await?;
    let message = mock_send(
        &session.draft,
        &session.recipient,
        session.student_name.as_deref(),
    )?;
    Ok(Json(MockSendResponse {
        status: "Mock email 'sent' successfully!".to_string(),
        message,
    }))
}
