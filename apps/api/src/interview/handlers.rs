//! Axum route handlers for the Interview API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::catalog::TECH_STACK_OPTIONS;
use crate::interview::profile::{CandidateProfile, ProfileField};
use crate::interview::session::{AnswerRecord, InterviewSession};
use crate::interview::stage::InterviewStage;
use crate::llm_client::{ChatMessage, ProviderKind};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct TechStackResponse {
    pub technologies: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct CreateSessionResponse {
    pub session_id: Uuid,
    pub stage: InterviewStage,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    pub stage: InterviewStage,
    pub stage_label: &'static str,
    pub stage_ordinal: u8,
    pub profile: CandidateProfile,
    pub missing_fields: Vec<ProfileField>,
    pub current_question: Option<String>,
    pub questions_asked: usize,
    pub answers: Vec<AnswerRecord>,
    pub transcript: Vec<ChatMessage>,
    pub created_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
}

impl From<InterviewSession> for SessionSnapshot {
    fn from(session: InterviewSession) -> Self {
        Self {
            session_id: session.id,
            stage: session.stage,
            stage_label: session.stage.label(),
            stage_ordinal: session.stage.ordinal(),
            missing_fields: session.profile.missing(session.stage.required_fields()),
            current_question: session.current_question().map(str::to_string),
            questions_asked: session.questions.len(),
            profile: session.profile,
            answers: session.answers,
            transcript: session.transcript,
            created_at: session.created_at,
            last_active: session.last_active,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TurnRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct TurnResponse {
    pub session_id: Uuid,
    pub reply: String,
    pub stage: InterviewStage,
    pub provider: Option<ProviderKind>,
    pub profile: CandidateProfile,
    pub completed: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/tech-stack
pub async fn handle_tech_stack() -> Json<TechStackResponse> {
    Json(TechStackResponse {
        technologies: TECH_STACK_OPTIONS.to_vec(),
    })
}

/// POST /api/v1/sessions
///
/// Opens a new interview. The greeting is fixed text, so no provider is called.
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<CreateSessionResponse>) {
    let session = InterviewSession::new();
    let response = CreateSessionResponse {
        session_id: session.id,
        stage: session.stage,
        message: session
            .transcript
            .first()
            .map(|m| m.content.clone())
            .unwrap_or_default(),
    };

    state.sessions.insert(session).await;
    info!(session_id = %response.session_id, "interview session created");

    (StatusCode::CREATED, Json(response))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let session = state.sessions.get(id).await.ok_or_else(|| not_found(id))?;
    Ok(Json(session.into()))
}

/// POST /api/v1/sessions/:id/turns
///
/// Runs one driver turn. The stored session is replaced only when the turn
/// succeeds; a provider outage returns 503 and leaves it as it was.
pub async fn handle_turn(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<TurnRequest>,
) -> Result<Json<TurnResponse>, AppError> {
    let message = request.message.trim();
    if message.is_empty() {
        return Err(AppError::Validation("message cannot be empty".to_string()));
    }

    let session = state.sessions.get(id).await.ok_or_else(|| not_found(id))?;
    let outcome = state.driver.advance(&session, message).await?;

    if !state.sessions.replace(outcome.session.clone()).await {
        return Err(not_found(id));
    }

    Ok(Json(TurnResponse {
        session_id: id,
        reply: outcome.reply,
        stage: outcome.session.stage,
        provider: outcome.provider,
        completed: outcome.session.stage.is_terminal(),
        profile: outcome.session.profile,
    }))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_end_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(id).await.ok_or_else(|| not_found(id))?;
    info!(session_id = %id, "interview session ended");
    Ok(StatusCode::NO_CONTENT)
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {id} not found"))
}
