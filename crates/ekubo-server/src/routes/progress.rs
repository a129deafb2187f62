//! Line-by-line practice progress and session rollups.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use ekubo_api::ApiError;
use ekubo_core::{
    PracticeSession, PracticeSessionClose, PracticeSessionCreate, UserProgress, UserProgressCreate,
};
use serde::Deserialize;
use serde_json::json;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::info;

use crate::routes::{decode, decode_rows, map_store, to_fields};
use crate::server::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(record_progress))
        .route("/user/{user_id}", get(get_user_progress))
        .route("/sessions", post(start_session))
        .route("/sessions/{id}", get(get_session).put(close_session))
}

async fn record_progress(
    State(state): State<AppState>,
    Json(payload): Json<UserProgressCreate>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate().map_err(ApiError::bad_request)?;
    let row = state
        .store
        .create("user_progress", &to_fields(&payload)?)
        .await
        .map_err(map_store)?;
    let progress: UserProgress = decode(row)?;
    info!(
        id = progress.id,
        user_id = progress.user_id,
        line_number = progress.line_number,
        is_correct = progress.is_correct,
        "progress recorded"
    );
    Ok((StatusCode::CREATED, Json(progress)))
}

#[derive(Debug, Deserialize)]
struct ProgressQuery {
    matched_song_id: Option<i64>,
}

async fn get_user_progress(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Query(query): Query<ProgressQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let mut filters = vec![("user_id".to_string(), user_id.to_string())];
    if let Some(matched_song_id) = query.matched_song_id {
        filters.push(("matched_song_id".to_string(), matched_song_id.to_string()));
    }
    let rows = state
        .store
        .search("user_progress", &filters, 0, 1000)
        .await
        .map_err(map_store)?;
    Ok(Json(decode_rows::<UserProgress>(rows)?))
}

async fn start_session(
    State(state): State<AppState>,
    Json(payload): Json<PracticeSessionCreate>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate().map_err(ApiError::bad_request)?;
    let fields = json!({
        "user_id": payload.user_id,
        "matched_song_id": payload.matched_song_id,
        "started_at": now_rfc3339()?,
    });
    let row = state
        .store
        .create("practice_sessions", &fields)
        .await
        .map_err(map_store)?;
    let session: PracticeSession = decode(row)?;
    info!(
        id = session.id,
        user_id = session.user_id,
        matched_song_id = session.matched_song_id,
        "practice session started"
    );
    Ok((StatusCode::CREATED, Json(session)))
}

/// Closes a session, stamping `ended_at` and the accuracy rollups.
async fn close_session(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<PracticeSessionClose>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate().map_err(ApiError::bad_request)?;
    state
        .store
        .get("practice_sessions", id)
        .await
        .map_err(map_store)?
        .ok_or_else(|| ApiError::not_found("Practice session not found"))?;

    let fields = json!({
        "ended_at": now_rfc3339()?,
        "total_lines": payload.total_lines,
        "correct_lines": payload.correct_lines,
        "accuracy_percentage": payload.accuracy_percentage(),
    });
    let row = state
        .store
        .update("practice_sessions", id, &fields)
        .await
        .map_err(map_store)?;
    let session: PracticeSession = decode(row)?;
    info!(
        id = session.id,
        total_lines = payload.total_lines,
        correct_lines = payload.correct_lines,
        "practice session closed"
    );
    Ok(Json(session))
}

async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let row = state
        .store
        .get("practice_sessions", id)
        .await
        .map_err(map_store)?
        .ok_or_else(|| ApiError::not_found("Practice session not found"))?;
    Ok(Json(decode::<PracticeSession>(row)?))
}

fn now_rfc3339() -> Result<String, ApiError> {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|e| ApiError::internal(format!("timestamp formatting failed: {e}")))
}
