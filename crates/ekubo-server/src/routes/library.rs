//! Per-user library entries.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use ekubo_api::ApiError;
use ekubo_core::{
    Lyrics, Matched, MatchedWithDetails, Song, User, UserLibraryCreate, UserLibraryEntry,
    UserLibraryUpdate, UserLibraryWithDetails, UserRecord,
};
use serde_json::json;
use tracing::info;

use crate::routes::{Pagination, decode, decode_rows, map_store, to_fields};
use crate::server::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_entries).post(add_to_library))
        .route("/user/{user_id}", get(get_user_library))
        .route(
            "/{id}",
            get(get_entry).put(update_entry).delete(remove_entry),
        )
}

async fn list_entries(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> Result<impl IntoResponse, ApiError> {
    page.validate()?;
    let rows = state
        .store
        .list("user_library", page.skip, page.limit, None)
        .await
        .map_err(map_store)?;
    Ok(Json(decode_rows::<UserLibraryEntry>(rows)?))
}

/// All entries for one user, each with its matched song (and that match's
/// song and lyrics) and the owning user resolved.
async fn get_user_library(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let filters = vec![("user_id".to_string(), user_id.to_string())];
    let rows = state
        .store
        .search("user_library", &filters, 0, 100)
        .await
        .map_err(map_store)?;

    let mut detailed = Vec::new();
    for row in rows {
        let entry: UserLibraryEntry = decode(row)?;
        detailed.push(with_details(&state, entry).await?);
    }
    Ok(Json(detailed))
}

async fn get_entry(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let row = state
        .store
        .get("user_library", id)
        .await
        .map_err(map_store)?
        .ok_or_else(|| ApiError::not_found("Library entry not found"))?;
    let entry: UserLibraryEntry = decode(row)?;
    Ok(Json(with_details(&state, entry).await?))
}

/// Adds a matched song to a user's library. A (user_id, matched_song_id)
/// pair exists at most once; the store does not enforce that, so the
/// handler checks before creating.
async fn add_to_library(
    State(state): State<AppState>,
    Json(payload): Json<UserLibraryCreate>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate().map_err(ApiError::bad_request)?;

    let filters = vec![
        ("user_id".to_string(), payload.user_id.to_string()),
        (
            "matched_song_id".to_string(),
            payload.matched_song_id.to_string(),
        ),
    ];
    let existing = state
        .store
        .search("user_library", &filters, 0, 1)
        .await
        .map_err(map_store)?;
    if !existing.is_empty() {
        return Err(ApiError::bad_request("Song already in library"));
    }

    let row = state
        .store
        .create("user_library", &to_fields(&payload)?)
        .await
        .map_err(map_store)?;
    let entry: UserLibraryEntry = decode(row)?;
    info!(
        id = entry.id,
        user_id = entry.user_id,
        matched_song_id = entry.matched_song_id,
        "library entry created"
    );
    Ok((StatusCode::CREATED, Json(entry)))
}

async fn update_entry(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UserLibraryUpdate>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate().map_err(ApiError::bad_request)?;
    state
        .store
        .get("user_library", id)
        .await
        .map_err(map_store)?
        .ok_or_else(|| ApiError::not_found("Library entry not found"))?;

    let row = state
        .store
        .update("user_library", id, &to_fields(&payload)?)
        .await
        .map_err(map_store)?;
    let entry: UserLibraryEntry = decode(row)?;
    info!(id = entry.id, "library entry updated");
    Ok(Json(entry))
}

async fn remove_entry(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .store
        .get("user_library", id)
        .await
        .map_err(map_store)?
        .ok_or_else(|| ApiError::not_found("Library entry not found"))?;

    state
        .store
        .delete("user_library", id)
        .await
        .map_err(map_store)?;
    info!(id, "library entry deleted");
    Ok(Json(
        json!({"message": "Song removed from library successfully"}),
    ))
}

/// Resolves the entry's matched song (with nested song and lyrics) and the
/// owning user through sequential lookups.
async fn with_details(
    state: &AppState,
    entry: UserLibraryEntry,
) -> Result<UserLibraryWithDetails, ApiError> {
    let matched_song = match state
        .store
        .get("matched", entry.matched_song_id)
        .await
        .map_err(map_store)?
    {
        Some(row) => {
            let matched: Matched = decode(row)?;
            let song = state
                .store
                .get("songs", matched.song_id)
                .await
                .map_err(map_store)?
                .map(decode::<Song>)
                .transpose()?;
            let lyrics = state
                .store
                .get("lyrics", matched.lyrics_id)
                .await
                .map_err(map_store)?
                .map(decode::<Lyrics>)
                .transpose()?;
            Some(MatchedWithDetails {
                matched,
                song,
                lyrics,
                created_by_user: None,
            })
        }
        None => None,
    };

    let user = state
        .store
        .get("users", entry.user_id)
        .await
        .map_err(map_store)?
        .map(decode::<UserRecord>)
        .transpose()?
        .map(User::from);

    Ok(UserLibraryWithDetails {
        entry,
        matched_song,
        user,
    })
}
