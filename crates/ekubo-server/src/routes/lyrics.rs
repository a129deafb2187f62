//! Lyrics CRUD and their timed lines.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use ekubo_api::ApiError;
use ekubo_core::{LyricLine, LyricLineCreate, Lyrics, LyricsCreate, LyricsWithLines};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::routes::{Pagination, decode, decode_rows, default_limit, map_store, to_fields};
use crate::server::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_lyrics).post(create_lyrics))
        .route(
            "/{id}",
            get(get_lyrics).put(update_lyrics).delete(delete_lyrics),
        )
        .route("/{id}/lines", get(list_lines).post(create_line))
}

#[derive(Debug, Deserialize)]
struct LyricsListQuery {
    #[serde(default)]
    skip: i64,
    #[serde(default = "default_limit")]
    limit: i64,
    synced_lyrics: Option<String>,
}

async fn list_lyrics(
    State(state): State<AppState>,
    Query(query): Query<LyricsListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page = Pagination {
        skip: query.skip,
        limit: query.limit,
    };
    page.validate()?;

    let rows = match query.synced_lyrics {
        Some(content) if !content.is_empty() => {
            let filters = vec![("synced_lyrics".to_string(), content)];
            state
                .store
                .search("lyrics", &filters, page.skip, page.limit)
                .await
        }
        _ => state.store.list("lyrics", page.skip, page.limit, None).await,
    }
    .map_err(map_store)?;
    Ok(Json(decode_rows::<Lyrics>(rows)?))
}

/// Returns the lyrics record together with all its lines, joined by a
/// follow-up lookup on the child table.
async fn get_lyrics(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let row = state
        .store
        .get("lyrics", id)
        .await
        .map_err(map_store)?
        .ok_or_else(|| ApiError::not_found("Lyrics not found"))?;
    let lyrics: Lyrics = decode(row)?;
    let lyric_lines = fetch_lines(&state, id).await?;
    Ok(Json(LyricsWithLines {
        lyrics,
        lyric_lines,
    }))
}

async fn create_lyrics(
    State(state): State<AppState>,
    Json(payload): Json<LyricsCreate>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate().map_err(ApiError::bad_request)?;
    let row = state
        .store
        .create("lyrics", &to_fields(&payload)?)
        .await
        .map_err(map_store)?;
    let lyrics: Lyrics = decode(row)?;
    info!(id = lyrics.id, "lyrics created");
    Ok((StatusCode::CREATED, Json(lyrics)))
}

async fn update_lyrics(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<LyricsCreate>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate().map_err(ApiError::bad_request)?;
    state
        .store
        .get("lyrics", id)
        .await
        .map_err(map_store)?
        .ok_or_else(|| ApiError::not_found("Lyrics not found"))?;

    let row = state
        .store
        .update("lyrics", id, &to_fields(&payload)?)
        .await
        .map_err(map_store)?;
    let lyrics: Lyrics = decode(row)?;
    info!(id = lyrics.id, "lyrics updated");
    Ok(Json(lyrics))
}

async fn delete_lyrics(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .store
        .get("lyrics", id)
        .await
        .map_err(map_store)?
        .ok_or_else(|| ApiError::not_found("Lyrics not found"))?;

    state.store.delete("lyrics", id).await.map_err(map_store)?;
    info!(id, "lyrics deleted");
    Ok(Json(json!({"message": "Lyrics deleted successfully"})))
}

async fn list_lines(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .store
        .get("lyrics", id)
        .await
        .map_err(map_store)?
        .ok_or_else(|| ApiError::not_found("Lyrics not found"))?;
    Ok(Json(fetch_lines(&state, id).await?))
}

/// Adds one line to an existing lyrics record. The owning id comes from
/// the path, overriding anything in the payload.
async fn create_line(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<LyricLineCreate>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate().map_err(ApiError::bad_request)?;
    state
        .store
        .get("lyrics", id)
        .await
        .map_err(map_store)?
        .ok_or_else(|| ApiError::not_found("Lyrics not found"))?;

    let mut fields = to_fields(&payload)?;
    fields["lyrics_id"] = json!(id);
    let row = state
        .store
        .create("lyric_lines", &fields)
        .await
        .map_err(map_store)?;
    let line: LyricLine = decode(row)?;
    info!(id = line.id, lyrics_id = id, "lyric line created");
    Ok((StatusCode::CREATED, Json(line)))
}

async fn fetch_lines(state: &AppState, lyrics_id: i64) -> Result<Vec<LyricLine>, ApiError> {
    let filters = vec![("lyrics_id".to_string(), lyrics_id.to_string())];
    let rows = state
        .store
        .search("lyric_lines", &filters, 0, 1000)
        .await
        .map_err(map_store)?;
    decode_rows(rows)
}
