//! Song CRUD plus the lyrics-search and catalog-search passthroughs.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use ekubo_api::ApiError;
use ekubo_core::{Song, SongCreate, SongUpdate};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::routes::{Pagination, decode, decode_rows, default_limit, map_search, map_store, to_fields};
use crate::server::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_songs).post(create_song))
        .route("/lyrics", get(search_lyrics))
        .route("/spotify-tracks", get(search_catalog_tracks))
        .route("/{id}", get(get_song).put(update_song).delete(delete_song))
}

#[derive(Debug, Deserialize)]
struct SongListQuery {
    #[serde(default)]
    skip: i64,
    #[serde(default = "default_limit")]
    limit: i64,
    title: Option<String>,
    artist: Option<String>,
}

async fn list_songs(
    State(state): State<AppState>,
    Query(query): Query<SongListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page = Pagination {
        skip: query.skip,
        limit: query.limit,
    };
    page.validate()?;

    let mut filters = Vec::new();
    if let Some(title) = query.title {
        filters.push(("title".to_string(), title));
    }
    if let Some(artist) = query.artist {
        filters.push(("artist".to_string(), artist));
    }

    let rows = if filters.is_empty() {
        state
            .store
            .list("songs", page.skip, page.limit, None)
            .await
    } else {
        state
            .store
            .search("songs", &filters, page.skip, page.limit)
            .await
    }
    .map_err(map_store)?;

    Ok(Json(decode_rows::<Song>(rows)?))
}

async fn get_song(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let row = state
        .store
        .get("songs", id)
        .await
        .map_err(map_store)?
        .ok_or_else(|| ApiError::not_found("Song not found"))?;
    Ok(Json(decode::<Song>(row)?))
}

async fn create_song(
    State(state): State<AppState>,
    Json(payload): Json<SongCreate>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate().map_err(ApiError::bad_request)?;
    let row = state
        .store
        .create("songs", &to_fields(&payload)?)
        .await
        .map_err(map_store)?;
    let song: Song = decode(row)?;
    info!(id = song.id, title = %song.title, "song created");
    Ok((StatusCode::CREATED, Json(song)))
}

async fn update_song(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<SongUpdate>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate().map_err(ApiError::bad_request)?;
    state
        .store
        .get("songs", id)
        .await
        .map_err(map_store)?
        .ok_or_else(|| ApiError::not_found("Song not found"))?;

    let row = state
        .store
        .update("songs", id, &to_fields(&payload)?)
        .await
        .map_err(map_store)?;
    let song: Song = decode(row)?;
    info!(id = song.id, "song updated");
    Ok(Json(song))
}

async fn delete_song(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .store
        .get("songs", id)
        .await
        .map_err(map_store)?
        .ok_or_else(|| ApiError::not_found("Song not found"))?;

    state.store.delete("songs", id).await.map_err(map_store)?;
    info!(id, "song deleted");
    Ok(Json(json!({"message": "Song deleted successfully"})))
}

#[derive(Debug, Deserialize)]
struct LyricsSearchQuery {
    q: Option<String>,
}

/// Free-text lyrics lookup, passed through to the lyrics database.
async fn search_lyrics(
    State(state): State<AppState>,
    Query(query): Query<LyricsSearchQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let q = query
        .q
        .filter(|q| !q.is_empty())
        .ok_or_else(|| ApiError::bad_request("Query parameter 'q' is required"))?;
    let body = state.lyrics.search(&q).await.map_err(map_search)?;
    Ok(Json(body))
}

fn default_track_limit() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
struct CatalogSearchQuery {
    track_name: Option<String>,
    artist_name: Option<String>,
    #[serde(default = "default_track_limit")]
    track_limit: u32,
}

/// Catalog track search scoped by quoted track and artist names.
async fn search_catalog_tracks(
    State(state): State<AppState>,
    Query(query): Query<CatalogSearchQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let track_name = query
        .track_name
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::bad_request("Query parameter 'track_name' is required"))?;
    let artist_name = query
        .artist_name
        .filter(|a| !a.is_empty())
        .ok_or_else(|| ApiError::bad_request("Query parameter 'artist_name' is required"))?;

    let tracks = state
        .catalog
        .search_tracks(&track_name, &artist_name, query.track_limit)
        .await
        .map_err(map_search)?;
    Ok(Json(json!({"tracks": tracks})))
}
