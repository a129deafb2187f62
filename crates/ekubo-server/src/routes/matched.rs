//! Curated song/lyrics matches.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use ekubo_api::ApiError;
use ekubo_core::{Lyrics, Matched, MatchedCreate, MatchedUpdate, MatchedWithDetails, Song, User, UserRecord};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::routes::{decode, decode_rows, default_limit, map_store, to_fields};
use crate::server::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_matched).post(create_matched))
        .route("/search/existing", get(search_existing))
        .route(
            "/{id}",
            get(get_matched).put(update_matched).delete(delete_matched),
        )
}

#[derive(Debug, Deserialize)]
struct MatchedListQuery {
    q: Option<String>,
    #[serde(default)]
    skip: i64,
    #[serde(default = "default_limit")]
    limit: i64,
}

/// Lists matches for songs whose title equals `q`, with song and lyrics
/// resolved. Without a query there is nothing to look up and the list is
/// empty.
async fn list_matched(
    State(state): State<AppState>,
    Query(query): Query<MatchedListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page = crate::routes::Pagination {
        skip: query.skip,
        limit: query.limit,
    };
    page.validate()?;

    let mut results = Vec::new();
    let Some(q) = query.q.filter(|q| !q.is_empty()) else {
        return Ok(Json(results));
    };

    let title_filter = vec![("title".to_string(), q)];
    let song_rows = state
        .store
        .search("songs", &title_filter, page.skip, page.limit)
        .await
        .map_err(map_store)?;

    for song_row in song_rows {
        let song: Song = decode(song_row)?;
        let match_filter = vec![("song_id".to_string(), song.id.to_string())];
        let match_rows = state
            .store
            .search("matched", &match_filter, 0, 100)
            .await
            .map_err(map_store)?;
        for match_row in match_rows {
            let matched: Matched = decode(match_row)?;
            let lyrics = fetch_lyrics(&state, matched.lyrics_id).await?;
            results.push(MatchedWithDetails {
                matched,
                song: Some(song.clone()),
                lyrics,
                created_by_user: None,
            });
        }
    }
    Ok(Json(results))
}

/// Returns one match with its song, lyrics and creating user resolved by
/// sequential follow-up lookups.
async fn get_matched(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let row = state
        .store
        .get("matched", id)
        .await
        .map_err(map_store)?
        .ok_or_else(|| ApiError::not_found("Matched song not found"))?;
    let matched: Matched = decode(row)?;

    let song = state
        .store
        .get("songs", matched.song_id)
        .await
        .map_err(map_store)?
        .map(decode::<Song>)
        .transpose()?;
    let lyrics = fetch_lyrics(&state, matched.lyrics_id).await?;
    let created_by_user = state
        .store
        .get("users", matched.created_by_user_id)
        .await
        .map_err(map_store)?
        .map(decode::<UserRecord>)
        .transpose()?
        .map(User::from);

    Ok(Json(MatchedWithDetails {
        matched,
        song,
        lyrics,
        created_by_user,
    }))
}

async fn create_matched(
    State(state): State<AppState>,
    Json(payload): Json<MatchedCreate>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate().map_err(ApiError::bad_request)?;
    let row = state
        .store
        .create("matched", &to_fields(&payload)?)
        .await
        .map_err(map_store)?;
    let matched: Matched = decode(row)?;
    info!(
        id = matched.id,
        song_id = matched.song_id,
        lyrics_id = matched.lyrics_id,
        "matched song created"
    );
    Ok((StatusCode::CREATED, Json(matched)))
}

async fn update_matched(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<MatchedUpdate>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate().map_err(ApiError::bad_request)?;
    state
        .store
        .get("matched", id)
        .await
        .map_err(map_store)?
        .ok_or_else(|| ApiError::not_found("Matched song not found"))?;

    let row = state
        .store
        .update("matched", id, &to_fields(&payload)?)
        .await
        .map_err(map_store)?;
    let matched: Matched = decode(row)?;
    info!(id = matched.id, "matched song updated");
    Ok(Json(matched))
}

async fn delete_matched(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .store
        .get("matched", id)
        .await
        .map_err(map_store)?
        .ok_or_else(|| ApiError::not_found("Matched song not found"))?;

    state.store.delete("matched", id).await.map_err(map_store)?;
    info!(id, "matched song deleted");
    Ok(Json(json!({"message": "Matched song deleted successfully"})))
}

#[derive(Debug, Deserialize)]
struct ExistingQuery {
    song_id: Option<i64>,
    lyrics_id: Option<i64>,
    created_by_user_id: Option<i64>,
}

/// Ad hoc multi-field lookup used by clients to check whether a pair has
/// already been curated.
async fn search_existing(
    State(state): State<AppState>,
    Query(query): Query<ExistingQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let mut filters = Vec::new();
    if let Some(song_id) = query.song_id {
        filters.push(("song_id".to_string(), song_id.to_string()));
    }
    if let Some(lyrics_id) = query.lyrics_id {
        filters.push(("lyrics_id".to_string(), lyrics_id.to_string()));
    }
    if let Some(created_by_user_id) = query.created_by_user_id {
        filters.push(("created_by_user_id".to_string(), created_by_user_id.to_string()));
    }

    let rows = state
        .store
        .search("matched", &filters, 0, 100)
        .await
        .map_err(map_store)?;
    Ok(Json(decode_rows::<Matched>(rows)?))
}

async fn fetch_lyrics(state: &AppState, lyrics_id: i64) -> Result<Option<Lyrics>, ApiError> {
    state
        .store
        .get("lyrics", lyrics_id)
        .await
        .map_err(map_store)?
        .map(decode)
        .transpose()
}
