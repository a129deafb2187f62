//! Curated song/lyrics matches.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{Lyrics, Song, User};

/// A curated association between a song and a lyrics record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Matched {
    pub id: i64,
    pub song_id: i64,
    pub lyrics_id: i64,
    pub created_by_user_id: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// A match with its related records resolved by follow-up lookups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchedWithDetails {
    #[serde(flatten)]
    pub matched: Matched,
    #[serde(default)]
    pub song: Option<Song>,
    #[serde(default)]
    pub lyrics: Option<Lyrics>,
    #[serde(default)]
    pub created_by_user: Option<User>,
}

/// Payload for creating a match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchedCreate {
    pub song_id: i64,
    pub lyrics_id: i64,
    pub created_by_user_id: i64,
}

impl MatchedCreate {
    pub fn validate(&self) -> Result<(), String> {
        if self.song_id <= 0 || self.lyrics_id <= 0 || self.created_by_user_id <= 0 {
            return Err("song_id, lyrics_id and created_by_user_id must be > 0".into());
        }
        Ok(())
    }
}

/// Payload for updating a match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchedUpdate {
    pub song_id: Option<i64>,
    pub lyrics_id: Option<i64>,
    pub created_by_user_id: Option<i64>,
}

impl MatchedUpdate {
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("song_id", self.song_id),
            ("lyrics_id", self.lyrics_id),
            ("created_by_user_id", self.created_by_user_id),
        ] {
            if value.is_some_and(|v| v <= 0) {
                return Err(format!("{name} must be > 0"));
            }
        }
        Ok(())
    }
}
