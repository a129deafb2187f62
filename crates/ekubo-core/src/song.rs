//! Song records from the music catalog.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A song as stored in the remote store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Song {
    pub id: i64,
    pub title: String,
    pub artist: String,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default)]
    pub album_image_url: Option<String>,
    /// Track duration in seconds.
    #[serde(default)]
    pub duration: Option<i64>,
    #[serde(default)]
    pub spotify_id: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Payload for creating a song.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SongCreate {
    pub title: String,
    pub artist: String,
    pub album: Option<String>,
    pub album_image_url: Option<String>,
    pub duration: Option<i64>,
    pub spotify_id: Option<String>,
}

impl SongCreate {
    pub fn validate(&self) -> Result<(), String> {
        if self.title.is_empty() || self.title.len() > 500 {
            return Err("title must be 1-500 characters".into());
        }
        if self.artist.is_empty() || self.artist.len() > 500 {
            return Err("artist must be 1-500 characters".into());
        }
        Ok(())
    }
}

/// Payload for updating a song. All fields optional; the record is replaced
/// with exactly what is submitted (absent fields become null in the store).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SongUpdate {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub album_image_url: Option<String>,
    pub duration: Option<i64>,
    pub spotify_id: Option<String>,
}

impl SongUpdate {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(ref title) = self.title {
            if title.is_empty() || title.len() > 500 {
                return Err("title must be 1-500 characters".into());
            }
        }
        if let Some(ref artist) = self.artist {
            if artist.is_empty() || artist.len() > 500 {
                return Err("artist must be 1-500 characters".into());
            }
        }
        Ok(())
    }
}
