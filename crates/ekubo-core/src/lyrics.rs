//! Lyrics records and their timed lines.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A lyrics record holding the raw timed-lyrics text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Lyrics {
    pub id: i64,
    pub synced_lyrics: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// One timed line belonging to a lyrics record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LyricLine {
    pub id: i64,
    pub lyrics_id: i64,
    #[serde(default)]
    pub start_time_ms: Option<i64>,
    #[serde(default)]
    pub end_time_ms: Option<i64>,
    pub text_content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Lyrics together with all of its lines, ordered by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LyricsWithLines {
    #[serde(flatten)]
    pub lyrics: Lyrics,
    #[serde(default)]
    pub lyric_lines: Vec<LyricLine>,
}

/// Payload for creating a lyrics record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LyricsCreate {
    pub synced_lyrics: String,
}

impl LyricsCreate {
    pub fn validate(&self) -> Result<(), String> {
        if self.synced_lyrics.is_empty() {
            return Err("synced_lyrics must not be empty".into());
        }
        Ok(())
    }
}

/// Payload for creating a lyric line. The owning lyrics id comes from the
/// request path, not the payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LyricLineCreate {
    pub start_time_ms: Option<i64>,
    pub end_time_ms: Option<i64>,
    pub text_content: String,
}

impl LyricLineCreate {
    pub fn validate(&self) -> Result<(), String> {
        if self.text_content.is_empty() {
            return Err("text_content must not be empty".into());
        }
        if self.start_time_ms.is_some_and(|t| t < 0) {
            return Err("start_time_ms must be >= 0".into());
        }
        if self.end_time_ms.is_some_and(|t| t < 0) {
            return Err("end_time_ms must be >= 0".into());
        }
        Ok(())
    }
}
