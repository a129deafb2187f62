//! Line-by-line practice progress and session rollups.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// One recorded attempt at a single lyric line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProgress {
    pub id: i64,
    pub user_id: i64,
    pub matched_song_id: i64,
    #[serde(default)]
    pub practice_session_id: Option<i64>,
    pub line_number: i64,
    pub is_correct: bool,
    pub time_taken_ms: i64,
    #[serde(default)]
    pub attempts_count: Option<i64>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// A bounded interval of practice activity over a matched song's lines.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PracticeSession {
    pub id: i64,
    pub user_id: i64,
    pub matched_song_id: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub ended_at: Option<OffsetDateTime>,
    #[serde(default)]
    pub total_lines: Option<i64>,
    #[serde(default)]
    pub correct_lines: Option<i64>,
    #[serde(default)]
    pub accuracy_percentage: Option<f64>,
}

/// Payload for recording a line attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProgressCreate {
    pub user_id: i64,
    pub matched_song_id: i64,
    pub practice_session_id: Option<i64>,
    pub line_number: i64,
    pub is_correct: bool,
    pub time_taken_ms: i64,
    pub attempts_count: Option<i64>,
}

impl UserProgressCreate {
    pub fn validate(&self) -> Result<(), String> {
        if self.user_id <= 0 || self.matched_song_id <= 0 {
            return Err("user_id and matched_song_id must be > 0".into());
        }
        if self.line_number < 0 {
            return Err("line_number must be >= 0".into());
        }
        if self.time_taken_ms < 0 {
            return Err("time_taken_ms must be >= 0".into());
        }
        if self.attempts_count.is_some_and(|a| a < 1) {
            return Err("attempts_count must be >= 1".into());
        }
        Ok(())
    }
}

/// Payload for starting a practice session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PracticeSessionCreate {
    pub user_id: i64,
    pub matched_song_id: i64,
}

impl PracticeSessionCreate {
    pub fn validate(&self) -> Result<(), String> {
        if self.user_id <= 0 || self.matched_song_id <= 0 {
            return Err("user_id and matched_song_id must be > 0".into());
        }
        Ok(())
    }
}

/// Payload for closing a practice session with its rollups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PracticeSessionClose {
    pub total_lines: i64,
    pub correct_lines: i64,
}

impl PracticeSessionClose {
    pub fn validate(&self) -> Result<(), String> {
        if self.total_lines < 0 || self.correct_lines < 0 {
            return Err("total_lines and correct_lines must be >= 0".into());
        }
        if self.correct_lines > self.total_lines {
            return Err("correct_lines must not exceed total_lines".into());
        }
        Ok(())
    }

    /// Accuracy over the session, as a percentage. Zero lines is 0%.
    pub fn accuracy_percentage(&self) -> f64 {
        if self.total_lines == 0 {
            0.0
        } else {
            self.correct_lines as f64 / self.total_lines as f64 * 100.0
        }
    }
}
