//! Per-user library entries.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{MatchedWithDetails, User};

/// A saved reference from a user to a matched song.
///
/// A given (user_id, matched_song_id) pair should exist at most once; the
/// store does not enforce that, the add-to-library handler checks it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserLibraryEntry {
    pub id: i64,
    pub user_id: i64,
    pub matched_song_id: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// A library entry with its matched song and user resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserLibraryWithDetails {
    #[serde(flatten)]
    pub entry: UserLibraryEntry,
    #[serde(default)]
    pub matched_song: Option<MatchedWithDetails>,
    #[serde(default)]
    pub user: Option<User>,
}

/// Payload for adding a matched song to a user's library.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserLibraryCreate {
    pub user_id: i64,
    pub matched_song_id: i64,
}

impl UserLibraryCreate {
    pub fn validate(&self) -> Result<(), String> {
        if self.user_id <= 0 || self.matched_song_id <= 0 {
            return Err("user_id and matched_song_id must be > 0".into());
        }
        Ok(())
    }
}

/// Payload for updating a library entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserLibraryUpdate {
    pub user_id: Option<i64>,
    pub matched_song_id: Option<i64>,
}

impl UserLibraryUpdate {
    pub fn validate(&self) -> Result<(), String> {
        if self.user_id.is_some_and(|v| v <= 0) {
            return Err("user_id must be > 0".into());
        }
        if self.matched_song_id.is_some_and(|v| v <= 0) {
            return Err("matched_song_id must be > 0".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn library_create_rejects_non_positive_ids() {
        let payload = UserLibraryCreate {
            user_id: 1,
            matched_song_id: -2,
        };
        assert!(payload.validate().is_err());

        let payload = UserLibraryCreate {
            user_id: 1,
            matched_song_id: 9,
        };
        assert!(payload.validate().is_ok());
    }
}
