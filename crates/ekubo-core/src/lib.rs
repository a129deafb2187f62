//! # ekubo-core
//!
//! Domain models for the Ekubo API: songs, lyrics and their timed lines,
//! users, curated song/lyrics matches, per-user libraries, and practice
//! progress. Records live in a remote row store and carry a store-assigned
//! `id` and `created_at`; the types here are the typed views route handlers
//! deserialize store rows into, plus the request payloads they validate
//! before writing.
//!
//! Nested "with details" shapes are plain value trees assembled by the
//! handlers through sequential lookups; there are no back-references.

mod library;
mod lyrics;
mod matched;
mod progress;
mod song;
mod user;

pub use library::{UserLibraryCreate, UserLibraryEntry, UserLibraryUpdate, UserLibraryWithDetails};
pub use lyrics::{LyricLine, LyricLineCreate, Lyrics, LyricsCreate, LyricsWithLines};
pub use matched::{Matched, MatchedCreate, MatchedUpdate, MatchedWithDetails};
pub use progress::{
    PracticeSession, PracticeSessionClose, PracticeSessionCreate, UserProgress, UserProgressCreate,
};
pub use song::{Song, SongCreate, SongUpdate};
pub use user::{LoginRequest, SignupRequest, User, UserRecord};
