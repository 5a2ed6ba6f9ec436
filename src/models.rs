//! Domain models that mirror the backend's wire format and get passed
//! throughout the TUI. The intent is that these types stay light-weight data
//! holders so other layers can focus on presentation and transport logic.
//! Keeping the commentary here means later refactors can reconstruct the
//! assumptions even if other context is lost.

use serde::Deserialize;

/// Identity of the currently logged-in user. A `Session` only exists while
/// the user is authenticated; the application starts without one and the sole
/// way to obtain one is a successful credential submission against the login
/// collaborator. Dropping the session (logout) is a full reset.
#[derive(Debug, Clone)]
pub struct Session {
    /// Username exactly as the user typed it on the login form. Shown in the
    /// header while browsing.
    pub username: String,
}

impl Session {
    /// Build a session for the given username after the backend accepted the
    /// credentials.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
/// A single searchable/playable video as returned by the search collaborator.
/// Records are immutable once received; identity is `id`. The result list
/// keeps the backend's order — relevance ranking is the backend's business
/// and we never re-sort client-side.
pub struct VideoRecord {
    /// Backend-assigned identifier. Selection in the detail view references
    /// records by this id rather than by position so a replaced result list
    /// cannot silently point the detail view at a different video.
    pub id: String,
    /// Title displayed on cards and in the detail view.
    pub title: String,
    /// Publishing channel name.
    pub channel: String,
    /// URL of the playable media resource. Handed to the operating system's
    /// default handler for playback; the terminal never streams it itself.
    pub video_url: String,
    /// Pre-formatted duration string (for example "12:34") rendered as a
    /// badge on cards. Kept as text because the backend owns the formatting.
    pub duration: String,
    /// Total view count.
    pub views: u64,
    /// Pre-formatted upload date string, displayed verbatim.
    pub upload_date: String,
    /// Full description shown only in the detail view.
    pub description: String,
    /// Ordered tag labels. Order is meaningful and preserved end to end.
    pub tags: Vec<String>,
}
