use std::sync::mpsc::Sender;
use std::thread;

use crate::models::VideoRecord;

use super::client::{ApiClient, ApiError};

/// Completion notifications delivered back to the UI thread. All state
/// mutation happens on the event loop; workers only ever send these.
#[derive(Debug)]
pub enum ApiEvent {
    /// The login call finished, one way or the other. Carries the username so
    /// the session can be created without the UI having to remember which
    /// submission is in flight.
    LoginFinished {
        username: String,
        outcome: Result<(), ApiError>,
    },
    /// A search call finished. `seq` is the dispatch token handed out when
    /// the request was issued; the app ignores any event whose token is not
    /// the most recent one, so a slow stale response can never overwrite the
    /// results of a newer query.
    SearchFinished {
        seq: u64,
        outcome: Result<Vec<VideoRecord>, ApiError>,
    },
}

/// Run one login call on a background thread. The password is moved into the
/// thread and dropped as soon as the call returns. A send failure means the
/// UI already shut down, which is fine to ignore.
pub fn spawn_login(client: ApiClient, events: Sender<ApiEvent>, username: String, password: String) {
    thread::spawn(move || {
        let outcome = client.login(&username, &password);
        let _ = events.send(ApiEvent::LoginFinished { username, outcome });
    });
}

/// Run one search call on a background thread, tagged with its dispatch
/// token.
pub fn spawn_search(client: ApiClient, events: Sender<ApiEvent>, seq: u64, query: String) {
    thread::spawn(move || {
        let outcome = client.search(&query);
        let _ = events.send(ApiEvent::SearchFinished { seq, outcome });
    });
}
