//! Binary entry point that glues the HTTP-backed video catalog to the TUI.
//! Summarizing the bootstrapping pipeline here keeps the intent obvious when
//! revisiting the code: we bring up the operational log, build the backend
//! client, and drive the Ratatui event loop until the user exits.
use game_video_browser::{logging, run_app, ApiClient, App};

/// Initialize logging, construct the collaborator client, and launch the
/// Ratatui event loop.
///
/// Returning a `Result` bubbles up fatal initialization problems (for example
/// the user removing the writable home directory) to the terminal instead of
/// crashing silently.
fn main() -> anyhow::Result<()> {
    let log_path = logging::init()?;
    tracing::info!(log = %log_path.display(), "game video browser starting");

    let client = ApiClient::default();
    let mut app = App::new(client);
    run_app(&mut app)
}
