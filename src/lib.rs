//! Core library surface for the game video browser TUI.
//!
//! The public modules exposed here provide an intentionally small API so the
//! `bin` target as well as potential external tooling can reuse the same
//! pieces. Keeping the glue logic documented makes it easy to recall why each
//! re-export exists when revisiting the project.
pub mod api;
pub mod logging;
pub mod models;
pub mod ui;

/// The collaborator client used by `main.rs` to reach the login and search
/// endpoints.
pub use api::ApiClient;

/// The two primary domain types that other layers manipulate.
pub use models::{Session, VideoRecord};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
