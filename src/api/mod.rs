//! HTTP client for the two collaborator endpoints (login and video search)
//! plus the background workers that keep those calls off the UI thread. The
//! backend owns both contracts; this module only speaks them.

mod client;
mod worker;

pub use client::{ApiClient, ApiError, DEFAULT_BASE_URL};
pub use worker::{spawn_login, spawn_search, ApiEvent};
