//! Ratatui front-end: the login gate, the search/browse experience, and the
//! event loop that ties user input and background network outcomes together.

mod app;
mod forms;
mod helpers;
mod screens;
mod strings;
mod terminal;

pub use app::App;
pub use terminal::run_app;
