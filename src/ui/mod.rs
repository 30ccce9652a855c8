//! Ratatui front end: screen state, modal input modes, and the event loop.

mod app;
mod forms;
mod helpers;
mod list;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
