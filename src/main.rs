//! Binary entry point that glues the SQLite-backed domain model to the TUI:
//! bring up file logging, open the database, hydrate the initial app state,
//! and drive the Ratatui event loop until the user exits.
use ticklist::logging::init_logging;
use ticklist::store::data_dir;
use ticklist::{fetch_collections, open_store, run_app, App};

/// Initialize persistence, load cached data, and launch the Ratatui event
/// loop. Returning a `Result` bubbles fatal initialization problems (an
/// unwritable data directory, a corrupt database file) to the terminal
/// instead of crashing silently.
fn main() -> anyhow::Result<()> {
    // Logging is best-effort: a TUI without a log file is still usable, so
    // only the store open below is allowed to abort startup.
    let _logger = data_dir().ok().and_then(|dir| init_logging(&dir).ok());

    let conn = open_store()?;
    let collections = fetch_collections(&conn)?;

    let mut app = App::new(conn, collections);
    run_app(&mut app)
}
