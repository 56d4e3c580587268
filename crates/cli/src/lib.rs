//! The `skillsync` application: argument parsing, logging, reporting, and
//! exit-code mapping around the reconciliation engine in `skillsync_sync`.

mod app;
mod cli;
mod hook;
mod output;

pub use app::run;
pub use cli::Cli;
