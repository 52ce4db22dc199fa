//! Command-line front end: argument parsing and the command handlers.
mod app;
mod args;
mod prompt;

pub use app::*;
pub use args::*;
pub use prompt::*;
