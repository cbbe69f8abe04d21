//! CLI module - argument parsing and subcommand runners

mod args;
pub mod fit;
pub mod predict;

pub use args::*;
