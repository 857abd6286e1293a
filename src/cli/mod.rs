//! Command line interface for kodegen_bundler_script.
//!
//! Parses the bundling flags, turns them into a [`crate::bundler::BundleConfig`]
//! and reports progress through [`OutputManager`].

mod args;
pub mod commands;
mod output;

pub use args::{Args, RuntimeConfig};
pub use commands::execute_command;
pub use output::OutputManager;

use crate::error::Result;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    execute_command(args).await
}
