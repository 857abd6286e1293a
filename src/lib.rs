//! # Kodegen Script Bundler
//!
//! Wraps any executable (shell script, Python program, compiled binary) into
//! a macOS `.app` bundle that can be double clicked, given an icon, and
//! registered as the handler of a file extension.
//!
//! ## Features
//!
//! - **In-memory staging**: the bundle is planned in a virtual tree and
//!   written in one step, replacing any previous bundle at the same path
//! - **Icons**: PNG images converted to multi-resolution ICNS
//! - **File types**: one extension exported and claimed with a chosen role
//! - **Terminal mode**: a trampoline that opens the executable in Terminal.app
//!
//! ## Usage
//!
//! ```bash
//! kodegen_bundler_script -e convert.py -i icon.png -x conv
//! kodegen_bundler_script -e server.sh --terminal -d user --launch
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod bundler;
pub mod cli;
pub mod error;

// Re-export main types for public API
pub use bundler::{AppBundle, BundleConfig, BundleLayout, Destination, TypeRole, build};
pub use cli::Args;
pub use error::{BundleError, CliError, Result};
