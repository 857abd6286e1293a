//! Platform-specific bundle formats.
//!
//! Only the macOS `.app` layout is produced. The bundler itself runs on any
//! Unix host; nothing here calls macOS APIs.

pub mod macos;
