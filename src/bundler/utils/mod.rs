//! Shared helpers for bundling.

pub mod fs;
