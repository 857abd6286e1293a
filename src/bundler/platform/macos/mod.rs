//! macOS application bundle support.
//!
//! # Modules
//!
//! - [`app`]: the [`app::AppBundle`] assembler
//! - [`info_plist`]: the `Info.plist` model
//! - [`icon`]: PNG to ICNS conversion
//!
//! # Output Location
//!
//! Bundles are written next to the source executable by default, or to
//! `~/Applications` / `/Applications`. A bundle has to be opened once before
//! macOS associates its registered file extension with it.

pub mod app;
pub mod icon;
pub mod info_plist;
