//! macOS application bundler for arbitrary executables.
//!
//! Wraps a script or binary into a `.app` directory macOS can launch with a
//! double click, optionally with an icon and a registered file extension.
//!
//! # Two ways in
//!
//! Incrementally, mirroring how a bundle is configured step by step:
//!
//! ```no_run
//! use kodegen_bundler_script::bundler::{AppBundle, Destination, TypeRole};
//! use std::path::Path;
//!
//! # async fn example() -> kodegen_bundler_script::bundler::Result<()> {
//! let mut bundle = AppBundle::new(Path::new("scripts/convert.py")).await?;
//! bundle.set_display_name("Converter");
//! bundle.set_destination(Destination::User);
//! bundle.set_type_role(TypeRole::Editor);
//! bundle.set_extension("conv")?;
//! let app = bundle.write().await?;
//! # Ok(())
//! # }
//! ```
//!
//! Or all at once from a [`BundleConfig`] via [`build`], which separates
//! planning from the single write step ([`BundleLayout::materialize`]).
//!
//! # Layout
//!
//! | Path | Content |
//! |------|---------|
//! | `Contents/Info.plist` | binary property list |
//! | `Contents/MacOS/<name>` | the executable, mode `0755` |
//! | `Contents/Resources/<icon>.icns` | optional icon |

#![warn(missing_docs)]

mod builder;
mod error;
mod identifier;
pub(crate) mod platform;
pub(crate) mod resources;
mod settings;
pub(crate) mod utils;
mod vfs;

// Public re-exports
pub use builder::{BundleLayout, build};
pub use error::{Context, Error, ErrorExt, Result};
pub use identifier::{BundleIdentifier, MAX_DOMAIN_LEN, is_valid_domain};
pub use platform::macos::app::{AppBundle, clean_executable_name};
pub use platform::macos::icon::{IcnsConverter, IconConverter, icns_file_name};
pub use platform::macos::info_plist::{
    DocumentType, ExportedType, InfoPlist, PACKAGE_TYPE_APPL, PUBLIC_DATA, TypeTagSpecification,
};
pub use resources::scripts::{EXAMPLE_NAME, example_script, launcher_script};
pub use settings::{BundleConfig, DEFAULT_LAUNCHER_NAME, DEFAULT_NAMESPACE, Destination, TypeRole};
pub use utils::fs::list_files;
pub use vfs::{Entry, VirtualTree};
