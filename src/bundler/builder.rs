//! Bundle planning and materialization.
//!
//! [`build`] turns a complete [`BundleConfig`] into a [`BundleLayout`]
//! without writing anything. [`BundleLayout::materialize`] is the single step
//! that touches the output location.
//!
//! # Example
//!
//! ```no_run
//! use kodegen_bundler_script::bundler::{build, BundleConfig, TypeRole};
//!
//! # async fn example() -> kodegen_bundler_script::bundler::Result<()> {
//! let config = BundleConfig {
//!     icon: Some("media/icon.png".into()),
//!     extension: Some("s2bfile".into()),
//!     type_role: TypeRole::Editor,
//!     ..BundleConfig::new("tools/convert.py")
//! };
//!
//! let layout = build(&config).await?;
//! println!("will write {}", layout.output_path.display());
//! layout.materialize().await?;
//! # Ok(())
//! # }
//! ```

use crate::bundler::{
    error::{Context, Error, Result},
    platform::macos::app::AppBundle,
    settings::BundleConfig,
    utils::fs,
    vfs::VirtualTree,
};
use std::path::PathBuf;

/// A fully planned bundle: its contents and where they go.
#[derive(Debug, Clone)]
pub struct BundleLayout {
    /// Complete bundle contents, `Info.plist` included.
    pub tree: VirtualTree,
    /// The `.app` directory to create.
    pub output_path: PathBuf,
    /// Bundle-relative path of the file that gets mode `0o755`.
    pub executable: PathBuf,
    /// Files the bundle was built from; none may lie at or below `output_path`.
    pub sources: Vec<PathBuf>,
}

impl BundleLayout {
    /// Writes the bundle to [`BundleLayout::output_path`].
    ///
    /// Anything already at that path is removed first, so the result never
    /// contains files from an earlier bundle.
    ///
    /// # Errors
    ///
    /// [`Error::OutputOverlapsSource`] if that removal would delete one of
    /// [`BundleLayout::sources`]; nothing is touched in that case.
    pub async fn materialize(&self) -> Result<PathBuf> {
        log::info!("Bundling at {}", self.output_path.display());

        self.ensure_sources_survive().await?;
        fs::remove_existing(&self.output_path).await?;
        self.tree.write_all_to_disk(&self.output_path).await?;
        fs::set_executable(&self.output_path.join(&self.executable)).await?;

        Ok(self.output_path.clone())
    }

    async fn ensure_sources_survive(&self) -> Result<()> {
        let Some(output) = fs::resolve_existing(&self.output_path).await? else {
            return Ok(());
        };
        for source in &self.sources {
            if let Some(source) = fs::resolve_existing(source).await?
                && source.starts_with(&output)
            {
                return Err(Error::OutputOverlapsSource {
                    output: self.output_path.clone(),
                    source_path: source,
                });
            }
        }
        Ok(())
    }
}

/// Plans the bundle described by `config`.
///
/// Reads the executable and the icon; writes nothing. Options are applied in
/// the order destination, file name, display name, identifier, icon, type
/// role, extension, so the registered file type sees the final display name,
/// identifier and role.
pub async fn build(config: &BundleConfig) -> Result<BundleLayout> {
    let mut bundle = AppBundle::with_namespace(&config.executable, &config.namespace).await?;

    for path in &config.preserve {
        bundle.preserve(path);
    }
    if let Some(directory) = &config.origin_directory {
        bundle.set_origin_directory(directory);
    }
    bundle.set_destination(config.destination);
    if let Some(filename) = &config.filename {
        bundle.set_filename(filename);
    }
    if let Some(display_name) = &config.display_name {
        bundle.set_display_name(display_name.as_str());
    }
    if let Some(suffix) = &config.identifier_suffix {
        bundle.set_identifier(suffix)?;
    }
    if let Some(icon) = &config.icon {
        bundle
            .set_icon(icon)
            .await
            .with_context(|| format!("adding icon {}", icon.display()))?;
    }
    bundle.set_type_role(config.type_role);
    if let Some(extension) = &config.extension {
        bundle
            .set_extension(extension)
            .with_context(|| format!("registering extension {extension:?}"))?;
    }

    bundle.into_layout()
}
