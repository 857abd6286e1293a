//! macOS application bundle (.app) assembly.
//!
//! An [`AppBundle`] is created from an executable, configured through its
//! setters, and consumed by [`AppBundle::write`]. Everything up to the write
//! happens in a [`VirtualTree`]; the only output I/O is the final
//! materialization of the [`BundleLayout`].
//!
//! ```text
//! <name>.app/
//!   Contents/
//!     Info.plist
//!     MacOS/<clean name>
//!     Resources/[<icon>.icns]
//! ```

use super::icon::{IcnsConverter, IconConverter, icns_file_name};
use super::info_plist::InfoPlist;
use crate::bundler::{
    builder::BundleLayout,
    error::{Error, ErrorExt, Result},
    identifier::BundleIdentifier,
    settings::{DEFAULT_NAMESPACE, Destination, TypeRole},
    vfs::VirtualTree,
};
use std::path::{Path, PathBuf};

const CONTENTS: &str = "Contents";
const MACOS_DIR: &str = "Contents/MacOS";
const RESOURCES_DIR: &str = "Contents/Resources";
const INFO_PLIST: &str = "Contents/Info.plist";

/// Deletes every character outside `A-Z`, `a-z`, `0-9`, `.` and `-`.
///
/// ```
/// use kodegen_bundler_script::bundler::clean_executable_name;
///
/// assert_eq!(clean_executable_name("my script (v2).py"), "myscriptv2.py");
/// ```
pub fn clean_executable_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '.' || *c == '-')
        .collect()
}

/// A macOS application bundle under construction.
#[derive(Debug, Clone)]
pub struct AppBundle {
    tree: VirtualTree,
    info: InfoPlist,
    namespace: String,
    executable_name: String,
    origin_directory: PathBuf,
    destination: Destination,
    filename: String,
    type_role: TypeRole,
    sources: Vec<PathBuf>,
}

impl AppBundle {
    /// Stages `executable` into a new bundle using the default namespace.
    pub async fn new(executable: &Path) -> Result<Self> {
        Self::with_namespace(executable, DEFAULT_NAMESPACE).await
    }

    /// Stages `executable` into a new bundle.
    ///
    /// The executable is copied to `Contents/MacOS/<clean name>`, the bundle
    /// is named `<clean name>.app`, placed next to the executable, and
    /// identified as `org.<namespace>.<clean name>`.
    ///
    /// # Errors
    ///
    /// - [`Error::SourceNotFound`] if `executable` does not exist
    /// - [`Error::InvalidExecutableName`] if nothing is left of its name after cleaning
    /// - [`Error::InvalidIdentifier`] if the derived identifier is rejected
    pub async fn with_namespace(executable: &Path, namespace: &str) -> Result<Self> {
        let original_name = executable
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| Error::InvalidExecutableName {
                name: executable.display().to_string(),
            })?;

        let executable_name = clean_executable_name(&original_name);
        if executable_name.is_empty() {
            return Err(Error::InvalidExecutableName {
                name: original_name,
            });
        }
        if executable_name != original_name {
            log::debug!("Executable {original_name:?} is bundled as {executable_name:?}");
        }

        let script = match tokio::fs::read(executable).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::SourceNotFound {
                    path: executable.to_path_buf(),
                });
            }
            Err(e) => return Err(e).fs_context("reading executable", executable),
        };

        let identifier = BundleIdentifier::new(namespace, &executable_name)?;

        let mut tree = VirtualTree::new();
        tree.mkdir(RESOURCES_DIR);
        tree.save_file(Path::new(MACOS_DIR).join(&executable_name), script);

        let display_name = format!("{executable_name}.app");
        let info = InfoPlist::new(&executable_name, &display_name, identifier.as_str());

        Ok(Self {
            tree,
            info,
            namespace: namespace.to_string(),
            origin_directory: executable
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default(),
            destination: Destination::Executable,
            filename: display_name,
            executable_name,
            type_role: TypeRole::default(),
            sources: vec![executable.to_path_buf()],
        })
    }

    /// Cleaned name of the staged executable.
    pub fn executable_name(&self) -> &str {
        &self.executable_name
    }

    /// Metadata as it will be written to `Info.plist`.
    pub fn info(&self) -> &InfoPlist {
        &self.info
    }

    /// Staged contents, without `Info.plist` until the bundle is laid out.
    pub fn tree(&self) -> &VirtualTree {
        &self.tree
    }

    /// Output file name including `.app`.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Sets `CFBundleDisplayName`.
    pub fn set_display_name(&mut self, name: impl Into<String>) {
        self.info.display_name = name.into();
    }

    /// Sets `CFBundleIdentifier` to `org.<namespace>.<suffix>`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidIdentifier`]; the current identifier is left unchanged.
    pub fn set_identifier(&mut self, suffix: &str) -> Result<()> {
        let identifier = BundleIdentifier::new(&self.namespace, suffix)?;
        self.info.identifier = identifier.into();
        Ok(())
    }

    /// Names the output `<name>.app`.
    pub fn set_filename(&mut self, name: &str) {
        self.filename = format!("{name}.app");
    }

    /// Chooses where the bundle is written.
    pub fn set_destination(&mut self, destination: Destination) {
        self.destination = destination;
    }

    /// Directory [`Destination::Executable`] refers to.
    ///
    /// Defaults to the staged executable's parent. Set when the staged file is
    /// a stand-in, such as a terminal trampoline.
    pub fn set_origin_directory(&mut self, directory: impl Into<PathBuf>) {
        self.origin_directory = directory.into();
    }

    /// Converts `png` to ICNS and makes it the bundle icon.
    pub async fn set_icon(&mut self, png: &Path) -> Result<()> {
        self.set_icon_with(png, IcnsConverter).await
    }

    /// Like [`AppBundle::set_icon`] with a specific converter.
    ///
    /// Conversion is CPU-bound and runs on the blocking pool.
    pub async fn set_icon_with<C>(&mut self, png: &Path, converter: C) -> Result<()>
    where
        C: IconConverter + Send + 'static,
    {
        let icon_name = icns_file_name(png)?;
        let source = png.to_path_buf();
        let bytes = tokio::task::spawn_blocking(move || converter.convert(&source))
            .await
            .map_err(|e| Error::GenericError(format!("ICNS encoding task failed: {}", e)))??;

        self.tree
            .save_file(Path::new(RESOURCES_DIR).join(&icon_name), bytes);
        self.info.icon_file = Some(icon_name);
        self.sources.push(png.to_path_buf());
        Ok(())
    }

    /// Marks `path` as a file the written bundle must not replace.
    ///
    /// The executable and icon are tracked automatically.
    pub fn preserve(&mut self, path: impl Into<PathBuf>) {
        self.sources.push(path.into());
    }

    /// Role recorded by the next [`AppBundle::set_extension`].
    pub fn set_type_role(&mut self, role: TypeRole) {
        self.type_role = role;
    }

    /// Registers `extension` as a data file type owned by this application.
    ///
    /// The type is `<bundle identifier>.datafile`, described as
    /// `<display name> datafile`. The extension is recorded as given.
    /// Replaces any previously registered extension.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidIdentifier`] if the type identifier is rejected.
    pub fn set_extension(&mut self, extension: &str) -> Result<()> {
        if extension.is_empty() {
            log::warn!("registering an empty file extension");
        }

        let type_identifier = BundleIdentifier::parse(self.info.identifier.as_str())?.datafile()?;
        self.info
            .set_file_type(type_identifier.as_str(), extension, self.type_role);
        log::debug!("Registered .{} as {}", extension, type_identifier);
        Ok(())
    }

    /// Final location of the bundle.
    pub fn output_path(&self) -> Result<PathBuf> {
        Ok(self
            .destination
            .resolve(&self.origin_directory)?
            .join(&self.filename))
    }

    /// Stages `Info.plist` and fixes the output location.
    pub fn into_layout(mut self) -> Result<BundleLayout> {
        let output_path = self.output_path()?;
        self.tree.mkdir(CONTENTS);
        self.tree.save_file(INFO_PLIST, self.info.to_binary()?);

        Ok(BundleLayout {
            tree: self.tree,
            output_path,
            executable: Path::new(MACOS_DIR).join(&self.executable_name),
            sources: self.sources,
        })
    }

    /// Writes the bundle, replacing anything already at the output path.
    ///
    /// Returns the path of the `.app`.
    pub async fn write(self) -> Result<PathBuf> {
        self.into_layout()?.materialize().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn bundle_for(name: &str) -> (tempfile::TempDir, AppBundle) {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join(name);
        std::fs::write(&path, "#!/bin/sh\necho hi\n").expect("write script");
        let bundle = AppBundle::new(&path).await.expect("bundle");
        (tmp, bundle)
    }

    #[test]
    fn test_clean_executable_name() {
        assert_eq!(clean_executable_name("app"), "app");
        assert_eq!(clean_executable_name("my_app v1.2-beta!"), "myappv1.2-beta");
        assert_eq!(clean_executable_name("πρόγραμμα"), "");
    }

    #[tokio::test]
    async fn test_initialize_defaults() {
        let (tmp, bundle) = bundle_for("my tool.sh").await;

        assert_eq!(bundle.executable_name(), "mytool.sh");
        assert_eq!(bundle.filename(), "mytool.sh.app");
        assert_eq!(bundle.info().executable, "mytool.sh");
        assert_eq!(bundle.info().package_type, "APPL");
        assert_eq!(bundle.info().display_name, "mytool.sh.app");
        assert_eq!(bundle.info().identifier, "org.kodegen.mytool.sh");
        assert!(bundle.tree().is_dir("Contents/Resources"));
        assert_eq!(
            bundle.tree().file("Contents/MacOS/mytool.sh"),
            Some(&b"#!/bin/sh\necho hi\n"[..])
        );
        assert_eq!(
            bundle.output_path().ok(),
            Some(tmp.path().join("mytool.sh.app"))
        );
    }

    #[tokio::test]
    async fn test_missing_source() {
        let err = AppBundle::new(Path::new("/nonexistent/dir/app")).await.unwrap_err();
        assert!(matches!(err, Error::SourceNotFound { .. }));
    }

    #[tokio::test]
    async fn test_unusable_name() {
        let err = AppBundle::new(Path::new("/tmp/___")).await.unwrap_err();
        assert!(matches!(err, Error::InvalidExecutableName { .. }));
    }

    #[tokio::test]
    async fn test_invalid_derived_identifier() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("a--b");
        std::fs::write(&path, "x").expect("write");
        let err = AppBundle::new(&path).await.unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidIdentifier { ref identifier } if identifier == "org.kodegen.a--b"
        ));
    }

    #[tokio::test]
    async fn test_set_identifier_keeps_old_value_on_failure() {
        let (_tmp, mut bundle) = bundle_for("app").await;
        bundle.set_identifier("tool").expect("valid");
        assert_eq!(bundle.info().identifier, "org.kodegen.tool");

        assert!(bundle.set_identifier("bad..tool").is_err());
        assert_eq!(bundle.info().identifier, "org.kodegen.tool");
    }

    #[tokio::test]
    async fn test_extension_uses_role_at_call_time() {
        let (_tmp, mut bundle) = bundle_for("app").await;
        bundle.set_display_name("App");
        bundle.set_extension("foo").expect("extension");
        bundle.set_type_role(TypeRole::Editor);

        let info = bundle.info();
        assert_eq!(info.document_types[0].role, TypeRole::Viewer);
        assert_eq!(info.document_types[0].type_name, "App datafile");
        assert_eq!(
            info.document_types[0].content_types,
            vec!["org.kodegen.app.datafile".to_string()]
        );
        assert_eq!(info.exported_types[0].tag_specification.filename_extension, "foo");

        bundle.set_extension("foo").expect("extension");
        assert_eq!(bundle.info().document_types[0].role, TypeRole::Editor);
    }

    #[tokio::test]
    async fn test_extension_is_recorded_verbatim() {
        let (_tmp, mut bundle) = bundle_for("app").await;
        bundle.set_extension(".foo").expect("extension");
        assert_eq!(
            bundle.info().exported_types[0].tag_specification.filename_extension,
            ".foo"
        );
    }

    #[tokio::test]
    async fn test_destinations() {
        let (tmp, mut bundle) = bundle_for("app").await;
        bundle.set_filename("Renamed");

        bundle.set_destination(Destination::System);
        assert_eq!(
            bundle.output_path().ok(),
            Some(PathBuf::from("/Applications/Renamed.app"))
        );

        bundle.set_destination(Destination::Executable);
        bundle.set_origin_directory(tmp.path().join("elsewhere"));
        assert_eq!(
            bundle.output_path().ok(),
            Some(tmp.path().join("elsewhere/Renamed.app"))
        );
    }

    #[tokio::test]
    async fn test_into_layout_stages_info_plist() {
        let (tmp, bundle) = bundle_for("app").await;
        let layout = bundle.into_layout().expect("layout");

        let bytes = layout.tree.file("Contents/Info.plist").expect("plist staged");
        let info = InfoPlist::from_bytes(bytes).expect("parse plist");
        assert_eq!(info.executable, "app");
        assert_eq!(layout.executable, PathBuf::from("Contents/MacOS/app"));
        assert_eq!(layout.sources, vec![tmp.path().join("app")]);
    }
}
