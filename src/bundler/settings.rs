//! Configuration structures for bundling operations.
//!
//! [`BundleConfig`] collects every option of a bundle build up front so the
//! layout can be planned in one step by [`crate::bundler::build`]. The
//! smaller enums are shared with the incremental [`crate::bundler::AppBundle`]
//! API and the command line.

use crate::bundler::error::{Error, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Namespace used in `org.<namespace>.<name>` when none is configured.
pub const DEFAULT_NAMESPACE: &str = "kodegen";

/// File name of the terminal trampoline script when none is configured.
pub const DEFAULT_LAUNCHER_NAME: &str = "terminallauncher";

/// Where the finished `.app` is placed.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, clap::ValueEnum)]
pub enum Destination {
    /// Next to the source executable.
    #[default]
    Executable,
    /// `~/Applications`
    User,
    /// `/Applications`
    System,
}

impl Destination {
    /// Resolves the destination directory.
    ///
    /// `origin` is the directory containing the source executable.
    ///
    /// # Errors
    ///
    /// Fails for [`Destination::User`] when no home directory can be found.
    pub fn resolve(self, origin: &Path) -> Result<PathBuf> {
        match self {
            Destination::Executable => Ok(origin.to_path_buf()),
            Destination::User => dirs::home_dir()
                .map(|home| home.join("Applications"))
                .ok_or_else(|| {
                    Error::GenericError("could not determine the home directory".into())
                }),
            Destination::System => Ok(PathBuf::from("/Applications")),
        }
    }

    /// Lowercase name as accepted on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Destination::Executable => "executable",
            Destination::User => "user",
            Destination::System => "system",
        }
    }
}

impl FromStr for Destination {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "executable" => Ok(Destination::Executable),
            "user" => Ok(Destination::User),
            "system" => Ok(Destination::System),
            other => Err(Error::InvalidDestination(other.to_string())),
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The application's role for a registered document type (`CFBundleTypeRole`).
///
/// Serialized as its plain string name.
#[derive(
    Clone, Copy, Debug, Default, Eq, PartialEq, serde::Serialize, serde::Deserialize, clap::ValueEnum,
)]
#[serde(into = "String", try_from = "String")]
pub enum TypeRole {
    /// Can read and present the type.
    #[default]
    #[value(name = "Viewer")]
    Viewer,
    /// Can read, edit and save the type.
    #[value(name = "Editor")]
    Editor,
    /// Provides runtime services for the type.
    #[value(name = "Shell")]
    Shell,
    /// Declares the type without claiming to open it.
    #[value(name = "None")]
    NoRole,
}

impl TypeRole {
    /// Value written to the property list.
    pub fn as_str(self) -> &'static str {
        match self {
            TypeRole::Viewer => "Viewer",
            TypeRole::Editor => "Editor",
            TypeRole::Shell => "Shell",
            TypeRole::NoRole => "None",
        }
    }
}

impl FromStr for TypeRole {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Viewer" => Ok(TypeRole::Viewer),
            "Editor" => Ok(TypeRole::Editor),
            "Shell" => Ok(TypeRole::Shell),
            "None" => Ok(TypeRole::NoRole),
            other => Err(Error::InvalidTypeRole(other.to_string())),
        }
    }
}

impl From<TypeRole> for String {
    fn from(role: TypeRole) -> Self {
        role.as_str().to_string()
    }
}

impl TryFrom<String> for TypeRole {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl fmt::Display for TypeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Complete description of one bundle build.
///
/// Optional fields keep the defaults derived from the executable.
///
/// ```no_run
/// use kodegen_bundler_script::bundler::{build, BundleConfig, Destination};
///
/// # async fn example() -> kodegen_bundler_script::bundler::Result<()> {
/// let config = BundleConfig {
///     filename: Some("Hello".into()),
///     destination: Destination::User,
///     extension: Some("hello".into()),
///     ..BundleConfig::new("scripts/hello.sh")
/// };
/// let layout = build(&config).await?;
/// let app = layout.materialize().await?;
/// println!("created {}", app.display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct BundleConfig {
    /// The file that becomes `Contents/MacOS/<clean name>`.
    pub executable: PathBuf,
    /// Directory [`Destination::Executable`] resolves to.
    ///
    /// Defaults to the parent of `executable`.
    pub origin_directory: Option<PathBuf>,
    /// Middle label of generated identifiers.
    pub namespace: String,
    /// Output file name without `.app`.
    pub filename: Option<String>,
    /// `CFBundleDisplayName`
    pub display_name: Option<String>,
    /// Last label of `CFBundleIdentifier`.
    pub identifier_suffix: Option<String>,
    /// Where the bundle is written.
    pub destination: Destination,
    /// PNG converted into the bundle icon.
    pub icon: Option<PathBuf>,
    /// Role recorded for the registered extension.
    pub type_role: TypeRole,
    /// File extension to register.
    pub extension: Option<String>,
    /// Further files the output must never replace.
    ///
    /// The executable and icon are always protected.
    pub preserve: Vec<PathBuf>,
}

impl BundleConfig {
    /// Configuration with every option at its default.
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            origin_directory: None,
            namespace: DEFAULT_NAMESPACE.to_string(),
            filename: None,
            display_name: None,
            identifier_suffix: None,
            destination: Destination::default(),
            icon: None,
            type_role: TypeRole::default(),
            extension: None,
            preserve: Vec::new(),
        }
    }
}
