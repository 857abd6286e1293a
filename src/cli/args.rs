//! Command line argument parsing and validation.
//!
//! Long flag names follow the property list keys they set, e.g.
//! `--CFBundleIconFile`.

use crate::bundler::{DEFAULT_LAUNCHER_NAME, DEFAULT_NAMESPACE, Destination, TypeRole};
use clap::Parser;
use std::path::PathBuf;

/// Wrap an executable into a macOS application bundle
#[derive(Parser, Debug, Clone)]
#[command(
    name = "kodegen_bundler_script",
    version,
    about = "Wrap an executable into a macOS application bundle",
    long_about = "Create a double-clickable .app from a script or binary.

Usage:
  kodegen_bundler_script -e tool.py
  kodegen_bundler_script -e tool.py -i icon.png -x tooldoc --CFBundleTypeRole Editor
  kodegen_bundler_script -e server.sh --terminal -d user --launch

Without -e an example script is generated in the current directory and bundled."
)]
pub struct Args {
    /// Executable to bundle (default: a generated example script)
    #[arg(short = 'e', long = "executable", value_name = "PATH")]
    pub executable: Option<PathBuf>,

    /// Bundle file name without the .app suffix
    #[arg(short = 'f', long = "filename", value_name = "NAME")]
    pub filename: Option<String>,

    /// PNG image converted into the bundle icon
    #[arg(short = 'i', long = "CFBundleIconFile", value_name = "PNG")]
    pub icon: Option<PathBuf>,

    /// Where to write the bundle
    #[arg(
        short = 'd',
        long = "destination",
        value_enum,
        default_value_t = Destination::Executable
    )]
    pub destination: Destination,

    /// File extension the application registers (the last one wins)
    #[arg(short = 'x', long = "extension", value_name = "EXT", num_args = 1..)]
    pub extensions: Vec<String>,

    /// Role claimed for the registered extension
    #[arg(long = "CFBundleTypeRole", value_enum, default_value_t = TypeRole::Viewer)]
    pub type_role: TypeRole,

    /// Name shown by Finder and the Dock
    #[arg(long = "CFBundleDisplayName", value_name = "NAME")]
    pub display_name: Option<String>,

    /// Open the executable in Terminal.app when the bundle starts
    #[arg(long)]
    pub terminal: bool,

    /// Open the bundle once it is written
    #[arg(long)]
    pub launch: bool,

    /// Middle label of the generated org.<namespace>.<name> identifier
    #[arg(
        long,
        env = "KODEGEN_BUNDLE_NAMESPACE",
        default_value = DEFAULT_NAMESPACE,
        value_name = "NAMESPACE"
    )]
    pub namespace: String,

    /// File name of the generated terminal launcher
    #[arg(long, default_value = DEFAULT_LAUNCHER_NAME, value_name = "NAME")]
    pub launcher_name: String,

    /// Show every file of the written bundle
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.namespace.is_empty() {
            return Err("Namespace must not be empty".to_string());
        }

        if self.launcher_name.is_empty() || self.launcher_name.contains('/') {
            return Err(format!(
                "Launcher name '{}' must be a plain file name",
                self.launcher_name
            ));
        }

        if let Some(filename) = &self.filename
            && (filename.is_empty() || filename.contains('/'))
        {
            return Err(format!("File name '{filename}' must be a plain file name"));
        }

        Ok(())
    }

    /// The extension that ends up registered, if any.
    pub fn extension(&self) -> Option<&str> {
        self.extensions.last().map(String::as_str)
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: super::OutputManager,
}

impl RuntimeConfig {
    /// Create runtime configuration
    pub fn new(verbose: bool) -> Self {
        Self {
            output: super::OutputManager::new(verbose),
        }
    }

    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::new(false)
    }
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        Self::new(args.verbose)
    }
}

impl RuntimeConfig {
    /// Print message
    pub fn println(&self, message: &str) {
        let _ = self.output.println(message);
    }

    /// Print message only in verbose mode
    pub fn verbose_println(&self, message: &str) {
        let _ = self.output.verbose(message);
    }

    /// Print error message (always shown)
    pub fn error_println(&self, message: &str) {
        self.output.error(message);
    }

    /// Print warning message
    pub fn warning_println(&self, message: &str) {
        let _ = self.output.warn(message);
    }

    /// Print success message
    pub fn success_println(&self, message: &str) {
        let _ = self.output.success(message);
    }

    /// Print progress message
    pub fn progress_println(&self, message: &str) {
        let _ = self.output.progress(message);
    }

    /// Print indented text
    pub fn indent(&self, message: &str) {
        let _ = self.output.indent(message);
    }

    /// Check if verbose output is enabled
    pub fn is_verbose(&self) -> bool {
        self.output.is_verbose()
    }
}
