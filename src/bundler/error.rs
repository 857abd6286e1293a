//! Error types for bundler operations.
//!
//! Provides contextual error chaining, filesystem-specific errors with the
//! offending path attached, and the validation failures that abort a bundle
//! build before anything is written.
//!
//! # Features
//!
//! - **Context trait**: Add context to errors similar to anyhow
//! - **ErrorExt trait**: Filesystem operations with automatic path context
//! - **bail! macro**: Early return with formatted error messages
//!
//! # Example
//!
//! ```no_run
//! use kodegen_bundler_script::bundler::{Context, ErrorExt, Result};
//! use std::path::Path;
//!
//! fn read_script(path: &Path) -> Result<Vec<u8>> {
//!     let bytes = std::fs::read(path).fs_context("reading script", path)?;
//!     if bytes.is_empty() {
//!         kodegen_bundler_script::bail!("script {} is empty", path.display());
//!     }
//!     Ok(bytes)
//! }
//!
//! fn first_line(path: &Path) -> Result<String> {
//!     let bytes = read_script(path).context("loading executable")?;
//!     String::from_utf8_lossy(&bytes)
//!         .lines()
//!         .next()
//!         .map(str::to_owned)
//!         .context("script has no lines")
//! }
//! ```

use std::{
    fmt::Display,
    io,
    path::{self, PathBuf},
};
use thiserror::Error as DeriveError;

/// Errors returned by the bundler.
#[derive(Debug, DeriveError)]
#[non_exhaustive]
pub enum Error {
    /// Error with context. Created by the [`Context`] trait.
    #[error("{0}: {1}")]
    Context(String, Box<Self>),

    /// File system error with path context.
    ///
    /// Created by the [`ErrorExt`] trait's `fs_context` method.
    #[error("{context} {path}: {error}")]
    Fs {
        /// Context describing the operation (e.g., "reading icon")
        context: &'static str,
        /// Path that was being accessed
        path: PathBuf,
        /// The underlying I/O error
        error: io::Error,
    },

    /// Child process execution error (e.g. `open`).
    #[error("failed to run command {command}: {error}")]
    CommandFailed {
        /// Command that failed to execute
        command: String,
        /// The underlying error
        error: io::Error,
    },

    /// The executable to bundle does not exist.
    #[error("executable {path} does not exist")]
    SourceNotFound {
        /// Path that was given as the source executable
        path: PathBuf,
    },

    /// A bundle or type identifier failed the reverse-domain check.
    #[error("{identifier} is not a valid domain name as set forth in RFC 1035.")]
    InvalidIdentifier {
        /// The rejected identifier
        identifier: String,
    },

    /// The executable's file name has no characters left after cleaning.
    #[error("executable name {name:?} contains no usable characters (A-Z, a-z, 0-9, '.', '-')")]
    InvalidExecutableName {
        /// Original file name
        name: String,
    },

    /// The icon could not be decoded as an image.
    #[error("could not decode icon {path}: {source}")]
    ImageFormat {
        /// Icon path
        path: PathBuf,
        /// Decoder error
        #[source]
        source: image::ImageError,
    },

    /// The output path is, or contains, a file the bundle is built from.
    #[error("writing {output} would overwrite {source_path}")]
    OutputOverlapsSource {
        /// Planned `.app` path
        output: PathBuf,
        /// Source file inside or at that path
        source_path: PathBuf,
    },

    /// Unknown destination kind.
    #[error("unknown destination '{0}' (expected executable, user or system)")]
    InvalidDestination(String),

    /// Unknown document type role.
    #[error("unknown type role '{0}' (expected Viewer, Editor, Shell or None)")]
    InvalidTypeRole(String),

    /// Generic I/O error.
    #[error("{0}")]
    IoError(#[from] io::Error),

    /// Error walking directory (bundle listing).
    #[error("{0}")]
    WalkdirError(#[from] walkdir::Error),

    /// Path prefix stripping error.
    #[error("{0}")]
    StripError(#[from] path::StripPrefixError),

    /// Handlebars template rendering error.
    #[error("{0}")]
    HandleBarsError(#[from] handlebars::RenderError),

    /// Property list (plist) parsing/writing error.
    #[error("{0}")]
    Plist(#[from] plist::Error),

    /// Generic error with custom message.
    #[error("{0}")]
    GenericError(String),
}

impl Error {
    /// Walks [`Error::Context`] wrappers down to the underlying error.
    pub fn root(&self) -> &Self {
        match self {
            Error::Context(_, inner) => inner.root(),
            other => other,
        }
    }
}

/// Convenient type alias for Result.
pub type Result<T> = std::result::Result<T, Error>;

/// Trait for adding context to errors.
///
/// Similar to `anyhow::Context` but integrated with bundler's Error type.
/// Works with both `Result<T, E>` and `Option<T>`.
pub trait Context<T> {
    /// Add context to an error.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static;

    /// Add context to an error using a closure (lazy evaluation).
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T> Context<T> for Result<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.map_err(|e| Error::Context(context.to_string(), Box::new(e)))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| Error::Context(f().to_string(), Box::new(e)))
    }
}

impl<T> Context<T> for Option<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.ok_or_else(|| Error::GenericError(f().to_string()))
    }
}

/// Extension trait for filesystem operations with automatic path context.
pub trait ErrorExt<T> {
    /// Add filesystem context to an I/O error.
    ///
    /// The `context` should be a present-tense verb phrase describing the operation,
    /// e.g., "reading file", "creating directory", "writing Info.plist".
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.into(),
            error,
        })
    }
}

/// Macro for early return with error.
///
/// Converts the message into a [`Error::GenericError`] and returns immediately.
///
/// ```ignore
/// bail!("operation failed");
/// bail!("invalid value: {}", value);
/// ```
#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::bundler::Error::GenericError(format!($msg)))
    };
    ($err:expr $(,)?) => {
        return Err($crate::bundler::Error::GenericError($err.to_string()))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::bundler::Error::GenericError(format!($fmt, $($arg)*)))
    };
}
