//! Error types for kodegen_bundler_script operations.
//!
//! Library failures arrive as [`crate::bundler::Error`]; this module wraps them
//! together with command line problems and attaches recovery suggestions.

use thiserror::Error;

/// Result type alias for kodegen_bundler_script operations
pub type Result<T> = std::result::Result<T, BundleError>;

/// Main error type for all kodegen_bundler_script operations
#[derive(Error, Debug)]
pub enum BundleError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// Bundler errors
    #[error("Bundler error: {0}")]
    Bundler(#[from] crate::bundler::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Command execution failed
    #[error("Command execution failed: {command} - {reason}")]
    ExecutionFailed {
        /// Command that failed
        command: String,
        /// Reason for the error
        reason: String,
    },
}

impl BundleError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        use crate::bundler::Error;

        match self {
            BundleError::Bundler(e) => match e.root() {
                Error::SourceNotFound { path } => vec![
                    format!("Check that {} exists", path.display()),
                    "Pass the executable with -e/--executable".to_string(),
                ],
                Error::InvalidIdentifier { .. } => vec![
                    "Use only letters, digits, '.' and '-' in names and identifiers".to_string(),
                    "Avoid '--' and '..' sequences".to_string(),
                    "Choose a different --namespace or rename the executable".to_string(),
                ],
                Error::InvalidExecutableName { .. } => vec![
                    "Rename the executable so its name contains letters or digits".to_string(),
                ],
                Error::ImageFormat { path, .. } => vec![
                    format!("Check that {} is a valid PNG image", path.display()),
                    "Use a square image of at least 1024x1024 pixels".to_string(),
                ],
                Error::OutputOverlapsSource { source_path, .. } => vec![
                    format!("Keep {} outside the bundle path", source_path.display()),
                    "Choose a different -f/--filename or -d/--destination".to_string(),
                ],
                Error::Fs { path, .. } => vec![format!(
                    "Check permissions for {}",
                    path.display()
                )],
                Error::CommandFailed { command, .. } => {
                    vec![format!("Make sure `{command}` is available on this system")]
                }
                _ => vec!["Check the error message above for specific details".to_string()],
            },
            BundleError::Cli(CliError::InvalidArguments { .. }) => {
                vec!["Run with --help to see the accepted arguments".to_string()]
            }
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_source_not_found_suggestions_name_the_path() {
        let err = BundleError::from(crate::bundler::Error::SourceNotFound {
            path: PathBuf::from("/tmp/missing.sh"),
        });
        let suggestions = err.recovery_suggestions();
        assert!(suggestions.iter().any(|s| s.contains("/tmp/missing.sh")));
    }

    #[test]
    fn test_suggestions_look_through_context() {
        use crate::bundler::Context;

        let inner: crate::bundler::Result<()> = Err(crate::bundler::Error::InvalidIdentifier {
            identifier: "org.kodegen.a--b".into(),
        });
        let err = BundleError::from(inner.context("setting identifier").unwrap_err());
        let suggestions = err.recovery_suggestions();
        assert!(suggestions.iter().any(|s| s.contains("'--'")));
    }
}
