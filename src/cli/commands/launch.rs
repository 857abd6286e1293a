//! Opening a freshly written bundle.

use crate::bundler::Error;
use crate::cli::RuntimeConfig;
use crate::error::{BundleError, CliError, Result};
use std::path::Path;
use std::time::Duration;

/// Time Launch Services gets to register a new bundle before it is opened.
const REGISTRATION_DELAY: Duration = Duration::from_secs(2);

/// Opens `app` with `open` after [`REGISTRATION_DELAY`].
pub(super) async fn launch_bundle(app: &Path, config: &RuntimeConfig) -> Result<()> {
    config.progress_println(&format!("Launching: open {}", app.display()));
    tokio::time::sleep(REGISTRATION_DELAY).await;

    let status = tokio::process::Command::new("open")
        .arg(app)
        .status()
        .await
        .map_err(|error| Error::CommandFailed {
            command: "open".to_string(),
            error,
        })?;

    if !status.success() {
        return Err(BundleError::Cli(CliError::ExecutionFailed {
            command: format!("open {}", app.display()),
            reason: format!("exited with {status}"),
        }));
    }

    log::debug!("Launched {}", app.display());
    Ok(())
}
