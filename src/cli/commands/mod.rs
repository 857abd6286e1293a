//! Command execution: bundle the executable, then optionally launch it.

mod bundle;
mod launch;

use crate::cli::{Args, RuntimeConfig};
use crate::error::Result;

use bundle::execute_bundle;
use launch::launch_bundle;

/// Execute the bundling run described by parsed arguments
pub async fn execute_command(args: Args) -> Result<i32> {
    if let Err(validation_error) = args.validate() {
        let output = super::OutputManager::new(false);
        output.error(&format!("Invalid arguments: {validation_error}"));
        return Ok(1);
    }

    let config = RuntimeConfig::from(&args);

    let result = async {
        let app = execute_bundle(&args, &config).await?;
        if args.launch {
            launch_bundle(&app, &config).await?;
        }
        Ok::<_, crate::error::BundleError>(())
    }
    .await;

    match result {
        Ok(()) => Ok(0),
        Err(e) => {
            config.error_println(&format!("Bundling failed: {e}"));

            let suggestions = e.recovery_suggestions();
            if !suggestions.is_empty() {
                config.println("\n💡 Recovery suggestions:");
                for suggestion in suggestions {
                    config.println(&format!("  • {suggestion}"));
                }
            }

            Ok(1)
        }
    }
}
