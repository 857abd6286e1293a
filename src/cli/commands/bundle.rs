//! Bundle command implementation.
//!
//! Resolves the executable (given, generated example, or terminal
//! launcher), plans the bundle and writes it.

use crate::bundler::{
    BundleConfig, EXAMPLE_NAME, Error, ErrorExt, build, clean_executable_name, example_script,
    launcher_script, list_files, resources::scripts::write_executable,
};
use crate::cli::{Args, RuntimeConfig};
use crate::error::Result;
use std::path::{Path, PathBuf};

/// Execute bundle command, returning the path of the written `.app`.
pub(super) async fn execute_bundle(args: &Args, config: &RuntimeConfig) -> Result<PathBuf> {
    let executable = match &args.executable {
        Some(path) => path.clone(),
        None => write_example(config).await?,
    };

    let mut bundle_config = BundleConfig {
        namespace: args.namespace.clone(),
        filename: args.filename.clone(),
        display_name: args.display_name.clone(),
        destination: args.destination,
        icon: args.icon.clone(),
        type_role: args.type_role,
        extension: select_extension(args, config),
        ..BundleConfig::new(&executable)
    };

    // The launcher only has to exist until `build` has read it.
    let _scratch = if args.terminal {
        Some(stage_terminal_launcher(&executable, args, &mut bundle_config).await?)
    } else {
        None
    };

    config.verbose_println(&format!("Planning bundle for {}", executable.display()));
    let layout = build(&bundle_config).await?;
    config.progress_println(&format!("Writing {}", layout.output_path.display()));
    let app = layout.materialize().await?;

    print_bundle_summary(&app, config)?;
    Ok(app)
}

/// Writes the demo script into the current directory.
async fn write_example(config: &RuntimeConfig) -> Result<PathBuf> {
    let path = std::env::current_dir()?.join(EXAMPLE_NAME);
    write_executable(&path, &example_script()?).await?;
    let _ = config
        .output()
        .info(&format!("No executable given, generated {}", path.display()));
    Ok(path)
}

/// Picks the extension to register; later `-x` values replace earlier ones.
fn select_extension(args: &Args, config: &RuntimeConfig) -> Option<String> {
    if args.extensions.len() > 1 {
        config.warning_println(&format!(
            "Only one extension can be registered, using '{}' (ignoring {})",
            args.extensions[args.extensions.len() - 1],
            args.extensions[..args.extensions.len() - 1].join(", ")
        ));
    }
    let extension = args.extension()?;
    if extension.is_empty() {
        config.warning_println("Registering an empty file extension");
    }
    Some(extension.to_string())
}

/// Replaces the bundled executable with a trampoline that opens the original
/// in Terminal.app.
///
/// The returned directory holds the trampoline and must outlive planning.
async fn stage_terminal_launcher(
    original: &Path,
    args: &Args,
    bundle_config: &mut BundleConfig,
) -> Result<tempfile::TempDir> {
    let original = std::path::absolute(original).fs_context("resolving executable", original)?;
    match tokio::fs::metadata(&original).await {
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::SourceNotFound { path: original }.into());
        }
        Err(e) => return Err(Error::from(e).into()),
    }

    let original_name = original
        .file_name()
        .map(|name| clean_executable_name(&name.to_string_lossy()))
        .unwrap_or_default();
    if original_name.is_empty() {
        return Err(Error::InvalidExecutableName {
            name: original.display().to_string(),
        }
        .into());
    }

    let scratch = tempfile::tempdir()?;
    let launcher = scratch.path().join(&args.launcher_name);
    write_executable(&launcher, &launcher_script(&original)?).await?;
    log::debug!(
        "Terminal launcher for {} staged at {}",
        original.display(),
        launcher.display()
    );

    bundle_config.executable = launcher;
    bundle_config.origin_directory = original.parent().map(Path::to_path_buf);
    bundle_config.identifier_suffix = Some(original_name.clone());
    if args.display_name.is_none() {
        bundle_config.display_name = Some(format!("{original_name}.app"));
    }
    if args.filename.is_none() {
        bundle_config.filename = Some(original_name);
    }
    bundle_config.preserve.push(original);

    Ok(scratch)
}

fn print_bundle_summary(app: &Path, config: &RuntimeConfig) -> Result<()> {
    if config.is_verbose() {
        let files = list_files(app)?;
        config.verbose_println(&format!(
            "{} file{} in bundle:",
            files.len(),
            if files.len() == 1 { "" } else { "s" }
        ));
        for file in files {
            config.indent(&file.display().to_string());
        }
    }
    config.success_println(&format!("Created {}", app.display()));
    Ok(())
}
