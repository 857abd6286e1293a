//! Generated helper executables.
//!
//! Two scripts can stand in for a user supplied executable: a demo
//! `example` used when nothing is given, and the terminal trampoline that
//! reopens the real executable inside Terminal.app.

use crate::bundler::error::{ErrorExt, Result};
use handlebars::Handlebars;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// File name of the generated demo executable.
pub const EXAMPLE_NAME: &str = "example";

const EXAMPLE_TEMPLATE: &str = r#"#!/bin/sh
# Minimal executable to demonstrate {{tool}}.
# Files dropped on the app or opened with it arrive as arguments.
if [ "$#" -gt 0 ]; then
    message="Opened by $*"
else
    message="Hello from {{name}}.app"
fi
/usr/bin/osascript -e "display dialog \"$message\" buttons {\"OK\"} default button 1 with title \"{{name}}\""
"#;

const LAUNCHER_TEMPLATE: &str = "#!/bin/bash\n/usr/bin/open '{{target}}' -a Terminal";

fn render(template: &str, data: &BTreeMap<&str, String>) -> Result<String> {
    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(handlebars::no_escape);
    Ok(handlebars.render_template(template, data)?)
}

/// Contents of the demo executable.
pub fn example_script() -> Result<String> {
    let mut data = BTreeMap::new();
    data.insert("tool", env!("CARGO_PKG_NAME").to_string());
    data.insert("name", EXAMPLE_NAME.to_string());
    render(EXAMPLE_TEMPLATE, &data)
}

/// Contents of a trampoline that opens `target` in Terminal.app.
///
/// `target` should be absolute; the script runs from inside the bundle.
pub fn launcher_script(target: &Path) -> Result<String> {
    let mut data = BTreeMap::new();
    data.insert("target", target.display().to_string());
    render(LAUNCHER_TEMPLATE, &data)
}

/// Writes `contents` to `path` with mode `0o755`.
pub async fn write_executable(path: &Path, contents: &str) -> Result<PathBuf> {
    tokio::fs::write(path, contents)
        .await
        .fs_context("writing script", path)?;
    crate::bundler::utils::fs::set_executable(path).await?;
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launcher_script_exact_text() {
        let script = launcher_script(Path::new("/Users/me/bin/tool.py")).expect("render");
        assert_eq!(
            script,
            "#!/bin/bash\n/usr/bin/open '/Users/me/bin/tool.py' -a Terminal"
        );
    }

    #[test]
    fn test_launcher_script_is_not_html_escaped() {
        let script = launcher_script(Path::new("/tmp/a&b")).expect("render");
        assert!(script.contains("'/tmp/a&b'"));
    }

    #[test]
    fn test_example_script_has_shebang() {
        let script = example_script().expect("render");
        assert!(script.starts_with("#!/bin/sh\n"));
        assert!(script.contains("Hello from example.app"));
    }
}
