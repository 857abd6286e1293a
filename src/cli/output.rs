//! Colored terminal output for bundling runs
//!
//! Status lines go to stdout, errors to stderr.

use std::io::Write;
use termcolor::{BufferWriter, Color, ColorChoice, ColorSpec, WriteColor};

/// Output manager for consistent colored terminal output
#[derive(Debug)]
pub struct OutputManager {
    bufwtr: BufferWriter,
    verbose: bool,
}

impl Clone for OutputManager {
    fn clone(&self) -> Self {
        Self::new(self.verbose)
    }
}

impl OutputManager {
    /// Create a new output manager
    pub fn new(verbose: bool) -> Self {
        Self {
            bufwtr: BufferWriter::stdout(ColorChoice::Auto),
            verbose,
        }
    }

    /// Writes `symbol message`, the symbol in `symbol_color` and the message
    /// in `message_color` when given.
    fn status(
        &self,
        symbol: &str,
        symbol_color: &ColorSpec,
        message: &str,
        message_color: Option<&ColorSpec>,
    ) -> std::io::Result<()> {
        let mut buffer = self.bufwtr.buffer();
        let _ = buffer.set_color(symbol_color);
        let _ = write!(&mut buffer, "{symbol}");
        let _ = buffer.reset();
        if let Some(spec) = message_color {
            let _ = buffer.set_color(spec);
        }
        let _ = writeln!(&mut buffer, " {message}");
        let _ = buffer.reset();
        self.bufwtr.print(&buffer)
    }

    /// Print an info message (normal output)
    pub fn info(&self, message: &str) -> std::io::Result<()> {
        self.status(
            "ℹ",
            ColorSpec::new().set_fg(Some(Color::Cyan)),
            message,
            None,
        )
    }

    /// Print a success message
    pub fn success(&self, message: &str) -> std::io::Result<()> {
        self.status(
            "✓",
            ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true),
            message,
            None,
        )
    }

    /// Print a warning message
    pub fn warn(&self, message: &str) -> std::io::Result<()> {
        let mut text = ColorSpec::new();
        text.set_fg(Some(Color::Yellow));
        self.status(
            "⚠",
            ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true),
            message,
            Some(&text),
        )
    }

    /// Print an error message (always shown)
    pub fn error(&self, message: &str) {
        let bufwtr = BufferWriter::stderr(ColorChoice::Auto);
        let mut buffer = bufwtr.buffer();

        if buffer
            .set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))
            .is_err()
            || write!(&mut buffer, "✗").is_err()
            || buffer.reset().is_err()
            || buffer.set_color(ColorSpec::new().set_fg(Some(Color::Red))).is_err()
            || writeln!(&mut buffer, " {message}").is_err()
            || buffer.reset().is_err()
            || bufwtr.print(&buffer).is_err()
        {
            // Stderr failed - fallback to stdout as last resort
            println!("[STDERR ERROR] ✗ {message}");
        }
    }

    /// Print a verbose message (only in verbose mode)
    pub fn verbose(&self, message: &str) -> std::io::Result<()> {
        if !self.verbose {
            return Ok(());
        }
        self.status(
            "→",
            ColorSpec::new().set_fg(Some(Color::Blue)),
            message,
            None,
        )
    }

    /// Print a progress message
    pub fn progress(&self, message: &str) -> std::io::Result<()> {
        self.status(
            "⋯",
            ColorSpec::new().set_fg(Some(Color::Magenta)),
            message,
            None,
        )
    }

    /// Print indented text (for sub-items)
    pub fn indent(&self, message: &str) -> std::io::Result<()> {
        self.println(&format!("    {message}"))
    }

    /// Print a plain message
    pub fn println(&self, message: &str) -> std::io::Result<()> {
        let mut buffer = self.bufwtr.buffer();
        let _ = writeln!(&mut buffer, "{message}");
        self.bufwtr.print(&buffer)
    }

    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}
