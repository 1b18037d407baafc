use clap::ValueEnum;
use console::style;
use serde::Serialize;

use crate::error::{Result, SbError, StructuredError};

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable formatted output with colors (default)
    #[default]
    Human,
    /// Pretty-printed JSON
    Json,
    /// Plain text without colors or formatting
    Plain,
}

impl OutputFormat {
    /// Check if this format should use colors
    #[must_use]
    pub const fn use_colors(&self) -> bool {
        matches!(self, Self::Human)
    }

    /// Check if this format is machine-readable
    #[must_use]
    pub const fn is_machine_readable(&self) -> bool {
        matches!(self, Self::Json)
    }
}

pub fn emit_json<T: Serialize>(value: &T) -> Result<()> {
    let payload = serde_json::to_string_pretty(value)?;
    println!("{payload}");
    Ok(())
}

/// Print a command failure in the requested format.
///
/// Machine-readable errors go to stdout so callers parsing JSON see them.
pub fn emit_error(err: &SbError, format: OutputFormat) {
    let structured = StructuredError::from(err);
    if format.is_machine_readable() {
        let payload = serde_json::json!({ "error": true, "details": structured });
        println!("{}", serde_json::to_string_pretty(&payload).unwrap_or_default());
        return;
    }
    if format.use_colors() {
        eprintln!("{} {structured}", style("error:").red().bold());
    } else {
        eprintln!("error: {structured}");
    }
    if !structured.suggestion.is_empty() {
        eprintln!("  hint: {}", structured.suggestion);
    }
}

pub struct HumanLayout {
    lines: Vec<String>,
    key_width: usize,
    styled: bool,
}

impl Default for HumanLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl HumanLayout {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            lines: Vec::new(),
            key_width: 14,
            styled: true,
        }
    }

    /// Layout for a format; plain output drops styling.
    #[must_use]
    pub fn for_format(format: OutputFormat) -> Self {
        let mut layout = Self::new();
        layout.styled = format.use_colors();
        layout
    }

    pub fn title(&mut self, text: &str) -> &mut Self {
        let line = self.bold(text);
        self.lines.push(line);
        self.lines.push(String::new());
        self
    }

    pub fn section(&mut self, text: &str) -> &mut Self {
        let line = self.bold(text);
        self.lines.push(line);
        self.lines.push("-".repeat(text.len().max(3)));
        self
    }

    pub fn kv(&mut self, key: &str, value: &str) -> &mut Self {
        let padded = format!("{key:width$}", width = self.key_width);
        let key = if self.styled {
            style(padded).dim().to_string()
        } else {
            padded
        };
        self.lines.push(format!("{key} {value}"));
        self
    }

    pub fn bullet(&mut self, text: &str) -> &mut Self {
        self.lines.push(format!("- {text}"));
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.lines.push(String::new());
        self
    }

    pub fn push_line(&mut self, line: impl Into<String>) -> &mut Self {
        self.lines.push(line.into());
        self
    }

    #[must_use]
    pub fn build(self) -> String {
        self.lines.join("\n")
    }

    fn bold(&self, text: &str) -> String {
        if self.styled {
            style(text).bold().to_string()
        } else {
            text.to_string()
        }
    }
}

pub fn emit_human(layout: HumanLayout) {
    println!("{}", layout.build());
}
