//! Output helpers shared by commands.

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;

use crate::OutputFormat;

/// Print a value as pretty JSON unless quiet.
///
/// Text output is rendered by each command; this is a no-op for
/// [`OutputFormat::Text`].
pub fn print<T: Serialize>(value: &T, format: OutputFormat, quiet: bool) -> Result<()> {
    if quiet {
        return Ok(());
    }
    if let OutputFormat::Json = format {
        let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
        println!("{json}");
    }
    Ok(())
}

/// Underlined section heading.
pub fn heading(title: &str) {
    println!("{}", title.bold().underline());
}

/// One indented `label: value` line.
pub fn field(label: &str, value: impl std::fmt::Display) {
    println!("  {}: {}", label.cyan(), value);
}

/// `yes` in green or `NO` in red.
pub fn yes_no(value: bool) -> colored::ColoredString {
    if value { "yes".green() } else { "NO".red().bold() }
}
