//! Terminal output formatting.
//!
//! Every helper honors the global JSON and quiet modes: in JSON mode each
//! call emits one `{"type": ..., "payload": ...}` line instead of styled
//! text, and quiet mode suppresses everything but warnings and errors.

use std::fmt::Display;
use std::sync::OnceLock;

use owo_colors::OwoColorize;
use parking_lot::RwLock;
use serde_json::json;

use crate::domain::{HealthStatus, MomentumStatus, Urgency};

/// Runtime output configuration shared by CLI handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Emit machine-readable JSON output instead of human-readable text.
    pub json: bool,
    /// Suppress non-essential output.
    pub quiet: bool,
    /// Verbosity level (0 = normal, 1+ = increasingly verbose).
    pub verbose: u8,
}

impl OutputConfig {
    #[must_use]
    pub const fn new(json: bool, quiet: bool, verbose: u8) -> Self {
        Self {
            json,
            quiet,
            verbose,
        }
    }
}

static OUTPUT_CONFIG: OnceLock<RwLock<OutputConfig>> = OnceLock::new();

fn config_cell() -> &'static RwLock<OutputConfig> {
    OUTPUT_CONFIG.get_or_init(|| RwLock::new(OutputConfig::default()))
}

fn read_config() -> OutputConfig {
    *config_cell().read()
}

fn regular_output_suppressed(config: OutputConfig) -> bool {
    !config.json && config.quiet
}

fn emit_json_line(kind: &str, payload: serde_json::Value) {
    println!(
        "{}",
        json!({
            "type": kind,
            "payload": payload,
        })
    );
}

/// Apply output settings from global CLI flags.
pub fn configure(config: OutputConfig) {
    *config_cell().write() = config;
}

#[must_use]
pub fn is_json() -> bool {
    read_config().json
}

#[must_use]
pub fn is_quiet() -> bool {
    read_config().quiet
}

#[must_use]
pub fn verbosity() -> u8 {
    read_config().verbose
}

/// Print the application header with name and version.
pub fn header(version: &str) {
    let config = read_config();
    if config.json || regular_output_suppressed(config) {
        return;
    }

    println!("{} {}", "fanpulse".bold(), version.dimmed());
}

/// Print a labeled value.
pub fn field(label: &str, value: impl Display) {
    let config = read_config();
    let value = value.to_string();

    if config.json {
        emit_json_line("field", json!({ "label": label, "value": value }));
        return;
    }
    if regular_output_suppressed(config) {
        return;
    }

    println!("  {:<14} {}", label.dimmed(), value);
}

pub fn success(message: &str) {
    let config = read_config();

    if config.json {
        emit_json_line("success", json!({ "message": message }));
        return;
    }
    if regular_output_suppressed(config) {
        return;
    }

    println!("  {} {}", "✓".green(), message);
}

pub fn warning(message: &str) {
    if is_json() {
        emit_json_line("warning", json!({ "message": message }));
        return;
    }

    println!("  {} {}", "⚠".yellow(), message);
}

pub fn error(message: &str) {
    if is_json() {
        eprintln!(
            "{}",
            json!({
                "type": "error",
                "payload": { "message": message },
            })
        );
        return;
    }

    eprintln!("  {} {}", "×".red(), message);
}

pub fn section(title: &str) {
    let config = read_config();

    if config.json {
        emit_json_line("section", json!({ "title": title }));
        return;
    }
    if regular_output_suppressed(config) {
        return;
    }

    println!();
    println!("{}", title.bold());
}

/// Print a note/hint.
pub fn note(message: &str) {
    let config = read_config();

    if config.json {
        emit_json_line("note", json!({ "message": message }));
        return;
    }
    if regular_output_suppressed(config) {
        return;
    }

    println!("  {}", message.dimmed());
}

/// Print a hint with "hint:" prefix.
pub fn hint(message: &str) {
    let config = read_config();

    if config.json {
        emit_json_line("hint", json!({ "message": message }));
        return;
    }
    if regular_output_suppressed(config) {
        return;
    }

    println!("  {}: {}", "hint".cyan().dimmed(), message.dimmed());
}

/// Print a streamed feed line (`watch`).
pub fn feed_line(timestamp: &str, label: &str, message: &str) {
    let config = read_config();

    if config.json {
        emit_json_line(
            "feed",
            json!({
                "timestamp": timestamp,
                "label": label,
                "message": message,
            }),
        );
        return;
    }
    if regular_output_suppressed(config) {
        return;
    }

    println!("  {} {} {}", timestamp.dimmed(), label.cyan(), message);
}

/// Emit a JSON value directly (for commands that print one document).
pub fn json_output(value: serde_json::Value) {
    println!("{value}");
}

/// Braille spinner animation frames.
const BRAILLE_SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Create and start a progress spinner.
///
/// Returns a hidden progress bar in JSON or quiet mode.
pub fn spinner(message: &str) -> indicatif::ProgressBar {
    let config = read_config();
    if config.json || config.quiet {
        let pb = indicatif::ProgressBar::hidden();
        pb.set_message(message.to_string());
        return pb;
    }

    let pb = indicatif::ProgressBar::new_spinner();
    if let Ok(style) = indicatif::ProgressStyle::default_spinner()
        .tick_strings(BRAILLE_SPINNER)
        .template("  {spinner:.cyan} {msg}")
    {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}

pub fn spinner_success(pb: &indicatif::ProgressBar, message: &str) {
    let config = read_config();
    if config.json || config.quiet {
        pb.finish_and_clear();
        return;
    }

    pb.finish_with_message(format!("{} {}", "✓".green(), message));
}

pub fn spinner_fail(pb: &indicatif::ProgressBar, message: &str) {
    if is_json() {
        pb.finish_and_clear();
        return;
    }

    pb.finish_with_message(format!("{} {}", "×".red(), message));
}

/// Format a highlighted value in cyan.
pub fn highlight(value: impl Display) -> String {
    let value = value.to_string();
    if is_json() {
        return value;
    }
    format!("{}", value.cyan())
}

/// Format a dimmed/muted value.
pub fn muted(value: impl Display) -> String {
    let value = value.to_string();
    if is_json() {
        return value;
    }
    format!("{}", value.dimmed())
}

/// Color an urgency label by severity.
pub fn urgency(value: Urgency) -> String {
    let label = value.as_str();
    if is_json() {
        return label.to_string();
    }
    match value {
        Urgency::Critical => format!("{}", label.red().bold()),
        Urgency::High => format!("{}", label.red()),
        Urgency::Medium => format!("{}", label.yellow()),
        Urgency::Low => format!("{}", label.dimmed()),
    }
}

/// Color a momentum status label.
pub fn momentum_status(value: MomentumStatus) -> String {
    let label = value.as_str();
    if is_json() {
        return label.to_string();
    }
    match value {
        MomentumStatus::Fire => format!("{}", label.red().bold()),
        MomentumStatus::Growing => format!("{}", label.green()),
        MomentumStatus::Stable => label.to_string(),
        MomentumStatus::Declining => format!("{}", label.yellow()),
    }
}

/// Color a health bucket.
pub fn health_status(value: HealthStatus) -> String {
    let label = value.as_str();
    if is_json() {
        return label.to_string();
    }
    match value {
        HealthStatus::Excellent => format!("{}", label.green().bold()),
        HealthStatus::Good => format!("{}", label.green()),
        HealthStatus::Fair => format!("{}", label.yellow()),
        HealthStatus::Poor => format!("{}", label.red()),
    }
}

/// Print a table header row. Widths are in visible characters.
pub fn table_header(columns: &[(&str, usize)]) {
    let config = read_config();
    if config.json || regular_output_suppressed(config) {
        return;
    }

    let mut line = String::from("  ");
    for &(name, width) in columns {
        line.push_str(&format!("{name:<width$} "));
    }
    println!("{}", line.trim_end().dimmed());
}

/// Print a table separator line.
pub fn table_separator(widths: &[usize]) {
    let config = read_config();
    if config.json || regular_output_suppressed(config) {
        return;
    }

    let mut line = String::from("  ");
    for width in widths {
        line.push_str(&"─".repeat(*width));
        line.push(' ');
    }
    println!("{}", line.trim_end().dimmed());
}

/// Print a table data row, truncating cells that exceed their width.
pub fn table_row(cells: &[String], widths: &[usize]) {
    let config = read_config();
    if config.json || regular_output_suppressed(config) {
        return;
    }

    let mut line = String::from("  ");
    for (cell, width) in cells.iter().zip(widths.iter()) {
        line.push_str(&pad(cell, *width));
        line.push(' ');
    }
    println!("{}", line.trim_end());
}

/// Left-align `cell` to `width` visible characters, ignoring ANSI escapes.
fn pad(cell: &str, width: usize) -> String {
    let visible = visible_width(cell);
    if visible > width {
        let truncated: String = cell.chars().take(width.saturating_sub(1)).collect();
        return format!("{truncated}…");
    }
    format!("{cell}{}", " ".repeat(width - visible))
}

fn visible_width(cell: &str) -> usize {
    let mut width = 0;
    let mut in_escape = false;
    for c in cell.chars() {
        match (in_escape, c) {
            (false, '\u{1b}') => in_escape = true,
            (true, 'm') => in_escape = false,
            (true, _) => {}
            (false, _) => width += 1,
        }
    }
    width
}
