//! Output formatting for CLI commands.
//!
//! Every command prints either human-readable text or pretty JSON for
//! programmatic use.
//!
//! Submodules:
//! - [`color`]: Color and styling helpers (semantic colors, icons)
//! - [`tree`]: Hierarchy tree rendering with ASCII/Unicode connectors

pub mod color;
pub mod tree;

use crate::domain::Venue;
use crate::resolver::SovereignVenue;
use serde::Serialize;
use serde_json::Value;
use std::env;
use std::io::{self, Write};

pub use color::{error, success, warning};
pub use tree::{VenueTreeNode, build_tree, print_venue_tree};

use color::{bold, colorize_id, colorize_template, dimmed, venue_icon};

// ============================================================================
// Output Configuration
// ============================================================================

/// Configuration for output formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Whether to use ASCII-only icons and connectors instead of Unicode.
    pub use_ascii: bool,
    /// Whether to use colors in output.
    pub use_colors: bool,
}

impl OutputConfig {
    /// Create a new OutputConfig with explicit values.
    pub fn new(use_ascii: bool, use_colors: bool) -> Self {
        Self {
            use_ascii,
            use_colors,
        }
    }

    /// Create an OutputConfig by reading from environment variables.
    ///
    /// Reads:
    /// - `VENUE_GRAPH_ASCII`: Set to "1" or "true" for ASCII-only output (default: false)
    /// - `NO_COLOR`: Standard env var to disable colors (any value disables colors)
    /// - `VENUE_GRAPH_COLOR`: Set to "0" or "false" to disable colors (default: true)
    pub fn from_env() -> Self {
        let use_ascii = match env::var("VENUE_GRAPH_ASCII") {
            Ok(v) if v == "1" || v.eq_ignore_ascii_case("true") => true,
            Ok(v) if v == "0" || v.eq_ignore_ascii_case("false") || v.is_empty() => false,
            Ok(v) => {
                tracing::warn!(
                    env_var = "VENUE_GRAPH_ASCII",
                    value = %v,
                    "Invalid value (expected '1', 'true', '0', or 'false'), using default"
                );
                false
            }
            Err(_) => false,
        };

        // Respect NO_COLOR (https://no-color.org/)
        let use_colors = env::var("NO_COLOR").is_err()
            && env::var("VENUE_GRAPH_COLOR")
                .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
                .unwrap_or(true);

        Self {
            use_ascii,
            use_colors,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            use_ascii: false,
            use_colors: true,
        }
    }
}

/// Output format mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text format
    Text,
    /// JSON format for programmatic use
    Json,
}

// ============================================================================
// Public Dispatch Functions
// ============================================================================

/// Print a single venue with all of its attributes (for `show`)
pub fn print_venue(venue: &Venue, mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let config = OutputConfig::from_env();

    match mode {
        OutputMode::Text => write_venue_details(&mut handle, venue, &config),
        OutputMode::Json => write_json(&mut handle, venue),
    }
}

/// Print a list of venues under a heading
pub fn print_venues(heading: &str, venues: &[Venue], mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let config = OutputConfig::from_env();

    match mode {
        OutputMode::Text => write_venue_list(&mut handle, heading, venues, &config),
        OutputMode::Json => write_json(&mut handle, venues),
    }
}

/// Print the result of a sovereign lookup
pub fn print_sovereign(found: &SovereignVenue, mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let config = OutputConfig::from_env();

    match mode {
        OutputMode::Text => write_sovereign(&mut handle, found, &config),
        OutputMode::Json => write_json(&mut handle, found),
    }
}

/// Print a JSON-formatted result for any serializable value
pub fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_json(&mut handle, value)
}

fn write_json<W: Write, T: Serialize + ?Sized>(w: &mut W, value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(w, "{}", json)
}

// ============================================================================
// Text Formatting
// ============================================================================

fn venue_line(venue: &Venue, config: &OutputConfig) -> String {
    let mut line = format!(
        "{} {}",
        venue_icon(venue.is_sovereign(), config),
        colorize_id(venue.id.as_str(), config)
    );
    if let Some(name) = venue.name() {
        line.push_str("  ");
        line.push_str(name);
    }
    if let Some(template) = venue.template() {
        line.push_str("  ");
        line.push_str(&colorize_template(template, config));
    }
    line
}

fn write_venue_list<W: Write>(
    w: &mut W,
    heading: &str,
    venues: &[Venue],
    config: &OutputConfig,
) -> io::Result<()> {
    if venues.is_empty() {
        writeln!(w, "No venues found.")?;
        return Ok(());
    }

    writeln!(w, "{} ({}):", bold(heading, config), venues.len())?;
    for venue in venues {
        writeln!(w, "  {}", venue_line(venue, config))?;
    }
    Ok(())
}

fn write_venue_details<W: Write>(
    w: &mut W,
    venue: &Venue,
    config: &OutputConfig,
) -> io::Result<()> {
    writeln!(w, "{}", venue_line(venue, config))?;

    match venue.parent() {
        Some(parent) => writeln!(
            w,
            "  {} {}",
            dimmed("Parent:", config),
            colorize_id(parent.as_str(), config)
        )?,
        None => writeln!(w, "  {} (sovereign)", dimmed("Parent:", config))?,
    }

    let mut attrs: Vec<(&String, &Value)> = venue
        .payload
        .iter()
        .filter(|(k, _)| k.as_str() != "name" && k.as_str() != "template")
        .collect();
    attrs.sort_by(|a, b| a.0.cmp(b.0));
    for (key, value) in attrs {
        let rendered = match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        writeln!(w, "  {} {}", dimmed(&format!("{key}:"), config), rendered)?;
    }
    Ok(())
}

fn write_sovereign<W: Write>(
    w: &mut W,
    found: &SovereignVenue,
    config: &OutputConfig,
) -> io::Result<()> {
    writeln!(w, "{}", venue_line(&found.venue, config))?;
    if found.checked_venue_ids.is_empty() {
        writeln!(w, "  {}", dimmed("(already sovereign)", config))?;
        return Ok(());
    }

    let arrow = if config.use_ascii { " -> " } else { " → " };
    let path: Vec<String> = found
        .checked_venue_ids
        .iter()
        .chain(std::iter::once(&found.venue.id))
        .map(|id| colorize_id(id.as_str(), config))
        .collect();
    writeln!(w, "  {} {}", dimmed("Path:", config), path.join(arrow))
}
