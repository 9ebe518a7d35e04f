//! Color and styling helpers for CLI output.
//!
//! Semantic Color Theme:
//!   - Success:   green   (import confirmations, sovereign markers)
//!   - Warning:   yellow  (load warnings)
//!   - Error:     red     (failed lookups)
//!   - Info:      cyan    (venue IDs)
//!   - Accent:    magenta (template kinds)
//!   - Muted:     dimmed  (field labels, connectors)
//!   - Emphasis:  bold    (section headers)

use colored::Colorize;

use super::OutputConfig;

/// Apply semantic "success" color (green) to text.
pub fn success(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.green().to_string()
}

/// Apply semantic "error" color (red) to text.
pub fn error(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.red().to_string()
}

/// Apply semantic "warning" color (yellow) to text.
pub fn warning(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.yellow().to_string()
}

/// Colorize a venue ID (cyan).
pub(crate) fn colorize_id(id: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return id.to_string();
    }
    id.cyan().to_string()
}

/// Colorize a template kind (magenta), bracketed.
pub(crate) fn colorize_template(template: &str, config: &OutputConfig) -> String {
    let text = format!("[{template}]");
    if !config.use_colors {
        return text;
    }
    text.magenta().to_string()
}

/// Icon marking sovereign (root) venues versus nested ones.
pub(crate) fn venue_icon(is_sovereign: bool, config: &OutputConfig) -> String {
    let icon = match (is_sovereign, config.use_ascii) {
        (true, true) => "*",
        (true, false) => "◆",
        (false, true) => "o",
        (false, false) => "○",
    };
    if !config.use_colors {
        return icon.to_string();
    }
    if is_sovereign {
        icon.green().bold().to_string()
    } else {
        icon.white().to_string()
    }
}

/// Apply dimmed style to text (for labels/field names).
pub(crate) fn dimmed(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.dimmed().to_string()
}

/// Apply bold style to text (for section headers).
pub(crate) fn bold(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.bold().to_string()
}
