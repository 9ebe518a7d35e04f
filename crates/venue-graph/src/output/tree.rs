//! Hierarchy tree rendering for `venue-graph related --tree` output.

use std::collections::{HashMap, HashSet};
use std::io::{self, Write};

use colored::Colorize;
use serde::Serialize;

use super::color::{colorize_id, colorize_template, venue_icon};
use super::{OutputConfig, OutputMode};
use crate::domain::{Venue, VenueId};

/// A node in a venue hierarchy for rendering purposes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VenueTreeNode {
    /// Venue ID of this node.
    pub id: String,
    /// Display name, if the venue has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Template kind, if the venue has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    /// Nested venues.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<VenueTreeNode>,
}

/// Arrange a flat, root-first list of venues into a tree.
///
/// The first venue is the root. Every other venue hangs under its parent if
/// that parent is in the list; venues whose parent is missing are attached
/// directly to the root. Venues left unreachable from the root because their
/// parents loop are attached to the root too, so each venue appears exactly
/// once.
pub fn build_tree(venues: &[Venue]) -> Option<VenueTreeNode> {
    let (root, rest) = venues.split_first()?;

    let present: HashSet<&VenueId> = venues.iter().map(|v| &v.id).collect();
    let mut by_parent: HashMap<&VenueId, Vec<&Venue>> = HashMap::new();
    for venue in rest {
        let parent = venue
            .parent()
            .filter(|p| present.contains(p) && *p != &venue.id)
            .unwrap_or(&root.id);
        by_parent.entry(parent).or_default().push(venue);
    }

    let mut placed = HashSet::from([&root.id]);
    let mut node = attach(root, &by_parent, &mut placed);
    for venue in rest {
        if placed.insert(&venue.id) {
            node.children.push(attach(venue, &by_parent, &mut placed));
        }
    }
    Some(node)
}

fn attach<'a>(
    venue: &'a Venue,
    by_parent: &HashMap<&'a VenueId, Vec<&'a Venue>>,
    placed: &mut HashSet<&'a VenueId>,
) -> VenueTreeNode {
    let mut children = Vec::new();
    if let Some(kids) = by_parent.get(&venue.id) {
        for &kid in kids {
            if placed.insert(&kid.id) {
                children.push(attach(kid, by_parent, placed));
            }
        }
    }

    VenueTreeNode {
        id: venue.id.to_string(),
        name: venue.name().map(str::to_string),
        template: venue.template().map(str::to_string),
        children,
    }
}

/// Print a venue tree with ASCII/Unicode connectors.
///
/// Renders a tree like:
/// ```text
/// ◆ burn Burning Venue [partymap]
/// ├── camp-a Camp A [themecamp]
/// │   └── stage Main Stage
/// └── camp-b
/// ```
pub fn print_venue_tree(root: &VenueTreeNode, mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let config = OutputConfig::from_env();

    match mode {
        OutputMode::Text => write_venue_tree(&mut handle, root, &config),
        OutputMode::Json => {
            let output = serde_json::to_string_pretty(root).map_err(io::Error::other)?;
            writeln!(handle, "{}", output)
        }
    }
}

/// Render the tree as text.
pub(crate) fn write_venue_tree<W: Write>(
    w: &mut W,
    root: &VenueTreeNode,
    config: &OutputConfig,
) -> io::Result<()> {
    writeln!(
        w,
        "{} {}",
        venue_icon(true, config),
        node_label(root, config)
    )?;
    write_children(w, &root.children, &[], config)
}

fn node_label(node: &VenueTreeNode, config: &OutputConfig) -> String {
    let mut label = colorize_id(&node.id, config);
    if let Some(name) = &node.name {
        label.push(' ');
        label.push_str(name);
    }
    if let Some(template) = &node.template {
        label.push(' ');
        label.push_str(&colorize_template(template, config));
    }
    label
}

/// `prefix_segments` tracks which ancestor levels still have siblings below,
/// used to draw the vertical continuation lines.
fn write_children<W: Write>(
    w: &mut W,
    children: &[VenueTreeNode],
    prefix_segments: &[bool],
    config: &OutputConfig,
) -> io::Result<()> {
    let (branch, corner, pipe, space) = if config.use_ascii {
        ("|-- ", "`-- ", "|   ", "    ")
    } else {
        ("├── ", "└── ", "│   ", "    ")
    };

    for (i, child) in children.iter().enumerate() {
        let is_last = i == children.len() - 1;

        let mut prefix = String::new();
        for &has_more in prefix_segments {
            let segment = if has_more { pipe } else { space };
            if config.use_colors {
                prefix.push_str(&segment.dimmed().to_string());
            } else {
                prefix.push_str(segment);
            }
        }

        let connector = if is_last { corner } else { branch };
        let connector_str = if config.use_colors {
            connector.dimmed().to_string()
        } else {
            connector.to_string()
        };

        writeln!(w, "{}{}{}", prefix, connector_str, node_label(child, config))?;

        let mut segments = prefix_segments.to_vec();
        segments.push(!is_last);
        write_children(w, &child.children, &segments, config)?;
    }

    Ok(())
}
