//! CLI argument structs for all commands.
//!
//! Each command has its own argument struct with clap derive attributes
//! for parsing and validation.

use clap::Parser;
use std::path::PathBuf;

use super::validators::{validate_positive, validate_venue_id};

/// Arguments for the `init` command
#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Maximum number of IDs per membership query against the store
    ///
    /// Firestore-style stores cap "in" queries; the default is 10.
    #[arg(long, value_parser = validate_positive)]
    pub max_batch_size: Option<usize>,

    /// Suppress output messages
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments for the `show` command
#[derive(Parser, Debug, Clone)]
pub struct ShowArgs {
    /// Venue ID to show
    #[arg(value_parser = validate_venue_id)]
    pub id: String,
}

/// Arguments for the `sovereign` command
#[derive(Parser, Debug, Clone)]
pub struct SovereignArgs {
    /// Venue ID to start from
    #[arg(value_parser = validate_venue_id)]
    pub id: String,

    /// Maximum number of parent hops before giving up
    ///
    /// Overrides `max-depth` from the configuration file.
    #[arg(long)]
    pub max_depth: Option<usize>,
}

/// Arguments for the `children` command
#[derive(Parser, Debug, Clone)]
pub struct ChildrenArgs {
    /// Parent venue IDs
    #[arg(required = true, num_args = 1.., value_parser = validate_venue_id)]
    pub ids: Vec<String>,
}

/// Arguments for the `descendants` command
#[derive(Parser, Debug, Clone)]
pub struct DescendantsArgs {
    /// Venue ID whose descendants to list
    #[arg(value_parser = validate_venue_id)]
    pub id: String,

    /// Follow the hierarchy all the way down instead of two levels
    #[arg(short, long)]
    pub all: bool,

    /// Stop after this many levels (only with --all)
    #[arg(long, requires = "all", value_parser = validate_positive)]
    pub levels: Option<usize>,
}

/// Arguments for the `related` command
#[derive(Parser, Debug, Clone)]
pub struct RelatedArgs {
    /// Any venue ID within the hierarchy
    #[arg(value_parser = validate_venue_id)]
    pub id: String,

    /// Include every descendant of the sovereign, not only two levels
    #[arg(short, long)]
    pub all: bool,

    /// Render the hierarchy as a tree
    #[arg(long)]
    pub tree: bool,
}

/// Arguments for the `import` command
#[derive(Parser, Debug, Clone)]
pub struct ImportArgs {
    /// JSONL file with one venue object per line
    pub file: PathBuf,
}
