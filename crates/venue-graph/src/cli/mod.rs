//! CLI argument parsing and command dispatch.
//!
//! This module provides the command-line interface for venue-graph using
//! clap's derive API.
//!
//! # Commands
//!
//! - `init`: Initialize a `.venue-graph/` directory
//! - `show`: Show one venue
//! - `sovereign`: Find the root venue of a hierarchy
//! - `children`: List direct children of one or more venues
//! - `descendants`: List descendants of a venue
//! - `related`: List the sovereign venue and its descendants
//! - `import`: Merge venues from a JSONL file into the store
//!
//! # Global Flags
//!
//! - `--json`: Output in JSON format (applies to all commands)
//!
//! # Example
//!
//! ```bash
//! venue-graph init --max-batch-size 30
//! venue-graph import venues.jsonl
//! venue-graph sovereign stage-2
//! venue-graph related stage-2 --all --tree
//! ```

mod args;
mod execute;
mod validators;

use anyhow::Result;
use clap::{Parser, Subcommand};

pub use args::{
    ChildrenArgs, DescendantsArgs, ImportArgs, InitArgs, RelatedArgs, ShowArgs, SovereignArgs,
};
pub use validators::{validate_positive, validate_venue_id};

/// venue-graph - resolve sovereign venues and their related venues
///
/// Venues form a hierarchy through parent pointers. Records are kept in
/// `.venue-graph/venues.jsonl`.
#[derive(Parser, Debug)]
#[command(name = "venue-graph")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Initialize venue-graph in the current directory
    ///
    /// Creates the `.venue-graph/` directory with configuration and an empty
    /// venues file.
    Init(InitArgs),

    /// Show a venue and its attributes
    Show(ShowArgs),

    /// Find the sovereign (root) venue above a venue
    ///
    /// Follows parent pointers upward, failing on cycles, missing ancestors,
    /// or when the depth limit is reached.
    Sovereign(SovereignArgs),

    /// List direct children of one or more venues
    Children(ChildrenArgs),

    /// List descendants of a venue
    ///
    /// Shows children and grandchildren by default; use `--all` to follow
    /// the hierarchy to the bottom.
    Descendants(DescendantsArgs),

    /// List every venue in the same hierarchy
    ///
    /// Resolves the sovereign venue, then lists it followed by its
    /// descendants.
    Related(RelatedArgs),

    /// Import venues from a JSONL file
    ///
    /// Records with an existing ID replace the stored record.
    Import(ImportArgs),
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse CLI arguments from an iterator (for testing)
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Execute the CLI command
    pub async fn execute(&self) -> Result<()> {
        use crate::app::App;
        use crate::output::OutputMode;

        let output_mode = if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        };

        match &self.command {
            Some(Commands::Init(args)) => execute::execute_init(args, output_mode).await,
            Some(Commands::Show(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_show(&app, args, output_mode).await
            }
            Some(Commands::Sovereign(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_sovereign(&app, args, output_mode).await
            }
            Some(Commands::Children(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_children(&app, args, output_mode).await
            }
            Some(Commands::Descendants(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_descendants(&app, args, output_mode).await
            }
            Some(Commands::Related(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_related(&app, args, output_mode).await
            }
            Some(Commands::Import(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_import(&app, args, output_mode).await
            }
            None => {
                println!("venue-graph: sovereign venue resolver");
                println!("Use --help for more information");
                Ok(())
            }
        }
    }
}
