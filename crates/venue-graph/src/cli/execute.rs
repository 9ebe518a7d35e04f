//! Command execution logic.
//!
//! This module contains the implementation of all CLI commands.

use anyhow::Result;

use super::args::{
    ChildrenArgs, DescendantsArgs, ImportArgs, InitArgs, RelatedArgs, ShowArgs, SovereignArgs,
};
use crate::app::App;
use crate::domain::VenueId;
use crate::error::Error;
use crate::output::{self, OutputConfig, OutputMode};
use crate::resolver::SovereignOptions;
use crate::store::in_memory::load_from_jsonl;

/// Wrap a resolver failure in the message users see for any lookup error.
fn hierarchy_error(err: Error) -> anyhow::Error {
    anyhow::anyhow!("this venue hierarchy could not be loaded: {err}")
}

/// Execute the init command
pub async fn execute_init(args: &InitArgs, output_mode: OutputMode) -> Result<()> {
    use crate::commands::init;

    let current_dir = std::env::current_dir()?;
    let result = init::init(&current_dir, args.max_batch_size).await?;

    match output_mode {
        OutputMode::Json => output::print_json(&serde_json::json!({
            "directory": result.venue_graph_dir.display().to_string(),
            "config_file": result.config_file.display().to_string(),
            "venues_file": result.venues_file.display().to_string(),
            "max_batch_size": result.max_batch_size,
        }))?,
        OutputMode::Text if !args.quiet => {
            println!(
                "Initialized venue-graph in {}",
                result.venue_graph_dir.display()
            );
            println!("  Config: {}", result.config_file.display());
            println!("  Venues: {}", result.venues_file.display());
            println!("  Max batch size: {}", result.max_batch_size);
        }
        OutputMode::Text => {}
    }

    Ok(())
}

/// Execute the show command
pub async fn execute_show(app: &App, args: &ShowArgs, output_mode: OutputMode) -> Result<()> {
    let id = VenueId::new(args.id.as_str());
    let venue = app
        .resolver()
        .fetch_venue(&id)
        .await
        .map_err(hierarchy_error)?
        .ok_or_else(|| hierarchy_error(Error::NotFound(id.clone())))?;

    output::print_venue(&venue, output_mode)?;
    Ok(())
}

/// Execute the sovereign command
pub async fn execute_sovereign(
    app: &App,
    args: &SovereignArgs,
    output_mode: OutputMode,
) -> Result<()> {
    let options = SovereignOptions {
        previously_checked_venue_ids: Vec::new(),
        max_depth: args.max_depth.or(app.config().max_depth),
    };

    let found = app
        .resolver()
        .resolve_sovereign(&VenueId::new(args.id.as_str()), options)
        .await
        .map_err(hierarchy_error)?;

    output::print_sovereign(&found, output_mode)?;
    Ok(())
}

/// Execute the children command
pub async fn execute_children(
    app: &App,
    args: &ChildrenArgs,
    output_mode: OutputMode,
) -> Result<()> {
    let ids: Vec<VenueId> = args
        .ids
        .iter()
        .map(|id| VenueId::new(id.as_str()))
        .collect();

    let children = app
        .resolver()
        .fetch_direct_children(&ids)
        .await
        .map_err(hierarchy_error)?;

    output::print_venues("Children", &children, output_mode)?;
    Ok(())
}

/// Execute the descendants command
pub async fn execute_descendants(
    app: &App,
    args: &DescendantsArgs,
    output_mode: OutputMode,
) -> Result<()> {
    let id = VenueId::new(args.id.as_str());
    let resolver = app.resolver();

    let descendants = if args.all {
        resolver.fetch_descendant_closure(&id, args.levels).await
    } else {
        resolver.fetch_descendants(&id).await
    }
    .map_err(hierarchy_error)?;

    output::print_venues("Descendants", &descendants, output_mode)?;
    Ok(())
}

/// Execute the related command
pub async fn execute_related(app: &App, args: &RelatedArgs, output_mode: OutputMode) -> Result<()> {
    let id = VenueId::new(args.id.as_str());
    let resolver = app.resolver();

    let related = if args.all {
        resolver.fetch_related_transitive(&id).await
    } else {
        resolver.fetch_related(&id).await
    }
    .map_err(hierarchy_error)?;

    if args.tree {
        if let Some(tree) = output::build_tree(&related) {
            output::print_venue_tree(&tree, output_mode)?;
        }
    } else {
        output::print_venues("Related", &related, output_mode)?;
    }
    Ok(())
}

/// Execute the import command
pub async fn execute_import(app: &App, args: &ImportArgs, output_mode: OutputMode) -> Result<()> {
    let (incoming, warnings) = load_from_jsonl(&args.file, app.store().config()).await?;
    let venues = incoming.export_all().await;
    let count = app.import(venues).await?;

    match output_mode {
        OutputMode::Json => output::print_json(&serde_json::json!({
            "imported": count,
            "warnings": warnings.iter().map(ToString::to_string).collect::<Vec<_>>(),
        }))?,
        OutputMode::Text => {
            let config = OutputConfig::from_env();
            for warning in &warnings {
                eprintln!("{} {}", output::warning("warning:", &config), warning);
            }
            println!(
                "{}",
                output::success(
                    &format!("Imported {} venue(s) from {}", count, args.file.display()),
                    &config
                )
            );
        }
    }

    Ok(())
}
