//! venue-graph - sovereign venue resolution over a parent-pointer hierarchy.
//!
//! This crate provides both a CLI application and a library for walking a
//! venue hierarchy stored in any [`store::VenueStore`].

#![forbid(unsafe_code)]

// Public modules for library usage
pub mod domain;
pub mod error;
pub mod resolver;
pub mod store;

// Public CLI module (needed by binary)
pub mod app;
pub mod cli;
pub mod output;

// Command implementations
pub mod commands;
pub mod config;

pub use domain::{Venue, VenueId};
pub use error::{Error, Result};
pub use resolver::{SovereignOptions, SovereignVenue, VenueGraphResolver};
