//! Turns a tournament's draw and a videoconference registrant list into
//! breakout-room pre-assignment files.
//!
//! The pipeline runs leaves first: venues and categories are indexed, the
//! registrants are resolved against the roster ([`resolve`]), the draw is
//! bucketed into per-category attendee lists ([`allocate`]) and those lists
//! are written out in bounded batches, with anything left over reconciled
//! into a report for the tab team.

use diesel_migrations::{EmbeddedMigrations, embed_migrations};

pub mod allocate;
pub mod error;
pub mod registration;
pub mod resolve;
pub mod schema;
pub mod store;
pub mod tabbycat;
pub mod tournaments;
pub mod validation;
pub mod zoom;

#[cfg(test)]
pub mod test;

pub use error::{Error, Result};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");
