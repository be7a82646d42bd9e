//! Subcommands. Every command works offline, from JSON exports of the
//! tournament-management and videoconferencing platforms.

mod allocate;
mod bind;
mod brief;
mod import;
mod resolve;
mod rounds;

use std::path::Path;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use preassign::{
    store::ParticipantStore,
    tabbycat,
    tournaments::{Participant, Team, rooms::Venue, rounds::Room},
    zoom::{self, Registrant},
};

#[derive(Debug, Parser)]
#[command(name = "preassign")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log more (repeat for even more).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// The participant store.
    #[arg(
        long,
        global = true,
        env = "DATABASE_URL",
        default_value = "participants.db"
    )]
    db: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Copy the roster into the participant store.
    Import(import::ImportCommand),
    /// Match meeting registrants to the roster.
    Resolve(resolve::ResolveCommand),
    /// Write breakout-room pre-assignment files for a round.
    Allocate(allocate::AllocateCommand),
    /// Compose the room briefings for a round.
    Brief(brief::BriefCommand),
    /// Bind a chat identity using a registration message.
    Bind(bind::BindCommand),
    /// List the tournament's rounds.
    Rounds(rounds::RoundsCommand),
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Import(cmd) => cmd.run(&self.db),
            Commands::Resolve(cmd) => cmd.run(),
            Commands::Allocate(cmd) => cmd.run(&self.db),
            Commands::Brief(cmd) => cmd.run(&self.db),
            Commands::Bind(cmd) => cmd.run(&self.db),
            Commands::Rounds(cmd) => cmd.run(),
        }
    }
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("could not read {}", path.display()))
}

fn open_store(db: &str) -> Result<ParticipantStore> {
    ParticipantStore::open(db)
        .with_context(|| format!("could not open participant store {db}"))
}

fn load_teams(path: &Path) -> Result<Vec<Team>> {
    let teams = tabbycat::parse_teams(&read(path)?)
        .with_context(|| {
            format!("could not parse teams in {}", path.display())
        })?;
    tracing::info!("fetched {} teams", teams.len());
    Ok(teams)
}

fn load_adjudicators(path: &Path) -> Result<Vec<Participant>> {
    let adjudicators = tabbycat::parse_adjudicators(&read(path)?)
        .with_context(|| {
            format!("could not parse adjudicators in {}", path.display())
        })?;
    tracing::info!("fetched {} adjudicators", adjudicators.len());
    Ok(adjudicators)
}

fn load_venues(path: &Path) -> Result<Vec<Venue>> {
    let venues = tabbycat::parse_venues(&read(path)?)
        .with_context(|| {
            format!("could not parse venues in {}", path.display())
        })?;
    tracing::info!("fetched {} venues", venues.len());
    Ok(venues)
}

/// The rooms of every given round, round by round.
fn load_pairings(paths: &[impl AsRef<Path>]) -> Result<Vec<Room>> {
    let mut rooms = Vec::new();
    for path in paths {
        let path = path.as_ref();
        rooms.extend(tabbycat::parse_pairings(&read(path)?).with_context(
            || format!("could not parse pairings in {}", path.display()),
        )?);
    }
    tracing::info!("fetched {} pairings", rooms.len());
    Ok(rooms)
}

fn load_registrants(paths: &[impl AsRef<Path>]) -> Result<Vec<Registrant>> {
    let mut registrants = Vec::new();
    for path in paths {
        let path = path.as_ref();
        registrants.extend(zoom::parse_registrants(&read(path)?).with_context(
            || format!("could not parse registrants in {}", path.display()),
        )?);
    }
    tracing::info!("fetched {} registrants", registrants.len());
    Ok(registrants)
}
