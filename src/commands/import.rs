use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use preassign::store::redact_names;

use crate::commands::{load_adjudicators, load_teams, open_store};

#[derive(Debug, Args)]
pub struct ImportCommand {
    /// Teams export (`/api/v1/tournaments/<slug>/teams`).
    #[arg(long)]
    teams: PathBuf,

    /// Adjudicators export (`/api/v1/tournaments/<slug>/adjudicators`).
    #[arg(long)]
    adjudicators: PathBuf,

    /// Wipe the store first.
    #[arg(long, action)]
    reset: bool,

    /// Store only first names and initials.
    #[arg(long, action)]
    redact: bool,
}

impl ImportCommand {
    pub fn run(self, db: &str) -> Result<()> {
        let mut teams = load_teams(&self.teams)?;
        let mut adjudicators = load_adjudicators(&self.adjudicators)?;

        if self.redact {
            for team in &mut teams {
                redact_names(&mut team.speakers);
            }
            redact_names(&mut adjudicators);
        }

        let mut store = open_store(db)?;
        if self.reset {
            store.reset()?;
        }
        store.add_teams(&teams)?;
        store.add_adjudicators(&adjudicators)?;

        println!(
            "Inserted {} teams and {} adjudicators into {db}",
            teams.len(),
            adjudicators.len()
        );
        Ok(())
    }
}
