use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use preassign::tabbycat;
use tabled::{Table, Tabled};

use crate::commands::read;

#[derive(Debug, Args)]
pub struct RoundsCommand {
    /// Rounds export (`/api/v1/tournaments/<slug>/rounds`).
    #[arg(long)]
    rounds: PathBuf,
}

#[derive(Tabled)]
struct RoundRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Motion")]
    motion: String,
}

impl RoundsCommand {
    pub fn run(self) -> Result<()> {
        let rounds = tabbycat::parse_rounds(&read(&self.rounds)?)
            .with_context(|| {
                format!("could not parse rounds in {}", self.rounds.display())
            })?;

        let rows = rounds.into_iter().map(|round| RoundRow {
            id: round.id,
            name: round.name,
            motion: round.motion.map(|m| m.text).unwrap_or_default(),
        });
        println!("{}", Table::new(rows));
        Ok(())
    }
}
