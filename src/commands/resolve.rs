use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use preassign::resolve::{ResolutionMap, resolve};
use tabled::Table;

use crate::commands::{load_adjudicators, load_registrants, load_teams};

#[derive(Debug, Args)]
pub struct ResolveCommand {
    /// Registrant exports; several files are read in order.
    #[arg(long, num_args = 1.., required_unless_present = "roster_only")]
    registrants: Vec<PathBuf>,

    #[arg(long)]
    teams: PathBuf,

    #[arg(long)]
    adjudicators: PathBuf,

    /// Where to write the resolution map.
    #[arg(long, default_value = "resolution.json")]
    out: PathBuf,

    /// Skip matching and assume everyone joins with the email they signed
    /// up to the tournament with.
    #[arg(long, action)]
    roster_only: bool,
}

impl ResolveCommand {
    pub fn run(self) -> Result<()> {
        let teams = load_teams(&self.teams)?;
        let adjudicators = load_adjudicators(&self.adjudicators)?;

        let map = if self.roster_only {
            ResolutionMap::from_roster(&teams, &adjudicators)
        } else {
            let registrants = load_registrants(&self.registrants)?;
            resolve(&registrants, &teams, &adjudicators)
        };

        map.save(&self.out).with_context(|| {
            format!("could not write {}", self.out.display())
        })?;

        println!(
            "Resolved {} teams and {} adjudicators into {}",
            map.teams.len(),
            map.judges.len(),
            self.out.display()
        );
        if !map.unknown.is_empty() {
            println!(
                "{} registrants could not be matched:\n{}",
                map.unknown.len(),
                Table::new(&map.unknown)
            );
        }
        Ok(())
    }
}
