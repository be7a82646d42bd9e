use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use preassign::tournaments::{
    rooms::Categories,
    rounds::briefing::{Briefing, Recipient, briefings},
};
use tabled::{Table, Tabled};

use crate::commands::{load_pairings, load_venues, open_store};

#[derive(Debug, Args)]
pub struct BriefCommand {
    #[arg(long)]
    venues: PathBuf,

    #[arg(long, num_args = 1.., required = true)]
    pairings: Vec<PathBuf>,

    /// Room categories, as TOML; supplies the meeting links.
    #[arg(long)]
    categories: Option<PathBuf>,

    /// Look up who to send each briefing to in the participant store.
    #[arg(long, action)]
    with_chat_ids: bool,
}

#[derive(Tabled)]
struct BriefingRow {
    #[tabled(rename = "Recipient")]
    recipient: String,
    #[tabled(rename = "Room")]
    venue: String,
    #[tabled(rename = "Chat IDs")]
    chat_ids: String,
    #[tabled(rename = "Message")]
    message: String,
}

fn describe(recipient: &Recipient) -> String {
    match recipient {
        Recipient::Team { id, side } => format!("team {id} ({side})"),
        Recipient::Judge { id, role } => {
            format!("adjudicator {id} ({role:?})")
        }
    }
}

impl BriefCommand {
    pub fn run(self, db: &str) -> Result<()> {
        let venues = load_venues(&self.venues)?;
        let rooms = load_pairings(&self.pairings)?;
        let categories = match &self.categories {
            Some(path) => Categories::load(path).with_context(|| {
                format!("could not load categories from {}", path.display())
            })?,
            None => Categories::default(),
        };

        let mut store = if self.with_chat_ids {
            Some(open_store(db)?)
        } else {
            None
        };

        let mut rows = Vec::new();
        for Briefing {
            recipient,
            venue,
            message,
        } in briefings(&venues, &rooms, &categories)
        {
            let chat_ids = match (&mut store, &recipient) {
                (Some(store), Recipient::Team { id, .. }) => {
                    store.chat_ids_for_team(*id)?.join(", ")
                }
                (Some(store), Recipient::Judge { id, .. }) => {
                    store.chat_ids_for_participants(&[*id])?.join(", ")
                }
                (None, _) => String::new(),
            };
            rows.push(BriefingRow {
                recipient: describe(&recipient),
                venue,
                chat_ids,
                message,
            });
        }

        println!("{}", Table::new(rows));
        Ok(())
    }
}
