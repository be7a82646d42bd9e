use anyhow::Result;
use clap::Args;
use preassign::registration::parse_registration_code;

use crate::commands::open_store;

#[derive(Debug, Args)]
pub struct BindCommand {
    /// The registration message (or username) as sent.
    #[arg(long)]
    message: String,

    /// The sender's chat identity.
    #[arg(long)]
    chat_id: String,
}

impl BindCommand {
    pub fn run(self, db: &str) -> Result<()> {
        let code = parse_registration_code(&self.message)?;
        let mut store = open_store(db)?;

        if let Some(existing) =
            store.participant_from_chat_identity(&self.chat_id)?
        {
            println!(
                "{} is already registered as {}",
                self.chat_id, existing.label
            );
            return Ok(());
        }

        let participant = store.bind_chat_identity(&code, &self.chat_id)?;

        println!("Registered {} as {}", self.chat_id, participant.label);
        Ok(())
    }
}
