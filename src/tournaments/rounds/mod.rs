use serde::{Deserialize, Serialize};

use crate::tournaments::{ParticipantId, TeamId, VenueId};

pub mod briefing;
pub mod side_names;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Motion {
    pub text: String,
    #[serde(default)]
    pub info_slide: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Round {
    pub id: u64,
    pub name: String,
    pub motion: Option<Motion>,
}

/// One scheduled debate in a round.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Room {
    pub venue_id: VenueId,
    /// A draw may have been released before a chair was allocated.
    pub chair_id: Option<ParticipantId>,
    pub panellist_ids: Vec<ParticipantId>,
    pub trainee_ids: Vec<ParticipantId>,
    pub team_ids: Vec<TeamId>,
    /// `side_names[i]` is the (upper-cased) position of `team_ids[i]`.
    pub side_names: Vec<String>,
}

impl Room {
    pub fn teams_with_sides(&self) -> impl Iterator<Item = (TeamId, &str)> {
        self.team_ids
            .iter()
            .zip(self.side_names.iter())
            .map(|(id, side)| (*id, side.as_str()))
    }
}
