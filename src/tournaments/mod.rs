//! The tournament roster and draw, as fetched from the tournament-management
//! platform. Everything in here is built fresh for each run and never
//! mutated afterwards.

use serde::{Deserialize, Serialize};

pub mod rooms;
pub mod rounds;

pub type ParticipantId = u64;
pub type TeamId = u64;
pub type VenueId = u64;

#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Speaker,
    Adjudicator,
}

impl Role {
    /// The value stored in the `kind` column of the participant store.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Speaker => "speaker",
            Role::Adjudicator => "adjudicator",
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    /// Empty when the participant signed up without an email.
    pub email: String,
    pub role: Role,
    /// The check-in barcode, which doubles as the chat registration code.
    #[serde(default)]
    pub barcode: Option<String>,
    #[serde(default)]
    pub url_key: Option<String>,
}

impl Participant {
    pub fn new(
        id: ParticipantId,
        name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            role,
            barcode: None,
            url_key: None,
        }
    }

    pub fn speaker(
        id: ParticipantId,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self::new(id, name, email, Role::Speaker)
    }

    pub fn adjudicator(
        id: ParticipantId,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self::new(id, name, email, Role::Adjudicator)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Team {
    pub id: TeamId,
    pub emoji: String,
    /// Speakers in speaking order.
    pub speakers: Vec<Participant>,
}
