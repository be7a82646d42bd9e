//! Matches videoconference registrants to tournament participants.
//!
//! A registrant matches a participant when their emails are equal, or,
//! failing that, when their names are (both case-insensitively). The name
//! fallback catches people who join under a personal account whose email
//! differs from the one they signed up to the tournament with.
//!
//! Registrants are matched against team speakers first (in team order,
//! then speaker order) and then against adjudicators. A registrant matches
//! at most one participant: the first one found.
//!
//! Known limitation: a participant listed on two teams is only ever
//! credited to whichever of those teams comes first in `teams`.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{
    allocate::IdentitySource,
    error::Result,
    tournaments::{Participant, ParticipantId, Team, TeamId},
    zoom::Registrant,
};

/// The outcome of resolving a round's registrants against the roster.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolutionMap {
    /// Registrant emails per team, in the order the registrants were
    /// matched.
    pub teams: IndexMap<TeamId, Vec<String>>,
    pub judges: IndexMap<ParticipantId, String>,
    /// Registrants matching nobody, in input order.
    pub unknown: Vec<Registrant>,
}

fn same(registrant: &str, participant: &str) -> bool {
    !registrant.is_empty()
        && registrant.to_lowercase() == participant.to_lowercase()
}

fn matches(registrant: &Registrant, participant: &Participant) -> bool {
    same(&registrant.email, &participant.email)
        || same(&registrant.name, &participant.name)
}

#[tracing::instrument(skip_all, fields(
    registrants = registrants.len(),
    teams = teams.len(),
    adjudicators = adjudicators.len(),
))]
pub fn resolve(
    registrants: &[Registrant],
    teams: &[Team],
    adjudicators: &[Participant],
) -> ResolutionMap {
    let mut map = ResolutionMap::default();

    'registrants: for registrant in registrants {
        for team in teams {
            if team.speakers.iter().any(|s| matches(registrant, s)) {
                tracing::trace!(
                    "registrant {} is on team {}",
                    registrant.email,
                    team.id
                );
                map.teams
                    .entry(team.id)
                    .or_default()
                    .push(registrant.email.clone());
                continue 'registrants;
            }
        }

        if let Some(judge) =
            adjudicators.iter().find(|j| matches(registrant, j))
        {
            if let Some(previous) =
                map.judges.insert(judge.id, registrant.email.clone())
            {
                tracing::warn!(
                    "adjudicator {} ({}) matched both {previous} and {}; \
                     keeping the latter",
                    judge.id,
                    judge.name,
                    registrant.email
                );
            }
            continue;
        }

        tracing::warn!(
            "could not match registrant {} <{}>",
            registrant.name,
            registrant.email
        );
        map.unknown.push(registrant.clone());
    }

    tracing::info!(
        "resolved {} teams and {} adjudicators, {} unknown registrants",
        map.teams.len(),
        map.judges.len(),
        map.unknown.len()
    );

    map
}

impl ResolutionMap {
    /// A map which assumes everyone joins with the email they signed up to
    /// the tournament with.
    pub fn from_roster(teams: &[Team], adjudicators: &[Participant]) -> Self {
        let teams = teams
            .iter()
            .map(|team| {
                (
                    team.id,
                    team.speakers
                        .iter()
                        .filter(|s| !s.email.is_empty())
                        .map(|s| s.email.clone())
                        .collect(),
                )
            })
            .collect();
        let judges = adjudicators
            .iter()
            .filter(|j| !j.email.is_empty())
            .map(|j| (j.id, j.email.clone()))
            .collect();

        Self {
            teams,
            judges,
            unknown: Vec::new(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

impl IdentitySource for ResolutionMap {
    fn team_emails(&mut self, team: TeamId) -> Result<Vec<String>> {
        Ok(self.teams.get(&team).cloned().unwrap_or_default())
    }

    fn participant_emails(
        &mut self,
        participants: &[ParticipantId],
    ) -> Result<Vec<String>> {
        Ok(participants
            .iter()
            .filter_map(|id| self.judges.get(id).cloned())
            .collect())
    }
}
