//! Parsers for the tournament-management platform's (Tabbycat) REST
//! payloads. Related resources are referenced by URL, so every id we keep
//! is recovered from the tail of a URL.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer};

use crate::{
    error::{Error, Result},
    tournaments::{
        Participant, Role, Team,
        rooms::Venue,
        rounds::{Motion, Room, Round},
    },
};

/// The decimal id at the end of a resource URL, e.g.
/// `https://tab.example.com/api/v1/tournaments/iv/teams/17` → `17`.
pub fn strip_identifier(url: &str) -> Result<u64> {
    static RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"/(\d+)$").expect("valid regex"));

    RE.captures(url)
        .and_then(|captures| captures[1].parse::<u64>().ok())
        .ok_or_else(|| Error::MalformedIdentifier {
            url: url.to_string(),
        })
}

pub fn strip_identifiers(urls: &[String]) -> Result<Vec<u64>> {
    urls.iter().map(|url| strip_identifier(url)).collect()
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize, Debug)]
struct ParticipantPayload {
    id: u64,
    name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    email: String,
    #[serde(default)]
    url_key: Option<String>,
    /// Not part of the list endpoint; exports merge in the check-in
    /// barcode fetched per participant.
    #[serde(default)]
    barcode: Option<String>,
}

impl ParticipantPayload {
    fn into_participant(self, role: Role) -> Participant {
        Participant {
            id: self.id,
            name: self.name,
            email: self.email,
            role,
            barcode: self.barcode,
            url_key: self.url_key,
        }
    }
}

#[derive(Deserialize, Debug)]
struct TeamPayload {
    id: u64,
    #[serde(default, deserialize_with = "null_as_empty")]
    emoji: String,
    #[serde(default)]
    speakers: Vec<ParticipantPayload>,
}

#[derive(Deserialize, Debug)]
struct RoundPayload {
    url: String,
    name: String,
    #[serde(default)]
    motions: Vec<MotionPayload>,
}

#[derive(Deserialize, Debug)]
struct MotionPayload {
    text: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    info_slide: String,
}

#[derive(Deserialize, Debug)]
struct PairingPayload {
    venue: String,
    #[serde(default)]
    adjudicators: Option<AdjudicatorsPayload>,
    #[serde(default)]
    teams: Vec<SidePayload>,
}

#[derive(Deserialize, Debug, Default)]
struct AdjudicatorsPayload {
    #[serde(default)]
    chair: Option<String>,
    #[serde(default)]
    panellists: Vec<String>,
    #[serde(default)]
    trainees: Vec<String>,
}

#[derive(Deserialize, Debug)]
struct SidePayload {
    side: String,
    team: String,
}

pub fn parse_adjudicators(json: &str) -> Result<Vec<Participant>> {
    let payload: Vec<ParticipantPayload> = serde_json::from_str(json)?;
    Ok(payload
        .into_iter()
        .map(|p| p.into_participant(Role::Adjudicator))
        .collect())
}

pub fn parse_teams(json: &str) -> Result<Vec<Team>> {
    let payload: Vec<TeamPayload> = serde_json::from_str(json)?;
    Ok(payload
        .into_iter()
        .map(|team| Team {
            id: team.id,
            emoji: team.emoji,
            speakers: team
                .speakers
                .into_iter()
                .map(|s| s.into_participant(Role::Speaker))
                .collect(),
        })
        .collect())
}

pub fn parse_venues(json: &str) -> Result<Vec<Venue>> {
    Ok(serde_json::from_str(json)?)
}

pub fn parse_rounds(json: &str) -> Result<Vec<Round>> {
    let payload: Vec<RoundPayload> = serde_json::from_str(json)?;
    payload
        .into_iter()
        .map(|round| {
            Ok(Round {
                id: strip_identifier(&round.url)?,
                name: round.name,
                motion: round.motions.into_iter().next().map(|m| Motion {
                    text: m.text,
                    info_slide: m.info_slide,
                }),
            })
        })
        .collect()
}

/// Parses a round's pairings. One malformed URL fails the whole round.
pub fn parse_pairings(json: &str) -> Result<Vec<Room>> {
    let payload: Vec<PairingPayload> = serde_json::from_str(json)?;
    payload
        .into_iter()
        .map(|pairing| {
            let adjudicators = pairing.adjudicators.unwrap_or_default();
            let (team_ids, side_names): (Vec<_>, Vec<_>) = pairing
                .teams
                .iter()
                .map(|side| {
                    Ok((
                        strip_identifier(&side.team)?,
                        side.side.to_uppercase(),
                    ))
                })
                .collect::<Result<Vec<_>>>()?
                .into_iter()
                .unzip();

            Ok(Room {
                venue_id: strip_identifier(&pairing.venue)?,
                chair_id: adjudicators
                    .chair
                    .as_deref()
                    .map(strip_identifier)
                    .transpose()?,
                panellist_ids: strip_identifiers(&adjudicators.panellists)?,
                trainee_ids: strip_identifiers(&adjudicators.trainees)?,
                team_ids,
                side_names,
            })
        })
        .collect()
}
