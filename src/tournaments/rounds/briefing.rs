//! Per-participant round briefings: which room to go to, in what capacity,
//! and the meeting link for that room's category.

use std::fmt::Write;

use serde::Serialize;
use url::Url;

use crate::tournaments::{
    ParticipantId, TeamId,
    rooms::{Categories, Venue, VenueIndex},
    rounds::{Room, side_names::name_of_side},
};

#[derive(Serialize, Copy, Clone, Debug, PartialEq, Eq)]
pub enum JudgeRole {
    Chair,
    Panellist,
    Trainee,
}

impl JudgeRole {
    fn described(&self) -> &'static str {
        match self {
            JudgeRole::Chair => "the chair",
            JudgeRole::Panellist => "a panellist",
            JudgeRole::Trainee => "a trainee",
        }
    }
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub enum Recipient {
    Team { id: TeamId, side: String },
    Judge { id: ParticipantId, role: JudgeRole },
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Briefing {
    pub recipient: Recipient,
    pub venue: String,
    pub message: String,
}

/// Builds one briefing per team and one per adjudicator, in draw order.
#[tracing::instrument(skip_all, fields(rooms = rooms.len()))]
pub fn briefings(
    venues: &[Venue],
    rooms: &[Room],
    categories: &Categories,
) -> Vec<Briefing> {
    let index = VenueIndex::new(venues);
    let mut out = Vec::new();

    for room in rooms {
        let venue = index.name_or_id(room.venue_id);
        let url = match categories.lookup(&venue) {
            Ok(category) => category.url.as_ref(),
            Err(e) => {
                tracing::warn!("{e}");
                None
            }
        };

        for (team, side) in room.teams_with_sides() {
            let mut message = format!(
                "In this round, you will be speaking in **{}** in room \
                 **{venue}**.",
                name_of_side(side)
            );
            append_link(&mut message, url);
            out.push(Briefing {
                recipient: Recipient::Team {
                    id: team,
                    side: side.to_string(),
                },
                venue: venue.clone(),
                message,
            });
        }

        let judges = room
            .chair_id
            .into_iter()
            .map(|id| (id, JudgeRole::Chair))
            .chain(
                room.panellist_ids
                    .iter()
                    .map(|id| (*id, JudgeRole::Panellist)),
            )
            .chain(room.trainee_ids.iter().map(|id| (*id, JudgeRole::Trainee)));

        for (id, role) in judges {
            let mut message = format!(
                "In this round, you will be judging as **{}** in room \
                 **{venue}**.",
                role.described()
            );
            append_link(&mut message, url);
            out.push(Briefing {
                recipient: Recipient::Judge { id, role },
                venue: venue.clone(),
                message,
            });
        }
    }

    out
}

fn append_link(message: &mut String, url: Option<&Url>) {
    if let Some(url) = url {
        let _ = write!(message, "\n\nThe link to your room is {url}.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tournaments::rooms::Category;

    fn room() -> Room {
        Room {
            venue_id: 4,
            chair_id: Some(30),
            panellist_ids: vec![31],
            trainee_ids: vec![],
            team_ids: vec![1, 2],
            side_names: vec!["OG".to_string(), "OO".to_string()],
        }
    }

    #[test]
    fn briefs_teams_then_judges() {
        let venues = vec![Venue {
            id: 4,
            name: "Debate Room 4".to_string(),
        }];
        let mut category = Category::new("debates", "Debate", "");
        category.url = Some(Url::parse("https://meet.example.com/d").unwrap());
        let categories = Categories::new(vec![category]);

        let out = briefings(&venues, &[room()], &categories);

        assert_eq!(out.len(), 4);
        assert_eq!(
            out[0].recipient,
            Recipient::Team {
                id: 1,
                side: "OG".to_string()
            }
        );
        assert_eq!(
            out[0].message,
            "In this round, you will be speaking in **Opening Government** \
             in room **Debate Room 4**.\n\nThe link to your room is \
             https://meet.example.com/d."
        );
        assert_eq!(
            out[2].recipient,
            Recipient::Judge {
                id: 30,
                role: JudgeRole::Chair
            }
        );
        assert!(out[3].message.contains("as **a panellist**"));
    }

    #[test]
    fn no_link_without_category_url() {
        let out = briefings(&[], &[room()], &Categories::default());
        assert_eq!(out[0].venue, "4");
        assert!(!out[0].message.contains("link"));
    }
}
