//! End-to-end checks, from platform exports through to pre-assignment
//! files. The fixtures are a small tournament: one four-team debate in
//! `Debate Room 3A` and a lone adjudicator in `Social Room`.

use crate::{
    tabbycat,
    tournaments::{Participant, Team, rooms::{Categories, Venue}, rounds::Room},
    zoom::{self, Registrant},
};

mod pipeline;

pub fn teams() -> Vec<Team> {
    tabbycat::parse_teams(include_str!("fixtures/teams.json")).unwrap()
}

pub fn adjudicators() -> Vec<Participant> {
    tabbycat::parse_adjudicators(include_str!("fixtures/adjudicators.json"))
        .unwrap()
}

pub fn venues() -> Vec<Venue> {
    tabbycat::parse_venues(include_str!("fixtures/venues.json")).unwrap()
}

pub fn pairings() -> Vec<Room> {
    tabbycat::parse_pairings(include_str!("fixtures/pairings.json")).unwrap()
}

pub fn registrants() -> Vec<Registrant> {
    zoom::parse_registrants(include_str!("fixtures/registrants.json")).unwrap()
}

pub fn categories() -> Categories {
    Categories::from_toml(include_str!("fixtures/categories.toml")).unwrap()
}
