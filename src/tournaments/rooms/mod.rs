use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::tournaments::VenueId;

pub mod categories;

pub use categories::{Categories, Category};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Venue {
    pub id: VenueId,
    /// The human-facing room label. This is matched against categories and
    /// is what the videoconferencing platform calls the breakout room.
    pub name: String,
}

/// Maps venue ids to their names.
#[derive(Clone, Debug, Default)]
pub struct VenueIndex {
    names: HashMap<VenueId, String>,
}

impl VenueIndex {
    pub fn new(venues: &[Venue]) -> Self {
        Self {
            names: venues
                .iter()
                .map(|venue| (venue.id, venue.name.clone()))
                .collect(),
        }
    }

    pub fn name(&self, id: VenueId) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    /// The name of a venue, falling back to its id when the venue list did
    /// not include it.
    pub fn name_or_id(&self, id: VenueId) -> String {
        match self.name(id) {
            Some(name) => name.to_string(),
            None => {
                tracing::warn!("venue {id} is not in the venue list");
                id.to_string()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looks_up_names_by_id() {
        let index = VenueIndex::new(&[
            Venue {
                id: 1,
                name: "Debate Room 1".to_string(),
            },
            Venue {
                id: 12,
                name: "Debate Room 12".to_string(),
            },
        ]);

        assert_eq!(index.len(), 2);
        assert_eq!(index.name(12), Some("Debate Room 12"));
        assert_eq!(index.name(3), None);
        assert_eq!(index.name_or_id(3), "3");
    }
}
