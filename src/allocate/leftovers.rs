//! Rows which did not fit in a batch, turned into a list a person on the tab
//! team can work through by hand.

use serde::Serialize;
use tabled::Tabled;

use crate::{allocate::AllocationRow, error::Result};

/// Finds a human name for an email address.
pub trait NameLookup {
    fn name_for_email(&mut self, email: &str) -> Result<Option<String>>;
}

impl<T: NameLookup + ?Sized> NameLookup for &mut T {
    fn name_for_email(&mut self, email: &str) -> Result<Option<String>> {
        (**self).name_for_email(email)
    }
}

#[derive(Serialize, Tabled, Clone, Debug, PartialEq, Eq)]
pub struct ReconciledRow {
    #[tabled(rename = "Room")]
    pub venue: String,
    /// The participant's name, or their email if we could not find one.
    #[tabled(rename = "Participant")]
    pub name: String,
}

/// Every leftover row comes back, in order. Rows whose name cannot be found
/// (or whose lookup fails) show the raw email instead.
#[tracing::instrument(skip_all, fields(leftover = leftover.len()))]
pub fn reconcile(
    leftover: &[AllocationRow],
    mut names: impl NameLookup,
) -> Vec<ReconciledRow> {
    leftover
        .iter()
        .map(|row| {
            let name = match names.name_for_email(&row.email) {
                Ok(Some(name)) => name,
                Ok(None) => {
                    tracing::debug!("no name known for {}", row.email);
                    row.email.clone()
                }
                Err(e) => {
                    tracing::warn!("could not look up {}: {e}", row.email);
                    row.email.clone()
                }
            };
            ReconciledRow {
                venue: row.venue.clone(),
                name,
            }
        })
        .collect()
}

/// Renders the report as a two-column table.
pub fn render(rows: &[ReconciledRow]) -> String {
    tabled::Table::new(rows).to_string()
}
