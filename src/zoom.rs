//! Registrants of a videoconference meeting, as exported page by page from
//! the videoconferencing platform.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::{allocate::leftovers::NameLookup, error::Result};

/// A meeting sign-up. Registrants are unique by email, but the same person
/// may sign up more than once under different display names.
#[derive(Serialize, Deserialize, Tabled, Clone, Debug, PartialEq, Eq)]
pub struct Registrant {
    #[tabled(rename = "Email")]
    pub email: String,
    #[tabled(rename = "Name")]
    pub name: String,
}

impl Registrant {
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
        }
    }
}

#[derive(Deserialize, Debug)]
struct RegistrantPayload {
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
    #[serde(default)]
    email: String,
}

impl RegistrantPayload {
    fn into_registrant(self) -> Registrant {
        let name = [self.first_name, self.last_name]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        Registrant {
            email: self.email,
            name,
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct RegistrantPage {
    /// Required, so that a bare list of registrants is rejected instead of
    /// reading as pages with nobody on them.
    registrants: Vec<RegistrantPayload>,
    #[serde(default)]
    pub page_count: Option<u32>,
    #[serde(default)]
    pub page_number: Option<u32>,
}

/// A registrant export holds either a single page or every page of the
/// listing.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum RegistrantExport {
    Pages(Vec<RegistrantPage>),
    Page(RegistrantPage),
}

/// Concatenates the registrants of every page, in page order.
pub fn merge_pages(pages: Vec<RegistrantPage>) -> Vec<Registrant> {
    if let Some(last) = pages.last()
        && let Some(count) = last.page_count
        && count as usize != pages.len()
    {
        tracing::warn!(
            "registrant export has {} of {count} pages",
            pages.len()
        );
    }

    pages
        .into_iter()
        .flat_map(|page| page.registrants)
        .map(RegistrantPayload::into_registrant)
        .collect()
}

pub fn parse_registrants(json: &str) -> Result<Vec<Registrant>> {
    let pages = match serde_json::from_str::<RegistrantExport>(json)? {
        RegistrantExport::Pages(pages) => pages,
        RegistrantExport::Page(page) => vec![page],
    };
    Ok(merge_pages(pages))
}

/// Looks names up in the registrant list. Emails are compared
/// case-insensitively; the first registrant with an email wins.
pub struct RegistrantNames {
    names: HashMap<String, String>,
}

impl RegistrantNames {
    pub fn new(registrants: &[Registrant]) -> Self {
        let mut names = HashMap::new();
        for registrant in registrants {
            if registrant.email.is_empty() || registrant.name.is_empty() {
                continue;
            }
            names
                .entry(registrant.email.to_lowercase())
                .or_insert_with(|| registrant.name.clone());
        }
        Self { names }
    }
}

impl NameLookup for RegistrantNames {
    fn name_for_email(&mut self, email: &str) -> Result<Option<String>> {
        Ok(self.names.get(&email.to_lowercase()).cloned())
    }
}
