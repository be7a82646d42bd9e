//! Operator-defined venue categories.
//!
//! A category claims every venue whose name starts with its `prefix` and
//! ends with its `suffix`. Each category gets its own batch file, and may
//! carry a shared meeting link. Categories are expected not to overlap; if
//! they do, the first configured one wins.

use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};

/// The category venues fall into when no categories are configured (or
/// when none of them match).
pub static UNCATEGORISED: Category = Category {
    name: String::new(),
    prefix: String::new(),
    suffix: String::new(),
    url: None,
};

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub suffix: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<Url>,
}

impl Category {
    pub fn new(
        name: impl Into<String>,
        prefix: impl Into<String>,
        suffix: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            prefix: prefix.into(),
            suffix: suffix.into(),
            url: None,
        }
    }

    /// An empty prefix or suffix matches anything.
    pub fn matches(&self, venue: &str) -> bool {
        venue.starts_with(&self.prefix) && venue.ends_with(&self.suffix)
    }

    pub fn is_uncategorised(&self) -> bool {
        *self == UNCATEGORISED
    }
}

/// The layout of a category file:
///
/// ```toml
/// [[category]]
/// name = "debates"
/// prefix = "Debate Room"
/// url = "https://example.zoom.us/j/123"
/// ```
#[derive(Deserialize, Default)]
struct CategoryFile {
    #[serde(default)]
    category: Vec<Category>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Categories(Vec<Category>);

impl Categories {
    pub fn new(categories: Vec<Category>) -> Self {
        Self(categories)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let file: CategoryFile = toml::from_str(text)?;
        Ok(Self(file.category))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_toml(&std::fs::read_to_string(path)?)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Category> {
        self.0.get(index)
    }

    /// The position of the first category matching `venue`.
    ///
    /// With no categories configured every venue is uncategorised, which is
    /// `Ok(None)` and not an error.
    pub fn classify(&self, venue: &str) -> Result<Option<usize>> {
        if self.0.is_empty() {
            return Ok(None);
        }

        self.0
            .iter()
            .position(|category| category.matches(venue))
            .map(Some)
            .ok_or_else(|| Error::CategoryNotFound {
                venue: venue.to_string(),
            })
    }

    pub fn lookup(&self, venue: &str) -> Result<&Category> {
        Ok(match self.classify(venue)? {
            Some(index) => &self.0[index],
            None => &UNCATEGORISED,
        })
    }
}
