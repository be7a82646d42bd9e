use thiserror::Error;

use crate::registration::RegistrationCodeError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// A resource URL which does not end in `/<decimal id>`. We never guess
    /// an id, as a wrong one silently moves a person to the wrong room.
    #[error("could not parse identifier from url {url:?}")]
    MalformedIdentifier { url: String },

    #[error("no matching category found for room {venue:?}")]
    CategoryNotFound { venue: String },

    #[error("cannot write row ({}, {}): {reason}", row.0, row.1)]
    InvalidRow {
        row: (String, String),
        reason: &'static str,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("category file error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("participant store query failed: {0}")]
    Store(#[from] diesel::result::Error),

    #[error("could not open participant store: {0}")]
    StoreConnection(#[from] diesel::ConnectionError),

    #[error("could not migrate participant store: {0}")]
    Migration(String),

    #[error(transparent)]
    RegistrationCode(#[from] RegistrationCodeError),

    /// The code matches nobody, its participant is already bound, or the
    /// chat identity is already bound to someone else.
    #[error("no unbound participant with registration code {barcode}")]
    NotBindable { barcode: String },
}
