use std::io;

use thiserror::Error;

/// Failures while loading, preparing or parsing data.
#[derive(Debug, Error)]
pub enum Error {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed source record {code:?}: {reason}")]
    MalformedSourceRecord { code: String, reason: String },
    #[error("unknown containment mode {0:?}, expected \"inside\" or \"overlap\"")]
    InvalidMode(String),
    #[error("invalid url {0:?}")]
    InvalidUrl(String),
}

pub type Result<T> = ::std::result::Result<T, Error>;

/// Reasons a search cannot be submitted. These are ordinary states of the form, never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("search url is {length} characters, longer than the {max} tori.fi accepts")]
    OversizedQuery { length: usize, max: usize },
    #[error("no postal-code area selected")]
    EmptySelection,
}

impl SearchError {
    /// Message shown next to the disabled submit button.
    pub fn user_message(&self) -> &'static str {
        match *self {
            SearchError::OversizedQuery { .. } => {
                "Liian suuri hakualue, valitsethan pienemmän alueen."
            }
            SearchError::EmptySelection => {
                "Liian pieni alue, ei yhtään postinumeroaluetta näin pienellä alueella"
            }
        }
    }
}
