//! Pick a circle on the map, find the Finnish postal-code areas inside or overlapping it, and
//! build a tori.fi search restricted to those postal codes.
//!
//! The flow follows the map front-end: viewport changes update a `Session`'s center and radius,
//! the `Session` selects areas from the `AreaDataset` and builds a `SearchUrl`, and the url is
//! validated before it may be submitted.

#[macro_use]
extern crate serde_derive;

mod types;
pub use types::*;
pub mod config;
pub mod dataset;
pub mod error;
pub mod export;
pub mod prepare;
pub mod search_url;
pub mod select;
pub mod session;
pub mod url_state;
pub mod util;
pub mod viewport;

pub use config::Config;
pub use dataset::AreaDataset;
pub use error::{Error, SearchError};
pub use search_url::SearchUrl;
pub use select::select;
pub use session::{SelectionState, Session};
pub use util::distance;
pub use viewport::{min_radius, ViewportEvent, ViewportTracker};
