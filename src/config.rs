use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::time::Duration;

use log::info;

use crate::error::Result;
use crate::search_url::{DEFAULT_SEARCH_BASE, MAX_URL_LENGTH};
use crate::types::Coordinate;

/// Tunables of the selection front-end. Every field has a default, so a config file only needs
/// to name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Map center before the url or device location say otherwise. Helsinki.
    pub default_center: Coordinate,
    pub default_radius_m: f64,
    pub default_zoom: f64,
    pub max_url_length: usize,
    /// Search page the `q` parameter is appended to.
    pub search_base: String,
    /// Pause after the last map change before the page url is rewritten.
    pub url_write_delay_ms: u64,
    /// Treat an empty selection as an error.
    pub strict: bool,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            default_center: Coordinate::new(60.17952, 24.93545),
            default_radius_m: 5_000.0,
            default_zoom: 13.0,
            max_url_length: MAX_URL_LENGTH,
            search_base: DEFAULT_SEARCH_BASE.to_owned(),
            url_write_delay_ms: 1_000,
            strict: true,
        }
    }
}

impl Config {
    pub fn from_reader<R: Read>(reader: R) -> Result<Config> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Config> {
        info!("reading config from {}", path.as_ref().display());
        Config::from_reader(BufReader::new(File::open(path)?))
    }

    pub fn url_write_delay(&self) -> Duration {
        Duration::from_millis(self.url_write_delay_ms)
    }
}
