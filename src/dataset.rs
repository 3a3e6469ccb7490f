use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::info;

use crate::error::Result;
use crate::types::Area;

/// The postal-code areas of the country, loaded once and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct AreaDataset {
    areas: Vec<Area>,
}

impl AreaDataset {
    pub fn new(areas: Vec<Area>) -> AreaDataset {
        AreaDataset { areas }
    }

    /// Read a JSON array of areas from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<AreaDataset> {
        let areas: Vec<Area> = serde_json::from_reader(reader)?;
        info!("loaded {} postal-code areas", areas.len());
        Ok(AreaDataset::new(areas))
    }

    /// Read a JSON array of areas from a file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<AreaDataset> {
        let file = File::open(path.as_ref())?;
        info!("reading areas from {}", path.as_ref().display());
        AreaDataset::from_reader(BufReader::new(file))
    }

    pub fn from_json_str(s: &str) -> Result<AreaDataset> {
        AreaDataset::from_reader(s.as_bytes())
    }

    /// Areas in dataset order.
    pub fn areas(&self) -> &[Area] {
        &self.areas[..]
    }

    /// Look up an area by its postal code.
    pub fn get(&self, code: &str) -> Option<&Area> {
        self.areas.iter().find(|a| a.code == code)
    }

    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }
}

impl AsRef<[Area]> for AreaDataset {
    fn as_ref(&self) -> &[Area] {
        self.areas()
    }
}
