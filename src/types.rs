use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Represent some map coordinate in degrees. Serialized as a `[lat, lon]` pair, which is how the
/// area dataset stores polygon points.
#[derive(Debug, PartialEq, Copy, Clone, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Coordinate {
        Coordinate { lat, lon }
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from(pair: [f64; 2]) -> Coordinate {
        Coordinate::new(pair[0], pair[1])
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(c: Coordinate) -> [f64; 2] {
        [c.lat, c.lon]
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lon)
    }
}

/// Represent some map bounds, generally in degrees.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct Bounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl Bounds {
    pub fn north_west(&self) -> Coordinate {
        Coordinate::new(self.north, self.west)
    }
    pub fn north_east(&self) -> Coordinate {
        Coordinate::new(self.north, self.east)
    }
    pub fn south_west(&self) -> Coordinate {
        Coordinate::new(self.south, self.west)
    }
    /// Midpoint of the bounds in degrees, which is what a map widget reports as its center.
    pub fn center(&self) -> Coordinate {
        Coordinate::new((self.north + self.south) / 2.0, (self.east + self.west) / 2.0)
    }
}

/// One closed loop of points. The first point is not repeated at the end.
pub type Ring = Vec<Coordinate>;

/// A postal-code area boundary: one ring per part of the multipolygon.
pub type Polygon = Vec<Ring>;

/// A named postal-code area. Field names on the wire follow the Finnish dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Area {
    #[serde(rename = "postinumeroalue", alias = "code")]
    pub code: String,
    #[serde(rename = "nimi", alias = "name")]
    pub name: String,
    pub polygon: Polygon,
}

impl Area {
    /// Iterate every vertex of every ring.
    pub fn points(&self) -> impl Iterator<Item = &Coordinate> {
        self.polygon.iter().flat_map(|ring| ring.iter())
    }
}

/// How an area must relate to the search circle to be selected.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Every vertex lies within the circle.
    Inside,
    /// Some vertex lies within the circle.
    Overlap,
}

impl Default for Mode {
    fn default() -> Mode {
        Mode::Inside
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Mode, Error> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inside" => Ok(Mode::Inside),
            "overlap" => Ok(Mode::Overlap),
            _ => Err(Error::InvalidMode(s.to_owned())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Mode::Inside => f.write_str("inside"),
            Mode::Overlap => f.write_str("overlap"),
        }
    }
}
