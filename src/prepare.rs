//! One-off conversion of the public postal-code polygon dataset into the compact area list.
//!
//! Source records carry their boundary as WKT text,
//! `MULTIPOLYGON (((lon lat, lon lat, ...)), ((lon lat, ...), (lon lat, ...)))`. Every ring of every
//! `((...))` part, outer boundary or hole, becomes one ring of the area, and points are flipped to
//! `[lat, lon]`.

use std::io::{Read, Write};

use log::info;
use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::types::{Area, Coordinate, Polygon, Ring};

const PREFIX: &str = "MULTIPOLYGON (((";
const SUFFIX: &str = ")))";
const PART_SEPARATOR: &str = ")), ((";
const RING_SEPARATOR: &str = "), (";
const POINT_SEPARATOR: &str = ", ";

/// A record as published in the source dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRecord {
    pub multi_polygon: String,
    pub postinumeroalue: String,
    pub nimi: String,
}

impl SourceRecord {
    fn malformed<S: Into<String>>(&self, reason: S) -> Error {
        Error::MalformedSourceRecord {
            code: self.postinumeroalue.clone(),
            reason: reason.into(),
        }
    }

    fn parse_point(&self, text: &str) -> Result<Coordinate> {
        let numbers = text.split(' ')
            .map(|n| n.parse::<f64>().map_err(|_| self.malformed(format!("bad number {:?}", n))))
            .collect::<Result<Vec<f64>>>()?;
        match numbers[..] {
            [lon, lat] => Ok(Coordinate::new(lat, lon)),
            _ => Err(self.malformed(format!("point {:?} is not a lon/lat pair", text))),
        }
    }

    fn parse_ring(&self, text: &str) -> Result<Ring> {
        text.split(POINT_SEPARATOR).map(|p| self.parse_point(p)).collect()
    }

    /// Parse the WKT boundary into rings of `[lat, lon]` points.
    pub fn polygon(&self) -> Result<Polygon> {
        let body = self.multi_polygon
            .strip_prefix(PREFIX)
            .and_then(|s| s.strip_suffix(SUFFIX))
            .filter(|s| !s.is_empty())
            .ok_or_else(|| self.malformed("not a MULTIPOLYGON (((...))) value"))?;
        body.split(PART_SEPARATOR)
            .flat_map(|part| part.split(RING_SEPARATOR))
            .map(|ring| self.parse_ring(ring))
            .collect()
    }

    pub fn to_area(&self) -> Result<Area> {
        Ok(Area {
            code: self.postinumeroalue.clone(),
            name: self.nimi.clone(),
            polygon: self.polygon()?,
        })
    }
}

/// Convert every record, in parallel, keeping input order. A malformed record aborts the whole
/// conversion.
pub fn convert(records: &[SourceRecord]) -> Result<Vec<Area>> {
    let areas = records.par_iter().map(SourceRecord::to_area).collect::<Result<Vec<Area>>>()?;
    info!("converted {} source records", areas.len());
    Ok(areas)
}

/// Read source records as JSON, write the area list as JSON. Returns the number of areas.
pub fn prepare<R: Read, W: Write>(input: R, output: W) -> Result<usize> {
    let records: Vec<SourceRecord> = serde_json::from_reader(input)?;
    let areas = convert(&records)?;
    serde_json::to_writer(output, &areas)?;
    Ok(areas.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(wkt: &str) -> SourceRecord {
        SourceRecord {
            multi_polygon: wkt.to_owned(),
            postinumeroalue: "00100".to_owned(),
            nimi: "Helsinki keskusta - Etu-Töölö".to_owned(),
        }
    }

    #[test]
    fn flips_points_to_lat_lon() {
        let r = record("MULTIPOLYGON (((24.93 60.17, 24.95 60.17, 24.94 60.18)))");
        let area = r.to_area().unwrap();
        assert_eq!(area.code, "00100");
        assert_eq!(area.polygon,
                   vec![vec![Coordinate::new(60.17, 24.93),
                             Coordinate::new(60.17, 24.95),
                             Coordinate::new(60.18, 24.94)]]);
    }

    #[test]
    fn one_ring_per_part() {
        let r = record("MULTIPOLYGON (((24.9 60.1, 25.0 60.1)), ((25.1 60.2, 25.2 60.2, 25.3 60.3)))");
        let polygon = r.polygon().unwrap();
        assert_eq!(polygon.len(), 2);
        assert_eq!(polygon[1].len(), 3);
        assert_eq!(polygon[1][2], Coordinate::new(60.3, 25.3));
    }

    #[test]
    fn holes_become_rings_of_their_own() {
        let r = record("MULTIPOLYGON (((24.9 60.1), (25.0 60.2)))");
        assert_eq!(r.polygon().unwrap(),
                   vec![vec![Coordinate::new(60.1, 24.9)], vec![Coordinate::new(60.2, 25.0)]]);

        let r = record("MULTIPOLYGON (((24.93 60.17, 24.95 60.17, 24.94 60.19), \
                        (24.94 60.175, 24.945 60.175, 24.942 60.18)), ((25.1 60.2, 25.2 60.2)))");
        let polygon = r.polygon().unwrap();
        assert_eq!(polygon.len(), 3);
        assert_eq!(polygon[1],
                   vec![Coordinate::new(60.175, 24.94),
                        Coordinate::new(60.175, 24.945),
                        Coordinate::new(60.18, 24.942)]);
        assert_eq!(polygon[2].len(), 2);
    }

    #[test]
    fn record_with_hole_does_not_abort_conversion() {
        let records = vec![record("MULTIPOLYGON (((24.93 60.17, 24.95 60.17, 24.94 60.19), \
                                   (24.94 60.175, 24.945 60.175, 24.942 60.18)))"),
                           record("MULTIPOLYGON (((24.9 60.1)))")];
        let areas = convert(&records).unwrap();
        assert_eq!(areas.len(), 2);
        assert_eq!(areas[0].polygon.len(), 2);
    }

    #[test]
    fn rejects_other_geometries() {
        match record("POLYGON ((24.9 60.1, 25.0 60.1))").polygon() {
            Err(Error::MalformedSourceRecord { code, .. }) => assert_eq!(code, "00100"),
            other => panic!("unexpected {:?}", other),
        }
        assert!(record("MULTIPOLYGON ((()))").polygon().is_err());
    }

    #[test]
    fn rejects_bad_points() {
        assert!(record("MULTIPOLYGON (((24.9 60.1 3.0)))").polygon().is_err());
        assert!(record("MULTIPOLYGON (((24.9,60.1)))").polygon().is_err());
        assert!(record("MULTIPOLYGON (((24.9 60.1)), (25.0 60.2)))").polygon().is_err());
    }

    #[test]
    fn converts_a_file_in_order() {
        let input = r#"[
            {"multi_polygon": "MULTIPOLYGON (((24.93 60.17, 24.95 60.17)))", "postinumeroalue": "00100", "nimi": "Keskusta"},
            {"multi_polygon": "MULTIPOLYGON (((24.94 60.16)))", "postinumeroalue": "00120", "nimi": "Punavuori"},
            {"multi_polygon": "MULTIPOLYGON (((24.92 60.18)))", "postinumeroalue": "00250", "nimi": "Taka-Töölö"}
        ]"#;
        let mut out = Vec::new();
        assert_eq!(prepare(input.as_bytes(), &mut out).unwrap(), 3);
        let areas: Vec<Area> = serde_json::from_slice(&out).unwrap();
        let codes: Vec<&str> = areas.iter().map(|a| a.code.as_str()).collect();
        assert_eq!(codes, vec!["00100", "00120", "00250"]);
        assert_eq!(areas[1].polygon, vec![vec![Coordinate::new(60.16, 24.94)]]);
    }

    #[test]
    fn one_bad_record_aborts() {
        let records = vec![record("MULTIPOLYGON (((24.9 60.1)))"), record("garbage")];
        assert!(convert(&records).is_err());
    }
}
