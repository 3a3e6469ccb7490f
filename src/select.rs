use log::debug;

use crate::types::{Area, Coordinate, Mode};
use crate::util::distance;

/// Point lies strictly within `radius` meters of `center`.
#[inline]
pub fn touches(center: Coordinate, radius: f64, p: Coordinate) -> bool {
    distance(center, p) < radius
}

/// Test one area against the circle. Only the polygon vertices are sampled, so an area whose edge
/// crosses the circle with every vertex outside it is not considered overlapping.
pub fn matches(area: &Area, center: Coordinate, radius: f64, mode: Mode) -> bool {
    let touching = |p: &Coordinate| touches(center, radius, *p);
    match mode {
        Mode::Inside => area.polygon.iter().all(|ring| ring.iter().all(&touching)),
        Mode::Overlap => area.polygon.iter().any(|ring| ring.iter().any(&touching)),
    }
}

/// Filter areas by their relation to the circle around `center`. The result keeps the order of
/// `areas` and may be empty.
pub fn select<A: AsRef<[Area]> + ?Sized>(areas: &A,
                                         center: Coordinate,
                                         radius: f64,
                                         mode: Mode)
                                         -> Vec<&Area> {
    let selected: Vec<&Area> = areas.as_ref()
        .iter()
        .filter(|a| matches(a, center, radius, mode))
        .collect();
    debug!("{} of {} areas {} {}m circle at {}",
           selected.len(),
           areas.as_ref().len(),
           mode,
           radius,
           center);
    selected
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(code: &str, lat: f64, lon: f64, half: f64) -> Area {
        Area {
            code: code.to_owned(),
            name: code.to_owned(),
            polygon: vec![vec![Coordinate::new(lat - half, lon - half),
                               Coordinate::new(lat - half, lon + half),
                               Coordinate::new(lat + half, lon + half),
                               Coordinate::new(lat + half, lon - half)]],
        }
    }

    fn codes(areas: &[&Area]) -> Vec<String> {
        areas.iter().map(|a| a.code.clone()).collect()
    }

    #[test]
    fn strict_inequality_on_radius() {
        let c = Coordinate::new(60.0, 25.0);
        let p = Coordinate::new(60.01, 25.0);
        let d = distance(c, p);
        assert!(!touches(c, d, p));
        assert!(touches(c, d + 1e-6, p));
    }

    #[test]
    fn inside_needs_every_vertex() {
        let areas = vec![square("small", 60.0, 25.0, 0.001), square("big", 60.0, 25.0, 0.1)];
        let center = Coordinate::new(60.0, 25.0);
        assert_eq!(codes(&select(&areas, center, 1_000.0, Mode::Inside)), vec!["small"]);
        assert_eq!(codes(&select(&areas, center, 1_000.0, Mode::Overlap)), vec!["small"]);
        assert_eq!(codes(&select(&areas, center, 20_000.0, Mode::Inside)),
                   vec!["small", "big"]);
    }

    #[test]
    fn overlap_needs_one_vertex_of_any_ring() {
        let mut area = square("two-part", 61.0, 26.0, 0.01);
        area.polygon.push(vec![Coordinate::new(60.0, 25.0)]);
        let areas = vec![area];
        let center = Coordinate::new(60.0, 25.0);
        assert_eq!(select(&areas, center, 10.0, Mode::Overlap).len(), 1);
        assert!(select(&areas, center, 10.0, Mode::Inside).is_empty());
    }

    #[test]
    fn edge_crossing_without_vertices_is_not_overlap() {
        // Circle sits in the middle of a huge square; no vertex is near.
        let areas = vec![square("huge", 60.0, 25.0, 1.0)];
        assert!(select(&areas, Coordinate::new(60.0, 25.0), 5_000.0, Mode::Overlap).is_empty());
    }

    #[test]
    fn keeps_dataset_order() {
        let areas = vec![square("c", 60.02, 25.0, 0.001),
                         square("a", 60.0, 25.0, 0.001),
                         square("b", 60.01, 25.0, 0.001)];
        let selected = select(&areas, Coordinate::new(60.01, 25.0), 5_000.0, Mode::Overlap);
        assert_eq!(codes(&selected), vec!["c", "a", "b"]);
    }

    #[test]
    fn empty_polygon_is_vacuously_inside() {
        let areas = vec![Area { code: "0".into(), name: "empty".into(), polygon: vec![] }];
        let center = Coordinate::new(60.0, 25.0);
        assert_eq!(select(&areas, center, 1.0, Mode::Inside).len(), 1);
        assert!(select(&areas, center, 1.0, Mode::Overlap).is_empty());
    }
}
