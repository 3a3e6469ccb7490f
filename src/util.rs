use crate::types::{Bounds, Coordinate, Polygon};

/// Mean earth radius in meters.
pub const EARTH_RADIUS: f64 = 6_371_000.0;

/// Great-circle distance in meters between two coordinates, by the haversine formula.
pub fn distance(a: Coordinate, b: Coordinate) -> f64 {
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let d_phi = (b.lat - a.lat).to_radians();
    let d_lambda = (b.lon - a.lon).to_radians();

    let h = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS * c
}

/// Find the bounds over an iterator of coordinates.
pub fn coordinate_bounds<'a, I: Iterator<Item = &'a Coordinate>>(iter: I) -> Bounds {
    iter.fold(Bounds {
                  north: f64::MIN,
                  south: f64::MAX,
                  east: f64::MIN,
                  west: f64::MAX,
              },
              |b, c| {
        Bounds {
            north: f64::max(b.north, c.lat),
            south: f64::min(b.south, c.lat),
            east: f64::max(b.east, c.lon),
            west: f64::min(b.west, c.lon),
        }
    })
}

/// Bounding box of every vertex of a polygon.
pub fn polygon_bounds(polygon: &Polygon) -> Bounds {
    coordinate_bounds(polygon.iter().flat_map(|ring| ring.iter()))
}
