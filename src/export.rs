use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject, Value};
use serde_json::json;

use crate::types::{Area, Coordinate, Ring};
use crate::util::{coordinate_bounds, polygon_bounds};

fn position(c: &Coordinate) -> Vec<f64> {
    vec![c.lon, c.lat]
}

/// GeoJSON rings repeat their first position at the end.
fn closed_ring(ring: &Ring) -> Vec<Vec<f64>> {
    let mut positions: Vec<Vec<f64>> = ring.iter().map(position).collect();
    if let (Some(first), Some(last)) = (ring.first(), ring.last()) {
        if first != last {
            positions.push(position(first));
        }
    }
    positions
}

/// Area as a `MultiPolygon` feature with one polygon per ring, tagged with its code and name.
pub fn area_feature(area: &Area) -> Feature {
    let b = polygon_bounds(&area.polygon);
    let mut properties = JsonObject::new();
    properties.insert("code".to_owned(), json!(area.code));
    properties.insert("name".to_owned(), json!(area.name));
    Feature {
        bbox: Some(vec![b.west, b.south, b.east, b.north]),
        geometry: Some(Geometry::new(Value::MultiPolygon(area.polygon
            .iter()
            .filter(|ring| !ring.is_empty())
            .map(|ring| vec![closed_ring(ring)])
            .collect()))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

/// The search circle as a point with a `radius` property in meters.
pub fn circle_feature(center: Coordinate, radius: f64) -> Feature {
    let mut properties = JsonObject::new();
    properties.insert("radius".to_owned(), json!(radius));
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Point(position(&center)))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

/// Selected areas followed by the circle, for a map front-end to draw.
pub fn selection_geojson(areas: &[&Area], center: Coordinate, radius: f64) -> GeoJson {
    let mut features: Vec<Feature> = areas.iter().map(|a| area_feature(a)).collect();
    features.push(circle_feature(center, radius));
    let bbox = if areas.is_empty() {
        None
    } else {
        let b = coordinate_bounds(areas.iter().flat_map(|a| a.points()));
        Some(vec![b.west, b.south, b.east, b.north])
    };
    GeoJson::FeatureCollection(FeatureCollection { bbox, features, foreign_members: None })
}
