use anyhow::{anyhow, Result};
use geojson::{Geometry, PolygonType, Position, Value};

use crate::{BoundingBox, LonLat};

/// Decides if a GeoJSON feature belongs to a region, by checking whether the approximate center
/// of its outer ring(s) lies within `bounds`. Only Polygons and MultiPolygons can match. Features
/// with missing or malformed geometry never match; problems are logged, not returned.
///
/// A MultiPolygon is judged by the blended center of all of its parts, so one straddling the
/// boundary may land on either side.
pub fn is_in_region(feature: &serde_json::Value, bounds: &BoundingBox) -> bool {
    let geometry = match feature.get("geometry") {
        Some(geometry) if geometry.get("coordinates").is_some() => geometry,
        _ => return false,
    };
    match approx_center(geometry) {
        Ok(Some(center)) => bounds.contains(center),
        Ok(None) => false,
        Err(err) => {
            warn!("Error checking bounds: {}", err);
            false
        }
    }
}

fn approx_center(geometry: &serde_json::Value) -> Result<Option<LonLat>> {
    let geometry = Geometry::from_json_value(geometry.clone())?;
    Ok(match outer_ring_points(&geometry)? {
        Some(pts) => LonLat::center(&pts),
        None => None,
    })
}

/// Returns the points of the outer boundary: the first ring of a Polygon, or the first rings of
/// every part of a MultiPolygon, concatenated. Holes are ignored. Other geometry types give
/// `None`.
pub fn outer_ring_points(geometry: &Geometry) -> Result<Option<Vec<LonLat>>> {
    let rings = match geometry.value {
        Value::Polygon(ref polygon) => vec![outer_ring(polygon)?],
        Value::MultiPolygon(ref parts) => parts
            .iter()
            .map(outer_ring)
            .collect::<Result<Vec<_>>>()?,
        _ => return Ok(None),
    };

    let mut pts = Vec::new();
    for ring in rings {
        for pos in ring {
            pts.push(LonLat::from_position(pos)?);
        }
    }
    Ok(Some(pts))
}

fn outer_ring(polygon: &PolygonType) -> Result<&Vec<Position>> {
    polygon
        .first()
        .ok_or_else(|| anyhow!("polygon doesn't have any rings"))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn polygon(rings: serde_json::Value) -> serde_json::Value {
        json!({
            "type": "Feature",
            "properties": {"release": 1},
            "geometry": {"type": "Polygon", "coordinates": rings},
        })
    }

    #[test]
    fn square_in_austin() {
        let feature = polygon(json!([[
            [-97.7, 30.3],
            [-97.6, 30.3],
            [-97.6, 30.4],
            [-97.7, 30.4],
            [-97.7, 30.3]
        ]]));
        assert!(is_in_region(&feature, &BoundingBox::travis_county()));
    }

    #[test]
    fn east_of_the_box() {
        let feature = polygon(json!([[[-95.0, 30.3], [-95.0, 30.4], [-95.0, 30.5]]]));
        assert!(!is_in_region(&feature, &BoundingBox::travis_county()));
    }

    #[test]
    fn holes_are_ignored() {
        // The hole is far away; if it counted, the center would leave the box
        let feature = polygon(json!([
            [[-97.7, 30.3], [-97.6, 30.3], [-97.6, 30.4], [-97.7, 30.3]],
            [[-80.0, 10.0], [-80.0, 10.1], [-80.1, 10.1], [-80.0, 10.0]]
        ]));
        assert!(is_in_region(&feature, &BoundingBox::travis_county()));
    }

    #[test]
    fn multipolygon_blends_all_outer_rings() {
        // Each part alone is outside the box, but the blended center is inside
        let feature = json!({
            "type": "Feature",
            "geometry": {
                "type": "MultiPolygon",
                "coordinates": [
                    [[[-99.0, 30.4], [-99.0, 30.4]]],
                    [[[-96.4, 30.4], [-96.4, 30.4]]]
                ]
            }
        });
        assert!(is_in_region(&feature, &BoundingBox::travis_county()));

        let geometry = Geometry::from_json_value(feature["geometry"].clone()).unwrap();
        assert_eq!(outer_ring_points(&geometry).unwrap().unwrap().len(), 4);
    }

    #[test]
    fn unusable_features_never_match() {
        let b = BoundingBox::travis_county();
        for feature in [
            json!(42),
            json!({"type": "Feature"}),
            json!({"type": "Feature", "geometry": null}),
            json!({"type": "Feature", "geometry": {"type": "Polygon"}}),
            json!({"type": "Feature", "geometry": {"type": "Point", "coordinates": [-97.65, 30.35]}}),
            json!({"type": "Feature", "geometry": {"type": "Polygon", "coordinates": []}}),
            json!({"type": "Feature", "geometry": {"type": "Polygon", "coordinates": [[]]}}),
            json!({"type": "Feature", "geometry": {"type": "MultiPolygon", "coordinates": []}}),
            json!({"type": "Feature", "geometry": {"type": "MultiPolygon", "coordinates": [[]]}}),
            json!({"type": "Feature", "geometry": {"type": "Polygon", "coordinates": [[["a", "b"]]]}}),
            json!({"type": "Feature", "geometry": {"type": "Polygon", "coordinates": [[[-97.65]]]}}),
        ] {
            assert!(!is_in_region(&feature, &b), "{}", feature);
        }
    }

    #[test]
    fn other_regions() {
        let feature = polygon(json!([[[-95.0, 29.7], [-95.1, 29.8]]]));
        assert!(is_in_region(
            &feature,
            &BoundingBox::new(30.2, 29.5, -94.9, -95.8)
        ));
        assert!(!is_in_region(&feature, &BoundingBox::travis_county()));
    }
}
