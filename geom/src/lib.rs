//! Just enough geometry to decide whether a building footprint belongs to a region: GPS points,
//! a north/south/east/west bounding box, and an approximate centroid test on GeoJSON features.

#[macro_use]
extern crate log;

mod bounds;
mod gps;
mod region;

pub use crate::bounds::BoundingBox;
pub use crate::gps::LonLat;
pub use crate::region::{is_in_region, outer_ring_points};
