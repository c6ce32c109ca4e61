use std::fmt;

use anyhow::{bail, Result};

// longitude is x, latitude is y
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct LonLat {
    pub longitude: f64,
    pub latitude: f64,
}

impl LonLat {
    pub fn new(lon: f64, lat: f64) -> LonLat {
        LonLat {
            longitude: lon,
            latitude: lat,
        }
    }

    /// Interprets a GeoJSON position. Anything past the first two values (like elevation) is
    /// ignored.
    pub fn from_position(pos: &[f64]) -> Result<LonLat> {
        if pos.len() < 2 {
            bail!("position {:?} needs at least a longitude and latitude", pos);
        }
        Ok(LonLat::new(pos[0], pos[1]))
    }

    /// The arithmetic mean of all points. Not an area-weighted centroid; every vertex counts the
    /// same, so densely-sampled edges pull the result towards them. Returns `None` for no points.
    pub fn center(pts: &[LonLat]) -> Option<LonLat> {
        if pts.is_empty() {
            return None;
        }
        let mut lon = 0.0;
        let mut lat = 0.0;
        for pt in pts {
            lon += pt.longitude;
            lat += pt.latitude;
        }
        let len = pts.len() as f64;
        Some(LonLat {
            longitude: lon / len,
            latitude: lat / len,
        })
    }
}

impl fmt::Display for LonLat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "LonLat({0}, {1})", self.longitude, self.latitude)
    }
}
