use std::fmt;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::LonLat;

/// A rectangle in GPS space, described by its four edges in degrees. All edges are inclusive.
/// Boxes crossing the antimeridian aren't supported.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct BoundingBox {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl BoundingBox {
    pub fn new(north: f64, south: f64, east: f64, west: f64) -> BoundingBox {
        BoundingBox {
            north,
            south,
            east,
            west,
        }
    }

    /// A rough box around Travis County, Texas.
    pub fn travis_county() -> BoundingBox {
        BoundingBox::new(30.8, 30.0, -97.4, -98.2)
    }

    pub fn contains(&self, pt: LonLat) -> bool {
        pt.latitude >= self.south
            && pt.latitude <= self.north
            && pt.longitude >= self.west
            && pt.longitude <= self.east
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("north", self.north),
            ("south", self.south),
            ("east", self.east),
            ("west", self.west),
        ] {
            if !value.is_finite() {
                bail!("{} bound {} isn't a finite number", name, value);
            }
        }
        if self.south > self.north {
            bail!("south bound {} is above north bound {}", self.south, self.north);
        }
        if self.west > self.east {
            bail!("west bound {} is east of east bound {}", self.west, self.east);
        }
        Ok(())
    }
}

impl Default for BoundingBox {
    fn default() -> BoundingBox {
        BoundingBox::travis_county()
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "north {}, south {}, east {}, west {}",
            self.north, self.south, self.east, self.west
        )
    }
}
