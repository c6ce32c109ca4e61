//! Extracts the building footprints belonging to one region out of a huge GeoJSON
//! FeatureCollection, without ever holding the whole input in memory. The input is read line by
//! line and cut into one JSON object per feature; each feature is kept if the approximate center
//! of its outline falls in a bounding box.

#[macro_use]
extern crate log;

mod config;
mod error;
mod extract;
mod scanner;

pub use crate::config::ExtractConfig;
pub use crate::error::FormatError;
pub use crate::extract::{extract, scan, ExtractionReport, OutputSummary, Scan};
pub use crate::scanner::{FeatureReader, RawFeature};
