use std::{error, fmt};

/// The input doesn't look like the line-oriented FeatureCollection we know how to stream. These
/// are always fatal and are detected before any feature is read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatError {
    /// The first line doesn't start with `{"type":"FeatureCollection"`.
    NotFeatureCollection,
    /// The input ended before any line mentioning `"features"`.
    MissingFeatures,
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FormatError::NotFeatureCollection => write!(
                f,
                "input doesn't appear to be a GeoJSON FeatureCollection; the first line must \
                 start with {{\"type\":\"FeatureCollection\""
            ),
            FormatError::MissingFeatures => write!(f, "couldn't find the features array"),
        }
    }
}

impl error::Error for FormatError {}
