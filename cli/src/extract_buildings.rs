use std::path::PathBuf;

use anyhow::Result;
use structopt::StructOpt;

use footprints::ExtractConfig;
use geom::BoundingBox;
use util::{prettyprint_bytes, prettyprint_usize};

/// Overrides for individual edges of the bounding box, in degrees.
#[derive(StructOpt)]
pub struct BoundsFlags {
    /// The maximum latitude
    #[structopt(long, allow_hyphen_values = true)]
    north: Option<f64>,
    /// The minimum latitude
    #[structopt(long, allow_hyphen_values = true)]
    south: Option<f64>,
    /// The maximum longitude
    #[structopt(long, allow_hyphen_values = true)]
    east: Option<f64>,
    /// The minimum longitude
    #[structopt(long, allow_hyphen_values = true)]
    west: Option<f64>,
}

impl BoundsFlags {
    fn apply(&self, bounds: &mut BoundingBox) {
        if let Some(x) = self.north {
            bounds.north = x;
        }
        if let Some(x) = self.south {
            bounds.south = x;
        }
        if let Some(x) = self.east {
            bounds.east = x;
        }
        if let Some(x) = self.west {
            bounds.west = x;
        }
    }
}

pub fn run(
    config_path: Option<PathBuf>,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    max_features: Option<usize>,
    bounds: BoundsFlags,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => {
            info!("Loading config from {}", path.display());
            ExtractConfig::load(path)?
        }
        None => ExtractConfig::default(),
    };
    if let Some(input) = input {
        config.input = input;
    }
    if let Some(output) = output {
        config.output = output;
    }
    if let Some(n) = max_features {
        config.max_features = n;
    }
    bounds.apply(&mut config.bounds);

    let report = footprints::extract(&config)?;
    match report.output {
        Some(output) => println!(
            "Wrote {} of {} scanned buildings to {} ({})",
            prettyprint_usize(report.kept),
            prettyprint_usize(report.scanned),
            output.path.display(),
            prettyprint_bytes(output.bytes)
        ),
        None => println!(
            "None of the {} scanned buildings are in the region; nothing written",
            prettyprint_usize(report.scanned)
        ),
    }
    Ok(())
}
