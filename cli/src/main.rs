//! Tools for preparing building footprint data, bundled as a single executable.

#[macro_use]
extern crate log;

mod extract_buildings;

use std::path::PathBuf;

use anyhow::Result;
use structopt::StructOpt;

use footprints::ExtractConfig;

#[derive(StructOpt)]
#[structopt(name = "fpcli", about = "Building footprint data prep")]
enum Command {
    /// Reads a large GeoJSON FeatureCollection of buildings and writes a smaller one, with only
    /// the buildings whose approximate center is in a bounding box. Defaults to Travis County
    /// from data/Texas.geojson.
    ExtractBuildings {
        /// A JSON config file, like the output of `default-config`. The other flags override
        /// values from this file.
        #[structopt(long)]
        config: Option<PathBuf>,
        /// The path to the input GeoJSON file
        #[structopt(long)]
        input: Option<PathBuf>,
        /// The path to write the extracted buildings
        #[structopt(long)]
        output: Option<PathBuf>,
        /// Stop after finding this many buildings
        #[structopt(long)]
        max_features: Option<usize>,
        #[structopt(flatten)]
        bounds: extract_buildings::BoundsFlags,
    },
    /// Print the default extraction config as JSON
    DefaultConfig,
}

fn main() -> Result<()> {
    let cmd = Command::from_args();

    // The config is printed to STDOUT, so keep that clean
    if !matches!(cmd, Command::DefaultConfig) {
        util::logger::setup();
    }

    match cmd {
        Command::ExtractBuildings {
            config,
            input,
            output,
            max_features,
            bounds,
        } => extract_buildings::run(config, input, output, max_features, bounds)?,
        Command::DefaultConfig => println!("{}", util::to_json(&ExtractConfig::default())?),
    }
    Ok(())
}
