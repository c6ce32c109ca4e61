use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use geom::BoundingBox;

/// Everything one extraction run needs. Members missing from a config file take the default
/// values, which reproduce the Travis County extraction from the statewide building file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// The large FeatureCollection to read
    pub input: PathBuf,
    /// Where to write the matching features
    pub output: PathBuf,
    /// Features whose approximate center lies in here are kept
    pub bounds: BoundingBox,
    /// Stop scanning once this many features have been kept
    pub max_features: usize,
}

impl Default for ExtractConfig {
    fn default() -> ExtractConfig {
        ExtractConfig {
            input: PathBuf::from("data/Texas.geojson"),
            output: PathBuf::from("data/travis-buildings.json"),
            bounds: BoundingBox::travis_county(),
            max_features: 5000,
        }
    }
}

impl ExtractConfig {
    /// Reads a config from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<ExtractConfig> {
        let path = path.as_ref();
        let contents = fs_err::read_to_string(path)?;
        serde_json::from_str(&contents).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        self.bounds
            .validate()
            .context("invalid bounding box")?;
        if self.max_features == 0 {
            bail!("max_features must be at least 1");
        }
        if self.input == self.output {
            bail!(
                "input and output are both {}; refusing to overwrite the input",
                self.input.display()
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_uses_defaults() {
        let config: ExtractConfig =
            serde_json::from_str(r#"{"max_features": 10, "output": "out/harris.json"}"#).unwrap();
        assert_eq!(config.max_features, 10);
        assert_eq!(config.output, PathBuf::from("out/harris.json"));
        assert_eq!(config.input, ExtractConfig::default().input);
        assert_eq!(config.bounds, BoundingBox::travis_county());
    }

    #[test]
    fn explicit_bounds() {
        let config: ExtractConfig = serde_json::from_str(
            r#"{"bounds": {"north": 30.2, "south": 29.5, "east": -94.9, "west": -95.8}}"#,
        )
        .unwrap();
        assert_eq!(config.bounds, BoundingBox::new(30.2, 29.5, -94.9, -95.8));

        // A partial box is an error, not silently mixed with the default
        assert!(serde_json::from_str::<ExtractConfig>(r#"{"bounds": {"north": 30.2}}"#).is_err());
    }

    #[test]
    fn validation() {
        assert!(ExtractConfig::default().validate().is_ok());

        let mut config = ExtractConfig::default();
        config.max_features = 0;
        assert!(config.validate().is_err());

        let mut config = ExtractConfig::default();
        config.bounds = BoundingBox::new(29.0, 30.0, -97.4, -98.2);
        assert!(config.validate().is_err());

        let mut config = ExtractConfig::default();
        config.output = config.input.clone();
        assert!(config.validate().is_err());
    }
}
