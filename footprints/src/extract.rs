use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use serde::Serialize;

use geom::{is_in_region, BoundingBox};
use util::{prettyprint_bytes, prettyprint_usize};

use crate::{ExtractConfig, FeatureReader};

/// Log progress after this much more input has been consumed
const PROGRESS_BYTES: u64 = 100 * 1024 * 1024;
/// Log progress after this many more features have been kept
const PROGRESS_FEATURES: usize = 100;

/// What happened during one run of `extract`.
#[derive(Clone, Debug, PartialEq)]
pub struct ExtractionReport {
    /// Features successfully decoded and checked against the bounds
    pub scanned: usize,
    /// Features in the region, up to the limit
    pub kept: usize,
    /// Features that couldn't be decoded
    pub skipped: usize,
    /// True if scanning stopped early because the limit was reached
    pub hit_cap: bool,
    /// `None` when nothing matched and no file was written
    pub output: Option<OutputSummary>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct OutputSummary {
    pub path: PathBuf,
    pub bytes: u64,
}

/// The features kept from one input stream, in input order.
pub struct Scan {
    pub features: Vec<serde_json::Value>,
    pub scanned: usize,
    pub skipped: usize,
    pub hit_cap: bool,
}

#[derive(Serialize)]
struct FeatureCollection<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    features: &'a [serde_json::Value],
}

/// Reads `config.input`, keeps up to `config.max_features` features in `config.bounds`, and
/// writes them to `config.output` as a new FeatureCollection. If nothing matches, no file is
/// written.
///
/// Features that fail to parse are logged and skipped. A malformed header, an unreadable input,
/// or an unwritable output are errors.
pub fn extract(config: &ExtractConfig) -> Result<ExtractionReport> {
    config.validate()?;

    info!("Processing {}...", config.input.display());
    info!("Bounds: {}", config.bounds);
    info!(
        "Max features to extract: {}",
        prettyprint_usize(config.max_features)
    );

    let file = fs_err::File::open(&config.input)?;
    let scan = scan(BufReader::new(file), &config.bounds, config.max_features)
        .with_context(|| format!("scanning {}", config.input.display()))?;

    info!(
        "Processing complete! Scanned {} features, found {} in the region",
        prettyprint_usize(scan.scanned),
        prettyprint_usize(scan.features.len())
    );
    if scan.skipped > 0 {
        warn!(
            "Skipped {} features that couldn't be parsed",
            prettyprint_usize(scan.skipped)
        );
    }

    let mut report = ExtractionReport {
        scanned: scan.scanned,
        kept: scan.features.len(),
        skipped: scan.skipped,
        hit_cap: scan.hit_cap,
        output: None,
    };
    if scan.features.is_empty() {
        warn!(
            "No features found in the region ({}). Check the bounding box.",
            config.bounds
        );
        return Ok(report);
    }

    let bytes = util::write_json(
        &config.output,
        &FeatureCollection {
            kind: "FeatureCollection",
            features: &scan.features,
        },
    )?;
    info!(
        "Saved {} features to {} ({})",
        prettyprint_usize(report.kept),
        config.output.display(),
        prettyprint_bytes(bytes)
    );
    report.output = Some(OutputSummary {
        path: config.output.clone(),
        bytes,
    });
    Ok(report)
}

/// Streams features from `reader`, keeping those in `bounds`. Stops reading as soon as
/// `max_features` have been kept.
pub fn scan<R: BufRead>(reader: R, bounds: &BoundingBox, max_features: usize) -> Result<Scan> {
    if max_features == 0 {
        bail!("max_features must be at least 1");
    }

    let mut features = FeatureReader::new(reader)?;
    let mut result = Scan {
        features: Vec::new(),
        scanned: 0,
        skipped: 0,
        hit_cap: false,
    };
    let mut last_progress_bytes = 0;

    while let Some(raw) = features.next() {
        let raw = raw?;
        if features.bytes_read() - last_progress_bytes >= PROGRESS_BYTES {
            last_progress_bytes = features.bytes_read();
            info!(
                "Read {} so far, scanned {} features",
                prettyprint_bytes(last_progress_bytes),
                prettyprint_usize(result.scanned)
            );
        }

        let feature = match raw.decode() {
            Ok(feature) => feature,
            Err(err) => {
                warn!("Error parsing feature on line {}: {}", raw.line, err);
                result.skipped += 1;
                continue;
            }
        };
        result.scanned += 1;

        if !is_in_region(&feature, bounds) {
            continue;
        }
        result.features.push(feature);
        let kept = result.features.len();
        if kept % PROGRESS_FEATURES == 0 {
            info!("Found {} features in the region...", prettyprint_usize(kept));
        }
        if kept >= max_features {
            info!(
                "Reached max features limit ({}) after {} lines",
                prettyprint_usize(max_features),
                prettyprint_usize(features.lines_read())
            );
            result.hit_cap = true;
            break;
        }
    }

    Ok(result)
}
