use std::io::BufRead;

use anyhow::{Context, Result};

use crate::FormatError;

const PREAMBLE: &str = r#"{"type":"FeatureCollection""#;
const FEATURES_KEY: &str = r#""features""#;

/// The bytes of one feature, cut out of the input but not decoded yet. They aren't checked for
/// UTF-8 until decoding, so one bad byte only spoils its own feature.
#[derive(Clone, Debug, PartialEq)]
pub struct RawFeature {
    pub text: Vec<u8>,
    /// 1-based line number where the feature starts
    pub line: usize,
}

impl RawFeature {
    pub fn decode(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_slice(&self.text)
    }
}

/// Streams the features out of a FeatureCollection, one at a time, without parsing the whole
/// document. This relies on the input having roughly one feature per line (or at least each
/// feature starting on its own line), like the large building footprint releases do:
///
/// ```text
/// {"type":"FeatureCollection",
/// "features":
/// [
/// {"type":"Feature","geometry":{...},"properties":{...}},
/// {"type":"Feature","geometry":{...},"properties":{...}}
/// ]}
/// ```
///
/// Features are found by counting braces per line. Braces inside strings are counted too, and a
/// minified single-line file can't be split at all.
///
/// Stopping early is just a matter of not calling `next` again; nothing past the last returned
/// feature has been read.
pub struct FeatureReader<R> {
    reader: R,
    line: Vec<u8>,
    line_number: usize,
    bytes_read: u64,
    scan: ArrayScan,
    done: bool,
}

impl<R: BufRead> FeatureReader<R> {
    /// Checks the header and advances to the features array. Fails with a `FormatError` if the
    /// input isn't shaped like a FeatureCollection.
    pub fn new(reader: R) -> Result<FeatureReader<R>> {
        let mut features = FeatureReader {
            reader,
            line: Vec::new(),
            line_number: 0,
            bytes_read: 0,
            scan: ArrayScan::default(),
            done: false,
        };

        if !features.next_line()? || !trim(&features.line).starts_with(PREAMBLE.as_bytes()) {
            return Err(FormatError::NotFeatureCollection.into());
        }
        while !contains(&features.line, FEATURES_KEY.as_bytes()) {
            if !features.next_line()? {
                return Err(FormatError::MissingFeatures.into());
            }
        }
        debug!("Features array starts on line {}", features.line_number);

        Ok(features)
    }

    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    pub fn lines_read(&self) -> usize {
        self.line_number
    }

    // Returns false at the end of the input
    fn next_line(&mut self) -> Result<bool> {
        self.line.clear();
        let n = self
            .reader
            .read_until(b'\n', &mut self.line)
            .with_context(|| format!("reading line {}", self.line_number + 1))?;
        if n == 0 {
            return Ok(false);
        }
        self.line_number += 1;
        self.bytes_read += n as u64;
        Ok(true)
    }
}

impl<R: BufRead> Iterator for FeatureReader<R> {
    type Item = Result<RawFeature>;

    fn next(&mut self) -> Option<Result<RawFeature>> {
        while !self.done {
            match self.next_line() {
                Ok(true) => {}
                Ok(false) => {
                    self.done = true;
                    self.scan.finish();
                    break;
                }
                Err(err) => {
                    self.done = true;
                    return Some(Err(err));
                }
            }

            match self.scan.feed(&self.line, self.line_number) {
                Step::Continue => {}
                Step::Complete(feature) => return Some(Ok(feature)),
                Step::End => {
                    self.done = true;
                }
            }
        }
        None
    }
}

enum Step {
    Continue,
    Complete(RawFeature),
    End,
}

/// Reassembles features from the lines inside the features array.
#[derive(Default)]
struct ArrayScan {
    buffer: Vec<u8>,
    start: usize,
    depth: i64,
}

impl ArrayScan {
    fn feed(&mut self, line: &[u8], line_number: usize) -> Step {
        let line = trim(line);
        if line.is_empty() {
            return Step::Continue;
        }

        // Between features
        if self.buffer.is_empty() {
            if line == b"," || line.starts_with(b"[") {
                return Step::Continue;
            }
            if line.starts_with(b"]") {
                return Step::End;
            }
        }

        if line.starts_with(b"{") {
            if !self.buffer.is_empty() {
                warn!(
                    "Dropping the unbalanced feature starting on line {}",
                    self.start
                );
                self.buffer.clear();
            }
            self.start = line_number;
            self.depth = brace_delta(line);
        } else {
            if self.buffer.is_empty() {
                self.start = line_number;
            } else {
                self.buffer.push(b'\n');
            }
            self.depth += brace_delta(line);
        }
        self.buffer.extend_from_slice(line);

        if self.depth != 0 {
            return Step::Continue;
        }
        let mut text = std::mem::take(&mut self.buffer);
        if text.ends_with(b",") {
            text.pop();
        }
        Step::Complete(RawFeature {
            text,
            line: self.start,
        })
    }

    fn finish(&mut self) {
        if !self.buffer.is_empty() {
            warn!(
                "Input ended in the middle of the feature starting on line {}",
                self.start
            );
            self.buffer.clear();
        }
    }
}

// Braces are ASCII and never show up inside a multi-byte UTF-8 sequence, so counting bytes is
// safe even before the line is known to be valid UTF-8.
fn brace_delta(line: &[u8]) -> i64 {
    let mut delta = 0;
    for b in line {
        match b {
            b'{' => delta += 1,
            b'}' => delta -= 1,
            _ => {}
        }
    }
    delta
}

fn trim(line: &[u8]) -> &[u8] {
    let start = match line.iter().position(|b| !b.is_ascii_whitespace()) {
        Some(idx) => idx,
        None => return &[],
    };
    let end = line.iter().rposition(|b| !b.is_ascii_whitespace()).unwrap_or(start);
    &line[start..=end]
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}
