use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::basename;

pub fn to_json<T: Serialize>(obj: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(obj)?)
}

/// Pretty-prints `obj` as JSON (2-space indent) to `path`, creating parent directories. The data
/// is first written to a hidden sibling file and then renamed over `path`, so readers never see a
/// half-written file. Returns the size of the written file in bytes.
pub fn write_json<T: Serialize>(path: &Path, obj: &T) -> Result<u64> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs_err::create_dir_all(parent)?;
        }
    }

    let tmp = tmp_path(path);
    let result = write_json_to(&tmp, obj).and_then(|_| {
        fs_err::rename(&tmp, path)?;
        Ok(())
    });
    if let Err(err) = result {
        if tmp.exists() {
            if let Err(cleanup) = fs_err::remove_file(&tmp) {
                warn!("Couldn't clean up {}: {}", tmp.display(), cleanup);
            }
        }
        return Err(err).with_context(|| format!("writing {}", path.display()));
    }
    debug!("Wrote {}", path.display());

    file_size(path)
}

pub fn file_size(path: &Path) -> Result<u64> {
    Ok(fs_err::metadata(path)?.len())
}

fn write_json_to<T: Serialize>(path: &Path, obj: &T) -> Result<()> {
    let mut out = BufWriter::new(fs_err::File::create(path)?);
    serde_json::to_writer_pretty(&mut out, obj)?;
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    path.with_file_name(format!(".{}.tmp", basename(path)))
}
