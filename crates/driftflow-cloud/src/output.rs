//! JSON-lines output files
//!
//! Every write opens the file in append mode, writes one compact JSON value
//! followed by a newline, and closes the file again. Timestamps go through
//! chrono's serde support and come out as ISO-8601 strings.

use crate::error::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

const SUBMITTED_FILE: &str = "temp.txt";
const RESULTS_FILE: &str = "result.txt";

/// Where a run writes its output
#[derive(Debug, Clone)]
pub struct OutputPaths {
    /// Receives the full stack→detection id map once, after all triggers
    pub submitted: PathBuf,

    /// Receives one line per completed detection
    pub results: PathBuf,
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self {
            submitted: PathBuf::from(SUBMITTED_FILE),
            results: PathBuf::from(RESULTS_FILE),
        }
    }
}

impl OutputPaths {
    pub fn new(submitted: impl Into<PathBuf>, results: impl Into<PathBuf>) -> Self {
        Self {
            submitted: submitted.into(),
            results: results.into(),
        }
    }

    /// Default file names placed under `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            submitted: dir.join(SUBMITTED_FILE),
            results: dir.join(RESULTS_FILE),
        }
    }
}

/// Append `value` to `path` as a single JSON line
pub async fn write_json_line<T>(path: &Path, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
{
    let mut line = serde_json::to_vec(value)?;
    line.push(b'\n');

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await?;
    file.write_all(&line).await?;
    file.flush().await?;

    tracing::debug!("Appended {} bytes to {}", line.len(), path.display());
    Ok(())
}
