use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

pub mod metrics;
pub mod proposals;

pub use metrics::{MetricSnapshot, load_snapshots};
pub use proposals::{ProposalRecord, load_proposals};

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing input: {0}")]
    MissingInput(String),
    #[error("parse error in {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

pub fn open_maybe_gz(path: &Path) -> Result<Box<dyn BufRead>, InputError> {
    if !path.exists() {
        return Err(InputError::MissingInput(path.display().to_string()));
    }
    let file = File::open(path)?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Reads a JSON array of values, or a stream of whitespace-separated
/// values (JSON Lines) when the file does not start with `[`.
fn read_values(path: &Path) -> Result<Vec<Value>, InputError> {
    let mut reader = open_maybe_gz(path)?;
    let mut text = String::new();
    reader.read_to_string(&mut text)?;

    let parse_err = |source: serde_json::Error| InputError::Parse {
        path: path.display().to_string(),
        source,
    };

    if text.trim_start().starts_with('[') {
        return serde_json::from_str(&text).map_err(parse_err);
    }

    serde_json::Deserializer::from_str(&text)
        .into_iter::<Value>()
        .collect::<Result<Vec<Value>, _>>()
        .map_err(parse_err)
}

/// Every record must convert; the first bad one fails the file.
pub fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, InputError> {
    read_values(path)?
        .into_iter()
        .map(serde_json::from_value)
        .collect::<Result<Vec<T>, _>>()
        .map_err(|source| InputError::Parse {
            path: path.display().to_string(),
            source,
        })
}

/// Records that do not convert are dropped with a warning. Only unreadable
/// files and broken JSON syntax are errors.
pub fn read_records_lenient<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, InputError> {
    let values = read_values(path)?;
    let mut out = Vec::with_capacity(values.len());
    for (row, value) in values.into_iter().enumerate() {
        match serde_json::from_value(value) {
            Ok(record) => out.push(record),
            Err(err) => tracing::warn!(
                path = %path.display(),
                row,
                error = %err,
                "skipping malformed record"
            ),
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
