use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::input::{InputError, read_records_lenient};

/// One timestamped capture of external counters for a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSnapshot {
    pub project_id: String,
    pub source: String,
    pub captured_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "finite_values")]
    pub values: BTreeMap<String, f64>,
}

impl MetricSnapshot {
    pub fn value(&self, field: &str) -> Option<f64> {
        self.values.get(field).copied()
    }
}

pub fn load_snapshots(paths: &[PathBuf]) -> Result<Vec<MetricSnapshot>, InputError> {
    let mut out = Vec::new();
    for path in paths {
        let rows: Vec<MetricSnapshot> = read_records_lenient(path)?;
        tracing::info!(
            path = %path.display(),
            snapshots = rows.len(),
            "loaded metric snapshots"
        );
        out.extend(rows);
    }
    Ok(out)
}

/// Keeps only finite numeric counters; anything else is left out.
fn finite_values<'de, D: Deserializer<'de>>(d: D) -> Result<BTreeMap<String, f64>, D::Error> {
    let Value::Object(map) = Value::deserialize(d)? else {
        return Ok(BTreeMap::new());
    };
    Ok(map
        .into_iter()
        .filter_map(|(k, v)| v.as_f64().filter(|n| n.is_finite()).map(|n| (k, n)))
        .collect())
}
