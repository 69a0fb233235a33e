use std::collections::BTreeMap;

use crate::input::MetricSnapshot;

/// Latest snapshot per project for one source (case-insensitive match).
///
/// Ties on `captured_at` go to the row seen later in `snapshots`
/// (last write wins).
pub fn latest_by_project<'a>(
    snapshots: &'a [MetricSnapshot],
    source: &str,
) -> BTreeMap<String, &'a MetricSnapshot> {
    let mut latest: BTreeMap<String, &MetricSnapshot> = BTreeMap::new();
    for snap in snapshots {
        if !snap.source.eq_ignore_ascii_case(source) {
            continue;
        }
        let newer = latest
            .get(&snap.project_id)
            .is_none_or(|existing| snap.captured_at >= existing.captured_at);
        if newer {
            latest.insert(snap.project_id.clone(), snap);
        }
    }
    latest
}

/// Latest snapshot per (source, project) for every source in the input.
#[derive(Debug, Default)]
pub struct SnapshotIndex<'a> {
    by_source: BTreeMap<String, BTreeMap<String, &'a MetricSnapshot>>,
}

impl<'a> SnapshotIndex<'a> {
    pub fn build(snapshots: &'a [MetricSnapshot]) -> Self {
        let mut sources: Vec<String> = snapshots
            .iter()
            .map(|s| s.source.to_ascii_lowercase())
            .collect();
        sources.sort();
        sources.dedup();

        let by_source = sources
            .into_iter()
            .map(|source| {
                let latest = latest_by_project(snapshots, &source);
                tracing::debug!(source = %source, projects = latest.len(), "selected latest snapshots");
                (source, latest)
            })
            .collect();
        Self { by_source }
    }

    pub fn get(&self, project_id: &str, source: &str) -> Option<&'a MetricSnapshot> {
        self.by_source
            .get(&source.to_ascii_lowercase())
            .and_then(|m| m.get(project_id))
            .copied()
    }

    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.by_source.keys().map(String::as_str)
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_snapshots.rs"]
mod tests;
