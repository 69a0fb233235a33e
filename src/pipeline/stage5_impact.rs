use chrono::{DateTime, Utc};

use crate::input::ProposalRecord;
use crate::model::clip01;
use crate::model::kpi::{KpiCatalog, KpiSignal, kpi_signal};
use crate::model::scores::{ImpactScoreRecord, ImpactScoreResult, ScoreBreakdown};
use crate::pipeline::stage3_snapshots::SnapshotIndex;
use crate::pipeline::stage4_profiles::{ResolvedProfile, resolve_profile};

/// Linear ramp to 1.0 at `target`; unavailable values contribute 0.
pub fn normalize_kpi(value: Option<f64>, target: f64) -> f64 {
    match value {
        Some(v) if target > 0.0 => clip01(v / target),
        _ => 0.0,
    }
}

fn raw_value(key: &str, project_id: &str, funding: f64, snapshots: &SnapshotIndex<'_>) -> Option<f64> {
    match kpi_signal(key) {
        KpiSignal::Funding => Some(funding),
        KpiSignal::Metric { source, field } => snapshots
            .get(project_id, source)
            .map(|snap| snap.value(field).unwrap_or(0.0)),
        KpiSignal::Unknown => None,
    }
}

pub fn score_project(
    project_id: &str,
    funding: f64,
    resolved: ResolvedProfile<'_>,
    snapshots: &SnapshotIndex<'_>,
) -> ImpactScoreResult {
    let mut breakdown = ScoreBreakdown::default();
    let mut total_weight = 0.0f64;
    let mut weighted = 0.0f64;
    let mut available = 0usize;

    for (key, cfg) in resolved.profile {
        let value = raw_value(key, project_id, funding, snapshots);
        let normalized = normalize_kpi(value, cfg.target);

        total_weight += cfg.weight;
        weighted += normalized * cfg.weight;
        if value.is_some() {
            available += 1;
        }

        breakdown.values.insert(key.clone(), value);
        breakdown.weights.insert(key.clone(), cfg.weight);
        breakdown.normalized.insert(key.clone(), normalized);
    }

    let score = if total_weight > 0.0 {
        100.0 * clip01(weighted / total_weight)
    } else {
        0.0
    };
    let n_kpis = resolved.profile.len();
    let confidence = if n_kpis > 0 {
        available as f64 / n_kpis as f64
    } else {
        0.0
    };
    breakdown.score = score;
    breakdown.confidence = confidence;

    ImpactScoreResult {
        project_id: project_id.to_string(),
        score,
        confidence,
        profile: resolved.name.to_string(),
        breakdown,
    }
}

/// Scores every record with an id; records without one are skipped.
pub fn score_all(
    projects: &[ProposalRecord],
    catalog: &KpiCatalog,
    snapshots: &SnapshotIndex<'_>,
    scored_at: DateTime<Utc>,
) -> Vec<ImpactScoreRecord> {
    let mut out = Vec::with_capacity(projects.len());
    let mut skipped = 0usize;
    for project in projects {
        let Some(project_id) = project.id.as_deref() else {
            skipped += 1;
            continue;
        };
        let resolved = resolve_profile(project.category.as_deref(), catalog);
        let result = score_project(project_id, project.funding_value(), resolved, snapshots);
        tracing::debug!(
            project = project_id,
            profile = resolved.name,
            score = result.score,
            confidence = result.confidence,
            "scored project"
        );
        out.push(ImpactScoreRecord::from_result(result, scored_at));
    }
    if skipped > 0 {
        tracing::warn!(skipped, "project records without an id were not scored");
    }
    tracing::info!(projects = out.len(), "computed impact scores");
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_impact.rs"]
mod tests;
