use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

pub const SCORE_SOURCE_TYPE: &str = "impact_scoring_v1";

/// Audit trail for one score: every input value the profile asked for
/// (`None` when the source had no snapshot), its weight and its
/// normalised contribution.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ScoreBreakdown {
    pub values: BTreeMap<String, Option<f64>>,
    pub weights: BTreeMap<String, f64>,
    pub normalized: BTreeMap<String, f64>,
    pub score: f64,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImpactScoreResult {
    pub project_id: String,
    pub score: f64,
    pub confidence: f64,
    pub profile: String,
    pub breakdown: ScoreBreakdown,
}

/// Persistence-shaped score row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImpactScoreRecord {
    pub id: String,
    pub project_id: String,
    pub score: f64,
    pub confidence: f64,
    pub profile: String,
    pub captured_at: DateTime<Utc>,
    pub source_type: &'static str,
    pub breakdown: ScoreBreakdown,
}

impl ImpactScoreRecord {
    pub fn from_result(result: ImpactScoreResult, scored_at: DateTime<Utc>) -> Self {
        Self {
            id: format!("impact_{}_{}", result.project_id, scored_at.timestamp()),
            project_id: result.project_id,
            score: result.score,
            confidence: result.confidence,
            profile: result.profile,
            captured_at: scored_at,
            source_type: SCORE_SOURCE_TYPE,
            breakdown: result.breakdown,
        }
    }
}
