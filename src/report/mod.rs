use serde::Serialize;

pub mod json;
pub mod text;

#[derive(Debug, Clone, Serialize)]
pub struct IdentityStats {
    pub people_threshold: f64,
    pub organization_threshold: f64,
    pub people_clusters: usize,
    pub people_merged: usize,
    pub people_aliases: usize,
    pub organizations: usize,
    pub organizations_merged: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileCount {
    pub profile: String,
    pub projects: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoringStats {
    pub kpi_catalog: String,
    pub snapshots: usize,
    pub sources: Vec<String>,
    pub projects_scored: usize,
    pub score_median: f64,
    pub score_p10: f64,
    pub score_p90: f64,
    pub confidence_mean: f64,
    pub low_confidence_fraction: f64,
    pub profiles: Vec<ProfileCount>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryData {
    pub tool: String,
    pub version: String,
    pub git_hash: Option<String>,
    pub records: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identities: Option<IdentityStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scoring: Option<ScoringStats>,
}

pub const LOW_CONFIDENCE: f64 = 0.5;

pub fn format_f64_6(v: f64) -> String {
    format!("{:.6}", v)
}

pub fn quantile_indexed(values: &[f64], p: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let n = sorted.len();
    let idx = ((n - 1) as f64 * p).ceil() as usize;
    sorted[idx]
}

pub fn median(values: &[f64]) -> f64 {
    quantile_indexed(values, 0.5)
}

pub fn p10(values: &[f64]) -> f64 {
    quantile_indexed(values, 0.10)
}

pub fn p90(values: &[f64]) -> f64 {
    quantile_indexed(values, 0.90)
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

pub fn fraction_below(values: &[f64], cutoff: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().filter(|&&v| v < cutoff).count() as f64 / values.len() as f64
}
