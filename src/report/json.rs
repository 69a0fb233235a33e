use serde::Serialize;

use crate::model::identity::IdentitySummary;
use crate::model::scores::ImpactScoreRecord;
use crate::report::SummaryData;

fn render_pretty<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    let mut out = serde_json::to_string_pretty(value)?;
    out.push('\n');
    Ok(out)
}

pub fn render_summary_json(data: &SummaryData) -> serde_json::Result<String> {
    render_pretty(data)
}

pub fn render_identities_json(summary: &IdentitySummary) -> serde_json::Result<String> {
    render_pretty(summary)
}

pub fn render_scores_json(records: &[ImpactScoreRecord]) -> serde_json::Result<String> {
    render_pretty(records)
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/json.rs"]
mod tests;
