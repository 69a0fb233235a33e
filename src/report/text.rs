use crate::report::{IdentityStats, ScoringStats, SummaryData, format_f64_6};

pub fn render_report_text(data: &SummaryData) -> String {
    let mut out = String::new();

    out.push_str("Grant Identity & Impact Report\n");
    out.push_str("==============================\n\n");
    out.push_str(&format!("Tool: {} {}\n", data.tool, data.version));
    if let Some(hash) = &data.git_hash {
        out.push_str(&format!("Git: {}\n", hash));
    }
    out.push_str(&format!("Proposal records: {}\n\n", data.records));

    let mut section = 1;
    if let Some(ids) = &data.identities {
        render_identities(&mut out, section, ids);
        section += 1;
    }
    if let Some(scoring) = &data.scoring {
        render_scoring(&mut out, section, scoring);
    }

    out
}

fn render_identities(out: &mut String, section: usize, ids: &IdentityStats) {
    out.push_str(&format!("{}. Identity resolution\n", section));
    out.push_str(&format!(
        "Thresholds: people {}, organizations {}\n",
        ids.people_threshold, ids.organization_threshold
    ));
    out.push_str(&format!(
        "People: {} clusters, {} merged, {} aliases\n",
        ids.people_clusters, ids.people_merged, ids.people_aliases
    ));
    out.push_str(&format!(
        "Organizations: {} clusters, {} merged\n",
        ids.organizations, ids.organizations_merged
    ));
    out.push_str("Note: clustering is first-fit and depends on record order.\n\n");
}

fn render_scoring(out: &mut String, section: usize, s: &ScoringStats) {
    out.push_str(&format!("{}. Impact scoring\n", section));
    out.push_str(&format!("KPI catalog: {}\n", s.kpi_catalog));
    let sources = if s.sources.is_empty() {
        "none".to_string()
    } else {
        s.sources.join(", ")
    };
    out.push_str(&format!(
        "Metric snapshots: {} (sources: {})\n",
        s.snapshots, sources
    ));
    out.push_str(&format!("Projects scored: {}\n", s.projects_scored));
    out.push_str(&format!(
        "Score median: {}  p10: {}  p90: {}\n",
        format_f64_6(s.score_median),
        format_f64_6(s.score_p10),
        format_f64_6(s.score_p90)
    ));
    out.push_str(&format!(
        "Mean confidence: {}\n",
        format_f64_6(s.confidence_mean)
    ));
    out.push_str(&format!(
        "LOW_CONFIDENCE fraction: {}\n",
        format_f64_6(s.low_confidence_fraction)
    ));
    if !s.profiles.is_empty() {
        out.push_str("Profiles:\n");
        for p in &s.profiles {
            out.push_str(&format!("  {}: {}\n", p.profile, p.projects));
        }
    }
    out.push('\n');
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/text.rs"]
mod tests;
