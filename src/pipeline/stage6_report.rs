use std::collections::{BTreeMap, BTreeSet};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::model::identity::IdentityIndex;
use crate::model::scores::ImpactScoreRecord;
use crate::pipeline::stage2_cluster::summarize;
use crate::report::json::{render_identities_json, render_scores_json, render_summary_json};
use crate::report::text::render_report_text;
use crate::report::{
    IdentityStats, LOW_CONFIDENCE, ProfileCount, ScoringStats, SummaryData, format_f64_6,
    fraction_below, mean, median, p10, p90,
};

#[derive(Debug, Clone)]
pub struct IdentityOutput<'a> {
    pub index: &'a IdentityIndex,
    pub people_threshold: f64,
    pub organization_threshold: f64,
}

#[derive(Debug, Clone)]
pub struct ScoringOutput<'a> {
    pub records: &'a [ImpactScoreRecord],
    pub kpi_catalog: String,
    pub snapshots: usize,
    pub sources: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Stage6Input<'a> {
    pub tool_name: String,
    pub tool_version: String,
    pub git_hash: Option<String>,
    pub n_records: usize,
    pub identities: Option<IdentityOutput<'a>>,
    pub scoring: Option<ScoringOutput<'a>>,
}

pub fn write_reports(input: &Stage6Input<'_>, out_dir: &Path) -> std::io::Result<()> {
    fs::create_dir_all(out_dir)?;

    if let Some(ids) = &input.identities {
        let json = render_identities_json(&summarize(ids.index)).map_err(std::io::Error::other)?;
        write_text(&out_dir.join("identities.json"), &json)?;
    }

    if let Some(scoring) = &input.scoring {
        let json = render_scores_json(scoring.records).map_err(std::io::Error::other)?;
        write_text(&out_dir.join("impact_scores.json"), &json)?;
        write_scores_tsv(scoring.records, &out_dir.join("impact_scores.tsv"))?;
    }

    let summary = build_summary(input);
    let json = render_summary_json(&summary).map_err(std::io::Error::other)?;
    write_text(&out_dir.join("summary.json"), &json)?;
    write_text(&out_dir.join("report.txt"), &render_report_text(&summary))?;

    tracing::info!(out = %out_dir.display(), "wrote reports");
    Ok(())
}

pub fn build_summary(input: &Stage6Input<'_>) -> SummaryData {
    let identities = input.identities.as_ref().map(|ids| {
        let people = &ids.index.people;
        let orgs = &ids.index.organizations;
        IdentityStats {
            people_threshold: ids.people_threshold,
            organization_threshold: ids.organization_threshold,
            people_clusters: people.len(),
            people_merged: people.iter().filter(|c| !c.aliases.is_empty()).count(),
            people_aliases: people.iter().map(|c| c.aliases.len()).sum(),
            organizations: orgs.len(),
            organizations_merged: orgs.iter().filter(|c| !c.aliases.is_empty()).count(),
        }
    });

    let scoring = input.scoring.as_ref().map(|s| {
        let scores: Vec<f64> = s.records.iter().map(|r| r.score).collect();
        let confidences: Vec<f64> = s.records.iter().map(|r| r.confidence).collect();
        let mut per_profile: BTreeMap<&str, usize> = BTreeMap::new();
        for r in s.records {
            *per_profile.entry(r.profile.as_str()).or_default() += 1;
        }
        ScoringStats {
            kpi_catalog: s.kpi_catalog.clone(),
            snapshots: s.snapshots,
            sources: s.sources.clone(),
            projects_scored: s.records.len(),
            score_median: median(&scores),
            score_p10: p10(&scores),
            score_p90: p90(&scores),
            confidence_mean: mean(&confidences),
            low_confidence_fraction: fraction_below(&confidences, LOW_CONFIDENCE),
            profiles: per_profile
                .into_iter()
                .map(|(profile, projects)| ProfileCount {
                    profile: profile.to_string(),
                    projects,
                })
                .collect(),
        }
    });

    SummaryData {
        tool: input.tool_name.clone(),
        version: input.tool_version.clone(),
        git_hash: input.git_hash.clone(),
        records: input.n_records,
        identities,
        scoring,
    }
}

fn write_scores_tsv(records: &[ImpactScoreRecord], path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);

    let kpis: BTreeSet<&str> = records
        .iter()
        .flat_map(|r| r.breakdown.normalized.keys().map(String::as_str))
        .collect();

    let mut header = vec!["project_id", "profile", "score", "confidence"];
    header.extend(kpis.iter().copied());
    writeln!(w, "{}", header.join("\t"))?;

    let mut row_order = (0..records.len()).collect::<Vec<_>>();
    row_order.sort_by(|&a, &b| {
        records[a]
            .project_id
            .cmp(&records[b].project_id)
            .then(a.cmp(&b))
    });

    for idx in row_order {
        let r = &records[idx];
        let mut row = vec![
            r.project_id.clone(),
            r.profile.clone(),
            format_f64_6(r.score),
            format_f64_6(r.confidence),
        ];
        for kpi in &kpis {
            row.push(
                r.breakdown
                    .normalized
                    .get(*kpi)
                    .map(|v| format_f64_6(*v))
                    .unwrap_or_default(),
            );
        }
        writeln!(w, "{}", row.join("\t"))?;
    }
    w.flush()
}

fn write_text(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut f = BufWriter::new(File::create(path)?);
    f.write_all(contents.as_bytes())?;
    f.flush()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage6_report.rs"]
mod tests;
