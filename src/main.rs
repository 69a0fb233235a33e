mod error;
mod input;
mod logging;
mod model;
mod names;
mod pipeline;
mod report;

use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::{Args, Parser, Subcommand};

use crate::error::AppError;
use crate::input::{load_proposals, load_snapshots};
use crate::model::identity::ClusterParams;
use crate::model::kpi::{ConfigError, KpiCatalog};
use crate::pipeline::stage2_cluster::build_identity_index;
use crate::pipeline::stage3_snapshots::SnapshotIndex;
use crate::pipeline::stage5_impact::score_all;
use crate::pipeline::stage6_report::{IdentityOutput, ScoringOutput, Stage6Input, write_reports};

#[derive(Debug, Parser)]
#[command(
    name = "grantfuse",
    version,
    about = "Resolve proposer identities and score project impact from multi-source signals"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Cluster people and organizations named in proposal records.
    Identities {
        #[command(flatten)]
        common: CommonArgs,
        #[command(flatten)]
        thresholds: ThresholdArgs,
    },
    /// Compute composite impact scores per project.
    Score {
        #[command(flatten)]
        common: CommonArgs,
        #[command(flatten)]
        scoring: ScoringArgs,
    },
    /// Both of the above over the same proposal records.
    Run {
        #[command(flatten)]
        common: CommonArgs,
        #[command(flatten)]
        thresholds: ThresholdArgs,
        #[command(flatten)]
        scoring: ScoringArgs,
    },
}

#[derive(Debug, Clone, Args)]
struct CommonArgs {
    /// Proposal/project records (JSON array or JSON Lines, optionally .gz).
    #[arg(long)]
    proposals: PathBuf,
    /// Output directory.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Debug, Clone, Args)]
struct ThresholdArgs {
    #[arg(long, default_value_t = ClusterParams::people_default().threshold)]
    people_threshold: f64,
    #[arg(long, default_value_t = ClusterParams::organizations_default().threshold)]
    org_threshold: f64,
}

#[derive(Debug, Clone, Args)]
struct ScoringArgs {
    /// Metric snapshot file; repeat for several sources.
    #[arg(long = "metrics")]
    metrics: Vec<PathBuf>,
    /// KPI catalog JSON; the built-in catalog is used when omitted.
    #[arg(long)]
    kpi_config: Option<PathBuf>,
}

#[derive(Debug, Clone)]
struct ScoringConfig {
    metrics: Vec<PathBuf>,
    kpi_config: Option<PathBuf>,
}

#[derive(Debug, Clone)]
struct RunConfig {
    proposals: PathBuf,
    out_dir: PathBuf,
    identities: Option<(ClusterParams, ClusterParams)>,
    scoring: Option<ScoringConfig>,
}

impl RunConfig {
    fn from_command(command: Command) -> Result<Self, ConfigError> {
        let (common, thresholds, scoring) = match command {
            Command::Identities { common, thresholds } => (common, Some(thresholds), None),
            Command::Score { common, scoring } => (common, None, Some(scoring)),
            Command::Run {
                common,
                thresholds,
                scoring,
            } => (common, Some(thresholds), Some(scoring)),
        };

        let identities = thresholds
            .map(|t| {
                Ok::<_, ConfigError>((
                    cluster_params("people", t.people_threshold)?,
                    cluster_params("organization", t.org_threshold)?,
                ))
            })
            .transpose()?;

        Ok(Self {
            proposals: common.proposals,
            out_dir: common.out,
            identities,
            scoring: scoring.map(|s| ScoringConfig {
                metrics: s.metrics,
                kpi_config: s.kpi_config,
            }),
        })
    }
}

fn cluster_params(name: &'static str, value: f64) -> Result<ClusterParams, ConfigError> {
    if value > 0.0 && value <= 1.0 {
        Ok(ClusterParams { threshold: value })
    } else {
        Err(ConfigError::InvalidThreshold { name, value })
    }
}

fn main() {
    if let Err(err) = logging::init() {
        eprintln!("warning: logging not initialised: {err}");
    }
    let cli = Cli::parse();
    if let Err(err) = run(cli.command) {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<(), AppError> {
    let config = RunConfig::from_command(command)?;
    let records = load_proposals(&config.proposals)?;

    let index = config.identities.map(|(people, orgs)| {
        let index = build_identity_index(&records, &people, &orgs);
        tracing::info!(
            people = index.people.len(),
            organizations = index.organizations.len(),
            "resolved identities"
        );
        (index, people, orgs)
    });

    let scoring = match &config.scoring {
        Some(scoring) => {
            let snapshots = load_snapshots(&scoring.metrics)?;
            let (catalog, catalog_name) = match &scoring.kpi_config {
                Some(path) => (KpiCatalog::load(path)?, path.display().to_string()),
                None => (KpiCatalog::builtin_v1(), "builtin_v1".to_string()),
            };
            let snapshot_index = SnapshotIndex::build(&snapshots);
            let sources: Vec<String> = snapshot_index.sources().map(str::to_string).collect();
            let scores = score_all(&records, &catalog, &snapshot_index, Utc::now());
            Some((scores, catalog_name, snapshots.len(), sources))
        }
        None => None,
    };

    let input = Stage6Input {
        tool_name: env!("CARGO_PKG_NAME").to_string(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
        git_hash: read_git_hash(&PathBuf::from(".")),
        n_records: records.len(),
        identities: index.as_ref().map(|(index, people, orgs)| IdentityOutput {
            index,
            people_threshold: people.threshold,
            organization_threshold: orgs.threshold,
        }),
        scoring: scoring
            .as_ref()
            .map(|(scores, catalog, snapshots, sources)| ScoringOutput {
                records: scores,
                kpi_catalog: catalog.clone(),
                snapshots: *snapshots,
                sources: Vec::clone(sources),
            }),
    };

    write_reports(&input, &config.out_dir)?;
    Ok(())
}

fn read_git_hash(repo_root: &Path) -> Option<String> {
    let head = repo_root.join(".git/HEAD");
    let content = std::fs::read_to_string(head).ok()?;
    if let Some(ref_line) = content.strip_prefix("ref: ") {
        let ref_path = repo_root.join(".git").join(ref_line.trim());
        return std::fs::read_to_string(ref_path)
            .ok()
            .map(|s| s.trim().to_string());
    }
    Some(content.trim().to_string())
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
