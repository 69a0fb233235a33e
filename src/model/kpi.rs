use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::input::{InputError, read_records};

pub const FUNDING_KPI: &str = "funding_amount";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("KPI '{kpi}' in profile '{profile}' has invalid target {target} (must be a positive number)")]
    InvalidTarget {
        profile: String,
        kpi: String,
        target: f64,
    },
    #[error("KPI '{kpi}' in profile '{profile}' has invalid weight {weight} (must be non-negative)")]
    InvalidWeight {
        profile: String,
        kpi: String,
        weight: f64,
    },
    #[error("invalid {name} threshold {value} (use a value in (0, 1])")]
    InvalidThreshold { name: &'static str, value: f64 },
    #[error("override profiles '{first}' and '{second}' collide when lowercased")]
    DuplicateOverride { first: String, second: String },
    #[error("KPI config {0} must contain exactly one catalog object")]
    CatalogShape(String),
    #[error(transparent)]
    Input(#[from] InputError),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KpiConfig {
    pub target: f64,
    pub weight: f64,
}

impl KpiConfig {
    pub const fn new(target: f64, weight: f64) -> Self {
        Self { target, weight }
    }
}

pub type KpiProfile = BTreeMap<String, KpiConfig>;

/// Where a KPI reads its raw value from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KpiSignal<'a> {
    Funding,
    Metric { source: &'a str, field: &'a str },
    Unknown,
}

/// `funding_amount` reads project funding; `<source>_<field>` reads `field`
/// from that source's latest snapshot.
pub fn kpi_signal(key: &str) -> KpiSignal<'_> {
    if key == FUNDING_KPI {
        return KpiSignal::Funding;
    }
    match key.split_once('_') {
        Some((source, field)) if !source.is_empty() && !field.is_empty() => {
            KpiSignal::Metric { source, field }
        }
        _ => KpiSignal::Unknown,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiCatalog {
    pub default: KpiProfile,
    #[serde(default)]
    pub overrides: BTreeMap<String, KpiProfile>,
}

fn profile(entries: &[(&str, KpiConfig)]) -> KpiProfile {
    entries
        .iter()
        .map(|(k, v)| ((*k).to_string(), *v))
        .collect()
}

impl KpiCatalog {
    pub fn builtin_v1() -> Self {
        let default = profile(&[
            (FUNDING_KPI, KpiConfig::new(100_000.0, 0.35)),
            ("github_stars", KpiConfig::new(500.0, 0.25)),
            ("github_forks", KpiConfig::new(100.0, 0.15)),
            ("youtube_views", KpiConfig::new(10_000.0, 0.25)),
        ]);
        let community = profile(&[
            (FUNDING_KPI, KpiConfig::new(80_000.0, 0.25)),
            ("github_stars", KpiConfig::new(300.0, 0.15)),
            ("github_forks", KpiConfig::new(60.0, 0.10)),
            ("youtube_views", KpiConfig::new(25_000.0, 0.50)),
        ]);
        let infrastructure = profile(&[
            (FUNDING_KPI, KpiConfig::new(150_000.0, 0.40)),
            ("github_stars", KpiConfig::new(800.0, 0.30)),
            ("github_forks", KpiConfig::new(150.0, 0.20)),
            ("youtube_views", KpiConfig::new(5_000.0, 0.10)),
        ]);

        let mut overrides = BTreeMap::new();
        overrides.insert("community".to_string(), community);
        overrides.insert("infrastructure".to_string(), infrastructure);
        Self { default, overrides }
    }

    /// Lowercases override keys and checks every target and weight.
    pub fn validated(self) -> Result<Self, ConfigError> {
        validate_profile("default", &self.default)?;
        let mut overrides = BTreeMap::new();
        let mut seen: BTreeMap<String, String> = BTreeMap::new();
        for (name, profile) in self.overrides {
            validate_profile(&name, &profile)?;
            let key = name.to_lowercase();
            if let Some(first) = seen.insert(key.clone(), name.clone()) {
                return Err(ConfigError::DuplicateOverride { first, second: name });
            }
            overrides.insert(key, profile);
        }
        Ok(Self {
            default: self.default,
            overrides,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut catalogs: Vec<KpiCatalog> = read_records(path)?;
        if catalogs.len() != 1 {
            return Err(ConfigError::CatalogShape(path.display().to_string()));
        }
        let catalog = catalogs.remove(0).validated()?;
        tracing::info!(
            path = %path.display(),
            overrides = catalog.overrides.len(),
            "loaded KPI catalog"
        );
        Ok(catalog)
    }
}

fn validate_profile(name: &str, profile: &KpiProfile) -> Result<(), ConfigError> {
    for (kpi, cfg) in profile {
        if !(cfg.target.is_finite() && cfg.target > 0.0) {
            return Err(ConfigError::InvalidTarget {
                profile: name.to_string(),
                kpi: kpi.clone(),
                target: cfg.target,
            });
        }
        if !(cfg.weight.is_finite() && cfg.weight >= 0.0) {
            return Err(ConfigError::InvalidWeight {
                profile: name.to_string(),
                kpi: kpi.clone(),
                weight: cfg.weight,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/kpi.rs"]
mod tests;
