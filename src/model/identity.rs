use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Person,
    Organization,
}

impl EntityKind {
    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Person => "people",
            EntityKind::Organization => "organizations",
        }
    }
}

/// A group of raw name strings believed to name the same entity.
///
/// `canonical_name` is the raw string that founded the cluster and is
/// never renamed. `aliases` holds later distinct raw strings in first-seen
/// order and never contains the canonical name. `confidence` starts at 1.0
/// and only moves up.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentityCluster {
    pub canonical_name: String,
    pub aliases: Vec<String>,
    pub confidence: f64,
}

impl IdentityCluster {
    pub fn new(canonical_name: impl Into<String>) -> Self {
        Self {
            canonical_name: canonical_name.into(),
            aliases: Vec::new(),
            confidence: 1.0,
        }
    }

    pub fn absorb(&mut self, raw: &str, score: f64) {
        if raw != self.canonical_name && !self.aliases.iter().any(|a| a == raw) {
            self.aliases.push(raw.to_string());
        }
        self.confidence = self.confidence.max(score);
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterParams {
    pub threshold: f64,
}

impl ClusterParams {
    pub fn people_default() -> Self {
        Self { threshold: 0.86 }
    }

    pub fn organizations_default() -> Self {
        Self { threshold: 0.90 }
    }
}

#[derive(Debug, Clone, Default)]
pub struct IdentityIndex {
    pub people: Vec<IdentityCluster>,
    pub organizations: Vec<IdentityCluster>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonSummary {
    pub canonical_name: String,
    pub aliases: Vec<String>,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrganizationSummary {
    pub name: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdentitySummary {
    pub people: Vec<PersonSummary>,
    pub organizations: Vec<OrganizationSummary>,
}
