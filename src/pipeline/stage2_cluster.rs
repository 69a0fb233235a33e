use crate::input::ProposalRecord;
use crate::model::identity::{
    ClusterParams, EntityKind, IdentityCluster, IdentityIndex, IdentitySummary,
    OrganizationSummary, PersonSummary,
};
use crate::names::{normalize, similarity};
use crate::pipeline::stage1_extract::extract_candidates;

/// First-fit incremental clustering.
///
/// Each candidate joins the earliest-created cluster whose canonical key
/// scores at or above `params.threshold`; otherwise it founds a new
/// cluster. Clusters are never re-evaluated, so the result depends on
/// input order.
pub fn resolve<S: AsRef<str>>(candidates: &[S], params: &ClusterParams) -> Vec<IdentityCluster> {
    let mut clusters: Vec<IdentityCluster> = Vec::new();
    // normalized canonical names, parallel to `clusters`
    let mut keys: Vec<String> = Vec::new();

    for candidate in candidates {
        let raw = candidate.as_ref();
        let key = normalize(raw);

        let hit = keys.iter().enumerate().find_map(|(idx, canonical)| {
            let score = similarity(&key, canonical);
            (score >= params.threshold).then_some((idx, score))
        });

        match hit {
            Some((idx, score)) => {
                tracing::trace!(
                    candidate = raw,
                    canonical = %clusters[idx].canonical_name,
                    score,
                    "merged candidate"
                );
                clusters[idx].absorb(raw, score);
            }
            None => {
                clusters.push(IdentityCluster::new(raw));
                keys.push(key);
            }
        }
    }
    clusters
}

pub fn resolve_kind(
    records: &[ProposalRecord],
    kind: EntityKind,
    params: &ClusterParams,
) -> Vec<IdentityCluster> {
    let candidates = extract_candidates(records, kind);
    let clusters = resolve(&candidates, params);
    tracing::debug!(
        kind = kind.label(),
        candidates = candidates.len(),
        clusters = clusters.len(),
        threshold = params.threshold,
        "resolved identities"
    );
    clusters
}

pub fn build_identity_index(
    records: &[ProposalRecord],
    people: &ClusterParams,
    organizations: &ClusterParams,
) -> IdentityIndex {
    IdentityIndex {
        people: resolve_kind(records, EntityKind::Person, people),
        organizations: resolve_kind(records, EntityKind::Organization, organizations),
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

pub fn summarize(index: &IdentityIndex) -> IdentitySummary {
    IdentitySummary {
        people: index
            .people
            .iter()
            .map(|c| PersonSummary {
                canonical_name: c.canonical_name.clone(),
                aliases: c.aliases.clone(),
                confidence: round2(c.confidence),
            })
            .collect(),
        organizations: index
            .organizations
            .iter()
            .map(|c| OrganizationSummary {
                name: c.canonical_name.clone(),
                confidence: round2(c.confidence),
            })
            .collect(),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_cluster.rs"]
mod tests;
