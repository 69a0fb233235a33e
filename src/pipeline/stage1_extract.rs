use crate::input::ProposalRecord;
use crate::model::identity::EntityKind;
use crate::names::split;

/// Raw candidates from one record, split on name delimiters and
/// de-duplicated (exact match, first occurrence kept).
pub fn record_candidates(record: &ProposalRecord, kind: EntityKind) -> Vec<String> {
    let fields: Vec<Option<&str>> = match kind {
        EntityKind::Person => record.person_fields().to_vec(),
        EntityKind::Organization => record.organization_fields().to_vec(),
    };

    let mut out: Vec<String> = Vec::new();
    for value in fields.into_iter().flatten() {
        if value.trim().is_empty() {
            continue;
        }
        for part in split(value) {
            if !out.contains(&part) {
                out.push(part);
            }
        }
    }
    out
}

/// Candidate stream for the clusterer, in record order.
pub fn extract_candidates(records: &[ProposalRecord], kind: EntityKind) -> Vec<String> {
    let mut out = Vec::new();
    for record in records {
        out.extend(record_candidates(record, kind));
    }
    tracing::debug!(
        kind = kind.label(),
        records = records.len(),
        candidates = out.len(),
        "extracted name candidates"
    );
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_extract.rs"]
mod tests;
