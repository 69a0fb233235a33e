use super::*;

fn record() -> ProposalRecord {
    ProposalRecord {
        ideascale_user: Some("alice_w".to_string()),
        proposer: Some("Alice Wong & Bob Stone".to_string()),
        proposer_name: Some("Alice Wong".to_string()),
        proposer_full_name: Some("   ".to_string()),
        organization: Some("ACME Labs / Open Tools".to_string()),
        team: Some("ACME Labs".to_string()),
        ..ProposalRecord::default()
    }
}

#[test]
fn test_people_fields_in_order_with_dedup() {
    let people = record_candidates(&record(), EntityKind::Person);
    assert_eq!(people, vec!["alice_w", "Alice Wong", "Bob Stone"]);
}

#[test]
fn test_dedup_is_case_sensitive() {
    let r = ProposalRecord {
        proposer: Some("Alice Wong".to_string()),
        proposer_name: Some("alice wong".to_string()),
        ..ProposalRecord::default()
    };
    assert_eq!(
        record_candidates(&r, EntityKind::Person),
        vec!["Alice Wong", "alice wong"]
    );
}

#[test]
fn test_organization_fields_disjoint_from_people() {
    let orgs = record_candidates(&record(), EntityKind::Organization);
    assert_eq!(orgs, vec!["ACME Labs", "Open Tools"]);
}

#[test]
fn test_extract_across_records_keeps_record_order() {
    let a = ProposalRecord {
        proposer: Some("Zed".to_string()),
        ..ProposalRecord::default()
    };
    let b = ProposalRecord {
        proposer: Some("Amy".to_string()),
        company: Some("Zed Corp".to_string()),
        ..ProposalRecord::default()
    };
    let empty = ProposalRecord::default();
    let records = vec![a, empty, b];
    assert_eq!(
        extract_candidates(&records, EntityKind::Person),
        vec!["Zed", "Amy"]
    );
    assert_eq!(
        extract_candidates(&records, EntityKind::Organization),
        vec!["Zed Corp"]
    );
}

#[test]
fn test_duplicates_across_records_are_kept() {
    let r = ProposalRecord {
        proposer: Some("Amy".to_string()),
        ..ProposalRecord::default()
    };
    let records = vec![r.clone(), r];
    assert_eq!(
        extract_candidates(&records, EntityKind::Person),
        vec!["Amy", "Amy"]
    );
}
