use super::*;

fn people() -> ClusterParams {
    ClusterParams::people_default()
}

#[test]
fn test_similar_spellings_merge_with_alias() {
    let clusters = resolve(&["Jon Smith", "Jon Smyth"], &people());
    assert_eq!(clusters.len(), 1);
    assert_eq!(clusters[0].canonical_name, "Jon Smith");
    assert_eq!(clusters[0].aliases, vec!["Jon Smyth"]);
    assert_eq!(clusters[0].confidence, 1.0);
}

#[test]
fn test_threshold_boundary_is_inclusive() {
    let score = similarity("jon smith", "jon smyth");

    let at = ClusterParams { threshold: score };
    assert_eq!(resolve(&["Jon Smith", "Jon Smyth"], &at).len(), 1);

    let above = ClusterParams {
        threshold: score + 1e-9,
    };
    let clusters = resolve(&["Jon Smith", "Jon Smyth"], &above);
    assert_eq!(clusters.len(), 2);
    assert_eq!(clusters[1].canonical_name, "Jon Smyth");
    assert!(clusters[1].aliases.is_empty());
}

#[test]
fn test_identical_normalized_forms_cluster_in_any_order() {
    for order in [["Jon Smith!", "jon  smith"], ["jon  smith", "Jon Smith!"]] {
        let clusters = resolve(&order, &ClusterParams { threshold: 1.0 });
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].canonical_name, order[0]);
        assert_eq!(clusters[0].aliases, vec![order[1]]);
    }
}

#[test]
fn test_first_fit_not_best_fit() {
    let params = ClusterParams { threshold: 0.35 };
    let clusters = resolve(&["abcdef", "ghijkl", "abcghijkl"], &params);
    assert_eq!(clusters.len(), 2);
    // scores 0.4 against the first cluster and 0.8 against the second; the first wins
    assert_eq!(clusters[0].aliases, vec!["abcghijkl"]);
    assert!(clusters[1].aliases.is_empty());
}

#[test]
fn test_input_order_changes_clusters() {
    let params = ClusterParams { threshold: 0.35 };
    let forward = resolve(&["abcdef", "ghijkl", "abcghijkl"], &params);
    let reversed = resolve(&["abcghijkl", "ghijkl", "abcdef"], &params);
    assert_eq!(reversed.len(), 1);
    assert_ne!(forward, reversed);
}

#[test]
fn test_aliases_have_no_duplicates_or_canonical() {
    let names = [
        "Maria Gonzalez",
        "Maria Gonzales",
        "Maria Gonzalez",
        "Maria Gonzales",
        "maria gonzalez",
    ];
    let clusters = resolve(&names, &people());
    assert_eq!(clusters.len(), 1);
    let c = &clusters[0];
    assert_eq!(c.aliases, vec!["Maria Gonzales", "maria gonzalez"]);
    assert!(!c.aliases.contains(&c.canonical_name));
}

#[test]
fn test_confidence_never_decreases() {
    let names = ["Jon Smith", "Jon Smyth", "Jonny Smith", "J Smith", "Jon Smith"];
    let mut last: Vec<f64> = Vec::new();
    for n in 1..=names.len() {
        let clusters = resolve(&names[..n], &people());
        for (idx, c) in last.iter().enumerate() {
            let now: &IdentityCluster = &clusters[idx];
            assert!(now.confidence >= *c);
            assert!((0.0..=1.0).contains(&now.confidence));
        }
        last = clusters.iter().map(|c| c.confidence).collect();
    }
}

#[test]
fn test_resolution_is_idempotent() {
    let names = ["Ana Lima", "Ana  Lima", "Bruno Costa", "Ana Lim", "bruno costa"];
    let a = resolve(&names, &people());
    let b = resolve(&names, &people());
    assert_eq!(a, b);
}

#[test]
fn test_empty_input_yields_no_clusters() {
    let none: [&str; 0] = [];
    assert!(resolve(&none, &people()).is_empty());
    assert!(build_identity_index(&[], &people(), &ClusterParams::organizations_default())
        .people
        .is_empty());
}

#[test]
fn test_build_identity_index_and_summary() {
    let records = vec![
        ProposalRecord {
            proposer: Some("Jon Smith, Ana Lima".to_string()),
            organization: Some("Open Tools Ltd".to_string()),
            ..ProposalRecord::default()
        },
        ProposalRecord {
            proposer_name: Some("Jon Smyth".to_string()),
            company: Some("Open Tools Ltd.".to_string()),
            team: Some("Lambda Guild".to_string()),
            ..ProposalRecord::default()
        },
    ];
    let index = build_identity_index(
        &records,
        &ClusterParams::people_default(),
        &ClusterParams::organizations_default(),
    );
    assert_eq!(index.people.len(), 2);
    assert_eq!(index.people[0].aliases, vec!["Jon Smyth"]);
    assert_eq!(index.organizations.len(), 2);
    assert_eq!(index.organizations[0].aliases, vec!["Open Tools Ltd."]);

    let summary = summarize(&index);
    assert_eq!(summary.organizations[0].name, "Open Tools Ltd");
    assert_eq!(summary.organizations[1].name, "Lambda Guild");
    assert_eq!(summary.people[1].canonical_name, "Ana Lima");

    let json = serde_json::to_value(&summary).unwrap();
    assert!(json["organizations"][0].get("aliases").is_none());
    assert_eq!(json["people"][0]["aliases"][0], "Jon Smyth");
}

#[test]
fn test_round2() {
    assert_eq!(round2(0.8888), 0.89);
    assert_eq!(round2(1.0), 1.0);
}
