use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("grantfuse_main_test_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn parse(args: &[&str]) -> Result<RunConfig, String> {
    let cli = Cli::try_parse_from(std::iter::once("grantfuse").chain(args.iter().copied()))
        .map_err(|e| e.to_string())?;
    RunConfig::from_command(cli.command).map_err(|e| e.to_string())
}

#[test]
fn test_identities_defaults() {
    let config = parse(&["identities", "--proposals", "p.json", "--out", "out"]).unwrap();
    let (people, orgs) = config.identities.unwrap();
    assert_eq!(people.threshold, 0.86);
    assert_eq!(orgs.threshold, 0.90);
    assert!(config.scoring.is_none());
    assert_eq!(config.out_dir, PathBuf::from("out"));
}

#[test]
fn test_score_accepts_repeated_metrics() {
    let config = parse(&[
        "score",
        "--proposals",
        "p.json",
        "--out",
        "out",
        "--metrics",
        "github.json",
        "--metrics",
        "youtube.json.gz",
    ])
    .unwrap();
    assert!(config.identities.is_none());
    let scoring = config.scoring.unwrap();
    assert_eq!(scoring.metrics.len(), 2);
    assert!(scoring.kpi_config.is_none());
}

#[test]
fn test_threshold_out_of_range_rejected() {
    let err = parse(&[
        "identities",
        "--proposals",
        "p.json",
        "--out",
        "out",
        "--people-threshold",
        "1.5",
    ])
    .unwrap_err();
    assert!(err.contains("people threshold"));

    assert!(
        parse(&[
            "run",
            "--proposals",
            "p.json",
            "--out",
            "out",
            "--org-threshold",
            "0"
        ])
        .is_err()
    );
}

#[test]
fn test_missing_out_is_usage_error() {
    assert!(parse(&["run", "--proposals", "p.json"]).is_err());
}

#[test]
fn test_run_end_to_end() {
    let dir = make_temp_dir();
    let proposals = dir.join("proposals.json");
    let metrics = dir.join("github.jsonl");
    fs::write(
        &proposals,
        r#"[
            {"id": "p1", "proposer": "Jon Smith & Ana Lima", "organization": "Open Tools", "fundingAmount": 50000},
            {"id": "p2", "proposer_name": "Jon Smyth", "category": "Community", "fundingAmount": "80000"}
        ]"#,
    )
    .unwrap();
    fs::write(
        &metrics,
        concat!(
            "{\"project_id\":\"p1\",\"source\":\"github\",\"captured_at\":\"2024-01-01T00:00:00Z\",\"values\":{\"stars\":100,\"forks\":0}}\n",
            "{\"project_id\":\"p1\",\"source\":\"github\",\"captured_at\":\"2024-02-01T00:00:00Z\",\"values\":{\"stars\":250,\"forks\":0}}\n",
        ),
    )
    .unwrap();
    let out = dir.join("out");

    let cli = Cli::try_parse_from([
        "grantfuse",
        "run",
        "--proposals",
        proposals.to_str().unwrap(),
        "--out",
        out.to_str().unwrap(),
        "--metrics",
        metrics.to_str().unwrap(),
    ])
    .unwrap();
    run(cli.command).unwrap();

    let ids: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out.join("identities.json")).unwrap()).unwrap();
    assert_eq!(ids["people"].as_array().unwrap().len(), 2);
    assert_eq!(ids["people"][0]["aliases"][0], "Jon Smyth");
    assert_eq!(ids["organizations"][0]["name"], "Open Tools");

    let scores: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out.join("impact_scores.json")).unwrap())
            .unwrap();
    let p1 = &scores[0];
    assert_eq!(p1["project_id"], "p1");
    assert!((p1["score"].as_f64().unwrap() - 30.0).abs() < 1e-9);
    assert_eq!(p1["confidence"], 0.75);
    assert_eq!(scores[1]["profile"], "community");

    assert!(out.join("report.txt").exists());
    assert!(out.join("summary.json").exists());
}

#[test]
fn test_run_reports_missing_proposals() {
    let dir = make_temp_dir();
    let cli = Cli::try_parse_from([
        "grantfuse",
        "identities",
        "--proposals",
        dir.join("nope.json").to_str().unwrap(),
        "--out",
        dir.join("out").to_str().unwrap(),
    ])
    .unwrap();
    let err = run(cli.command).unwrap_err();
    assert!(matches!(err, AppError::Input(_)));
}
