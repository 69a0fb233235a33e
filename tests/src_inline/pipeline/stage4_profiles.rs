use super::*;
use crate::model::kpi::KpiConfig;

#[test]
fn test_category_match_is_case_insensitive() {
    let catalog = KpiCatalog::builtin_v1();
    let resolved = resolve_profile(Some("Community"), &catalog);
    assert_eq!(resolved.name, "community");
    assert_eq!(resolved.profile, &catalog.overrides["community"]);

    let resolved = resolve_profile(Some("INFRASTRUCTURE"), &catalog);
    assert_eq!(resolved.name, "infrastructure");
}

#[test]
fn test_unknown_or_missing_category_uses_default() {
    let catalog = KpiCatalog::builtin_v1();
    for category in [Some("Developer Tools"), Some(""), None] {
        let resolved = resolve_profile(category, &catalog);
        assert_eq!(resolved.name, DEFAULT_PROFILE);
        assert_eq!(resolved.profile, &catalog.default);
    }
}

#[test]
fn test_empty_override_falls_back() {
    let mut catalog = KpiCatalog::builtin_v1();
    catalog
        .overrides
        .insert("research".to_string(), KpiProfile::new());
    let resolved = resolve_profile(Some("Research"), &catalog);
    assert_eq!(resolved.name, DEFAULT_PROFILE);

    catalog.overrides.insert(
        "research".to_string(),
        [("github_stars".to_string(), KpiConfig::new(10.0, 1.0))]
            .into_iter()
            .collect(),
    );
    assert_eq!(resolve_profile(Some("research"), &catalog).name, "research");
}
