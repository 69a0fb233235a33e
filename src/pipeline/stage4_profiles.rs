use crate::model::kpi::{KpiCatalog, KpiProfile};

pub const DEFAULT_PROFILE: &str = "default";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedProfile<'a> {
    pub name: &'a str,
    pub profile: &'a KpiProfile,
}

/// Category override (lowercased lookup) or the default profile. An
/// override with no KPIs also falls back to the default.
pub fn resolve_profile<'a>(category: Option<&str>, catalog: &'a KpiCatalog) -> ResolvedProfile<'a> {
    let key = category.unwrap_or("").to_lowercase();
    match catalog.overrides.get_key_value(&key) {
        Some((name, profile)) if !profile.is_empty() => ResolvedProfile {
            name: name.as_str(),
            profile,
        },
        _ => ResolvedProfile {
            name: DEFAULT_PROFILE,
            profile: &catalog.default,
        },
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_profiles.rs"]
mod tests;
