use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static DISALLOWED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9\s\-']").unwrap());
static NAME_DELIMITER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*(?:,|/|\band\b|&|\+|\||;)\s*").unwrap());

/// Comparison key for a raw name. Never stored; the raw string is what
/// ends up as canonical name or alias.
pub fn normalize(raw: &str) -> String {
    let collapsed = WHITESPACE_RUN.replace_all(raw.trim(), " ");
    let stripped = DISALLOWED.replace_all(&collapsed, "");
    stripped.to_lowercase()
}

/// Splits a composite field ("Alice & Bob, Carol") into its fragments,
/// keeping the original spelling of each.
pub fn split(raw: &str) -> Vec<String> {
    NAME_DELIMITER
        .split(raw)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}
