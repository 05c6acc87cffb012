//! Fuzzy include/exclude filtering over analysis results.
//!
//! The filter narrows a result list by secret name using a subsequence
//! match: the query characters must appear in order (not necessarily
//! contiguously) inside the name, case-insensitively. Filtering always
//! runs against an untouched baseline so repeated applications are
//! idempotent and a live preview can recompute on every keystroke.

use crate::analyzer::AnalysisResult;

/// Whether matching rows are kept or dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// Keep rows whose name matches the query.
    #[default]
    Include,
    /// Keep rows whose name does NOT match the query.
    Exclude,
}

impl FilterMode {
    /// Short label for UI display.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Include => "include",
            Self::Exclude => "exclude",
        }
    }
}

/// Subsequence fuzzy match, case-insensitive.
///
/// Returns true when the lowercase `query` characters appear as an ordered
/// (not necessarily contiguous) subsequence of the lowercase `target`.
/// An empty query matches everything.
///
/// # Examples
///
/// ```
/// use secretsweep::filter::fuzzy_match;
///
/// assert!(fuzzy_match("scrt", "my-secret-name"));
/// assert!(fuzzy_match("", "anything"));
/// assert!(!fuzzy_match("xyz", "my-secret-name"));
/// ```
#[must_use]
pub fn fuzzy_match(query: &str, target: &str) -> bool {
    let target = target.to_lowercase();
    let mut remaining = target.chars();

    query
        .to_lowercase()
        .chars()
        .all(|wanted| remaining.any(|c| c == wanted))
}

/// Apply a filter to a baseline, producing the narrowed row list.
///
/// The baseline is never mutated; callers recompute from the same baseline
/// on every query change rather than stacking filters.
#[must_use]
pub fn apply(baseline: &[AnalysisResult], query: &str, mode: FilterMode) -> Vec<AnalysisResult> {
    let kept: Vec<AnalysisResult> = baseline
        .iter()
        .filter(|row| {
            let matched = fuzzy_match(query, &row.name);
            match mode {
                FilterMode::Include => matched,
                FilterMode::Exclude => !matched,
            }
        })
        .cloned()
        .collect();

    log::trace!(
        "Filter {:?} query={:?}: {} of {} rows kept",
        mode,
        query,
        kept.len(),
        baseline.len()
    );

    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str) -> AnalysisResult {
        AnalysisResult {
            name: name.to_string(),
            description: None,
            created_label: "2024-01-01".to_string(),
            last_accessed_label: "Never".to_string(),
            stale: true,
        }
    }

    #[test]
    fn test_fuzzy_match_subsequence() {
        assert!(fuzzy_match("src", "my-secret-name"));
        assert!(fuzzy_match("msn", "my-secret-name"));
        assert!(!fuzzy_match("xyz", "my-secret-name"));
        // Order matters: both characters exist but not in this order.
        assert!(!fuzzy_match("ns", "name"));
    }

    #[test]
    fn test_fuzzy_match_case_insensitive() {
        assert!(fuzzy_match("SRC", "my-secret-name"));
        assert!(fuzzy_match("src", "MY-SECRET-NAME"));
    }

    #[test]
    fn test_fuzzy_match_empty_query_matches_everything() {
        assert!(fuzzy_match("", "my-secret-name"));
        assert!(fuzzy_match("", ""));
    }

    #[test]
    fn test_fuzzy_match_query_longer_than_target() {
        assert!(!fuzzy_match("abcdef", "abc"));
    }

    #[test]
    fn test_include_keeps_matches() {
        let baseline = vec![row("prod/db"), row("dev/db"), row("prod/api-key")];
        let kept = apply(&baseline, "prod", FilterMode::Include);
        let names: Vec<&str> = kept.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["prod/db", "prod/api-key"]);
    }

    #[test]
    fn test_exclude_drops_matches() {
        let baseline = vec![row("prod/db"), row("dev/db"), row("prod/api-key")];
        let kept = apply(&baseline, "prod", FilterMode::Exclude);
        let names: Vec<&str> = kept.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["dev/db"]);
    }

    #[test]
    fn test_include_and_exclude_partition_the_baseline() {
        let baseline = vec![row("alpha"), row("beta"), row("gamma"), row("delta")];
        let included = apply(&baseline, "a", FilterMode::Include);
        let excluded = apply(&baseline, "a", FilterMode::Exclude);
        assert_eq!(included.len() + excluded.len(), baseline.len());
    }

    #[test]
    fn test_apply_is_idempotent_from_same_baseline() {
        let baseline = vec![row("prod/db"), row("dev/db"), row("staging/db")];
        let first = apply(&baseline, "db", FilterMode::Include);
        let second = apply(&baseline, "db", FilterMode::Include);
        assert_eq!(first, second);
    }

    #[test]
    fn test_apply_does_not_mutate_baseline() {
        let baseline = vec![row("prod/db"), row("dev/db")];
        let before = baseline.clone();
        let _ = apply(&baseline, "prod", FilterMode::Include);
        assert_eq!(baseline, before);
    }

    #[test]
    fn test_empty_query_include_keeps_all_exclude_keeps_none() {
        let baseline = vec![row("a"), row("b")];
        assert_eq!(apply(&baseline, "", FilterMode::Include).len(), 2);
        assert!(apply(&baseline, "", FilterMode::Exclude).is_empty());
    }
}
