//! Staleness analysis for secret metadata.
//!
//! # Overview
//!
//! This module turns raw [`SecretRecord`]s into display-ready
//! [`AnalysisResult`]s annotated with a staleness flag. A secret is
//! considered stale when it has not been accessed (or, if it was never
//! accessed, not been created) within the recency threshold.
//!
//! The analyzer assumes pre-filtered input: the secret source already
//! excludes reserved configuration entries and records without a creation
//! timestamp. Output order matches input order.
//!
//! # Example
//!
//! ```
//! use chrono::{Duration, Utc};
//! use secretsweep::analyzer::analyze;
//! use secretsweep::store::SecretRecord;
//!
//! let now = Utc::now();
//! let records = vec![SecretRecord {
//!     name: "prod/db-password".to_string(),
//!     created: now - Duration::days(100),
//!     last_accessed: None,
//!     description: None,
//! }];
//!
//! let results = analyze(&records, true, now);
//! assert_eq!(results.len(), 1);
//! assert!(results[0].stale);
//! assert_eq!(results[0].last_accessed_label, "Never");
//! ```

use chrono::{DateTime, Duration, Utc};

use crate::store::SecretRecord;

/// Number of days without access after which a secret counts as stale.
pub const STALE_AFTER_DAYS: i64 = 14;

/// Date format used for the Created / Last Accessed columns.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// A staleness-annotated view of one secret, immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResult {
    /// Unique secret name.
    pub name: String,
    /// Optional human-entered description.
    pub description: Option<String>,
    /// Creation date rendered for display.
    pub created_label: String,
    /// Last-accessed date rendered for display, `"Never"` when absent.
    pub last_accessed_label: String,
    /// Whether the secret exceeded the recency threshold.
    pub stale: bool,
}

/// Annotate records with staleness, optionally keeping only stale ones.
///
/// The staleness age is measured from `last_accessed` when present,
/// otherwise from `created`. When `stale_only` is true the output contains
/// only records whose age exceeds [`STALE_AFTER_DAYS`]; when false every
/// record is returned, still annotated. Input order is preserved.
#[must_use]
pub fn analyze(records: &[SecretRecord], stale_only: bool, now: DateTime<Utc>) -> Vec<AnalysisResult> {
    let threshold = Duration::days(STALE_AFTER_DAYS);

    let results: Vec<AnalysisResult> = records
        .iter()
        .filter_map(|record| {
            let reference = record.last_accessed.unwrap_or(record.created);
            let stale = now.signed_duration_since(reference) > threshold;

            if stale_only && !stale {
                return None;
            }

            Some(AnalysisResult {
                name: record.name.clone(),
                description: record.description.clone(),
                created_label: record.created.format(DATE_FORMAT).to_string(),
                last_accessed_label: record
                    .last_accessed
                    .map_or_else(|| "Never".to_string(), |t| t.format(DATE_FORMAT).to_string()),
                stale,
            })
        })
        .collect();

    log::debug!(
        "Analyzed {} records: {} results (stale_only={})",
        records.len(),
        results.len(),
        stale_only
    );

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, created_days_ago: i64, accessed_days_ago: Option<i64>) -> SecretRecord {
        let now = Utc::now();
        SecretRecord {
            name: name.to_string(),
            created: now - Duration::days(created_days_ago),
            last_accessed: accessed_days_ago.map(|d| now - Duration::days(d)),
            description: None,
        }
    }

    #[test]
    fn test_recently_accessed_is_not_stale() {
        let now = Utc::now();
        let results = analyze(&[record("a", 100, Some(2))], false, now);
        assert_eq!(results.len(), 1);
        assert!(!results[0].stale);
    }

    #[test]
    fn test_old_access_is_stale() {
        let now = Utc::now();
        let results = analyze(&[record("a", 100, Some(30))], false, now);
        assert!(results[0].stale);
    }

    #[test]
    fn test_never_accessed_uses_creation_age() {
        let now = Utc::now();

        // Created recently, never accessed: not stale yet.
        let fresh = analyze(&[record("fresh", 3, None)], false, now);
        assert!(!fresh[0].stale);
        assert_eq!(fresh[0].last_accessed_label, "Never");

        // Created long ago, never accessed: stale.
        let old = analyze(&[record("old", 60, None)], false, now);
        assert!(old[0].stale);
    }

    #[test]
    fn test_age_exactly_at_threshold_is_not_stale() {
        let now = Utc::now();
        let results = analyze(&[record("edge", 100, Some(STALE_AFTER_DAYS))], false, now);
        assert!(!results[0].stale, "threshold must be exceeded, not merely reached");
    }

    #[test]
    fn test_stale_only_filters_fresh_records() {
        let now = Utc::now();
        let records = vec![
            record("fresh", 100, Some(1)),
            record("stale", 100, Some(90)),
            record("never", 90, None),
        ];

        let filtered = analyze(&records, true, now);
        let names: Vec<&str> = filtered.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["stale", "never"]);
    }

    #[test]
    fn test_filtered_output_is_subset_of_unfiltered() {
        let now = Utc::now();
        let records = vec![
            record("a", 50, Some(20)),
            record("b", 50, Some(5)),
            record("c", 50, None),
        ];

        let all = analyze(&records, false, now);
        let stale = analyze(&records, true, now);

        for result in &stale {
            assert!(all.contains(result));
        }
    }

    #[test]
    fn test_order_preserved() {
        let now = Utc::now();
        let records = vec![
            record("zulu", 100, Some(90)),
            record("alpha", 100, Some(80)),
            record("mike", 100, Some(70)),
        ];

        let results = analyze(&records, false, now);
        let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["zulu", "alpha", "mike"]);
    }

    #[test]
    fn test_labels_format() {
        let created = "2024-03-01T12:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let accessed = "2024-06-15T08:30:00Z".parse::<DateTime<Utc>>().unwrap();
        let now = "2024-07-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap();

        let record = SecretRecord {
            name: "labeled".to_string(),
            created,
            last_accessed: Some(accessed),
            description: Some("a test secret".to_string()),
        };

        let results = analyze(&[record], false, now);
        assert_eq!(results[0].created_label, "2024-03-01");
        assert_eq!(results[0].last_accessed_label, "2024-06-15");
        assert_eq!(results[0].description.as_deref(), Some("a test secret"));
    }
}
