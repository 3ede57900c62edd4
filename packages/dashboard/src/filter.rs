//! FIR listing search and category filtering.
//!
//! Re-evaluated synchronously on every keystroke and selection change; no
//! debounce. The filter is stable: matching records come back in source
//! order, never re-sorted.

use kavach_intel_models::FirRecord;

/// Sentinel category value matching every record.
pub const ALL_CATEGORIES: &str = "All";

/// The listing's search term and category selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirFilter {
    /// Free-text search term, matched case-insensitively against the case
    /// identifier and the offense category.
    pub search: String,
    /// Exact category to keep, or [`ALL_CATEGORIES`].
    pub category: String,
}

impl Default for FirFilter {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: ALL_CATEGORIES.to_string(),
        }
    }
}

impl FirFilter {
    /// Whether a single record passes both the search term and the
    /// category selection.
    #[must_use]
    pub fn matches(&self, record: &FirRecord) -> bool {
        let needle = self.search.to_lowercase();
        let matches_search = needle.is_empty()
            || record.fir_uid.to_lowercase().contains(&needle)
            || record.weapon_type.to_lowercase().contains(&needle);
        let matches_category =
            self.category == ALL_CATEGORIES || self.category == record.weapon_type;
        matches_search && matches_category
    }
}

/// Returns the subsequence of records passing the filter, source order
/// preserved.
#[must_use]
pub fn filter_firs<'a>(records: &'a [FirRecord], filter: &FirFilter) -> Vec<&'a FirRecord> {
    records.iter().filter(|r| filter.matches(r)).collect()
}

#[cfg(test)]
mod tests {
    use kavach_intel_models::{FirStatus, RiskTier};

    use super::*;

    fn record(uid: &str, category: &str) -> FirRecord {
        FirRecord {
            fir_uid: uid.to_string(),
            bns_section: "303".to_string(),
            weapon_type: category.to_string(),
            status: FirStatus::Pending,
            risk: RiskTier::Medium,
        }
    }

    fn listing() -> Vec<FirRecord> {
        vec![record("FIR-001", "A"), record("FIR-002", "B")]
    }

    #[test]
    fn search_narrows_by_identifier() {
        let records = listing();
        let filter = FirFilter {
            search: "001".to_string(),
            category: ALL_CATEGORIES.to_string(),
        };
        let hits = filter_firs(&records, &filter);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].fir_uid, "FIR-001");
    }

    #[test]
    fn category_narrows_exactly() {
        let records = listing();
        let filter = FirFilter {
            search: String::new(),
            category: "B".to_string(),
        };
        let hits = filter_firs(&records, &filter);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].fir_uid, "FIR-002");
    }

    #[test]
    fn empty_filter_keeps_source_order() {
        let records = listing();
        let hits = filter_firs(&records, &FirFilter::default());
        let uids: Vec<&str> = hits.iter().map(|r| r.fir_uid.as_str()).collect();
        assert_eq!(uids, ["FIR-001", "FIR-002"]);
    }

    #[test]
    fn search_is_case_insensitive_and_covers_category_text() {
        let records = vec![
            record("FIR-2023-001", "Organized Crime"),
            record("FIR-2023-002", "Larceny"),
        ];
        let filter = FirFilter {
            search: "organized".to_string(),
            category: ALL_CATEGORIES.to_string(),
        };
        let hits = filter_firs(&records, &filter);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].fir_uid, "FIR-2023-001");
    }

    #[test]
    fn category_match_is_exact_not_substring() {
        let records = vec![record("FIR-001", "Burglary"), record("FIR-002", "Burg")];
        let filter = FirFilter {
            search: String::new(),
            category: "Burg".to_string(),
        };
        let hits = filter_firs(&records, &filter);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].fir_uid, "FIR-002");
    }
}
