//! Log query planning
//!
//! Translates the loosely-typed filter parameters of [`LogQuery`] into a
//! normalized [`QueryPlan`]: predicate parts, a sort specification, and a
//! skip/limit pagination window. Every store backend interprets the same
//! plan, so the permissive-filtering rules live in exactly one place:
//!
//! - `page`/`limit` fall back to 1/50 when absent, non-numeric, or
//!   non-positive; a requested page is never allowed to produce a negative
//!   skip.
//! - An unrecognized `status` value is kept verbatim and matched by exact
//!   equality, so it selects nothing instead of erroring.
//! - The date range applies only when both bounds are present and
//!   parseable; a single bound is ignored entirely.
//! - An unknown sort field falls back to the default `createdAt` descending.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::log::InterfaceLog;
use crate::dto::log::LogQuery;

/// Page requested when the client supplies none.
pub const DEFAULT_PAGE: i64 = 1;

/// Entries per page when the client supplies no limit.
pub const DEFAULT_LIMIT: i64 = 50;

/// Fields a result set can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    CreatedAt,
    InterfaceName,
    IntegrationKey,
    Status,
}

impl SortField {
    /// Storage column backing this field.
    pub const fn column(&self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::InterfaceName => "interface_name",
            Self::IntegrationKey => "integration_key",
            Self::Status => "status",
        }
    }

    fn parse(name: &str) -> Option<Self> {
        match name {
            "createdAt" => Some(Self::CreatedAt),
            "interfaceName" => Some(Self::InterfaceName),
            "integrationKey" => Some(Self::IntegrationKey),
            "status" => Some(Self::Status),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// A resolved sort specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    /// Newest entries first.
    fn default() -> Self {
        Self {
            field: SortField::CreatedAt,
            direction: SortDirection::Descending,
        }
    }
}

/// Normalized store query: predicate parts, sort, and pagination window.
#[derive(Debug, Clone)]
pub struct QueryPlan {
    /// Raw status value, matched by exact equality against the stored
    /// encoding. Unknown values therefore match nothing.
    pub status: Option<String>,
    /// Lowercased substring matched case-insensitively anywhere in the
    /// interface name.
    pub interface_contains: Option<String>,
    pub integration_key: Option<String>,
    /// Inclusive creation-time bounds; present only when the request
    /// carried both.
    pub range: Option<(DateTime<Utc>, DateTime<Utc>)>,
    pub sort: SortSpec,
    /// Normalized 1-based page, echoed back as `currentPage`.
    pub page: i64,
    pub limit: i64,
    pub skip: i64,
}

impl QueryPlan {
    /// Builds a plan from raw request parameters.
    pub fn from_query(query: &LogQuery) -> Self {
        let page = parse_positive(query.page.as_deref()).unwrap_or(DEFAULT_PAGE);
        let limit = parse_positive(query.limit.as_deref()).unwrap_or(DEFAULT_LIMIT);

        let range = match (
            parse_date(query.start_date.as_deref()),
            parse_date(query.end_date.as_deref()),
        ) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        };

        Self {
            status: non_empty(query.status.as_deref()).map(str::to_owned),
            interface_contains: non_empty(query.interface_name.as_deref()).map(str::to_lowercase),
            integration_key: non_empty(query.integration_key.as_deref()).map(str::to_owned),
            range,
            sort: parse_sort(query.sort.as_deref()),
            page,
            limit,
            // Saturates so an absurd page number degrades to an empty page
            // instead of overflowing
            skip: (page - 1).saturating_mul(limit),
        }
    }

    /// Applies the predicate to a single entry.
    pub fn matches(&self, entry: &InterfaceLog) -> bool {
        if let Some(status) = &self.status {
            if entry.status.as_str() != status {
                return false;
            }
        }

        if let Some(needle) = &self.interface_contains {
            if !entry.interface_name.to_lowercase().contains(needle.as_str()) {
                return false;
            }
        }

        if let Some(key) = &self.integration_key {
            if &entry.integration_key != key {
                return false;
            }
        }

        if let Some((start, end)) = &self.range {
            if entry.created_at < *start || entry.created_at > *end {
                return false;
            }
        }

        true
    }

    /// Orders two entries according to the sort specification.
    pub fn compare(&self, a: &InterfaceLog, b: &InterfaceLog) -> Ordering {
        let ordering = match self.sort.field {
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::InterfaceName => a.interface_name.cmp(&b.interface_name),
            SortField::IntegrationKey => a.integration_key.cmp(&b.integration_key),
            SortField::Status => a.status.as_str().cmp(b.status.as_str()),
        };

        match self.sort.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

fn parse_positive(value: Option<&str>) -> Option<i64> {
    non_empty(value)?.parse::<i64>().ok().filter(|n| *n > 0)
}

/// Accepts RFC 3339 timestamps and plain `YYYY-MM-DD` dates (interpreted
/// as midnight UTC). Anything else is treated as absent.
fn parse_date(value: Option<&str>) -> Option<DateTime<Utc>> {
    let value = non_empty(value)?;

    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn parse_sort(value: Option<&str>) -> SortSpec {
    let Some(raw) = non_empty(value) else {
        return SortSpec::default();
    };

    let (name, direction) = match raw.strip_prefix('-') {
        Some(rest) => (rest, SortDirection::Descending),
        None => (raw, SortDirection::Ascending),
    };

    match SortField::parse(name) {
        Some(field) => SortSpec { field, direction },
        None => SortSpec::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::log::LogStatus;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn query() -> LogQuery {
        LogQuery::default()
    }

    fn entry(name: &str, key: &str, status: LogStatus) -> InterfaceLog {
        InterfaceLog {
            id: Uuid::new_v4(),
            interface_name: name.to_string(),
            integration_key: key.to_string(),
            status,
            message: None,
            created_at: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_defaults_when_query_is_empty() {
        let plan = QueryPlan::from_query(&query());

        assert_eq!(plan.page, 1);
        assert_eq!(plan.limit, 50);
        assert_eq!(plan.skip, 0);
        assert_eq!(plan.sort, SortSpec::default());
        assert!(plan.status.is_none());
        assert!(plan.range.is_none());
    }

    #[test]
    fn test_page_and_limit_coercion() {
        let mut q = query();
        q.page = Some("3".to_string());
        q.limit = Some("20".to_string());

        let plan = QueryPlan::from_query(&q);
        assert_eq!(plan.page, 3);
        assert_eq!(plan.limit, 20);
        assert_eq!(plan.skip, 40);
    }

    #[test]
    fn test_non_numeric_page_and_limit_fall_back() {
        let mut q = query();
        q.page = Some("two".to_string());
        q.limit = Some("".to_string());

        let plan = QueryPlan::from_query(&q);
        assert_eq!(plan.page, 1);
        assert_eq!(plan.limit, 50);
        assert_eq!(plan.skip, 0);
    }

    #[test]
    fn test_non_positive_page_never_yields_negative_skip() {
        for bad in ["0", "-1", "-50"] {
            let mut q = query();
            q.page = Some(bad.to_string());

            let plan = QueryPlan::from_query(&q);
            assert_eq!(plan.page, 1, "page {bad:?} must normalize to 1");
            assert_eq!(plan.skip, 0);
        }
    }

    #[test]
    fn test_huge_page_saturates_instead_of_overflowing() {
        let mut q = query();
        q.page = Some(i64::MAX.to_string());
        q.limit = Some("50".to_string());

        let plan = QueryPlan::from_query(&q);
        assert_eq!(plan.page, i64::MAX);
        assert_eq!(plan.skip, i64::MAX);
    }

    #[test]
    fn test_sort_sign_parsing() {
        let mut q = query();
        q.sort = Some("interfaceName".to_string());
        let plan = QueryPlan::from_query(&q);
        assert_eq!(plan.sort.field, SortField::InterfaceName);
        assert_eq!(plan.sort.direction, SortDirection::Ascending);

        q.sort = Some("-status".to_string());
        let plan = QueryPlan::from_query(&q);
        assert_eq!(plan.sort.field, SortField::Status);
        assert_eq!(plan.sort.direction, SortDirection::Descending);
    }

    #[test]
    fn test_unknown_sort_field_falls_back_to_default() {
        let mut q = query();
        q.sort = Some("-message".to_string());

        let plan = QueryPlan::from_query(&q);
        assert_eq!(plan.sort, SortSpec::default());
    }

    #[test]
    fn test_single_date_bound_is_ignored() {
        let mut q = query();
        q.start_date = Some("2025-06-01T00:00:00Z".to_string());

        let plan = QueryPlan::from_query(&q);
        assert!(plan.range.is_none(), "startDate alone must not filter");

        let mut q = query();
        q.end_date = Some("2025-06-01T00:00:00Z".to_string());

        let plan = QueryPlan::from_query(&q);
        assert!(plan.range.is_none(), "endDate alone must not filter");
    }

    #[test]
    fn test_date_range_requires_both_parseable() {
        let mut q = query();
        q.start_date = Some("not-a-date".to_string());
        q.end_date = Some("2025-06-01T00:00:00Z".to_string());

        let plan = QueryPlan::from_query(&q);
        assert!(plan.range.is_none());
    }

    #[test]
    fn test_date_range_accepts_plain_dates() {
        let mut q = query();
        q.start_date = Some("2025-06-01".to_string());
        q.end_date = Some("2025-06-30".to_string());

        let plan = QueryPlan::from_query(&q);
        let (start, end) = plan.range.expect("range should be active");
        assert_eq!(start, Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2025, 6, 30, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_empty_filter_strings_are_inert() {
        let mut q = query();
        q.status = Some("".to_string());
        q.interface_name = Some("   ".to_string());
        q.integration_key = Some("".to_string());

        let plan = QueryPlan::from_query(&q);
        assert!(plan.status.is_none());
        assert!(plan.interface_contains.is_none());
        assert!(plan.integration_key.is_none());
    }

    #[test]
    fn test_status_predicate_is_exact() {
        let mut q = query();
        q.status = Some("Failure".to_string());
        let plan = QueryPlan::from_query(&q);

        assert!(plan.matches(&entry("A", "k", LogStatus::Failure)));
        assert!(!plan.matches(&entry("A", "k", LogStatus::Success)));
    }

    #[test]
    fn test_unknown_status_matches_nothing() {
        let mut q = query();
        q.status = Some("Exploded".to_string());
        let plan = QueryPlan::from_query(&q);

        for status in LogStatus::ALL {
            assert!(!plan.matches(&entry("A", "k", status)));
        }
    }

    #[test]
    fn test_interface_name_substring_is_case_insensitive() {
        let mut q = query();
        q.interface_name = Some("GATEWAY".to_string());
        let plan = QueryPlan::from_query(&q);

        assert!(plan.matches(&entry("payment-gateway-eu", "k", LogStatus::Success)));
        assert!(!plan.matches(&entry("billing-api", "k", LogStatus::Success)));
    }

    #[test]
    fn test_integration_key_is_exact() {
        let mut q = query();
        q.integration_key = Some("pg-001".to_string());
        let plan = QueryPlan::from_query(&q);

        assert!(plan.matches(&entry("A", "pg-001", LogStatus::Success)));
        assert!(!plan.matches(&entry("A", "pg-0011", LogStatus::Success)));
    }

    #[test]
    fn test_date_range_is_inclusive_on_both_ends() {
        let mut q = query();
        q.start_date = Some("2025-06-01T12:00:00Z".to_string());
        q.end_date = Some("2025-06-01T12:00:00Z".to_string());
        let plan = QueryPlan::from_query(&q);

        // entry() stamps exactly 2025-06-01T12:00:00Z
        assert!(plan.matches(&entry("A", "k", LogStatus::Success)));
    }

    #[test]
    fn test_compare_orders_by_created_at_descending_by_default() {
        let plan = QueryPlan::from_query(&query());

        let mut older = entry("A", "k", LogStatus::Success);
        older.created_at = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let mut newer = entry("B", "k", LogStatus::Success);
        newer.created_at = Utc.with_ymd_and_hms(2025, 6, 2, 0, 0, 0).unwrap();

        assert_eq!(plan.compare(&newer, &older), Ordering::Less);
        assert_eq!(plan.compare(&older, &newer), Ordering::Greater);
    }

    #[test]
    fn test_compare_ascending_name_sort() {
        let mut q = query();
        q.sort = Some("interfaceName".to_string());
        let plan = QueryPlan::from_query(&q);

        let a = entry("alpha", "k", LogStatus::Success);
        let b = entry("beta", "k", LogStatus::Success);
        assert_eq!(plan.compare(&a, &b), Ordering::Less);
    }
}
