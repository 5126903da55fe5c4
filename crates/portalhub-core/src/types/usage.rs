//! Monthly usage aggregates and the persisted rollup record.

use std::fmt;

use chrono::{DateTime, Datelike, Months, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::types::id::UserId;

/// A calendar month in UTC, identified by its first day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BillingMonth(NaiveDate);

impl BillingMonth {
    /// The month containing the given instant.
    pub fn containing(at: DateTime<Utc>) -> Self {
        let day = at.date_naive();
        Self(day.with_day(1).unwrap_or(day))
    }

    /// Build a month from a year and 1-based month number.
    pub fn from_ym(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self)
    }

    /// First day of the month.
    pub fn first_day(&self) -> NaiveDate {
        self.0
    }

    /// Midnight UTC on the first day of the month (inclusive bound).
    pub fn starts_at(&self) -> DateTime<Utc> {
        Utc.from_utc_datetime(&self.0.and_time(chrono::NaiveTime::MIN))
    }

    /// Midnight UTC on the first day of the following month (exclusive bound).
    pub fn ends_at(&self) -> DateTime<Utc> {
        let next = self.0.checked_add_months(Months::new(1)).unwrap_or(NaiveDate::MAX);
        Utc.from_utc_datetime(&next.and_time(chrono::NaiveTime::MIN))
    }
}

impl fmt::Display for BillingMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m"))
    }
}

/// Usage aggregated for one user over one billing month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyUsage {
    /// Total stored bytes at the time of aggregation.
    pub storage_bytes: u64,
    /// Portals created during the month.
    pub portals_created: u64,
    /// Files uploaded during the month.
    pub files_uploaded: u64,
    /// Download bandwidth consumed during the month.
    pub bandwidth_bytes: u64,
}

/// Persisted per-user, per-month usage rollup.
///
/// One row per `(user_id, month)`. Created by the first rollup of a month
/// and overwritten by every later run in the same month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct UsageRollupRecord {
    /// The user this rollup belongs to.
    pub user_id: UserId,
    /// First day of the rolled-up month.
    pub month: NaiveDate,
    /// Total stored bytes.
    pub storage_bytes: i64,
    /// Portals created in the month.
    pub portals_created: i64,
    /// Files uploaded in the month.
    pub files_uploaded: i64,
    /// Bandwidth consumed in the month.
    pub bandwidth_bytes: i64,
    /// When this rollup was computed.
    pub computed_at: DateTime<Utc>,
}

impl UsageRollupRecord {
    /// Build a record from freshly aggregated usage.
    pub fn new(
        user_id: UserId,
        month: BillingMonth,
        usage: MonthlyUsage,
        computed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            month: month.first_day(),
            storage_bytes: saturating_i64(usage.storage_bytes),
            portals_created: saturating_i64(usage.portals_created),
            files_uploaded: saturating_i64(usage.files_uploaded),
            bandwidth_bytes: saturating_i64(usage.bandwidth_bytes),
            computed_at,
        }
    }

    /// The rolled-up month.
    pub fn billing_month(&self) -> BillingMonth {
        BillingMonth(self.month.with_day(1).unwrap_or(self.month))
    }

    /// Stored bytes as an unsigned count (negative rows read as zero).
    pub fn storage_used(&self) -> u64 {
        u64::try_from(self.storage_bytes).unwrap_or(0)
    }
}

fn saturating_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_bounds() {
        let at = Utc.with_ymd_and_hms(2026, 12, 17, 13, 45, 0).unwrap();
        let month = BillingMonth::containing(at);

        assert_eq!(month.to_string(), "2026-12");
        assert_eq!(month.starts_at(), Utc.with_ymd_and_hms(2026, 12, 1, 0, 0, 0).unwrap());
        assert_eq!(month.ends_at(), Utc.with_ymd_and_hms(2027, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_record_round_trips_month() {
        let month = BillingMonth::from_ym(2026, 2).unwrap();
        let usage = MonthlyUsage {
            storage_bytes: 1_024,
            portals_created: 2,
            files_uploaded: 7,
            bandwidth_bytes: 4_096,
        };
        let record = UsageRollupRecord::new(UserId::new(), month, usage, Utc::now());

        assert_eq!(record.billing_month(), month);
        assert_eq!(record.storage_used(), 1_024);
        assert_eq!(record.files_uploaded, 7);
    }

    #[test]
    fn test_oversized_counters_saturate() {
        let usage = MonthlyUsage {
            storage_bytes: u64::MAX,
            ..MonthlyUsage::default()
        };
        let month = BillingMonth::from_ym(2026, 1).unwrap();
        let record = UsageRollupRecord::new(UserId::new(), month, usage, Utc::now());
        assert_eq!(record.storage_bytes, i64::MAX);
    }
}
