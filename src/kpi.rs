//! Rolling KPI calculator.
//!
//! Windows are measured in records, not calendar days: the current window is
//! the last [`WINDOW_LEN`] records and the previous window the records right
//! before it. Gaps in an export therefore widen the time span a window covers;
//! in exchange no calendar bucketing is needed.

use serde::{Deserialize, Serialize};

use crate::ingest::PerformanceRecord;

pub const WINDOW_LEN: usize = 28;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSnapshot {
    pub impressions_per_day: f64,
    /// Engagements per impression, as a percentage.
    pub engagement_rate: f64,
    /// New follows per 1,000 impressions.
    pub follow_conversion: f64,
    pub delta_impressions_per_day: f64,
    pub delta_engagement_rate: f64,
    pub delta_follow_conversion: f64,
    /// Relative change of total window impressions, in percent.
    pub impressions_change_pct: f64,
    pub posts_per_day: f64,
    pub follows_per_day: f64,
    pub net_follows_per_day: f64,
    pub profile_visits_per_day: f64,
    pub window_len: usize,
    pub previous_window_len: usize,
}

#[derive(Debug, Clone, Copy, Default)]
struct WindowTotals {
    days: usize,
    impressions: i64,
    engagements: i64,
    new_follows: i64,
    unfollows: i64,
    profile_visits: i64,
    posts: i64,
}

impl WindowTotals {
    fn from_records(records: &[PerformanceRecord]) -> Self {
        records.iter().fold(
            Self {
                days: records.len(),
                ..Self::default()
            },
            // saturating: oversized export counts must not overflow
            |mut acc, record| {
                acc.impressions = acc.impressions.saturating_add(record.impressions);
                acc.engagements = acc.engagements.saturating_add(record.engagements);
                acc.new_follows = acc.new_follows.saturating_add(record.new_follows);
                acc.unfollows = acc.unfollows.saturating_add(record.unfollows);
                acc.profile_visits = acc.profile_visits.saturating_add(record.profile_visits);
                acc.posts = acc.posts.saturating_add(record.posts_published);
                acc
            },
        )
    }

    fn per_day(&self, total: i64) -> f64 {
        if self.days == 0 {
            return 0.0;
        }
        total as f64 / self.days as f64
    }

    fn engagement_rate(&self) -> f64 {
        engagement_rate(self.engagements, self.impressions)
    }

    fn follow_conversion(&self) -> f64 {
        follow_conversion(self.new_follows, self.impressions)
    }
}

/// Engagements over impressions as a percentage, zero without impressions.
pub fn engagement_rate(engagements: i64, impressions: i64) -> f64 {
    if impressions == 0 {
        return 0.0;
    }
    engagements as f64 / impressions as f64 * 100.0
}

/// Follows per 1,000 impressions, zero without impressions.
pub fn follow_conversion(follows: i64, impressions: i64) -> f64 {
    if impressions == 0 {
        return 0.0;
    }
    follows as f64 / impressions as f64 * 1000.0
}

/// Splits a date-sorted series into (previous, current) windows.
pub fn windows(records: &[PerformanceRecord]) -> (&[PerformanceRecord], &[PerformanceRecord]) {
    let current_start = records.len().saturating_sub(WINDOW_LEN);
    let previous_start = current_start.saturating_sub(WINDOW_LEN);
    (
        &records[previous_start..current_start],
        &records[current_start..],
    )
}

/// Computes the snapshot for a date-sorted series, `None` when it is empty.
pub fn compute_kpi(records: &[PerformanceRecord]) -> Option<KpiSnapshot> {
    if records.is_empty() {
        return None;
    }

    let (previous, current) = windows(records);
    let now = WindowTotals::from_records(current);
    let before = WindowTotals::from_records(previous);
    let has_baseline = before.impressions != 0;

    let delta = |now_value: f64, before_value: f64| {
        if has_baseline {
            now_value - before_value
        } else {
            0.0
        }
    };

    let impressions_change_pct = if has_baseline {
        now.impressions.saturating_sub(before.impressions) as f64 / before.impressions as f64 * 100.0
    } else {
        0.0
    };

    Some(KpiSnapshot {
        impressions_per_day: now.per_day(now.impressions),
        engagement_rate: now.engagement_rate(),
        follow_conversion: now.follow_conversion(),
        delta_impressions_per_day: delta(
            now.per_day(now.impressions),
            before.per_day(before.impressions),
        ),
        delta_engagement_rate: delta(now.engagement_rate(), before.engagement_rate()),
        delta_follow_conversion: delta(now.follow_conversion(), before.follow_conversion()),
        impressions_change_pct,
        posts_per_day: now.per_day(now.posts),
        follows_per_day: now.per_day(now.new_follows),
        net_follows_per_day: now.per_day(now.new_follows.saturating_sub(now.unfollows)),
        profile_visits_per_day: now.per_day(now.profile_visits),
        window_len: now.days,
        previous_window_len: before.days,
    })
}
