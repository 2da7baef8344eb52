//! Record normalizer: turns an analytics export into date-sorted daily records.

pub mod csv;
pub mod date;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub use csv::{parse_table, split_line, RawRecord};
pub use date::{format_export_date, parse_date};

pub const COL_DATE: &str = "Date";
pub const COL_IMPRESSIONS: &str = "Impressions";
pub const COL_ENGAGEMENTS: &str = "Engagements";
pub const COL_NEW_FOLLOWS: &str = "New follows";
pub const COL_UNFOLLOWS: &str = "Unfollows";
pub const COL_PROFILE_VISITS: &str = "Profile visits";
pub const COL_LIKES: &str = "Likes";
pub const COL_BOOKMARKS: &str = "Bookmarks";
pub const COL_REPLIES: &str = "Replies";
pub const COL_REPOSTS: &str = "Reposts";
pub const COL_POSTS: &str = "Create Post";

/// One calendar day of measured account activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceRecord {
    pub date: NaiveDate,
    pub impressions: i64,
    pub engagements: i64,
    pub new_follows: i64,
    pub unfollows: i64,
    pub profile_visits: i64,
    pub likes: i64,
    pub bookmarks: i64,
    pub replies: i64,
    pub reposts: i64,
    pub posts_published: i64,
}

impl PerformanceRecord {
    pub fn from_raw(row: &RawRecord) -> Option<Self> {
        let date = parse_date(row.get(COL_DATE)?)?;
        let count = |column: &str| row.get(column).map(|value| parse_count(value)).unwrap_or(0);

        Some(Self {
            date,
            impressions: count(COL_IMPRESSIONS),
            engagements: count(COL_ENGAGEMENTS),
            new_follows: count(COL_NEW_FOLLOWS),
            unfollows: count(COL_UNFOLLOWS),
            profile_visits: count(COL_PROFILE_VISITS),
            likes: count(COL_LIKES),
            bookmarks: count(COL_BOOKMARKS),
            replies: count(COL_REPLIES),
            reposts: count(COL_REPOSTS),
            posts_published: count(COL_POSTS),
        })
    }

    pub fn net_follows(&self) -> i64 {
        self.new_follows.saturating_sub(self.unfollows)
    }
}

/// Lenient counter parse: anything that is not a number counts as zero.
///
/// Thousands separators are dropped and fractional values truncate toward
/// zero. Negative values pass through unchanged.
pub fn parse_count(value: &str) -> i64 {
    let cleaned: String = value.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return 0;
    }
    if let Ok(parsed) = cleaned.parse::<i64>() {
        return parsed;
    }
    match cleaned.parse::<f64>() {
        Ok(parsed) if parsed.is_finite() => parsed.trunc() as i64,
        _ => 0,
    }
}

/// Types raw rows, dropping rows without a usable date, sorted by date.
///
/// The sort is stable so same-day rows keep their export order.
pub fn normalize(rows: &[RawRecord]) -> Vec<PerformanceRecord> {
    let mut records: Vec<PerformanceRecord> =
        rows.iter().filter_map(PerformanceRecord::from_raw).collect();
    let dropped = rows.len() - records.len();
    if dropped > 0 {
        tracing::debug!(dropped, "dropped rows with unparseable dates");
    }
    records.sort_by_key(|record| record.date);
    records
}

/// Parses and normalizes an export in one step.
pub fn normalize_text(text: &str) -> Vec<PerformanceRecord> {
    normalize(&parse_table(text))
}

/// A short sample export covering five days, newest first as exports are.
pub fn demo_rows() -> Vec<RawRecord> {
    let rows: [(&str, &str, &str, &str, &str); 5] = [
        ("Wed, Feb 11, 2026", "906", "14", "0", "0"),
        ("Tue, Feb 10, 2026", "891", "7", "0", "0"),
        ("Mon, Feb 9, 2026", "965", "37", "2", "1"),
        ("Sun, Feb 8, 2026", "1787", "51", "0", "2"),
        ("Sat, Feb 7, 2026", "2450", "32", "0", "1"),
    ];

    rows.iter()
        .map(|(date, impressions, engagements, follows, unfollows)| {
            [
                (COL_DATE, *date),
                (COL_IMPRESSIONS, *impressions),
                (COL_ENGAGEMENTS, *engagements),
                (COL_NEW_FOLLOWS, *follows),
                (COL_UNFOLLOWS, *unfollows),
            ]
            .into_iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
        })
        .collect()
}
