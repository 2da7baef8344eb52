use serde::{Deserialize, Serialize};

use crate::error::LogRejected;
use crate::kpi::{engagement_rate, follow_conversion};

/// One manually logged, already published post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostLogEntry {
    pub date: String,
    pub format: String,
    pub pillar: String,
    #[serde(default)]
    pub source_handle: Option<String>,
    pub impressions: i64,
    pub engagements: i64,
    #[serde(default)]
    pub follows: i64,
    #[serde(default)]
    pub profile_visits: i64,
    #[serde(default)]
    pub note: String,
    /// Milliseconds since the epoch; only used to order entries by recency.
    pub created_at: i64,
}

impl PostLogEntry {
    pub fn engagement_rate(&self) -> f64 {
        engagement_rate(self.engagements, self.impressions)
    }

    pub fn follow_conversion(&self) -> f64 {
        follow_conversion(self.follows, self.impressions)
    }

    pub fn validate(&self) -> Result<(), LogRejected> {
        if self.impressions == 0 {
            return Err(LogRejected::NoImpressions);
        }
        if self.engagements == 0 {
            return Err(LogRejected::NoEngagements);
        }
        Ok(())
    }
}

/// Append-only history of logged posts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostLog {
    entries: Vec<PostLogEntry>,
}

impl PostLog {
    pub fn new(entries: Vec<PostLogEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[PostLogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends the entry, or leaves the log untouched when it has no reach.
    pub fn add(&mut self, entry: PostLogEntry) -> Result<(), LogRejected> {
        if let Err(reason) = entry.validate() {
            tracing::warn!(%reason, format = %entry.format, "rejected post log entry");
            return Err(reason);
        }
        self.entries.push(entry);
        Ok(())
    }

    /// Newest entries first, by creation time.
    pub fn recent(&self, limit: usize) -> Vec<&PostLogEntry> {
        let mut sorted: Vec<&PostLogEntry> = self.entries.iter().collect();
        sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        sorted.truncate(limit);
        sorted
    }
}
