use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::review::log::PostLogEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Format,
    Pillar,
    Source,
}

impl Dimension {
    /// The entry's category for this dimension; blank values have none.
    pub fn key<'a>(self, entry: &'a PostLogEntry) -> Option<&'a str> {
        let value = match self {
            Dimension::Format => entry.format.as_str(),
            Dimension::Pillar => entry.pillar.as_str(),
            Dimension::Source => entry.source_handle.as_deref()?,
        };
        let value = value.trim();
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    EngagementRate,
    FollowConversion,
}

impl Metric {
    pub fn of(self, entry: &PostLogEntry) -> f64 {
        match self {
            Metric::EngagementRate => entry.engagement_rate(),
            Metric::FollowConversion => entry.follow_conversion(),
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Metric::EngagementRate => "%",
            Metric::FollowConversion => " f/1k",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryMean {
    pub key: String,
    pub mean: f64,
    pub entries: usize,
}

/// Mean of `metric` per category, highest first. Ties keep first-seen order.
pub fn category_means(entries: &[PostLogEntry], dimension: Dimension, metric: Metric) -> Vec<CategoryMean> {
    let mut groups: Vec<(String, Vec<f64>)> = Vec::new();

    for entry in entries {
        let Some(key) = dimension.key(entry) else {
            continue;
        };
        let value = metric.of(entry);
        match groups.iter_mut().find(|(existing, _)| existing == key) {
            Some((_, values)) => values.push(value),
            None => groups.push((key.to_string(), vec![value])),
        }
    }

    let mut means: Vec<CategoryMean> = groups
        .into_iter()
        .map(|(key, values)| CategoryMean {
            mean: values.iter().sum::<f64>() / values.len() as f64,
            entries: values.len(),
            key,
        })
        .collect();

    means.sort_by(|a, b| b.mean.partial_cmp(&a.mean).unwrap_or(Ordering::Equal));
    means
}

pub fn best_category(entries: &[PostLogEntry], dimension: Dimension, metric: Metric) -> Option<CategoryMean> {
    category_means(entries, dimension, metric).into_iter().next()
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewInsights {
    pub best_format: Option<CategoryMean>,
    pub best_pillar: Option<CategoryMean>,
    pub best_source: Option<CategoryMean>,
}

impl ReviewInsights {
    pub fn from_entries(entries: &[PostLogEntry]) -> Self {
        Self {
            best_format: best_category(entries, Dimension::Format, Metric::FollowConversion),
            best_pillar: best_category(entries, Dimension::Pillar, Metric::EngagementRate),
            best_source: best_category(entries, Dimension::Source, Metric::FollowConversion),
        }
    }

    pub fn lines(&self) -> Vec<String> {
        vec![
            format!(
                "Best format by follow conversion: {}",
                describe(self.best_format.as_ref(), "", Metric::FollowConversion)
            ),
            format!(
                "Best pillar by engagement rate: {}",
                describe(self.best_pillar.as_ref(), "", Metric::EngagementRate)
            ),
            format!(
                "Best source-account lift: {}",
                describe(self.best_source.as_ref(), "@", Metric::FollowConversion)
            ),
            "Action: next 3 posts should copy the winning format + pillar pattern.".to_string(),
        ]
    }
}

fn describe(best: Option<&CategoryMean>, prefix: &str, metric: Metric) -> String {
    match best {
        Some(best) => format!("{}{} ({:.2}{})", prefix, best.key, best.mean, metric.unit()),
        None => "- (-)".to_string(),
    }
}
