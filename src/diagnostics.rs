//! Rule engine turning KPI health and operator state into diagnostics,
//! next actions and a readiness score.

use serde::{Deserialize, Serialize};

use crate::checklist::ChecklistState;
use crate::kpi::{KpiSnapshot, WINDOW_LEN};
use crate::format_signed;

pub const UPLOAD_FIRST: &str = "Upload analytics CSV to unlock smart diagnostics.";
pub const ALL_CLEAR: &str = "All critical actions complete. Execute and review results.";

const WEAK_CONVERSION: &str = "Priority: conversion is weak. Use clearer value proposition and direct follow close in every flagship post.";
const SOFT_ENGAGEMENT: &str =
    "Priority: engagement is soft. Add stronger claim + concrete signal + explicit implication.";

const ACTION_UPLOAD: &str = "Upload analytics in Today section first.";
const ACTION_CONVERSION: &str = "In today's flagship post, add explicit reason to follow this account.";
const ACTION_ENGAGEMENT: &str = "Use one concrete source signal and one sharp implication.";
const ACTION_LOG_POSTS: &str = "Log at least 5 published posts in Review to identify winning patterns.";
const ACTION_OBJECTIVE: &str = "Set a clear shift objective in Create section.";

const PENDING_TASKS_SHOWN: usize = 2;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticThresholds {
    /// Follows per 1k impressions below which conversion is weak.
    pub conversion_floor: f64,
    /// Engagement rate percentage below which engagement is soft.
    pub engagement_floor: f64,
    pub min_logged_posts: usize,
    pub max_actions: usize,
    pub max_brief_actions: usize,
}

impl Default for DiagnosticThresholds {
    fn default() -> Self {
        Self {
            conversion_floor: 1.0,
            engagement_floor: 2.2,
            min_logged_posts: 5,
            max_actions: 6,
            max_brief_actions: 4,
        }
    }
}

impl DiagnosticThresholds {
    pub fn conversion_weak(&self, kpi: &KpiSnapshot) -> bool {
        kpi.follow_conversion < self.conversion_floor
    }

    pub fn engagement_soft(&self, kpi: &KpiSnapshot) -> bool {
        kpi.engagement_rate < self.engagement_floor
    }
}

/// Operator state the rules read besides the KPI snapshot.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticFacts<'a> {
    pub objective: &'a str,
    pub logged_posts: usize,
    pub checklist: ChecklistState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingInput {
    Analytics,
    Objective,
    PostLogs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReadinessTier {
    NotReady,
    Building,
    OnTrack,
    Ready,
}

impl ReadinessTier {
    pub fn label(self) -> &'static str {
        match self {
            ReadinessTier::NotReady => "Not ready",
            ReadinessTier::Building => "Building momentum",
            ReadinessTier::OnTrack => "On track",
            ReadinessTier::Ready => "Ready to execute",
        }
    }

    pub fn from_score(score: u8) -> Self {
        if score >= 80 {
            ReadinessTier::Ready
        } else if score >= 60 {
            ReadinessTier::OnTrack
        } else if score >= 40 {
            ReadinessTier::Building
        } else {
            ReadinessTier::NotReady
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Readiness {
    pub score: u8,
    pub tier: ReadinessTier,
}

#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticReport {
    pub statements: Vec<String>,
    pub actions: Vec<String>,
    pub missing: Vec<MissingInput>,
    pub readiness: Readiness,
}

#[derive(Debug, Clone)]
pub struct DiagnosticEngine {
    thresholds: DiagnosticThresholds,
}

impl DiagnosticEngine {
    pub fn new(thresholds: DiagnosticThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &DiagnosticThresholds {
        &self.thresholds
    }

    pub fn report(&self, kpi: Option<&KpiSnapshot>, facts: &DiagnosticFacts<'_>) -> DiagnosticReport {
        DiagnosticReport {
            statements: self.statements(kpi),
            actions: self.next_actions(kpi, facts, false),
            missing: self.missing(kpi, facts),
            readiness: self.readiness(kpi, facts),
        }
    }

    pub fn statements(&self, kpi: Option<&KpiSnapshot>) -> Vec<String> {
        let Some(kpi) = kpi else {
            return vec![UPLOAD_FIRST.to_string()];
        };

        let mut lines = vec![
            format!(
                "Impressions trend: {}% vs previous {} days.",
                format_signed(kpi.impressions_change_pct),
                WINDOW_LEN
            ),
            format!(
                "Engagement rate trend: {}pp.",
                format_signed(kpi.delta_engagement_rate)
            ),
            format!(
                "Follow conversion trend: {} follows per 1k impressions.",
                format_signed(kpi.delta_follow_conversion)
            ),
        ];

        if self.thresholds.conversion_weak(kpi) {
            lines.push(WEAK_CONVERSION.to_string());
        }
        if self.thresholds.engagement_soft(kpi) {
            lines.push(SOFT_ENGAGEMENT.to_string());
        }
        lines
    }

    /// Ordered, capped action list. `brief` uses the shorter cap.
    pub fn next_actions(
        &self,
        kpi: Option<&KpiSnapshot>,
        facts: &DiagnosticFacts<'_>,
        brief: bool,
    ) -> Vec<String> {
        let mut items: Vec<String> = Vec::new();

        match kpi {
            None => items.push(ACTION_UPLOAD.to_string()),
            Some(kpi) => {
                if self.thresholds.conversion_weak(kpi) {
                    items.push(ACTION_CONVERSION.to_string());
                }
                if self.thresholds.engagement_soft(kpi) {
                    items.push(ACTION_ENGAGEMENT.to_string());
                }
            }
        }

        if facts.logged_posts < self.thresholds.min_logged_posts {
            items.push(ACTION_LOG_POSTS.to_string());
        }
        if facts.objective.trim().is_empty() {
            items.push(ACTION_OBJECTIVE.to_string());
        }
        items.extend(
            facts
                .checklist
                .pending()
                .into_iter()
                .take(PENDING_TASKS_SHOWN)
                .map(str::to_string),
        );

        if items.is_empty() {
            return vec![ALL_CLEAR.to_string()];
        }

        let cap = if brief {
            self.thresholds.max_brief_actions
        } else {
            self.thresholds.max_actions
        };
        items.truncate(cap);
        items
    }

    pub fn missing(&self, kpi: Option<&KpiSnapshot>, facts: &DiagnosticFacts<'_>) -> Vec<MissingInput> {
        let mut missing = Vec::new();
        if kpi.is_none() {
            missing.push(MissingInput::Analytics);
        }
        if facts.objective.trim().is_empty() {
            missing.push(MissingInput::Objective);
        }
        if facts.logged_posts == 0 {
            missing.push(MissingInput::PostLogs);
        }
        missing
    }

    pub fn readiness(&self, kpi: Option<&KpiSnapshot>, facts: &DiagnosticFacts<'_>) -> Readiness {
        let mut score = 0.0;

        if let Some(kpi) = kpi {
            score += 20.0;
            if !self.thresholds.conversion_weak(kpi) {
                score += 15.0;
            }
            if !self.thresholds.engagement_soft(kpi) {
                score += 15.0;
            }
        }
        if !facts.objective.trim().is_empty() {
            score += 10.0;
        }

        score += (facts.logged_posts as f64 * 4.0).min(20.0);
        score += (facts.checklist.progress().percent * 0.2).min(20.0);

        let score = score.round().clamp(0.0, 100.0) as u8;
        Readiness {
            score,
            tier: ReadinessTier::from_score(score),
        }
    }
}

impl Default for DiagnosticEngine {
    fn default() -> Self {
        Self::new(DiagnosticThresholds::default())
    }
}
