//! Plain-data dashboard state handed in by the caller, and the pure report
//! computed from it. Persisting the state is the caller's job.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::checklist::{ChecklistProgress, ChecklistState};
use crate::config::AppConfig;
use crate::diagnostics::{DiagnosticEngine, DiagnosticFacts, DiagnosticReport};
use crate::error::LogRejected;
use crate::goal::{project_goal, GoalInput, GoalProjection};
use crate::ingest::{normalize, parse_table, PerformanceRecord, RawRecord};
use crate::kpi::{compute_kpi, KpiSnapshot};
use crate::prompt::{build_prompt, GenerationMode, PromptContext, PromptPayload};
use crate::review::{best_category, Dimension, Metric, PostLog, PostLogEntry, ReviewInsights};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardState {
    /// Rows of the last accepted analytics import, as parsed.
    pub analytics_raw: Vec<RawRecord>,
    pub checklist: ChecklistState,
    pub objective: String,
    pub voice_rules: String,
    pub intel_notes: String,
    pub post_logs: PostLog,
}

/// Records and snapshot derived from one import.
#[derive(Debug, Clone, Default)]
pub struct Analysis {
    pub records: Vec<PerformanceRecord>,
    pub kpi: Option<KpiSnapshot>,
}

impl Analysis {
    pub fn from_rows(rows: &[RawRecord]) -> Self {
        let records = normalize(rows);
        let kpi = compute_kpi(&records);
        Self { records, kpi }
    }

    pub fn has_data(&self) -> bool {
        !self.records.is_empty()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub record_count: usize,
    pub kpi: Option<KpiSnapshot>,
    pub diagnostics: DiagnosticReport,
    pub checklist: ChecklistProgress,
    pub review: ReviewInsights,
    pub logged_posts: usize,
}

impl DashboardState {
    pub fn analysis(&self) -> Analysis {
        Analysis::from_rows(&self.analytics_raw)
    }

    /// Replaces the stored import when the export yields usable records.
    /// An export with no usable rows leaves the state untouched.
    pub fn import_csv(&mut self, text: &str) -> Option<Analysis> {
        self.import_rows(parse_table(text))
    }

    pub fn import_rows(&mut self, rows: Vec<RawRecord>) -> Option<Analysis> {
        let analysis = Analysis::from_rows(&rows);
        if !analysis.has_data() {
            tracing::info!(rows = rows.len(), "import produced no usable records");
            return None;
        }
        tracing::info!(
            rows = rows.len(),
            records = analysis.records.len(),
            "replaced analytics import"
        );
        self.analytics_raw = rows;
        Some(analysis)
    }

    pub fn add_post_log(&mut self, entry: PostLogEntry) -> Result<(), LogRejected> {
        self.post_logs.add(entry)
    }

    pub fn facts(&self) -> DiagnosticFacts<'_> {
        DiagnosticFacts {
            objective: &self.objective,
            logged_posts: self.post_logs.len(),
            checklist: self.checklist.clone(),
        }
    }

    pub fn report(&self, engine: &DiagnosticEngine) -> DashboardReport {
        let analysis = self.analysis();
        let facts = self.facts();
        DashboardReport {
            record_count: analysis.records.len(),
            diagnostics: engine.report(analysis.kpi.as_ref(), &facts),
            kpi: analysis.kpi,
            checklist: self.checklist.progress(),
            review: ReviewInsights::from_entries(self.post_logs.entries()),
            logged_posts: self.post_logs.len(),
        }
    }

    pub fn goal(&self, input: &GoalInput, config: &AppConfig) -> GoalProjection {
        project_goal(input, self.analysis().kpi.as_ref(), &config.goal)
    }

    /// Goal projection from configured defaults.
    pub fn default_goal(&self, config: &AppConfig, today: NaiveDate) -> GoalProjection {
        let input = GoalInput {
            current_followers: config.goal.current_followers,
            target_followers: config.goal.target_followers,
            target_date: config.goal.target_date,
            today,
        };
        self.goal(&input, config)
    }

    pub fn prompt(
        &self,
        mode: GenerationMode,
        draft: &str,
        signal: &str,
        config: &AppConfig,
    ) -> PromptPayload {
        let winning = best_category(
            self.post_logs.entries(),
            Dimension::Format,
            Metric::FollowConversion,
        );
        let context = PromptContext {
            handle: &config.account.handle,
            objective: &self.objective,
            voice_rules: &self.voice_rules,
            winning_format: winning.as_ref().map(|best| best.key.as_str()),
            intel_notes: &self.intel_notes,
            draft,
            signal,
        };
        build_prompt(mode, &context, &config.account.model)
    }
}
