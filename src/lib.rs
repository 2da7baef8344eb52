pub mod checklist;
pub mod config;
pub mod diagnostics;
pub mod draft;
pub mod error;
pub mod goal;
pub mod ingest;
pub mod kpi;
pub mod prompt;
pub mod review;
pub mod state;

pub use checklist::{ChecklistProgress, ChecklistState, DAILY_TASKS};
pub use config::AppConfig;
pub use diagnostics::{
    DiagnosticEngine, DiagnosticFacts, DiagnosticReport, DiagnosticThresholds, MissingInput, Readiness,
    ReadinessTier,
};
pub use draft::{DraftScore, DraftScorer, Grade};
pub use error::{ConfigError, LogRejected};
pub use goal::{project_goal, GoalInput, GoalProjection};
pub use ingest::{normalize, normalize_text, parse_table, PerformanceRecord, RawRecord};
pub use kpi::{compute_kpi, KpiSnapshot};
pub use review::{PostLog, PostLogEntry, ReviewInsights};
pub use state::{Analysis, DashboardReport, DashboardState};

pub fn format_number(value: f64) -> String {
    let rounded = value.round().max(0.0) as i64;
    let mut chars: Vec<char> = rounded.to_string().chars().collect();
    let mut result = String::new();
    let mut count = 0usize;

    while let Some(ch) = chars.pop() {
        if count == 3 {
            result.push(',');
            count = 0;
        }
        result.push(ch);
        count += 1;
    }

    result.chars().rev().collect()
}

pub fn format_float(value: f64, digits: usize) -> String {
    format!("{:.1$}", value, digits)
}

/// Two decimals with an explicit `+` on non-negative values.
pub fn format_signed(value: f64) -> String {
    // folds -0.0 into +0.00
    let value = if value == 0.0 { 0.0 } else { value };
    if value >= 0.0 {
        format!("+{:.2}", value)
    } else {
        format!("{:.2}", value)
    }
}
