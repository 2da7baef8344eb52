//! Post-log review: the append-only log, pattern mining over it, and
//! benchmark study selection.

pub mod benchmarks;
pub mod log;
pub mod patterns;

pub use benchmarks::{
    assign_study, candidate_benchmarks, find_benchmark, focus_tags, BenchmarkProfile, StudyAssignment,
    StudyConfig, BENCHMARKS,
};
pub use log::{PostLog, PostLogEntry};
pub use patterns::{best_category, category_means, CategoryMean, Dimension, Metric, ReviewInsights};

pub const RECENT_LOG_LIMIT: usize = 25;
