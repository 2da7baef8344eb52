use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::kpi::KpiSnapshot;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GoalConfig {
    pub current_followers: i64,
    pub target_followers: i64,
    pub target_date: Option<NaiveDate>,
    /// Daily pace assumed when there is no analytics data.
    pub fallback_pace: f64,
    /// Lower bound on a measured pace so the horizon stays finite.
    pub min_pace: f64,
}

impl Default for GoalConfig {
    fn default() -> Self {
        Self {
            current_followers: 0,
            target_followers: 1_000,
            target_date: None,
            fallback_pace: 0.8,
            min_pace: 0.1,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GoalInput {
    pub current_followers: i64,
    pub target_followers: i64,
    pub target_date: Option<NaiveDate>,
    pub today: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalProjection {
    pub remaining: i64,
    pub pace_per_day: f64,
    pub days_to_target: i64,
    pub projected_date: Option<NaiveDate>,
    pub required_pace: Option<f64>,
    pub days_until_target_date: Option<i64>,
}

/// Follows per day the projection assumes.
///
/// Net follows are used; a missing unfollow column reads as zero, so the
/// net figure equals plain new follows in that case.
pub fn current_pace(kpi: Option<&KpiSnapshot>, config: &GoalConfig) -> f64 {
    match kpi {
        Some(kpi) => {
            let pace = if kpi.net_follows_per_day.is_finite() {
                kpi.net_follows_per_day
            } else {
                kpi.follows_per_day
            };
            pace.max(config.min_pace)
        }
        None => config.fallback_pace,
    }
}

pub fn project_goal(input: &GoalInput, kpi: Option<&KpiSnapshot>, config: &GoalConfig) -> GoalProjection {
    let remaining = input.target_followers.saturating_sub(input.current_followers).max(0);
    let pace = current_pace(kpi, config);

    let days_to_target = if remaining == 0 {
        0
    } else {
        (remaining as f64 / pace).ceil() as i64
    };
    let projected_date = u64::try_from(days_to_target)
        .ok()
        .and_then(|days| input.today.checked_add_days(Days::new(days)));

    let days_until_target_date = input
        .target_date
        .map(|date| (date - input.today).num_days());
    let required_pace = days_until_target_date.map(|days| remaining as f64 / days.max(1) as f64);

    GoalProjection {
        remaining,
        pace_per_day: pace,
        days_to_target,
        projected_date,
        required_pace,
        days_until_target_date,
    }
}
