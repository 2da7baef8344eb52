use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use growth_desk::diagnostics::DiagnosticReport;
use growth_desk::draft::{DraftScore, HookStyle, PostObjective};
use growth_desk::ingest::parse_date;
use growth_desk::prompt::GenerationMode;
use growth_desk::review::{PostLogEntry, ReviewInsights, StudyAssignment};
use growth_desk::{GoalInput, KpiSnapshot};

#[derive(Debug, Deserialize)]
pub struct AnalyticsRequest {
    pub csv: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyticsResponse {
    pub records: usize,
    pub kpi: Option<KpiSnapshot>,
    pub diagnostics: DiagnosticReport,
}

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub text: Option<String>,
    pub pillars: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct HookRequest {
    pub style: Option<String>,
    pub objective: Option<String>,
}

impl HookRequest {
    pub fn parse(&self) -> Result<(HookStyle, PostObjective), String> {
        let style = match self.style.as_deref() {
            Some(value) => value.parse::<HookStyle>()?,
            None => HookStyle::Thesis,
        };
        let objective = match self.objective.as_deref() {
            Some(value) => value.parse::<PostObjective>()?,
            None => PostObjective::None,
        };
        Ok((style, objective))
    }
}

#[derive(Debug, Serialize)]
pub struct HookResponse {
    pub hook: String,
}

#[derive(Debug, Serialize)]
pub struct DraftBuildResponse {
    pub draft: String,
    pub score: DraftScore,
}

#[derive(Debug, Deserialize)]
pub struct PostLogRequest {
    pub date: Option<String>,
    pub format: Option<String>,
    pub pillar: Option<String>,
    pub source_handle: Option<String>,
    pub impressions: Option<i64>,
    pub engagements: Option<i64>,
    pub follows: Option<i64>,
    pub profile_visits: Option<i64>,
    pub note: Option<String>,
}

impl PostLogRequest {
    pub fn into_entry(self, today: NaiveDate, created_at: i64) -> Result<PostLogEntry, String> {
        let format = required(self.format, "format")?;
        let pillar = required(self.pillar, "pillar")?;
        let source_handle = self
            .source_handle
            .map(|handle| handle.trim().trim_start_matches('@').to_string())
            .filter(|handle| !handle.is_empty());

        Ok(PostLogEntry {
            date: self
                .date
                .filter(|date| !date.trim().is_empty())
                .unwrap_or_else(|| today.format("%Y-%m-%d").to_string()),
            format,
            pillar,
            source_handle,
            impressions: self.impressions.unwrap_or(0),
            engagements: self.engagements.unwrap_or(0),
            follows: self.follows.unwrap_or(0),
            profile_visits: self.profile_visits.unwrap_or(0),
            note: self.note.unwrap_or_default().trim().to_string(),
            created_at,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ReviewResponse {
    pub insights: ReviewInsights,
    pub lines: Vec<String>,
    pub recent: Vec<PostLogEntry>,
}

#[derive(Debug, Serialize)]
pub struct StudyResponse {
    pub focus_tags: Option<Vec<String>>,
    pub assignments: Vec<StudyAssignment>,
}

#[derive(Debug, Deserialize)]
pub struct GoalRequest {
    pub current_followers: Option<i64>,
    pub target_followers: Option<i64>,
    pub target_date: Option<String>,
}

impl GoalRequest {
    /// Missing fields fall back to the configured goal.
    pub fn into_input(
        self,
        defaults: &growth_desk::goal::GoalConfig,
        today: NaiveDate,
    ) -> Result<GoalInput, String> {
        let target_date = match self.target_date.as_deref() {
            Some(value) if !value.trim().is_empty() => Some(parse_target_date(value)?),
            _ => defaults.target_date,
        };
        Ok(GoalInput {
            current_followers: self.current_followers.unwrap_or(defaults.current_followers),
            target_followers: self.target_followers.unwrap_or(defaults.target_followers),
            target_date,
            today,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ChecklistRequest {
    pub checked: bool,
}

#[derive(Debug, Deserialize)]
pub struct SettingsRequest {
    pub objective: Option<String>,
    pub voice_rules: Option<String>,
    pub intel_notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PromptRequest {
    pub mode: Option<String>,
    pub draft: Option<String>,
    pub signal: Option<String>,
}

impl PromptRequest {
    pub fn mode(&self) -> Result<GenerationMode, String> {
        match self.mode.as_deref() {
            Some(value) => value.parse(),
            None => Ok(GenerationMode::Improve),
        }
    }
}

pub fn parse_target_date(value: &str) -> Result<NaiveDate, String> {
    parse_date(value).ok_or_else(|| format!("invalid date: {}", value))
}

fn required(value: Option<String>, field: &str) -> Result<String, String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| format!("{} is required", field))
}
