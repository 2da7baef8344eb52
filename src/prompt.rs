//! Request payloads for the external text-generation service. Nothing here
//! performs network I/O; callers send the payload themselves.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationMode {
    Improve,
    Ideas,
    Replies,
}

impl FromStr for GenerationMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "improve" => Ok(GenerationMode::Improve),
            "ideas" => Ok(GenerationMode::Ideas),
            "replies" => Ok(GenerationMode::Replies),
            _ => Err(format!("invalid mode: {}", value)),
        }
    }
}

impl GenerationMode {
    fn instruction(self) -> &'static str {
        match self {
            GenerationMode::Improve => {
                "Improve this draft for clarity, authority, and follow conversion. Return final draft only."
            }
            GenerationMode::Ideas => {
                "Generate 10 high-quality post ideas. For each: hook, signal, implication, close."
            }
            GenerationMode::Replies => {
                "Generate 10 strategic replies to frontier AI/energy posts. Each must add insight, not praise."
            }
        }
    }
}

/// Operator state the prompt is built from. Blank fields are rendered as
/// `none` (or `unknown` for the winning format).
#[derive(Debug, Clone, Default)]
pub struct PromptContext<'a> {
    pub handle: &'a str,
    pub objective: &'a str,
    pub voice_rules: &'a str,
    pub winning_format: Option<&'a str>,
    pub intel_notes: &'a str,
    pub draft: &'a str,
    pub signal: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptPayload {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

impl PromptPayload {
    pub fn system(&self) -> Option<&str> {
        self.message("system")
    }

    pub fn user(&self) -> Option<&str> {
        self.message("user")
    }

    fn message(&self, role: &str) -> Option<&str> {
        self.messages
            .iter()
            .find(|message| message.role == role)
            .map(|message| message.content.as_str())
    }
}

pub fn build_prompt(mode: GenerationMode, context: &PromptContext<'_>, model: &str) -> PromptPayload {
    PromptPayload {
        model: model.to_string(),
        messages: vec![
            ChatMessage {
                role: "system".to_string(),
                content: system_prompt(mode, context),
            },
            ChatMessage {
                role: "user".to_string(),
                content: user_prompt(mode, context),
            },
        ],
    }
}

fn system_prompt(mode: GenerationMode, context: &PromptContext<'_>) -> String {
    let handle = context.handle.trim().trim_start_matches('@');
    [
        format!("You are a social media strategist for @{}.", handle),
        "Primary goal: create high-quality content that increases follower growth and authority."
            .to_string(),
        format!("Shift objective: {}", or_default(context.objective, "none")),
        format!("Voice rules: {}", context.voice_rules.trim()),
        format!(
            "Winning format so far: {}",
            or_default(context.winning_format.unwrap_or_default(), "unknown")
        ),
        format!("Intel notes: {}", or_default(context.intel_notes, "none")),
        mode.instruction().to_string(),
    ]
    .join("\n\n")
}

fn user_prompt(mode: GenerationMode, context: &PromptContext<'_>) -> String {
    match mode {
        GenerationMode::Improve => or_default(context.draft, "No draft provided.").to_string(),
        GenerationMode::Ideas | GenerationMode::Replies => {
            or_default(context.signal, "Use current context.").to_string()
        }
    }
}

fn or_default<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback
    } else {
        trimmed
    }
}
