use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

const DEFAULT_HOOK: &str =
    "The acceleration window is open, but most people still miss the implication.";
const DEFAULT_CLOSE: &str = "If this resonates, follow for daily frontier signal synthesis.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookStyle {
    Thesis,
    Contrarian,
    Prediction,
    Question,
}

impl FromStr for HookStyle {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "thesis" => Ok(HookStyle::Thesis),
            "contrarian" => Ok(HookStyle::Contrarian),
            "prediction" => Ok(HookStyle::Prediction),
            "question" => Ok(HookStyle::Question),
            _ => Err(format!("invalid hook style: {}", value)),
        }
    }
}

impl HookStyle {
    pub fn bank(self) -> &'static [&'static str] {
        match self {
            HookStyle::Thesis => &[
                "Abundance is no longer a fantasy. It is a sequence of solved bottlenecks.",
                "The Kardashev trajectory is now an execution problem, not a theory problem.",
                "The biggest shift is not better models. It is better civilization design.",
            ],
            HookStyle::Contrarian => &[
                "Most people optimize for virality. We should optimize for civilization progress.",
                "Cheap intelligence does not remove ambition. It multiplies it.",
                "The new moat is not code. It is taste, speed, and coherent vision.",
            ],
            HookStyle::Prediction => &[
                "In 24 months, agent-native workflows will be default for high performers.",
                "By 2030, acceleration mindset will separate winners from spectators.",
                "Soon, bottleneck removal will matter more than content production itself.",
            ],
            HookStyle::Question => &[
                "What bottleneck would you remove first to accelerate abundance?",
                "If intelligence gets cheap, what becomes the new luxury?",
                "Which institution is least prepared for the next 5 years?",
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostObjective {
    Follow,
    Authority,
    Discussion,
    None,
}

impl FromStr for PostObjective {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "follow" => Ok(PostObjective::Follow),
            "authority" => Ok(PostObjective::Authority),
            "discussion" => Ok(PostObjective::Discussion),
            "none" | "" => Ok(PostObjective::None),
            _ => Err(format!("invalid post objective: {}", value)),
        }
    }
}

impl PostObjective {
    pub fn suffix(self) -> &'static str {
        match self {
            PostObjective::Follow => " Follow for high-signal Type 2 future intelligence.",
            PostObjective::Authority => " Here is the practical implication.",
            PostObjective::Discussion => " What do you think changes first?",
            PostObjective::None => "",
        }
    }
}

/// Picks a hook from the style's bank and appends the objective suffix.
pub fn generate_hook<R: Rng + ?Sized>(style: HookStyle, objective: PostObjective, rng: &mut R) -> String {
    let base = style.bank().choose(rng).copied().unwrap_or(DEFAULT_HOOK);
    format!("{}{}", base, objective.suffix())
}

/// Inputs for the flagship draft template; blank parts get placeholders.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DraftParts {
    pub hook: String,
    pub source_handle: Option<String>,
    pub signal: String,
    pub insight: String,
    pub close: String,
}

pub fn build_draft(parts: &DraftParts) -> String {
    let hook = non_blank(&parts.hook).unwrap_or(DEFAULT_HOOK);
    let close = non_blank(&parts.close).unwrap_or(DEFAULT_CLOSE);

    let source = match parts.source_handle.as_deref().and_then(non_blank) {
        Some(handle) => format!("Source context: @{}", handle.trim_start_matches('@')),
        None => "Source context: [optional account/event]".to_string(),
    };
    let signal = match non_blank(&parts.signal) {
        Some(signal) => format!("Signal: {}", signal),
        None => "Signal: [insert concrete event, quote, or data point]".to_string(),
    };
    let implication = match non_blank(&parts.insight) {
        Some(insight) => format!("Implication: {}", insight),
        None => "Implication: [what this changes in practical terms]".to_string(),
    };

    [
        hook.to_string(),
        String::new(),
        source,
        signal,
        implication,
        String::new(),
        close.to_string(),
    ]
    .join("\n")
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}
