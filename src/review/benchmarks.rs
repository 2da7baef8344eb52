use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::diagnostics::DiagnosticThresholds;
use crate::kpi::KpiSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BenchmarkProfile {
    pub handle: &'static str,
    pub name: &'static str,
    pub why: &'static str,
    pub learn: &'static str,
    pub tags: &'static [&'static str],
}

impl BenchmarkProfile {
    pub fn has_any_tag(&self, tags: &[&str]) -> bool {
        self.tags.iter().any(|tag| tags.contains(tag))
    }
}

pub const BENCHMARKS: [BenchmarkProfile; 10] = [
    BenchmarkProfile {
        handle: "lexfridman",
        name: "Lex Fridman",
        why: "Strong high-trust frontier signal framing, similar to your best-performing pattern.",
        learn: "Use source + implication structure with clean narrative arc.",
        tags: &["signal", "authority"],
    },
    BenchmarkProfile {
        handle: "demishassabis",
        name: "Demis Hassabis",
        why: "Science-backed frontier updates that convert trust into attention.",
        learn: "Anchor claims in concrete progress and measurable outcomes.",
        tags: &["signal", "technical"],
    },
    BenchmarkProfile {
        handle: "sama",
        name: "Sam Altman",
        why: "Concise momentum posts with strategic implications.",
        learn: "Short format can still carry authority if implication is clear.",
        tags: &["conversion", "brevity"],
    },
    BenchmarkProfile {
        handle: "EMostaque",
        name: "Emad",
        why: "Operator-style future narrative with high builder energy.",
        learn: "Blend ecosystem insight with directional thesis.",
        tags: &["ecosystem", "momentum"],
    },
    BenchmarkProfile {
        handle: "garrytan",
        name: "Garry Tan",
        why: "Practical techno-optimism for founders and builders.",
        learn: "Translate macro optimism into concrete operator action.",
        tags: &["founders", "conversion"],
    },
    BenchmarkProfile {
        handle: "nateliason",
        name: "Nat Eliason",
        why: "High shipping cadence and proof-of-work content.",
        learn: "Show receipts and practical outputs, not only opinions.",
        tags: &["builder", "proof"],
    },
    BenchmarkProfile {
        handle: "beffjezos",
        name: "Beff (e/acc)",
        why: "Closest narrative overlap with acceleration and Kardashev framing.",
        learn: "Use punchy hooks, then add your own clarity layer.",
        tags: &["kardashev", "hooks", "reach"],
    },
    BenchmarkProfile {
        handle: "_sholtodouglas",
        name: "Sholto Douglas",
        why: "Technical future framing with strong timeline signals.",
        learn: "Combine technical depth with broader implication.",
        tags: &["technical", "signal"],
    },
    BenchmarkProfile {
        handle: "tszzl",
        name: "roon",
        why: "Strong memetic hooks and attention capture.",
        learn: "Write better opening lines, then keep your clarity and substance.",
        tags: &["hooks", "reach"],
    },
    BenchmarkProfile {
        handle: "elonmusk",
        name: "Elon Musk",
        why: "Core upstream narrative source for energy, space, and scale.",
        learn: "Lead with first-principles framing and consequence.",
        tags: &["vision", "first-principles"],
    },
];

pub fn find_benchmark(handle: &str) -> Option<&'static BenchmarkProfile> {
    let handle = handle.trim().trim_start_matches('@');
    BENCHMARKS
        .iter()
        .find(|profile| profile.handle.eq_ignore_ascii_case(handle))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StudyConfig {
    pub sample_size: usize,
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self { sample_size: 3 }
    }
}

/// Tags to study for the most acute KPI weakness. `None` means no filter.
pub fn focus_tags(kpi: Option<&KpiSnapshot>, thresholds: &DiagnosticThresholds) -> Option<&'static [&'static str]> {
    let kpi = kpi?;
    let tags: &'static [&'static str] = if thresholds.conversion_weak(kpi) {
        &["conversion", "hooks"]
    } else if thresholds.engagement_soft(kpi) {
        &["signal", "authority"]
    } else {
        &["technical", "vision", "proof"]
    };
    Some(tags)
}

pub fn candidate_benchmarks(
    kpi: Option<&KpiSnapshot>,
    thresholds: &DiagnosticThresholds,
) -> Vec<&'static BenchmarkProfile> {
    match focus_tags(kpi, thresholds) {
        None => BENCHMARKS.iter().collect(),
        Some(tags) => BENCHMARKS
            .iter()
            .filter(|profile| profile.has_any_tag(tags))
            .collect(),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StudyAssignment {
    pub handle: &'static str,
    pub name: &'static str,
    pub task: &'static str,
}

impl StudyAssignment {
    pub fn describe(&self, index: usize) -> String {
        format!(
            "Study {}: @{}\nTask: {}\nApply one tactic in today's flagship draft.",
            index + 1,
            self.handle,
            self.task
        )
    }
}

/// Draws up to `count` distinct profiles from the pool. Every call samples
/// afresh from `rng`.
pub fn assign_study<R: Rng + ?Sized>(
    pool: &[&'static BenchmarkProfile],
    count: usize,
    rng: &mut R,
) -> Vec<StudyAssignment> {
    pool.choose_multiple(rng, count)
        .map(|profile| StudyAssignment {
            handle: profile.handle,
            name: profile.name,
            task: profile.learn,
        })
        .collect()
}
