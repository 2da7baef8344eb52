use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static SIGNAL_WORDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(signal|data|study|report|says|according|source)").expect("signal pattern")
});
static IMPLICATION_WORDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(implication|means|therefore|this changes|so what|result)")
        .expect("implication pattern")
});
static HYPE_WORDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(lfg|insane|crazy|legend|wild|moon)\b").expect("hype pattern")
});

const IDEAL_LENGTH: std::ops::RangeInclusive<usize> = 130..=420;
const ACCEPTABLE_LENGTH: usize = 90;
const MIN_STRUCTURED_LINES: usize = 4;
const MIN_PILLAR_KEYWORD_LEN: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteKind {
    Credit,
    Deficiency,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DraftNote {
    pub kind: NoteKind,
    pub message: String,
}

impl DraftNote {
    fn credit(message: &str) -> Self {
        Self {
            kind: NoteKind::Credit,
            message: message.to_string(),
        }
    }

    fn deficiency(message: &str) -> Self {
        Self {
            kind: NoteKind::Deficiency,
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn from_score(score: u8) -> Self {
        if score >= 85 {
            Grade::A
        } else if score >= 70 {
            Grade::B
        } else if score >= 55 {
            Grade::C
        } else if score >= 40 {
            Grade::D
        } else {
            Grade::F
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DraftScore {
    pub score: u8,
    pub grade: Grade,
    pub notes: Vec<DraftNote>,
}

impl DraftScore {
    pub fn deficiencies(&self) -> impl Iterator<Item = &DraftNote> {
        self.notes
            .iter()
            .filter(|note| note.kind == NoteKind::Deficiency)
    }
}

/// Text features the rubric reads.
#[derive(Debug, Clone)]
pub struct DraftFeatures {
    pub char_count: usize,
    pub line_count: usize,
    pub has_number: bool,
    pub has_signal_word: bool,
    pub has_implication: bool,
    pub has_question: bool,
    pub has_follow_cta: bool,
    pub hype_count: usize,
}

pub fn extract_draft_features(text: &str) -> DraftFeatures {
    DraftFeatures {
        char_count: text.chars().count(),
        line_count: text.split('\n').filter(|line| !line.is_empty()).count(),
        has_number: text.chars().any(|c| c.is_ascii_digit()),
        has_signal_word: SIGNAL_WORDS.is_match(text),
        has_implication: IMPLICATION_WORDS.is_match(text),
        has_question: text.contains('?'),
        has_follow_cta: text.to_lowercase().contains("follow"),
        hype_count: HYPE_WORDS.find_iter(text).count(),
    }
}

#[derive(Debug, Clone, Default)]
pub struct DraftScorer {
    pillars: Vec<String>,
}

impl DraftScorer {
    /// Pillar keywords of four characters or fewer never count as a match.
    pub fn new(pillars: Vec<String>) -> Self {
        let pillars = pillars
            .into_iter()
            .map(|pillar| pillar.trim().to_lowercase())
            .filter(|pillar| !pillar.is_empty())
            .collect();
        Self { pillars }
    }

    pub fn score(&self, draft: &str) -> DraftScore {
        let text = draft.trim();
        if text.is_empty() {
            return DraftScore {
                score: 0,
                grade: Grade::F,
                notes: vec![DraftNote::deficiency("Draft is empty.")],
            };
        }

        let features = extract_draft_features(text);
        let mut score: i32 = 0;
        let mut notes = Vec::new();

        if IDEAL_LENGTH.contains(&features.char_count) {
            score += 22;
            notes.push(DraftNote::credit("Good length for depth + readability."));
        } else if features.char_count >= ACCEPTABLE_LENGTH {
            score += 12;
            notes.push(DraftNote::credit(
                "Length is acceptable; consider tighter structure.",
            ));
        } else {
            score += 4;
            notes.push(DraftNote::deficiency("Too short for high-context conversion."));
        }

        if features.line_count >= MIN_STRUCTURED_LINES {
            score += 14;
            notes.push(DraftNote::credit("Readable multi-line structure."));
        } else {
            score += 5;
            notes.push(DraftNote::deficiency("Add line breaks for scanability."));
        }

        if features.has_number || features.has_signal_word {
            score += 16;
            notes.push(DraftNote::credit("Concrete source signal detected."));
        } else {
            notes.push(DraftNote::deficiency("Add concrete source signal or number."));
        }

        if features.has_implication {
            score += 18;
            notes.push(DraftNote::credit("Strong implication language."));
        } else {
            notes.push(DraftNote::deficiency("State implication explicitly."));
        }

        if features.has_question {
            score += 10;
            notes.push(DraftNote::credit("Discussion trigger present."));
        }

        if features.has_follow_cta {
            score += 10;
            notes.push(DraftNote::credit("Follow conversion CTA present."));
        } else {
            notes.push(DraftNote::deficiency("Add explicit reason-to-follow close."));
        }

        if !self.pillars.is_empty() {
            if self.matches_pillar(text) {
                score += 8;
                notes.push(DraftNote::credit("Aligned with a content pillar."));
            } else {
                notes.push(DraftNote::deficiency(
                    "Tie the draft to one of your content pillars.",
                ));
            }
        }

        match features.hype_count {
            0 => score += 10,
            1 => score += 5,
            _ => {
                score -= 8;
                notes.push(DraftNote::deficiency(
                    "Reduce hype words; keep precision high.",
                ));
            }
        }

        let score = score.clamp(0, 100) as u8;
        DraftScore {
            score,
            grade: Grade::from_score(score),
            notes,
        }
    }

    fn matches_pillar(&self, text: &str) -> bool {
        let lowercase = text.to_lowercase();
        self.pillars
            .iter()
            .filter(|pillar| pillar.chars().count() > MIN_PILLAR_KEYWORD_LEN)
            .any(|pillar| lowercase.contains(pillar.as_str()))
    }
}
