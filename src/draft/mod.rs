pub mod compose;
pub mod score;

use serde::{Deserialize, Serialize};

pub use compose::{build_draft, generate_hook, DraftParts, HookStyle, PostObjective};
pub use score::{extract_draft_features, DraftFeatures, DraftNote, DraftScore, DraftScorer, Grade, NoteKind};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DraftConfig {
    /// Content pillar keywords a draft should touch.
    pub pillars: Vec<String>,
}

impl DraftConfig {
    pub fn scorer(&self) -> DraftScorer {
        DraftScorer::new(self.pillars.clone())
    }
}
