use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyTask {
    pub id: &'static str,
    pub text: &'static str,
}

pub const DAILY_TASKS: [DailyTask; 5] = [
    DailyTask {
        id: "t1",
        text: "Review KPI diagnostics and choose one growth priority",
    },
    DailyTask {
        id: "t2",
        text: "Study 3 benchmark accounts and extract one tactic",
    },
    DailyTask {
        id: "t3",
        text: "Draft one flagship post and score it 80+",
    },
    DailyTask {
        id: "t4",
        text: "Publish with clear conversion close (reason to follow)",
    },
    DailyTask {
        id: "t5",
        text: "Log today's post result in Review section",
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskState {
    pub id: String,
    pub checked: bool,
}

/// Completion state of the daily sprint, one entry per known task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<TaskState>", into = "Vec<TaskState>")]
pub struct ChecklistState {
    tasks: Vec<TaskState>,
}

impl Default for ChecklistState {
    fn default() -> Self {
        Self {
            tasks: DAILY_TASKS
                .iter()
                .map(|task| TaskState {
                    id: task.id.to_string(),
                    checked: false,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChecklistProgress {
    pub done: usize,
    pub total: usize,
    pub percent: f64,
}

impl ChecklistState {
    /// Rebuilds state from stored entries; unknown ids are ignored and
    /// missing tasks start unchecked.
    pub fn from_saved(saved: &[TaskState]) -> Self {
        let mut state = Self::default();
        for entry in saved {
            state.set(&entry.id, entry.checked);
        }
        state
    }

    pub fn tasks(&self) -> &[TaskState] {
        &self.tasks
    }

    /// Returns false when the id is not a known task.
    pub fn set(&mut self, id: &str, checked: bool) -> bool {
        match self.tasks.iter_mut().find(|task| task.id == id) {
            Some(task) => {
                task.checked = checked;
                true
            }
            None => false,
        }
    }

    pub fn is_checked(&self, id: &str) -> bool {
        self.tasks.iter().any(|task| task.id == id && task.checked)
    }

    pub fn progress(&self) -> ChecklistProgress {
        let done = self.tasks.iter().filter(|task| task.checked).count();
        let total = self.tasks.len();
        let percent = if total == 0 {
            0.0
        } else {
            done as f64 / total as f64 * 100.0
        };
        ChecklistProgress {
            done,
            total,
            percent,
        }
    }

    /// Texts of unchecked tasks in declared order.
    pub fn pending(&self) -> Vec<&'static str> {
        self.tasks
            .iter()
            .filter(|task| !task.checked)
            .map(|task| task_text(&task.id))
            .collect()
    }
}

impl From<Vec<TaskState>> for ChecklistState {
    fn from(saved: Vec<TaskState>) -> Self {
        Self::from_saved(&saved)
    }
}

impl From<ChecklistState> for Vec<TaskState> {
    fn from(state: ChecklistState) -> Self {
        state.tasks
    }
}

fn task_text(id: &str) -> &'static str {
    DAILY_TASKS
        .iter()
        .find(|task| task.id == id)
        .map(|task| task.text)
        .unwrap_or("Finish daily sprint")
}
