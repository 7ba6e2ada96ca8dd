use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskId {
    Move,
    ViewProduct,
    TryOn,
    VisitStore,
    AddToCart,
    VisitSection,
}

pub const ALL_TASKS: [TaskId; 6] = [
    TaskId::Move,
    TaskId::ViewProduct,
    TaskId::TryOn,
    TaskId::VisitStore,
    TaskId::AddToCart,
    TaskId::VisitSection,
];

impl TaskId {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Move => "move",
            Self::ViewProduct => "viewProduct",
            Self::TryOn => "tryOn",
            Self::VisitStore => "visitStore",
            Self::AddToCart => "addToCart",
            Self::VisitSection => "visitSection",
        }
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskId {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        ALL_TASKS
            .into_iter()
            .find(|task| task.as_str() == raw)
            .ok_or_else(|| format!("unknown task '{raw}'"))
    }
}

/// Insertion-ordered set of completed tour milestones. Grows until an explicit
/// [`InteractionTracker::reset`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct InteractionTracker {
    completed: Vec<TaskId>,
}

impl InteractionTracker {
    /// Returns `true` when the task was not recorded before.
    pub fn record(&mut self, task: TaskId) -> bool {
        if self.has_completed(task) {
            return false;
        }
        self.completed.push(task);
        true
    }

    pub fn has_completed(&self, task: TaskId) -> bool {
        self.completed.contains(&task)
    }

    pub fn reset(&mut self) {
        self.completed.clear();
    }

    pub fn completed(&self) -> &[TaskId] {
        &self.completed
    }

    pub fn completion_ratio(&self) -> f32 {
        self.completed.len() as f32 / ALL_TASKS.len() as f32
    }

    pub fn is_complete(&self) -> bool {
        self.completed.len() == ALL_TASKS.len()
    }
}
