use serde::{Deserialize, Serialize};

/// Lifecycle stage of a background task reported by a collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStage {
    #[serde(rename = "task_start")]
    Started,
    #[serde(rename = "task_running")]
    Running,
    #[serde(rename = "task_failed")]
    Failed,
    #[serde(rename = "task_completed")]
    Completed,
    #[serde(rename = "task_canceled")]
    Canceled,
}

/// Progress event for one kind of background task.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaskEvent {
    pub stage: TaskStage,
    /// Task kind, e.g. `"scan"`; the board shows one row per kind.
    #[serde(rename = "type")]
    pub kind: String,
    /// Completion in `0.0..=1.0`.
    pub progress: f32,
    /// Optional human-readable detail, e.g. the file being processed.
    #[serde(default)]
    pub detail: Option<String>,
}

impl TaskEvent {
    pub fn started(kind: impl Into<String>) -> Self {
        Self {
            stage: TaskStage::Started,
            kind: kind.into(),
            progress: 0.0,
            detail: None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self.stage,
            TaskStage::Failed | TaskStage::Completed | TaskStage::Canceled
        )
    }
}

/// Board of task rows, one per task kind.
#[derive(Clone, Debug, Default)]
pub struct TaskBoardState {
    pub rows: Vec<TaskEvent>,
}

impl TaskBoardState {
    /// Replace the row with the same kind in place, or append a new one.
    ///
    /// Keeping the position stable stops rows from jumping around as
    /// progress events stream in.
    pub fn upsert(&mut self, event: TaskEvent) {
        match self.rows.iter_mut().find(|row| row.kind == event.kind) {
            Some(row) => *row = event,
            None => self.rows.push(event),
        }
    }
}
