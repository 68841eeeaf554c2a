use super::{log::Log, state::State};

/// Everything a `Task` shares between its processors and snapshot readers.
#[derive(Debug, Default)]
pub struct TaskData {
    pub state: State,
    pub log: Log,
    pub phase: TaskPhase,
}

/// Lifecycle of a single `Task`. A task never leaves `Exited` or `SpawnFailed`.
/// `SpawnFailed` covers every failure before the process was running,
/// including failing to acquire its output streams.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TaskPhase {
    #[default]
    Created,
    Running,
    Draining,
    Exited,
    SpawnFailed,
}

impl TaskPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskPhase::Exited | TaskPhase::SpawnFailed)
    }
}
