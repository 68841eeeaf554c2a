use std::io;

#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error("Failed to acquire {stream} pipe: {source}")]
    Pipe {
        stream: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("Failed to start process: {0}")]
    Spawn(#[source] io::Error),

    #[error("Failed to wait for process: {0}")]
    Wait(#[source] io::Error),

    #[error("Process exited with code {0}")]
    ExitCode(i32),

    #[error("Process terminated by signal {0}")]
    Signal(i32),

    #[error("Process has not been started")]
    NotStarted,

    #[error("Task has already been run")]
    AlreadyRun,
}

impl TaskError {
    pub(crate) fn pipe(stream: &'static str, source: io::Error) -> Self {
        TaskError::Pipe { stream, source }
    }

    /// Exit code reported by the process, if it ran to a non-zero exit.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            TaskError::ExitCode(code) => Some(*code),
            _ => None,
        }
    }
}
