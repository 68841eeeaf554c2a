//! The external process whose output a `Task` consumes.

pub mod error;
pub mod options;
pub mod rsync;

use std::io::Read;

pub use error::TaskError;
pub use options::RsyncOptions;
pub use rsync::Rsync;

/// Readable end of one of the process's output streams.
pub type OutputStream = Box<dyn Read + Send>;

/// Lifecycle hooks a `Task` drives. Pipes are taken before `start`, so the
/// processors are already reading when the process begins writing.
pub trait Process: Send {
    fn stdout_pipe(&mut self) -> Result<OutputStream, TaskError>;

    fn stderr_pipe(&mut self) -> Result<OutputStream, TaskError>;

    fn start(&mut self) -> Result<(), TaskError>;

    /// Closes whatever the process still holds of the pipe write ends, so
    /// readers of a process that never started reach end-of-stream.
    fn release(&mut self);

    /// Blocks until the process exits. A non-zero exit is an error.
    fn wait(&mut self) -> Result<(), TaskError>;
}
