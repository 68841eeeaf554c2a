//! Runs rsync as a subprocess and follows its progress.
//!
//! ```no_run
//! use rsync_task::{RsyncOptions, Task};
//!
//! let task = Task::new("photos/", "backup:/photos", RsyncOptions::default());
//! task.run()?;
//! println!("{:?}", task.state());
//! # Ok::<(), rsync_task::TaskError>(())
//! ```

pub mod app;
pub mod manager;
pub mod models;
pub mod process;
pub mod worker;

pub use manager::task::Task;
pub use models::{log::Log, state::State, task::TaskPhase};
pub use process::{OutputStream, Process, Rsync, RsyncOptions, TaskError};
