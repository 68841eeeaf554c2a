use std::{
    sync::{Arc, Mutex, PoisonError},
    thread::{self, JoinHandle},
};

use log::{debug, error, info};

use crate::{
    models::{
        log::Log,
        state::State,
        task::{TaskData, TaskPhase},
    },
    process::{Process, Rsync, RsyncOptions, TaskError},
    worker::processor::{lock, process_stderr, process_stdout},
};

/// One rsync invocation together with the progress and output derived from it.
///
/// `run` blocks until the process has exited; `state` and `log` may be called
/// from other threads at any time and return copies.
pub struct Task<P: Process = Rsync> {
    process: Mutex<P>,
    data: Arc<Mutex<TaskData>>,
}

impl Task<Rsync> {
    /// Archive mode, partial transfers, human readable sizes and progress output
    /// are always enabled; the output parser depends on them.
    pub fn new(source: &str, destination: &str, mut options: RsyncOptions) -> Self {
        options.force_progress_output();
        Task::with_process(Rsync::new(source, destination, &options))
    }
}

impl<P: Process> Task<P> {
    pub fn with_process(process: P) -> Self {
        Task {
            process: Mutex::new(process),
            data: Arc::new(Mutex::new(TaskData::default())),
        }
    }

    pub fn state(&self) -> State {
        lock(&self.data).state.clone()
    }

    pub fn log(&self) -> Log {
        lock(&self.data).log.clone()
    }

    pub fn phase(&self) -> TaskPhase {
        lock(&self.data).phase
    }

    fn set_phase(&self, phase: TaskPhase) {
        lock(&self.data).phase = phase;
    }

    /// Runs the process to completion. A task can be run only once.
    pub fn run(&self) -> Result<(), TaskError> {
        let mut process = self.process.lock().unwrap_or_else(PoisonError::into_inner);
        if self.phase() != TaskPhase::Created {
            return Err(TaskError::AlreadyRun);
        }

        let stderr = match process.stderr_pipe() {
            Ok(stderr) => stderr,
            Err(e) => {
                self.set_phase(TaskPhase::SpawnFailed);
                return Err(e);
            }
        };

        let stdout = match process.stdout_pipe() {
            Ok(stdout) => stdout,
            Err(e) => {
                drop(stderr);
                self.set_phase(TaskPhase::SpawnFailed);
                return Err(e);
            }
        };

        let data = Arc::clone(&self.data);
        let stdout_handle = thread::spawn(move || process_stdout(stdout, &data));
        let data = Arc::clone(&self.data);
        let stderr_handle = thread::spawn(move || process_stderr(stderr, &data));
        self.set_phase(TaskPhase::Running);

        if let Err(e) = process.start() {
            error!("Failed to start process: {}", e);
            process.release();
            join_processor("stdout", stdout_handle);
            join_processor("stderr", stderr_handle);
            self.set_phase(TaskPhase::SpawnFailed);
            return Err(e);
        }

        info!("Process started.");
        self.set_phase(TaskPhase::Draining);

        join_processor("stdout", stdout_handle);
        join_processor("stderr", stderr_handle);

        let result = process.wait();
        self.set_phase(TaskPhase::Exited);
        match &result {
            Ok(()) => info!("Process finished successfully."),
            Err(e) => error!("Process failed: {}", e),
        }
        result
    }
}

fn join_processor(stream: &str, handle: JoinHandle<usize>) {
    match handle.join() {
        Ok(lines) => debug!("Finished reading {}: {} lines", stream, lines),
        Err(_) => error!("Reader for {} panicked", stream),
    }
}
