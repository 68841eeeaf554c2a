use std::{
    io,
    process::{Child, Command, Stdio},
};

use log::debug;

use super::{OutputStream, Process, RsyncOptions, TaskError};

/// An rsync invocation whose output pipes exist before the process is spawned.
pub struct Rsync {
    program: String,
    args: Vec<String>,
    command: Option<Command>,
    child: Option<Child>,
}

impl Rsync {
    pub fn new(source: &str, destination: &str, options: &RsyncOptions) -> Self {
        let program = options.binary().to_string();
        let mut args = options.args();
        args.push(source.to_string());
        args.push(destination.to_string());

        let mut command = Command::new(&program);
        command.args(&args).stdin(Stdio::null());

        Rsync {
            program,
            args,
            command: Some(command),
            child: None,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Pid of the running process, available between `start` and `wait`.
    pub fn pid(&self) -> Option<u32> {
        self.child.as_ref().map(Child::id)
    }

    fn pending(&mut self, stream: &'static str) -> Result<&mut Command, TaskError> {
        self.command.as_mut().ok_or_else(|| {
            TaskError::pipe(
                stream,
                io::Error::other("process has already been started"),
            )
        })
    }
}

impl Process for Rsync {
    fn stdout_pipe(&mut self) -> Result<OutputStream, TaskError> {
        let command = self.pending("stdout")?;
        let (reader, writer) = io::pipe().map_err(|e| TaskError::pipe("stdout", e))?;
        command.stdout(writer);
        Ok(Box::new(reader))
    }

    fn stderr_pipe(&mut self) -> Result<OutputStream, TaskError> {
        let command = self.pending("stderr")?;
        let (reader, writer) = io::pipe().map_err(|e| TaskError::pipe("stderr", e))?;
        command.stderr(writer);
        Ok(Box::new(reader))
    }

    fn start(&mut self) -> Result<(), TaskError> {
        // Dropping the command closes our copies of the pipe write ends, so the
        // readers see end-of-stream once the child exits (or right away on failure).
        let mut command = self
            .command
            .take()
            .ok_or_else(|| TaskError::Spawn(io::Error::other("process has already been started")))?;

        debug!("Spawning: {} {}", self.program, self.args.join(" "));

        let child = command.spawn().map_err(TaskError::Spawn)?;
        self.child = Some(child);
        Ok(())
    }

    fn release(&mut self) {
        self.command = None;
    }

    fn wait(&mut self) -> Result<(), TaskError> {
        let mut child = self.child.take().ok_or(TaskError::NotStarted)?;
        let status = child.wait().map_err(TaskError::Wait)?;

        if status.success() {
            return Ok(());
        }

        if let Some(code) = status.code() {
            return Err(TaskError::ExitCode(code));
        }

        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return Err(TaskError::Signal(signal));
            }
        }

        Err(TaskError::ExitCode(-1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_and_destination_follow_options() {
        let options = RsyncOptions {
            dry_run: true,
            ..RsyncOptions::default()
        };
        let rsync = Rsync::new("src/", "host:/backup", &options);

        assert_eq!(rsync.program(), "rsync");
        assert_eq!(rsync.args(), ["--dry-run", "src/", "host:/backup"]);
    }

    #[test]
    fn pipes_cannot_be_taken_after_start_attempt() {
        let options = RsyncOptions {
            rsync_binary_path: Some("/nonexistent/rsync-binary".to_string()),
            ..RsyncOptions::default()
        };
        let mut rsync = Rsync::new("a", "b", &options);

        assert!(matches!(rsync.start(), Err(TaskError::Spawn(_))));
        assert!(matches!(
            rsync.stdout_pipe(),
            Err(TaskError::Pipe { stream: "stdout", .. })
        ));
    }

    #[test]
    fn wait_before_start_is_an_error() {
        let mut rsync = Rsync::new("a", "b", &RsyncOptions::default());
        assert!(matches!(rsync.wait(), Err(TaskError::NotStarted)));
    }
}
