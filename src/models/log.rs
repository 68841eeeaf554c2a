use serde::{Deserialize, Serialize};

/// Raw output of an rsync run, one entry per line read, newline terminated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Log {
    pub stdout: String,
    pub stderr: String,
}

impl Log {
    pub fn push_stdout(&mut self, line: &str) {
        self.stdout.push_str(line);
        self.stdout.push('\n');
    }

    pub fn push_stderr(&mut self, line: &str) {
        self.stderr.push_str(line);
        self.stderr.push('\n');
    }
}
