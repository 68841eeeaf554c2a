#![cfg(unix)]

use std::{fs, os::unix::fs::PermissionsExt, path::PathBuf};

use rsync_task::{RsyncOptions, Task, TaskError, TaskPhase};

fn write_script(dir: &tempfile::TempDir, name: &str, body: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, format!("#!/bin/sh\n{}", body)).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn options_for(path: PathBuf) -> RsyncOptions {
    RsyncOptions {
        rsync_binary_path: Some(path.to_string_lossy().into_owned()),
        dry_run: true,
        ..RsyncOptions::default()
    }
}

// Both scripts run from one test so no other test thread forks while a
// script file is still open for writing.
#[test]
fn runs_script_in_place_of_rsync() {
    let dir = tempfile::tempdir().unwrap();

    let ok = write_script(
        &dir,
        "rsync-ok",
        "echo \"$@\" >&2\n\
         printf 'sending incremental file list\\n'\n\
         printf 'disk.img\\n'\n\
         printf '     32.77K   0%%    0.00kB/s    0:00:00\\r      1.05M 100%%  512.00kB/s    0:00:02 (xfr#1, to-chk=0/2)\\n'\n\
         exit 0\n",
    );
    let failing = write_script(
        &dir,
        "rsync-fail",
        "printf 'sending incremental file list\\n'\n\
         echo 'rsync error: some files/attrs were not transferred (code 23)' >&2\n\
         exit 23\n",
    );

    let task = Task::new("src/", "dst/", options_for(ok));
    task.run().unwrap();

    let state = task.state();
    assert_eq!((state.remaining, state.total), (0, 2));
    assert!((state.percent - 100.0).abs() < 1e-9);
    assert_eq!(state.speed, "512.00kB/s");

    let log = task.log();
    assert!(log.stdout.starts_with("sending incremental file list\ndisk.img\n"));
    for flag in ["--archive", "--dry-run", "--partial", "--human-readable", "--progress"] {
        assert!(log.stderr.contains(flag), "rsync not called with {}", flag);
    }
    assert!(log.stderr.trim_end().ends_with("src/ dst/"));
    assert_eq!(task.phase(), TaskPhase::Exited);

    let task = Task::new("src/", "dst/", options_for(failing));
    let result = task.run();
    assert!(matches!(result, Err(TaskError::ExitCode(23))));
    assert_eq!(task.log().stdout, "sending incremental file list\n");
    assert_eq!(
        task.log().stderr,
        "rsync error: some files/attrs were not transferred (code 23)\n"
    );
    assert_eq!(task.state().total, 0);
}
