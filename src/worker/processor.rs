use std::{
    borrow::Cow,
    io::{BufRead, BufReader, Read},
    sync::{Mutex, MutexGuard, PoisonError},
};

use log::debug;

use crate::models::task::TaskData;

use super::{
    matcher::{PROGRESS, SPEED},
    parser::{parse_remain_total, parse_speed},
};

/// A panicked processor must not take snapshot readers down with it.
pub(crate) fn lock(data: &Mutex<TaskData>) -> MutexGuard<'_, TaskData> {
    data.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Calls `on_line` for every newline-terminated line until end-of-stream or a
/// read error, either of which simply ends the loop. Returns the line count.
fn for_each_line<R: Read>(stream: R, mut on_line: impl FnMut(&str)) -> usize {
    let mut reader = BufReader::new(stream);
    let mut buf = Vec::new();
    let mut count = 0;

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {
                if buf.last() == Some(&b'\n') {
                    buf.pop();
                }
                let line: Cow<'_, str> = String::from_utf8_lossy(&buf);
                on_line(&line);
                count += 1;
            }
            Err(e) => {
                debug!("Stopped reading output: {}", e);
                break;
            }
        }
    }

    count
}

/// Drains rsync's stdout, updating progress and speed and keeping the raw text.
pub fn process_stdout<R: Read>(stdout: R, data: &Mutex<TaskData>) -> usize {
    for_each_line(stdout, |line| {
        let counts = if PROGRESS.is_match(line) {
            let groups = PROGRESS.extract(line);
            Some(parse_remain_total(groups.first().copied().unwrap_or_default()))
        } else {
            None
        };

        let speed = if SPEED.is_match(line) {
            Some(parse_speed(&SPEED.extract_all(line, 2)))
        } else {
            None
        };

        let mut data = lock(data);
        if let Some((remain, total)) = counts {
            data.state.set_counts(remain, total);
        }
        if let Some(speed) = speed {
            data.state.speed = speed;
        }
        data.log.push_stdout(line);
    })
}

/// Drains rsync's stderr into the log without interpreting it.
pub fn process_stderr<R: Read>(stderr: R, data: &Mutex<TaskData>) -> usize {
    for_each_line(stderr, |line| lock(data).log.push_stderr(line))
}
