use std::{
    io::{self, Write},
    sync::Arc,
    thread,
    time::Duration,
};

use crossbeam_channel::{bounded, select, tick};
use crossterm::{cursor, execute, terminal};
use log::info;
use serde::Serialize;

use crate::{
    manager::task::Task,
    models::{log::Log, state::State},
    process::{RsyncOptions, TaskError},
};

pub const USAGE: &str = "Usage: rsync-task [--json] [--dry-run] [--delete] [--compress] \
[--exclude PATTERN]... [--rsync-binary PATH] SOURCE DESTINATION";

const REDRAW_INTERVAL: Duration = Duration::from_millis(200);

#[derive(Debug, Default, PartialEq)]
pub struct Args {
    pub source: String,
    pub destination: String,
    pub json: bool,
    pub options: RsyncOptions,
}

#[derive(Serialize)]
struct Report<'a> {
    state: &'a State,
    log: &'a Log,
    error: Option<String>,
}

pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Args, String> {
    let mut parsed = Args::default();
    let mut positional = Vec::new();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--json" => parsed.json = true,
            "--dry-run" => parsed.options.dry_run = true,
            "--delete" => parsed.options.delete = true,
            "--compress" => parsed.options.compress = true,
            "--exclude" => match args.next() {
                Some(pattern) => parsed.options.exclude.push(pattern),
                None => return Err("--exclude requires a pattern.".to_string()),
            },
            "--rsync-binary" => match args.next() {
                Some(path) => parsed.options.rsync_binary_path = Some(path),
                None => return Err("--rsync-binary requires a path.".to_string()),
            },
            other => {
                if let Some(pattern) = other.strip_prefix("--exclude=") {
                    parsed.options.exclude.push(pattern.to_string());
                } else if other.starts_with("--") {
                    return Err(format!("Unknown option: {}", other));
                } else {
                    positional.push(other.to_string());
                }
            }
        }
    }

    if positional.len() != 2 {
        return Err("Source and destination must be specified.".to_string());
    }
    parsed.destination = positional.pop().unwrap_or_default();
    parsed.source = positional.pop().unwrap_or_default();
    Ok(parsed)
}

pub fn render_progress(state: &State) -> String {
    let speed = if state.speed.is_empty() { "-" } else { state.speed.as_str() };
    format!(
        "{:6.2}%  {} of {} remaining  {}",
        state.percent, state.remaining, state.total, speed
    )
}

/// Runs the transfer, redrawing one progress line until it finishes.
/// Returns whether rsync succeeded.
pub fn run_cli(args: Args) -> io::Result<bool> {
    let task = Arc::new(Task::new(&args.source, &args.destination, args.options));
    info!("Syncing '{}' to '{}'.", args.source, args.destination);

    let (done_sender, done_receiver) = bounded(1);
    let runner = Arc::clone(&task);
    thread::spawn(move || {
        let _ = done_sender.send(runner.run());
    });

    let ticker = tick(REDRAW_INTERVAL);
    let result: Result<(), String> = loop {
        select! {
            recv(ticker) -> _ => {
                if !args.json {
                    draw(&task.state())?;
                }
            }
            recv(done_receiver) -> message => {
                break match message {
                    Ok(result) => result.map_err(|e: TaskError| e.to_string()),
                    Err(_) => Err("Task runner exited unexpectedly.".to_string()),
                };
            }
        }
    };

    let state = task.state();
    let log = task.log();

    if args.json {
        let report = Report {
            state: &state,
            log: &log,
            error: result.as_ref().err().cloned(),
        };
        let json = serde_json::to_string_pretty(&report).map_err(io::Error::other)?;
        println!("{}", json);
    } else {
        draw(&state)?;
        println!();
        if let Err(e) = &result {
            eprint!("{}", log.stderr);
            eprintln!("[ERROR]: {}", e);
        }
    }

    Ok(result.is_ok())
}

fn draw(state: &State) -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(
        stdout,
        cursor::MoveToColumn(0),
        terminal::Clear(terminal::ClearType::CurrentLine)
    )?;
    write!(stdout, "{}", render_progress(state))?;
    stdout.flush()
}
