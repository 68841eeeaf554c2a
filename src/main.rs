use std::process;

use rsync_task::app::cli;

fn main() {
    let args = match cli::parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("{}", cli::USAGE);
            process::exit(2);
        }
    };

    match cli::run_cli(args) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("[ERROR]: {}", e);
            process::exit(1);
        }
    }
}
