use anyhow::Result;

use tennis_entry_tracker::cli::Command;
use tennis_entry_tracker::{handle_check, handle_completions, handle_resolve, interpret};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(command)
}

fn execute_command(command: Command) -> Result<()> {
    match command {
        Command::Resolve {
            data_dir,
            output,
            gender,
            max_rank,
        } => handle_resolve(data_dir, output, gender, max_rank),
        Command::Check { data_dir } => handle_check(data_dir),
        Command::Completions { shell } => handle_completions(shell),
    }
}
