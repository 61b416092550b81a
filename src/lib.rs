pub mod cli;
pub mod config;
pub mod domain;
pub mod matching;
pub mod normalize;
pub mod reconcile;
pub mod resolver;
pub mod services;
pub mod store;

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use cli::Cli;

use crate::cli::{Command, GenderFilter};
use crate::config::settings::AppConfig;
use crate::services::check::CheckService;
use crate::services::resolution::{ResolutionService, ResolveOptions};

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_resolve(
    data_dir: PathBuf,
    output: Option<PathBuf>,
    gender: GenderFilter,
    max_rank: Option<u32>,
) -> Result<()> {
    let config = AppConfig::new();
    let options = ResolveOptions {
        data_dir,
        output,
        gender: gender.as_gender(),
        max_rank: max_rank.unwrap_or(config.resolver.default_max_rank),
    };
    let service = ResolutionService::new(config, options);
    service.run()
}

pub fn handle_check(data_dir: PathBuf) -> Result<()> {
    let service = CheckService::new(data_dir);
    service.run()
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut io::stdout());
    Ok(())
}
