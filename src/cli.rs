use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use crate::domain::models::Gender;

#[derive(Parser, Debug)]
#[command(author, version, about = "tennis entry list tracker")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Resolve collector feeds into one canonical record per player
    Resolve {
        /// Feed directory holding players.json and entries/
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,
        /// Output file (defaults to <data-dir>/resolved.json)
        #[arg(long)]
        output: Option<PathBuf>,
        /// Which tour to resolve
        #[arg(long, value_enum, default_value = "both")]
        gender: GenderFilter,
        /// Maximum ranking to include (defaults to 1500)
        #[arg(long)]
        max_rank: Option<u32>,
    },
    /// Validate every feed file structurally
    Check {
        /// Feed directory holding players.json and entries/
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,
    },
    /// Print a shell completion script to stdout
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq)]
pub enum GenderFilter {
    Men,
    Women,
    Both,
}

impl GenderFilter {
    /// `None` keeps both tours in scope
    pub fn as_gender(&self) -> Option<Gender> {
        match self {
            GenderFilter::Men => Some(Gender::M),
            GenderFilter::Women => Some(Gender::F),
            GenderFilter::Both => None,
        }
    }
}
