//! Command-line and environment configuration.

use std::path::PathBuf;

use clap::Parser;

use crate::data::teams::TeamCodeTable;
use crate::state::SelectionMode;

/// Rows shown per page of the summary table.
pub const DEFAULT_PAGE_SIZE: usize = 16;

#[derive(Parser, Debug, Clone)]
#[command(name = "goalie-dash", version, about = "NHL goalie fantasy point distribution dashboard")]
pub struct Cli {
    /// Game log to open at startup (.csv, .json or .parquet)
    #[arg(short, long, env = "GOALIE_DASH_DATA")]
    pub data: Option<PathBuf>,

    /// JSON file mapping team ids to three-letter codes, e.g. {"1": "NJD"}
    #[arg(long, env = "GOALIE_DASH_TEAM_CODES")]
    pub team_codes: Option<PathBuf>,

    /// Rows per page in the summary table
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: usize,

    /// Filter panel layout to start in
    #[arg(long, value_enum, default_value_t = SelectionMode::MultiById)]
    pub mode: SelectionMode,
}

/// Resolved settings handed to the app.
#[derive(Debug, Clone)]
pub struct Config {
    pub data_path: Option<PathBuf>,
    pub team_codes: TeamCodeTable,
    pub page_size: usize,
    pub mode: SelectionMode,
}

impl Config {
    /// Resolve CLI arguments. A bad team code file is reported and the
    /// built-in table is used instead.
    pub fn from_cli(cli: Cli) -> Self {
        let team_codes = match &cli.team_codes {
            Some(path) => match TeamCodeTable::from_json_file(path) {
                Ok(table) => {
                    log::info!("Loaded {} team codes from {}", table.len(), path.display());
                    table
                }
                Err(e) => {
                    log::warn!("{e}; using built-in team codes");
                    TeamCodeTable::default()
                }
            },
            None => TeamCodeTable::default(),
        };

        let page_size = if cli.page_size == 0 {
            log::warn!("page size must be positive; using {DEFAULT_PAGE_SIZE}");
            DEFAULT_PAGE_SIZE
        } else {
            cli.page_size
        };

        Config {
            data_path: cli.data,
            team_codes,
            page_size,
            mode: cli.mode,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_path: None,
            team_codes: TeamCodeTable::default(),
            page_size: DEFAULT_PAGE_SIZE,
            mode: SelectionMode::MultiById,
        }
    }
}
