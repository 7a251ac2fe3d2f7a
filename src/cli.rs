use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use crate::domain::ResultFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "tennis match tracker")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct Credentials {
    /// Account email
    #[arg(long)]
    pub email: String,
    /// Account password, read from TENNIS_TRACKER_PASSWORD when not given
    #[arg(long, env = "TENNIS_TRACKER_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Start the HTTP API server
    Serve {
        /// Port number (optional, defaults to 3000)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Create the database schema
    Init {
        /// Drop all existing data first
        #[arg(long)]
        reset: bool,
    },
    /// Create a new account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "TENNIS_TRACKER_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Record a match; sets are written as games-for:games-against, e.g. 6-4
    Record {
        #[command(flatten)]
        credentials: Credentials,
        /// Opponent name
        #[arg(long)]
        opponent: String,
        /// First set, e.g. 6-4
        #[arg(long, value_parser = parse_set)]
        first: (u32, u32),
        /// Second set, e.g. 3-6
        #[arg(long, value_parser = parse_set)]
        second: (u32, u32),
        /// Deciding set, only used when the first two are split
        #[arg(long, value_parser = parse_set)]
        third: Option<(u32, u32)>,
    },
    /// List recorded matches, newest first
    History {
        #[command(flatten)]
        credentials: Credentials,
        /// all, win, loss or pending
        #[arg(long, default_value = "all")]
        result: ResultFilter,
        #[arg(long)]
        year: Option<i32>,
        /// 1-12
        #[arg(long)]
        month: Option<u32>,
    },
    /// Show win/loss totals
    Stats {
        #[command(flatten)]
        credentials: Credentials,
    },
    /// Print the cumulative performance series
    Chart {
        #[command(flatten)]
        credentials: Credentials,
    },
    /// Print shell completions
    Completions {
        shell: Shell,
    },
}

fn parse_set(value: &str) -> Result<(u32, u32), String> {
    let (own, opp) = value
        .split_once(['-', ':'])
        .ok_or_else(|| format!("expected games like 6-4, got '{}'", value))?;
    let parse = |s: &str| {
        s.trim()
            .parse::<u32>()
            .map_err(|_| format!("'{}' is not a game count", s))
    };
    Ok((parse(own)?, parse(opp)?))
}
