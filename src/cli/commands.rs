use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "fec-collector")]
#[command(
    about = "Fetch candidates with large individual donations and their committees from the FEC API"
)]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Fetch and filter all candidates
    #[arg(long)]
    pub fetch: bool,

    /// Retry failed candidates from previous run
    #[arg(long)]
    pub retry: bool,

    /// Merge original and retry results
    #[arg(long)]
    pub merge: bool,

    /// Path to configuration file (extension optional)
    #[arg(short, long, global = true, default_value = "config/default")]
    pub config: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read-only queries against the API and the stored results
    Lookup {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
        format: OutputFormat,

        #[command(subcommand)]
        query: LookupQuery,
    },
}

#[derive(Subcommand, Debug)]
pub enum LookupQuery {
    /// Search candidates by name (case-insensitive)
    Search {
        name: String,
    },

    /// List Schedule A donations for a candidate
    Donations {
        candidate_id: String,

        /// Two-year transaction period, e.g. 2024
        #[arg(short, long)]
        year: Option<u16>,
    },

    /// Show committees of a candidate from the stored results
    Committees {
        candidate_id: String,
    },

    /// Show the most recent financial report of one or more committees
    LatestReport {
        #[arg(required = true)]
        committee_ids: Vec<String>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}
