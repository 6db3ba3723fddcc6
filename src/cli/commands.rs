use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Daily football statistics pipeline
#[derive(Parser, Debug)]
#[command(
    name = "football-etl",
    about = "Daily football statistics pipeline",
    version,
    long_about = "football-etl fetches top-scorer and top-assist statistics from the football \
                  API, loads them into MongoDB, derives each scorer's goal contribution and \
                  archives the raw JSON to S3. Each stage can be run on its own so an external \
                  scheduler can chain them as separate tasks."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,

    #[arg(
        short = 'f',
        long,
        global = true,
        value_enum,
        default_value = "human",
        help = "Report format printed on stdout"
    )]
    pub format: OutputFormatArg,

    #[arg(
        long,
        global = true,
        value_name = "DIR",
        help = "Scratch directory for the JSON files (overrides FOOTBALL_ETL_SCRATCH_DIR)"
    )]
    pub scratch_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    #[command(about = "Run extract, load, transform and archive in order")]
    Run,

    #[command(about = "Fetch both datasets from the API into the scratch directory")]
    Extract,

    #[command(about = "Upsert the scratch files into MongoDB")]
    Load,

    #[command(about = "Add the contribution field to the stored top scorers")]
    Transform,

    #[command(about = "Upload the scratch files to the archive bucket")]
    Archive,

    #[command(about = "Show the effective configuration (secrets redacted)")]
    Config,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => Self::Json,
            OutputFormatArg::Human => Self::Human,
        }
    }
}
