use football_etl::cli::handlers::handle;
use football_etl::cli::CliArgs;
use football_etl::util::{init_logging, parse_level, LoggingConfig};
use football_etl::{EtlConfig, VERSION};

use clap::Parser;
use tracing::{debug, Level};

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();
    let config = EtlConfig::default();
    init_logging_from_args(&args, &config);

    debug!("football-etl v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = handle(&args, config).await;
    std::process::exit(exit_code);
}

fn init_logging_from_args(args: &CliArgs, config: &EtlConfig) {
    let level = if let Some(level_str) = &args.log_level {
        parse_level(level_str)
    } else if args.verbose {
        Level::DEBUG
    } else if args.quiet {
        Level::ERROR
    } else {
        parse_level(&config.log_level)
    };

    init_logging(LoggingConfig::from_env(level));
}
