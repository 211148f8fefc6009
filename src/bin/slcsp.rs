//! Compute the second lowest cost Silver plan for each requested ZIP code,
//! or for every county, from the CSV files under sample_data/.
//!
//! Results go to stdout as CSV; logging goes to stderr, so
//!   slcsp 2> slcsp.log
//! keeps the two apart.

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;

use slcsp::{run, DataFiles, Granularity, LogObserver, RunConfig};

#[derive(Debug, Parser)]
#[command(name = "slcsp", version, about = "Second lowest cost Silver plan rates")]
struct Args {
    /// Price requested ZIP codes, or every county in zips.csv
    #[arg(long = "by", value_enum, default_value_t = Granularity::Zip)]
    granularity: Granularity,

    /// Price locations one at a time instead of on the thread pool
    #[arg(long)]
    sequential: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Args {
    fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Warn;
        }
        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level())
        .parse_default_env()
        .init();

    let config = RunConfig {
        granularity: args.granularity,
        parallel: !args.sequential,
    };
    let files = DataFiles::sample_data();

    let stdout = std::io::stdout();
    run(&files, &config, &LogObserver, stdout.lock())
        .with_context(|| format!("SLCSP run by {} failed", config.granularity))?;

    Ok(())
}
