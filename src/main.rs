use std::{io::Write, path::PathBuf, process};

use clap::Parser;
use inventory_analysis::{
    error::Result,
    pipeline::{Analysis, Inventory},
    report::{render_profile, write_analysis, Options},
};
use log::error;

/// Inventory and sales analysis over one fiscal year of CSV exports
#[derive(Parser)]
struct Cli {
    /// Directory holding the six inventory CSV files
    #[clap(default_value = ".")]
    data_dir: PathBuf,
    /// Size of the top and bottom rankings
    #[clap(short = 'n', long, default_value_t = 10)]
    top: usize,
    /// Print rankings as CSV instead of tables
    #[clap(long)]
    csv: bool,
    /// Skip the text charts
    #[clap(long)]
    no_charts: bool,
    /// Print a column summary of every raw table before cleaning
    #[clap(long)]
    profile: bool,
}

fn run(cli: &Cli) -> Result<()> {
    let inventory = Inventory::load(&cli.data_dir)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if cli.profile {
        for profile in inventory.profiles() {
            write!(out, "{}", render_profile(&profile))?;
        }
        writeln!(out)?;
    }

    let inventory = inventory.clean()?;
    let analysis = Analysis::compute(&inventory)?;
    let options = Options {
        top: cli.top,
        csv: cli.csv,
        charts: !cli.no_charts,
    };
    write_analysis(&analysis, &options, out)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run(&Cli::parse()) {
        error!("{}", err);
        process::exit(1);
    }
}
