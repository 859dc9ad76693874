//! progressctl - record quiz answers, XP and streaks from the terminal

use anyhow::Result;
use clap::Parser;
use progressctl::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    progressctl::init_logging(cli.verbose);
    progressctl::run(cli)
}
