mod cli;
mod common;
mod config;
mod convert;
mod deconvolve_cmd;
mod efficiency_cmd;
mod harmonics_cmd;
mod logging;
mod properties_cmd;
mod spectral;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Deconvolve(args) => deconvolve_cmd::run(args),
        Command::Harmonics(args) => harmonics_cmd::run(args),
        Command::Efficiency(args) => efficiency_cmd::run(args),
        Command::Properties(args) => properties_cmd::run(args),
    }
}
