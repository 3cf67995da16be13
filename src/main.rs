mod batch_cmd;
mod cli;
mod config;
mod convert;
mod logging;
mod output;
mod run_cmd;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(cli.command) {
        Ok(0) => {}
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    }
}

fn run(command: Command) -> Result<i32> {
    match command {
        Command::Run(args) => run_cmd::run(args).map(|()| 0),
        Command::Batch(args) => batch_cmd::run(args),
    }
}
