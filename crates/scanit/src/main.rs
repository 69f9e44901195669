// Author: Dustin Pilgrim
// License: MIT

mod cli;
mod config;
mod crop;
mod gestures;
mod logging;
mod lookup;
mod paths;
mod preview;
mod print;
mod run;

use clap::Parser;

use crate::cli::Args;

fn main() {
    let args = Args::parse();

    let log_path = args
        .log_file
        .clone()
        .unwrap_or_else(|| paths::default_log_path("scanit.log"));

    if let Err(e) = logging::init_logging(&log_path, args.verbose) {
        // logging should never block normal usage
        eprintln!("scanit: failed to init logging: {e}");
    }

    eventline::info!("scanit starting");
    eventline::debug!("log_path={}", log_path.display());

    if let Err(e) = run::run(args) {
        eventline::error!("{e}");
        // user-facing error
        eprintln!("scanit: {e}");
        std::process::exit(1);
    }
}
