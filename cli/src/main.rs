//! `provision` binary entry point.
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use provision_cli::{cli, commands, logging};

fn main() -> ExitCode {
    let args = cli::Cli::parse();
    logging::init_subscriber(args.verbose);
    let log = Arc::new(logging::Logger::new());

    match commands::provision::run(&args, &log) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log.error(&format!("{e:#}"));
            if let Some(path) = log.log_path() {
                log.info(&format!("full log: {}", path.display()));
            }
            ExitCode::FAILURE
        }
    }
}
