use std::process::ExitCode;

use anyhow::Result;
use human_panic::setup_panic;
use log::error;

use drive_fetch::cli::{apply_arguments, get_config_file, get_log_file, get_matches, get_verbosity};
use drive_fetch::prelude::*;

fn main() -> ExitCode {
    setup_panic!();

    let matches = get_matches();

    let verbosity = get_verbosity(&matches);
    let log_file = get_log_file(&matches);
    if let Err(e) = init_logger(verbosity, log_file.as_deref()) {
        eprintln!("Failed to initialise logger: {e:#}");
        return ExitCode::FAILURE;
    }

    match execute(&matches) {
        Ok(context) if context.has_errors() => ExitCode::FAILURE,
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn execute(matches: &clap::ArgMatches) -> Result<WorkflowContext> {
    let mut config = resolve_config(get_config_file(matches).as_deref())?;
    apply_arguments(&mut config, matches);
    config.validate()?;

    let storage = LocalStorage::new(&config.source)?;
    run(&storage, &config)
}
