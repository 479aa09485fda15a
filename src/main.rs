use std::{process::ExitCode, sync::Arc};

use clap::Parser;
use log::error;

use crate::core::{
    cli::Cli,
    configuration::get_configuration,
    logger::{self, DEFAULT_LOG_LEVEL, DEFAULT_LOG_RETENTION},
};
use view::ConsoleView;

mod core;
mod features;
mod view;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let conf = match get_configuration(cli.configuration_file.clone()).await {
        Ok(c) => c,
        Err(e) => {
            eprintln!("cannot load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = conf.assert_data_dir_permissions() {
        eprintln!("invalid data directory: {e}");
        return ExitCode::FAILURE;
    }

    if let Err(e) = conf.assert_session_check_interval_is_valid() {
        eprintln!("invalid configuration: {e}");
        return ExitCode::FAILURE;
    }

    let level = match cli.verbosity {
        Some(v) => v.to_string(),
        None => conf
            .log
            .level
            .clone()
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
    }
    .to_lowercase();

    let _logger = match logger::init(
        &level,
        &conf.data_directory(),
        conf.log.retention.unwrap_or(DEFAULT_LOG_RETENTION),
    ) {
        Ok(h) => h,
        Err(e) => {
            eprintln!("cannot start logger: {e}");
            return ExitCode::FAILURE;
        }
    };

    match crate::core::core::run(conf, cli.command, Arc::new(ConsoleView::new())).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
