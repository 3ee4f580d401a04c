//! balloon_shooter — interactive entry point.

use std::process::ExitCode;

use anyhow::Context;
use log::error;

use balloon_shooter::app::run;
use balloon_shooter::cli::{self, Command, USAGE, USAGE_EXIT};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    match start() {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn start() -> anyhow::Result<ExitCode> {
    let cfg = match cli::parse(std::env::args().skip(1)) {
        Ok(Command::Run(cfg)) => cfg,
        Ok(Command::Help) => {
            println!("{}", USAGE);
            return Ok(ExitCode::SUCCESS);
        }
        Err(e) => {
            eprintln!("{}", cli::usage_error(&e));
            return Ok(ExitCode::from(USAGE_EXIT));
        }
    };

    if cfg.landmarks.is_some() {
        log::info!("mode: landmark helper");
    } else {
        log::info!("mode: mouse simulation (click or Space to pinch, F to drop frames)");
    }

    run(cfg).context("balloon shooter stopped")?;
    Ok(ExitCode::SUCCESS)
}
