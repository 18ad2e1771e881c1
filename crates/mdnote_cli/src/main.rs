//! Terminal entry point for the markdown note uploader.
//!
//! # Responsibility
//! - Load configuration, start logging and connect to the store.
//! - Run the form shell, then close the store before exiting.
//!
//! # Invariants
//! - Startup failures and a failed disconnect end the process with status 1.

mod command;
mod render;
mod shell;

use log::{error, info};
use mdnote_core::{init_logging, AppConfig, SqliteNoteGateway, UploadWorkflow};
use std::fmt::Display;
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => return fatal("configuration", err),
    };
    if let Err(err) = init_logging(&config.log_level, &config.log_target) {
        return fatal("logging", err);
    }

    let gateway = match SqliteNoteGateway::connect(&config.store_uri) {
        Ok(gateway) => gateway,
        Err(err) => return fatal("store connect", err),
    };

    let mut workflow = UploadWorkflow::new(gateway);
    let stdout = std::io::stdout();
    let run_result = shell::run(&mut workflow, &mut stdout.lock());
    if let Err(err) = &run_result {
        error!("event=shell_exit module=cli status=error error={err}");
    }

    if let Err(err) = workflow.into_gateway().disconnect() {
        return fatal("store disconnect", err);
    }
    info!("Exited the app.");

    if run_result.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn fatal(stage: &str, err: impl Display) -> ExitCode {
    error!("event=fatal module=cli stage={stage} error={err}");
    eprintln!("mdnote: {stage} failed: {err}");
    ExitCode::FAILURE
}
