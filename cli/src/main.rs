//! `alerta` entry point.
//!
//! Exit codes: 0 on success, 1 on an operational failure (auth, network,
//! server rejection), 2 when validation blocked the submission.

mod cli;
mod ops;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};

#[tokio::main]
async fn main() -> std::process::ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match alerta_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Erro de configuração: {e}");
            return std::process::ExitCode::from(1);
        }
    };

    let result = match &cli.command {
        Command::Login(args) => ops::login(&config, args).await,
        Command::Logout => ops::logout(&config).await,
        Command::Report(args) => ops::report(&config, args).await,
        Command::List(args) => ops::list(&config, args).await,
        Command::Edit(args) => ops::edit(&config, args).await,
        Command::Delete(args) => ops::delete(&config, args).await,
    };

    match result {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(ops::Error::Validation(errors)) => {
            eprint!("{}", ops::render_validation_errors(&errors));
            eprintln!("{}", ops::user_message(&ops::Error::Validation(errors)));
            std::process::ExitCode::from(2)
        }
        Err(e) => {
            eprintln!("{}", ops::user_message(&e));
            std::process::ExitCode::from(1)
        }
    }
}
