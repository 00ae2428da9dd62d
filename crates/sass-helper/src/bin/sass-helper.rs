use std::process::ExitCode;

use clap::{CommandFactory, FromArgMatches};
use sass_helper::cli::{self, Cli};
use sass_helper::Notification;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let matches = Cli::command().get_matches();
    let parsed = match Cli::from_arg_matches(&matches) {
        Ok(parsed) => parsed,
        Err(e) => e.exit(),
    };

    match cli::run(&parsed, &matches) {
        Ok(None) => ExitCode::SUCCESS,
        Ok(Some(Notification::Info(message))) => {
            eprintln!("{}", message);
            ExitCode::SUCCESS
        }
        Ok(Some(Notification::Error(message))) => {
            eprintln!("error: {}", message);
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
