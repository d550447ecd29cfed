//! save-session
//!
//! Opens the login page in a visible browser and keeps the profile in
//! `SESSION_DIR` so `applicant-harvest` can reuse the logged-in session.

use applicant_harvest::{SessionConfig, session};
use clap::Parser;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "save-session")]
#[command(version)]
#[command(about = "Log in by hand once and keep the browser session for applicant-harvest", long_about = None)]
struct Cli {}

fn main() -> ExitCode {
    let _cli = Cli::parse();
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match SessionConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    eprintln!("Please log in manually in the browser window...");
    match session::bootstrap(&config.session_dir, config.login_wait) {
        Ok(()) => {
            eprintln!("Login session saved to {}", config.session_dir.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
