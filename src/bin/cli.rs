//! applicant-harvest
//!
//! Walks the applicant list of the job posting in `JOB_URL` and writes every
//! applicant's contact details to a numbered text file.

use applicant_harvest::{Config, harvest, report};
use clap::Parser;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "applicant-harvest")]
#[command(version)]
#[command(
    about = "Collect applicant contact details from a job posting",
    long_about = "Collect applicant contact details from a job posting.\n\n\
                  Settings come from the environment (or .env): JOB_URL (required), \
                  SESSION_DIR, OUTPUT_FILE, SELECTORS_FILE, HEADLESS. \
                  Run `save-session` first to log in."
)]
struct Cli {}

fn main() -> ExitCode {
    let _cli = Cli::parse();
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let outcome = match harvest::run(&config) {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = report::write(&config.output_path, &outcome.records) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    if let Some(png) = &outcome.screenshot {
        let path = config.output_path.with_file_name("debug_screenshot.png");
        match std::fs::write(&path, png) {
            Ok(()) => eprintln!("Saved page screenshot to {}", path.display()),
            Err(e) => log::warn!("Could not save screenshot: {}", e),
        }
    }

    eprintln!("{} ({} skipped attempts, stopped: {:?})", outcome.summary(), outcome.skipped, outcome.reason);
    if !outcome.records.is_empty() {
        eprintln!("Results saved to {}", config.output_path.display());
    }

    ExitCode::SUCCESS
}
