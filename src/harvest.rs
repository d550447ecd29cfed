//! One complete run: launch, open the posting, walk the applicant list, close

use crate::applicants::{ApplicantRecord, StopReason, Traversal};
use crate::browser::{BrowserSession, LaunchOptions};
use crate::config::Config;
use crate::driver::Driver;
use crate::error::Result;
use crate::session;

/// What a finished run produced
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub records: Vec<ApplicantRecord>,
    pub reason: StopReason,
    /// Applicants whose contact info was opened
    pub processed: usize,
    /// Failed open attempts
    pub skipped: usize,
    /// PNG of the page, captured when nothing was collected
    pub screenshot: Option<Vec<u8>>,
}

impl RunOutcome {
    /// One-line result for the user
    pub fn summary(&self) -> String {
        if self.records.is_empty() {
            "zero applicants collected, check configuration".to_string()
        } else {
            format!("{} applicants collected", self.records.len())
        }
    }
}

/// Launch Chrome on the saved session, harvest, and close the browser on every path.
pub fn run(config: &Config) -> Result<RunOutcome> {
    session::ensure_saved(&config.session_dir)?;

    let options = LaunchOptions::new()
        .headless(config.headless)
        .user_data_dir(&config.session_dir);
    let browser = BrowserSession::launch(options)?;

    let outcome = harvest(&browser, config);

    if let Err(e) = browser.close() {
        log::warn!("Failed to close browser cleanly: {}", e);
    }
    outcome
}

/// Open the posting on `driver` and collect every applicant reachable from it
pub fn harvest<D: Driver + ?Sized>(driver: &D, config: &Config) -> Result<RunOutcome> {
    log::info!("Opening {}", config.job_url);
    driver.navigate(&config.job_url)?;
    session::verify_authenticated(driver)?;

    let finished = Traversal::new(driver, &config.selectors).run()?;
    let state = finished.state;
    log::info!(
        "Traversal finished ({:?}) after {} scans: {} processed, {} skipped",
        finished.reason,
        state.iterations,
        state.processed_count,
        state.skipped
    );

    let screenshot = if state.results.is_empty() {
        match driver.screenshot() {
            Ok(png) => Some(png),
            Err(e) => {
                log::warn!("Could not capture diagnostic screenshot: {}", e);
                None
            }
        }
    } else {
        None
    };

    Ok(RunOutcome {
        records: state.results,
        reason: finished.reason,
        processed: state.processed_count,
        skipped: state.skipped,
        screenshot,
    })
}
