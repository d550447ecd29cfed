//! Saved login session
//!
//! The session is a Chrome profile directory. `save-session` fills it by
//! letting the user log in by hand; the harvester reuses it as its
//! `--user-data-dir`.

use crate::browser::{BrowserSession, LaunchOptions};
use crate::driver::Driver;
use crate::error::{Result, ScrapeError};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_SESSION_DIR: &str = "auth-profile";

pub const LOGIN_URL: &str = "https://www.linkedin.com/login";

/// Path fragments of pages that ask for credentials
const LOGIN_MARKERS: &[&str] = &["/login", "/authwall", "/checkpoint", "/uas/"];

fn remediation(dir: &Path) -> String {
    format!(
        "no saved session in '{}'. Run `save-session` and log in within the browser window first",
        dir.display()
    )
}

/// Fail with `SessionMissing` unless `dir` holds a saved profile
pub fn ensure_saved(dir: &Path) -> Result<()> {
    let mut entries = std::fs::read_dir(dir).map_err(|_| ScrapeError::SessionMissing(remediation(dir)))?;

    if entries.next().is_none() {
        return Err(ScrapeError::SessionMissing(remediation(dir)));
    }
    Ok(())
}

/// Whether `url` is one of the site's login or verification pages
pub fn is_login_page(url: &str) -> bool {
    let lower = url.to_lowercase();
    LOGIN_MARKERS.iter().any(|marker| lower.contains(marker))
}

/// Check that the page we landed on is not a login redirect
pub fn verify_authenticated<D: Driver + ?Sized>(driver: &D) -> Result<()> {
    let location = driver.evaluate("window.location.href")?;
    let url = location.as_str().unwrap_or_default();

    if is_login_page(url) {
        return Err(ScrapeError::SessionMissing(format!(
            "redirected to {}; the saved session has expired. Run `save-session` again",
            url
        )));
    }
    Ok(())
}

/// Open the login page in a visible browser using `dir` as profile and
/// wait `login_wait` for the user to sign in.
pub fn bootstrap(dir: &Path, login_wait: Duration) -> Result<()> {
    std::fs::create_dir_all(dir)?;

    let session = BrowserSession::launch(LaunchOptions::new().headless(false).user_data_dir(dir))?;
    session.navigate(LOGIN_URL)?;

    log::info!("Log in within the browser window; waiting {} seconds", login_wait.as_secs());
    session.sleep(login_wait);

    session.close()?;
    log::info!("Session saved to {}", dir.display());
    Ok(())
}
