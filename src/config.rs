//! Settings resolved from the process environment

use crate::dom::SelectorMap;
use crate::error::{Result, ScrapeError};
use crate::session::DEFAULT_SESSION_DIR;
use std::path::PathBuf;
use std::time::Duration;

pub const JOB_URL: &str = "JOB_URL";
pub const SESSION_DIR: &str = "SESSION_DIR";
pub const OUTPUT_FILE: &str = "OUTPUT_FILE";
pub const SELECTORS_FILE: &str = "SELECTORS_FILE";
pub const HEADLESS: &str = "HEADLESS";
pub const LOGIN_WAIT_SECS: &str = "LOGIN_WAIT_SECS";

pub const DEFAULT_OUTPUT_FILE: &str = "applicants.txt";
pub const DEFAULT_LOGIN_WAIT_SECS: u64 = 200;

/// Everything a harvesting run needs before the browser starts
#[derive(Debug, Clone)]
pub struct Config {
    /// Applicant list of the job posting
    pub job_url: String,
    pub session_dir: PathBuf,
    pub output_path: PathBuf,
    pub selectors: SelectorMap,
    pub headless: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve settings through `lookup`; unset and blank values are treated alike
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let job_url = get(JOB_URL)
            .ok_or_else(|| ScrapeError::Configuration(format!("{} is not set; add it to the environment or .env", JOB_URL)))?;
        if !(job_url.starts_with("https://") || job_url.starts_with("http://")) {
            return Err(ScrapeError::Configuration(format!(
                "{} must be an http(s) URL, got '{}'",
                JOB_URL, job_url
            )));
        }

        let selectors = match get(SELECTORS_FILE) {
            Some(path) => SelectorMap::from_file(&path)?,
            None => SelectorMap::default(),
        };

        let headless = match get(HEADLESS) {
            Some(value) => parse_bool(HEADLESS, &value)?,
            None => false,
        };

        Ok(Self {
            job_url,
            session_dir: PathBuf::from(get(SESSION_DIR).unwrap_or_else(|| DEFAULT_SESSION_DIR.to_string())),
            output_path: PathBuf::from(get(OUTPUT_FILE).unwrap_or_else(|| DEFAULT_OUTPUT_FILE.to_string())),
            selectors,
            headless,
        })
    }
}

/// Settings for the `save-session` login helper
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub session_dir: PathBuf,
    pub login_wait: Duration,
}

impl SessionConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let login_wait = match get(LOGIN_WAIT_SECS) {
            Some(value) => value.parse::<u64>().map_err(|_| {
                ScrapeError::Configuration(format!("{} must be a number of seconds, got '{}'", LOGIN_WAIT_SECS, value))
            })?,
            None => DEFAULT_LOGIN_WAIT_SECS,
        };

        Ok(Self {
            session_dir: PathBuf::from(get(SESSION_DIR).unwrap_or_else(|| DEFAULT_SESSION_DIR.to_string())),
            login_wait: Duration::from_secs(login_wait),
        })
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ScrapeError::Configuration(format!("{} must be true or false, got '{}'", key, value))),
    }
}
