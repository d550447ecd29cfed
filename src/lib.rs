//! # applicant-harvest
//!
//! Collects applicant names, emails and phone numbers from a job posting's
//! applicant list by driving Chrome over the Chrome DevTools Protocol (CDP).
//!
//! The applicant list has no public API, so the harvester works the page the
//! way a recruiter would: it opens each applicant's card, reveals the contact
//! popover, reads it, closes both panels and moves on, clicking "load more"
//! whenever the visible entries run out.
//!
//! ## Command line
//!
//! ```bash
//! # Once: log in by hand and keep the browser profile
//! cargo run --bin save-session
//!
//! # Then, with JOB_URL set in the environment or .env
//! cargo run --bin applicant-harvest
//! ```
//!
//! ## Library Usage
//!
//! ```rust,no_run
//! use applicant_harvest::{BrowserSession, Driver, LaunchOptions, SelectorMap, Traversal};
//!
//! # fn main() -> applicant_harvest::Result<()> {
//! let session = BrowserSession::launch(LaunchOptions::new().user_data_dir("auth-profile"))?;
//! session.navigate("https://www.linkedin.com/hiring/jobs/123/applicants/")?;
//!
//! let selectors = SelectorMap::default();
//! let finished = Traversal::new(&session, &selectors).run()?;
//! for record in &finished.state.results {
//!     println!("{} <{}> {}", record.name, record.email, record.phone);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`applicants`]: discovery, pagination, contact extraction and the traversal loop
//! - [`browser`]: Chrome launch options and the CDP-backed [`Driver`]
//! - [`driver`]: the browser operations the core depends on
//! - [`dom`]: element snapshots, role selectors and ancestor search
//! - [`config`], [`session`], [`report`], [`harvest`]: the surrounding run
//! - [`error`]: Error types and result aliases

pub mod applicants;
pub mod browser;
pub mod config;
pub mod dom;
pub mod driver;
pub mod error;
pub mod harvest;
pub mod report;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

pub use applicants::{ApplicantRecord, ContactInfo, Finished, RetryPolicy, StopReason, Traversal, TraversalState};
pub use browser::{BrowserSession, LaunchOptions};
pub use config::{Config, SessionConfig};
pub use dom::{ElementNode, Role, SelectorMap};
pub use driver::{Driver, ElementHandle};
pub use error::{Result, ScrapeError};
pub use harvest::RunOutcome;
