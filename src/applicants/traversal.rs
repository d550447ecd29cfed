//! The applicant traversal loop
//!
//! Each pass scans the visible list, picks the next unprocessed applicant,
//! opens their card and contact popover, reads the contact details, closes
//! both panels and records the outcome. When the visible list is used up the
//! loop asks for more entries and stops once none can be loaded.
//!
//! Per-applicant failures ([`ScrapeError::ElementNotFound`]) are logged and
//! the loop moves on. Anything else ends the run.

use crate::applicants::record::{ApplicantRecord, ContactInfo, ProcessedNameSet, normalize_name};
use crate::applicants::{contact, discovery, pagination};
use crate::dom::{self, ElementNode, Role, SelectorMap};
use crate::driver::{Driver, ElementHandle};
use crate::error::{Result, ScrapeError};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Upper bound on scan passes for one run
pub const DEFAULT_ITERATION_BUDGET: usize = 500;

/// How far above the name text the clickable card may sit
pub const MAX_CARD_DEPTH: usize = 6;

/// Fixed waits for the page's asynchronous updates
#[derive(Debug, Clone, PartialEq)]
pub struct Timings {
    /// After clicking "load more"
    pub load_more_settle: Duration,
    /// After clicking an applicant card, before looking for the contact control
    pub detail_settle: Duration,
    /// How long the contact control may take to appear
    pub contact_timeout: Duration,
    /// After opening the contact popover
    pub popover_settle: Duration,
    /// After each dismissal key press
    pub dismiss_settle: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            load_more_settle: Duration::from_millis(2000),
            detail_settle: Duration::from_millis(1500),
            contact_timeout: Duration::from_millis(5000),
            popover_settle: Duration::from_millis(1000),
            dismiss_settle: Duration::from_millis(500),
        }
    }
}

/// What to do with an applicant whose card or contact control could not be opened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryPolicy {
    /// Leave them eligible; every later scan tries again until the budget runs out
    RetryUntilBudget,
    /// Stop selecting them after this many failed attempts
    GiveUpAfter(u32),
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy::GiveUpAfter(3)
    }
}

/// Why the loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Nothing left to visit and no more entries to load
    Exhausted,
    /// The iteration budget was used up
    BudgetReached,
    /// The cancellation flag was raised
    Cancelled,
}

/// Mutable bookkeeping for one run
#[derive(Debug, Clone)]
pub struct TraversalState {
    /// Applicants whose contact popover was opened, recorded or not
    pub processed_count: usize,
    /// Scan passes so far
    pub iterations: usize,
    pub iteration_budget: usize,
    /// Normalized names that will not be selected again
    pub processed: ProcessedNameSet,
    /// Names dropped by [`RetryPolicy::GiveUpAfter`]
    pub abandoned: ProcessedNameSet,
    /// Failed open attempts per normalized name
    pub failed_attempts: HashMap<String, u32>,
    /// Total failed open attempts
    pub skipped: usize,
    pub results: Vec<ApplicantRecord>,
}

impl TraversalState {
    pub fn new(iteration_budget: usize) -> Self {
        Self {
            processed_count: 0,
            iterations: 0,
            iteration_budget,
            processed: ProcessedNameSet::new(),
            abandoned: ProcessedNameSet::new(),
            failed_attempts: HashMap::new(),
            skipped: 0,
            results: Vec::new(),
        }
    }

    /// Record a fully attempted applicant.
    ///
    /// The name is marked processed either way; a record is appended only
    /// when some contact detail was found.
    pub fn record(&mut self, name: &str, contact: ContactInfo) -> Option<&ApplicantRecord> {
        let record = ApplicantRecord::from_contact(name, contact);
        self.processed.insert(name);
        self.processed_count += 1;

        let record = record?;
        self.results.push(record);
        self.results.last()
    }

    /// Count a failed open attempt; returns true when the applicant is now abandoned
    pub fn record_failure(&mut self, name: &str, policy: RetryPolicy) -> bool {
        self.skipped += 1;
        let attempts = {
            let entry = self.failed_attempts.entry(normalize_name(name)).or_insert(0);
            *entry += 1;
            *entry
        };

        match policy {
            RetryPolicy::RetryUntilBudget => false,
            RetryPolicy::GiveUpAfter(limit) if attempts >= limit => {
                self.abandoned.insert(name);
                true
            }
            RetryPolicy::GiveUpAfter(_) => false,
        }
    }

    fn budget_spent(&self) -> bool {
        // every visit follows a scan, so this also bounds processed_count
        self.iterations >= self.iteration_budget
    }
}

/// Final state plus the reason the loop ended
#[derive(Debug, Clone)]
pub struct Finished {
    pub state: TraversalState,
    pub reason: StopReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    CardOpening,
    ContactOpening,
    Extracting,
    Closing,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::CardOpening => "opening applicant card",
            Phase::ContactOpening => "opening contact info",
            Phase::Extracting => "reading contact info",
            Phase::Closing => "closing panels",
        };
        f.write_str(name)
    }
}

/// Drives one page through the applicant list
pub struct Traversal<'a, D: Driver + ?Sized> {
    driver: &'a D,
    selectors: &'a SelectorMap,
    timings: Timings,
    retry: RetryPolicy,
    iteration_budget: usize,
    cancel: Option<Arc<AtomicBool>>,
}

impl<'a, D: Driver + ?Sized> Traversal<'a, D> {
    pub fn new(driver: &'a D, selectors: &'a SelectorMap) -> Self {
        Self {
            driver,
            selectors,
            timings: Timings::default(),
            retry: RetryPolicy::default(),
            iteration_budget: DEFAULT_ITERATION_BUDGET,
            cancel: None,
        }
    }

    pub fn with_timings(mut self, timings: Timings) -> Self {
        self.timings = timings;
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_iteration_budget(mut self, budget: usize) -> Self {
        self.iteration_budget = budget;
        self
    }

    /// Checked before every scan; raising it stops the loop with [`StopReason::Cancelled`]
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Visit applicants until the list is exhausted, the budget is spent or the run is cancelled
    pub fn run(&self) -> Result<Finished> {
        let mut state = TraversalState::new(self.iteration_budget);

        let reason = loop {
            if self.is_cancelled() {
                break StopReason::Cancelled;
            }
            if state.budget_spent() {
                log::warn!("Iteration budget of {} reached", state.iteration_budget);
                break StopReason::BudgetReached;
            }
            state.iterations += 1;

            let mut visible = discovery::scan_visible(self.driver, self.selectors)?;
            visible.retain(|(_, name)| !state.abandoned.contains(name));

            let Some((handle, name)) = discovery::next_unprocessed(&visible, &state.processed) else {
                if pagination::try_load_more(self.driver, self.selectors, self.timings.load_more_settle)? {
                    continue;
                }
                log::info!("No more applicants to load");
                break StopReason::Exhausted;
            };
            let name = name.to_string();

            match self.visit(handle, &name) {
                Ok(contact) => match state.record(&name, contact) {
                    Some(record) => log::info!("Collected {} <{}> {}", record.name, record.email, record.phone),
                    None => log::info!("No contact details shown for {}", name),
                },
                Err((phase, e)) if e.is_recoverable() => {
                    log::warn!("Skipping {}: failed while {}: {}", name, phase, e);
                    if state.record_failure(&name, self.retry) {
                        log::warn!("Giving up on {} after repeated failures", name);
                    }
                }
                Err((phase, e)) => {
                    log::error!(
                        "Browser failed while {} for {}; {} collected applicants are discarded",
                        phase,
                        name,
                        state.results.len()
                    );
                    return Err(e);
                }
            }
        };

        Ok(Finished { state, reason })
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|flag| flag.load(Ordering::SeqCst))
    }

    fn visit(&self, handle: ElementHandle, name: &str) -> std::result::Result<ContactInfo, (Phase, ScrapeError)> {
        self.open_card(handle, name).map_err(|e| (Phase::CardOpening, e))?;
        self.open_contact().map_err(|e| (Phase::ContactOpening, e))?;

        let contact = contact::extract(self.driver, self.selectors);
        // panels are dismissed whatever the extraction produced
        self.close_panels().map_err(|e| (Phase::Closing, e))?;

        contact.map_err(|e| (Phase::Extracting, e))
    }

    fn open_card(&self, handle: ElementHandle, name: &str) -> Result<()> {
        self.driver.scroll_into_view(handle)?;

        let card = dom::find_ancestor(self.driver, handle, MAX_CARD_DEPTH, ElementNode::is_interactive)?
            .ok_or_else(|| {
                ScrapeError::ElementNotFound(format!(
                    "no clickable container within {} levels of '{}'",
                    MAX_CARD_DEPTH, name
                ))
            })?;

        self.driver.click(card)
    }

    fn open_contact(&self) -> Result<()> {
        self.driver.sleep(self.timings.detail_settle);

        let button = self
            .driver
            .wait_for_selector(self.selectors.get(Role::ContactButton), self.timings.contact_timeout)?;
        self.driver.click(button)?;

        self.driver.sleep(self.timings.popover_settle);
        Ok(())
    }

    fn close_panels(&self) -> Result<()> {
        // popover first, then the detail panel
        for _ in 0..2 {
            self.driver.key_press("Escape")?;
            self.driver.sleep(self.timings.dismiss_settle);
        }
        Ok(())
    }
}
