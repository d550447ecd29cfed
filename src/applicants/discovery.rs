//! Picks the next applicant to visit from the visible list

use crate::applicants::record::{ProcessedNameSet, normalize_name};
use crate::dom::{Role, SelectorMap};
use crate::driver::{Driver, ElementHandle};
use crate::error::Result;

/// Labels that share the name selector but belong to the list's chrome
pub const STOPLIST: &[&str] = &[
    "applicants",
    "applicant",
    "all applicants",
    "filter",
    "filters",
    "all filters",
    "sort by",
    "sort",
    "reset",
    "rating",
    "good fit",
    "maybe",
    "not a fit",
    "unrated",
    "message",
    "show more",
    "show less",
    "load more",
    "more",
];

/// Names this short are initials or badges, not applicants
const MIN_NAME_CHARS: usize = 3;

/// Whether a visible name is a candidate at all, before dedup
pub fn is_candidate_name(name: &str) -> bool {
    let normalized = normalize_name(name);
    normalized.chars().count() >= MIN_NAME_CHARS && !STOPLIST.contains(&normalized.as_str())
}

/// First visible entry that is a real applicant and has not been processed.
///
/// Pure and deterministic: the same snapshot and set always give the same answer.
pub fn next_unprocessed<'a, H: Copy>(
    visible: &'a [(H, String)],
    processed: &ProcessedNameSet,
) -> Option<(H, &'a str)> {
    visible
        .iter()
        .find(|(_, name)| is_candidate_name(name) && !processed.contains(name))
        .map(|(handle, name)| (*handle, name.trim()))
}

/// Snapshot of the name entries currently in the list, in page order.
///
/// Entries whose text cannot be read (gone stale mid-scan) are left out.
pub fn scan_visible<D: Driver + ?Sized>(
    driver: &D,
    selectors: &SelectorMap,
) -> Result<Vec<(ElementHandle, String)>> {
    let handles = driver.query_all(selectors.get(Role::ApplicantName))?;
    let mut visible = Vec::with_capacity(handles.len());

    for handle in handles {
        match driver.element_text(handle) {
            Ok(text) => visible.push((handle, text)),
            Err(e) if e.is_recoverable() => log::debug!("Skipping unreadable list entry: {}", e),
            Err(e) => return Err(e),
        }
    }

    Ok(visible)
}
