//! Element snapshots and page structure helpers
//!
//! - ElementNode: tag/attribute snapshot of one element
//! - SelectorMap: semantic role to CSS selector mapping
//! - find_ancestor: bounded upward search from an element

pub mod element;
pub mod selector_map;

pub use element::ElementNode;
pub use selector_map::{Role, SelectorMap};

use crate::driver::{Driver, ElementHandle};
use crate::error::Result;

/// Walk from `start` up through its ancestors, at most `max_depth` hops,
/// and return the first element whose snapshot satisfies `predicate`.
///
/// `start` itself is checked first.
pub fn find_ancestor<D, P>(
    driver: &D,
    start: ElementHandle,
    max_depth: usize,
    predicate: P,
) -> Result<Option<ElementHandle>>
where
    D: Driver + ?Sized,
    P: Fn(&ElementNode) -> bool,
{
    let mut current = start;
    for depth in 0..=max_depth {
        let node = driver.describe(current)?;
        if predicate(&node) {
            log::debug!("Matched {} at depth {}", node.to_simple_string(), depth);
            return Ok(Some(current));
        }
        match driver.parent(current)? {
            Some(parent) => current = parent,
            None => break,
        }
    }
    Ok(None)
}
