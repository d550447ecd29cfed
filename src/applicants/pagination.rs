//! Asks the list for more entries once every visible one has been handled

use crate::dom::{Role, SelectorMap};
use crate::driver::Driver;
use crate::error::Result;
use std::time::Duration;

const LOAD_MORE_TEXT: &str = "load more";

/// Click the list's "load more" control if there is one.
///
/// Returns `true` after clicking and waiting `settle`; the caller should
/// re-scan. `false` means no further entries can be requested.
pub fn try_load_more<D: Driver + ?Sized>(driver: &D, selectors: &SelectorMap, settle: Duration) -> Result<bool> {
    let controls = driver.query_all(selectors.get(Role::LoadMoreControl))?;

    for control in controls {
        let text = match driver.element_text(control) {
            Ok(text) => text,
            Err(e) if e.is_recoverable() => continue,
            Err(e) => return Err(e),
        };

        if !text.to_lowercase().contains(LOAD_MORE_TEXT) {
            continue;
        }

        driver.scroll_into_view(control)?;
        driver.click(control)?;
        log::info!("Requested more applicants, waiting {:?}", settle);
        driver.sleep(settle);
        return Ok(true);
    }

    Ok(false)
}
