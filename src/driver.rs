//! The browser capabilities the harvesting core relies on
//!
//! [`BrowserSession`](crate::BrowserSession) implements [`Driver`] over the Chrome
//! DevTools Protocol. Everything in [`applicants`](crate::applicants) is written
//! against the trait so it can run against an in-memory page in tests.

use crate::dom::ElementNode;
use crate::error::Result;
use std::time::Duration;

/// Opaque reference to one element on the current page.
///
/// A handle is only valid until the document is next queried or mutated
/// (a click, a panel opening or closing, a page load). Re-acquire handles
/// on every scan instead of holding on to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementHandle(u32);

impl ElementHandle {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u32 {
        self.0
    }
}

/// Synchronous browser operations against a single page.
///
/// Element-scoped operations report failures as
/// [`ScrapeError::ElementNotFound`](crate::ScrapeError::ElementNotFound); page-scoped
/// ones report [`ScrapeError::DriverFailure`](crate::ScrapeError::DriverFailure).
pub trait Driver {
    /// Load `url` and wait for navigation to finish
    fn navigate(&self, url: &str) -> Result<()>;

    /// All elements matching `selector`, in document order. No match is an empty list.
    fn query_all(&self, selector: &str) -> Result<Vec<ElementHandle>>;

    /// Descendants of `scope` matching `selector`, in document order
    fn query_within(&self, scope: ElementHandle, selector: &str) -> Result<Vec<ElementHandle>>;

    /// Rendered text of the element
    fn element_text(&self, handle: ElementHandle) -> Result<String>;

    fn attribute(&self, handle: ElementHandle, name: &str) -> Result<Option<String>>;

    /// Tag and attribute snapshot of the element
    fn describe(&self, handle: ElementHandle) -> Result<ElementNode>;

    /// Parent element, or `None` at the document root
    fn parent(&self, handle: ElementHandle) -> Result<Option<ElementHandle>>;

    fn scroll_into_view(&self, handle: ElementHandle) -> Result<()>;

    fn click(&self, handle: ElementHandle) -> Result<()>;

    /// Wait until `selector` matches, failing with `ElementNotFound` after `timeout`
    fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<ElementHandle>;

    /// Evaluate a script in the page and return its JSON value
    fn evaluate(&self, script: &str) -> Result<serde_json::Value>;

    /// Dispatch a key press (e.g. `"Escape"`) to the focused element
    fn key_press(&self, key: &str) -> Result<()>;

    /// Block the calling thread while the page settles
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }

    /// PNG capture of the visible viewport
    fn screenshot(&self) -> Result<Vec<u8>>;

    fn close(&self) -> Result<()>;
}
