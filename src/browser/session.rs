use crate::{browser::config::LaunchOptions,
            dom::ElementNode,
            driver::{Driver, ElementHandle},
            error::{Result, ScrapeError}};
use headless_chrome::{Browser, Element, Tab, protocol::cdp::{DOM, Page}};
use std::{ffi::OsStr, sync::Arc, time::Duration};

/// Browser session that drives a single tab of a Chrome/Chromium instance
pub struct BrowserSession {
    /// The underlying headless_chrome Browser instance
    browser: Browser,

    /// The one tab every operation runs against
    tab: Arc<Tab>,
}

impl BrowserSession {
    /// Launch a new browser instance with the given options
    pub fn launch(options: LaunchOptions) -> Result<Self> {
        let mut launch_opts = headless_chrome::LaunchOptions::default();

        // Ignore default arguments to prevent detection by anti-bot services
        launch_opts.ignore_default_args.push(OsStr::new("--enable-automation"));
        launch_opts.args.push(OsStr::new("--disable-blink-features=AutomationControlled"));

        // Manual logins and long applicant lists outlast the 30 second default
        launch_opts.idle_browser_timeout = Duration::from_secs(60 * 60);

        launch_opts.headless = options.headless;
        launch_opts.window_size = Some((options.window_width, options.window_height));

        if let Some(path) = options.chrome_path {
            launch_opts.path = Some(path);
        }

        if let Some(dir) = options.user_data_dir {
            launch_opts.user_data_dir = Some(dir);
        }

        launch_opts.sandbox = options.sandbox;

        let browser = Browser::new(launch_opts).map_err(|e| ScrapeError::LaunchFailed(e.to_string()))?;

        let tab = browser
            .new_tab()
            .map_err(|e| ScrapeError::LaunchFailed(format!("Failed to create tab: {}", e)))?;

        Ok(Self { browser, tab })
    }

    fn element(&self, handle: ElementHandle) -> Result<Element<'_>> {
        Element::new(&self.tab, handle.id())
            .map_err(|e| ScrapeError::element(format!("Node {} is no longer attached", handle.id()), e))
    }

    fn select_all(&self, scope: u32, selector: &str) -> anyhow::Result<Vec<ElementHandle>> {
        let result = self.tab.call_method(DOM::QuerySelectorAll { node_id: scope, selector: selector.to_string() })?;
        Ok(result.node_ids.into_iter().map(ElementHandle::new).collect())
    }
}

impl Driver for BrowserSession {
    fn navigate(&self, url: &str) -> Result<()> {
        self.tab
            .navigate_to(url)
            .map_err(|e| ScrapeError::NavigationFailed(format!("Failed to navigate to {}: {}", url, e)))?;

        self.tab
            .wait_until_navigated()
            .map_err(|e| ScrapeError::NavigationFailed(format!("Navigation timeout: {}", e)))?;

        Ok(())
    }

    fn query_all(&self, selector: &str) -> Result<Vec<ElementHandle>> {
        let document = self
            .tab
            .call_method(DOM::GetDocument { depth: Some(0), pierce: Some(false) })
            .map_err(|e| ScrapeError::driver("Failed to read document", e))?;

        self.select_all(document.root.node_id, selector)
            .map_err(|e| ScrapeError::driver(format!("Query '{}' failed", selector), e))
    }

    fn query_within(&self, scope: ElementHandle, selector: &str) -> Result<Vec<ElementHandle>> {
        self.select_all(scope.id(), selector)
            .map_err(|e| ScrapeError::element(format!("Query '{}' in node {} failed", selector, scope.id()), e))
    }

    fn element_text(&self, handle: ElementHandle) -> Result<String> {
        self.element(handle)?
            .get_inner_text()
            .map_err(|e| ScrapeError::element("Failed to read element text", e))
    }

    fn attribute(&self, handle: ElementHandle, name: &str) -> Result<Option<String>> {
        Ok(self.describe(handle)?.get_attribute(name).cloned())
    }

    fn describe(&self, handle: ElementHandle) -> Result<ElementNode> {
        let element = self.element(handle)?;
        let attributes = element.attributes.clone().unwrap_or_default();
        Ok(ElementNode::from_flat_attributes(&element.tag_name, &attributes))
    }

    fn parent(&self, handle: ElementHandle) -> Result<Option<ElementHandle>> {
        let parent = self
            .element(handle)?
            .call_js_fn("function() { return this.parentElement; }", vec![], false)
            .map_err(|e| ScrapeError::element("Failed to read parent element", e))?;

        // null parent: no remote object to resolve
        let Some(object_id) = parent.object_id else {
            return Ok(None);
        };

        let node = self
            .tab
            .call_method(DOM::RequestNode { object_id })
            .map_err(|e| ScrapeError::element("Failed to resolve parent element", e))?;

        Ok(Some(ElementHandle::new(node.node_id)))
    }

    fn scroll_into_view(&self, handle: ElementHandle) -> Result<()> {
        self.element(handle)?
            .scroll_into_view()
            .map_err(|e| ScrapeError::element("Failed to scroll element into view", e))?;
        Ok(())
    }

    fn click(&self, handle: ElementHandle) -> Result<()> {
        self.element(handle)?
            .click()
            .map_err(|e| ScrapeError::element("Failed to click element", e))?;
        Ok(())
    }

    fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<ElementHandle> {
        let element = self
            .tab
            .wait_for_element_with_custom_timeout(selector, timeout)
            .map_err(|e| ScrapeError::element(format!("'{}' did not appear within {:?}", selector, timeout), e))?;
        Ok(ElementHandle::new(element.node_id))
    }

    fn evaluate(&self, script: &str) -> Result<serde_json::Value> {
        let result = self
            .tab
            .evaluate(script, false)
            .map_err(|e| ScrapeError::driver("Failed to evaluate script", e))?;

        Ok(result.value.unwrap_or(serde_json::Value::Null))
    }

    fn key_press(&self, key: &str) -> Result<()> {
        self.tab
            .press_key(key)
            .map_err(|e| ScrapeError::driver(format!("Failed to press {}", key), e))?;
        Ok(())
    }

    fn screenshot(&self) -> Result<Vec<u8>> {
        self.tab
            .capture_screenshot(Page::CaptureScreenshotFormatOption::Png, None, None, true)
            .map_err(|e| ScrapeError::driver("Failed to capture screenshot", e))
    }

    /// Close the tab; the browser process exits when the session is dropped
    fn close(&self) -> Result<()> {
        let tabs = self
            .browser
            .get_tabs()
            .lock()
            .map_err(|e| ScrapeError::DriverFailure(format!("Failed to get tabs: {}", e)))?
            .clone();

        for tab in tabs {
            if let Err(e) = tab.close(false) {
                log::debug!("Failed to close tab {}: {}", tab.get_target_id(), e);
            }
        }
        Ok(())
    }
}
