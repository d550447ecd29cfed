//! In-memory applicant list page used by unit tests
//!
//! Layout per applicant `i`:
//! `ul.list > a.card (optional) > div.lockup > span.name`.
//! Clicking the card opens the detail panel, clicking the contact button opens
//! the popover, Escape closes the popover and then the panel.

use crate::dom::{ElementNode, Role, SelectorMap};
use crate::driver::{Driver, ElementHandle};
use crate::error::{Result, ScrapeError};
use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};
use std::time::Duration;

const LIST: u32 = 10;
const CONTACT_BUTTON: u32 = 20;
const POPOVER: u32 = 30;
const EMAIL_LINK: u32 = 31;
const PHONE_FIELD: u32 = 32;
const LOAD_MORE: u32 = 40;
const MESSAGE_BUTTON: u32 = 41;
const NAME_BASE: u32 = 1000;
const LOCKUP_BASE: u32 = 2000;
const CARD_BASE: u32 = 3000;
const SLOTS: u32 = 1000;

#[derive(Debug, Clone)]
pub(crate) struct FakeApplicant {
    name: String,
    email: Option<String>,
    phone: Option<String>,
    clickable_card: bool,
    contact_button: bool,
}

impl FakeApplicant {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            email: None,
            phone: None,
            clickable_card: true,
            contact_button: true,
        }
    }

    pub(crate) fn with_email(mut self, email: &str) -> Self {
        self.email = Some(email.to_string());
        self
    }

    pub(crate) fn with_phone(mut self, phone: &str) -> Self {
        self.phone = Some(phone.to_string());
        self
    }

    pub(crate) fn without_clickable_card(mut self) -> Self {
        self.clickable_card = false;
        self
    }

    pub(crate) fn without_contact_button(mut self) -> Self {
        self.contact_button = false;
        self
    }
}

#[derive(Debug, Default)]
struct FakePage {
    entries: Vec<FakeApplicant>,
    pending: VecDeque<Vec<FakeApplicant>>,
    endless_load_more: bool,
    load_more_label: Option<String>,
    open_detail: Option<usize>,
    popover_open: bool,
    clicks: Vec<ElementHandle>,
    keys: Vec<String>,
    slept: Duration,
    load_more_clicks: usize,
    scans: usize,
    fail_on_scan: Option<usize>,
    location: String,
    navigated: Option<String>,
    closed: bool,
    detached: HashSet<u32>,
}

pub(crate) struct FakeDriver {
    selectors: SelectorMap,
    page: RefCell<FakePage>,
}

fn slot(id: u32, base: u32) -> Option<usize> {
    (base..base + SLOTS).contains(&id).then(|| (id - base) as usize)
}

fn stale(handle: ElementHandle) -> ScrapeError {
    ScrapeError::ElementNotFound(format!("node {} is not attached", handle.id()))
}

impl FakeDriver {
    pub(crate) fn new(entries: Vec<FakeApplicant>) -> Self {
        Self {
            selectors: SelectorMap::new(),
            page: RefCell::new(FakePage {
                entries,
                location: "https://www.linkedin.com/hiring/jobs/1/applicants/".to_string(),
                ..Default::default()
            }),
        }
    }

    /// Entries appended by the next "load more" click
    pub(crate) fn with_pending(self, batch: Vec<FakeApplicant>) -> Self {
        self.page.borrow_mut().pending.push_back(batch);
        self
    }

    /// A "load more" button that never goes away and never adds entries
    pub(crate) fn with_endless_load_more(self) -> Self {
        self.page.borrow_mut().endless_load_more = true;
        self
    }

    pub(crate) fn with_load_more_label(self, label: &str) -> Self {
        self.page.borrow_mut().load_more_label = Some(label.to_string());
        self
    }

    pub(crate) fn with_location(self, url: &str) -> Self {
        self.page.borrow_mut().location = url.to_string();
        self
    }

    /// The n-th (1-based) scan of the applicant list fails as if the browser died
    pub(crate) fn fail_on_scan(self, n: usize) -> Self {
        self.page.borrow_mut().fail_on_scan = Some(n);
        self
    }

    /// Make every later call on `handle` fail as if the node had been detached
    pub(crate) fn detach(&self, handle: ElementHandle) {
        self.page.borrow_mut().detached.insert(handle.id());
    }

    pub(crate) fn selectors(&self) -> &SelectorMap {
        &self.selectors
    }

    pub(crate) fn name_handle(&self, index: usize) -> ElementHandle {
        ElementHandle::new(NAME_BASE + index as u32)
    }

    pub(crate) fn card_handle(&self, index: usize) -> ElementHandle {
        ElementHandle::new(CARD_BASE + index as u32)
    }

    pub(crate) fn contact_button_handle(&self) -> ElementHandle {
        ElementHandle::new(CONTACT_BUTTON)
    }

    pub(crate) fn email_link_handle(&self) -> ElementHandle {
        ElementHandle::new(EMAIL_LINK)
    }

    pub(crate) fn message_button_handle(&self) -> ElementHandle {
        ElementHandle::new(MESSAGE_BUTTON)
    }

    pub(crate) fn visible_names(&self) -> Vec<String> {
        self.page.borrow().entries.iter().map(|a| a.name.clone()).collect()
    }

    pub(crate) fn clicks(&self) -> Vec<ElementHandle> {
        self.page.borrow().clicks.clone()
    }

    pub(crate) fn keys(&self) -> Vec<String> {
        self.page.borrow().keys.clone()
    }

    pub(crate) fn slept(&self) -> Duration {
        self.page.borrow().slept
    }

    pub(crate) fn load_more_clicks(&self) -> usize {
        self.page.borrow().load_more_clicks
    }

    pub(crate) fn popover_open(&self) -> bool {
        self.page.borrow().popover_open
    }

    pub(crate) fn detail_open(&self) -> bool {
        self.page.borrow().open_detail.is_some()
    }

    pub(crate) fn navigated_url(&self) -> Option<String> {
        self.page.borrow().navigated.clone()
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.page.borrow().closed
    }

    fn entry(&self, handle: ElementHandle, base: u32) -> Result<FakeApplicant> {
        slot(handle.id(), base)
            .and_then(|i| self.page.borrow().entries.get(i).cloned())
            .ok_or_else(|| stale(handle))
    }

    fn detail_applicant(&self) -> Option<FakeApplicant> {
        let page = self.page.borrow();
        page.open_detail.and_then(|i| page.entries.get(i).cloned())
    }

    fn contact_available(&self) -> bool {
        self.detail_applicant().is_some_and(|a| a.contact_button)
    }

    fn load_more_visible(&self) -> bool {
        let page = self.page.borrow();
        page.endless_load_more || !page.pending.is_empty()
    }

    fn exists(&self, handle: ElementHandle) -> Result<()> {
        let id = handle.id();
        if self.page.borrow().detached.contains(&id) {
            return Err(stale(handle));
        }
        let found = match id {
            LIST | MESSAGE_BUTTON => true,
            CONTACT_BUTTON => self.contact_available(),
            POPOVER | EMAIL_LINK | PHONE_FIELD => self.popover_open(),
            LOAD_MORE => self.load_more_visible(),
            _ => {
                let len = self.page.borrow().entries.len();
                [NAME_BASE, LOCKUP_BASE, CARD_BASE]
                    .iter()
                    .any(|base| slot(id, *base).is_some_and(|i| i < len))
            }
        };
        if found { Ok(()) } else { Err(stale(handle)) }
    }
}

impl Driver for FakeDriver {
    fn navigate(&self, url: &str) -> Result<()> {
        self.page.borrow_mut().navigated = Some(url.to_string());
        Ok(())
    }

    fn query_all(&self, selector: &str) -> Result<Vec<ElementHandle>> {
        if selector == self.selectors.get(Role::ApplicantName) {
            let mut page = self.page.borrow_mut();
            page.scans += 1;
            if page.fail_on_scan == Some(page.scans) {
                return Err(ScrapeError::DriverFailure("target closed".to_string()));
            }
            return Ok((0..page.entries.len()).map(|i| self.name_handle(i)).collect());
        }

        let ids = if selector == self.selectors.get(Role::ContactPopover) {
            if self.popover_open() { vec![POPOVER] } else { vec![] }
        } else if selector == self.selectors.get(Role::ContactButton) {
            if self.contact_available() { vec![CONTACT_BUTTON] } else { vec![] }
        } else if selector == self.selectors.get(Role::LoadMoreControl) {
            let mut ids = vec![MESSAGE_BUTTON];
            if self.load_more_visible() {
                ids.push(LOAD_MORE);
            }
            ids
        } else {
            vec![]
        };

        Ok(ids.into_iter().map(ElementHandle::new).collect())
    }

    fn query_within(&self, scope: ElementHandle, selector: &str) -> Result<Vec<ElementHandle>> {
        if scope.id() != POPOVER || !self.popover_open() {
            return Err(stale(scope));
        }
        let applicant = self.detail_applicant().ok_or_else(|| stale(scope))?;

        let id = if selector == self.selectors.get(Role::EmailLink) {
            applicant.email.map(|_| EMAIL_LINK)
        } else if selector == self.selectors.get(Role::PhoneField) {
            applicant.phone.map(|_| PHONE_FIELD)
        } else {
            None
        };

        Ok(id.into_iter().map(ElementHandle::new).collect())
    }

    fn element_text(&self, handle: ElementHandle) -> Result<String> {
        self.exists(handle)?;
        let text = match handle.id() {
            CONTACT_BUTTON => "Contact info".to_string(),
            MESSAGE_BUTTON => "Message".to_string(),
            LOAD_MORE => self
                .page
                .borrow()
                .load_more_label
                .clone()
                .unwrap_or_else(|| "Load more".to_string()),
            EMAIL_LINK => self.detail_applicant().and_then(|a| a.email).unwrap_or_default(),
            PHONE_FIELD => self.detail_applicant().and_then(|a| a.phone).unwrap_or_default(),
            id if slot(id, NAME_BASE).is_some() => self.entry(handle, NAME_BASE)?.name,
            _ => String::new(),
        };
        Ok(text)
    }

    fn attribute(&self, handle: ElementHandle, name: &str) -> Result<Option<String>> {
        Ok(self.describe(handle)?.get_attribute(name).cloned())
    }

    fn describe(&self, handle: ElementHandle) -> Result<ElementNode> {
        self.exists(handle)?;
        let id = handle.id();
        let node = match id {
            LIST => ElementNode::new("ul").with_attribute("class", "hiring-applicants__list"),
            CONTACT_BUTTON => ElementNode::new("button").with_attribute("aria-label", "Contact info"),
            POPOVER => ElementNode::new("div").with_attribute("popover", "manual"),
            EMAIL_LINK => {
                let email = self.detail_applicant().and_then(|a| a.email).unwrap_or_default();
                ElementNode::new("a").with_attribute("href", format!("mailto:{}", email))
            }
            PHONE_FIELD => ElementNode::new("span").with_attribute("data-test-contact-phone", ""),
            LOAD_MORE | MESSAGE_BUTTON => ElementNode::new("button"),
            _ if slot(id, NAME_BASE).is_some() => {
                ElementNode::new("span").with_attribute("class", "artdeco-entity-lockup__title")
            }
            _ if slot(id, LOCKUP_BASE).is_some() => {
                ElementNode::new("div").with_attribute("class", "artdeco-entity-lockup")
            }
            _ => {
                let index = slot(id, CARD_BASE).ok_or_else(|| stale(handle))?;
                ElementNode::new("a").with_attribute("href", format!("/hiring/applicants/{}", index))
            }
        };
        Ok(node)
    }

    fn parent(&self, handle: ElementHandle) -> Result<Option<ElementHandle>> {
        self.exists(handle)?;
        let id = handle.id();
        let parent = if let Some(i) = slot(id, NAME_BASE) {
            Some(LOCKUP_BASE + i as u32)
        } else if let Some(i) = slot(id, LOCKUP_BASE) {
            let applicant = self.entry(ElementHandle::new(NAME_BASE + i as u32), NAME_BASE)?;
            Some(if applicant.clickable_card { CARD_BASE + i as u32 } else { LIST })
        } else if slot(id, CARD_BASE).is_some() {
            Some(LIST)
        } else {
            None
        };
        Ok(parent.map(ElementHandle::new))
    }

    fn scroll_into_view(&self, handle: ElementHandle) -> Result<()> {
        self.exists(handle)
    }

    fn click(&self, handle: ElementHandle) -> Result<()> {
        self.exists(handle)?;
        let id = handle.id();

        if id == CONTACT_BUTTON {
            self.page.borrow_mut().popover_open = true;
        } else if id == LOAD_MORE {
            let mut page = self.page.borrow_mut();
            page.load_more_clicks += 1;
            if let Some(batch) = page.pending.pop_front() {
                page.entries.extend(batch);
            }
        } else if let Some(i) = slot(id, CARD_BASE) {
            let mut page = self.page.borrow_mut();
            page.open_detail = Some(i);
            page.popover_open = false;
        }

        self.page.borrow_mut().clicks.push(handle);
        Ok(())
    }

    fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<ElementHandle> {
        self.query_all(selector)?
            .into_iter()
            .next()
            .ok_or_else(|| ScrapeError::ElementNotFound(format!("'{}' not found within {:?}", selector, timeout)))
    }

    fn evaluate(&self, _script: &str) -> Result<serde_json::Value> {
        Ok(serde_json::Value::String(self.page.borrow().location.clone()))
    }

    fn key_press(&self, key: &str) -> Result<()> {
        let mut page = self.page.borrow_mut();
        if key == "Escape" {
            if page.popover_open {
                page.popover_open = false;
            } else {
                page.open_detail = None;
            }
        }
        page.keys.push(key.to_string());
        Ok(())
    }

    fn sleep(&self, duration: Duration) {
        self.page.borrow_mut().slept += duration;
    }

    fn screenshot(&self) -> Result<Vec<u8>> {
        Ok(vec![0x89, b'P', b'N', b'G'])
    }

    fn close(&self) -> Result<()> {
        self.page.borrow_mut().closed = true;
        Ok(())
    }
}
