//! Reads email and phone out of an open contact popover

use crate::applicants::record::ContactInfo;
use crate::dom::{Role, SelectorMap};
use crate::driver::{Driver, ElementHandle};
use crate::error::Result;

const MAILTO: &str = "mailto:";

/// Read whatever contact details the popover shows.
///
/// Each field is looked up independently; a missing popover or a missing
/// field yields `None` rather than an error. Values are trimmed but
/// otherwise returned as displayed.
pub fn extract<D: Driver + ?Sized>(driver: &D, selectors: &SelectorMap) -> Result<ContactInfo> {
    let Some(popover) = driver.query_all(selectors.get(Role::ContactPopover))?.into_iter().next() else {
        log::debug!("No contact popover on the page");
        return Ok(ContactInfo::default());
    };

    let email = best_effort(extract_email(driver, popover, selectors))?;
    let phone = best_effort(extract_phone(driver, popover, selectors))?;

    Ok(ContactInfo::new(email, phone))
}

/// Address portion of a `mailto:` href, without any `?subject=` query.
///
/// Links with any other scheme are not email addresses and yield `None`.
pub fn email_from_href(href: &str) -> Option<String> {
    let href = href.trim();
    let rest = match href.get(..MAILTO.len()) {
        Some(scheme) if scheme.eq_ignore_ascii_case(MAILTO) => &href[MAILTO.len()..],
        _ => return None,
    };
    let address = rest.split('?').next().unwrap_or_default().trim();
    non_empty(address)
}

fn extract_email<D: Driver + ?Sized>(
    driver: &D,
    popover: ElementHandle,
    selectors: &SelectorMap,
) -> Result<Option<String>> {
    let Some(link) = driver.query_within(popover, selectors.get(Role::EmailLink))?.into_iter().next() else {
        return Ok(None);
    };

    match driver.attribute(link, "href")? {
        Some(href) => {
            let email = email_from_href(&href);
            if email.is_none() {
                log::debug!("Ignoring non-mailto link '{}' in contact popover", href);
            }
            Ok(email)
        }
        None => Ok(non_empty(driver.element_text(link)?.trim())),
    }
}

fn extract_phone<D: Driver + ?Sized>(
    driver: &D,
    popover: ElementHandle,
    selectors: &SelectorMap,
) -> Result<Option<String>> {
    let Some(field) = driver.query_within(popover, selectors.get(Role::PhoneField))?.into_iter().next() else {
        return Ok(None);
    };

    Ok(non_empty(driver.element_text(field)?.trim()))
}

/// Lookup failures inside the popover count as "not found"
fn best_effort(result: Result<Option<String>>) -> Result<Option<String>> {
    match result {
        Err(e) if e.is_recoverable() => {
            log::debug!("Contact field unavailable: {}", e);
            Ok(None)
        }
        other => other,
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() { None } else { Some(value.to_string()) }
}
