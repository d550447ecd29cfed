use crate::error::Result;
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::Path;

/// The page elements the harvester needs to locate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Name text of each entry in the applicant list
    ApplicantName,
    /// Control in the detail panel that discloses contact info
    ContactButton,
    /// Manually presented overlay holding the contact details
    ContactPopover,
    /// `mailto:` link inside the popover
    EmailLink,
    /// Phone number element inside the popover
    PhoneField,
    /// Candidates for the list's "load more" control
    LoadMoreControl,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::ApplicantName,
        Role::ContactButton,
        Role::ContactPopover,
        Role::EmailLink,
        Role::PhoneField,
        Role::LoadMoreControl,
    ];

    fn default_selector(self) -> &'static str {
        match self {
            Role::ApplicantName => ".hiring-applicants__list-item .artdeco-entity-lockup__title",
            Role::ContactButton => "button[aria-label*='contact info' i]",
            Role::ContactPopover => "[popover='manual']",
            Role::EmailLink => "a[href^='mailto:']",
            Role::PhoneField => "[data-test-contact-phone], a[href^='tel:']",
            Role::LoadMoreControl => "button",
        }
    }
}

/// Map of semantic roles to CSS selectors
/// Uses IndexMap to keep roles in declaration order
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorMap {
    map: IndexMap<Role, String>,
}

impl Default for SelectorMap {
    fn default() -> Self {
        Self {
            map: Role::ALL
                .iter()
                .map(|role| (*role, role.default_selector().to_string()))
                .collect(),
        }
    }
}

impl SelectorMap {
    /// Built-in selectors for the applicant list
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults with the roles named in a JSON object replaced,
    /// e.g. `{"phone_field": "span.phone"}`
    pub fn from_json(json: &str) -> Result<Self> {
        let overrides: IndexMap<Role, String> = serde_json::from_str(json)?;
        let mut map = Self::default();
        for (role, selector) in overrides {
            map.set(role, selector);
        }
        Ok(map)
    }

    /// Load overrides from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Selector for `role`
    pub fn get(&self, role: Role) -> &str {
        self.map
            .get(&role)
            .map(String::as_str)
            .unwrap_or_else(|| role.default_selector())
    }

    /// Replace the selector for `role`
    pub fn set(&mut self, role: Role, selector: impl Into<String>) {
        self.map.insert(role, selector.into());
    }

    /// Builder method: replace the selector for `role`
    pub fn with(mut self, role: Role, selector: impl Into<String>) -> Self {
        self.set(role, selector);
        self
    }
}
