use indexmap::IndexSet;

/// Placeholder written for a contact field that could not be found
pub const NOT_PROVIDED: &str = "not provided";

/// Lower-cased, trimmed form used to compare applicant names
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Best-effort contact details read from the contact popover
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactInfo {
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl ContactInfo {
    pub fn new(email: Option<String>, phone: Option<String>) -> Self {
        Self { email, phone }
    }

    /// Neither field was found
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.phone.is_none()
    }
}

/// One collected applicant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicantRecord {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl ApplicantRecord {
    /// Build a record when at least one contact field was found.
    ///
    /// Missing fields become [`NOT_PROVIDED`]; a blank name yields `None`.
    pub fn from_contact(name: &str, contact: ContactInfo) -> Option<Self> {
        let name = name.trim();
        if name.is_empty() || contact.is_empty() {
            return None;
        }

        Some(Self {
            name: name.to_string(),
            email: contact.email.unwrap_or_else(|| NOT_PROVIDED.to_string()),
            phone: contact.phone.unwrap_or_else(|| NOT_PROVIDED.to_string()),
        })
    }
}

/// Normalized names of applicants already attempted during this run.
///
/// Only grows; there is no removal API.
#[derive(Debug, Clone, Default)]
pub struct ProcessedNameSet {
    names: IndexSet<String>,
}

impl ProcessedNameSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `name`; returns false if its normalized form was already present
    pub fn insert(&mut self, name: &str) -> bool {
        self.names.insert(normalize_name(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(&normalize_name(name))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Normalized names in the order they were recorded
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}
