use std::collections::HashMap;

/// Snapshot of a single DOM element, without its subtree or text
#[derive(Debug, Clone, PartialEq)]
pub struct ElementNode {
    /// Lower-cased HTML tag name (e.g., "div", "button", "a")
    pub tag_name: String,

    /// Element attributes (e.g., id, class, href, role)
    pub attributes: HashMap<String, String>,
}

impl ElementNode {
    /// Create a new ElementNode
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into().to_ascii_lowercase(),
            attributes: HashMap::new(),
        }
    }

    /// Build a node from the flattened `[name, value, name, value, ...]` list CDP reports
    pub fn from_flat_attributes(tag_name: impl Into<String>, flat: &[String]) -> Self {
        let mut node = Self::new(tag_name);
        for pair in flat.chunks(2) {
            if let [name, value] = pair {
                node.add_attribute(name.as_str(), value.as_str());
            }
        }
        node
    }

    /// Builder method: set a single attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.add_attribute(key, value);
        self
    }

    /// Add a single attribute
    pub fn add_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Get attribute value by key
    pub fn get_attribute(&self, key: &str) -> Option<&String> {
        self.attributes.get(key)
    }

    /// Check if element is a specific tag
    pub fn is_tag(&self, tag: &str) -> bool {
        self.tag_name.eq_ignore_ascii_case(tag)
    }

    /// Whether clicking this element is expected to do something
    pub fn is_interactive(&self) -> bool {
        let interactive_tags = ["button", "a", "input", "select", "textarea", "label"];

        let tag_is_interactive = interactive_tags.iter().any(|&tag| self.is_tag(tag));

        let has_event_handler = self.attributes.keys().any(|k| k.starts_with("on"));

        let has_clickable_role = self
            .get_attribute("role")
            .is_some_and(|r| ["button", "link", "tab", "menuitem"].contains(&r.as_str()));

        // tabindex="-1" only makes an element programmatically focusable
        let is_focusable = self
            .get_attribute("tabindex")
            .and_then(|t| t.trim().parse::<i32>().ok())
            .is_some_and(|t| t >= 0);

        tag_is_interactive || has_event_handler || has_clickable_role || is_focusable
    }

    /// Short `<tag id=".." class="..">` form for log lines
    pub fn to_simple_string(&self) -> String {
        let mut parts = vec![format!("<{}", self.tag_name)];

        if let Some(id) = self.get_attribute("id") {
            parts.push(format!(" id=\"{}\"", id));
        }

        if let Some(class) = self.attributes.get("class") {
            parts.push(format!(" class=\"{}\"", class));
        }

        parts.push(">".to_string());
        parts.join("")
    }
}
