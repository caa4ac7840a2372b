use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Root element, class names and per-string colors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Style", inline)]
#[serde(default)]
pub struct StyleOptions {
    /// Tag of the root element (`div`, `h2`, `span`, ...).
    #[schemars(title = "Element")]
    pub tag: String,
    /// Extra class names for the root element.
    #[schemars(skip)]
    pub class_name: String,
    /// CSS colors cycled per string index.
    #[schemars(title = "Text Colors")]
    pub text_colors: Vec<String>,
    /// Attributes passed through verbatim to the root element.
    #[schemars(skip)]
    pub attributes: BTreeMap<String, String>,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self {
            tag: "div".to_owned(),
            class_name: String::new(),
            text_colors: Vec::new(),
            attributes: BTreeMap::new(),
        }
    }
}

impl StyleOptions {
    /// Color for the string at `text_index`, cycling through the list.
    #[must_use]
    pub fn color_for(&self, text_index: usize) -> Option<&str> {
        if self.text_colors.is_empty() {
            return None;
        }
        self.text_colors
            .get(text_index % self.text_colors.len())
            .map(String::as_str)
    }
}
