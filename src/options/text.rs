use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The strings to animate: a single string or an ordered list.
///
/// A single string behaves exactly like a one-element list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(untagged)]
pub enum TextSource {
    /// One string, typed once or cycled on its own.
    Single(String),
    /// Strings cycled in order.
    Many(Vec<String>),
}

impl Default for TextSource {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

impl TextSource {
    /// Owned copy of the strings, in order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            Self::Single(text) => vec![text.clone()],
            Self::Many(texts) => texts.clone(),
        }
    }

    /// Number of strings in the sequence.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Many(texts) => texts.len(),
        }
    }

    /// Whether there is nothing to animate.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Last string of the sequence, if any.
    #[must_use]
    pub fn last(&self) -> Option<&str> {
        match self {
            Self::Single(text) => Some(text.as_str()),
            Self::Many(texts) => texts.last().map(String::as_str),
        }
    }
}

impl From<&str> for TextSource {
    fn from(text: &str) -> Self {
        Self::Single(text.to_owned())
    }
}

impl From<Vec<String>> for TextSource {
    fn from(texts: Vec<String>) -> Self {
        Self::Many(texts)
    }
}
