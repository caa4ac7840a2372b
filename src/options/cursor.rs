use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Cursor", inline)]
#[serde(default)]
/// Caret glyph and display policy.
pub struct CursorOptions {
    /// Whether the caret is rendered at all.
    #[schemars(title = "Show Cursor")]
    pub show: bool,
    /// Hide the caret while characters are being typed or erased.
    #[schemars(title = "Hide While Typing")]
    pub hide_while_typing: bool,
    /// Glyph used for the caret.
    #[schemars(title = "Character")]
    pub character: String,
    /// Extra class names for the caret node.
    #[schemars(skip)]
    pub class_name: String,
    /// Half of a full blink period, in seconds.
    #[schemars(title = "Blink Duration (s)", range(min = 0.1, max = 2.0), extend("step" = 0.05))]
    pub blink_duration_secs: f32,
}

impl Default for CursorOptions {
    fn default() -> Self {
        Self {
            show: true,
            hide_while_typing: false,
            character: "|".to_owned(),
            class_name: String::new(),
            blink_duration_secs: 0.5,
        }
    }
}
