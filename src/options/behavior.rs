use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Behavior", inline)]
#[serde(default)]
/// Cycle, ordering and activation policy.
pub struct BehaviorOptions {
    /// Restart at the first string after the last one is erased.
    #[serde(rename = "loop")]
    #[schemars(title = "Loop")]
    pub looping: bool,
    /// Type each string back to front.
    #[schemars(title = "Reverse")]
    pub reverse_mode: bool,
    /// Defer activation until the element scrolls into view.
    #[schemars(title = "Start On Visible")]
    pub start_on_visible: bool,
    /// Minimum intersection ratio that counts as visible.
    #[schemars(title = "Visibility Threshold", range(min = 0.0, max = 1.0), extend("step" = 0.05))]
    pub visibility_threshold: f32,
}

impl Default for BehaviorOptions {
    fn default() -> Self {
        Self {
            looping: true,
            reverse_mode: false,
            start_on_visible: false,
            visibility_threshold: 0.1,
        }
    }
}
