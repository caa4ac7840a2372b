use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Inclusive range for randomized per-character typing delays.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Variable Speed", inline)]
pub struct SpeedRangeOptions {
    /// Shortest per-character delay in milliseconds.
    #[schemars(title = "Min (ms)", range(min = 1.0, max = 500.0))]
    pub min_ms: f64,
    /// Longest per-character delay in milliseconds.
    #[schemars(title = "Max (ms)", range(min = 1.0, max = 500.0))]
    pub max_ms: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Timing", inline)]
#[serde(default)]
/// Per-character cadence and hold times, in milliseconds.
pub struct TimingOptions {
    /// Delay between typed characters.
    #[schemars(title = "Typing Speed (ms)", range(min = 1.0, max = 500.0), extend("step" = 1.0))]
    pub typing_speed_ms: f64,
    /// Delay between erased characters.
    #[schemars(title = "Deleting Speed (ms)", range(min = 1.0, max = 500.0), extend("step" = 1.0))]
    pub deleting_speed_ms: f64,
    /// Hold before the first character after activation.
    #[schemars(title = "Initial Delay (ms)", range(min = 0.0, max = 10000.0), extend("step" = 50.0))]
    pub initial_delay_ms: f64,
    /// Hold after a string finishes typing and after it finishes erasing.
    #[schemars(title = "Pause (ms)", range(min = 0.0, max = 20000.0), extend("step" = 50.0))]
    pub pause_duration_ms: f64,
    /// Random typing delay range. Overrides `typing_speed_ms` when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variable_speed: Option<SpeedRangeOptions>,
}

impl Default for TimingOptions {
    fn default() -> Self {
        Self {
            typing_speed_ms: 50.0,
            deleting_speed_ms: 30.0,
            initial_delay_ms: 0.0,
            pause_duration_ms: 2000.0,
            variable_speed: None,
        }
    }
}
