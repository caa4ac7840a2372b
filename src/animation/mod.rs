//! Typewriter animation: configuration, state and the tick state machine.
//!
//! - `AnimationConfig`: validated, immutable session configuration
//! - `AnimationState`: per-instance progress and frame timing
//! - `TypingEngine`: advances the state once per display refresh
//! - `VisibilityGate`: defers activation until the element is on screen

mod config;
mod engine;
mod gate;
mod speed;
mod state;

pub use config::{AnimationConfig, Sentence, SpeedRange, MIN_CHAR_DELAY};
pub use engine::{SentenceCallback, TickOutcome, TypingEngine};
pub use gate::{VisibilityGate, DEFAULT_VISIBILITY_THRESHOLD};
pub use speed::SpeedPicker;
pub use state::{AnimationState, Phase};
