//! The typing/erasing state machine.
//!
//! [`TypingEngine::tick`] is called once per display refresh. Progress is
//! driven by elapsed wall-clock time rather than tick count, so irregular
//! or slow frame rates only change how many ticks a character takes, never
//! how long it takes (down to one character per tick).

use web_time::{Duration, Instant};

use super::config::{AnimationConfig, Sentence};
use super::speed::SpeedPicker;
use super::state::{AnimationState, Phase};

/// Callback invoked with the next sentence and its index each time a
/// sentence has been fully erased.
pub type SentenceCallback = Box<dyn FnMut(&str, usize)>;

/// Result of a single [`TypingEngine::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not activated yet.
    Inactive,
    /// Inside the initial delay or a hold.
    Paused,
    /// Elapsed time has not reached the current per-character delay.
    Waiting,
    /// One more character revealed.
    Typed,
    /// One character erased.
    Erased,
    /// Sentence fully typed; erasing starts after the hold.
    Holding,
    /// Sentence fully erased; the engine moved on to `index`.
    SentenceComplete {
        /// Index of the sentence that types next.
        index: usize,
    },
    /// Terminal state, reached on this tick or earlier.
    Finished,
}

impl TickOutcome {
    /// Whether this tick performed a character-index or phase transition.
    pub fn is_transition(self) -> bool {
        matches!(
            self,
            Self::Typed
                | Self::Erased
                | Self::Holding
                | Self::SentenceComplete { .. }
        )
    }
}

/// Frame-driven typewriter animation over an [`AnimationConfig`].
pub struct TypingEngine {
    config: AnimationConfig,
    state: AnimationState,
    speed: SpeedPicker,
    on_sentence_complete: Option<SentenceCallback>,
}

impl TypingEngine {
    /// Inactive engine with an OS-seeded speed picker.
    pub fn new(config: AnimationConfig) -> Self {
        Self {
            config,
            state: AnimationState::new(),
            speed: SpeedPicker::from_os_rng(),
            on_sentence_complete: None,
        }
    }

    /// Use a deterministic speed picker.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.speed = SpeedPicker::seeded(seed);
        self
    }

    /// Register the sentence-complete callback, replacing any previous one.
    pub fn on_sentence_complete<F>(&mut self, callback: F)
    where
        F: FnMut(&str, usize) + 'static,
    {
        self.on_sentence_complete = Some(Box::new(callback));
    }

    /// The validated configuration.
    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    /// Read-only view of the state.
    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    /// Start the loop at `now`. Returns `false` if already started or
    /// finished.
    pub fn activate(&mut self, now: Instant) -> bool {
        if self.state.active || self.state.finished {
            return false;
        }
        self.state.activate(now, self.config.initial_delay());
        log::debug!(
            "typing animation activated ({} sentences, initial delay {:?})",
            self.config.len(),
            self.config.initial_delay()
        );
        true
    }

    /// Advance the animation by at most one character transition.
    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        if self.state.finished {
            return TickOutcome::Finished;
        }
        if !self.state.active {
            return TickOutcome::Inactive;
        }
        self.state.last_seen = Some(now);
        if self.state.is_paused_at(now) {
            return TickOutcome::Paused;
        }

        let accumulated = self.state.accumulate(now);
        let speed = self.current_speed();
        if accumulated < speed {
            return TickOutcome::Waiting;
        }
        self.state.accumulated = Duration::ZERO;

        if self.state.is_deleting {
            self.step_deleting(now)
        } else {
            self.step_typing(now)
        }
    }

    fn current_speed(&mut self) -> Duration {
        if self.state.is_deleting {
            self.config.deleting_speed()
        } else {
            self.speed.typing_delay(&self.config)
        }
    }

    fn step_typing(&mut self, now: Instant) -> TickOutcome {
        let sentence = self.config.sentence(self.state.text_index);
        if self.state.char_index < sentence.len() {
            self.state.char_index += 1;
            self.state.displayed = sentence.prefix(self.state.char_index);
            return TickOutcome::Typed;
        }

        if self.config.looping()
            || self.state.text_index < self.config.last_index()
        {
            self.state.is_deleting = true;
            self.state.hold(now, self.config.pause_duration());
            return TickOutcome::Holding;
        }

        self.state.displayed = sentence.full_text();
        self.finish();
        TickOutcome::Finished
    }

    fn step_deleting(&mut self, now: Instant) -> TickOutcome {
        if self.state.char_index > 0 {
            self.state.char_index -= 1;
            self.state.displayed = self
                .config
                .sentence(self.state.text_index)
                .prefix(self.state.char_index);
            return TickOutcome::Erased;
        }

        self.state.is_deleting = false;
        let next = (self.state.text_index + 1) % self.config.len();
        if let Some(callback) = self.on_sentence_complete.as_mut() {
            callback(self.config.sentence(next).source(), next);
        }

        if !self.config.looping() && next == 0 {
            self.state.displayed = self
                .config
                .sentence(self.config.last_index())
                .source()
                .to_owned();
            self.finish();
            return TickOutcome::Finished;
        }

        log::debug!("sentence {} complete, next {next}", self.state.text_index);
        self.state.text_index = next;
        self.state.displayed.clear();
        self.state.hold(now, self.config.pause_duration());
        TickOutcome::SentenceComplete { index: next }
    }

    fn finish(&mut self) {
        self.state.finished = true;
        self.state.pause_until = None;
        log::debug!(
            "typing animation finished on sentence {}",
            self.state.text_index
        );
    }

    /// Jump to the static final text and stop.
    ///
    /// Used when the host cannot drive frames; shows the last sentence as
    /// written.
    pub fn settle(&mut self) {
        let last = self.config.last_index();
        let sentence = self.config.sentence(last);
        self.state.text_index = last;
        self.state.char_index = sentence.len();
        self.state.is_deleting = false;
        self.state.displayed = sentence.source().to_owned();
        self.finish();
    }

    /// Phase as of the most recent tick.
    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// Text currently rendered.
    pub fn displayed(&self) -> &str {
        &self.state.displayed
    }

    /// The active sentence.
    pub fn current_sentence(&self) -> &Sentence {
        self.config.sentence(self.state.text_index)
    }

    /// Source string of the active sentence.
    pub fn current_text(&self) -> &str {
        self.current_sentence().source()
    }

    /// Index of the active sentence.
    pub fn text_index(&self) -> usize {
        self.state.text_index
    }

    /// Characters currently revealed.
    pub fn char_index(&self) -> usize {
        self.state.char_index
    }

    /// Whether the current phase erases characters.
    pub fn is_deleting(&self) -> bool {
        self.state.is_deleting
    }

    /// Whether the loop has been started.
    pub fn is_active(&self) -> bool {
        self.state.active
    }

    /// Whether the terminal state was reached.
    pub fn is_finished(&self) -> bool {
        self.state.finished
    }

    /// Whether the engine still needs display refreshes.
    pub fn is_running(&self) -> bool {
        self.state.active && !self.state.finished
    }

    /// Whether characters are being revealed right now (typing phase with
    /// the sentence incomplete).
    pub fn is_typing_in_progress(&self) -> bool {
        self.phase() == Phase::Typing
            && self.state.char_index < self.current_sentence().len()
    }
}

impl std::fmt::Debug for TypingEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypingEngine")
            .field("sentences", &self.config.len())
            .field("text_index", &self.state.text_index)
            .field("char_index", &self.state.char_index)
            .field("phase", &self.state.phase())
            .finish_non_exhaustive()
    }
}
