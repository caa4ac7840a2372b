//! Mutable per-instance animation state.

use web_time::{Duration, Instant};

/// What the animation is doing at the most recent tick.
///
/// While running exactly one of `Typing`, `Deleting` or `Paused` holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Not activated yet (waiting for mount or visibility).
    Idle,
    /// Revealing characters.
    Typing,
    /// Erasing characters.
    Deleting,
    /// Holding: initial delay, after typing, or after erasing.
    Paused,
    /// Terminal state; no further ticks change anything.
    Finished,
}

/// Timing and progress of one animator instance.
///
/// Owned exclusively by a [`TypingEngine`](super::TypingEngine) and mutated
/// only through `tick`.
#[derive(Debug, Clone, Default)]
pub struct AnimationState {
    /// Characters currently revealed.
    pub(crate) char_index: usize,
    pub(crate) is_deleting: bool,
    /// Active sentence, always a valid index.
    pub(crate) text_index: usize,
    /// No character transitions happen before this instant.
    pub(crate) pause_until: Option<Instant>,
    /// Timestamp of the last unpaused tick.
    pub(crate) last_tick: Option<Instant>,
    /// Elapsed time not yet spent on a character transition.
    pub(crate) accumulated: Duration,
    pub(crate) active: bool,
    pub(crate) finished: bool,
    /// Timestamp of the last tick, paused or not.
    pub(crate) last_seen: Option<Instant>,
    /// Text currently rendered.
    pub(crate) displayed: String,
}

impl AnimationState {
    /// Fresh, inactive state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Characters currently revealed.
    pub fn char_index(&self) -> usize {
        self.char_index
    }

    /// Whether the current phase erases characters.
    pub fn is_deleting(&self) -> bool {
        self.is_deleting
    }

    /// Index of the active sentence.
    pub fn text_index(&self) -> usize {
        self.text_index
    }

    /// Whether the timing loop has been started.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether the terminal state was reached.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Text currently rendered.
    pub fn displayed(&self) -> &str {
        &self.displayed
    }

    /// End of the current hold, if one was scheduled.
    pub fn pause_until(&self) -> Option<Instant> {
        self.pause_until
    }

    /// Whether `now` falls inside the current hold.
    pub fn is_paused_at(&self, now: Instant) -> bool {
        self.pause_until.is_some_and(|until| now < until)
    }

    /// Phase as of the most recent tick.
    pub fn phase(&self) -> Phase {
        if self.finished {
            return Phase::Finished;
        }
        if !self.active {
            return Phase::Idle;
        }
        let holding = match (self.pause_until, self.last_seen) {
            (Some(until), Some(seen)) => seen < until,
            (Some(_), None) => true,
            (None, _) => false,
        };
        if holding {
            Phase::Paused
        } else if self.is_deleting {
            Phase::Deleting
        } else {
            Phase::Typing
        }
    }

    /// Start the loop at `now`; the first character waits `initial_delay`.
    ///
    /// The frame clock is seeded with `now`, so elapsed time is measured from
    /// activation.
    pub(crate) fn activate(&mut self, now: Instant, initial_delay: Duration) {
        self.active = true;
        self.hold(now, initial_delay);
        self.last_tick = Some(now);
        self.accumulated = Duration::ZERO;
    }

    /// Suspend character transitions for `duration` from `now`.
    pub(crate) fn hold(&mut self, now: Instant, duration: Duration) {
        self.pause_until = Some(now.checked_add(duration).unwrap_or(now));
    }

    /// Fold the time since the previous unpaused tick into the accumulator.
    pub(crate) fn accumulate(&mut self, now: Instant) -> Duration {
        let delta = self
            .last_tick
            .map_or(Duration::ZERO, |last| now.saturating_duration_since(last));
        self.last_tick = Some(now);
        self.accumulated += delta;
        self.accumulated
    }
}
