//! Deterministic scheduler, observer and host on a virtual clock.
//!
//! Used by tests and for headless previews: frames arrive at scripted
//! intervals without sleeping, and every render is recorded.

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

use web_time::{Duration, Instant};

use super::{FrameScheduler, VisibilityObserver};
use crate::error::TextypeError;
use crate::render::{RenderHost, RenderNode};

const DEFAULT_INTERVAL: Duration = Duration::from_millis(16);

/// Shared, manually advanced clock.
///
/// Clones share the same current time.
#[derive(Debug, Clone)]
pub struct VirtualClock {
    origin: Instant,
    now: Rc<Cell<Instant>>,
}

impl VirtualClock {
    /// Clock starting at the real current instant.
    pub fn new() -> Self {
        let origin = Instant::now();
        Self {
            origin,
            now: Rc::new(Cell::new(origin)),
        }
    }

    /// Instant the clock started at.
    pub fn origin(&self) -> Instant {
        self.origin
    }

    /// Current virtual time.
    pub fn now(&self) -> Instant {
        self.now.get()
    }

    /// `offset` after the origin.
    pub fn at(&self, offset: Duration) -> Instant {
        self.origin + offset
    }

    /// Move forward by `by`.
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    /// Move forward to `instant`. Never moves backwards.
    pub fn advance_to(&self, instant: Instant) {
        if instant > self.now.get() {
            self.now.set(instant);
        }
    }
}

impl Default for VirtualClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Frame scheduler that advances a [`VirtualClock`] by scripted intervals.
#[derive(Debug)]
pub struct SimulatedScheduler {
    clock: VirtualClock,
    intervals: Vec<Duration>,
    next_interval: usize,
    frame_limit: Option<usize>,
    frames: usize,
    pending: bool,
    cancellations: usize,
}

impl SimulatedScheduler {
    /// Frames every `interval`.
    pub fn new(clock: VirtualClock, interval: Duration) -> Self {
        Self::with_intervals(clock, vec![interval])
    }

    /// Frames at intervals cycling through `intervals`.
    pub fn with_intervals(clock: VirtualClock, intervals: Vec<Duration>) -> Self {
        let intervals = if intervals.is_empty() {
            vec![DEFAULT_INTERVAL]
        } else {
            intervals
        };
        Self {
            clock,
            intervals,
            next_interval: 0,
            frame_limit: None,
            frames: 0,
            pending: false,
            cancellations: 0,
        }
    }

    /// Scheduler that never delivers a frame.
    pub fn unavailable(clock: VirtualClock) -> Self {
        Self::new(clock, DEFAULT_INTERVAL).with_frame_limit(0)
    }

    /// Stop delivering frames after `limit`.
    #[must_use]
    pub fn with_frame_limit(mut self, limit: usize) -> Self {
        self.frame_limit = Some(limit);
        self
    }

    /// Frames delivered so far.
    pub fn frames_served(&self) -> usize {
        self.frames
    }

    /// Number of `cancel` calls.
    pub fn cancel_calls(&self) -> usize {
        self.cancellations
    }

    /// Whether a frame request is outstanding.
    pub fn has_pending(&self) -> bool {
        self.pending
    }
}

impl FrameScheduler for SimulatedScheduler {
    fn now(&self) -> Instant {
        self.clock.now()
    }

    fn next_frame(&mut self) -> Option<Instant> {
        if self.frame_limit.is_some_and(|limit| self.frames >= limit) {
            return None;
        }
        self.pending = true;
        let interval = self.intervals[self.next_interval % self.intervals.len()];
        self.next_interval += 1;
        self.clock.advance(interval);
        self.frames += 1;
        self.pending = false;
        Some(self.clock.now())
    }

    fn cancel(&mut self) {
        self.pending = false;
        self.cancellations += 1;
    }
}

/// Visibility observer replaying scripted `(offset, ratio)` changes.
///
/// Each change moves the shared clock to its offset from the origin.
#[derive(Debug)]
pub struct SimulatedVisibility {
    clock: VirtualClock,
    events: VecDeque<(Duration, f32)>,
    disconnects: usize,
}

impl SimulatedVisibility {
    /// Observer delivering `events` in order, then reporting unavailable.
    pub fn new<I>(clock: VirtualClock, events: I) -> Self
    where
        I: IntoIterator<Item = (Duration, f32)>,
    {
        Self {
            clock,
            events: events.into_iter().collect(),
            disconnects: 0,
        }
    }

    /// Whether `disconnect` was called.
    pub fn is_disconnected(&self) -> bool {
        self.disconnects > 0
    }

    /// Number of `disconnect` calls.
    pub fn disconnect_calls(&self) -> usize {
        self.disconnects
    }
}

impl VisibilityObserver for SimulatedVisibility {
    fn next_intersection(&mut self) -> Option<(Instant, f32)> {
        if self.is_disconnected() {
            return None;
        }
        let (offset, ratio) = self.events.pop_front()?;
        self.clock.advance_to(self.clock.at(offset));
        Some((self.clock.now(), ratio))
    }

    fn disconnect(&mut self) {
        self.disconnects += 1;
    }
}

/// Host that keeps every rendered node.
#[derive(Debug, Default)]
pub struct RecordingHost {
    frames: Vec<RenderNode>,
    fail_after: Option<usize>,
}

impl RecordingHost {
    /// Host that accepts every render.
    pub fn new() -> Self {
        Self::default()
    }

    /// Host that fails every render after the first `renders`.
    pub fn failing_after(renders: usize) -> Self {
        Self {
            frames: Vec::new(),
            fail_after: Some(renders),
        }
    }

    /// Every node rendered so far.
    pub fn frames(&self) -> &[RenderNode] {
        &self.frames
    }

    /// Displayed text of every render.
    pub fn texts(&self) -> Vec<String> {
        self.frames
            .iter()
            .map(|node| node.content.text.clone())
            .collect()
    }
}

impl RenderHost for RecordingHost {
    fn render(&mut self, node: &RenderNode) -> Result<(), TextypeError> {
        if self.fail_after.is_some_and(|limit| self.frames.len() >= limit) {
            return Err(TextypeError::Host("render target detached".into()));
        }
        self.frames.push(node.clone());
        Ok(())
    }
}
