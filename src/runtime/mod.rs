//! Driving a [`TextType`] from a refresh scheduler and a visibility observer.
//!
//! [`Session::run`] is an explicit loop: it suspends on the observer until
//! the element is visible, then on the scheduler once per display refresh,
//! checking the [`CancellationToken`] every time it resumes. The session
//! releases the pending refresh request and the observer when dropped, so
//! every exit path (cancellation, error, completion, degradation) cleans up.

pub mod simulated;
#[cfg(not(target_arch = "wasm32"))]
pub mod terminal;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use web_time::Instant;

use crate::component::TextType;
use crate::error::TextypeError;
use crate::render::RenderHost;

/// Source of display-refresh callbacks.
pub trait FrameScheduler {
    /// Current time on the scheduler's clock.
    fn now(&self) -> Instant;

    /// Request the next refresh and suspend until it fires. Returns its
    /// timestamp, or `None` when the scheduler is unavailable.
    ///
    /// At most one request is outstanding at a time.
    fn next_frame(&mut self) -> Option<Instant>;

    /// Drop the outstanding request, if any. Must be idempotent.
    fn cancel(&mut self);
}

/// Source of intersection changes for the animated element.
pub trait VisibilityObserver {
    /// Suspend until the element's intersection ratio changes. Returns the
    /// change time and ratio, or `None` when observation is unavailable.
    fn next_intersection(&mut self) -> Option<(Instant, f32)>;

    /// Stop observing. Must be idempotent.
    fn disconnect(&mut self);
}

/// Shared flag that stops a running session at its next suspension point.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The animation reached its terminal state.
    Finished,
    /// The cancellation token fired.
    Cancelled,
    /// The scheduler or observer was unavailable; static text was rendered.
    Degraded,
}

/// Binds a scheduler (and optionally an observer) to one run of a
/// component.
pub struct Session<'a> {
    scheduler: &'a mut dyn FrameScheduler,
    visibility: Option<&'a mut dyn VisibilityObserver>,
    cancel: CancellationToken,
}

impl<'a> Session<'a> {
    /// Session driven by `scheduler`, without visibility observation.
    pub fn new(scheduler: &'a mut dyn FrameScheduler) -> Self {
        Self {
            scheduler,
            visibility: None,
            cancel: CancellationToken::new(),
        }
    }

    /// Observe visibility for components that start on visible.
    #[must_use]
    pub fn with_visibility(
        mut self,
        observer: &'a mut dyn VisibilityObserver,
    ) -> Self {
        self.visibility = Some(observer);
        self
    }

    /// Stop when `token` is cancelled.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Mount `component`, wait for visibility if needed, then tick it once
    /// per refresh until it finishes, is cancelled, or cannot continue.
    ///
    /// The host is redrawn after mount and after every transition. Only a
    /// host failure is reported as an error.
    pub fn run(
        mut self,
        component: &mut TextType,
        host: &mut dyn RenderHost,
    ) -> Result<RunOutcome, TextypeError> {
        if self.cancel.is_cancelled() {
            return Ok(RunOutcome::Cancelled);
        }
        let _ = component.mount(self.scheduler.now());
        host.render(&component.render())?;

        while component.awaits_visibility() {
            if self.cancel.is_cancelled() {
                return Ok(RunOutcome::Cancelled);
            }
            let change = self
                .visibility
                .as_mut()
                .and_then(|observer| observer.next_intersection());
            let Some((at, ratio)) = change else {
                return Self::degrade(component, host);
            };
            let _ = component.on_intersection(ratio, at);
        }
        self.release_observer();

        while component.wants_frame() {
            if self.cancel.is_cancelled() {
                return Ok(RunOutcome::Cancelled);
            }
            let Some(now) = self.scheduler.next_frame() else {
                return Self::degrade(component, host);
            };
            let outcome = component.on_frame(now);
            if outcome.is_transition() || component.is_finished() {
                host.render(&component.render())?;
            }
        }
        Ok(RunOutcome::Finished)
    }

    fn degrade(
        component: &mut TextType,
        host: &mut dyn RenderHost,
    ) -> Result<RunOutcome, TextypeError> {
        component.degrade();
        host.render(&component.render())?;
        Ok(RunOutcome::Degraded)
    }

    fn release_observer(&mut self) {
        if let Some(observer) = self.visibility.take() {
            observer.disconnect();
        }
    }
}

impl Drop for Session<'_> {
    fn drop(&mut self) {
        self.scheduler.cancel();
        self.release_observer();
    }
}

impl std::fmt::Debug for Session<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("observing", &self.visibility.is_some())
            .field("cancelled", &self.cancel.is_cancelled())
            .finish_non_exhaustive()
    }
}
