//! One-way visibility gate for deferred activation.

/// Intersection ratio at which an element counts as visible by default.
pub const DEFAULT_VISIBILITY_THRESHOLD: f32 = 0.1;

/// Opens the first time the host element is seen on screen and never
/// closes again; re-hiding the element does not pause the animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityGate {
    threshold: f32,
    open: bool,
}

impl VisibilityGate {
    /// Closed gate. Thresholds outside `0.0..=1.0` are clamped; NaN falls back
    /// to [`DEFAULT_VISIBILITY_THRESHOLD`].
    pub fn new(threshold: f32) -> Self {
        let threshold = if threshold.is_nan() {
            DEFAULT_VISIBILITY_THRESHOLD
        } else {
            threshold.clamp(0.0, 1.0)
        };
        Self {
            threshold,
            open: false,
        }
    }

    /// Gate that starts open, for animations that run on mount.
    pub fn opened() -> Self {
        Self {
            threshold: DEFAULT_VISIBILITY_THRESHOLD,
            open: true,
        }
    }

    /// Feed an intersection ratio. Returns `true` only on the observation
    /// that opens the gate.
    pub fn observe(&mut self, ratio: f32) -> bool {
        if self.open {
            return false;
        }
        if ratio > 0.0 && ratio >= self.threshold {
            self.open = true;
            return true;
        }
        false
    }

    /// Whether the element has been seen.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Minimum ratio that opens the gate.
    pub fn threshold(&self) -> f32 {
        self.threshold
    }
}

impl Default for VisibilityGate {
    fn default() -> Self {
        Self::new(DEFAULT_VISIBILITY_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opens_once_above_threshold() {
        let mut gate = VisibilityGate::default();
        assert!(!gate.observe(0.0));
        assert!(!gate.observe(0.05));
        assert!(gate.observe(0.1));
        assert!(gate.is_open());
        // Later observations never re-trigger
        assert!(!gate.observe(1.0));
    }

    #[test]
    fn rehiding_keeps_gate_open() {
        let mut gate = VisibilityGate::new(0.5);
        assert!(gate.observe(0.75));
        assert!(!gate.observe(0.0));
        assert!(gate.is_open());
    }

    #[test]
    fn zero_threshold_still_needs_some_intersection() {
        let mut gate = VisibilityGate::new(0.0);
        assert!(!gate.observe(0.0));
        assert!(gate.observe(0.01));
    }

    #[test]
    fn threshold_is_sanitized() {
        assert_eq!(VisibilityGate::new(4.0).threshold(), 1.0);
        assert_eq!(VisibilityGate::new(-1.0).threshold(), 0.0);
        assert_eq!(
            VisibilityGate::new(f32::NAN).threshold(),
            DEFAULT_VISIBILITY_THRESHOLD
        );
    }
}
