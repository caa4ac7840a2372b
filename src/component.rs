//! The typing text component: engine, visibility gate and render policy.

use web_time::Instant;

use crate::animation::{
    AnimationConfig, Phase, TickOutcome, TypingEngine, VisibilityGate,
};
use crate::error::TextypeError;
use crate::options::{CursorOptions, Options, StyleOptions};
use crate::render::{ContentNode, RenderNode};

/// One animated text element.
///
/// Host-agnostic: the host reports mount, intersection changes and display
/// refreshes, and draws whatever [`render`](Self::render) returns. Each
/// instance owns its state; nothing is shared between instances.
#[derive(Debug)]
pub struct TextType {
    engine: TypingEngine,
    gate: VisibilityGate,
    start_on_visible: bool,
    style: StyleOptions,
    cursor: CursorOptions,
}

impl TextType {
    /// Validate options and build an inactive component.
    pub fn new(options: &Options) -> Result<Self, TextypeError> {
        let config = AnimationConfig::from_options(options)?;
        let start_on_visible = options.behavior.start_on_visible;
        let gate = if start_on_visible {
            VisibilityGate::new(options.behavior.visibility_threshold)
        } else {
            VisibilityGate::opened()
        };
        Ok(Self {
            engine: TypingEngine::new(config),
            gate,
            start_on_visible,
            style: options.style.clone(),
            cursor: options.cursor.clone(),
        })
    }

    /// Use a deterministic random speed source.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.engine = self.engine.with_seed(seed);
        self
    }

    /// Register the sentence-complete callback.
    pub fn on_sentence_complete<F>(&mut self, callback: F)
    where
        F: FnMut(&str, usize) + 'static,
    {
        self.engine.on_sentence_complete(callback);
    }

    /// The element was attached at `now`. Activates immediately unless
    /// activation waits for visibility. Returns whether the component now
    /// wants display refreshes.
    pub fn mount(&mut self, now: Instant) -> bool {
        if !self.start_on_visible {
            let _ = self.engine.activate(now);
        }
        self.wants_frame()
    }

    /// Whether activation still waits for the element to become visible.
    pub fn awaits_visibility(&self) -> bool {
        !self.gate.is_open() && !self.engine.is_finished()
    }

    /// Report the element's intersection ratio. Returns `true` when this
    /// observation activated the animation.
    pub fn on_intersection(&mut self, ratio: f32, now: Instant) -> bool {
        if self.engine.is_finished() || !self.gate.observe(ratio) {
            return false;
        }
        log::debug!("element visible (ratio {ratio:.2}), starting animation");
        self.engine.activate(now)
    }

    /// Display refresh at `now`.
    pub fn on_frame(&mut self, now: Instant) -> TickOutcome {
        self.engine.tick(now)
    }

    /// Whether the component needs further display refreshes.
    pub fn wants_frame(&self) -> bool {
        self.engine.is_running()
    }

    /// Give up on animating and show the static final text.
    pub fn degrade(&mut self) {
        log::warn!("animation host unavailable, rendering static text");
        self.engine.settle();
    }

    /// Whether the caret carries the hidden class right now.
    pub fn cursor_hidden(&self) -> bool {
        if !self.cursor.hide_while_typing {
            return false;
        }
        match self.engine.phase() {
            Phase::Typing => self.engine.is_typing_in_progress(),
            Phase::Deleting => true,
            Phase::Idle | Phase::Paused | Phase::Finished => false,
        }
    }

    /// Color override for the active string.
    pub fn text_color(&self) -> Option<&str> {
        self.style.color_for(self.engine.text_index())
    }

    /// Current render tree.
    pub fn render(&self) -> RenderNode {
        RenderNode::compose(
            &self.style,
            &self.cursor,
            ContentNode {
                text: self.engine.displayed().to_owned(),
                color: self.text_color().map(str::to_owned),
            },
            self.cursor_hidden(),
        )
    }

    /// Text currently displayed.
    pub fn displayed(&self) -> &str {
        self.engine.displayed()
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.engine.phase()
    }

    /// Whether the animation loop has started.
    pub fn is_active(&self) -> bool {
        self.engine.is_active()
    }

    /// Whether the terminal state was reached.
    pub fn is_finished(&self) -> bool {
        self.engine.is_finished()
    }

    /// The underlying engine.
    pub fn engine(&self) -> &TypingEngine {
        &self.engine
    }
}

#[cfg(test)]
mod tests {
    use web_time::Duration;

    use super::*;

    const MS: Duration = Duration::from_millis(1);

    fn options() -> Options {
        let mut opts = Options::with_texts(["Hello", "World"]);
        opts.timing.typing_speed_ms = 10.0;
        opts.timing.deleting_speed_ms = 10.0;
        opts.timing.pause_duration_ms = 100.0;
        opts
    }

    #[test]
    fn empty_texts_fail_construction() {
        let err = TextType::new(&Options::default()).unwrap_err();
        assert!(matches!(err, TextypeError::NoTexts));
    }

    #[test]
    fn mount_activates_without_visibility_gate() {
        let mut tt = TextType::new(&options()).unwrap();
        assert!(!tt.awaits_visibility());
        assert!(tt.mount(Instant::now()));
        assert!(tt.is_active());
    }

    #[test]
    fn visibility_gate_defers_activation() {
        let mut opts = options();
        opts.behavior.start_on_visible = true;
        opts.timing.initial_delay_ms = 300.0;
        let mut tt = TextType::new(&opts).unwrap().with_seed(1);
        let t0 = Instant::now();
        assert!(!tt.mount(t0));
        assert!(tt.awaits_visibility());

        // Frames before visibility change nothing
        for i in 1..100_u32 {
            assert_eq!(tt.on_frame(t0 + MS * (i * 16)), TickOutcome::Inactive);
        }
        assert_eq!(tt.displayed(), "");

        assert!(!tt.on_intersection(0.05, t0 + MS * 2000));
        let visible_at = t0 + MS * 2500;
        assert!(tt.on_intersection(0.4, visible_at));
        assert!(!tt.awaits_visibility());
        // Hiding again does not stop anything
        assert!(!tt.on_intersection(0.0, visible_at + MS * 10));
        assert!(tt.wants_frame());

        assert_eq!(tt.on_frame(visible_at + MS * 299), TickOutcome::Paused);
        assert_eq!(tt.displayed(), "");
        assert_eq!(tt.on_frame(visible_at + MS * 300), TickOutcome::Typed);
        assert_eq!(tt.displayed(), "H");
    }

    #[test]
    fn cursor_hides_only_while_typing_or_erasing() {
        let mut opts = options();
        opts.cursor.hide_while_typing = true;
        let mut tt = TextType::new(&opts).unwrap();
        let t0 = Instant::now();
        let _ = tt.mount(t0);
        // Initial hold before the first tick
        assert!(!tt.cursor_hidden());

        let _ = tt.on_frame(t0 + MS * 10);
        assert_eq!(tt.displayed(), "H");
        assert!(tt.cursor_hidden());

        for i in 2..=6_u32 {
            let _ = tt.on_frame(t0 + MS * (i * 10));
        }
        // Fully typed, holding before erasing
        assert_eq!(tt.phase(), Phase::Paused);
        assert!(!tt.cursor_hidden());

        let _ = tt.on_frame(t0 + MS * 160);
        assert_eq!(tt.phase(), Phase::Deleting);
        assert!(tt.cursor_hidden());
        assert!(tt.render().cursor.unwrap().hidden);
    }

    #[test]
    fn cursor_never_hidden_without_policy() {
        let mut tt = TextType::new(&options()).unwrap();
        let t0 = Instant::now();
        let _ = tt.mount(t0);
        let _ = tt.on_frame(t0 + MS * 10);
        assert_eq!(tt.phase(), Phase::Typing);
        assert!(!tt.cursor_hidden());
    }

    #[test]
    fn colors_cycle_with_text_index() {
        let mut opts = options();
        opts.timing.pause_duration_ms = 0.0;
        opts.style.text_colors = vec!["#111".to_owned()];
        opts.texts = vec!["a".to_owned(), "b".to_owned(), "c".to_owned()].into();
        let mut tt = TextType::new(&opts).unwrap();
        assert_eq!(tt.text_color(), Some("#111"));

        opts.style.text_colors = vec!["red".to_owned(), "blue".to_owned()];
        tt = TextType::new(&opts).unwrap();
        let t0 = Instant::now();
        let _ = tt.mount(t0);
        let mut seen = Vec::new();
        for i in 1..=40_u32 {
            if let TickOutcome::SentenceComplete { index } =
                tt.on_frame(t0 + MS * (i * 10))
            {
                seen.push((index, tt.text_color().map(str::to_owned)));
            }
        }
        assert_eq!(
            seen[..3],
            [
                (1, Some("blue".to_owned())),
                (2, Some("red".to_owned())),
                (0, Some("red".to_owned())),
            ]
        );
    }

    #[test]
    fn no_colors_means_no_override() {
        let tt = TextType::new(&options()).unwrap();
        assert_eq!(tt.text_color(), None);
        assert_eq!(tt.render().content.color, None);
    }

    #[test]
    fn degrade_renders_final_text() {
        let mut opts = options();
        opts.behavior.start_on_visible = true;
        let mut tt = TextType::new(&opts).unwrap();
        let _ = tt.mount(Instant::now());
        tt.degrade();
        assert!(tt.is_finished());
        assert!(!tt.awaits_visibility());
        assert!(!tt.wants_frame());
        assert_eq!(tt.render().content.text, "World");
        assert!(!tt.on_intersection(1.0, Instant::now()));
    }

    #[test]
    fn sentence_callback_is_forwarded() {
        use std::cell::Cell;
        use std::rc::Rc;

        let mut opts = options();
        opts.timing.pause_duration_ms = 0.0;
        opts.texts = "ab".into();
        let mut tt = TextType::new(&opts).unwrap();
        let count = Rc::new(Cell::new(0_usize));
        let counter = Rc::clone(&count);
        tt.on_sentence_complete(move |text, index| {
            assert_eq!((text, index), ("ab", 0));
            counter.set(counter.get() + 1);
        });
        let t0 = Instant::now();
        let _ = tt.mount(t0);
        for i in 1..=6_u32 {
            let _ = tt.on_frame(t0 + MS * (i * 10));
        }
        assert_eq!(count.get(), 1);
    }
}
