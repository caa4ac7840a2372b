//! Validated, normalized animation configuration.

use web_time::Duration;

use crate::error::TextypeError;
use crate::options::{Options, SpeedRangeOptions};

/// Shortest per-character delay. Faster or non-positive speeds clamp to
/// this.
pub const MIN_CHAR_DELAY: Duration = Duration::from_millis(1);

/// Longest accepted delay or speed, in milliseconds (one day).
const MAX_MS: f64 = 86_400_000.0;

/// One string of the cycle: its source text and the glyphs shown for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    source: String,
    /// Display order; reversed in reverse mode.
    glyphs: Vec<char>,
}

impl Sentence {
    /// Split `source` into display glyphs, back to front if `reverse`.
    pub fn new(source: impl Into<String>, reverse: bool) -> Self {
        let source = source.into();
        let mut glyphs: Vec<char> = source.chars().collect();
        if reverse {
            glyphs.reverse();
        }
        Self { source, glyphs }
    }

    /// The string as the caller supplied it.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Glyphs in the order they are revealed.
    pub fn glyphs(&self) -> &[char] {
        &self.glyphs
    }

    /// Number of glyphs.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Whether the string has no glyphs.
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// The first `count` glyphs as a string.
    pub fn prefix(&self, count: usize) -> String {
        self.glyphs.iter().take(count).collect()
    }

    /// All glyphs in display order.
    pub fn full_text(&self) -> String {
        self.glyphs.iter().collect()
    }
}

/// Inclusive range of per-character typing delays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeedRange {
    min: Duration,
    max: Duration,
}

impl SpeedRange {
    /// Build a range, swapping reversed bounds and clamping both to
    /// [`MIN_CHAR_DELAY`].
    pub fn new(a: Duration, b: Duration) -> Self {
        let (min, max) = if a <= b { (a, b) } else { (b, a) };
        Self {
            min: min.max(MIN_CHAR_DELAY),
            max: max.max(MIN_CHAR_DELAY),
        }
    }

    /// Shortest delay.
    pub fn min(&self) -> Duration {
        self.min
    }

    /// Longest delay.
    pub fn max(&self) -> Duration {
        self.max
    }

    /// Whether `delay` lies inside the range (inclusive).
    pub fn contains(&self, delay: Duration) -> bool {
        delay >= self.min && delay <= self.max
    }
}

/// Immutable configuration of one animation session.
///
/// Built from [`Options`] by [`AnimationConfig::from_options`], which is the
/// only place configuration is validated. An `AnimationConfig` always holds
/// at least one sentence.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationConfig {
    sentences: Vec<Sentence>,
    typing_speed: Duration,
    deleting_speed: Duration,
    variable_speed: Option<SpeedRange>,
    initial_delay: Duration,
    pause_duration: Duration,
    looping: bool,
    reverse: bool,
}

impl AnimationConfig {
    /// Validate and normalize options.
    ///
    /// An empty text list is rejected with [`TextypeError::NoTexts`].
    /// Speeds below [`MIN_CHAR_DELAY`] (including non-positive ones) clamp
    /// to it and negative delays clamp to zero. Non-positive speeds and
    /// negative delays are logged.
    pub fn from_options(options: &Options) -> Result<Self, TextypeError> {
        let texts = options.texts.to_vec();
        if texts.is_empty() {
            return Err(TextypeError::NoTexts);
        }

        let reverse = options.behavior.reverse_mode;
        let timing = &options.timing;
        Ok(Self {
            sentences: texts
                .into_iter()
                .map(|text| Sentence::new(text, reverse))
                .collect(),
            typing_speed: speed_from_ms("typing speed", timing.typing_speed_ms),
            deleting_speed: speed_from_ms(
                "deleting speed",
                timing.deleting_speed_ms,
            ),
            variable_speed: timing.variable_speed.map(speed_range_from_ms),
            initial_delay: delay_from_ms(
                "initial delay",
                timing.initial_delay_ms,
            ),
            pause_duration: delay_from_ms(
                "pause duration",
                timing.pause_duration_ms,
            ),
            looping: options.behavior.looping,
            reverse,
        })
    }

    /// Number of sentences (always at least one).
    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    /// Whether there are no sentences. Never true once validated.
    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Index of the last sentence.
    pub fn last_index(&self) -> usize {
        self.sentences.len().saturating_sub(1)
    }

    /// Sentence at `index`, wrapping modulo the sentence count.
    pub fn sentence(&self, index: usize) -> &Sentence {
        &self.sentences[index % self.sentences.len()]
    }

    /// All sentences in cycle order.
    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    /// Fixed delay between typed characters.
    pub fn typing_speed(&self) -> Duration {
        self.typing_speed
    }

    /// Delay between erased characters.
    pub fn deleting_speed(&self) -> Duration {
        self.deleting_speed
    }

    /// Random typing delay range, if configured.
    pub fn variable_speed(&self) -> Option<SpeedRange> {
        self.variable_speed
    }

    /// Hold between activation and the first character.
    pub fn initial_delay(&self) -> Duration {
        self.initial_delay
    }

    /// Hold after typing completes and after erasing completes.
    pub fn pause_duration(&self) -> Duration {
        self.pause_duration
    }

    /// Whether the cycle restarts after the last sentence.
    pub fn looping(&self) -> bool {
        self.looping
    }

    /// Whether sentences are revealed back to front.
    pub fn reverse(&self) -> bool {
        self.reverse
    }
}

fn speed_range_from_ms(range: SpeedRangeOptions) -> SpeedRange {
    SpeedRange::new(
        speed_from_ms("variable speed min", range.min_ms),
        speed_from_ms("variable speed max", range.max_ms),
    )
}

fn speed_from_ms(label: &str, ms: f64) -> Duration {
    if !ms.is_finite() || ms <= 0.0 {
        log::warn!("{label} of {ms} ms is not positive, using 1 ms");
        return MIN_CHAR_DELAY;
    }
    clamped_ms(label, ms).max(MIN_CHAR_DELAY)
}

fn delay_from_ms(label: &str, ms: f64) -> Duration {
    if !ms.is_finite() || ms < 0.0 {
        log::warn!("{label} of {ms} ms is negative, using 0 ms");
        return Duration::ZERO;
    }
    clamped_ms(label, ms)
}

fn clamped_ms(label: &str, ms: f64) -> Duration {
    if ms > MAX_MS {
        log::warn!("{label} of {ms} ms is too long, using {MAX_MS} ms");
    }
    Duration::from_nanos((ms.min(MAX_MS) * 1_000_000.0).round() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::TextSource;

    #[test]
    fn empty_texts_are_rejected() {
        let opts = Options::default();
        assert!(matches!(
            AnimationConfig::from_options(&opts),
            Err(TextypeError::NoTexts)
        ));
    }

    #[test]
    fn single_string_is_one_sentence() {
        let mut opts = Options::default();
        opts.texts = TextSource::from("Hi");
        let config = AnimationConfig::from_options(&opts).unwrap();
        assert_eq!(config.len(), 1);
        assert_eq!(config.sentence(0).source(), "Hi");
        assert_eq!(config.last_index(), 0);
    }

    #[test]
    fn reverse_mode_reverses_glyphs_but_not_source() {
        let mut opts = Options::with_texts(["abc"]);
        opts.behavior.reverse_mode = true;
        let config = AnimationConfig::from_options(&opts).unwrap();
        let sentence = config.sentence(0);
        assert_eq!(sentence.source(), "abc");
        assert_eq!(sentence.full_text(), "cba");
        assert_eq!(sentence.prefix(2), "cb");
    }

    #[test]
    fn non_positive_speeds_clamp_to_one_millisecond() {
        let mut opts = Options::with_texts(["x"]);
        opts.timing.typing_speed_ms = 0.0;
        opts.timing.deleting_speed_ms = -5.0;
        let config = AnimationConfig::from_options(&opts).unwrap();
        assert_eq!(config.typing_speed(), MIN_CHAR_DELAY);
        assert_eq!(config.deleting_speed(), MIN_CHAR_DELAY);
    }

    #[test]
    fn negative_and_non_finite_delays_clamp_to_zero() {
        let mut opts = Options::with_texts(["x"]);
        opts.timing.initial_delay_ms = -100.0;
        opts.timing.pause_duration_ms = f64::NAN;
        let config = AnimationConfig::from_options(&opts).unwrap();
        assert_eq!(config.initial_delay(), Duration::ZERO);
        assert_eq!(config.pause_duration(), Duration::ZERO);
    }

    #[test]
    fn huge_delays_are_capped() {
        let mut opts = Options::with_texts(["x"]);
        opts.timing.pause_duration_ms = 1e300;
        let config = AnimationConfig::from_options(&opts).unwrap();
        assert_eq!(config.pause_duration(), Duration::from_secs(86_400));
    }

    #[test]
    fn reversed_speed_range_is_swapped() {
        let mut opts = Options::with_texts(["x"]);
        opts.timing.variable_speed = Some(SpeedRangeOptions {
            min_ms: 80.0,
            max_ms: 20.0,
        });
        let config = AnimationConfig::from_options(&opts).unwrap();
        let range = config.variable_speed().unwrap();
        assert_eq!(range.min(), Duration::from_millis(20));
        assert_eq!(range.max(), Duration::from_millis(80));
        assert!(range.contains(Duration::from_millis(50)));
        assert!(!range.contains(Duration::from_millis(81)));
    }

    #[test]
    fn sentence_index_wraps() {
        let opts = Options::with_texts(["a", "b", "c"]);
        let config = AnimationConfig::from_options(&opts).unwrap();
        assert_eq!(config.sentence(4).source(), "b");
    }

    #[test]
    fn multibyte_glyphs_count_as_one() {
        let sentence = Sentence::new("héllo✓", false);
        assert_eq!(sentence.len(), 6);
        assert_eq!(sentence.prefix(2), "hé");
    }
}
