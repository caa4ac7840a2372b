//! Per-character delay source.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use web_time::Duration;

use super::config::{AnimationConfig, SpeedRange};

/// Picks the delay before the next typed character.
///
/// With a [`SpeedRange`] configured every call draws uniformly from it;
/// otherwise the fixed typing speed is returned. Erasing never goes
/// through here.
#[derive(Debug)]
pub struct SpeedPicker {
    rng: StdRng,
}

impl SpeedPicker {
    /// Picker seeded from the operating system.
    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic picker for tests and reproducible playback.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Delay before the next typed character.
    pub fn typing_delay(&mut self, config: &AnimationConfig) -> Duration {
        config
            .variable_speed()
            .map_or(config.typing_speed(), |range| self.draw(range))
    }

    /// Uniform draw from `range`, inclusive on both ends.
    pub fn draw(&mut self, range: SpeedRange) -> Duration {
        let lo = nanos(range.min());
        let hi = nanos(range.max());
        if lo >= hi {
            return range.min();
        }
        Duration::from_nanos(self.rng.random_range(lo..=hi))
    }
}

fn nanos(delay: Duration) -> u64 {
    u64::try_from(delay.as_nanos()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{Options, SpeedRangeOptions};

    fn config_with_range(min_ms: f64, max_ms: f64) -> AnimationConfig {
        let mut opts = Options::with_texts(["abc"]);
        opts.timing.variable_speed = Some(SpeedRangeOptions { min_ms, max_ms });
        AnimationConfig::from_options(&opts).unwrap()
    }

    #[test]
    fn fixed_speed_without_range() {
        let mut opts = Options::with_texts(["abc"]);
        opts.timing.typing_speed_ms = 42.0;
        let config = AnimationConfig::from_options(&opts).unwrap();
        let mut picker = SpeedPicker::seeded(7);
        assert_eq!(picker.typing_delay(&config), Duration::from_millis(42));
    }

    #[test]
    fn degenerate_range_is_fixed() {
        let config = config_with_range(10.0, 10.0);
        let mut picker = SpeedPicker::seeded(1);
        for _ in 0..100 {
            assert_eq!(
                picker.typing_delay(&config),
                Duration::from_millis(10)
            );
        }
    }

    #[test]
    fn draws_stay_inside_range() {
        let config = config_with_range(20.0, 80.0);
        let range = config.variable_speed().unwrap();
        let mut picker = SpeedPicker::seeded(99);
        let draws: Vec<Duration> =
            (0..500).map(|_| picker.typing_delay(&config)).collect();
        assert!(draws.iter().all(|d| range.contains(*d)));
        // Not stuck on one value
        assert!(draws.iter().any(|d| *d != draws[0]));
    }

    #[test]
    fn same_seed_same_sequence() {
        let config = config_with_range(5.0, 500.0);
        let mut a = SpeedPicker::seeded(3);
        let mut b = SpeedPicker::seeded(3);
        for _ in 0..20 {
            assert_eq!(a.typing_delay(&config), b.typing_delay(&config));
        }
    }
}
