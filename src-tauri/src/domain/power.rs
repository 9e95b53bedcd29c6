//! Usage: Simulated power level (0..=100) advanced by a pseudo-random walk.

use rand::Rng;
use serde::{Deserialize, Serialize};

pub const MAX_POWER: i32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerReading {
    pub power: i32,
}

#[derive(Debug, Clone)]
pub struct PowerState {
    power: i32,
}

impl Default for PowerState {
    fn default() -> Self {
        Self { power: MAX_POWER }
    }
}

impl PowerState {
    pub fn new(initial: i32) -> Self {
        Self {
            power: initial.clamp(0, MAX_POWER),
        }
    }

    pub fn reading(&self) -> PowerReading {
        PowerReading { power: self.power }
    }

    pub fn reset(&mut self) -> PowerReading {
        self.power = 0;
        self.reading()
    }

    /// Moves the level forward by `delta`, wrapping past `MAX_POWER` back to zero.
    pub fn advance(&mut self, delta: i32) -> i32 {
        self.power = (self.power + delta).rem_euclid(MAX_POWER + 1);
        self.power
    }

    pub fn sample<R: Rng + ?Sized>(&mut self, rng: &mut R) -> i32 {
        let delta = rng.gen_range(0..MAX_POWER);
        self.advance(delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn default_is_full_power() {
        assert_eq!(PowerState::default().reading(), PowerReading { power: 100 });
    }

    #[test]
    fn new_clamps_out_of_range_initial() {
        assert_eq!(PowerState::new(250).reading().power, 100);
        assert_eq!(PowerState::new(-3).reading().power, 0);
    }

    #[test]
    fn advance_wraps_modulo_101() {
        let mut state = PowerState::new(100);
        assert_eq!(state.advance(1), 0);
        assert_eq!(state.advance(57), 57);
        assert_eq!(state.advance(50), 6);
    }

    #[test]
    fn reset_sets_zero() {
        let mut state = PowerState::new(42);
        assert_eq!(state.reset(), PowerReading { power: 0 });
    }

    #[test]
    fn sample_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(127);
        let mut state = PowerState::default();
        for _ in 0..1_000 {
            let power = state.sample(&mut rng);
            assert!((0..=MAX_POWER).contains(&power));
        }
    }
}
