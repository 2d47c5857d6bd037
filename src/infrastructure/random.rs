//! Random source backed by the thread-local generator

use rand::RngExt;

use crate::domain::traits::RandomSource;

/// Draws from `rand::rng()` on every call, so concurrent handlers never
/// share sequence state.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn below(&self, upper: usize) -> usize {
        rand::rng().random_range(0..upper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_below_stays_in_range() {
        let random = ThreadRandom;
        for _ in 0..200 {
            assert!(random.below(3) < 3);
        }
        assert_eq!(random.below(1), 0);
    }

    #[test]
    fn test_roll_is_one_based() {
        let random = ThreadRandom;
        for _ in 0..200 {
            let n = random.roll(6);
            assert!((1..=6).contains(&n));
        }
    }

    #[test]
    fn test_pick_returns_an_option() {
        let options = ["a", "b"];
        let picked = ThreadRandom.pick(&options);
        assert!(options.contains(&picked));
    }
}
