use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;

/// Source of uniform random integers for point drops and redemption codes.
pub trait Dice {
    fn roll(&mut self, range: RangeInclusive<u32>) -> u32;
}

/// `rand`-backed dice used by the server.
pub struct RandomDice {
    rng: StdRng,
}

impl RandomDice {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Dice for RandomDice {
    fn roll(&mut self, range: RangeInclusive<u32>) -> u32 {
        self.rng.gen_range(range)
    }
}

/// Always returns the same value, clamped into the requested range.
#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub struct FixedDice(pub u32);

#[cfg(test)]
impl Dice for FixedDice {
    fn roll(&mut self, range: RangeInclusive<u32>) -> u32 {
        self.0.clamp(*range.start(), *range.end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_dice_stays_in_range() {
        let mut dice = RandomDice::seeded(7);
        for _ in 0..500 {
            let value = dice.roll(5..=20);
            assert!((5..=20).contains(&value), "out of range: {value}");
        }
    }

    #[test]
    fn seeded_dice_is_reproducible() {
        let mut a = RandomDice::seeded(42);
        let mut b = RandomDice::seeded(42);
        let first: Vec<u32> = (0..16).map(|_| a.roll(0..=35)).collect();
        let second: Vec<u32> = (0..16).map(|_| b.roll(0..=35)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn fixed_dice_clamps() {
        let mut dice = FixedDice(12);
        assert_eq!(dice.roll(5..=20), 12);
        assert_eq!(dice.roll(5..=10), 10);
        assert_eq!(dice.roll(15..=20), 15);
    }
}
