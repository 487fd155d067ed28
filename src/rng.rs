//! Linear congruential generator, `x' = (x * A + C) mod M`.
//!
//! `M` is a power of two, `C` is odd and `A - 1` is a multiple of 4 (the only prime factor
//! of `M` is 2), so every seed walks the full period of `M` states before repeating.

use crate::sequence::Move;

/// Modulus, 2^15.
pub const PERIOD: u16 = 32768;
/// Multiplier, 2^9 + 1.
pub const MULTIPLIER: u16 = 513;
/// Increment.
pub const INCREMENT: u16 = 1;

/// Advance a generator state by one step.
///
/// 2^15 divides 2^16, so wrapping 16 bit arithmetic reduced mod `PERIOD` gives the exact
/// result.
pub fn next_state(state: u16) -> u16 {
    state.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT) % PERIOD
}

/// The move encoded by a state: its two most significant bits out of fifteen.
pub fn move_from_state(state: u16) -> Move {
    Move::from_index(((state % PERIOD) >> 13) as u8)
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Lcg {
    state: u16,
}

impl Lcg {
    /// Start from a persisted word. Whatever is stored (including an erased `0xFFFF`) is
    /// reduced into range.
    pub fn from_seed(seed: u16) -> Self {
        Lcg { state: seed % PERIOD }
    }

    pub fn state(&self) -> u16 {
        self.state
    }

    /// Advance the generator and return the move for the new state.
    pub fn draw(&mut self) -> Move {
        self.state = next_state(self.state);
        move_from_state(self.state)
    }

    /// Nudge the state while the game sits idle, so the seed a game starts from depends on
    /// how long the board waited.
    pub fn drift(&mut self) {
        self.state = (self.state + 1) % PERIOD;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_full_period(seed: u16) {
        let mut seen = vec![false; PERIOD as usize];
        let mut state = seed;
        for step in 0..PERIOD as usize {
            assert!(!seen[state as usize], "seed {} revisits {} after {} draws", seed, state, step);
            seen[state as usize] = true;
            state = next_state(state);
        }
        assert_eq!(state, seed, "seed {} does not return after a full period", seed);
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_full_period() {
        for &seed in &[0u16, 1, 2, 12345, 16384, 32767] {
            assert_full_period(seed);
        }
    }

    #[test]
    fn test_first_draw_from_zero() {
        let mut rng = Lcg::from_seed(0);
        assert_eq!(rng.draw(), Move::First);
        assert_eq!(rng.state(), 1);
    }

    #[test]
    fn test_known_states() {
        assert_eq!(next_state(1), 514);
        assert_eq!(next_state(514), 1539);
        assert_eq!(next_state(32767), ((32767u32 * 513 + 1) % 32768) as u16);
    }

    #[test]
    fn test_every_state_gives_a_one_hot_move() {
        for state in 0..PERIOD {
            let bits = move_from_state(state).bits();
            assert!(bits == 1 || bits == 2 || bits == 4 || bits == 8, "state {} -> {}", state, bits);
        }
        assert_eq!(move_from_state(0x1FFF), Move::First);
        assert_eq!(move_from_state(0x2000), Move::Second);
        assert_eq!(move_from_state(0x4000), Move::Third);
        assert_eq!(move_from_state(0x7FFF), Move::Fourth);
    }

    #[test]
    fn test_seed_reduced_into_range() {
        assert_eq!(Lcg::from_seed(0xFFFF).state(), 0x7FFF);
        assert_eq!(Lcg::from_seed(PERIOD).state(), 0);
    }

    #[test]
    fn test_drift_wraps() {
        let mut rng = Lcg::from_seed(PERIOD - 1);
        rng.drift();
        assert_eq!(rng.state(), 0);
        rng.drift();
        assert_eq!(rng.state(), 1);
    }
}
