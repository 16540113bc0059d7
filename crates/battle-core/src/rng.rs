//! Deterministic random number generator
//!
//! Uses a simple xorshift64 algorithm so a seeded battle picks the same
//! opponent on every platform.

use serde::{Deserialize, Serialize};

/// A deterministic random number generator
///
/// The shell seeds it (from configuration or the wall clock); nothing in the
/// core reaches for an ambient source of randomness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRng {
    state: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        // Ensure non-zero state (xorshift requires this)
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Create an RNG from a saved state
    pub fn from_state(state: u64) -> Self {
        Self::new(state)
    }

    /// Get the current state
    pub fn state(&self) -> u64 {
        self.state
    }

    /// Generate the next raw u64 value
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Generate an index in `[0, len)`; `len` must be non-zero
    pub fn index(&mut self, len: usize) -> usize {
        (self.next_u64() % len as u64) as usize
    }

    /// Pick a random element from a slice
    pub fn pick<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        if slice.is_empty() {
            None
        } else {
            let i = self.index(slice.len());
            Some(&slice[i])
        }
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(12345)
    }
}
