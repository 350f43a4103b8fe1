//! Node heights and the default random source.
//!
//! A node's height is the number of trailing 1-bits of a random `u32`, so the
//! chance that a node reaches level `j` halves with every level:
//!
//! ```text
//! P(height >= 0) = 1
//! P(height >= 1) = 1/2
//! P(height >= 2) = 1/4
//! ...
//! ```
//!
//! Heights are capped at [`MAX_HEIGHT`], which only matters for the one word
//! in 2^32 that is all ones.

use rand_core::{impls, RngCore, SeedableRng};

/// Largest height `pick_height` can return.
pub const MAX_HEIGHT: usize = u32::BITS as usize - 1;

/// Replacement state for an all-zero seed, which xorshift can never leave.
const ZERO_SEED_STATE: u64 = 0x12345678_9abcdef0;

/// Draw a height by counting the low-end run of 1-bits in one random word.
///
/// Consumes exactly one `next_u32` from `rng`.
pub fn pick_height<R: RngCore + ?Sized>(rng: &mut R) -> usize {
    let word = rng.next_u32();
    (word.trailing_ones() as usize).min(MAX_HEIGHT)
}

/// Marsaglia xorshift over a 64-bit word.
///
/// Fast and small, which is all height generation needs. Not suitable for
/// anything that has to be unpredictable.
#[derive(Debug, Clone)]
pub struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    /// Create a generator from a raw state word. Zero is remapped.
    pub fn new(state: u64) -> Self {
        let state = if state == 0 { ZERO_SEED_STATE } else { state };
        XorShift64 { state }
    }
}

impl Default for XorShift64 {
    /// Seeded from the operating system.
    fn default() -> Self {
        XorShift64::from_entropy()
    }
}

impl RngCore for XorShift64 {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for XorShift64 {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        XorShift64::new(u64::from_le_bytes(seed))
    }
}
