//! Construction options shared by both containers.

use rand_core::SeedableRng;

use crate::height::XorShift64;

/// Extra sentinel levels reserved whenever the sentinel has to grow.
pub const DEFAULT_HEADROOM: usize = 4;

/// Options for building a [`SkiplistSSet`](crate::SkiplistSSet) or
/// [`SkiplistList`](crate::SkiplistList).
///
/// ```
/// use skipwise::{Config, SkiplistList};
///
/// let config = Config::default().seed(42).headroom(8);
/// let mut list = SkiplistList::with_config(config);
/// list.push("a");
/// assert_eq!(list.len(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Seed for the default random source. `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Sentinel levels allocated beyond the current height when it grows.
    pub headroom: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            seed: None,
            headroom: DEFAULT_HEADROOM,
        }
    }
}

impl Config {
    /// Make height draws reproducible.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn headroom(mut self, headroom: usize) -> Self {
        self.headroom = headroom;
        self
    }

    /// Build the default random source this config describes.
    pub fn rng(&self) -> XorShift64 {
        match self.seed {
            Some(seed) => XorShift64::seed_from_u64(seed),
            None => XorShift64::from_entropy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_core::RngCore;

    #[test]
    fn seeded_configs_agree() {
        let config = Config::default().seed(5);
        assert_eq!(config.rng().next_u64(), config.rng().next_u64());
    }

    #[test]
    fn builder_sets_fields() {
        let config = Config::default().headroom(0).seed(1);
        assert_eq!(config.headroom, 0);
        assert_eq!(config.seed, Some(1));
    }
}
