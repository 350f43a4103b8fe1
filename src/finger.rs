//! Cached search trails for sequential lookups.
//!
//! A finger remembers, for every level, the node where the last search
//! dropped out of that level. A later search for a nearby key can skip the
//! upper part of the walk: it climbs the trail from level 0 until it finds an
//! edge that passes over the new key, then descends from there as usual.
//! Ascending scans (`find(0)`, `find(2)`, `find(4)`, ...) touch O(1) levels
//! per lookup on average instead of O(log n).
//!
//! A finger is only a cache. It is rebuilt on the spot when it was built for
//! another set, when any node has left its set since it was filled, or when
//! the set has grown taller than the finger. Additions alone never invalidate
//! it: every node it points at is still linked at the same levels.

use std::cmp::Ordering;

use rand_core::RngCore;
use tracing::trace;

use crate::compare::Comparator;
use crate::node::{Idx, NULL, SENTINEL};
use crate::set::SkiplistSSet;

/// A per-level search trail for one [`SkiplistSSet`].
///
/// ```
/// use skipwise::SkiplistSSet;
///
/// let set: SkiplistSSet<u32> = (0..100).map(|x| x * 2).collect();
/// let mut finger = set.finger();
/// for probe in 0..200 {
///     assert_eq!(set.find_with(&mut finger, &probe), set.find(&probe));
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Finger {
    /// `trail[r]` is the node where the last search left level `r`.
    trail: Vec<Idx>,
    owner: u64,
    epoch: u64,
}

impl Finger {
    /// Number of levels this finger covers.
    pub fn levels(&self) -> usize {
        self.trail.len()
    }

    fn fits(&self, owner: u64, epoch: u64, levels: usize) -> bool {
        self.owner == owner && self.epoch == epoch && self.trail.len() >= levels
    }
}

impl<T, C: Comparator<T>, R: RngCore> SkiplistSSet<T, C, R> {
    /// A fresh finger with every level pointing at the sentinel.
    pub fn finger(&self) -> Finger {
        Finger {
            trail: vec![SENTINEL; self.core.levels()],
            owner: self.id,
            epoch: self.epoch,
        }
    }

    /// Same result as [`find`](Self::find), resuming from `finger`'s trail
    /// and leaving the new trail in it.
    pub fn find_with(&self, finger: &mut Finger, x: &T) -> Option<&T> {
        let levels = self.core.levels();
        if !finger.fits(self.id, self.epoch, levels) {
            trace!(
                levels = finger.levels(),
                needed = levels,
                "rebuilding stale finger"
            );
            *finger = self.finger();
        }

        let cmp = &self.cmp;
        let below = |idx: Idx| {
            idx == SENTINEL || cmp.compare(self.core.node(idx).item(), x) == Ordering::Less
        };

        // Lowest level whose cached edge passes over x.
        let mut level = 0;
        while level < levels {
            let u = finger.trail[level];
            let next = self.core.next(u, level);
            let reaches =
                next == NULL || cmp.compare(self.core.node(next).item(), x) != Ordering::Less;
            if reaches && below(u) {
                break;
            }
            level += 1;
        }

        let (mut u, top) = if level < levels {
            (finger.trail[level], level + 1)
        } else {
            (SENTINEL, levels)
        };
        for level in (0..top).rev() {
            u = self
                .core
                .step_right(u, level, |_, to| cmp.compare(to.item(), x) == Ordering::Less);
            finger.trail[level] = u;
        }
        self.core.item_after(u)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::set::SkiplistSSet;

    fn evens(n: i32) -> SkiplistSSet<i32> {
        let mut set = SkiplistSSet::with_config(Config::default().seed(42));
        set.extend((0..n).map(|x| x * 2));
        set
    }

    #[test]
    fn ascending_matches_find() {
        let set = evens(500);
        let mut finger = set.finger();
        for probe in -1..1002 {
            assert_eq!(set.find_with(&mut finger, &probe), set.find(&probe), "probe {}", probe);
        }
    }

    #[test]
    fn descending_and_random_match_find() {
        let set = evens(300);
        let mut finger = set.finger();
        for probe in (0..600).rev() {
            assert_eq!(set.find_with(&mut finger, &probe), set.find(&probe), "probe {}", probe);
        }
        for i in 0..600 {
            let probe = (i * 389) % 601;
            assert_eq!(set.find_with(&mut finger, &probe), set.find(&probe), "probe {}", probe);
        }
    }

    #[test]
    fn finger_on_empty_set() {
        let set: SkiplistSSet<i32> = SkiplistSSet::new();
        let mut finger = set.finger();
        assert_eq!(finger.levels(), 0);
        assert_eq!(set.find_with(&mut finger, &3), None);
    }

    #[test]
    fn rebuilt_after_growth() {
        let mut set = evens(1);
        let mut finger = set.finger();
        let before = finger.levels();
        set.extend((1..2000).map(|x| x * 2));
        assert!(set.height() > before);
        assert_eq!(set.find_with(&mut finger, &501), Some(&502));
        assert_eq!(finger.levels(), set.height());
    }

    #[test]
    fn survives_removals() {
        let mut set = evens(200);
        let mut finger = set.finger();
        assert_eq!(set.find_with(&mut finger, &100), Some(&100));

        for x in (0..400).step_by(4) {
            set.remove(&x);
        }
        // Freed slots get recycled for new nodes; the finger must not follow them.
        set.extend((0..50).map(|x| x * 8 + 1));
        for probe in 0..400 {
            assert_eq!(set.find_with(&mut finger, &probe), set.find(&probe), "probe {}", probe);
        }
    }

    #[test]
    fn finger_from_another_set_is_ignored() {
        let a = evens(100);
        let b: SkiplistSSet<i32> = (0..100).map(|x| x * 3).collect();
        let mut finger = a.finger();
        assert_eq!(a.find_with(&mut finger, &150), Some(&150));
        assert_eq!(b.find_with(&mut finger, &150), Some(&150));
        assert_eq!(b.find_with(&mut finger, &151), Some(&153));
        assert_eq!(a.find_with(&mut finger, &151), Some(&152));
    }
}
