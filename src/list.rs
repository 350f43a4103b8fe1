//! Indexable sequence on top of the leveled structure.
//!
//! No comparisons happen here. Instead every edge records its *span*: how
//! many level-0 steps it covers. Counting the sentinel as position 0, the
//! element of rank `i` as position `i + 1` and `NULL` as position `len + 1`,
//! an edge from `u` to `v` has span `pos(v) - pos(u)`:
//!
//! ```text
//! Level 1: HEAD --3--> B --------------3-------------> NULL
//! Level 0: HEAD -1-> @ -1-> A -1-> B -1-> C -1-> D -1-> NULL
//! pos:      0        1      2      3      4      5      6
//! ```
//!
//! A rank search adds up spans while stepping right, and goes right only
//! while the running position stays short of the target.
//!
//! # Operations
//!
//! - `insert(i, x)`: O(log n) expected. Every edge the walk drops out of
//!   grows by one; at the levels the new node joins, the old edge is split
//!   between the predecessor and the new node.
//! - `remove(i)`: O(log n) expected. Every edge the walk drops out of shrinks
//!   by one; where the next node is the target, its outgoing span is merged
//!   into the predecessor's edge.
//! - `get(i)` / `get_mut(i)` / `set(i, x)`: O(log n) expected.

use std::fmt;
use std::ops::{Index, IndexMut};

use rand_core::RngCore;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::height::{pick_height, XorShift64};
use crate::levels::{Chain, Levels};
use crate::node::{Idx, NULL, SENTINEL};

/// A sequence with O(log n) expected access, insertion and removal by rank.
///
/// ```
/// use skipwise::SkiplistList;
///
/// let mut list: SkiplistList<u32> = (0..50).collect();
/// list.remove(10).unwrap();
/// assert_eq!(list.get(10), Ok(&11));
/// assert_eq!(list.len(), 49);
/// ```
pub struct SkiplistList<T, R = XorShift64> {
    core: Levels<T, usize>,
    rng: R,
}

impl<T> SkiplistList<T> {
    /// An empty list with an OS-seeded random source.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self::with_rng(config.rng(), config)
    }
}

impl<T, R: RngCore> SkiplistList<T, R> {
    /// An empty list drawing heights from `rng`. Only `config.headroom` is
    /// read.
    pub fn with_rng(rng: R, config: Config) -> Self {
        SkiplistList {
            core: Levels::new(config.headroom),
            rng,
        }
    }

    pub fn len(&self) -> usize {
        self.core.len()
    }

    pub fn is_empty(&self) -> bool {
        self.core.len() == 0
    }

    /// Number of levels in use; 0 when empty.
    pub fn height(&self) -> usize {
        self.core.levels()
    }

    fn check_index(&self, index: usize, len: usize) -> Result<()> {
        if index < len {
            Ok(())
        } else {
            Err(Error::IndexOutOfBounds {
                index,
                len: self.core.len(),
            })
        }
    }

    /// The node right before rank `index`, and `index` minus that node's
    /// rank (the sentinel has rank -1).
    fn locate(&self, index: usize) -> (Idx, usize) {
        let target = index + 1;
        let mut pos = 0usize;
        let u = self.core.descend(|level, from, _| {
            let span = from.spans[level];
            if pos + span < target {
                pos += span;
                true
            } else {
                false
            }
        });
        (u, target - pos)
    }

    /// Node holding rank `index`. The caller checks bounds.
    fn node_at(&self, index: usize) -> Idx {
        let (u, _) = self.locate(index);
        self.core.next(u, 0)
    }

    // --- Access ---

    pub fn get(&self, index: usize) -> Result<&T> {
        self.check_index(index, self.core.len())?;
        Ok(self.core.node(self.node_at(index)).item())
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        self.check_index(index, self.core.len())?;
        let idx = self.node_at(index);
        Ok(self.core.node_mut(idx).item_mut())
    }

    /// Replace the element at `index`, returning the old one.
    pub fn set(&mut self, index: usize, x: T) -> Result<T> {
        Ok(std::mem::replace(self.get_mut(index)?, x))
    }

    pub fn first(&self) -> Option<&T> {
        self.core.item_after(SENTINEL)
    }

    pub fn last(&self) -> Option<&T> {
        self.core.item_at(self.core.last())
    }

    // --- Mutation ---

    /// Insert `x` so that it ends up at rank `index`, shifting later elements
    /// up by one. `index` may equal `len()` to append.
    pub fn insert(&mut self, index: usize, x: T) -> Result<()> {
        let len = self.core.len();
        self.check_index(index, len + 1)?;

        let height = pick_height(&mut self.rng);
        let w = self.core.alloc(x, height);
        // New sentinel edges run to NULL, which sits at position len + 1.
        self.core.raise(height + 1, len + 1);

        let target = index + 1;
        let mut pos = 0usize;
        let mut u = SENTINEL;
        for level in (0..self.core.levels()).rev() {
            u = self.core.step_right(u, level, |from, _| {
                let span = from.spans[level];
                if pos + span < target {
                    pos += span;
                    true
                } else {
                    false
                }
            });

            // The new element lands under this edge either way.
            let span = self.core.node(u).spans[level] + 1;
            if level <= height {
                self.core.splice_after(u, level, w);
                self.core.node_mut(u).spans[level] = target - pos;
                self.core.node_mut(w).spans[level] = span - (target - pos);
            } else {
                self.core.node_mut(u).spans[level] = span;
            }
        }

        self.core.check_invariants();
        Ok(())
    }

    /// Append `x`.
    pub fn push(&mut self, x: T) {
        let len = self.core.len();
        if let Err(err) = self.insert(len, x) {
            unreachable!("append rejected: {}", err);
        }
    }

    /// Remove and return the element at `index`, shifting later elements down
    /// by one.
    pub fn remove(&mut self, index: usize) -> Result<T> {
        self.check_index(index, self.core.len())?;
        Ok(self.remove_at(index))
    }

    fn remove_at(&mut self, index: usize) -> T {
        let target = index + 1;
        let mut pos = 0usize;
        let mut u = SENTINEL;
        let mut removed = NULL;
        for level in (0..self.core.levels()).rev() {
            u = self.core.step_right(u, level, |from, _| {
                let span = from.spans[level];
                if pos + span < target {
                    pos += span;
                    true
                } else {
                    false
                }
            });

            let span = self.core.node(u).spans[level];
            let next = self.core.next(u, level);
            if next != NULL && pos + span == target {
                // Next node is the target: absorb its outgoing edge.
                let after = self.core.node(next).spans[level];
                removed = self.core.unlink_after(u, level);
                self.core.node_mut(u).spans[level] = span - 1 + after;
            } else {
                self.core.node_mut(u).spans[level] = span - 1;
            }
        }

        if removed == NULL {
            unreachable!("rank {} not found below len {}", index, self.core.len());
        }
        self.core.shrink();
        let item = self.core.release(removed);
        self.core.check_invariants();
        item
    }

    /// Remove and return the last element.
    pub fn pop(&mut self) -> Option<T> {
        match self.core.len() {
            0 => None,
            len => Some(self.remove_at(len - 1)),
        }
    }

    /// Keep only the elements for which `keep` returns `true`, in order.
    pub fn retain<F: FnMut(&T) -> bool>(&mut self, mut keep: F) {
        let mut index = 0;
        while index < self.core.len() {
            let idx = self.node_at(index);
            if keep(self.core.node(idx).item()) {
                index += 1;
            } else {
                self.remove_at(index);
            }
        }
    }

    pub fn clear(&mut self) {
        self.core.clear();
    }

    /// Iterator over the elements in rank order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.core.chain(SENTINEL),
            remaining: self.core.len(),
        }
    }

    /// Check every structural invariant, panicking on the first violation.
    ///
    /// Spans are checked against level-0 positions, independently of the
    /// stored payloads.
    #[doc(hidden)]
    pub fn validate(&self) {
        self.core.validate(|level, from, to, span| {
            assert_eq!(
                span,
                to - from,
                "INVARIANT VIOLATED: level {} edge {}->{} has span {}",
                level,
                from,
                to,
                span
            );
        });
    }
}

impl<T, R: RngCore + Default> Default for SkiplistList<T, R> {
    fn default() -> Self {
        Self::with_rng(R::default(), Config::default())
    }
}

impl<T: Clone, R: Clone> Clone for SkiplistList<T, R> {
    fn clone(&self) -> Self {
        SkiplistList {
            core: self.core.clone(),
            rng: self.rng.clone(),
        }
    }
}

impl<T: fmt::Debug, R: RngCore> fmt::Debug for SkiplistList<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq, R: RngCore> PartialEq for SkiplistList<T, R> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq, R: RngCore> Eq for SkiplistList<T, R> {}

impl<T, R: RngCore> Index<usize> for SkiplistList<T, R> {
    type Output = T;

    /// Panics if `index` is out of range.
    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Ok(item) => item,
            Err(err) => panic!("{}", err),
        }
    }
}

impl<T, R: RngCore> IndexMut<usize> for SkiplistList<T, R> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.get_mut(index) {
            Ok(item) => item,
            Err(err) => panic!("{}", err),
        }
    }
}

impl<T, R: RngCore> Extend<T> for SkiplistList<T, R> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for x in iter {
            self.push(x);
        }
    }
}

impl<T, R: RngCore + Default> FromIterator<T> for SkiplistList<T, R> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::default();
        list.extend(iter);
        list
    }
}

impl<'a, T, R: RngCore> IntoIterator for &'a SkiplistList<T, R> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, R> IntoIterator for SkiplistList<T, R> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.core.into_items().into_iter()
    }
}

/// Rank-order iterator over a [`SkiplistList`].
#[derive(Clone)]
pub struct Iter<'a, T> {
    inner: Chain<'a, T, usize>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.inner.next()?;
        self.remaining -= 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
