//! Ordered set on top of the leveled structure.
//!
//! Level 0 holds every element in ascending order. Searches go right while
//! the next key is smaller than the target and drop a level otherwise, so
//! they always end on the *predecessor* of the target: the rightmost node
//! whose key is `< x`, or the sentinel.
//!
//! # Operations
//!
//! - `add(x)`: O(log n) expected, `false` if `x` is already present
//! - `remove(x)` / `take(x)`: O(log n) expected, one walk that unlinks as it
//!   descends
//! - `find(x)`: smallest element `>= x`
//! - `find_ge` / `find_lt`: successor / predecessor queries
//! - `find_with(finger, x)`: `find` that resumes from a cached search trail
//!   (see [`Finger`](crate::Finger))

use std::cmp::Ordering;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use rand_core::RngCore;
use smallvec::{smallvec, SmallVec};

use crate::compare::{Comparator, Natural};
use crate::config::Config;
use crate::height::{pick_height, XorShift64};
use crate::levels::{Chain, Levels};
use crate::node::{Idx, NULL, SENTINEL};

/// Source of set identities, so a finger can tell which set it belongs to.
static NEXT_SET_ID: AtomicU64 = AtomicU64::new(1);

fn next_set_id() -> u64 {
    NEXT_SET_ID.fetch_add(1, AtomicOrdering::Relaxed)
}

/// Search paths longer than this spill to the heap. 32 levels is roughly
/// four billion elements.
type Path = SmallVec<[Idx; 32]>;

/// A sorted set of unique elements backed by a skip list.
///
/// ```
/// use skipwise::SkiplistSSet;
///
/// let mut set = SkiplistSSet::new();
/// for x in [10, 4, 18, 2] {
///     set.add(x);
/// }
/// assert_eq!(set.find_ge(Some(&5)), Some(&10));
/// assert_eq!(set.find_lt(Some(&10)), Some(&4));
/// assert!(!set.add(4));
/// ```
pub struct SkiplistSSet<T, C = Natural, R = XorShift64> {
    pub(crate) core: Levels<T, ()>,
    pub(crate) cmp: C,
    rng: R,
    /// Identity checked by fingers.
    pub(crate) id: u64,
    /// Bumped whenever a node leaves the structure.
    pub(crate) epoch: u64,
}

impl<T: Ord> SkiplistSSet<T> {
    /// An empty set in natural order with an OS-seeded random source.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self::with_comparator_and_rng(Natural, config.rng(), config)
    }
}

impl<T, C: Comparator<T>> SkiplistSSet<T, C> {
    /// An empty set ordered by `cmp`.
    ///
    /// ```
    /// use skipwise::SkiplistSSet;
    ///
    /// let mut set = SkiplistSSet::with_comparator(|a: &i32, b: &i32| b.cmp(a));
    /// set.extend([1, 3, 2]);
    /// assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![3, 2, 1]);
    /// ```
    pub fn with_comparator(cmp: C) -> Self {
        let config = Config::default();
        Self::with_comparator_and_rng(cmp, config.rng(), config)
    }
}

impl<T, C: Comparator<T>, R: RngCore> SkiplistSSet<T, C, R> {
    /// An empty set with every collaborator supplied. Only `config.headroom`
    /// is read; `rng` replaces the seeded default.
    pub fn with_comparator_and_rng(cmp: C, rng: R, config: Config) -> Self {
        SkiplistSSet {
            core: Levels::new(config.headroom),
            cmp,
            rng,
            id: next_set_id(),
            epoch: 0,
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

    pub fn comparator(&self) -> &C {
        &self.cmp
    }

    // --- Queries ---

    /// Rightmost node whose key is `< x`, or the sentinel.
    fn find_pred(&self, x: &T) -> Idx {
        let cmp = &self.cmp;
        self.core
            .descend(|_, _, to| cmp.compare(to.item(), x) == Ordering::Less)
    }

    /// The smallest element `>= x`.
    pub fn find(&self, x: &T) -> Option<&T> {
        self.core.item_after(self.find_pred(x))
    }

    /// The smallest element `>= x`, or the minimum when `x` is `None`.
    pub fn find_ge(&self, x: Option<&T>) -> Option<&T> {
        match x {
            Some(x) => self.find(x),
            None => self.first(),
        }
    }

    /// The largest element `< x`, or the maximum when `x` is `None`.
    pub fn find_lt(&self, x: Option<&T>) -> Option<&T> {
        match x {
            Some(x) => self.core.item_at(self.find_pred(x)),
            None => self.last(),
        }
    }

    /// The stored element equal to `x`.
    pub fn get(&self, x: &T) -> Option<&T> {
        self.find(x)
            .filter(|y| self.cmp.compare(y, x) == Ordering::Equal)
    }

    pub fn contains(&self, x: &T) -> bool {
        self.get(x).is_some()
    }

    pub fn first(&self) -> Option<&T> {
        self.core.item_after(SENTINEL)
    }

    pub fn last(&self) -> Option<&T> {
        self.core.item_at(self.core.last())
    }

    // --- Mutation ---

    /// Insert `x`. Returns `false`, leaving the set untouched, if an equal
    /// element is already present.
    pub fn add(&mut self, x: T) -> bool {
        let levels = self.core.levels();
        let mut path: Path = smallvec![SENTINEL; levels];

        // path[r] is the node where the search dropped out of level r.
        let cmp = &self.cmp;
        let mut u = SENTINEL;
        for level in (0..levels).rev() {
            let mut duplicate = false;
            u = self.core.step_right(u, level, |_, to| match cmp.compare(to.item(), &x) {
                Ordering::Less => true,
                Ordering::Equal => {
                    duplicate = true;
                    false
                }
                Ordering::Greater => false,
            });
            if duplicate {
                return false;
            }
            path[level] = u;
        }

        let height = pick_height(&mut self.rng);
        if height >= levels {
            // New top levels route straight from the sentinel.
            path.resize(height + 1, SENTINEL);
        }
        let w = self.core.alloc(x, height);
        self.core.raise(height + 1, ());
        for (level, &pred) in path.iter().enumerate().take(height + 1) {
            self.core.splice_after(pred, level, w);
        }

        self.core.check_invariants();
        true
    }

    /// Remove the element equal to `x`. Returns `false` if there is none.
    pub fn remove(&mut self, x: &T) -> bool {
        self.take(x).is_some()
    }

    /// Remove and return the element equal to `x`.
    ///
    /// Unlinks on the way down: wherever the walk drops a level right before
    /// a node equal to `x`, that level's link is cut immediately.
    pub fn take(&mut self, x: &T) -> Option<T> {
        let mut target = NULL;
        let mut u = SENTINEL;
        for level in (0..self.core.levels()).rev() {
            let cmp = &self.cmp;
            u = self
                .core
                .step_right(u, level, |_, to| cmp.compare(to.item(), x) == Ordering::Less);
            let next = self.core.next(u, level);
            if next != NULL && self.cmp.compare(self.core.node(next).item(), x) == Ordering::Equal {
                target = self.core.unlink_after(u, level);
            }
        }
        if target == NULL {
            return None;
        }
        Some(self.finish_removal(target))
    }

    /// Remove a node known to be linked, located by its own key.
    fn remove_node(&mut self, target: Idx) -> T {
        let mut u = SENTINEL;
        for level in (0..self.core.levels()).rev() {
            let cmp = &self.cmp;
            let key = self.core.node(target).item();
            u = self
                .core
                .step_right(u, level, |_, to| cmp.compare(to.item(), key) == Ordering::Less);
            if self.core.next(u, level) == target {
                self.core.unlink_after(u, level);
            }
        }
        self.finish_removal(target)
    }

    fn finish_removal(&mut self, target: Idx) -> T {
        self.core.shrink();
        self.epoch += 1;
        let item = self.core.release(target);
        self.core.check_invariants();
        item
    }

    pub fn pop_first(&mut self) -> Option<T> {
        match self.core.next(SENTINEL, 0) {
            NULL => None,
            first => Some(self.remove_node(first)),
        }
    }

    pub fn pop_last(&mut self) -> Option<T> {
        match self.core.last() {
            SENTINEL => None,
            last => Some(self.remove_node(last)),
        }
    }

    pub fn clear(&mut self) {
        self.core.clear();
        self.epoch += 1;
    }

    // --- Iteration ---

    /// Ascending iterator over every element.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.core.chain(SENTINEL),
        }
    }

    /// Ascending iterator starting at the smallest element `>= x`.
    pub fn iter_from(&self, x: &T) -> Iter<'_, T> {
        Iter {
            inner: self.core.chain(self.find_pred(x)),
        }
    }

    /// A cursor over every element that can remove what it just yielded.
    pub fn cursor(&mut self) -> Cursor<'_, T, C, R> {
        let next = self.core.next(SENTINEL, 0);
        Cursor {
            set: self,
            next,
            last: NULL,
        }
    }

    /// A cursor starting at the smallest element `>= x`.
    pub fn cursor_from(&mut self, x: &T) -> Cursor<'_, T, C, R> {
        let next = self.core.next(self.find_pred(x), 0);
        Cursor {
            set: self,
            next,
            last: NULL,
        }
    }

    /// Check every structural invariant, panicking on the first violation.
    #[doc(hidden)]
    pub fn validate(&self) {
        let order = self.core.validate(|_, _, _, ()| {});
        for pair in order.windows(2) {
            let (a, b) = (self.core.node(pair[0]).item(), self.core.node(pair[1]).item());
            assert_eq!(
                self.cmp.compare(a, b),
                Ordering::Less,
                "INVARIANT VIOLATED: level 0 is not strictly increasing"
            );
        }
    }
}

impl<T, C: Comparator<T> + Default, R: RngCore + Default> Default for SkiplistSSet<T, C, R> {
    fn default() -> Self {
        Self::with_comparator_and_rng(C::default(), R::default(), Config::default())
    }
}

impl<T: Clone, C: Clone, R: Clone> Clone for SkiplistSSet<T, C, R> {
    /// The clone gets its own identity, so fingers never cross over.
    fn clone(&self) -> Self {
        SkiplistSSet {
            core: self.core.clone(),
            cmp: self.cmp.clone(),
            rng: self.rng.clone(),
            id: next_set_id(),
            epoch: 0,
        }
    }
}

impl<T: fmt::Debug, C: Comparator<T>, R: RngCore> fmt::Debug for SkiplistSSet<T, C, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: PartialEq, C: Comparator<T>, R: RngCore> PartialEq for SkiplistSSet<T, C, R> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq, C: Comparator<T>, R: RngCore> Eq for SkiplistSSet<T, C, R> {}

impl<T, C: Comparator<T>, R: RngCore> Extend<T> for SkiplistSSet<T, C, R> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for x in iter {
            self.add(x);
        }
    }
}

impl<T, C: Comparator<T> + Default, R: RngCore + Default> FromIterator<T> for SkiplistSSet<T, C, R> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::default();
        set.extend(iter);
        set
    }
}

impl<'a, T, C: Comparator<T>, R: RngCore> IntoIterator for &'a SkiplistSSet<T, C, R> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, C, R> IntoIterator for SkiplistSSet<T, C, R> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    /// Ascending owned iteration.
    fn into_iter(self) -> Self::IntoIter {
        self.core.into_items().into_iter()
    }
}

/// Ascending iterator over a [`SkiplistSSet`].
#[derive(Clone)]
pub struct Iter<'a, T> {
    inner: Chain<'a, T, ()>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

/// A forward cursor over a [`SkiplistSSet`] that can remove the element it
/// yielded last.
///
/// ```
/// use skipwise::SkiplistSSet;
///
/// let mut set: SkiplistSSet<i32> = (0..10).collect();
/// let mut cursor = set.cursor();
/// while let Some(&x) = cursor.next() {
///     if x % 3 == 0 {
///         cursor.remove();
///     }
/// }
/// assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![1, 2, 4, 5, 7, 8]);
/// ```
pub struct Cursor<'a, T, C, R> {
    set: &'a mut SkiplistSSet<T, C, R>,
    /// Node to yield next, or `NULL`.
    next: Idx,
    /// Node yielded last and still removable, or `NULL`.
    last: Idx,
}

impl<T, C: Comparator<T>, R: RngCore> Cursor<'_, T, C, R> {
    /// Advance and return the next element.
    pub fn next(&mut self) -> Option<&T> {
        if self.next == NULL {
            self.last = NULL;
            return None;
        }
        self.last = self.next;
        self.next = self.set.core.next(self.next, 0);
        self.set.core.item_at(self.last)
    }

    /// The element `next` would return, without advancing.
    pub fn peek(&self) -> Option<&T> {
        match self.next {
            NULL => None,
            next => self.set.core.item_at(next),
        }
    }

    /// Remove the element returned by the last call to `next`.
    ///
    /// Returns `None` if `next` has not been called yet, returned `None`, or
    /// its element was already removed.
    pub fn remove(&mut self) -> Option<T> {
        if self.last == NULL {
            return None;
        }
        let target = std::mem::replace(&mut self.last, NULL);
        Some(self.set.remove_node(target))
    }
}
