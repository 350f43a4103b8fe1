//! The leveled structure shared by both containers.
//!
//! Level 0 is a singly linked list of every element, and each level above is
//! a sparser express lane over the one below:
//!
//! ```text
//! Level 2: HEAD ----------------> C ----------------------> NULL
//! Level 1: HEAD ------> A ------> C ------------> E ------> NULL
//! Level 0: HEAD -> @ -> A -> B -> C -> D -> E -> F -> G --> NULL
//! ```
//!
//! All searches have the same shape: start at the sentinel (`HEAD`) on the top
//! level, step right while the navigator says so, then drop a level, and stop
//! after level 0. The set decides by comparing keys, the list by adding up edge
//! spans. [`Levels::descend`] is that walk; navigators that mutate links on the
//! way down drive [`Levels::step_right`] one level at a time instead.
//!
//! Vacant arena slots are chained into a free list through `next[0]`, so
//! releasing a node never allocates.

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::node::{Idx, Node, NULL, SENTINEL};

/// Arena, sentinel and counters of one skip list.
#[derive(Clone)]
pub(crate) struct Levels<T, S> {
    /// Arena of nodes. Slot 0 is the sentinel.
    nodes: Vec<Node<T, S>>,
    /// Head of the vacant-slot chain, or `NULL`.
    free_head: Idx,
    /// Number of levels in use. The top level is `levels - 1`.
    levels: usize,
    /// Number of live elements.
    len: usize,
    /// Extra sentinel levels reserved whenever the sentinel grows.
    headroom: usize,
}

impl<T, S: Copy + Default> Levels<T, S> {
    pub fn new(headroom: usize) -> Self {
        Levels {
            nodes: vec![Node::sentinel(headroom.max(1))],
            free_head: NULL,
            levels: 0,
            len: 0,
            headroom,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn levels(&self) -> usize {
        self.levels
    }

    // --- Node access helpers ---

    #[inline]
    pub fn node(&self, idx: Idx) -> &Node<T, S> {
        &self.nodes[idx as usize]
    }

    #[inline]
    pub fn node_mut(&mut self, idx: Idx) -> &mut Node<T, S> {
        &mut self.nodes[idx as usize]
    }

    #[inline]
    pub fn next(&self, idx: Idx, level: usize) -> Idx {
        self.nodes[idx as usize].next[level]
    }

    /// Payload stored at `idx`; `None` for the sentinel.
    #[inline]
    pub fn item_at(&self, idx: Idx) -> Option<&T> {
        self.nodes[idx as usize].item.as_ref()
    }

    /// Payload of the level-0 successor of `idx`.
    #[inline]
    pub fn item_after(&self, idx: Idx) -> Option<&T> {
        match self.next(idx, 0) {
            NULL => None,
            next => self.item_at(next),
        }
    }

    /// The last node on level 0, or the sentinel when empty.
    pub fn last(&self) -> Idx {
        self.descend(|_, _, _| true)
    }

    // --- Traversal ---

    /// Move right along `level` from `u` while a successor exists and
    /// `advance(from, to)` holds. Returns the node the walk stopped on.
    #[inline]
    pub fn step_right<F>(&self, mut u: Idx, level: usize, mut advance: F) -> Idx
    where
        F: FnMut(&Node<T, S>, &Node<T, S>) -> bool,
    {
        loop {
            let from = self.node(u);
            let next = from.next[level];
            if next == NULL || !advance(from, self.node(next)) {
                return u;
            }
            u = next;
        }
    }

    /// Walk from the sentinel on the top level down to level 0, stepping
    /// right at each level while `advance(level, from, to)` holds.
    ///
    /// Visits O(log n) nodes in expectation.
    pub fn descend<F>(&self, mut advance: F) -> Idx
    where
        F: FnMut(usize, &Node<T, S>, &Node<T, S>) -> bool,
    {
        let mut u = SENTINEL;
        for level in (0..self.levels).rev() {
            u = self.step_right(u, level, |from, to| advance(level, from, to));
        }
        u
    }

    // --- Structural changes ---

    /// Place a new, unlinked node of the given height in the arena.
    ///
    /// The sentinel is widened here if needed, so once this returns the caller
    /// can link the node in without allocating again.
    pub fn alloc(&mut self, item: T, height: usize) -> Idx {
        let needed = height + 1;
        let sentinel = &mut self.nodes[SENTINEL as usize];
        if sentinel.levels() < needed {
            let width = needed + self.headroom;
            sentinel.next.resize(width, NULL);
            sentinel.spans.resize(width, S::default());
        }

        let node = Node::new(item, height);
        let idx = if self.free_head != NULL {
            let idx = self.free_head;
            self.free_head = self.next(idx, 0);
            self.nodes[idx as usize] = node;
            idx
        } else {
            assert!(self.nodes.len() < NULL as usize, "skip list arena is full");
            self.nodes.push(node);
            (self.nodes.len() - 1) as Idx
        };
        self.len += 1;
        idx
    }

    /// Take the payload out of an unlinked node and recycle its slot.
    pub fn release(&mut self, idx: Idx) -> T {
        let free_head = self.free_head;
        let node = self.node_mut(idx);
        let item = node.item.take();
        node.next.truncate(1);
        node.next[0] = free_head;
        node.spans.clear();
        self.free_head = idx;
        self.len -= 1;
        match item {
            Some(item) => item,
            None => unreachable!("released vacant slot {}", idx),
        }
    }

    /// Raise the number of levels in use. New sentinel edges point at `NULL`
    /// and carry `fill` as their span.
    pub fn raise(&mut self, levels: usize, fill: S) {
        if levels <= self.levels {
            return;
        }
        let sentinel = &mut self.nodes[SENTINEL as usize];
        for level in self.levels..levels {
            sentinel.next[level] = NULL;
            sentinel.spans[level] = fill;
        }
        trace!(from = self.levels, to = levels, "raised skip list height");
        self.levels = levels;
    }

    /// Drop top levels the sentinel no longer links out of.
    pub fn shrink(&mut self) {
        let before = self.levels;
        while self.levels > 0 && self.next(SENTINEL, self.levels - 1) == NULL {
            self.levels -= 1;
        }
        if self.levels != before {
            trace!(from = before, to = self.levels, "lowered skip list height");
        }
    }

    /// Link `w` in directly after `u` on `level`.
    #[inline]
    pub fn splice_after(&mut self, u: Idx, level: usize, w: Idx) {
        let next = self.next(u, level);
        self.node_mut(w).next[level] = next;
        self.node_mut(u).next[level] = w;
    }

    /// Unlink the successor of `u` on `level`, returning it.
    #[inline]
    pub fn unlink_after(&mut self, u: Idx, level: usize) -> Idx {
        let target = self.next(u, level);
        let after = self.next(target, level);
        self.node_mut(u).next[level] = after;
        target
    }

    pub fn clear(&mut self) {
        debug!(len = self.len, levels = self.levels, "clearing skip list");
        self.nodes.truncate(1);
        let sentinel = &mut self.nodes[SENTINEL as usize];
        sentinel.next.iter_mut().for_each(|next| *next = NULL);
        sentinel.spans.iter_mut().for_each(|span| *span = S::default());
        self.free_head = NULL;
        self.levels = 0;
        self.len = 0;
    }

    /// Move every payload out, in level-0 order.
    pub fn into_items(mut self) -> Vec<T> {
        let mut items = Vec::with_capacity(self.len);
        let mut idx = self.next(SENTINEL, 0);
        while idx != NULL {
            let node = self.node_mut(idx);
            let next = node.next[0];
            if let Some(item) = node.item.take() {
                items.push(item);
            }
            idx = next;
        }
        items
    }

    pub fn chain(&self, start: Idx) -> Chain<'_, T, S> {
        Chain {
            core: self,
            current: start,
        }
    }

    // --- Invariant checking ---

    /// Cheap structural checks run after every mutation in debug builds.
    #[cfg(debug_assertions)]
    pub fn check_invariants(&self) {
        let sentinel = self.node(SENTINEL);
        assert!(
            sentinel.levels() >= self.levels,
            "INVARIANT VIOLATED: sentinel width {} < levels {}",
            sentinel.levels(),
            self.levels
        );
        assert_eq!(
            self.levels == 0,
            self.len == 0,
            "INVARIANT VIOLATED: levels={} len={}",
            self.levels,
            self.len
        );
        if self.levels > 0 {
            assert_ne!(
                sentinel.next[self.levels - 1],
                NULL,
                "INVARIANT VIOLATED: top level {} is empty",
                self.levels - 1
            );
        }
        if self.levels < sentinel.levels() {
            assert_eq!(
                sentinel.next[self.levels],
                NULL,
                "INVARIANT VIOLATED: level {} above the top is linked",
                self.levels
            );
        }
    }

    #[cfg(not(debug_assertions))]
    #[inline(always)]
    pub fn check_invariants(&self) {}

    /// Full structural validation. Panics on the first violation.
    ///
    /// Every level must be an ordered subsequence of level 0 containing
    /// exactly the nodes tall enough for it. `check_edge(level, from, to,
    /// span)` is called for every edge with the level-0 positions of both
    /// ends: the sentinel sits at position 0 and `NULL` at `len + 1`.
    ///
    /// Returns the level-0 node order.
    pub fn validate<F>(&self, mut check_edge: F) -> Vec<Idx>
    where
        F: FnMut(usize, usize, usize, S),
    {
        let mut order = Vec::with_capacity(self.len);
        let mut position: FxHashMap<Idx, usize> = FxHashMap::default();
        position.insert(SENTINEL, 0);

        let mut idx = self.next(SENTINEL, 0);
        while idx != NULL {
            assert!(
                self.node(idx).item.is_some(),
                "INVARIANT VIOLATED: vacant slot {} linked on level 0",
                idx
            );
            order.push(idx);
            let fresh = position.insert(idx, order.len()).is_none();
            assert!(fresh, "INVARIANT VIOLATED: node {} reached twice", idx);
            idx = self.next(idx, 0);
        }
        assert_eq!(
            order.len(),
            self.len,
            "INVARIANT VIOLATED: level 0 holds {} nodes, len={}",
            order.len(),
            self.len
        );

        let end = self.len + 1;
        for level in 0..self.levels {
            let mut u = SENTINEL;
            let mut linked = 0usize;
            loop {
                let node = self.node(u);
                assert!(
                    node.levels() > level,
                    "INVARIANT VIOLATED: node {} linked on level {} above its height",
                    u,
                    level
                );
                let next = node.next[level];
                let from = position[&u];
                let to = match next {
                    NULL => end,
                    next => match position.get(&next) {
                        Some(&pos) => pos,
                        None => panic!("INVARIANT VIOLATED: level {} reaches unlisted node {}", level, next),
                    },
                };
                assert!(to > from, "INVARIANT VIOLATED: level {} steps backwards", level);
                check_edge(level, from, to, node.spans[level]);
                if next == NULL {
                    break;
                }
                linked += 1;
                u = next;
            }
            let tall = order
                .iter()
                .filter(|&&idx| self.node(idx).levels() > level)
                .count();
            assert_eq!(
                linked, tall,
                "INVARIANT VIOLATED: level {} links {} of {} tall nodes",
                level, linked, tall
            );
        }

        for &idx in &order {
            assert!(
                self.node(idx).levels() <= self.levels,
                "INVARIANT VIOLATED: node {} is taller than the structure",
                idx
            );
        }

        order
    }
}

/// Level-0 iterator over the payloads following `current`.
pub(crate) struct Chain<'a, T, S> {
    core: &'a Levels<T, S>,
    current: Idx,
}

impl<T, S> Clone for Chain<'_, T, S> {
    fn clone(&self) -> Self {
        Chain {
            core: self.core,
            current: self.current,
        }
    }
}

impl<'a, T, S: Copy + Default> Iterator for Chain<'a, T, S> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.core.next(self.current, 0);
        if next == NULL {
            return None;
        }
        self.current = next;
        self.core.item_at(next)
    }
}
