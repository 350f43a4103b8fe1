//! Arena nodes.
//!
//! Every node lives in a `Vec` owned by [`Levels`](crate::levels::Levels) and
//! is addressed by a `u32` index. Forward links are indices too, so removing a
//! node can never leave a dangling reference behind, only a `NULL`.

use smallvec::{smallvec, SmallVec};

/// Node index type. u32 saves space vs usize on 64-bit.
pub(crate) type Idx = u32;

/// Null index marker: "no successor at this level".
pub(crate) const NULL: Idx = Idx::MAX;

/// The sentinel always occupies the first arena slot.
pub(crate) const SENTINEL: Idx = 0;

/// A node in the leveled structure.
///
/// `next[r]` is the successor at level `r` and `spans[r]` is the metadata of
/// that edge. The set stores `()` spans, which cost nothing; the list stores
/// the number of level-0 steps the edge covers.
///
/// Half of all nodes have height 0 and a quarter have height 1, so two
/// inline slots keep most nodes off the heap.
#[derive(Clone)]
pub(crate) struct Node<T, S> {
    /// `None` for the sentinel and for vacant slots.
    pub item: Option<T>,
    pub next: SmallVec<[Idx; 2]>,
    pub spans: SmallVec<[S; 2]>,
}

impl<T, S: Copy + Default> Node<T, S> {
    /// A fresh, unlinked node of the given height (so `height + 1` levels).
    pub fn new(item: T, height: usize) -> Self {
        Node {
            item: Some(item),
            next: smallvec![NULL; height + 1],
            spans: smallvec![S::default(); height + 1],
        }
    }

    pub fn sentinel(width: usize) -> Self {
        Node {
            item: None,
            next: smallvec![NULL; width],
            spans: smallvec![S::default(); width],
        }
    }

    /// Number of levels this node takes part in.
    #[inline]
    pub fn levels(&self) -> usize {
        self.next.len()
    }

    /// The payload of a live node.
    ///
    /// Navigators only ever look at payloads of nodes reached through a
    /// forward link, and the sentinel is never the target of one.
    #[inline]
    pub fn item(&self) -> &T {
        match &self.item {
            Some(item) => item,
            None => unreachable!("payload read from the sentinel or a vacant slot"),
        }
    }

    #[inline]
    pub fn item_mut(&mut self) -> &mut T {
        match &mut self.item {
            Some(item) => item,
            None => unreachable!("payload read from the sentinel or a vacant slot"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_node_is_unlinked() {
        let node: Node<&str, usize> = Node::new("a", 2);
        assert_eq!(node.levels(), 3);
        assert!(node.next.iter().all(|&n| n == NULL));
        assert_eq!(node.spans.as_slice(), &[0, 0, 0]);
        assert_eq!(node.item(), &"a");
    }

    #[test]
    fn short_nodes_stay_inline() {
        let node: Node<u8, usize> = Node::new(1, 1);
        assert!(!node.next.spilled());
        assert!(!node.spans.spilled());
    }

    #[test]
    #[should_panic]
    fn sentinel_has_no_payload() {
        let node: Node<u8, ()> = Node::sentinel(4);
        node.item();
    }
}
