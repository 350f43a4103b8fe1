//! Property-based tests for the indexable sequence.
//!
//! Operations are mirrored on a `Vec`. Span bookkeeping is validated after
//! every step, independently of the payloads.

use proptest::prelude::*;
use skipwise::{Config, Error, SkiplistList};

// =============================================================================
// Test helpers
// =============================================================================

/// Positions are fractions of the current length so they stay mostly in range.
#[derive(Clone, Debug)]
enum ListOp {
    Insert { pos_pct: f64, value: u32 },
    Remove { pos_pct: f64 },
    Set { pos_pct: f64, value: u32 },
    Push(u32),
    Pop,
}

fn arbitrary_list_op() -> impl Strategy<Value = ListOp> {
    prop_oneof![
        4 => (0.0..=1.0f64, any::<u32>()).prop_map(|(pos_pct, value)| ListOp::Insert { pos_pct, value }),
        3 => (0.0..=1.0f64).prop_map(|pos_pct| ListOp::Remove { pos_pct }),
        1 => (0.0..=1.0f64, any::<u32>()).prop_map(|(pos_pct, value)| ListOp::Set { pos_pct, value }),
        2 => any::<u32>().prop_map(ListOp::Push),
        1 => Just(ListOp::Pop),
    ]
}

fn scaled(pct: f64, len: usize) -> usize {
    ((pct * len as f64) as usize).min(len)
}

// =============================================================================
// Model properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Rank order and spans stay consistent with a Vec after every step
    #[test]
    fn matches_vec(
        seed in any::<u64>(),
        ops in prop::collection::vec(arbitrary_list_op(), 1..200),
    ) {
        let mut list = SkiplistList::with_config(Config::default().seed(seed));
        let mut model: Vec<u32> = Vec::new();

        for op in &ops {
            let before = list.len();
            match *op {
                ListOp::Insert { pos_pct, value } => {
                    let pos = scaled(pos_pct, model.len());
                    list.insert(pos, value).unwrap();
                    model.insert(pos, value);
                    prop_assert_eq!(list.len(), before + 1);
                    prop_assert_eq!(list.get(pos), Ok(&value));
                }
                ListOp::Remove { pos_pct } => {
                    if model.is_empty() {
                        prop_assert!(list.remove(0).is_err());
                        prop_assert_eq!(list.len(), before);
                    } else {
                        let pos = scaled(pos_pct, model.len() - 1);
                        prop_assert_eq!(list.remove(pos), Ok(model.remove(pos)));
                        prop_assert_eq!(list.len() + 1, before);
                    }
                }
                ListOp::Set { pos_pct, value } => {
                    if !model.is_empty() {
                        let pos = scaled(pos_pct, model.len() - 1);
                        let old = std::mem::replace(&mut model[pos], value);
                        prop_assert_eq!(list.set(pos, value), Ok(old));
                    }
                }
                ListOp::Push(value) => {
                    list.push(value);
                    model.push(value);
                }
                ListOp::Pop => prop_assert_eq!(list.pop(), model.pop()),
            }
            list.validate();
        }

        prop_assert!(list.iter().eq(model.iter()));
        for (i, value) in model.iter().enumerate() {
            prop_assert_eq!(list.get(i), Ok(value));
        }
    }

    /// Out-of-range ranks are reported, never clamped
    #[test]
    fn out_of_range_is_reported(
        len in 0usize..60,
        extra in 0usize..10,
    ) {
        let mut list: SkiplistList<usize> = (0..len).collect();
        let bad = len + extra;
        prop_assert_eq!(list.get(bad), Err(Error::IndexOutOfBounds { index: bad, len }));
        prop_assert_eq!(list.remove(bad), Err(Error::IndexOutOfBounds { index: bad, len }));
        prop_assert!(list.insert(bad + 1, 0).is_err());
        prop_assert_eq!(list.len(), len);
        list.validate();
    }

    /// Removing twice at the same rank takes two neighbouring elements
    #[test]
    fn remove_twice_takes_neighbours(
        len in 2usize..100,
        pos_pct in 0.0..1.0f64,
    ) {
        let mut list: SkiplistList<usize> = (0..len).collect();
        let pos = scaled(pos_pct, len - 2);
        prop_assert_eq!(list.remove(pos), Ok(pos));
        prop_assert_eq!(list.remove(pos), Ok(pos + 1));
        let expected: Vec<usize> = (0..len).filter(|&x| x != pos && x != pos + 1).collect();
        prop_assert!(list.iter().eq(expected.iter()));
        list.validate();
    }
}
