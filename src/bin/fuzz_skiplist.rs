//! AFL fuzz harness for both skip list personalities.
//!
//! Each input is decoded into a stream of operations that are applied both to
//! a skip list and to a std model (`BTreeSet` for the set, `Vec` for the
//! list). Results must agree after every operation, and the structural
//! invariants are validated whenever the stream asks for a check.

use std::collections::BTreeSet;

use afl::fuzz;
use skipwise::{Config, SkiplistList, SkiplistSSet};

/// Operation types the fuzzer can generate
#[derive(Debug, Clone, Copy)]
enum FuzzOp {
    /// Add a key to the set
    Add { key: u8 },
    /// Remove a key from the set
    Remove { key: u8 },
    /// Successor query on the set, plain and through the finger
    Find { key: u8 },
    /// Insert into the list at a fraction of its length
    Insert { pos_frac: u8, value: u8 },
    /// Remove from the list at a fraction of its length
    Delete { pos_frac: u8 },
    /// Validate both structures against their models
    Check,
}

impl FuzzOp {
    fn from_bytes(bytes: &[u8]) -> Option<(FuzzOp, &[u8])> {
        if bytes.is_empty() {
            return None;
        }

        let op_type = bytes[0] % 6;
        let rest = &bytes[1..];

        match op_type {
            0 if !rest.is_empty() => Some((FuzzOp::Add { key: rest[0] }, &rest[1..])),
            1 if !rest.is_empty() => Some((FuzzOp::Remove { key: rest[0] }, &rest[1..])),
            2 if !rest.is_empty() => Some((FuzzOp::Find { key: rest[0] }, &rest[1..])),
            3 if rest.len() >= 2 => {
                let op = FuzzOp::Insert {
                    pos_frac: rest[0],
                    value: rest[1],
                };
                Some((op, &rest[2..]))
            }
            4 if !rest.is_empty() => Some((FuzzOp::Delete { pos_frac: rest[0] }, &rest[1..])),
            5 => Some((FuzzOp::Check, rest)),
            _ => None,
        }
    }
}

fn main() {
    fuzz!(|data: &[u8]| {
        // Fixed seed for reproducible crashes
        let config = Config::default().seed(0xaf1).headroom(1);
        let mut set: SkiplistSSet<u8> = SkiplistSSet::with_config(config);
        let mut set_model = BTreeSet::new();
        let mut finger = set.finger();
        let mut list: SkiplistList<u8> = SkiplistList::with_config(config);
        let mut list_model: Vec<u8> = Vec::new();
        let mut remaining = data;

        while let Some((op, rest)) = FuzzOp::from_bytes(remaining) {
            remaining = rest;

            match op {
                FuzzOp::Add { key } => {
                    assert_eq!(set.add(key), set_model.insert(key));
                }
                FuzzOp::Remove { key } => {
                    assert_eq!(set.remove(&key), set_model.remove(&key));
                }
                FuzzOp::Find { key } => {
                    let expected = set_model.range(key..).next();
                    assert_eq!(set.find(&key), expected);
                    assert_eq!(set.find_with(&mut finger, &key), expected);
                    assert_eq!(set.find_lt(Some(&key)), set_model.range(..key).next_back());
                }
                FuzzOp::Insert { pos_frac, value } => {
                    let pos = (pos_frac as usize) * (list_model.len() + 1) / 256;
                    list.insert(pos, value).unwrap();
                    list_model.insert(pos, value);
                }
                FuzzOp::Delete { pos_frac } => {
                    if list_model.is_empty() {
                        assert!(list.remove(0).is_err());
                    } else {
                        let pos = (pos_frac as usize) * list_model.len() / 256;
                        assert_eq!(list.remove(pos).unwrap(), list_model.remove(pos));
                    }
                }
                FuzzOp::Check => {
                    set.validate();
                    list.validate();
                    assert!(set.iter().eq(set_model.iter()));
                    assert!(list.iter().eq(list_model.iter()));
                }
            }

            assert_eq!(set.len(), set_model.len());
            assert_eq!(list.len(), list_model.len());
        }
    });
}
