//! Skipwise - a skip list engine with two personalities.
//!
//! One randomized multi-level linked structure backs both containers:
//!
//! - [`SkiplistSSet`]: a sorted set navigated by comparing keys, with
//!   successor/predecessor queries and an optional [`Finger`] for fast
//!   sequential lookups.
//! - [`SkiplistList`]: a sequence navigated by rank, where each edge records
//!   how many elements it skips.
//!
//! Every operation runs in O(log n) expected time. Node heights are drawn from
//! a geometric distribution (see [`pick_height`]), so no worst-case bound on
//! height is enforced.
//!
//! # Quick Start
//!
//! ```
//! use skipwise::{SkiplistList, SkiplistSSet};
//!
//! let mut set = SkiplistSSet::new();
//! set.extend([10, 4, 18, 2]);
//! assert_eq!(set.find(&5), Some(&10));
//!
//! let mut list = SkiplistList::new();
//! list.push('b');
//! list.insert(0, 'a').unwrap();
//! assert_eq!(list.get(1), Ok(&'b'));
//! ```

mod levels;
mod node;

pub mod compare;
pub mod config;
pub mod error;
pub mod finger;
pub mod height;
pub mod list;
pub mod set;

#[cfg(feature = "serde")]
mod serde_impl;

pub use compare::{Comparator, Natural, Reverse};
pub use config::Config;
pub use error::{Error, Result};
pub use finger::Finger;
pub use height::{pick_height, XorShift64};
pub use list::SkiplistList;
pub use set::SkiplistSSet;
