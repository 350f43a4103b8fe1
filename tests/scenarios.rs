//! End-to-end scenarios for both personalities.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use skipwise::{Config, Reverse, SkiplistList, SkiplistSSet};

// =============================================================================
// Ordered set
// =============================================================================

#[test]
fn successor_and_predecessor_of_small_set() {
    let mut set = SkiplistSSet::new();
    for x in [10, 4, 18, 2] {
        assert!(set.add(x));
    }
    assert_eq!(set.find_ge(Some(&5)), Some(&10));
    assert_eq!(set.find_lt(Some(&10)), Some(&4));
    assert_eq!(set.len(), 4);
    set.validate();
}

#[test]
fn finger_scan_matches_find() {
    let n = 5_000;
    let set: SkiplistSSet<u32> = (0..=n).map(|x| x * 2).collect();
    let mut finger = set.finger();
    for probe in 0..=2 * n + 1 {
        assert_eq!(set.find_with(&mut finger, &probe), set.find(&probe), "probe {}", probe);
    }
}

#[test]
fn finger_random_probes_match_find() {
    let mut rng = StdRng::seed_from_u64(3);
    let set: SkiplistSSet<u32> = (0..2_000).map(|x| x * 2).collect();
    let mut finger = set.finger();
    for _ in 0..4_000 {
        let probe = rng.gen_range(0..4_100);
        assert_eq!(set.find_with(&mut finger, &probe), set.find(&probe), "probe {}", probe);
    }
}

#[test]
fn custom_rng_and_reverse_order() {
    let rng = StdRng::seed_from_u64(11);
    let mut set = SkiplistSSet::with_comparator_and_rng(Reverse, rng, Config::default());
    set.extend(["pear", "apple", "fig"]);
    assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec!["pear", "fig", "apple"]);
    // In reverse order "smaller" means later in the alphabet.
    assert_eq!(set.find(&"grape"), Some(&"fig"));
    assert_eq!(set.find_lt(Some(&"grape")), Some(&"pear"));
    set.validate();
}

// =============================================================================
// Indexable sequence
// =============================================================================

#[test]
fn remove_from_appended_fifty() {
    let mut list = SkiplistList::new();
    for i in 0..50u32 {
        list.insert(list.len(), i).unwrap();
    }
    let before = *list.get(11).unwrap();
    assert_eq!(list.remove(10), Ok(10));
    assert_eq!(list.get(10), Ok(&before));
    assert_eq!(list.get(10), Ok(&11));
    assert_eq!(list.len(), 49);
    list.validate();
}

#[test]
fn interleaved_front_and_back_edits() {
    let mut list = SkiplistList::with_config(Config::default().seed(9));
    let mut model = Vec::new();
    for i in 0..300i32 {
        list.insert(0, -i).unwrap();
        model.insert(0, -i);
        let mid = list.len() / 2;
        list.insert(mid, i).unwrap();
        model.insert(mid, i);
        if i % 3 == 0 {
            let at = list.len() / 3;
            assert_eq!(list.remove(at), Ok(model.remove(at)));
        }
    }
    list.validate();
    assert!(list.iter().eq(model.iter()));
}

// =============================================================================
// Height distribution
// =============================================================================

#[test]
fn height_stays_logarithmic() {
    for (n, seed) in [(1usize << 10, 1u64), (1 << 12, 2), (1 << 14, 3)] {
        let bound = (n as f64).log2() as usize + 16;
        for trial in 0..8 {
            let config = Config::default().seed(seed * 100 + trial);
            let mut set = SkiplistSSet::with_config(config);
            set.extend(0..n);
            assert!(set.height() <= bound, "n={} height={}", n, set.height());

            let mut list = SkiplistList::with_config(config);
            list.extend(0..n);
            assert!(list.height() <= bound, "n={} height={}", n, list.height());
        }
    }
}

#[test]
fn same_seed_same_heights_across_personalities() {
    for seed in 0..16 {
        let config = Config::default().seed(seed);
        let mut set = SkiplistSSet::with_config(config);
        let mut list = SkiplistList::with_config(config);
        for i in 0..500u32 {
            set.add(i);
            // Duplicates draw no height.
            set.add(i);
            list.push(i);
            assert_eq!(set.height(), list.height(), "seed {} after {}", seed, i);
        }
    }
}
