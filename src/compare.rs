//! Ordering capability for the set.

use std::cmp::Ordering;

/// A total order over `T`.
///
/// Implementations must be consistent (antisymmetric and transitive). The set
/// does not detect a comparator that breaks these rules; its contents are
/// unspecified if one is used.
pub trait Comparator<T: ?Sized> {
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// The natural order of `T: Ord`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Natural;

impl<T: Ord + ?Sized> Comparator<T> for Natural {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

/// The reverse of the natural order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reverse;

impl<T: Ord + ?Sized> Comparator<T> for Reverse {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        b.cmp(a)
    }
}

impl<T: ?Sized, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn natural_and_reverse() {
        assert_eq!(Natural.compare(&1, &2), Ordering::Less);
        assert_eq!(Reverse.compare(&1, &2), Ordering::Greater);
        assert_eq!(Natural.compare("b", "b"), Ordering::Equal);
    }

    #[test]
    fn closures_compare() {
        let by_abs = |a: &i32, b: &i32| a.abs().cmp(&b.abs());
        assert_eq!(by_abs.compare(&-3, &2), Ordering::Greater);
        assert_eq!(by_abs.compare(&-2, &2), Ordering::Equal);
    }
}
