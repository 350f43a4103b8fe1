//! Serde support: both containers travel as a plain sequence of elements.

use rand_core::RngCore;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::compare::Comparator;
use crate::list::SkiplistList;
use crate::set::SkiplistSSet;

impl<T: Serialize, C: Comparator<T>, R: RngCore> Serialize for SkiplistSSet<T, C, R> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de, T, C, R> Deserialize<'de> for SkiplistSSet<T, C, R>
where
    T: Deserialize<'de>,
    C: Comparator<T> + Default,
    R: RngCore + Default,
{
    /// Duplicates in the input collapse to one element.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let items = Vec::<T>::deserialize(deserializer)?;
        Ok(items.into_iter().collect())
    }
}

impl<T: Serialize, R: RngCore> Serialize for SkiplistList<T, R> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de, T, R> Deserialize<'de> for SkiplistList<T, R>
where
    T: Deserialize<'de>,
    R: RngCore + Default,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let items = Vec::<T>::deserialize(deserializer)?;
        Ok(items.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use crate::{SkiplistList, SkiplistSSet};

    #[test]
    fn set_round_trips_through_json() {
        let set: SkiplistSSet<i32> = [3, 1, 2].into_iter().collect();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, "[1,2,3]");

        let back: SkiplistSSet<i32> = serde_json::from_str("[2,2,1,3]").unwrap();
        assert_eq!(back, set);
        back.validate();
    }

    #[test]
    fn list_keeps_rank_order() {
        let list: SkiplistList<&str> = ["b", "a", "c"].into_iter().collect();
        let json = serde_json::to_string(&list).unwrap();
        assert_eq!(json, r#"["b","a","c"]"#);

        let back: SkiplistList<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.iter().map(String::as_str).collect::<Vec<_>>(), vec!["b", "a", "c"]);
        back.validate();
    }
}
