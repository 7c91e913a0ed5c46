//! `serde` support: a map is written as a sequence of `(key, value)` pairs in
//! key order and read back by inserting each pair.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::bidimap::TreeBidiMap;
use crate::index::IndexType;

/// Upper bound on the nodes reserved from a length hint of the input.
const MAX_PREALLOCATED: usize = 4096;

impl<K, V, Ix> Serialize for TreeBidiMap<K, V, Ix>
where
    K: Serialize,
    V: Serialize,
    Ix: IndexType,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for entry in self.iter() {
            seq.serialize_element(&entry)?;
        }
        seq.end()
    }
}

struct PairsVisitor<K, V, Ix> {
    marker: PhantomData<fn() -> TreeBidiMap<K, V, Ix>>,
}

impl<'de, K, V, Ix> Visitor<'de> for PairsVisitor<K, V, Ix>
where
    K: Deserialize<'de> + Ord,
    V: Deserialize<'de> + Ord,
    Ix: IndexType,
{
    type Value = TreeBidiMap<K, V, Ix>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a sequence of key-value pairs")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        // the hint comes from the input, so it only seeds the reservation
        let capacity = seq.size_hint().unwrap_or(0).min(MAX_PREALLOCATED);
        let mut map = TreeBidiMap::with_capacity(capacity);
        while let Some((key, value)) = seq.next_element::<(K, V)>()? {
            let _ignore = map.insert(key, value);
        }
        Ok(map)
    }
}

impl<'de, K, V, Ix> Deserialize<'de> for TreeBidiMap<K, V, Ix>
where
    K: Deserialize<'de> + Ord,
    V: Deserialize<'de> + Ord,
    Ix: IndexType,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(PairsVisitor {
            marker: PhantomData,
        })
    }
}
