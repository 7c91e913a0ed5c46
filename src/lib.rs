//! `rb_bidi_map` is a sorted bidirectional map based on red-black trees.
//!
//! Every key maps to exactly one value and every value maps back to exactly
//! one key. Lookups take O(logN) time in either direction, and the entries
//! can be walked forward and backward in key order or in value order.
//!
//! Each entry lives in a single node that is linked into two red-black trees
//! at once: one ordered by key and one ordered by value. The nodes are kept
//! in a vector and linked by indices instead of pointers, which lets one node
//! belong to both trees without shared ownership. Removing a node with two
//! children swaps its position with its successor inside one tree rather than
//! copying data, so the node stays valid in the other tree.
//!
//! # Example
//!
//! ```rust
//! use rb_bidi_map::TreeBidiMap;
//!
//! let mut map = TreeBidiMap::new();
//! map.insert(1, "one");
//! map.insert(2, "two");
//! assert_eq!(map.get(&1), Some(&"one"));
//! assert_eq!(map.get_key(&"two"), Some(&2));
//!
//! // a value can only belong to one key
//! map.insert(3, "one");
//! assert_eq!(map.get(&1), None);
//! assert_eq!(map.get_key(&"one"), Some(&3));
//! ```
//!

mod bidimap;
mod cursor;
mod error;
mod index;
mod inverse;
mod iter;
mod node;
#[cfg(feature = "serde")]
mod serialize;
mod traits;
mod tree;

#[cfg(test)]
mod tests;

pub use bidimap::TreeBidiMap;
pub use cursor::{Cursor, MapCursor};
pub use error::BidiError;
pub use index::{DefaultIx, IndexType, NodeIndex};
pub use inverse::{Inverse, InverseIter, InverseMut};
pub use iter::{IntoIter, Iter, Keys, Values};
pub use traits::OrderedBidiMap;
