use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use tracing::trace;

use crate::cursor::{Cursor, MapCursor};
use crate::index::{DefaultIx, IndexType, NodeIndex};
use crate::inverse::{Inverse, InverseMut};
use crate::iter::{IntoIter, Iter, Keys, Values};
use crate::node::{Node, Order};
use crate::traits::OrderedBidiMap;

/// Source of the identities that tie cursors to the map they came from.
static NEXT_MAP_ID: AtomicU64 = AtomicU64::new(0);

/// A sorted bidirectional map.
///
/// Every key maps to exactly one value and every value maps back to exactly
/// one key. The entries are kept in two red-black trees at once, one ordered
/// by key and one ordered by value, which share a single node per entry.
pub struct TreeBidiMap<K, V, Ix = DefaultIx> {
    /// Vector that stores nodes, the sentinel at index 0
    pub(crate) nodes: Vec<Node<K, V, Ix>>,
    /// Roots of the key tree and the value tree
    pub(crate) roots: [NodeIndex<Ix>; 2],
    /// Number of elements in the map
    pub(crate) len: usize,
    /// Bumped on every structural change, checked by cursors
    pub(crate) modifications: u64,
    /// Unique per map instance, checked by cursors
    pub(crate) id: u64,
}

impl<K, V, Ix> TreeBidiMap<K, V, Ix>
where
    K: Ord,
    V: Ord,
    Ix: IndexType,
{
    /// Creates a new `TreeBidiMap` with estimated capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = vec![Node::new_sentinel()];
        nodes.reserve(capacity);
        TreeBidiMap {
            nodes,
            roots: [NodeIndex::sentinel(); 2],
            len: 0,
            modifications: 0,
            id: NEXT_MAP_ID.fetch_add(1, AtomicOrdering::Relaxed),
        }
    }

    /// Insert a key-value pair into the map, returning the value previously
    /// associated with the key.
    ///
    /// A stale pair holding `key` and a pair holding `value` under another
    /// key are both removed first, so the new pair always wins.
    ///
    /// # Panics
    ///
    /// This method panics when the map is at the maximum number of nodes for its index
    ///
    /// # Example
    /// ```rust
    /// use rb_bidi_map::TreeBidiMap;
    ///
    /// let mut map = TreeBidiMap::new();
    /// assert_eq!(map.insert(1, "one"), None);
    /// assert_eq!(map.insert(1, "uno"), Some("one"));
    /// assert_eq!(map.insert(2, "uno"), None);
    /// assert_eq!(map.get(&1), None);
    /// assert_eq!(map.get_key(&"uno"), Some(&2));
    /// assert_eq!(map.len(), 1);
    /// ```
    #[inline]
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.insert_pair(key, value).0
    }

    /// Insert a pair and return what it displaced: the previous value of
    /// `key` and the previous key of `value`.
    pub(crate) fn insert_pair(&mut self, key: K, value: V) -> (Option<V>, Option<K>) {
        if let Some(x) = self.search_key(&key) {
            if self.node_ref(x, Node::value) == &value {
                // Same pair, both trees stay as they are.
                let (old_key, old_value) = self.node_mut(x, Node::replace_entry(key, value));
                return (Some(old_value), Some(old_key));
            }
        }
        let previous_value = self.remove(&key);
        let previous_key = self.remove_value(&value);

        let node_idx = NodeIndex::new(self.nodes.len());
        // check for max capacity, except if we use usize
        assert!(
            <Ix as IndexType>::max().index() == !0 || NodeIndex::end() != node_idx,
            "Reached maximum number of nodes"
        );
        self.nodes.push(Node::new(key, value));
        for order in Order::ALL {
            self.insert_node(node_idx, order);
        }
        self.len = self.len.wrapping_add(1);
        self.modifications = self.modifications.wrapping_add(1);
        trace!(len = self.len, "inserted entry");

        (previous_value, previous_key)
    }

    /// Remove a key from the map, returning the value at the key if the key exists
    ///
    /// # Example
    /// ```rust
    /// use rb_bidi_map::TreeBidiMap;
    ///
    /// let mut map = TreeBidiMap::new();
    /// map.insert(1, 'a');
    /// map.insert(2, 'b');
    /// assert_eq!(map.remove(&3), None);
    /// assert_eq!(map.remove(&2), Some('b'));
    /// assert_eq!(map.remove(&2), None);
    /// assert_eq!(map.len(), 1);
    /// ```
    #[inline]
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let node_idx = self.search_key(key)?;
        Some(self.remove_node(node_idx).1)
    }

    /// Remove a value from the map, returning the key it was mapped from if the value exists
    ///
    /// # Example
    /// ```rust
    /// use rb_bidi_map::TreeBidiMap;
    ///
    /// let mut map = TreeBidiMap::new();
    /// map.insert(1, 'a');
    /// assert_eq!(map.remove_value(&'a'), Some(1));
    /// assert!(map.is_empty());
    /// ```
    #[inline]
    pub fn remove_value<Q>(&mut self, value: &Q) -> Option<K>
    where
        V: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let node_idx = self.search_value(value)?;
        Some(self.remove_node(node_idx).0)
    }

    /// Return reference to the value corresponding to the key.
    ///
    /// # Example
    /// ```rust
    /// use rb_bidi_map::TreeBidiMap;
    ///
    /// let mut map = TreeBidiMap::new();
    /// map.insert("a", 1);
    /// assert_eq!(map.get("a"), Some(&1));
    /// assert_eq!(map.get("b"), None);
    /// ```
    #[inline]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search_key(key).map(|idx| self.node_ref(idx, Node::value))
    }

    /// Return reference to the key the value is mapped from.
    ///
    /// # Example
    /// ```rust
    /// use rb_bidi_map::TreeBidiMap;
    ///
    /// let mut map = TreeBidiMap::new();
    /// map.insert(1, String::from("one"));
    /// assert_eq!(map.get_key("one"), Some(&1));
    /// assert_eq!(map.get_key("two"), None);
    /// ```
    #[inline]
    pub fn get_key<Q>(&self, value: &Q) -> Option<&K>
    where
        V: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search_value(value)
            .map(|idx| self.node_ref(idx, Node::key))
    }

    /// Return `true` if the map contains the key.
    #[inline]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search_key(key).is_some()
    }

    /// Return `true` if the map contains the value.
    #[inline]
    pub fn contains_value<Q>(&self, value: &Q) -> bool
    where
        V: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search_value(value).is_some()
    }

    /// Return the key that comes after `key`.
    ///
    /// `None` when `key` is not in the map or is the last key.
    ///
    /// # Example
    /// ```rust
    /// use rb_bidi_map::TreeBidiMap;
    ///
    /// let map = TreeBidiMap::from([(1, 'a'), (3, 'c'), (5, 'e')]);
    /// assert_eq!(map.next_key(&1), Some(&3));
    /// assert_eq!(map.next_key(&5), None);
    /// assert_eq!(map.next_key(&2), None);
    /// ```
    #[inline]
    pub fn next_key<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let x = self.search_key(key)?;
        self.successor(x, Order::Key)
            .map(|y| self.node_ref(y, Node::key))
    }

    /// Return the key that comes before `key`.
    ///
    /// `None` when `key` is not in the map or is the first key.
    #[inline]
    pub fn previous_key<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let x = self.search_key(key)?;
        self.predecessor(x, Order::Key)
            .map(|y| self.node_ref(y, Node::key))
    }
}

impl<K, V, Ix> TreeBidiMap<K, V, Ix>
where
    Ix: IndexType,
{
    /// Unlink a node from both trees and drop it from the arena.
    ///
    /// The last node of the arena is moved into the freed slot.
    pub(crate) fn remove_node(&mut self, node_idx: NodeIndex<Ix>) -> (K, V) {
        for order in Order::ALL {
            self.delete_node(node_idx, order);
        }
        // Swap the node with the last node stored in the vector and update indices
        let mut node = self.nodes.swap_remove(node_idx.index());
        let old = NodeIndex::<Ix>::new(self.nodes.len());
        self.update_idx(old, node_idx);

        self.len = self.len.wrapping_sub(1);
        self.modifications = self.modifications.wrapping_add(1);
        trace!(len = self.len, "removed entry");
        node.take_entry()
    }

    /// Where a node index points after `removed` was dropped from the arena.
    pub(crate) fn relocated(&self, node_idx: NodeIndex<Ix>, removed: NodeIndex<Ix>) -> NodeIndex<Ix> {
        if node_idx.index() == self.nodes.len() {
            removed
        } else {
            node_idx
        }
    }

    /// Return the first key, `None` if the map is empty.
    ///
    /// # Example
    /// ```rust
    /// use rb_bidi_map::TreeBidiMap;
    ///
    /// let map = TreeBidiMap::from([(2, 'b'), (1, 'z'), (3, 'a')]);
    /// assert_eq!(map.first_key(), Some(&1));
    /// assert_eq!(map.last_key(), Some(&3));
    /// ```
    #[inline]
    pub fn first_key(&self) -> Option<&K> {
        self.first_node(Order::Key)
            .map(|x| self.node_ref(x, Node::key))
    }

    /// Return the last key, `None` if the map is empty.
    #[inline]
    pub fn last_key(&self) -> Option<&K> {
        self.last_node(Order::Key)
            .map(|x| self.node_ref(x, Node::key))
    }

    /// Return the entry with the smallest key.
    #[inline]
    pub fn first_entry(&self) -> Option<(&K, &V)> {
        self.first_node(Order::Key)
            .map(|x| self.node_ref(x, Node::entry))
    }

    /// Return the entry with the largest key.
    #[inline]
    pub fn last_entry(&self) -> Option<(&K, &V)> {
        self.last_node(Order::Key)
            .map(|x| self.node_ref(x, Node::entry))
    }

    /// Get an iterator over the entries of the map, sorted by key.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V, Ix> {
        Iter::new(self, Order::Key)
    }

    /// Get an iterator over the keys of the map, in sorted order.
    #[inline]
    #[must_use]
    pub fn keys(&self) -> Keys<'_, K, V, Ix> {
        Keys { inner: self.iter() }
    }

    /// Get an iterator over the values of the map, sorted by key.
    #[inline]
    #[must_use]
    pub fn values(&self) -> Values<'_, K, V, Ix> {
        Values { inner: self.iter() }
    }

    /// Get a view of the map with keys and values swapped.
    ///
    /// # Example
    /// ```rust
    /// use rb_bidi_map::TreeBidiMap;
    ///
    /// let map = TreeBidiMap::from([(1, 'c'), (2, 'b'), (3, 'a')]);
    /// let inverse = map.inverse();
    /// assert_eq!(inverse.get(&'a'), Some(&3));
    /// assert_eq!(inverse.first_key(), Some(&'a'));
    /// let by_value: Vec<_> = inverse.iter().collect();
    /// assert_eq!(by_value, [(&'a', &3), (&'b', &2), (&'c', &1)]);
    /// ```
    #[inline]
    #[must_use]
    pub fn inverse(&self) -> Inverse<'_, K, V, Ix> {
        Inverse { map_ref: self }
    }

    /// Get a mutable view of the map with keys and values swapped.
    #[inline]
    pub fn inverse_mut(&mut self) -> InverseMut<'_, K, V, Ix> {
        InverseMut { map_ref: self }
    }

    /// Get a cursor positioned before the first entry.
    ///
    /// # Example
    /// ```rust
    /// use rb_bidi_map::{BidiError, TreeBidiMap};
    ///
    /// let map = TreeBidiMap::from([(1, "one"), (2, "two")]);
    /// let mut cursor = map.cursor();
    /// assert_eq!(cursor.next(&map), Ok((&1, &"one")));
    /// assert_eq!(cursor.next(&map), Ok((&2, &"two")));
    /// assert_eq!(cursor.next(&map), Err(BidiError::NoSuchElement));
    /// assert_eq!(cursor.previous(&map), Ok((&2, &"two")));
    /// ```
    #[inline]
    #[must_use]
    pub fn cursor(&self) -> Cursor<Ix> {
        Cursor::new(self)
    }

    /// Get a key-position cursor positioned before the first entry.
    #[inline]
    #[must_use]
    pub fn map_cursor(&self) -> MapCursor<Ix> {
        MapCursor::new(self)
    }

    /// Remove all elements from the map
    #[inline]
    pub fn clear(&mut self) {
        self.nodes.truncate(1);
        self.nodes[0] = Node::new_sentinel();
        self.roots = [NodeIndex::sentinel(); 2];
        self.len = 0;
        self.modifications = self.modifications.wrapping_add(1);
        trace!("cleared map");
    }

    /// Return the number of elements in the map.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Return `true` if the map contains no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K, V, Ix> TreeBidiMap<K, V, Ix>
where
    K: Ord + Clone,
    V: Ord + Clone,
    Ix: IndexType,
{
    /// Create a map holding the same pairs as `source`, inserted one at a
    /// time in its key order.
    ///
    /// The new map shares no nodes with the source.
    ///
    /// # Example
    /// ```rust
    /// use rb_bidi_map::TreeBidiMap;
    ///
    /// let map = TreeBidiMap::from([(1, 'x'), (2, 'y')]);
    /// let swapped: TreeBidiMap<char, i32> = TreeBidiMap::from_bidi_map(&map.inverse());
    /// assert_eq!(swapped.get(&'y'), Some(&2));
    /// ```
    pub fn from_bidi_map<M>(source: &M) -> Self
    where
        M: OrderedBidiMap<K, V> + ?Sized,
    {
        let mut map = Self::with_capacity(source.len());
        let mut key = source.first_key();
        while let Some(k) = key {
            if let Some(v) = source.get(k) {
                let _ignore = map.insert(k.clone(), v.clone());
            }
            key = source.next_key(k);
        }
        map
    }
}

impl<K, V> TreeBidiMap<K, V>
where
    K: Ord,
    V: Ord,
{
    /// Create an empty `TreeBidiMap`
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }
}

impl<K, V> Default for TreeBidiMap<K, V>
where
    K: Ord,
    V: Ord,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, Ix> Clone for TreeBidiMap<K, V, Ix>
where
    K: Ord + Clone,
    V: Ord + Clone,
    Ix: IndexType,
{
    fn clone(&self) -> Self {
        Self::from_bidi_map(self)
    }
}

impl<K, V, Ix> PartialEq for TreeBidiMap<K, V, Ix>
where
    K: PartialEq,
    V: PartialEq,
    Ix: IndexType,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq, Ix: IndexType> Eq for TreeBidiMap<K, V, Ix> {}

impl<K: Hash, V: Hash, Ix: IndexType> Hash for TreeBidiMap<K, V, Ix> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len());
        for entry in self.iter() {
            entry.hash(state);
        }
    }
}

impl<K, V, Ix> fmt::Debug for TreeBidiMap<K, V, Ix>
where
    K: fmt::Debug,
    V: fmt::Debug,
    Ix: IndexType,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, Ix> Extend<(K, V)> for TreeBidiMap<K, V, Ix>
where
    K: Ord,
    V: Ord,
    Ix: IndexType,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            let _ignore = self.insert(key, value);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for TreeBidiMap<K, V>
where
    K: Ord,
    V: Ord,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for TreeBidiMap<K, V>
where
    K: Ord,
    V: Ord,
{
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl<'a, K, V, Ix> IntoIterator for &'a TreeBidiMap<K, V, Ix>
where
    Ix: IndexType,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, Ix>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, Ix> IntoIterator for TreeBidiMap<K, V, Ix>
where
    Ix: IndexType,
{
    type Item = (K, V);
    type IntoIter = IntoIter<K, V, Ix>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<K, V, Ix> OrderedBidiMap<K, V> for TreeBidiMap<K, V, Ix>
where
    K: Ord,
    V: Ord,
    Ix: IndexType,
{
    fn get(&self, key: &K) -> Option<&V> {
        TreeBidiMap::get(self, key)
    }

    fn get_key(&self, value: &V) -> Option<&K> {
        TreeBidiMap::get_key(self, value)
    }

    fn len(&self) -> usize {
        self.len
    }

    fn first_key(&self) -> Option<&K> {
        TreeBidiMap::first_key(self)
    }

    fn last_key(&self) -> Option<&K> {
        TreeBidiMap::last_key(self)
    }

    fn next_key(&self, key: &K) -> Option<&K> {
        TreeBidiMap::next_key(self, key)
    }

    fn previous_key(&self, key: &K) -> Option<&K> {
        TreeBidiMap::previous_key(self, key)
    }
}
