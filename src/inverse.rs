//! Views of a `TreeBidiMap` with the roles of keys and values swapped.
//!
//! The views walk the value tree of the same nodes, so they need no
//! storage of their own.

use std::borrow::Borrow;
use std::fmt;

use crate::bidimap::TreeBidiMap;
use crate::index::IndexType;
use crate::iter::Iter;
use crate::node::{Node, Order};
use crate::traits::OrderedBidiMap;

/// A read-only value-to-key view of a `TreeBidiMap`.
pub struct Inverse<'a, K, V, Ix> {
    pub(crate) map_ref: &'a TreeBidiMap<K, V, Ix>,
}

impl<K, V, Ix> Clone for Inverse<'_, K, V, Ix> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V, Ix> Copy for Inverse<'_, K, V, Ix> {}

impl<'a, K, V, Ix> Inverse<'a, K, V, Ix>
where
    K: Ord,
    V: Ord,
    Ix: IndexType,
{
    /// Return the key the value is mapped from.
    #[inline]
    pub fn get<Q>(&self, value: &Q) -> Option<&'a K>
    where
        V: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.map_ref.get_key(value)
    }

    /// Return the value the key maps to.
    #[inline]
    pub fn get_key<Q>(&self, key: &Q) -> Option<&'a V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.map_ref.get(key)
    }

    /// Return `true` if the map contains the value.
    #[inline]
    pub fn contains_key<Q>(&self, value: &Q) -> bool
    where
        V: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.map_ref.contains_value(value)
    }

    /// Return `true` if the map contains the key.
    #[inline]
    pub fn contains_value<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.map_ref.contains_key(key)
    }

    /// Return the value that comes after `value`.
    #[inline]
    pub fn next_key<Q>(&self, value: &Q) -> Option<&'a V>
    where
        V: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let map_ref = self.map_ref;
        let x = map_ref.search_value(value)?;
        map_ref
            .successor(x, Order::Value)
            .map(|y| map_ref.node_ref(y, Node::value))
    }

    /// Return the value that comes before `value`.
    #[inline]
    pub fn previous_key<Q>(&self, value: &Q) -> Option<&'a V>
    where
        V: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let map_ref = self.map_ref;
        let x = map_ref.search_value(value)?;
        map_ref
            .predecessor(x, Order::Value)
            .map(|y| map_ref.node_ref(y, Node::value))
    }
}

impl<'a, K, V, Ix> Inverse<'a, K, V, Ix>
where
    Ix: IndexType,
{
    /// Return the smallest value.
    #[inline]
    pub fn first_key(&self) -> Option<&'a V> {
        let map_ref = self.map_ref;
        map_ref
            .first_node(Order::Value)
            .map(|x| map_ref.node_ref(x, Node::value))
    }

    /// Return the largest value.
    #[inline]
    pub fn last_key(&self) -> Option<&'a V> {
        let map_ref = self.map_ref;
        map_ref
            .last_node(Order::Value)
            .map(|x| map_ref.node_ref(x, Node::value))
    }

    /// Get an iterator over the `(value, key)` pairs, sorted by value.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> InverseIter<'a, K, V, Ix> {
        InverseIter {
            inner: Iter::new(self.map_ref, Order::Value),
        }
    }

    /// Return the number of elements in the map.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.map_ref.len()
    }

    /// Return `true` if the map contains no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map_ref.is_empty()
    }

    /// Return the map this view inverts.
    #[inline]
    #[must_use]
    pub fn inverse(&self) -> &'a TreeBidiMap<K, V, Ix> {
        self.map_ref
    }
}

impl<K, V, Ix> fmt::Debug for Inverse<'_, K, V, Ix>
where
    K: fmt::Debug,
    V: fmt::Debug,
    Ix: IndexType,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, Ix> OrderedBidiMap<V, K> for Inverse<'_, K, V, Ix>
where
    K: Ord,
    V: Ord,
    Ix: IndexType,
{
    fn get(&self, value: &V) -> Option<&K> {
        Inverse::get(self, value)
    }

    fn get_key(&self, key: &K) -> Option<&V> {
        Inverse::get_key(self, key)
    }

    fn len(&self) -> usize {
        self.map_ref.len()
    }

    fn first_key(&self) -> Option<&V> {
        Inverse::first_key(self)
    }

    fn last_key(&self) -> Option<&V> {
        Inverse::last_key(self)
    }

    fn next_key(&self, value: &V) -> Option<&V> {
        Inverse::next_key(self, value)
    }

    fn previous_key(&self, value: &V) -> Option<&V> {
        Inverse::previous_key(self, value)
    }
}

/// A value-to-key view of a `TreeBidiMap` that can change the map.
pub struct InverseMut<'a, K, V, Ix> {
    pub(crate) map_ref: &'a mut TreeBidiMap<K, V, Ix>,
}

impl<K, V, Ix> InverseMut<'_, K, V, Ix>
where
    K: Ord,
    V: Ord,
    Ix: IndexType,
{
    /// Insert a value-key pair, returning the key previously mapped from the value.
    ///
    /// # Example
    /// ```rust
    /// use rb_bidi_map::TreeBidiMap;
    ///
    /// let mut map = TreeBidiMap::new();
    /// map.insert(1, 'a');
    /// assert_eq!(map.inverse_mut().insert('a', 2), Some(1));
    /// assert_eq!(map.get(&2), Some(&'a'));
    /// assert_eq!(map.len(), 1);
    /// ```
    #[inline]
    pub fn insert(&mut self, value: V, key: K) -> Option<K> {
        self.map_ref.insert_pair(key, value).1
    }

    /// Remove a value, returning the key it was mapped from.
    #[inline]
    pub fn remove<Q>(&mut self, value: &Q) -> Option<K>
    where
        V: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.map_ref.remove_value(value)
    }

    /// Remove a key, returning the value it mapped to.
    #[inline]
    pub fn remove_value<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.map_ref.remove(key)
    }

    /// Return the key the value is mapped from.
    #[inline]
    pub fn get<Q>(&self, value: &Q) -> Option<&K>
    where
        V: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.map_ref.get_key(value)
    }

    /// Return the value the key maps to.
    #[inline]
    pub fn get_key<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.map_ref.get(key)
    }
}

impl<K, V, Ix> InverseMut<'_, K, V, Ix>
where
    Ix: IndexType,
{
    /// Reborrow as a read-only view.
    #[inline]
    #[must_use]
    pub fn as_inverse(&self) -> Inverse<'_, K, V, Ix> {
        Inverse {
            map_ref: &*self.map_ref,
        }
    }

    /// Return the number of elements in the map.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.map_ref.len()
    }

    /// Return `true` if the map contains no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map_ref.is_empty()
    }
}

/// An iterator over the `(value, key)` pairs of a `TreeBidiMap`, sorted by value.
pub struct InverseIter<'a, K, V, Ix> {
    inner: Iter<'a, K, V, Ix>,
}

impl<K: fmt::Debug, V: fmt::Debug, Ix: IndexType> fmt::Debug for InverseIter<'_, K, V, Ix> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.inner.clone().map(|(k, v)| (v, k)))
            .finish()
    }
}

impl<'a, K, V, Ix: IndexType> Iterator for InverseIter<'a, K, V, Ix> {
    type Item = (&'a V, &'a K);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (v, k))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, Ix: IndexType> DoubleEndedIterator for InverseIter<'_, K, V, Ix> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, v)| (v, k))
    }
}

impl<K, V, Ix: IndexType> ExactSizeIterator for InverseIter<'_, K, V, Ix> {}
