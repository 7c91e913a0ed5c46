use std::fmt;
use std::iter::FusedIterator;

use crate::bidimap::TreeBidiMap;
use crate::index::{IndexType, NodeIndex};
use crate::node::{Node, Order};

/// An iterator over the entries of a `TreeBidiMap`, sorted by one ordering.
pub struct Iter<'a, K, V, Ix> {
    /// Reference to the map
    map_ref: &'a TreeBidiMap<K, V, Ix>,
    /// Tree being walked
    order: Order,
    /// Next node from the front
    front: NodeIndex<Ix>,
    /// Next node from the back
    back: NodeIndex<Ix>,
    /// Entries not yet yielded from either end
    remaining: usize,
}

impl<'a, K, V, Ix> Iter<'a, K, V, Ix>
where
    Ix: IndexType,
{
    pub(crate) fn new(map_ref: &'a TreeBidiMap<K, V, Ix>, order: Order) -> Self {
        Iter {
            map_ref,
            order,
            front: map_ref.first_node(order).unwrap_or_default(),
            back: map_ref.last_node(order).unwrap_or_default(),
            remaining: map_ref.len(),
        }
    }
}

impl<K, V, Ix: IndexType> Clone for Iter<'_, K, V, Ix> {
    fn clone(&self) -> Self {
        Iter {
            map_ref: self.map_ref,
            order: self.order,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, Ix: IndexType> fmt::Debug for Iter<'_, K, V, Ix> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V, Ix> Iterator for Iter<'a, K, V, Ix>
where
    Ix: IndexType,
{
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let x = self.front;
        self.remaining -= 1;
        if self.remaining > 0 {
            self.front = self.map_ref.successor(x, self.order).unwrap_or_default();
        }
        Some(self.map_ref.node_ref(x, Node::entry))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V, Ix> DoubleEndedIterator for Iter<'_, K, V, Ix>
where
    Ix: IndexType,
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let x = self.back;
        self.remaining -= 1;
        if self.remaining > 0 {
            self.back = self.map_ref.predecessor(x, self.order).unwrap_or_default();
        }
        Some(self.map_ref.node_ref(x, Node::entry))
    }
}

impl<K, V, Ix: IndexType> ExactSizeIterator for Iter<'_, K, V, Ix> {}

impl<K, V, Ix: IndexType> FusedIterator for Iter<'_, K, V, Ix> {}

/// An iterator over the keys of a `TreeBidiMap`, in sorted order.
pub struct Keys<'a, K, V, Ix> {
    pub(crate) inner: Iter<'a, K, V, Ix>,
}

impl<K: fmt::Debug, V, Ix: IndexType> fmt::Debug for Keys<'_, K, V, Ix> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.inner.clone().map(|(k, _)| k))
            .finish()
    }
}

impl<'a, K, V, Ix: IndexType> Iterator for Keys<'a, K, V, Ix> {
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, Ix: IndexType> DoubleEndedIterator for Keys<'_, K, V, Ix> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V, Ix: IndexType> ExactSizeIterator for Keys<'_, K, V, Ix> {}

/// An iterator over the values of a `TreeBidiMap`, sorted by key.
pub struct Values<'a, K, V, Ix> {
    pub(crate) inner: Iter<'a, K, V, Ix>,
}

impl<K, V: fmt::Debug, Ix: IndexType> fmt::Debug for Values<'_, K, V, Ix> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.inner.clone().map(|(_, v)| v))
            .finish()
    }
}

impl<'a, K, V, Ix: IndexType> Iterator for Values<'a, K, V, Ix> {
    type Item = &'a V;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, Ix: IndexType> DoubleEndedIterator for Values<'_, K, V, Ix> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V, Ix: IndexType> ExactSizeIterator for Values<'_, K, V, Ix> {}

/// An into iterator over the entries of a `TreeBidiMap`, sorted by key.
pub struct IntoIter<K, V, Ix> {
    bidi_map: TreeBidiMap<K, V, Ix>,
    /// Next node from the front
    front: NodeIndex<Ix>,
    /// Next node from the back
    back: NodeIndex<Ix>,
    /// Entries not yet yielded from either end
    remaining: usize,
}

impl<K, V, Ix> IntoIter<K, V, Ix>
where
    Ix: IndexType,
{
    pub fn new(bidi_map: TreeBidiMap<K, V, Ix>) -> Self {
        IntoIter {
            front: bidi_map.first_node(Order::Key).unwrap_or_default(),
            back: bidi_map.last_node(Order::Key).unwrap_or_default(),
            remaining: bidi_map.len(),
            bidi_map,
        }
    }
}

impl<K, V, Ix> fmt::Debug for IntoIter<K, V, Ix> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter")
            .field("remaining", &self.remaining)
            .finish_non_exhaustive()
    }
}

// The walk only reads links, so taking entries out along the way is fine.
impl<K, V, Ix> Iterator for IntoIter<K, V, Ix>
where
    Ix: IndexType,
{
    type Item = (K, V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let x = self.front;
        self.remaining -= 1;
        if self.remaining > 0 {
            self.front = self.bidi_map.successor(x, Order::Key).unwrap_or_default();
        }
        Some(self.bidi_map.node_mut(x, Node::take_entry))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V, Ix> DoubleEndedIterator for IntoIter<K, V, Ix>
where
    Ix: IndexType,
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let x = self.back;
        self.remaining -= 1;
        if self.remaining > 0 {
            self.back = self.bidi_map.predecessor(x, Order::Key).unwrap_or_default();
        }
        Some(self.bidi_map.node_mut(x, Node::take_entry))
    }
}

impl<K, V, Ix: IndexType> ExactSizeIterator for IntoIter<K, V, Ix> {}
