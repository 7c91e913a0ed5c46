//! Bidirectional cursors over the key order of a `TreeBidiMap`.
//!
//! A cursor does not borrow the map. It remembers its position and the
//! modification count of the map it was created from, and every call takes
//! that map again. If the map was changed by anything other than the cursor
//! in between, the call fails with [`BidiError::ConcurrentModification`].
//! A call with a map other than the one that created the cursor fails with
//! [`BidiError::ForeignMap`].

use tracing::debug;

use crate::bidimap::TreeBidiMap;
use crate::error::BidiError;
use crate::index::{DefaultIx, IndexType, NodeIndex};
use crate::node::{Node, Order};

/// A position between two entries of the key order.
///
/// Moving forward and then backward returns the same entry twice.
#[derive(Debug, Clone)]
pub struct Cursor<Ix = DefaultIx> {
    /// Node returned by the next call to `next`
    next: Option<NodeIndex<Ix>>,
    /// Node returned by the next call to `previous`
    previous: Option<NodeIndex<Ix>>,
    /// Node returned by the last movement
    last: Option<NodeIndex<Ix>>,
    /// Modification count of the map this cursor agrees with
    expected_modifications: u64,
    /// Identity of the map that created this cursor
    map_id: u64,
}

impl<Ix> Cursor<Ix>
where
    Ix: IndexType,
{
    pub(crate) fn new<K, V>(map_ref: &TreeBidiMap<K, V, Ix>) -> Self {
        Cursor {
            next: map_ref.first_node(Order::Key),
            previous: None,
            last: None,
            expected_modifications: map_ref.modifications,
            map_id: map_ref.id,
        }
    }

    /// Return `true` if `next` would yield an entry.
    #[inline]
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Return `true` if `previous` would yield an entry.
    #[inline]
    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    /// Move over the next entry and return it.
    ///
    /// # Errors
    ///
    /// `NoSuchElement` after the last entry, `ConcurrentModification` if the
    /// map changed outside the cursor, `ForeignMap` if `map_ref` did not
    /// create the cursor. The cursor does not move on error.
    pub fn next<'a, K, V>(
        &mut self,
        map_ref: &'a TreeBidiMap<K, V, Ix>,
    ) -> Result<(&'a K, &'a V), BidiError> {
        self.check_modifications(map_ref)?;
        let x = self.next.ok_or(BidiError::NoSuchElement)?;
        self.previous = Some(x);
        self.next = map_ref.successor(x, Order::Key);
        self.last = Some(x);
        Ok(map_ref.node_ref(x, Node::entry))
    }

    /// Move over the previous entry and return it.
    ///
    /// # Errors
    ///
    /// `NoSuchElement` before the first entry, `ConcurrentModification` if
    /// the map changed outside the cursor, `ForeignMap` if `map_ref` did not
    /// create the cursor. The cursor does not move on error.
    pub fn previous<'a, K, V>(
        &mut self,
        map_ref: &'a TreeBidiMap<K, V, Ix>,
    ) -> Result<(&'a K, &'a V), BidiError> {
        self.check_modifications(map_ref)?;
        let x = self.previous.ok_or(BidiError::NoSuchElement)?;
        self.next = Some(x);
        self.previous = map_ref.predecessor(x, Order::Key);
        self.last = Some(x);
        Ok(map_ref.node_ref(x, Node::entry))
    }

    /// Return the entry of the last movement.
    ///
    /// # Errors
    ///
    /// `IllegalState` before any movement or right after `remove`.
    pub fn current<'a, K, V>(
        &self,
        map_ref: &'a TreeBidiMap<K, V, Ix>,
    ) -> Result<(&'a K, &'a V), BidiError> {
        self.check_modifications(map_ref)?;
        let x = self.last.ok_or(BidiError::IllegalState)?;
        Ok(map_ref.node_ref(x, Node::entry))
    }

    /// Remove the entry of the last movement from the map.
    ///
    /// The cursor stays usable and keeps its place between the neighbours of
    /// the removed entry.
    ///
    /// # Errors
    ///
    /// `IllegalState` before any movement or when called twice in a row.
    pub fn remove<K, V>(&mut self, map_ref: &mut TreeBidiMap<K, V, Ix>) -> Result<(K, V), BidiError> {
        self.check_modifications(map_ref)?;
        let x = self.last.take().ok_or(BidiError::IllegalState)?;
        if self.previous == Some(x) {
            self.previous = map_ref.predecessor(x, Order::Key);
        } else {
            self.next = map_ref.successor(x, Order::Key);
        }
        let entry = map_ref.remove_node(x);
        self.next = self.next.map(|n| map_ref.relocated(n, x));
        self.previous = self.previous.map(|n| map_ref.relocated(n, x));
        self.expected_modifications = map_ref.modifications;
        Ok(entry)
    }

    fn check_modifications<K, V>(&self, map_ref: &TreeBidiMap<K, V, Ix>) -> Result<(), BidiError> {
        if map_ref.id != self.map_id {
            debug!(
                expected = self.map_id,
                actual = map_ref.id,
                "cursor used with another map"
            );
            return Err(BidiError::ForeignMap);
        }
        if map_ref.modifications == self.expected_modifications {
            Ok(())
        } else {
            debug!(
                expected = self.expected_modifications,
                actual = map_ref.modifications,
                "cursor invalidated by outside modification"
            );
            Err(BidiError::ConcurrentModification)
        }
    }
}

/// A cursor yielding keys, with the entry of the last movement readable
/// through `key` and `value`.
///
/// # Example
/// ```rust
/// use rb_bidi_map::{BidiError, TreeBidiMap};
///
/// let map = TreeBidiMap::from([(1, 'a'), (2, 'b')]);
/// let mut cursor = map.map_cursor();
/// assert_eq!(cursor.key(&map), Err(BidiError::IllegalState));
/// assert_eq!(cursor.next(&map), Ok(&1));
/// assert_eq!(cursor.value(&map), Ok(&'a'));
/// ```
#[derive(Debug, Clone)]
pub struct MapCursor<Ix = DefaultIx> {
    inner: Cursor<Ix>,
}

impl<Ix> MapCursor<Ix>
where
    Ix: IndexType,
{
    pub(crate) fn new<K, V>(map_ref: &TreeBidiMap<K, V, Ix>) -> Self {
        MapCursor {
            inner: Cursor::new(map_ref),
        }
    }

    /// Return `true` if `next` would yield a key.
    #[inline]
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.inner.has_next()
    }

    /// Return `true` if `previous` would yield a key.
    #[inline]
    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.inner.has_previous()
    }

    /// Move over the next entry and return its key.
    ///
    /// # Errors
    ///
    /// See [`Cursor::next`].
    pub fn next<'a, K, V>(&mut self, map_ref: &'a TreeBidiMap<K, V, Ix>) -> Result<&'a K, BidiError> {
        self.inner.next(map_ref).map(|(k, _)| k)
    }

    /// Move over the previous entry and return its key.
    ///
    /// # Errors
    ///
    /// See [`Cursor::previous`].
    pub fn previous<'a, K, V>(
        &mut self,
        map_ref: &'a TreeBidiMap<K, V, Ix>,
    ) -> Result<&'a K, BidiError> {
        self.inner.previous(map_ref).map(|(k, _)| k)
    }

    /// Return the key of the last movement.
    ///
    /// # Errors
    ///
    /// `IllegalState` before any movement or right after `remove`.
    pub fn key<'a, K, V>(&self, map_ref: &'a TreeBidiMap<K, V, Ix>) -> Result<&'a K, BidiError> {
        self.inner.current(map_ref).map(|(k, _)| k)
    }

    /// Return the value of the last movement.
    ///
    /// # Errors
    ///
    /// `IllegalState` before any movement or right after `remove`.
    pub fn value<'a, K, V>(&self, map_ref: &'a TreeBidiMap<K, V, Ix>) -> Result<&'a V, BidiError> {
        self.inner.current(map_ref).map(|(_, v)| v)
    }

    /// Remove the entry of the last movement from the map.
    ///
    /// # Errors
    ///
    /// See [`Cursor::remove`].
    pub fn remove<K, V>(&mut self, map_ref: &mut TreeBidiMap<K, V, Ix>) -> Result<(K, V), BidiError> {
        self.inner.remove(map_ref)
    }
}
