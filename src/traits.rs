/// Read access to an ordered one-to-one mapping between keys and values.
///
/// Implemented by [`TreeBidiMap`](crate::TreeBidiMap) and by its
/// [`Inverse`](crate::Inverse) view, and accepted by
/// [`TreeBidiMap::from_bidi_map`](crate::TreeBidiMap::from_bidi_map).
pub trait OrderedBidiMap<K, V> {
    /// Return the value the key maps to.
    fn get(&self, key: &K) -> Option<&V>;

    /// Return the key the value is mapped from.
    fn get_key(&self, value: &V) -> Option<&K>;

    /// Return the number of pairs.
    fn len(&self) -> usize;

    /// Return `true` if there are no pairs.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return `true` if the key is mapped.
    fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Return `true` if some key maps to the value.
    fn contains_value(&self, value: &V) -> bool {
        self.get_key(value).is_some()
    }

    /// Return the smallest key.
    fn first_key(&self) -> Option<&K>;

    /// Return the largest key.
    fn last_key(&self) -> Option<&K>;

    /// Return the key after `key`, `None` if `key` is absent or the last one.
    fn next_key(&self, key: &K) -> Option<&K>;

    /// Return the key before `key`, `None` if `key` is absent or the first one.
    fn previous_key(&self, key: &K) -> Option<&K>;
}
