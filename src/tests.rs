use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};

use index::NodeIndex;
use node::{Color, Order};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use super::*;

struct PairGenerator {
    rng: StdRng,
    keys: HashSet<i32>,
    values: HashSet<i32>,
    limit: i32,
}

impl PairGenerator {
    fn new(seed: [u8; 32]) -> Self {
        const LIMIT: i32 = 100_000;
        Self {
            rng: SeedableRng::from_seed(seed),
            keys: HashSet::new(),
            values: HashSet::new(),
            limit: LIMIT,
        }
    }

    fn next(&mut self) -> (i32, i32) {
        (
            self.rng.gen_range(0..self.limit),
            self.rng.gen_range(0..self.limit),
        )
    }

    /// A pair whose key and value were never handed out before.
    fn next_unique(&mut self) -> (i32, i32) {
        let mut key = self.rng.gen_range(0..self.limit);
        while self.keys.contains(&key) {
            key = self.rng.gen_range(0..self.limit);
        }
        let mut value = self.rng.gen_range(0..self.limit);
        while self.values.contains(&value) {
            value = self.rng.gen_range(0..self.limit);
        }
        self.keys.insert(key);
        self.values.insert(value);
        (key, value)
    }
}

type Snapshot = Vec<(NodeIndex, NodeIndex, NodeIndex, Color)>;

impl<K: Ord, V: Ord> TreeBidiMap<K, V> {
    /// 1. Every node is either red or black.
    /// 2. The root is black.
    /// 3. Every leaf (NIL) is black.
    /// 4. If a node is red, then both its children are black.
    /// 5. For each node, all simple paths from the node to descendant leaves contain the
    /// same number of black nodes.
    ///
    /// Checked for the key tree and the value tree.
    fn check_rb_properties(&self) {
        for order in Order::ALL {
            let root = self.root(order);
            assert!(matches!(self.color(root, order), Color::Black));
            assert!(matches!(
                self.color(NodeIndex::sentinel(), order),
                Color::Black
            ));
            self.check_children_color(root, order);
            self.check_black_height(root, order);
        }
    }

    fn check_children_color(&self, x: NodeIndex, order: Order) {
        if self.is_sentinel(x) {
            return;
        }
        self.check_children_color(self.left(x, order), order);
        self.check_children_color(self.right(x, order), order);
        if matches!(self.color(x, order), Color::Red) {
            assert!(matches!(
                self.color(self.left(x, order), order),
                Color::Black
            ));
            assert!(matches!(
                self.color(self.right(x, order), order),
                Color::Black
            ));
        }
    }

    fn check_black_height(&self, x: NodeIndex, order: Order) -> usize {
        if self.is_sentinel(x) {
            return 0;
        }
        let lefth = self.check_black_height(self.left(x, order), order);
        let righth = self.check_black_height(self.right(x, order), order);
        assert_eq!(lefth, righth);
        if matches!(self.color(x, order), Color::Black) {
            return lefth + 1;
        }
        lefth
    }

    /// Parent and child links agree, and both trees hold every node of the
    /// arena exactly once.
    fn check_links(&self, order: Order) {
        let root = self.root(order);
        if !self.is_sentinel(root) {
            assert!(self.is_sentinel(self.parent(root, order)));
        }
        assert_eq!(self.count_linked(root, order), self.len());
        assert_eq!(self.nodes.len(), self.len() + 1);
    }

    fn count_linked(&self, x: NodeIndex, order: Order) -> usize {
        if self.is_sentinel(x) {
            return 0;
        }
        let mut count = 1;
        for child in [self.left(x, order), self.right(x, order)] {
            if !self.is_sentinel(child) {
                assert_eq!(self.parent(child, order), x);
                count += self.count_linked(child, order);
            }
        }
        count
    }

    /// Keys ascend in key order, values ascend in value order.
    fn check_sorted(&self) {
        let keys: Vec<_> = self.keys().collect();
        assert!(keys.windows(2).all(|w| w[0] < w[1]));
        let values: Vec<_> = self.inverse().iter().map(|(v, _)| v).collect();
        assert!(values.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(keys.len(), self.len());
        assert_eq!(values.len(), self.len());
    }

    fn check_bijection(&self) {
        for (k, v) in self.iter() {
            assert!(self.get_key(v) == Some(k));
            assert!(self.get(k) == Some(v));
        }
    }

    fn check_all(&self) {
        for order in Order::ALL {
            self.check_links(order);
        }
        self.check_rb_properties();
        self.check_sorted();
        self.check_bijection();
    }

    /// Node indices in order of the given tree, following links only.
    fn in_order(&self, order: Order) -> Vec<NodeIndex> {
        let mut nodes = vec![];
        let mut x = self.first_node(order);
        while let Some(n) = x {
            nodes.push(n);
            x = self.successor(n, order);
        }
        nodes
    }

    fn snapshot(&self, order: Order) -> Snapshot {
        self.nodes
            .iter()
            .skip(1)
            .map(|n| {
                let l = n.links(order);
                (l.left, l.right, l.parent, l.color)
            })
            .collect()
    }
}

fn with_map_and_generator(test_fn: impl Fn(TreeBidiMap<i32, i32>, PairGenerator)) {
    let seeds = vec![[0; 32], [1; 32], [2; 32]];
    for seed in seeds {
        let gen = PairGenerator::new(seed);
        let map = TreeBidiMap::new();
        test_fn(map, gen);
    }
}

/// Keys `0..n` mapped to a permutation of `0..n`, so the value tree has a
/// different shape than the key tree.
fn permuted_map(n: i32) -> TreeBidiMap<i32, i32> {
    (0..n).map(|k| (k, permuted_value(n, k))).collect()
}

fn permuted_value(n: i32, k: i32) -> i32 {
    (k * 29 + 3) % n
}

#[test]
fn red_black_tree_properties_is_satisfied() {
    with_map_and_generator(|mut map, mut gen| {
        let pairs: Vec<_> = std::iter::repeat_with(|| gen.next_unique())
            .take(1000)
            .collect();
        for (k, v) in pairs {
            let _ignore = map.insert(k, v);
        }
        map.check_all();
    });
}

#[test]
fn red_black_tree_properties_hold_after_every_remove() {
    with_map_and_generator(|mut map, mut gen| {
        let mut pairs: Vec<_> = std::iter::repeat_with(|| gen.next_unique())
            .take(300)
            .collect();
        for &(k, v) in &pairs {
            let _ignore = map.insert(k, v);
            map.check_all();
        }
        pairs.shuffle(&mut gen.rng);
        for (i, (k, v)) in pairs.into_iter().enumerate() {
            if i % 2 == 0 {
                assert_eq!(map.remove(&k), Some(v));
            } else {
                assert_eq!(map.remove_value(&v), Some(k));
            }
            map.check_all();
        }
        assert!(map.is_empty());
        assert_eq!(map.first_key(), None);
    });
}

#[test]
fn colliding_inserts_keep_both_trees_balanced() {
    with_map_and_generator(|mut map, mut gen| {
        for _ in 0..2000 {
            let (k, v) = gen.next();
            let (k, v) = (k % 200, v % 200);
            let _ignore = map.insert(k, v);
            assert_eq!(map.get(&k), Some(&v));
            assert_eq!(map.get_key(&v), Some(&k));
        }
        map.check_all();
    });
}

#[test]
fn map_len_will_update() {
    with_map_and_generator(|mut map, mut gen| {
        let pairs: Vec<_> = std::iter::repeat_with(|| gen.next_unique())
            .take(100)
            .collect();
        for &(k, v) in &pairs {
            let _ignore = map.insert(k, v);
        }
        assert_eq!(map.len(), 100);
        for (k, _) in pairs {
            let _ignore = map.remove(&k);
        }
        assert_eq!(map.len(), 0);
        assert!(map.is_empty());
    });
}

#[test]
fn remove_non_exist_key_will_do_nothing() {
    with_map_and_generator(|mut map, mut gen| {
        let pairs: Vec<_> = std::iter::repeat_with(|| gen.next_unique())
            .take(1000)
            .collect();
        for (k, v) in pairs {
            let _ignore = map.insert(k, v);
        }
        let to_remove: Vec<_> = std::iter::repeat_with(|| gen.next_unique())
            .take(1000)
            .collect();
        for (k, v) in to_remove {
            assert_eq!(map.remove(&k), None);
            assert_eq!(map.remove_value(&v), None);
        }
        assert_eq!(map.len(), 1000);
        map.check_all();
    });
}

#[test]
fn remove_twice_is_same_as_once() {
    let mut map = permuted_map(10);
    assert_eq!(map.remove(&4), Some(permuted_value(10, 4)));
    let modifications = map.modifications;
    assert_eq!(map.remove(&4), None);
    assert_eq!(map.modifications, modifications);
    assert_eq!(map.len(), 9);
    map.check_all();
}

#[test]
fn iterate_through_map_is_sorted() {
    with_map_and_generator(|mut map, mut gen| {
        let mut pairs: Vec<_> = std::iter::repeat_with(|| gen.next_unique())
            .take(1000)
            .collect();
        for &(k, v) in &pairs {
            let _ignore = map.insert(k, v);
        }
        pairs.sort_unstable();
        for ((ek, ev), (k, v)) in map.iter().zip(pairs.iter()) {
            assert_eq!(ek, k);
            assert_eq!(ev, v);
        }

        pairs.sort_unstable_by_key(|&(_, v)| v);
        for ((ev, ek), (k, v)) in map.inverse().iter().zip(pairs.iter()) {
            assert_eq!(ek, k);
            assert_eq!(ev, v);
        }
    });
}

#[test]
fn iterate_backward_is_reverse_of_forward() {
    let map = permuted_map(50);
    let forward: Vec<_> = map.iter().collect();
    let mut backward: Vec<_> = map.iter().rev().collect();
    backward.reverse();
    assert_eq!(forward, backward);

    let mut iter = map.iter();
    assert_eq!(iter.len(), 50);
    assert_eq!(iter.next(), Some((&0, &3)));
    assert_eq!(iter.next_back(), Some((&49, &permuted_value(50, 49))));
    assert_eq!(iter.len(), 48);
    assert_eq!(iter.count(), 48);
}

#[test]
fn into_iter_yields_owned_entries_in_key_order() {
    let map: TreeBidiMap<String, usize> = ["pear", "apple", "fig"]
        .into_iter()
        .map(String::from)
        .zip([3, 1, 2])
        .collect();
    let entries: Vec<_> = map.clone().into_iter().collect();
    assert_eq!(
        entries,
        [
            ("apple".to_string(), 1),
            ("fig".to_string(), 2),
            ("pear".to_string(), 3)
        ]
    );
    let mut iter = map.into_iter();
    assert_eq!(iter.next_back(), Some(("pear".to_string(), 3)));
    assert_eq!(iter.next(), Some(("apple".to_string(), 1)));
    assert_eq!(iter.next(), Some(("fig".to_string(), 2)));
    assert_eq!(iter.next(), None);
}

#[test]
fn bijection_holds_in_both_directions() {
    with_map_and_generator(|mut map, mut gen| {
        let pairs: Vec<_> = std::iter::repeat_with(|| gen.next_unique())
            .take(500)
            .collect();
        for &(k, v) in &pairs {
            let _ignore = map.insert(k, v);
        }
        for (k, v) in pairs {
            assert_eq!(map.get_key(map.get(&k).unwrap()), Some(&k));
            assert_eq!(map.get(map.get_key(&v).unwrap()), Some(&v));
            assert!(map.contains_key(&k));
            assert!(map.contains_value(&v));
        }
    });
}

#[test]
fn insert_replaces_stale_pair_of_key() {
    let mut map = TreeBidiMap::from([(1, "one"), (2, "two")]);
    assert_eq!(map.insert(1, "uno"), Some("one"));
    assert_eq!(map.get(&1), Some(&"uno"));
    assert_eq!(map.get_key(&"one"), None);
    assert_eq!(map.len(), 2);
    map.check_all();
}

#[test]
fn insert_replaces_pair_holding_value() {
    let mut map = TreeBidiMap::from([(1, "one"), (2, "two")]);
    assert_eq!(map.insert(3, "one"), None);
    assert_eq!(map.get(&1), None);
    assert_eq!(map.get_key(&"one"), Some(&3));
    assert_eq!(map.len(), 2);
    map.check_all();
}

#[test]
fn insert_resolves_key_and_value_collision_at_once() {
    let mut map = TreeBidiMap::from([(1, 'a'), (2, 'b'), (3, 'c')]);
    assert_eq!(map.insert(1, 'b'), Some('a'));
    assert_eq!(map.len(), 2);
    assert_eq!(map.get(&1), Some(&'b'));
    assert_eq!(map.get(&2), None);
    assert_eq!(map.get_key(&'a'), None);
    assert_eq!(map.get_key(&'c'), Some(&3));
    map.check_all();
}

#[test]
fn insert_same_pair_changes_no_structure() {
    let mut map = permuted_map(20);
    let modifications = map.modifications;
    let key_tree = map.snapshot(Order::Key);
    let value_tree = map.snapshot(Order::Value);
    let value = permuted_value(20, 5);
    assert_eq!(map.insert(5, value), Some(value));
    assert_eq!(map.modifications, modifications);
    assert_eq!(map.snapshot(Order::Key), key_tree);
    assert_eq!(map.snapshot(Order::Value), value_tree);
}

#[test]
fn three_entries_walk_forward_and_backward() {
    let mut map = TreeBidiMap::new();
    map.insert(1, "one");
    map.insert(2, "two");
    map.insert(3, "three");

    let mut cursor = map.cursor();
    assert_eq!(cursor.next(&map), Ok((&1, &"one")));
    assert_eq!(cursor.next(&map), Ok((&2, &"two")));
    assert_eq!(cursor.next(&map), Ok((&3, &"three")));
    assert_eq!(cursor.next(&map), Err(BidiError::NoSuchElement));

    assert_eq!(cursor.previous(&map), Ok((&3, &"three")));
    assert_eq!(cursor.previous(&map), Ok((&2, &"two")));
    assert_eq!(cursor.previous(&map), Ok((&1, &"one")));
    assert_eq!(cursor.previous(&map), Err(BidiError::NoSuchElement));
    assert!(!cursor.has_previous());
    assert!(cursor.has_next());
}

#[test]
fn cursor_round_trip_has_no_duplicate_or_gap() {
    let map = permuted_map(40);
    let mut cursor = map.cursor();
    let mut forward = vec![];
    while cursor.has_next() {
        forward.push(*cursor.next(&map).unwrap().0);
    }
    let mut backward = vec![];
    while cursor.has_previous() {
        backward.push(*cursor.previous(&map).unwrap().0);
    }
    assert_eq!(forward, (0..40).collect::<Vec<_>>());
    assert_eq!(backward, (0..40).rev().collect::<Vec<_>>());
    assert_eq!(cursor.next(&map), Ok((&0, &3)));
}

#[test]
fn copy_is_equal_and_independent() {
    let original = TreeBidiMap::from([(5, 'e'), (3, 'c'), (1, 'a'), (4, 'd'), (2, 'b')]);
    let mut copy = TreeBidiMap::<i32, char>::from_bidi_map(&original);
    assert_eq!(copy, original);
    copy.check_all();

    let mut h1 = DefaultHasher::new();
    let mut h2 = DefaultHasher::new();
    copy.hash(&mut h1);
    original.hash(&mut h2);
    assert_eq!(h1.finish(), h2.finish());

    assert_eq!(copy.remove(&3), Some('c'));
    copy.insert(6, 'a');
    assert_ne!(copy, original);
    assert_eq!(original.len(), 5);
    assert_eq!(original.get(&3), Some(&'c'));
    assert_eq!(original.get(&1), Some(&'a'));
    assert_eq!(original.get_key(&'a'), Some(&1));
    original.check_all();

    let cloned = original.clone();
    assert_eq!(cloned, original);
}

#[test]
fn copy_from_inverse_swaps_roles() {
    let map = permuted_map(12);
    let swapped = TreeBidiMap::<i32, i32>::from_bidi_map(&map.inverse());
    swapped.check_all();
    for (k, v) in map.iter() {
        assert_eq!(swapped.get(v), Some(k));
    }
}

#[test]
fn deleting_root_of_seven_keeps_trees_balanced() {
    let mut map: TreeBidiMap<i32, String> = (1..=7).map(|k| (k, format!("v{}", 8 - k))).collect();
    map.check_all();
    let root = map.root(Order::Key);
    let root_key = *map.node_ref(root, |n| n.key());
    assert!(map.remove(&root_key).is_some());
    map.check_all();
    assert_eq!(map.len(), 6);
    for k in (1..=7).filter(|&k| k != root_key) {
        let v = format!("v{}", 8 - k);
        assert_eq!(map.get(&k), Some(&v));
        assert_eq!(map.get_key(v.as_str()), Some(&k));
    }
}

#[test]
fn deleting_every_position_keeps_trees_balanced() {
    for n in 1..=24 {
        for k in 0..n {
            let mut map = permuted_map(n);
            assert_eq!(map.remove(&k), Some(permuted_value(n, k)));
            map.check_all();

            let mut map = permuted_map(n);
            assert_eq!(map.remove_value(&k), Some(map_key_of(n, k)));
            map.check_all();
        }
    }
}

/// Key mapped to `value` by `permuted_map(n)`.
fn map_key_of(n: i32, value: i32) -> i32 {
    (0..n).find(|&k| permuted_value(n, k) == value).unwrap()
}

#[test]
fn swap_position_handles_every_relative_position() {
    const N: i32 = 15;
    let base = permuted_map(N);
    let count = base.nodes.len();
    for order in Order::ALL {
        let other = match order {
            Order::Key => Order::Value,
            Order::Value => Order::Key,
        };
        for xi in 1..count {
            for yi in 1..count {
                if xi == yi {
                    continue;
                }
                let (x, y) = (NodeIndex::new(xi), NodeIndex::new(yi));
                let mut map = permuted_map(N);
                let before = map.in_order(order);
                let tree = map.snapshot(order);
                let other_tree = map.snapshot(other);
                let colors = (map.color(x, order), map.color(y, order));

                map.swap_position(x, y, order);
                map.check_links(order);
                let expected: Vec<_> = before
                    .iter()
                    .map(|&i| match i {
                        i if i == x => y,
                        i if i == y => x,
                        i => i,
                    })
                    .collect();
                assert_eq!(map.in_order(order), expected, "swap {xi} {yi} in {order:?}");
                assert_eq!((map.color(y, order), map.color(x, order)), colors);
                assert_eq!(map.snapshot(other), other_tree);

                map.swap_position(x, y, order);
                assert_eq!(map.snapshot(order), tree);
            }
        }
    }
}

#[test]
fn swap_position_with_direct_right_child_at_root() {
    let mut map = permuted_map(3);
    let root = map.root(Order::Key);
    let right = map.right(root, Order::Key);
    map.swap_position(root, right, Order::Key);
    assert_eq!(map.root(Order::Key), right);
    assert_eq!(map.right(right, Order::Key), root);
    assert!(map.is_sentinel(map.parent(right, Order::Key)));
    map.check_links(Order::Key);
}

#[test]
fn navigation_follows_key_order() {
    let map = TreeBidiMap::from([(10, 'a'), (30, 'b'), (20, 'c')]);
    assert_eq!(map.first_key(), Some(&10));
    assert_eq!(map.last_key(), Some(&30));
    assert_eq!(map.first_entry(), Some((&10, &'a')));
    assert_eq!(map.last_entry(), Some((&30, &'b')));
    assert_eq!(map.next_key(&10), Some(&20));
    assert_eq!(map.next_key(&20), Some(&30));
    assert_eq!(map.next_key(&30), None);
    assert_eq!(map.previous_key(&30), Some(&20));
    assert_eq!(map.previous_key(&10), None);
    assert_eq!(map.next_key(&15), None);
    assert_eq!(map.previous_key(&15), None);

    let empty = TreeBidiMap::<i32, char>::new();
    assert_eq!(empty.first_key(), None);
    assert_eq!(empty.last_key(), None);
    assert_eq!(empty.iter().next(), None);
}

#[test]
fn inverse_view_reads_value_order() {
    let map = TreeBidiMap::from([(10, 'c'), (30, 'a'), (20, 'b')]);
    let inverse = map.inverse();
    assert_eq!(inverse.len(), 3);
    assert_eq!(inverse.get(&'a'), Some(&30));
    assert_eq!(inverse.get_key(&10), Some(&'c'));
    assert!(inverse.contains_key(&'b'));
    assert!(inverse.contains_value(&20));
    assert_eq!(inverse.first_key(), Some(&'a'));
    assert_eq!(inverse.last_key(), Some(&'c'));
    assert_eq!(inverse.next_key(&'a'), Some(&'b'));
    assert_eq!(inverse.previous_key(&'a'), None);
    assert_eq!(inverse.next_key(&'z'), None);
    let pairs: Vec<_> = inverse.iter().rev().collect();
    assert_eq!(pairs, [(&'c', &10), (&'b', &20), (&'a', &30)]);
    assert!(std::ptr::eq(inverse.inverse(), &map));
    assert_eq!(format!("{inverse:?}"), "{'a': 30, 'b': 20, 'c': 10}");
}

#[test]
fn inverse_mut_changes_the_map() {
    let mut map = TreeBidiMap::from([(1, 'a'), (2, 'b')]);
    let mut inverse = map.inverse_mut();
    assert_eq!(inverse.insert('c', 3), None);
    assert_eq!(inverse.insert('a', 4), Some(1));
    assert_eq!(inverse.insert('b', 2), Some(2));
    assert_eq!(inverse.remove(&'c'), Some(3));
    assert_eq!(inverse.remove_value(&2), Some('b'));
    assert_eq!(inverse.get(&'a'), Some(&4));
    assert_eq!(inverse.as_inverse().first_key(), Some(&'a'));
    assert_eq!(inverse.len(), 1);
    assert_eq!(map.get(&4), Some(&'a'));
    map.check_all();
}

#[test]
fn lookups_accept_borrowed_forms() {
    let mut map = TreeBidiMap::new();
    map.insert(String::from("one"), String::from("uno"));
    map.insert(String::from("two"), String::from("dos"));
    assert_eq!(map.get("one").map(String::as_str), Some("uno"));
    assert_eq!(map.get_key("dos").map(String::as_str), Some("two"));
    assert_eq!(map.next_key("one").map(String::as_str), Some("two"));
    assert_eq!(map.remove_value("uno").as_deref(), Some("one"));
    assert!(!map.contains_key("one"));
}

#[test]
fn smaller_index_type_works() {
    let mut map = TreeBidiMap::<i32, i32, u16>::with_capacity(64);
    for k in 0..64 {
        map.insert(k, 63 - k);
    }
    for k in (0..64).step_by(3) {
        assert_eq!(map.remove(&k), Some(63 - k));
    }
    assert_eq!(map.len(), 64 - 22);
    assert_eq!(map.keys().next(), Some(&1));
    assert_eq!(map.values().next(), Some(&62));
}

#[test]
fn bidi_map_clear_is_ok() {
    let mut map = TreeBidiMap::from([(1, 3), (2, 4), (6, 7)]);
    assert_eq!(map.len(), 3);
    map.clear();
    assert_eq!(map.len(), 0);
    assert!(map.is_empty());
    assert_eq!(map.nodes.len(), 1);
    assert_eq!(map.get(&1), None);
    map.insert(1, 1);
    map.check_all();
}

#[test]
fn provided_trait_methods_work_for_map_and_inverse() {
    fn summary<K, V>(m: &dyn OrderedBidiMap<K, V>, k: &K, v: &V) -> (bool, bool, bool) {
        (m.contains_key(k), m.contains_value(v), m.is_empty())
    }
    let map = TreeBidiMap::from([(1, 'a'), (2, 'b')]);
    assert_eq!(summary(&map, &1, &'b'), (true, true, false));
    assert_eq!(summary(&map, &3, &'z'), (false, false, false));
    assert_eq!(summary(&map.inverse(), &'a', &2), (true, true, false));
    assert_eq!(summary(&map.inverse(), &'c', &1), (false, true, false));
    let empty = TreeBidiMap::<i32, char>::new();
    assert_eq!(summary(&empty, &1, &'a'), (false, false, true));
}

#[test]
#[should_panic(expected = "Reached maximum number of nodes")]
fn insert_past_index_capacity_panics() {
    let mut map = TreeBidiMap::<u32, u32, u16>::with_capacity(0);
    // index 0 is the sentinel and `u16::MAX` marks the end
    let usable = u32::from(u16::MAX) - 1;
    for k in 0..usable {
        map.insert(k, k);
    }
    assert_eq!(map.len(), 65534);
    map.insert(usable, usable);
}

#[test]
fn debug_prints_entries_in_key_order() {
    let map = TreeBidiMap::from([(2, "b"), (1, "a")]);
    assert_eq!(format!("{map:?}"), r#"{1: "a", 2: "b"}"#);
    assert_eq!(format!("{:?}", map.keys()), "[1, 2]");
}

#[cfg(feature = "serde")]
#[test]
fn test_serde_bidi_map() {
    use serde_json::{json, Value};

    let mut bidi_map = TreeBidiMap::<i32, String>::new();
    bidi_map.insert(3, "c".to_string());
    bidi_map.insert(1, "a".to_string());
    bidi_map.insert(2, "b".to_string());

    // Serialize the map to JSON
    let serialized = serde_json::to_string(&bidi_map).unwrap();
    let expected = json!([[1, "a"], [2, "b"], [3, "c"]]);
    let actual: Value = serde_json::from_str(&serialized).unwrap();
    assert_eq!(expected, actual);

    // Deserialize the map from JSON
    let deserialized: TreeBidiMap<i32, String> = serde_json::from_str(&serialized).unwrap();
    assert_eq!(deserialized, bidi_map);
    deserialized.check_all();

    // Later pairs win over earlier ones
    let collided: TreeBidiMap<i32, String> =
        serde_json::from_str(r#"[[1, "a"], [2, "a"]]"#).unwrap();
    assert_eq!(collided.len(), 1);
    assert_eq!(collided.get_key("a"), Some(&2));
}
