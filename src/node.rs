use crate::index::{IndexType, NodeIndex};

/// One of the two orderings the same node set is organized by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Order {
    /// Ordered by `K`
    Key,
    /// Ordered by `V`
    Value,
}

impl Order {
    /// Both orderings, key first.
    pub const ALL: [Order; 2] = [Order::Key, Order::Value];

    /// Slot of this ordering in per-node and per-map arrays.
    #[inline]
    pub fn slot(self) -> usize {
        match self {
            Order::Key => 0,
            Order::Value => 1,
        }
    }
}

/// The color of a node in one ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// Red node
    Red,
    /// Black node
    Black,
}

/// Family links of a node in one ordering.
#[derive(Debug, Clone, Copy)]
pub struct Links<Ix> {
    /// Left children
    pub left: NodeIndex<Ix>,
    /// Right children
    pub right: NodeIndex<Ix>,
    /// Parent
    pub parent: NodeIndex<Ix>,
    /// Color of the node
    pub color: Color,
}

impl<Ix: IndexType> Links<Ix> {
    /// Links of a node that is not attached to any tree yet.
    pub fn detached(color: Color) -> Self {
        Links {
            left: NodeIndex::sentinel(),
            right: NodeIndex::sentinel(),
            parent: NodeIndex::sentinel(),
            color,
        }
    }
}

/// Node of both trees.
///
/// The entry never moves between nodes, only the links do.
#[derive(Debug)]
pub struct Node<K, V, Ix> {
    /// The key-value pair, `None` for the sentinel
    pub entry: Option<(K, V)>,
    /// Links for `Order::Key` and `Order::Value`
    pub links: [Links<Ix>; 2],
}

impl<K, V, Ix> Node<K, V, Ix>
where
    Ix: IndexType,
{
    pub fn new(key: K, value: V) -> Self {
        Node {
            entry: Some((key, value)),
            links: [Links::detached(Color::Red); 2],
        }
    }

    pub fn new_sentinel() -> Self {
        Node {
            entry: None,
            links: [Links::detached(Color::Black); 2],
        }
    }

    pub fn entry(&self) -> (&K, &V) {
        match self.entry {
            Some((ref key, ref value)) => (key, value),
            None => unreachable!("the sentinel carries no entry"),
        }
    }

    pub fn key(&self) -> &K {
        self.entry().0
    }

    pub fn value(&self) -> &V {
        self.entry().1
    }

    pub fn take_entry(&mut self) -> (K, V) {
        match self.entry.take() {
            Some(entry) => entry,
            None => unreachable!("the sentinel carries no entry"),
        }
    }

    pub fn links(&self, order: Order) -> &Links<Ix> {
        &self.links[order.slot()]
    }

    /// Replaces the entry with one that compares equal in both orderings.
    pub fn replace_entry(key: K, value: V) -> impl FnOnce(&mut Node<K, V, Ix>) -> (K, V) {
        move |node: &mut Node<K, V, Ix>| match node.entry.replace((key, value)) {
            Some(old) => old,
            None => unreachable!("the sentinel carries no entry"),
        }
    }

    pub fn set_color(order: Order, color: Color) -> impl FnOnce(&mut Node<K, V, Ix>) {
        move |node: &mut Node<K, V, Ix>| {
            node.links[order.slot()].color = color;
        }
    }

    pub fn set_left(order: Order, left: NodeIndex<Ix>) -> impl FnOnce(&mut Node<K, V, Ix>) {
        move |node: &mut Node<K, V, Ix>| {
            node.links[order.slot()].left = left;
        }
    }

    pub fn set_right(order: Order, right: NodeIndex<Ix>) -> impl FnOnce(&mut Node<K, V, Ix>) {
        move |node: &mut Node<K, V, Ix>| {
            node.links[order.slot()].right = right;
        }
    }

    pub fn set_parent(order: Order, parent: NodeIndex<Ix>) -> impl FnOnce(&mut Node<K, V, Ix>) {
        move |node: &mut Node<K, V, Ix>| {
            node.links[order.slot()].parent = parent;
        }
    }
}
