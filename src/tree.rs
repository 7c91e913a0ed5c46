//! The red-black engine shared by both orderings.
//!
//! Every routine here takes the [`Order`] it works on, so the same code keeps
//! the key tree and the value tree balanced. Nodes are never copied: a
//! two-child deletion swaps the positions of the node and its successor
//! inside one ordering and leaves the other ordering untouched.

use std::borrow::Borrow;
use std::cmp::Ordering;

use crate::bidimap::TreeBidiMap;
use crate::index::{IndexType, NodeIndex};
use crate::node::{Color, Links, Node, Order};

impl<K, V, Ix> TreeBidiMap<K, V, Ix>
where
    K: Ord,
    V: Ord,
    Ix: IndexType,
{
    /// Compare two nodes by the given ordering.
    fn compare(&self, order: Order, a: NodeIndex<Ix>, b: NodeIndex<Ix>) -> Ordering {
        match order {
            Order::Key => self
                .node_ref(a, Node::key)
                .cmp(self.node_ref(b, Node::key)),
            Order::Value => self
                .node_ref(a, Node::value)
                .cmp(self.node_ref(b, Node::value)),
        }
    }

    /// Search the key tree for the node holding `key`.
    pub(crate) fn search_key<Q>(&self, key: &Q) -> Option<NodeIndex<Ix>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search(Order::Key, |x| key.cmp(self.node_ref(x, Node::key).borrow()))
    }

    /// Search the value tree for the node holding `value`.
    pub(crate) fn search_value<Q>(&self, value: &Q) -> Option<NodeIndex<Ix>>
    where
        V: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search(Order::Value, |x| {
            value.cmp(self.node_ref(x, Node::value).borrow())
        })
    }

    /// Binary search descent, `probe` compares the target against a node.
    fn search<F>(&self, order: Order, probe: F) -> Option<NodeIndex<Ix>>
    where
        F: Fn(NodeIndex<Ix>) -> Ordering,
    {
        let mut x = self.root(order);
        while !self.is_sentinel(x) {
            x = match probe(x) {
                Ordering::Less => self.left(x, order),
                Ordering::Greater => self.right(x, order),
                Ordering::Equal => return Some(x),
            };
        }
        None
    }

    /// Link a detached node into the tree of `order`.
    pub(crate) fn insert_node(&mut self, z: NodeIndex<Ix>, order: Order) {
        let mut y = NodeIndex::sentinel();
        let mut x = self.root(order);
        let mut went_left = false;

        while !self.is_sentinel(x) {
            y = x;
            went_left = match self.compare(order, z, x) {
                Ordering::Less => true,
                Ordering::Greater => false,
                Ordering::Equal => unreachable!("duplicate entry in the {order:?} tree"),
            };
            x = if went_left {
                self.left(x, order)
            } else {
                self.right(x, order)
            };
        }
        self.node_mut(z, Node::set_parent(order, y));
        if self.is_sentinel(y) {
            self.set_root(order, z);
        } else if went_left {
            self.node_mut(y, Node::set_left(order, z));
        } else {
            self.node_mut(y, Node::set_right(order, z));
        }
        self.node_mut(z, Node::set_color(order, Color::Red));

        self.insert_fixup(z, order);
    }
}

impl<K, V, Ix> TreeBidiMap<K, V, Ix>
where
    Ix: IndexType,
{
    /// Unlink a node from the tree of `order`.
    ///
    /// The node keeps its slot in the arena and its links in the other ordering.
    pub(crate) fn delete_node(&mut self, z: NodeIndex<Ix>, order: Order) {
        if !self.is_sentinel(self.left(z, order)) && !self.is_sentinel(self.right(z, order)) {
            let successor = self.tree_minimum(self.right(z, order), order);
            self.swap_position(z, successor, order);
        }
        // `z` has at most one child now
        let x = if self.is_sentinel(self.left(z, order)) {
            self.right(z, order)
        } else {
            self.left(z, order)
        };
        let z_color = self.color(z, order);
        self.transplant(z, x, order);
        self.node_mut(z, |n: &mut Node<K, V, Ix>| {
            n.links[order.slot()] = Links::detached(z_color)
        });

        if z_color == Color::Black {
            self.remove_fixup(x, order);
        }
    }

    /// Exchange the positions of `x` and `y` in the tree of `order`.
    ///
    /// Parent, children and color trade places. The entries stay in their
    /// nodes, so both nodes keep their positions in the other ordering.
    pub(crate) fn swap_position(&mut self, x: NodeIndex<Ix>, y: NodeIndex<Ix>, order: Order) {
        let xl = *self.node_ref(x, |n| n.links(order));
        let yl = *self.node_ref(y, |n| n.links(order));
        let x_was_left = !self.is_sentinel(xl.parent) && self.left(xl.parent, order) == x;
        let y_was_left = !self.is_sentinel(yl.parent) && self.left(yl.parent, order) == y;

        // `x` takes the place of `y`
        if x == yl.parent {
            self.node_mut(x, Node::set_parent(order, y));
            if y_was_left {
                self.node_mut(y, Node::set_left(order, x));
                self.node_mut(y, Node::set_right(order, xl.right));
            } else {
                self.node_mut(y, Node::set_right(order, x));
                self.node_mut(y, Node::set_left(order, xl.left));
            }
        } else {
            self.node_mut(x, Node::set_parent(order, yl.parent));
            if !self.is_sentinel(yl.parent) {
                if y_was_left {
                    self.node_mut(yl.parent, Node::set_left(order, x));
                } else {
                    self.node_mut(yl.parent, Node::set_right(order, x));
                }
            }
            self.node_mut(y, Node::set_left(order, xl.left));
            self.node_mut(y, Node::set_right(order, xl.right));
        }

        // `y` takes the place of `x`
        if y == xl.parent {
            self.node_mut(y, Node::set_parent(order, x));
            if x_was_left {
                self.node_mut(x, Node::set_left(order, y));
                self.node_mut(x, Node::set_right(order, yl.right));
            } else {
                self.node_mut(x, Node::set_right(order, y));
                self.node_mut(x, Node::set_left(order, yl.left));
            }
        } else {
            self.node_mut(y, Node::set_parent(order, xl.parent));
            if !self.is_sentinel(xl.parent) {
                if x_was_left {
                    self.node_mut(xl.parent, Node::set_left(order, y));
                } else {
                    self.node_mut(xl.parent, Node::set_right(order, y));
                }
            }
            self.node_mut(x, Node::set_left(order, yl.left));
            self.node_mut(x, Node::set_right(order, yl.right));
        }

        for n in [x, y] {
            for child in [self.left(n, order), self.right(n, order)] {
                if !self.is_sentinel(child) {
                    self.node_mut(child, Node::set_parent(order, n));
                }
            }
        }

        self.node_mut(x, Node::set_color(order, yl.color));
        self.node_mut(y, Node::set_color(order, xl.color));

        if self.root(order) == x {
            self.set_root(order, y);
        } else if self.root(order) == y {
            self.set_root(order, x);
        }
    }

    /// Restore red-black tree properties after an insert.
    fn insert_fixup(&mut self, mut z: NodeIndex<Ix>, order: Order) {
        while self.is_red(self.parent(z, order), order) {
            let p = self.parent(z, order);
            let g = self.parent(p, order);
            debug_assert!(!self.is_sentinel(g), "red node without a grandparent");
            if self.is_left_child(p, order) {
                let y = self.right(g, order);
                if self.is_red(y, order) {
                    self.node_mut(p, Node::set_color(order, Color::Black));
                    self.node_mut(y, Node::set_color(order, Color::Black));
                    self.node_mut(g, Node::set_color(order, Color::Red));
                    z = g;
                } else {
                    if self.is_right_child(z, order) {
                        z = p;
                        self.left_rotate(z, order);
                    }
                    let p = self.parent(z, order);
                    let g = self.parent(p, order);
                    self.node_mut(p, Node::set_color(order, Color::Black));
                    self.node_mut(g, Node::set_color(order, Color::Red));
                    self.right_rotate(g, order);
                }
            } else {
                let y = self.left(g, order);
                if self.is_red(y, order) {
                    self.node_mut(p, Node::set_color(order, Color::Black));
                    self.node_mut(y, Node::set_color(order, Color::Black));
                    self.node_mut(g, Node::set_color(order, Color::Red));
                    z = g;
                } else {
                    if self.is_left_child(z, order) {
                        z = p;
                        self.right_rotate(z, order);
                    }
                    let p = self.parent(z, order);
                    let g = self.parent(p, order);
                    self.node_mut(p, Node::set_color(order, Color::Black));
                    self.node_mut(g, Node::set_color(order, Color::Red));
                    self.left_rotate(g, order);
                }
            }
        }
        let root = self.root(order);
        self.node_mut(root, Node::set_color(order, Color::Black));
    }

    /// Restore red-black tree properties after a delete.
    fn remove_fixup(&mut self, mut x: NodeIndex<Ix>, order: Order) {
        while x != self.root(order) && self.is_black(x, order) {
            let p = self.parent(x, order);
            if self.is_left_child(x, order) {
                let mut w = self.right(p, order);
                if self.is_red(w, order) {
                    self.node_mut(w, Node::set_color(order, Color::Black));
                    self.node_mut(p, Node::set_color(order, Color::Red));
                    self.left_rotate(p, order);
                    w = self.right(p, order);
                }
                debug_assert!(!self.is_sentinel(w), "doubly black node without a sibling");
                if self.is_black(self.left(w, order), order)
                    && self.is_black(self.right(w, order), order)
                {
                    self.node_mut(w, Node::set_color(order, Color::Red));
                    x = p;
                } else {
                    if self.is_black(self.right(w, order), order) {
                        let wl = self.left(w, order);
                        self.node_mut(wl, Node::set_color(order, Color::Black));
                        self.node_mut(w, Node::set_color(order, Color::Red));
                        self.right_rotate(w, order);
                        w = self.right(p, order);
                    }
                    self.node_mut(w, Node::set_color(order, self.color(p, order)));
                    self.node_mut(p, Node::set_color(order, Color::Black));
                    let wr = self.right(w, order);
                    self.node_mut(wr, Node::set_color(order, Color::Black));
                    self.left_rotate(p, order);
                    x = self.root(order);
                }
            } else {
                let mut w = self.left(p, order);
                if self.is_red(w, order) {
                    self.node_mut(w, Node::set_color(order, Color::Black));
                    self.node_mut(p, Node::set_color(order, Color::Red));
                    self.right_rotate(p, order);
                    w = self.left(p, order);
                }
                debug_assert!(!self.is_sentinel(w), "doubly black node without a sibling");
                if self.is_black(self.right(w, order), order)
                    && self.is_black(self.left(w, order), order)
                {
                    self.node_mut(w, Node::set_color(order, Color::Red));
                    x = p;
                } else {
                    if self.is_black(self.left(w, order), order) {
                        let wr = self.right(w, order);
                        self.node_mut(wr, Node::set_color(order, Color::Black));
                        self.node_mut(w, Node::set_color(order, Color::Red));
                        self.left_rotate(w, order);
                        w = self.left(p, order);
                    }
                    self.node_mut(w, Node::set_color(order, self.color(p, order)));
                    self.node_mut(p, Node::set_color(order, Color::Black));
                    let wl = self.left(w, order);
                    self.node_mut(wl, Node::set_color(order, Color::Black));
                    self.right_rotate(p, order);
                    x = self.root(order);
                }
            }
        }
        self.node_mut(x, Node::set_color(order, Color::Black));
    }

    /// Binary tree left rotate.
    fn left_rotate(&mut self, x: NodeIndex<Ix>, order: Order) {
        let y = self.right(x, order);
        if self.is_sentinel(y) {
            return;
        }
        let yl = self.left(y, order);
        self.node_mut(x, Node::set_right(order, yl));
        if !self.is_sentinel(yl) {
            self.node_mut(yl, Node::set_parent(order, x));
        }

        self.replace_parent(x, y, order);
        self.node_mut(y, Node::set_left(order, x));
    }

    /// Binary tree right rotate.
    fn right_rotate(&mut self, x: NodeIndex<Ix>, order: Order) {
        let y = self.left(x, order);
        if self.is_sentinel(y) {
            return;
        }
        let yr = self.right(y, order);
        self.node_mut(x, Node::set_left(order, yr));
        if !self.is_sentinel(yr) {
            self.node_mut(yr, Node::set_parent(order, x));
        }

        self.replace_parent(x, y, order);
        self.node_mut(y, Node::set_right(order, x));
    }

    /// Replace parent during a rotation.
    fn replace_parent(&mut self, x: NodeIndex<Ix>, y: NodeIndex<Ix>, order: Order) {
        let p = self.parent(x, order);
        self.node_mut(y, Node::set_parent(order, p));
        if self.is_sentinel(p) {
            self.set_root(order, y);
        } else if self.is_left_child(x, order) {
            self.node_mut(p, Node::set_left(order, y));
        } else {
            self.node_mut(p, Node::set_right(order, y));
        }
        self.node_mut(x, Node::set_parent(order, y));
    }

    /// Replace one subtree as a child of its parent with another subtree.
    fn transplant(&mut self, u: NodeIndex<Ix>, v: NodeIndex<Ix>, order: Order) {
        let p = self.parent(u, order);
        if self.is_sentinel(p) {
            self.set_root(order, v);
        } else if self.is_left_child(u, order) {
            self.node_mut(p, Node::set_left(order, v));
        } else {
            self.node_mut(p, Node::set_right(order, v));
        }
        self.node_mut(v, Node::set_parent(order, p));
    }

    /// Find the leftmost node of a subtree.
    pub(crate) fn tree_minimum(&self, mut x: NodeIndex<Ix>, order: Order) -> NodeIndex<Ix> {
        while !self.is_sentinel(self.left(x, order)) {
            x = self.left(x, order);
        }
        x
    }

    /// Find the rightmost node of a subtree.
    pub(crate) fn tree_maximum(&self, mut x: NodeIndex<Ix>, order: Order) -> NodeIndex<Ix> {
        while !self.is_sentinel(self.right(x, order)) {
            x = self.right(x, order);
        }
        x
    }

    /// Leftmost node of the whole tree, `None` when empty.
    pub(crate) fn first_node(&self, order: Order) -> Option<NodeIndex<Ix>> {
        let root = self.root(order);
        (!self.is_sentinel(root)).then(|| self.tree_minimum(root, order))
    }

    /// Rightmost node of the whole tree, `None` when empty.
    pub(crate) fn last_node(&self, order: Order) -> Option<NodeIndex<Ix>> {
        let root = self.root(order);
        (!self.is_sentinel(root)).then(|| self.tree_maximum(root, order))
    }

    /// In-order successor.
    pub(crate) fn successor(&self, mut x: NodeIndex<Ix>, order: Order) -> Option<NodeIndex<Ix>> {
        let right = self.right(x, order);
        if !self.is_sentinel(right) {
            return Some(self.tree_minimum(right, order));
        }
        let mut y = self.parent(x, order);
        while !self.is_sentinel(y) && x == self.right(y, order) {
            x = y;
            y = self.parent(y, order);
        }
        (!self.is_sentinel(y)).then_some(y)
    }

    /// In-order predecessor.
    pub(crate) fn predecessor(&self, mut x: NodeIndex<Ix>, order: Order) -> Option<NodeIndex<Ix>> {
        let left = self.left(x, order);
        if !self.is_sentinel(left) {
            return Some(self.tree_maximum(left, order));
        }
        let mut y = self.parent(x, order);
        while !self.is_sentinel(y) && x == self.left(y, order) {
            x = y;
            y = self.parent(y, order);
        }
        (!self.is_sentinel(y)).then_some(y)
    }

    /// Check if a node is a left child of its parent.
    fn is_left_child(&self, node: NodeIndex<Ix>, order: Order) -> bool {
        self.left(self.parent(node, order), order) == node
    }

    /// Check if a node is a right child of its parent.
    fn is_right_child(&self, node: NodeIndex<Ix>, order: Order) -> bool {
        self.right(self.parent(node, order), order) == node
    }

    /// Re-target every link to the node that `swap_remove` moved from `old` to `new`.
    pub(crate) fn update_idx(&mut self, old: NodeIndex<Ix>, new: NodeIndex<Ix>) {
        if self.nodes.get(new.index()).is_none() {
            return;
        }
        for order in Order::ALL {
            if self.root(order) == old {
                self.set_root(order, new);
            }
            let p = self.parent(new, order);
            if !self.is_sentinel(p) {
                if self.left(p, order) == old {
                    self.node_mut(p, Node::set_left(order, new));
                } else {
                    self.node_mut(p, Node::set_right(order, new));
                }
            }
            for child in [self.left(new, order), self.right(new, order)] {
                if !self.is_sentinel(child) {
                    self.node_mut(child, Node::set_parent(order, new));
                }
            }
        }
    }
}

// Convenient methods for reference or mutate a node and read its links
impl<'a, K, V, Ix> TreeBidiMap<K, V, Ix>
where
    Ix: IndexType,
{
    pub(crate) fn node_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<K, V, Ix>) -> R,
    {
        op(&self.nodes[node.index()])
    }

    pub(crate) fn node_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<K, V, Ix>) -> R,
    {
        op(&mut self.nodes[node.index()])
    }

    pub(crate) fn root(&self, order: Order) -> NodeIndex<Ix> {
        self.roots[order.slot()]
    }

    fn set_root(&mut self, order: Order, root: NodeIndex<Ix>) {
        self.roots[order.slot()] = root;
    }

    pub(crate) fn is_sentinel(&self, node: NodeIndex<Ix>) -> bool {
        node == NodeIndex::sentinel()
    }

    pub(crate) fn left(&self, node: NodeIndex<Ix>, order: Order) -> NodeIndex<Ix> {
        self.nodes[node.index()].links(order).left
    }

    pub(crate) fn right(&self, node: NodeIndex<Ix>, order: Order) -> NodeIndex<Ix> {
        self.nodes[node.index()].links(order).right
    }

    pub(crate) fn parent(&self, node: NodeIndex<Ix>, order: Order) -> NodeIndex<Ix> {
        self.nodes[node.index()].links(order).parent
    }

    pub(crate) fn color(&self, node: NodeIndex<Ix>, order: Order) -> Color {
        self.nodes[node.index()].links(order).color
    }

    fn is_red(&self, node: NodeIndex<Ix>, order: Order) -> bool {
        matches!(self.color(node, order), Color::Red)
    }

    fn is_black(&self, node: NodeIndex<Ix>, order: Order) -> bool {
        matches!(self.color(node, order), Color::Black)
    }
}
