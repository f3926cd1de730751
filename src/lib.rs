//! AVL tree based ordered containers.
//!
//! [`Boxwood`] is a height-balanced binary search tree over uniquely ordered
//! entries, with logarithmic insertion, removal and lookup regardless of
//! insertion order. [`map::BoxwoodMap`] layers a keyed index on top of it and
//! [`loader`] provides a delimited-text bulk loader for course catalogs.

use std::cmp::Ordering;

pub mod iter;
pub mod loader;
pub mod map;

#[cfg(test)]
mod proptests;

pub use iter::{BoxwoodSortedIterator, BoxwoodTraversal, TraversalOrder};

/*
ownership model: every node exclusively owns its children through Box, and the
tree owns its root. mutation threads that ownership through the recursion: each
step takes the subtree by value and returns its (possibly rotated) replacement,
so there are no parent pointers and no aliasing to reason about during the
multi-node pointer surgery of a rotation.

heights are stored, not recomputed: a leaf has height 0 and an absent subtree
counts as -1, which keeps `1 + max(left, right)` uniform at every node.
*/

type Link<T> = Option<Box<BoxwoodNode<T>>>;

#[derive(Debug)]
pub(crate) struct BoxwoodNode<T> {
    pub(crate) entry: T,
    pub(crate) height: i32,
    pub(crate) left: Link<T>,
    pub(crate) right: Link<T>,
}

impl<T> BoxwoodNode<T> {
    fn new(entry: T) -> Box<Self> {
        Box::new(Self {
            entry,
            height: 0,
            left: None,
            right: None,
        })
    }
}

fn link_height<T>(link: &Link<T>) -> i32 {
    link.as_deref().map_or(-1, |node| node.height)
}

fn update_height<T>(node: &mut BoxwoodNode<T>) {
    node.height = 1 + link_height(&node.left).max(link_height(&node.right));
}

/// Promotes the right child over `node`. The caller guarantees the child
/// exists; heights are fixed bottom-up (demoted node first, then the pivot).
fn rotate_left<T>(mut node: Box<BoxwoodNode<T>>) -> Box<BoxwoodNode<T>> {
    let Some(mut pivot) = node.right.take() else {
        return node;
    };
    node.right = pivot.left.take();
    update_height(&mut node);
    pivot.left = Some(node);
    update_height(&mut pivot);
    pivot
}

/// Mirror of [`rotate_left`]: promotes the left child over `node`.
fn rotate_right<T>(mut node: Box<BoxwoodNode<T>>) -> Box<BoxwoodNode<T>> {
    let Some(mut pivot) = node.left.take() else {
        return node;
    };
    node.left = pivot.right.take();
    update_height(&mut node);
    pivot.right = Some(node);
    update_height(&mut pivot);
    pivot
}

/// Restores the AVL invariant at `node` after a structural change below it.
///
/// The `>=` tie-break on the child-height comparison decides between a single
/// and a double rotation; changing it to `>` unbalances the tree on specific
/// insertion orders.
fn rebalance<T>(mut node: Box<BoxwoodNode<T>>) -> Box<BoxwoodNode<T>> {
    update_height(&mut node);
    let balance = link_height(&node.left) - link_height(&node.right);

    // left heavy
    if balance > 1 {
        if let Some(left) = node.left.take() {
            node.left = if link_height(&left.left) >= link_height(&left.right) {
                // left-left
                Some(left)
            } else {
                // left-right
                Some(rotate_left(left))
            };
        }
        return rotate_right(node);
    }

    // right heavy
    if balance < -1 {
        if let Some(right) = node.right.take() {
            node.right = if link_height(&right.right) >= link_height(&right.left) {
                // right-right
                Some(right)
            } else {
                // right-left
                Some(rotate_right(right))
            };
        }
        return rotate_left(node);
    }

    node
}

/// Inserts `entry` below `link`, rebalancing every ancestor on the unwind.
/// The caller has already ruled out duplicates.
fn add_node<T: Ord>(link: Link<T>, entry: T) -> Box<BoxwoodNode<T>> {
    let Some(mut node) = link else {
        return BoxwoodNode::new(entry);
    };

    if entry < node.entry {
        node.left = Some(add_node(node.left.take(), entry));
    } else {
        node.right = Some(add_node(node.right.take(), entry));
    }

    rebalance(node)
}

/// Detaches the leftmost entry of the subtree rooted at `node`, returning the
/// rebalanced remainder and the extracted entry.
fn detach_min<T: Ord>(mut node: Box<BoxwoodNode<T>>) -> (Link<T>, T) {
    match node.left.take() {
        None => (node.right.take(), node.entry),
        Some(left) => {
            let (remainder, min) = detach_min(left);
            node.left = remainder;
            (Some(rebalance(node)), min)
        }
    }
}

/// Removes the entry matching `probe` from the subtree at `link`, if present.
fn remove_node<T: Ord>(link: Link<T>, probe: &T) -> Link<T> {
    let Some(mut node) = link else {
        return None;
    };

    match probe.cmp(&node.entry) {
        Ordering::Less => node.left = remove_node(node.left.take(), probe),
        Ordering::Greater => node.right = remove_node(node.right.take(), probe),
        Ordering::Equal => {
            return match (node.left.take(), node.right.take()) {
                (None, right) => right,
                (left, None) => left,
                // two children: splice the in-order successor into this slot.
                // the successor is the leftmost node of the right subtree and
                // has at most one child, so extraction reduces to the simple
                // cases above.
                (left, Some(right)) => {
                    let (remainder, successor) = detach_min(right);
                    node.entry = successor;
                    node.left = left;
                    node.right = remainder;
                    Some(rebalance(node))
                }
            };
        }
    }

    Some(rebalance(node))
}

/// A height-balanced binary search tree holding unique ordered entries.
#[derive(Debug)]
pub struct Boxwood<T: Ord> {
    root: Link<T>,
    length: usize,
}

impl<T: Ord> Boxwood<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: None,
            length: 0,
        }
    }

    /// Inserts `entry`, returning `false` without touching the tree when an
    /// equal entry is already present.
    pub fn insert(&mut self, entry: T) -> bool {
        if self.get(&entry).is_some() {
            return false;
        }

        self.root = Some(add_node(self.root.take(), entry));
        self.length += 1;
        true
    }

    /// Removes the entry matching `probe`. Removing an absent entry is a
    /// no-op, not an error.
    pub fn remove(&mut self, probe: &T) {
        if self.get(probe).is_none() {
            return;
        }

        self.root = remove_node(self.root.take(), probe);
        self.length -= 1;
    }

    /// Binary descent lookup. Returns the stored entry equal to `probe`, or
    /// `None` when no such entry exists.
    pub fn get(&self, probe: &T) -> Option<&T> {
        let mut current = self.root.as_deref();

        while let Some(node) = current {
            match probe.cmp(&node.entry) {
                Ordering::Less => current = node.left.as_deref(),
                Ordering::Equal => return Some(&node.entry),
                Ordering::Greater => current = node.right.as_deref(),
            }
        }

        None
    }

    // Mutable lookup stays crate-private: changing the ordered part of an
    // entry would corrupt the search order. `BoxwoodMap` uses it to hand out
    // access to the non-ordered value half only.
    pub(crate) fn get_mut(&mut self, probe: &T) -> Option<&mut T> {
        let mut current = self.root.as_deref_mut();

        while let Some(node) = current {
            match probe.cmp(&node.entry) {
                Ordering::Less => current = node.left.as_deref_mut(),
                Ordering::Equal => return Some(&mut node.entry),
                Ordering::Greater => current = node.right.as_deref_mut(),
            }
        }

        None
    }

    pub fn contains(&self, probe: &T) -> bool {
        self.get(probe).is_some()
    }

    /// Lazy ascending iterator over the stored entries.
    pub fn iter(&self) -> BoxwoodSortedIterator<'_, T> {
        BoxwoodSortedIterator::new(self)
    }

    /// Lazy traversal of the stored entries in the requested order. Each call
    /// starts a fresh traversal; the tree is never mutated.
    pub fn traverse(&self, order: TraversalOrder) -> BoxwoodTraversal<'_, T> {
        BoxwoodTraversal::new(self, order)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.length
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn clear(&mut self) {
        self.root = None;
        self.length = 0;
    }
}

impl<T: Ord> Default for Boxwood<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T: Ord> IntoIterator for &'a Boxwood<T> {
    type Item = &'a T;
    type IntoIter = BoxwoodSortedIterator<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
