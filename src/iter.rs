//! Lazy traversal producers over a [`Boxwood`] tree.
//!
//! All iterators borrow the tree immutably: traversal never mutates the
//! structure, and the borrow prevents mutation for the iterator's lifetime.

use crate::{Boxwood, BoxwoodNode};

/// Visit order for [`Boxwood::traverse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalOrder {
    /// Left subtree, node, right subtree — ascending key order.
    InOrder,
    /// Node first, then children. Useful for structural inspection.
    PreOrder,
    /// Children first, then node.
    PostOrder,
}

/// Ascending iterator over the entries of a [`Boxwood`].
///
/// Walks the left spine with an explicit stack instead of recursing, so each
/// `next` call does O(1) amortized work.
pub struct BoxwoodSortedIterator<'a, T: Ord> {
    curr: Option<&'a BoxwoodNode<T>>,
    stack: Vec<&'a BoxwoodNode<T>>,
}

impl<'a, T: Ord> BoxwoodSortedIterator<'a, T> {
    pub(crate) fn new(tree: &'a Boxwood<T>) -> Self {
        Self {
            curr: tree.root.as_deref(),
            stack: Vec::new(),
        }
    }
}

impl<'a, T: Ord> Iterator for BoxwoodSortedIterator<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.curr {
            self.stack.push(node);
            self.curr = node.left.as_deref();
        }

        let node = self.stack.pop()?;
        self.curr = node.right.as_deref();

        Some(&node.entry)
    }
}

enum Step<'a, T> {
    Descend(&'a BoxwoodNode<T>),
    Emit(&'a T),
}

/// Iterator over the entries of a [`Boxwood`] in a caller-chosen
/// [`TraversalOrder`].
pub struct BoxwoodTraversal<'a, T: Ord> {
    order: TraversalOrder,
    stack: Vec<Step<'a, T>>,
}

impl<'a, T: Ord> BoxwoodTraversal<'a, T> {
    pub(crate) fn new(tree: &'a Boxwood<T>, order: TraversalOrder) -> Self {
        Self {
            order,
            stack: tree.root.as_deref().map(Step::Descend).into_iter().collect(),
        }
    }

    fn descend(&mut self, node: &'a BoxwoodNode<T>) -> Option<&'a T> {
        // children are pushed right-before-left so the left subtree pops
        // first; pending self-visits are pushed as `Emit` steps.
        match self.order {
            TraversalOrder::PreOrder => {
                self.push_child(&node.right);
                self.push_child(&node.left);
                return Some(&node.entry);
            }
            TraversalOrder::InOrder => {
                self.push_child(&node.right);
                self.stack.push(Step::Emit(&node.entry));
                self.push_child(&node.left);
            }
            TraversalOrder::PostOrder => {
                self.stack.push(Step::Emit(&node.entry));
                self.push_child(&node.right);
                self.push_child(&node.left);
            }
        }
        None
    }

    fn push_child(&mut self, link: &'a Option<Box<BoxwoodNode<T>>>) {
        if let Some(child) = link.as_deref() {
            self.stack.push(Step::Descend(child));
        }
    }
}

impl<'a, T: Ord> Iterator for BoxwoodTraversal<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(step) = self.stack.pop() {
            match step {
                Step::Emit(entry) => return Some(entry),
                Step::Descend(node) => {
                    if let Some(entry) = self.descend(node) {
                        return Some(entry);
                    }
                }
            }
        }

        None
    }
}
