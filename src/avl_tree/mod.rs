//! A self-balancing binary search tree.
//!
//! Nodes live in an arena and refer to each other through [`AvlHandle`]s, so
//! the parent back-links never form ownership cycles.  Handles of deleted
//! nodes are recycled.
//!
//! Insertion and deletion restore balance with different tie-breaks: after an
//! insert the rotation is chosen by comparing the inserted value with the
//! heavy child's value, after a delete by the heavy child's own balance
//! factor.  Both keep `|height(left) - height(right)| <= 1` everywhere.

mod iter;

use std::{cmp::Ordering, fmt::Debug};

use derivative::Derivative;

use crate::tracing_support::trace;

pub use iter::InOrder;

/// A stable reference to a node of an [`AvlTree`].  Valid until the node is
/// deleted; a later insert may reuse it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AvlHandle(usize);

#[derive(Clone, Debug)]
struct AvlNode<T> {
    value: T,
    left: Option<AvlHandle>,
    right: Option<AvlHandle>,
    parent: Option<AvlHandle>,
    height: usize,
}

/// An ordered set with `O(log n)` insert, delete and search.  Duplicate
/// inserts and deletes of absent values are no-ops.
#[derive(Clone, Debug, Derivative)]
#[derivative(Default(bound = ""))]
pub struct AvlTree<T> {
    nodes: Vec<Option<AvlNode<T>>>,
    free: Vec<usize>,
    root: Option<AvlHandle>,
    len: usize,
}

impl<T: Ord + Clone> AvlTree<T> {
    /// Creates a new, empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the number of values in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Gets the height of the tree; 0 when empty.
    pub fn height(&self) -> usize {
        self.height_of(self.root)
    }

    /// Gets the root node, if any.
    pub fn root(&self) -> Option<AvlNodeRef<'_, T>> {
        self.root.map(|handle| self.node_ref(handle))
    }

    /// Gets a node by handle, or `None` if the handle no longer refers to a
    /// live node.
    pub fn get(&self, handle: AvlHandle) -> Option<AvlNodeRef<'_, T>> {
        self.nodes
            .get(handle.0)
            .and_then(Option::as_ref)
            .map(|_| self.node_ref(handle))
    }

    /// Removes every value.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Inserts a value.  Returns false, leaving the tree untouched, if the
    /// value is already present.
    pub fn insert(&mut self, value: T) -> bool {
        let (root, inserted) = self.insert_at(self.root, &value);
        self.root = Some(root);
        self.node_mut(root).parent = None;
        if inserted {
            self.len += 1;
        }
        inserted
    }

    /// Deletes a value.  Returns false if the value was not present.
    pub fn delete(&mut self, value: &T) -> bool {
        let (root, removed) = self.delete_at(self.root, value);
        self.root = root;
        if let Some(root) = root {
            self.node_mut(root).parent = None;
        }
        if removed {
            self.len -= 1;
        }
        removed
    }

    /// Finds the node holding `value`.
    pub fn search(&self, value: &T) -> Option<AvlNodeRef<'_, T>> {
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.node(handle);
            current = match value.cmp(&node.value) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(self.node_ref(handle)),
            };
        }
        None
    }

    pub fn contains(&self, value: &T) -> bool {
        self.search(value).is_some()
    }

    /// Gets the smallest value.
    pub fn min(&self) -> Option<&T> {
        self.root
            .map(|root| &self.node(self.min_handle(root)).value)
    }

    /// Gets the largest value.
    pub fn max(&self) -> Option<&T> {
        let mut current = self.root?;
        while let Some(right) = self.node(current).right {
            current = right;
        }
        Some(&self.node(current).value)
    }

    /// Iterates over the values in ascending order.
    pub fn in_order(&self) -> InOrder<'_, T> {
        InOrder::new(self)
    }

    /// Checks the structural invariants of the tree, returning a reason if
    /// one is violated: BST ordering, cached heights, balance factors within
    /// one, parent links, and the value count.
    pub fn check_consistency(&self) -> Result<(), &'static str> {
        if let Some(root) = self.root {
            if self.node(root).parent.is_some() {
                return Err("root has a parent");
            }
        }
        let count = self.check_subtree(self.root)?;
        if count != self.len {
            return Err("len does not match number of nodes");
        }
        let live = self.nodes.iter().filter(|slot| slot.is_some()).count();
        if live != self.len {
            return Err("arena holds unreachable nodes");
        }
        let mut values = self.in_order();
        if let Some(mut previous) = values.next() {
            for value in values {
                if previous >= value {
                    return Err("in-order traversal is not strictly increasing");
                }
                previous = value;
            }
        }
        Ok(())
    }

    fn check_subtree(&self, handle: Option<AvlHandle>) -> Result<usize, &'static str> {
        let Some(handle) = handle else {
            return Ok(0);
        };
        let node = self.node(handle);
        for child in [node.left, node.right].into_iter().flatten() {
            if self.node(child).parent != Some(handle) {
                return Err("child does not point back at its parent");
            }
        }
        let left_height = self.height_of(node.left);
        let right_height = self.height_of(node.right);
        if node.height != 1 + left_height.max(right_height) {
            return Err("cached height is stale");
        }
        if left_height.abs_diff(right_height) > 1 {
            return Err("node is out of balance");
        }
        Ok(1 + self.check_subtree(node.left)? + self.check_subtree(node.right)?)
    }

    // Arena

    fn node(&self, handle: AvlHandle) -> &AvlNode<T> {
        self.nodes[handle.0].as_ref().expect("AvlHandle is dangling")
    }

    fn node_mut(&mut self, handle: AvlHandle) -> &mut AvlNode<T> {
        self.nodes[handle.0].as_mut().expect("AvlHandle is dangling")
    }

    fn node_ref(&self, handle: AvlHandle) -> AvlNodeRef<'_, T> {
        AvlNodeRef { tree: self, handle }
    }

    fn allocate(&mut self, value: T) -> AvlHandle {
        let node = AvlNode {
            value,
            left: None,
            right: None,
            parent: None,
            height: 1,
        };
        match self.free.pop() {
            Some(index) => {
                self.nodes[index] = Some(node);
                AvlHandle(index)
            }
            None => {
                self.nodes.push(Some(node));
                AvlHandle(self.nodes.len() - 1)
            }
        }
    }

    fn release(&mut self, handle: AvlHandle) {
        self.nodes[handle.0] = None;
        self.free.push(handle.0);
    }

    // Balancing

    fn height_of(&self, handle: Option<AvlHandle>) -> usize {
        handle.map_or(0, |handle| self.node(handle).height)
    }

    fn balance_of(&self, handle: Option<AvlHandle>) -> isize {
        handle.map_or(0, |handle| {
            let node = self.node(handle);
            self.height_of(node.left) as isize - self.height_of(node.right) as isize
        })
    }

    fn update_height(&mut self, handle: AvlHandle) {
        let node = self.node(handle);
        let height = 1 + self.height_of(node.left).max(self.height_of(node.right));
        self.node_mut(handle).height = height;
    }

    /// Rotates `y` right, returning the new subtree root.  The caller links
    /// the result into `y`'s former parent slot.
    fn rotate_right(&mut self, y: AvlHandle) -> AvlHandle {
        trace!(node = ?y, "rotate right");
        let x = self.node(y).left.expect("right rotation needs a left child");
        let moved = self.node(x).right;
        let parent = self.node(y).parent;

        self.node_mut(x).right = Some(y);
        self.node_mut(y).left = moved;
        if let Some(moved) = moved {
            self.node_mut(moved).parent = Some(y);
        }
        self.node_mut(x).parent = parent;
        self.node_mut(y).parent = Some(x);

        self.update_height(y);
        self.update_height(x);
        x
    }

    /// Rotates `x` left, returning the new subtree root.
    fn rotate_left(&mut self, x: AvlHandle) -> AvlHandle {
        trace!(node = ?x, "rotate left");
        let y = self.node(x).right.expect("left rotation needs a right child");
        let moved = self.node(y).left;
        let parent = self.node(x).parent;

        self.node_mut(y).left = Some(x);
        self.node_mut(x).right = moved;
        if let Some(moved) = moved {
            self.node_mut(moved).parent = Some(x);
        }
        self.node_mut(y).parent = parent;
        self.node_mut(x).parent = Some(y);

        self.update_height(x);
        self.update_height(y);
        y
    }

    fn set_left(&mut self, handle: AvlHandle, child: Option<AvlHandle>) {
        self.node_mut(handle).left = child;
        if let Some(child) = child {
            self.node_mut(child).parent = Some(handle);
        }
    }

    fn set_right(&mut self, handle: AvlHandle, child: Option<AvlHandle>) {
        self.node_mut(handle).right = child;
        if let Some(child) = child {
            self.node_mut(child).parent = Some(handle);
        }
    }

    // Insert

    fn insert_at(&mut self, handle: Option<AvlHandle>, value: &T) -> (AvlHandle, bool) {
        let Some(handle) = handle else {
            return (self.allocate(value.clone()), true);
        };
        let node = self.node(handle);
        let (left, right) = (node.left, node.right);
        let ordering = value.cmp(&node.value);
        match ordering {
            Ordering::Less => {
                let (child, inserted) = self.insert_at(left, value);
                self.set_left(handle, Some(child));
                if !inserted {
                    return (handle, false);
                }
            }
            Ordering::Greater => {
                let (child, inserted) = self.insert_at(right, value);
                self.set_right(handle, Some(child));
                if !inserted {
                    return (handle, false);
                }
            }
            Ordering::Equal => return (handle, false),
        }

        self.update_height(handle);
        (self.rebalance_after_insert(handle, value), true)
    }

    fn rebalance_after_insert(&mut self, handle: AvlHandle, value: &T) -> AvlHandle {
        let balance = self.balance_of(Some(handle));
        if balance > 1 {
            let left = self.node(handle).left.expect("left-heavy node has a left child");
            let ordering = value.cmp(&self.node(left).value);
            match ordering {
                // Left Left
                Ordering::Less => return self.rotate_right(handle),
                // Left Right
                Ordering::Greater => {
                    let left = self.rotate_left(left);
                    self.set_left(handle, Some(left));
                    return self.rotate_right(handle);
                }
                Ordering::Equal => {}
            }
        } else if balance < -1 {
            let right = self.node(handle).right.expect("right-heavy node has a right child");
            let ordering = value.cmp(&self.node(right).value);
            match ordering {
                // Right Right
                Ordering::Greater => return self.rotate_left(handle),
                // Right Left
                Ordering::Less => {
                    let right = self.rotate_right(right);
                    self.set_right(handle, Some(right));
                    return self.rotate_left(handle);
                }
                Ordering::Equal => {}
            }
        }
        handle
    }

    // Delete

    fn delete_at(&mut self, handle: Option<AvlHandle>, value: &T) -> (Option<AvlHandle>, bool) {
        let Some(handle) = handle else {
            return (None, false);
        };
        let node = self.node(handle);
        let (left, right, parent) = (node.left, node.right, node.parent);
        let ordering = value.cmp(&node.value);
        match ordering {
            Ordering::Less => {
                let (child, removed) = self.delete_at(left, value);
                self.set_left(handle, child);
                if !removed {
                    return (Some(handle), false);
                }
            }
            Ordering::Greater => {
                let (child, removed) = self.delete_at(right, value);
                self.set_right(handle, child);
                if !removed {
                    return (Some(handle), false);
                }
            }
            Ordering::Equal => match (left, right) {
                (Some(_), Some(right)) => {
                    let successor = self.min_handle(right);
                    let successor_value = self.node(successor).value.clone();
                    let (child, _) = self.delete_at(Some(right), &successor_value);
                    self.set_right(handle, child);
                    self.node_mut(handle).value = successor_value;
                }
                (only, None) | (None, only) => {
                    if let Some(child) = only {
                        self.node_mut(child).parent = parent;
                    }
                    self.release(handle);
                    return (only, true);
                }
            },
        }

        self.update_height(handle);
        (Some(self.rebalance_after_delete(handle)), true)
    }

    fn rebalance_after_delete(&mut self, handle: AvlHandle) -> AvlHandle {
        let node = self.node(handle);
        let (left, right) = (node.left, node.right);
        let balance = self.balance_of(Some(handle));
        if balance > 1 {
            let left = left.expect("left-heavy node has a left child");
            if self.balance_of(Some(left)) >= 0 {
                // Left Left
                return self.rotate_right(handle);
            }
            // Left Right
            let left = self.rotate_left(left);
            self.set_left(handle, Some(left));
            return self.rotate_right(handle);
        }
        if balance < -1 {
            let right = right.expect("right-heavy node has a right child");
            if self.balance_of(Some(right)) <= 0 {
                // Right Right
                return self.rotate_left(handle);
            }
            // Right Left
            let right = self.rotate_right(right);
            self.set_right(handle, Some(right));
            return self.rotate_left(handle);
        }
        handle
    }

    fn min_handle(&self, mut handle: AvlHandle) -> AvlHandle {
        while let Some(left) = self.node(handle).left {
            handle = left;
        }
        handle
    }
}

/// A read-only view of one node of an [`AvlTree`].
#[derive(Derivative)]
#[derivative(Clone(bound = ""), Copy(bound = ""))]
pub struct AvlNodeRef<'a, T> {
    tree: &'a AvlTree<T>,
    handle: AvlHandle,
}

impl<'a, T: Ord + Clone> AvlNodeRef<'a, T> {
    pub fn handle(&self) -> AvlHandle {
        self.handle
    }

    pub fn value(&self) -> &'a T {
        &self.tree.node(self.handle).value
    }

    /// Height of the subtree rooted at this node; a leaf has height 1.
    pub fn height(&self) -> usize {
        self.tree.node(self.handle).height
    }

    /// `height(left) - height(right)`.
    pub fn balance(&self) -> isize {
        self.tree.balance_of(Some(self.handle))
    }

    pub fn left(&self) -> Option<AvlNodeRef<'a, T>> {
        self.tree
            .node(self.handle)
            .left
            .map(|handle| self.tree.node_ref(handle))
    }

    pub fn right(&self) -> Option<AvlNodeRef<'a, T>> {
        self.tree
            .node(self.handle)
            .right
            .map(|handle| self.tree.node_ref(handle))
    }

    pub fn parent(&self) -> Option<AvlNodeRef<'a, T>> {
        self.tree
            .node(self.handle)
            .parent
            .map(|handle| self.tree.node_ref(handle))
    }
}

impl<'a, T> Debug for AvlNodeRef<'a, T>
where
    T: Ord + Clone + Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AvlNodeRef")
            .field("value", self.value())
            .field("height", &self.height())
            .finish()
    }
}
