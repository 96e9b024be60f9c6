use super::{AvlHandle, AvlTree};

/// In-order iterator over the values of an [`AvlTree`], driven by an
/// explicit stack of pending ancestors.
pub struct InOrder<'a, T> {
    tree: &'a AvlTree<T>,
    stack: Vec<AvlHandle>,
}

impl<'a, T: Ord + Clone> InOrder<'a, T> {
    pub(super) fn new(tree: &'a AvlTree<T>) -> Self {
        let mut iter = Self {
            tree,
            stack: Vec::with_capacity(tree.height()),
        };
        iter.push_left_spine(tree.root);
        iter
    }

    fn push_left_spine(&mut self, mut current: Option<AvlHandle>) {
        while let Some(handle) = current {
            self.stack.push(handle);
            current = self.tree.node(handle).left;
        }
    }
}

impl<'a, T: Ord + Clone> Iterator for InOrder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.stack.pop()?;
        let node = self.tree.node(handle);
        self.push_left_spine(node.right);
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.stack.len(), Some(self.tree.len()))
    }
}
