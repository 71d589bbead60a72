use alloc::{collections::VecDeque, vec::Vec};

use crate::{Key, NodeIndex, Tree};

/// Keys of a [`Tree`] in ascending order.
pub struct InOrder<'a> {
    pub(crate) tree: &'a Tree,
    pub(crate) curr: Option<NodeIndex>,
    pub(crate) stack: Vec<NodeIndex>,
}

impl Iterator for InOrder<'_> {
    type Item = Key;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(curr) = self.curr {
            self.stack.push(curr);
            self.curr = self.tree.node(curr).left;
        }

        let node = self.stack.pop()?;
        self.curr = self.tree.node(node).right;

        Some(self.tree.node(node).key)
    }
}

impl Tree {
    pub fn iter(&self) -> InOrder<'_> {
        InOrder {
            tree: self,
            curr: self.root(),
            stack: Vec::new(),
        }
    }

    /// Deepest tree [`Tree::level_order`] will lay out; a heap array for it holds at most
    /// `2^21 - 1` slots.
    pub const LEVEL_ORDER_MAX_HEIGHT: u32 = 20;

    /// Keys laid out by heap position (children of slot `i` at `2i + 1` and `2i + 2`), with
    /// `None` for empty positions. Trailing holes are trimmed.
    ///
    /// The array length grows with `2^height`, so trees taller than
    /// [`Tree::LEVEL_ORDER_MAX_HEIGHT`] yield `None`.
    pub fn level_order(&self) -> Option<Vec<Option<Key>>> {
        if self.height().unwrap_or(0) > Self::LEVEL_ORDER_MAX_HEIGHT {
            return None;
        }

        let mut slots = Vec::new();
        let mut queue = VecDeque::new();
        if let Some(root) = self.root() {
            queue.push_back((root, 0usize));
        }

        while let Some((idx, position)) = queue.pop_front() {
            if slots.len() <= position {
                slots.resize(position.checked_add(1)?, None);
            }
            let node = self.node(idx);
            slots[position] = Some(node.key);

            let first_child = position.checked_mul(2)?.checked_add(1)?;
            if let Some(left) = node.left {
                queue.push_back((left, first_child));
            }
            if let Some(right) = node.right {
                queue.push_back((right, first_child.checked_add(1)?));
            }
        }

        Some(slots)
    }
}

impl<'a> IntoIterator for &'a Tree {
    type Item = Key;
    type IntoIter = InOrder<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::{Tree, TreeKind};

    #[test]
    pub fn sorted_iteration() {
        let mut tree = Tree::new(TreeKind::RedBlack);
        for key in [5, 7, 9, 3, 1, 8] {
            tree.insert(key).unwrap();
        }

        let keys: Vec<u32> = (&tree).into_iter().collect();
        assert_eq!(keys, vec![1, 3, 5, 7, 8, 9]);
        assert_eq!(Tree::new(TreeKind::Bst).iter().next(), None);
    }

    #[test]
    pub fn level_order_keeps_holes() {
        let mut tree = Tree::new(TreeKind::Bst);
        for key in [5, 3, 8, 4] {
            tree.insert(key).unwrap();
        }

        assert_eq!(
            tree.level_order(),
            Some(vec![Some(5), Some(3), Some(8), None, Some(4)])
        );
        assert_eq!(Tree::new(TreeKind::Avl).level_order(), Some(vec![]));
    }

    #[test]
    pub fn level_order_refuses_deep_chain() {
        let mut tree = Tree::new(TreeKind::Bst);
        for key in 0..70 {
            tree.insert(key).unwrap();
        }
        assert_eq!(tree.level_order(), None);

        let mut shallow = Tree::new(TreeKind::Bst);
        for key in 0..=Tree::LEVEL_ORDER_MAX_HEIGHT {
            shallow.insert(key).unwrap();
        }
        let slots = shallow.level_order().unwrap();
        assert_eq!(slots.len(), (1 << (Tree::LEVEL_ORDER_MAX_HEIGHT + 1)) - 1);
        assert_eq!(slots.iter().flatten().count(), 21);
    }
}
