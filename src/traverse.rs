//! Read-only walks shared by every tree kind.

use core::cmp::Ordering;

use crate::{Key, NodeIndex, Tree};

pub(crate) fn search(tree: &Tree, from: Option<NodeIndex>, key: Key) -> Option<NodeIndex> {
    let mut current_node = from;

    while let Some(idx) = current_node {
        let node = tree.node(idx);

        match key.cmp(&node.key) {
            Ordering::Less => current_node = node.left,
            Ordering::Equal => return Some(idx),
            Ordering::Greater => current_node = node.right,
        }
    }

    None
}

pub(crate) fn minimum(tree: &Tree, from: Option<NodeIndex>) -> Option<NodeIndex> {
    let mut current_node = from?;

    while let Some(left) = tree.node(current_node).left {
        current_node = left;
    }

    Some(current_node)
}

pub(crate) fn maximum(tree: &Tree, from: Option<NodeIndex>) -> Option<NodeIndex> {
    let mut current_node = from?;

    while let Some(right) = tree.node(current_node).right {
        current_node = right;
    }

    Some(current_node)
}

/// In-order successor, `None` for the maximum.
pub(crate) fn successor(tree: &Tree, idx: NodeIndex) -> Option<NodeIndex> {
    if let Some(right) = tree.node(idx).right {
        return minimum(tree, Some(right));
    }

    let mut current_node = idx;
    let mut parent = tree.node(idx).parent;
    while let Some(parent_idx) = parent {
        if tree.node(parent_idx).right != Some(current_node) {
            break;
        }
        current_node = parent_idx;
        parent = tree.node(parent_idx).parent;
    }

    parent
}

/// In-order predecessor, `None` for the minimum.
pub(crate) fn predecessor(tree: &Tree, idx: NodeIndex) -> Option<NodeIndex> {
    if let Some(left) = tree.node(idx).left {
        return maximum(tree, Some(left));
    }

    let mut current_node = idx;
    let mut parent = tree.node(idx).parent;
    while let Some(parent_idx) = parent {
        if tree.node(parent_idx).left != Some(current_node) {
            break;
        }
        current_node = parent_idx;
        parent = tree.node(parent_idx).parent;
    }

    parent
}

#[cfg(test)]
mod tests {
    use crate::{Tree, TreeKind};

    fn sample() -> Tree {
        let mut tree = Tree::new(TreeKind::Bst);
        for key in [8, 3, 10, 1, 6, 14, 4, 7, 13] {
            tree.insert(key).unwrap();
        }
        tree
    }

    #[test]
    pub fn search_finds_present_keys_only() {
        let tree = sample();

        let six = tree.search(6).unwrap();
        assert_eq!(tree.get(six).unwrap().key(), 6);
        assert_eq!(tree.search(5), None);
        assert_eq!(Tree::new(TreeKind::Avl).search(5), None);
    }

    #[test]
    pub fn extremes() {
        let tree = sample();

        assert_eq!(tree.get(tree.minimum().unwrap()).unwrap().key(), 1);
        assert_eq!(tree.get(tree.maximum().unwrap()).unwrap().key(), 14);
        assert_eq!(Tree::new(TreeKind::Bst).minimum(), None);
    }

    #[test]
    pub fn successor_walks_up_through_right_children() {
        let tree = sample();

        let seven = tree.search(7).unwrap();
        assert_eq!(tree.get(tree.successor(seven).unwrap()).unwrap().key(), 8);

        let fourteen = tree.search(14).unwrap();
        assert_eq!(tree.successor(fourteen), None);

        let mut keys = Vec::new();
        let mut cursor = tree.minimum();
        while let Some(idx) = cursor {
            keys.push(tree.get(idx).unwrap().key());
            cursor = tree.successor(idx);
        }
        assert_eq!(keys, vec![1, 3, 4, 6, 7, 8, 10, 13, 14]);
    }

    #[test]
    pub fn predecessor_mirrors_successor() {
        let tree = sample();

        let four = tree.search(4).unwrap();
        assert_eq!(tree.get(tree.predecessor(four).unwrap()).unwrap().key(), 3);

        let one = tree.search(1).unwrap();
        assert_eq!(tree.predecessor(one), None);
    }
}
