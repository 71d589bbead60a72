//! Structural checks for each tree kind.
//!
//! Heights and black-heights are re-derived bottom-up from the shape alone; nothing cached in the
//! nodes is trusted except where the check is precisely that the cache is correct.

use alloc::vec::Vec;

use crate::{
    Key, NodeIndex, Tree, TreeKind,
    error::Violation,
    node::{NodeColor, Payload},
};

#[derive(Debug, Clone, Copy, Default)]
struct Derived {
    height: u32,
    black_height: u32,
}

/// Checks `tree` against the invariants of its kind, returning the first violation found.
///
/// Every kind is checked for consistent parent links, non-decreasing in-order keys and payloads
/// matching the kind. AVL trees must additionally carry correct heights and balance factors in
/// `-1..=1`; Red-Black trees need a black root, red nodes with either no children or two black
/// ones, and equal black-height on both sides of every node.
pub fn check(tree: &Tree) -> Result<(), Violation> {
    let Some(root) = tree.root() else {
        return Ok(());
    };

    let root_node = tree.node(root);
    if root_node.parent.is_some() {
        return Err(Violation::RootHasParent { key: root_node.key });
    }
    if tree.kind() == TreeKind::RedBlack && root_node.is_red() {
        return Err(Violation::RedRoot { key: root_node.key });
    }

    check_order(tree)?;

    let preorder = collect_preorder(tree, root)?;
    let slots = preorder.iter().map(|idx| idx.0 + 1).max().unwrap_or(0);
    let mut derived = alloc::vec![Derived::default(); slots];

    for &idx in preorder.iter().rev() {
        let node = tree.node(idx);
        let left = node.left.map(|c| derived[c.0]);
        let right = node.right.map(|c| derived[c.0]);

        let branch_height = |d: Option<Derived>| d.map_or(0, |d| d.height + 1);
        let height = branch_height(left).max(branch_height(right));
        let left_black = left.map_or(1, |d| d.black_height);
        let right_black = right.map_or(1, |d| d.black_height);

        match (tree.kind(), node.payload) {
            (TreeKind::Bst, Payload::Plain) => {}
            (TreeKind::Avl, Payload::Height(stored)) => {
                if stored != height {
                    return Err(Violation::StaleHeight {
                        key: node.key,
                        stored,
                        actual: height,
                    });
                }
                let balance = i64::from(branch_height(right)) - i64::from(branch_height(left));
                if !(-1..=1).contains(&balance) {
                    return Err(Violation::Unbalanced {
                        key: node.key,
                        balance,
                    });
                }
            }
            (TreeKind::RedBlack, Payload::Color(color)) => {
                if color == NodeColor::Red && !red_children_ok(tree, node.left, node.right) {
                    return Err(Violation::RedChildren { key: node.key });
                }
                if left_black != right_black {
                    return Err(Violation::BlackHeight {
                        key: node.key,
                        left: left_black,
                        right: right_black,
                    });
                }
            }
            _ => return Err(Violation::PayloadMismatch { key: node.key }),
        }

        let own_black = u32::from(node.color() == Some(NodeColor::Black));
        derived[idx.0] = Derived {
            height,
            black_height: left_black + own_black,
        };
    }

    Ok(())
}

/// Both children absent, or both present and black.
fn red_children_ok(tree: &Tree, left: Option<NodeIndex>, right: Option<NodeIndex>) -> bool {
    match (left, right) {
        (None, None) => true,
        (Some(l), Some(r)) => !tree.node(l).is_red() && !tree.node(r).is_red(),
        _ => false,
    }
}

fn check_order(tree: &Tree) -> Result<(), Violation> {
    let mut previous: Option<Key> = None;

    for key in tree.iter() {
        if let Some(previous) = previous.filter(|&p| p > key) {
            return Err(Violation::OutOfOrder { previous, key });
        }
        previous = Some(key);
    }

    Ok(())
}

/// Pre-order walk that also verifies every child points back at its parent.
fn collect_preorder(tree: &Tree, root: NodeIndex) -> Result<Vec<NodeIndex>, Violation> {
    let mut order = Vec::with_capacity(tree.len());
    let mut stack = alloc::vec![root];

    while let Some(idx) = stack.pop() {
        order.push(idx);
        let node = tree.node(idx);

        for child in [node.right, node.left].into_iter().flatten() {
            if tree.node(child).parent != Some(idx) {
                return Err(Violation::BrokenParentLink {
                    parent: node.key,
                    child: tree.node(child).key,
                });
            }
            stack.push(child);
        }
    }

    Ok(order)
}

impl Tree {
    pub fn is_well_formed(&self) -> bool {
        check(self).is_ok()
    }

    /// Re-derives every AVL height from the shape of the tree. No-op for other kinds.
    pub fn recompute_heights(&mut self) {
        if self.kind() != TreeKind::Avl {
            return;
        }
        let Some(root) = self.root() else {
            return;
        };

        let mut preorder = Vec::with_capacity(self.len());
        let mut stack = alloc::vec![root];
        while let Some(idx) = stack.pop() {
            preorder.push(idx);
            let node = self.node(idx);
            stack.extend(node.left.into_iter().chain(node.right));
        }

        for &idx in preorder.iter().rev() {
            crate::avl::update_height(self, idx);
        }
    }
}
