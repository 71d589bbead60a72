use log::trace;

use crate::{
    NodeIndex, Tree,
    node::Payload,
    rotate::{rotate_left, rotate_right},
    strategy::{Correction, Splice},
};

/// Height-balance correction, shared by insertion and deletion.
pub(crate) struct AvlCorrection;

impl Correction for AvlCorrection {
    fn initial_payload(&self) -> Payload {
        Payload::Height(0)
    }

    fn after_rotation(&self, tree: &mut Tree, lowered: NodeIndex, lifted: NodeIndex) {
        update_height(tree, lowered);
        update_height(tree, lifted);
    }

    fn after_insert(&self, tree: &mut Tree, inserted: NodeIndex) {
        let node = tree.node(inserted);
        let anchor = match (node.left, node.right) {
            (Some(only), None) | (None, Some(only)) => only,
            _ => inserted,
        };

        let start = tree.node(anchor).parent;
        retrace(tree, start);
    }

    fn after_delete(&self, tree: &mut Tree, splice: Splice) {
        retrace(tree, splice.parent);
    }
}

/// Walks from `start` to the root refreshing heights and rotating wherever the balance factor
/// reached ±2. The walk always runs to the root, also after a rotation.
fn retrace(tree: &mut Tree, start: Option<NodeIndex>) {
    let mut current_node = start;

    while let Some(idx) = current_node {
        update_height(tree, idx);
        let node = tree.node(idx);

        let subtree_root = match (balance(tree, idx), node.left, node.right) {
            (-2, Some(heavy), _) => {
                if balance(tree, heavy) == 1 {
                    trace!("avl left-right case at {}", node.key);
                    rotate_left(tree, heavy, &AvlCorrection);
                }
                rotate_right(tree, idx, &AvlCorrection).unwrap_or(idx)
            }
            (2, _, Some(heavy)) => {
                if balance(tree, heavy) == -1 {
                    trace!("avl right-left case at {}", node.key);
                    rotate_right(tree, heavy, &AvlCorrection);
                }
                rotate_left(tree, idx, &AvlCorrection).unwrap_or(idx)
            }
            _ => idx,
        };

        current_node = tree.node(subtree_root).parent;
    }
}

/// Height contributed by an optional child: one more than its own height, zero when absent.
fn child_height(tree: &Tree, child: Option<NodeIndex>) -> i64 {
    child.map_or(0, |idx| i64::from(stored_height(tree, idx)) + 1)
}

fn stored_height(tree: &Tree, idx: NodeIndex) -> u32 {
    tree.node(idx).height().unwrap_or(0)
}

pub(crate) fn update_height(tree: &mut Tree, idx: NodeIndex) {
    let node = tree.node(idx);
    let height = child_height(tree, node.left).max(child_height(tree, node.right));

    tree.node_mut(idx).payload = Payload::Height(u32::try_from(height).unwrap_or(u32::MAX));
}

/// Right height minus left height.
pub(crate) fn balance(tree: &Tree, idx: NodeIndex) -> i64 {
    let node = tree.node(idx);
    child_height(tree, node.right) - child_height(tree, node.left)
}
