//! Insertion and deletion skeletons shared by every tree kind.

use crate::{
    Key, NodeIndex, Tree,
    node::{Node, Side},
    strategy::{Correction, Splice},
    traverse,
};

/// Descends to the leaf position for `key` (equal keys go right), attaches a fresh node there and
/// hands it to the correction hook.
pub(crate) fn insert(tree: &mut Tree, key: Key, hook: &dyn Correction) -> NodeIndex {
    let mut current_node = tree.root();
    let mut parent_node = None;
    let mut side = Side::Left;

    while let Some(idx) = current_node {
        parent_node = Some(idx);
        let node = tree.node(idx);

        if key < node.key {
            side = Side::Left;
            current_node = node.left;
        } else {
            side = Side::Right;
            current_node = node.right;
        }
    }

    let inserted = tree.attach(
        parent_node,
        side,
        Node::new_isolated(key, hook.initial_payload()),
    );
    hook.after_insert(tree, inserted);

    inserted
}

/// Removes the node at `target` and returns the key it held.
///
/// A target with two children keeps its slot: it takes its successor's key and the successor,
/// which has at most one child, is spliced out instead.
pub(crate) fn delete(tree: &mut Tree, target: NodeIndex, hook: &dyn Correction) -> Key {
    let removed_key = tree.node(target).key;

    let spliced = match (tree.node(target).left, tree.node(target).right) {
        (Some(_), Some(right)) => traverse::minimum(tree, Some(right)).unwrap_or(target),
        _ => target,
    };

    let child = tree.node(spliced).left.or(tree.node(spliced).right);
    let parent = tree.node(spliced).parent;
    if let Some(child) = child {
        tree.node_mut(child).parent = parent;
    }
    let side = tree.replace_child(parent, spliced, child);

    if spliced != target {
        let successor_key = tree.node(spliced).key;
        tree.node_mut(target).key = successor_key;
    }

    let removed = tree.release(spliced);
    hook.after_delete(
        tree,
        Splice {
            child,
            parent,
            side,
            removed: removed.payload,
        },
    );

    removed_key
}
