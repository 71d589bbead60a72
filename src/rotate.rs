use log::trace;

use crate::{
    NodeIndex, Tree,
    node::Side,
    strategy::Correction,
};

/// Moves `center` down towards `direction`, lifting its child on the opposite side into its
/// place. Returns the lifted node, or `None` if that child is absent.
pub(crate) fn rotate(
    tree: &mut Tree,
    center: NodeIndex,
    direction: Side,
    hook: &dyn Correction,
) -> Option<NodeIndex> {
    let lifted_idx = tree.node(center).child(direction.opposite())?;
    let grandparent_idx = tree.node(center).parent;

    let inner_idx = tree.node(lifted_idx).child(direction);
    *tree.node_mut(center).child_mut(direction.opposite()) = inner_idx;
    if let Some(inner_idx) = inner_idx {
        tree.node_mut(inner_idx).parent = Some(center);
    }

    tree.replace_child(grandparent_idx, center, Some(lifted_idx));
    tree.node_mut(lifted_idx).parent = grandparent_idx;

    *tree.node_mut(lifted_idx).child_mut(direction) = Some(center);
    tree.node_mut(center).parent = Some(lifted_idx);

    hook.after_rotation(tree, center, lifted_idx);
    trace!(
        "rotate {direction:?} at {} lifts {}",
        tree.node(center).key,
        tree.node(lifted_idx).key
    );

    Some(lifted_idx)
}

pub(crate) fn rotate_left(
    tree: &mut Tree,
    center: NodeIndex,
    hook: &dyn Correction,
) -> Option<NodeIndex> {
    rotate(tree, center, Side::Left, hook)
}

pub(crate) fn rotate_right(
    tree: &mut Tree,
    center: NodeIndex,
    hook: &dyn Correction,
) -> Option<NodeIndex> {
    rotate(tree, center, Side::Right, hook)
}
