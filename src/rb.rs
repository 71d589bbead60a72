use log::trace;

use crate::{
    NodeIndex, Tree,
    node::{Node, NodeColor, Payload, Side},
    rotate::rotate,
    strategy::{Correction, Splice},
};

/// Recolor-and-rotate corrections keeping the Red-Black invariants.
pub(crate) struct RedBlackCorrection;

impl Correction for RedBlackCorrection {
    fn initial_payload(&self) -> Payload {
        Payload::Color(NodeColor::Red)
    }

    fn after_insert(&self, tree: &mut Tree, inserted: NodeIndex) {
        fix_red_violation(tree, inserted);
    }

    fn after_delete(&self, tree: &mut Tree, splice: Splice) {
        if splice.removed != Payload::Color(NodeColor::Black) {
            return;
        }

        fix_double_black(tree, splice);
    }
}

fn is_red(tree: &Tree, idx: Option<NodeIndex>) -> bool {
    idx.is_some_and(|idx| tree.node(idx).is_red())
}

fn paint(tree: &mut Tree, idx: NodeIndex, color: NodeColor) {
    tree.node_mut(idx).set_color(color);
}

fn color_of(tree: &Tree, idx: NodeIndex) -> NodeColor {
    tree.node(idx).color().unwrap_or(NodeColor::Black)
}

fn fix_red_violation(tree: &mut Tree, start_node_idx: NodeIndex) {
    let mut curr_node = start_node_idx;

    while let Some(parent_idx) = tree.node(curr_node).parent {
        if !tree.node(curr_node).is_red() || !tree.node(parent_idx).is_red() {
            break;
        }

        let Some(grandparent_idx) = tree.node(parent_idx).parent else {
            break;
        };
        let parent_side = tree.side_of(parent_idx).unwrap_or(Side::Left);
        let uncle = tree.node(grandparent_idx).child(parent_side.opposite());

        if let Some(uncle_idx) = uncle.filter(|&u| tree.node(u).is_red()) {
            trace!("rb insert: red uncle {}", tree.node(uncle_idx).key);
            paint(tree, parent_idx, NodeColor::Black);
            paint(tree, uncle_idx, NodeColor::Black);
            paint(tree, grandparent_idx, NodeColor::Red);

            curr_node = grandparent_idx;
            continue;
        }

        if tree.side_of(curr_node) != Some(parent_side) {
            trace!("rb insert: triangle at {}", tree.node(curr_node).key);
            rotate(tree, parent_idx, parent_side, &RedBlackCorrection);

            curr_node = parent_idx;
            continue;
        }

        trace!("rb insert: line at {}", tree.node(curr_node).key);
        paint(tree, parent_idx, NodeColor::Black);
        paint(tree, grandparent_idx, NodeColor::Red);
        rotate(
            tree,
            grandparent_idx,
            parent_side.opposite(),
            &RedBlackCorrection,
        );
        break;
    }

    if let Some(root) = tree.root() {
        paint(tree, root, NodeColor::Black);
    }
}

/// Restores black-height after a black node was spliced out.
///
/// When the removed node left no child behind, a black placeholder leaf is hung in its former
/// slot so the loop has a concrete node to start from; it is detached again before returning.
fn fix_double_black(tree: &mut Tree, splice: Splice) {
    let (mut x, sentinel) = match (splice.child, splice.parent) {
        (Some(child), _) => (child, None),
        (None, Some(parent)) => {
            let placeholder = Node::new_isolated(
                tree.node(parent).key,
                Payload::Color(NodeColor::Black),
            );
            let idx = tree.attach(
                Some(parent),
                splice.side.unwrap_or(Side::Left),
                placeholder,
            );
            (idx, Some(idx))
        }
        (None, None) => return,
    };

    while Some(x) != tree.root() && !tree.node(x).is_red() {
        let Some(parent) = tree.node(x).parent else {
            break;
        };
        let side = if tree.node(parent).left == Some(x) {
            Side::Left
        } else {
            Side::Right
        };
        let Some(mut sibling) = tree.node(parent).child(side.opposite()) else {
            break;
        };

        if tree.node(sibling).is_red() {
            trace!("rb delete: red sibling {}", tree.node(sibling).key);
            paint(tree, sibling, NodeColor::Black);
            paint(tree, parent, NodeColor::Red);
            rotate(tree, parent, side, &RedBlackCorrection);

            let Some(next) = tree.node(parent).child(side.opposite()) else {
                break;
            };
            sibling = next;
        }

        let near = tree.node(sibling).child(side);
        let far = tree.node(sibling).child(side.opposite());

        if !is_red(tree, near) && !is_red(tree, far) {
            trace!("rb delete: black sibling {} with black children", tree.node(sibling).key);
            paint(tree, sibling, NodeColor::Red);
            x = parent;
            continue;
        }

        if !is_red(tree, far) {
            trace!("rb delete: red near nephew under {}", tree.node(sibling).key);
            if let Some(near) = near {
                paint(tree, near, NodeColor::Black);
            }
            paint(tree, sibling, NodeColor::Red);
            rotate(tree, sibling, side.opposite(), &RedBlackCorrection);

            let Some(next) = tree.node(parent).child(side.opposite()) else {
                break;
            };
            sibling = next;
        }

        trace!("rb delete: red far nephew under {}", tree.node(sibling).key);
        let parent_color = color_of(tree, parent);
        paint(tree, sibling, parent_color);
        paint(tree, parent, NodeColor::Black);
        if let Some(far) = tree.node(sibling).child(side.opposite()) {
            paint(tree, far, NodeColor::Black);
        }
        rotate(tree, parent, side, &RedBlackCorrection);
        break;
    }

    if Some(x) != sentinel {
        paint(tree, x, NodeColor::Black);
    }
    if let Some(placeholder) = sentinel {
        let parent = tree.node(placeholder).parent;
        tree.replace_child(parent, placeholder, None);
        tree.release(placeholder);
    }

    // the far-nephew case may lift a node into the root slot
    if let Some(root) = tree.root() {
        paint(tree, root, NodeColor::Black);
    }
}

#[cfg(test)]
mod tests {
    use crate::{NodeColor, Tree, TreeKind};

    fn describe(tree: &Tree, key: u32) -> (Option<u32>, Option<u32>, Option<NodeColor>) {
        let node = tree.get(tree.search(key).unwrap()).unwrap();
        let key_of = |idx: Option<crate::NodeIndex>| idx.map(|i| tree.get(i).unwrap().key());
        (key_of(node.left()), key_of(node.right()), node.color())
    }

    #[test]
    pub fn fresh_root_is_black() {
        let mut tree = Tree::new(TreeKind::RedBlack);
        let root = tree.insert(5).unwrap();

        assert_eq!(tree.get(root).unwrap().color(), Some(NodeColor::Black));
    }

    #[test]
    pub fn red_uncle_recolors() {
        let mut tree = Tree::new(TreeKind::RedBlack);
        for key in [5, 3, 7, 1] {
            tree.insert(key).unwrap();
        }

        assert_eq!(describe(&tree, 5), (Some(3), Some(7), Some(NodeColor::Black)));
        assert_eq!(describe(&tree, 3).2, Some(NodeColor::Black));
        assert_eq!(describe(&tree, 7).2, Some(NodeColor::Black));
        assert_eq!(describe(&tree, 1).2, Some(NodeColor::Red));
    }

    #[test]
    pub fn triangle_then_line() {
        let mut tree = Tree::new(TreeKind::RedBlack);
        for key in [8, 5, 6] {
            tree.insert(key).unwrap();
        }

        assert_eq!(describe(&tree, 6), (Some(5), Some(8), Some(NodeColor::Black)));
        assert_eq!(describe(&tree, 5).2, Some(NodeColor::Red));
        assert_eq!(describe(&tree, 8).2, Some(NodeColor::Red));
    }

    #[test]
    pub fn insertion_sequence_fixture() {
        let mut tree = Tree::new(TreeKind::RedBlack);
        for key in [8, 5, 6, 3, 4, 20, 10, 20, 30, 16] {
            tree.insert(key).unwrap();
            assert!(tree.is_well_formed(), "after inserting {key}:\n{tree}");
        }

        let root = tree.get(tree.root().unwrap()).unwrap();
        assert_eq!(root.key(), 10);
        assert_eq!(root.color(), Some(NodeColor::Black));
        assert_eq!(describe(&tree, 6), (Some(4), Some(8), Some(NodeColor::Red)));
        assert_eq!(describe(&tree, 4), (Some(3), Some(5), Some(NodeColor::Black)));
        assert_eq!(describe(&tree, 8), (None, None, Some(NodeColor::Black)));

        let right = tree.get(root.right().unwrap()).unwrap();
        assert_eq!(right.key(), 20);
        assert_eq!(right.color(), Some(NodeColor::Red));
        let right_left = tree.get(right.left().unwrap()).unwrap();
        assert_eq!(right_left.key(), 20);
        assert_eq!(right_left.color(), Some(NodeColor::Black));
        assert_eq!(describe(&tree, 30), (None, None, Some(NodeColor::Black)));
        assert_eq!(describe(&tree, 16), (None, None, Some(NodeColor::Red)));
    }

    #[test]
    pub fn black_leaf_removal_uses_placeholder() {
        let mut tree = Tree::new(TreeKind::RedBlack);
        for key in [10, 5, 15, 20] {
            tree.insert(key).unwrap();
        }
        // 5 is a black leaf whose sibling 15 has a red far child
        assert_eq!(tree.delete(5), Some(5));

        assert_eq!(tree.len(), 3);
        assert_eq!(describe(&tree, 15), (Some(10), Some(20), Some(NodeColor::Black)));
        assert_eq!(describe(&tree, 10).2, Some(NodeColor::Black));
        assert_eq!(describe(&tree, 20).2, Some(NodeColor::Black));
        assert!(tree.is_well_formed());
    }

    #[test]
    pub fn red_leaf_removal_needs_no_fixup() {
        let mut tree = Tree::new(TreeKind::RedBlack);
        for key in [10, 5, 15, 20] {
            tree.insert(key).unwrap();
        }
        tree.delete(20);

        assert_eq!(describe(&tree, 10), (Some(5), Some(15), Some(NodeColor::Black)));
        assert!(tree.is_well_formed());
    }

    #[test]
    pub fn black_leaf_under_red_parent() {
        let mut tree = Tree::new(TreeKind::RedBlack);
        for key in [10, 5, 20, 15, 25, 30] {
            tree.insert(key).unwrap();
        }
        tree.delete(30);
        assert_eq!(describe(&tree, 20), (Some(15), Some(25), Some(NodeColor::Red)));

        // 15 is a black leaf whose sibling 25 has no red children
        assert_eq!(tree.delete(15), Some(15));

        assert_eq!(describe(&tree, 20), (None, Some(25), Some(NodeColor::Black)));
        assert_eq!(describe(&tree, 25), (None, None, Some(NodeColor::Red)));
        assert_eq!(tree.len(), 4);
        assert!(tree.is_well_formed(), "{tree}");
    }

    #[test]
    pub fn drain_keeps_invariants() {
        let mut tree = Tree::new(TreeKind::RedBlack);
        for key in 0..64 {
            tree.insert(key).unwrap();
        }
        for key in (0..64).rev().step_by(3).chain(0..64) {
            tree.delete(key);
            assert!(tree.is_well_formed(), "after deleting {key}:\n{tree}");
        }

        assert!(tree.is_empty());
    }
}
