//! Per-variant hooks plugged into the shared insert, delete and rotate routines.

use crate::{
    Key, NodeIndex, Tree, TreeKind,
    avl::AvlCorrection,
    error::{Error, Result},
    node::{Payload, Side},
    rb::RedBlackCorrection,
};

/// What the generic delete left behind after splicing a node out.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Splice {
    /// Node moved into the vacated position, if the removed node had a child.
    pub child: Option<NodeIndex>,
    /// Former parent of the removed node, now parent of `child`.
    pub parent: Option<NodeIndex>,
    /// Slot of `parent` the removed node occupied; `None` when it was the root.
    pub side: Option<Side>,
    /// Payload of the node that was physically removed.
    pub removed: Payload,
}

pub(crate) trait Correction {
    fn initial_payload(&self) -> Payload;

    /// Runs after `lowered` has been rotated under `lifted`.
    fn after_rotation(&self, _tree: &mut Tree, _lowered: NodeIndex, _lifted: NodeIndex) {}

    fn after_insert(&self, tree: &mut Tree, inserted: NodeIndex);

    fn after_delete(&self, tree: &mut Tree, splice: Splice);
}

struct NoCorrection;

impl Correction for NoCorrection {
    fn initial_payload(&self) -> Payload {
        Payload::Plain
    }

    fn after_insert(&self, _tree: &mut Tree, _inserted: NodeIndex) {}

    fn after_delete(&self, _tree: &mut Tree, _splice: Splice) {}
}

pub(crate) fn correction_for(kind: TreeKind) -> &'static dyn Correction {
    match kind {
        TreeKind::Bst => &NoCorrection,
        TreeKind::Avl => &AvlCorrection,
        TreeKind::RedBlack => &RedBlackCorrection,
    }
}

/// Variant-specific entry points.
///
/// [`Tree::insert`] and [`Tree::delete`] already pick the right behaviour from the tree's kind;
/// a strategy additionally refuses trees of any other kind.
pub trait Strategy {
    fn kind(&self) -> TreeKind;

    fn insert_node(&self, tree: &mut Tree, key: Key) -> Result<NodeIndex> {
        self.expect_kind(tree)?;
        tree.insert(key)
    }

    fn delete_node(&self, tree: &mut Tree, key: Key) -> Result<Option<Key>> {
        self.expect_kind(tree)?;
        Ok(tree.delete(key))
    }

    fn expect_kind(&self, tree: &Tree) -> Result<()> {
        if tree.kind() == self.kind() {
            Ok(())
        } else {
            Err(Error::TypeMismatch {
                expected: self.kind(),
                found: tree.kind(),
            })
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Unbalanced;

#[derive(Debug, Default, Clone, Copy)]
pub struct Avl;

#[derive(Debug, Default, Clone, Copy)]
pub struct RedBlack;

impl Strategy for Unbalanced {
    fn kind(&self) -> TreeKind {
        TreeKind::Bst
    }
}

impl Strategy for Avl {
    fn kind(&self) -> TreeKind {
        TreeKind::Avl
    }
}

impl Strategy for RedBlack {
    fn kind(&self) -> TreeKind {
        TreeKind::RedBlack
    }
}
