use alloc::vec::Vec;

use log::debug;

use crate::{
    Key, TreeKind,
    config::TreeConfig,
    error::{Error, Result},
    node::{Node, NodeIndex, Side, Slot},
    ops, rotate,
    strategy::correction_for,
    traverse,
};

/// An ordered binary tree whose balancing discipline is fixed by its [`TreeKind`].
///
/// Nodes live in an arena and refer to each other by [`NodeIndex`]; the parent link is a plain
/// index as well, so every structural edit rewrites both directions in the same step.
#[derive(Debug, Clone)]
pub struct Tree {
    storage: Vec<Slot>,
    free_head: Option<NodeIndex>,
    root: Option<NodeIndex>,
    len: usize,
    kind: TreeKind,
    config: TreeConfig,
}

impl Tree {
    #[must_use]
    pub fn new(kind: TreeKind) -> Self {
        Self::with_config(kind, TreeConfig::default())
    }

    #[must_use]
    pub fn with_config(kind: TreeKind, config: TreeConfig) -> Self {
        Self {
            storage: Vec::new(),
            free_head: None,
            root: None,
            len: 0,
            kind,
            config,
        }
    }

    pub fn kind(&self) -> TreeKind {
        self.kind
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    pub fn root(&self) -> Option<NodeIndex> {
        self.root
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Reserves room for at least `additional` more nodes.
    pub fn reserve(&mut self, additional: usize) {
        self.storage.reserve(additional);
    }

    pub fn clear(&mut self) {
        self.storage.clear();
        self.free_head = None;
        self.root = None;
        self.len = 0;
    }

    /// Returns the node stored at `idx`, or `None` if the slot is free or out of bounds.
    pub fn get(&self, idx: NodeIndex) -> Option<&Node> {
        match self.storage.get(idx.0)? {
            Slot::Occupied(node) => Some(node),
            Slot::Vacant { .. } => None,
        }
    }

    /// Number of edges on the longest root-to-leaf path.
    pub fn height(&self) -> Option<u32> {
        let root = self.root?;
        let mut deepest = 0;
        let mut stack = alloc::vec![(root, 0u32)];

        while let Some((idx, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            let node = self.node(idx);
            stack.extend(node.left.into_iter().chain(node.right).map(|c| (c, depth + 1)));
        }

        Some(deepest)
    }

    /// Inserts `key`, rebalancing according to the tree's kind.
    ///
    /// Equal keys are not merged: a duplicate descends to the right of its twin.
    pub fn insert(&mut self, key: Key) -> Result<NodeIndex> {
        if !self.config.admits(key) {
            return Err(Error::InvalidKeyRange {
                key,
                min: *self.config.key_range.start(),
                max: *self.config.key_range.end(),
            });
        }

        let inserted = ops::insert(self, key, correction_for(self.kind));
        debug!("{} insert {key}: {} nodes", self.kind, self.len);

        Ok(inserted)
    }

    /// Removes one node holding `key` and returns the key, or `None` if no such node exists.
    pub fn delete(&mut self, key: Key) -> Option<Key> {
        let target = self.search(key)?;
        self.delete_node(target)
    }

    /// Removes the node at `idx`. A free or out-of-bounds index leaves the tree untouched.
    ///
    /// Indices are not generational: once a freed slot is handed out again, an old index into it
    /// names the new node.
    pub fn delete_node(&mut self, idx: NodeIndex) -> Option<Key> {
        self.get(idx)?;

        let removed = ops::delete(self, idx, correction_for(self.kind));
        debug!("{} delete {removed}: {} nodes", self.kind, self.len);

        Some(removed)
    }

    pub fn search(&self, key: Key) -> Option<NodeIndex> {
        traverse::search(self, self.root, key)
    }

    pub fn contains(&self, key: Key) -> bool {
        self.search(key).is_some()
    }

    pub fn minimum(&self) -> Option<NodeIndex> {
        traverse::minimum(self, self.root)
    }

    pub fn maximum(&self) -> Option<NodeIndex> {
        traverse::maximum(self, self.root)
    }

    pub fn successor(&self, idx: NodeIndex) -> Option<NodeIndex> {
        self.get(idx)?;
        traverse::successor(self, idx)
    }

    pub fn predecessor(&self, idx: NodeIndex) -> Option<NodeIndex> {
        self.get(idx)?;
        traverse::predecessor(self, idx)
    }

    /// Lifts the right child of `idx` into its place and returns it.
    ///
    /// The variant's post-rotation hook runs (AVL heights of the two nodes are refreshed), but no
    /// further rebalancing happens, so a lone rotation may leave an AVL or Red-Black tree outside
    /// its invariants.
    pub fn rotate_left(&mut self, idx: NodeIndex) -> Option<NodeIndex> {
        self.get(idx)?;
        rotate::rotate_left(self, idx, correction_for(self.kind))
    }

    /// Mirror of [`Tree::rotate_left`].
    pub fn rotate_right(&mut self, idx: NodeIndex) -> Option<NodeIndex> {
        self.get(idx)?;
        rotate::rotate_right(self, idx, correction_for(self.kind))
    }

    pub(crate) fn node(&self, idx: NodeIndex) -> &Node {
        match &self.storage[idx.0] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => panic!("dangling node index {}", idx.0),
        }
    }

    pub(crate) fn node_mut(&mut self, idx: NodeIndex) -> &mut Node {
        match &mut self.storage[idx.0] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => panic!("dangling node index {}", idx.0),
        }
    }

    /// Stores `node` in the first free slot, or at the end of the arena.
    pub(crate) fn allocate(&mut self, node: Node) -> NodeIndex {
        self.len += 1;

        match self.free_head {
            Some(idx) => {
                if let Slot::Vacant { next_free } = self.storage[idx.0] {
                    self.free_head = next_free;
                }
                self.storage[idx.0] = Slot::Occupied(node);
                idx
            }
            None => {
                self.storage.push(Slot::Occupied(node));
                NodeIndex(self.storage.len() - 1)
            }
        }
    }

    /// Frees the slot at `idx` and hands back the node it held. Links are not touched.
    pub(crate) fn release(&mut self, idx: NodeIndex) -> Node {
        let slot = core::mem::replace(
            &mut self.storage[idx.0],
            Slot::Vacant {
                next_free: self.free_head,
            },
        );
        self.free_head = Some(idx);
        self.len -= 1;

        match slot {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => panic!("double release of node index {}", idx.0),
        }
    }

    /// Which child slot of its parent `idx` occupies.
    pub(crate) fn side_of(&self, idx: NodeIndex) -> Option<Side> {
        let parent = self.node(idx).parent?;

        if self.node(parent).left == Some(idx) {
            Some(Side::Left)
        } else {
            Some(Side::Right)
        }
    }

    /// Points whatever referenced `old` (a child slot of `parent`, or the root) at `new`.
    ///
    /// Only the downward link is rewritten; the caller owns `new.parent`.
    pub(crate) fn replace_child(
        &mut self,
        parent: Option<NodeIndex>,
        old: NodeIndex,
        new: Option<NodeIndex>,
    ) -> Option<Side> {
        let Some(parent) = parent else {
            self.root = new;
            return None;
        };

        let parent_node = self.node_mut(parent);
        if parent_node.left == Some(old) {
            parent_node.left = new;
            Some(Side::Left)
        } else {
            parent_node.right = new;
            Some(Side::Right)
        }
    }

    /// Attaches an isolated node as the `side` child of `parent` (or as the root).
    pub(crate) fn attach(&mut self, parent: Option<NodeIndex>, side: Side, node: Node) -> NodeIndex {
        let idx = self.allocate(node);
        self.node_mut(idx).parent = parent;

        match parent {
            Some(parent) => *self.node_mut(parent).child_mut(side) = Some(idx),
            None => self.root = Some(idx),
        }

        idx
    }
}
