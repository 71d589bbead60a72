use crate::Key;

/// Position of a node inside its tree's arena.
///
/// Indices stay stable for the lifetime of the node; a slot freed by a deletion may be handed to
/// a later insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(pub(crate) usize);

impl NodeIndex {
    pub fn as_usize(self) -> usize {
        self.0
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum NodeColor {
    #[default]
    Red,
    Black,
}

impl NodeColor {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeColor::Red => "red",
            NodeColor::Black => "black",
        }
    }
}

/// Per-variant data attached to every node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload {
    Plain,
    Height(u32),
    Color(NodeColor),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    pub(crate) fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub(crate) key: Key,
    pub(crate) payload: Payload,
    pub(crate) parent: Option<NodeIndex>,
    pub(crate) left: Option<NodeIndex>,
    pub(crate) right: Option<NodeIndex>,
}

impl Node {
    pub(crate) fn new_isolated(key: Key, payload: Payload) -> Self {
        Self {
            key,
            payload,
            parent: None,
            left: None,
            right: None,
        }
    }

    pub fn key(&self) -> Key {
        self.key
    }

    pub fn left(&self) -> Option<NodeIndex> {
        self.left
    }

    pub fn right(&self) -> Option<NodeIndex> {
        self.right
    }

    pub fn parent(&self) -> Option<NodeIndex> {
        self.parent
    }

    pub fn payload(&self) -> Payload {
        self.payload
    }

    /// Color of a Red-Black node, `None` for the other variants.
    pub fn color(&self) -> Option<NodeColor> {
        match self.payload {
            Payload::Color(color) => Some(color),
            _ => None,
        }
    }

    /// Stored height of an AVL node, `None` for the other variants.
    pub fn height(&self) -> Option<u32> {
        match self.payload {
            Payload::Height(height) => Some(height),
            _ => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    pub(crate) fn child(&self, side: Side) -> Option<NodeIndex> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub(crate) fn child_mut(&mut self, side: Side) -> &mut Option<NodeIndex> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    pub(crate) fn is_red(&self) -> bool {
        matches!(self.payload, Payload::Color(NodeColor::Red))
    }

    pub(crate) fn set_color(&mut self, color: NodeColor) {
        self.payload = Payload::Color(color);
    }
}

/// Arena cell: either a live node or a link in the free list.
#[derive(Debug, Clone)]
pub(crate) enum Slot {
    Occupied(Node),
    Vacant { next_free: Option<NodeIndex> },
}
