//! Binary search, AVL and Red-Black trees built on one shared core.
//!
//! All three variants share the same arena-backed [`Tree`], the same search/minimum/successor
//! walks, one rotation routine and one insertion/deletion skeleton. What differs is the
//! correction step run after each structural edit, selected by the tree's [`TreeKind`].
//!
//! ```
//! use trellis::{Tree, TreeKind};
//!
//! let mut tree = Tree::new(TreeKind::Avl);
//! for key in [4, 2, 3, 6, 8, 10] {
//!     tree.insert(key).unwrap();
//! }
//!
//! let root = tree.get(tree.root().unwrap()).unwrap();
//! assert_eq!(root.key(), 6);
//! assert!(tree.is_well_formed());
//! ```

extern crate alloc;

use core::{fmt, str::FromStr};

use thiserror::Error;

mod avl;
pub mod config;
pub mod error;
pub mod iter;
mod node;
mod ops;
pub mod persist;
mod print;
mod rb;
mod rotate;
pub mod strategy;
mod traverse;
mod tree;
pub mod validate;

pub use config::TreeConfig;
pub use error::{Error, Result, Violation};
pub use node::{Node, NodeColor, NodeIndex, Payload};
pub use persist::{from_text, load, load_with, save, to_text};
pub use strategy::{Avl, RedBlack, Strategy, Unbalanced};
pub use tree::Tree;

/// Keys are small non-negative integers; [`TreeConfig`] may narrow the accepted range further.
pub type Key = u32;

/// Balancing discipline of a [`Tree`], fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TreeKind {
    Bst,
    Avl,
    RedBlack,
}

impl TreeKind {
    pub const ALL: [TreeKind; 3] = [TreeKind::Bst, TreeKind::Avl, TreeKind::RedBlack];

    /// Name used in the persisted file header.
    pub fn name(self) -> &'static str {
        match self {
            TreeKind::Bst => "BST",
            TreeKind::Avl => "AVL",
            TreeKind::RedBlack => "RB",
        }
    }
}

impl fmt::Display for TreeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown tree kind `{0}`")]
pub struct UnknownKind(pub String);

impl FromStr for TreeKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bst" | "binarysearchtree" => Ok(TreeKind::Bst),
            "avl" | "avltree" => Ok(TreeKind::Avl),
            "rb" | "redblack" | "redblacktree" => Ok(TreeKind::RedBlack),
            _ => Err(UnknownKind(s.to_owned())),
        }
    }
}
