use thiserror::Error;

use crate::{Key, TreeKind};

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("key {key} is outside the accepted range {min}..={max}")]
    InvalidKeyRange { key: Key, min: Key, max: Key },

    #[error("{found} tree handed to the {expected} strategy")]
    TypeMismatch { expected: TreeKind, found: TreeKind },

    #[error("line {line}: {reason} (near `{token}`)")]
    MalformedFile {
        line: usize,
        token: String,
        reason: String,
    },

    #[error("loaded {kind} tree is not well formed: {violation}")]
    StructuralViolation { kind: TreeKind, violation: Violation },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn malformed(line: usize, token: &str, reason: impl Into<String>) -> Self {
        Error::MalformedFile {
            line,
            token: token.to_owned(),
            reason: reason.into(),
        }
    }
}

/// First invariant found broken by [`crate::validate::check`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("root node {key} has a parent link")]
    RootHasParent { key: Key },

    #[error("child {child} does not point back to its parent {parent}")]
    BrokenParentLink { parent: Key, child: Key },

    #[error("key {key} appears after {previous} in order")]
    OutOfOrder { previous: Key, key: Key },

    #[error("node {key} stores height {stored}, actual height is {actual}")]
    StaleHeight { key: Key, stored: u32, actual: u32 },

    #[error("node {key} has balance factor {balance}")]
    Unbalanced { key: Key, balance: i64 },

    #[error("node {key} carries a payload of the wrong variant")]
    PayloadMismatch { key: Key },

    #[error("root node {key} is red")]
    RedRoot { key: Key },

    #[error("red node {key} must have two black children or none")]
    RedChildren { key: Key },

    #[error("node {key} has black-height {left} on the left and {right} on the right")]
    BlackHeight { key: Key, left: u32, right: u32 },
}
