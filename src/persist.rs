//! Plain-text tree files.
//!
//! ```text
//! # index key left right color
//! RB
//! 0   10  1   2   black
//! 1   6   nil nil red
//! 2   20  nil nil red
//! ```
//!
//! The first meaningful line names the tree kind. Every following line describes one node:
//! its index, key, the indices of its children (`nil` when absent) and, for Red-Black trees
//! only, its color. Fields are separated by blanks or tabs and `#` starts a comment. Indices are
//! handed out breadth-first to the nodes that exist, starting with `0` at the root, and the
//! first node line is taken as the root when reading.

use alloc::{
    collections::{BTreeMap, BTreeSet, VecDeque},
    string::String,
    vec::Vec,
};
use std::{fs, path::Path};

use log::debug;

use crate::{
    Key, NodeIndex, Tree, TreeConfig, TreeKind,
    error::{Error, Result},
    node::{Node, NodeColor, Payload, Side},
    validate,
};

const NIL: &str = "nil";

/// Serializes `tree` into the text format.
pub fn to_text(tree: &Tree) -> String {
    let mut out = String::new();
    let header = if tree.kind() == TreeKind::RedBlack {
        "# index key left right color\n"
    } else {
        "# index key left right\n"
    };
    out.push_str(header);
    out.push_str(tree.kind().name());
    out.push('\n');

    let mut queue: VecDeque<NodeIndex> = tree.root().into_iter().collect();
    let mut next_index = 1usize;
    let mut index = 0usize;

    while let Some(idx) = queue.pop_front() {
        let node = tree.node(idx);
        let mut child_field = |child: Option<NodeIndex>| match child {
            Some(child) => {
                queue.push_back(child);
                next_index += 1;
                (next_index - 1).to_string()
            }
            None => NIL.to_owned(),
        };
        let left = child_field(node.left);
        let right = child_field(node.right);

        out.push_str(&format!("{index}\t{}\t{left}\t{right}", node.key));
        if let Payload::Color(color) = node.payload {
            out.push('\t');
            out.push_str(color.as_str());
        }
        out.push('\n');

        index += 1;
    }

    out
}

/// Writes `tree` to `path`, replacing any existing file.
pub fn save(tree: &Tree, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, to_text(tree))?;
    debug!("saved {} tree of {} nodes to {}", tree.kind(), tree.len(), path.display());

    Ok(())
}

/// Reads a tree file with the default [`TreeConfig`].
pub fn load(path: impl AsRef<Path>) -> Result<Tree> {
    load_with(path, &TreeConfig::default())
}

pub fn load_with(path: impl AsRef<Path>, config: &TreeConfig) -> Result<Tree> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let tree = from_text(&text, config)?;
    debug!("loaded {} tree of {} nodes from {}", tree.kind(), tree.len(), path.display());

    Ok(tree)
}

#[derive(Debug)]
struct Record<'a> {
    line: usize,
    index_token: &'a str,
    key: Key,
    payload: Payload,
    left: Option<(usize, &'a str)>,
    right: Option<(usize, &'a str)>,
}

/// Parses the text format and rebuilds the tree it describes.
///
/// Grammar problems are reported as [`Error::MalformedFile`]; a tree that parses but breaks the
/// invariants of its kind is rejected with [`Error::StructuralViolation`].
pub fn from_text(text: &str, config: &TreeConfig) -> Result<Tree> {
    let mut kind = None;
    let mut records: BTreeMap<usize, Record<'_>> = BTreeMap::new();
    let mut file_order = Vec::new();
    let mut last_line = 0;

    for (number, raw) in text.lines().enumerate() {
        let line = number + 1;
        last_line = line;
        let content = raw.split_once('#').map_or(raw, |(before, _)| before).trim();
        if content.is_empty() {
            continue;
        }

        let Some(kind) = kind else {
            kind = Some(
                content
                    .parse::<TreeKind>()
                    .map_err(|err| Error::malformed(line, content, err.to_string()))?,
            );
            continue;
        };

        let (index, record) = parse_record(line, content, kind, config)?;
        if records.contains_key(&index) {
            return Err(Error::malformed(line, record.index_token, "duplicate node index"));
        }
        file_order.push(index);
        records.insert(index, record);
    }

    let kind = kind.ok_or_else(|| Error::malformed(last_line, "", "missing tree kind line"))?;
    let mut tree = Tree::with_config(kind, config.clone());
    tree.reserve(records.len());

    if let Some(&root_index) = file_order.first() {
        attach_records(&mut tree, &records, root_index, &file_order)?;
    }

    tree.recompute_heights();
    validate::check(&tree).map_err(|violation| Error::StructuralViolation { kind, violation })?;

    Ok(tree)
}

fn attach_records(
    tree: &mut Tree,
    records: &BTreeMap<usize, Record<'_>>,
    root_index: usize,
    file_order: &[usize],
) -> Result<()> {
    let mut reached = BTreeSet::from([root_index]);
    let mut stack = alloc::vec![(root_index, None, Side::Left)];

    while let Some((index, parent, side)) = stack.pop() {
        let Some(record) = records.get(&index) else {
            continue;
        };
        let idx = tree.attach(parent, side, Node::new_isolated(record.key, record.payload));

        for (child, child_side) in [(record.right, Side::Right), (record.left, Side::Left)] {
            let Some((child_index, token)) = child else {
                continue;
            };
            if !records.contains_key(&child_index) {
                return Err(Error::malformed(record.line, token, "no node with this index"));
            }
            if !reached.insert(child_index) {
                return Err(Error::malformed(
                    record.line,
                    token,
                    "node is referenced more than once",
                ));
            }
            stack.push((child_index, Some(idx), child_side));
        }
    }

    if let Some(orphan) = file_order.iter().find(|&&index| !reached.contains(&index)) {
        let record = &records[orphan];
        return Err(Error::malformed(
            record.line,
            record.index_token,
            "node is not reachable from the root",
        ));
    }

    Ok(())
}

fn parse_record<'a>(
    line: usize,
    content: &'a str,
    kind: TreeKind,
    config: &TreeConfig,
) -> Result<(usize, Record<'a>)> {
    let fields: Vec<&str> = content.split_whitespace().collect();
    let expected = if kind == TreeKind::RedBlack { 5 } else { 4 };
    if fields.len() != expected {
        return Err(Error::malformed(
            line,
            content,
            format!("expected {expected} fields for a {kind} node, found {}", fields.len()),
        ));
    }

    let index = fields[0]
        .parse::<usize>()
        .map_err(|_| Error::malformed(line, fields[0], "invalid node index"))?;

    let key = fields[1]
        .parse::<Key>()
        .map_err(|_| Error::malformed(line, fields[1], "invalid key"))?;
    if !config.admits(key) {
        return Err(Error::malformed(
            line,
            fields[1],
            format!(
                "key outside the accepted range {}..={}",
                config.key_range.start(),
                config.key_range.end()
            ),
        ));
    }

    let left = parse_child(line, fields[2])?;
    let right = parse_child(line, fields[3])?;

    let payload = match kind {
        TreeKind::Bst => Payload::Plain,
        TreeKind::Avl => Payload::Height(0),
        TreeKind::RedBlack => Payload::Color(parse_color(line, fields[4])?),
    };

    Ok((
        index,
        Record {
            line,
            index_token: fields[0],
            key,
            payload,
            left,
            right,
        },
    ))
}

fn parse_child(line: usize, token: &str) -> Result<Option<(usize, &str)>> {
    if token == NIL {
        return Ok(None);
    }

    token
        .parse::<usize>()
        .map(|index| Some((index, token)))
        .map_err(|_| Error::malformed(line, token, "invalid child index"))
}

fn parse_color(line: usize, token: &str) -> Result<NodeColor> {
    match token {
        "red" => Ok(NodeColor::Red),
        "black" => Ok(NodeColor::Black),
        _ => Err(Error::malformed(line, token, "invalid color")),
    }
}
