use core::fmt;

use alloc::string::String;

use crate::{NodeIndex, Payload, Tree};

impl Tree {
    fn label(&self, idx: NodeIndex) -> String {
        let node = self.node(idx);
        match node.payload {
            Payload::Plain => format!("{}", node.key),
            Payload::Height(height) => format!("{} [h={height}]", node.key),
            Payload::Color(color) => format!("{} [{}]", node.key, color.as_str()),
        }
    }

    fn print_subtree(&self, f: &mut fmt::Formatter<'_>, idx: NodeIndex, tab: &str) -> fmt::Result {
        f.write_str(&self.label(idx))?;

        let node = self.node(idx);
        if node.is_leaf() {
            return Ok(());
        }

        let children = [("L", node.left), ("R", node.right)];
        for (i, (side, child)) in children.into_iter().enumerate() {
            let is_last = i == 1;
            let branch = if is_last { "└─" } else { "├─" };
            write!(f, "\n{tab}{branch} {side} ")?;

            match child {
                Some(child) => {
                    let child_tab = format!("{tab}{}  ", if is_last { " " } else { "│" });
                    self.print_subtree(f, child, &child_tab)?;
                }
                None => f.write_str("∅")?,
            }
        }

        Ok(())
    }
}

/// Box-drawing dump of the tree, one node per line.
impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind())?;

        match self.root() {
            Some(root) => {
                f.write_str("\n└─ ")?;
                self.print_subtree(f, root, "   ")
            }
            None => f.write_str(" ∅"),
        }
    }
}
