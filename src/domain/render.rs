//! Box-drawing rendition of a [`HierarchyIndex`].
//!
//! ```text
//! .
//! ├── alpine*
//! │   └── transmission
//! └── base/debian:jdk7*
//!     └── base/debian:jdk7-ui
//!         └── gatling
//! ```

use std::io::{self, Write};

use tracing::{instrument, warn};

use crate::domain::hierarchy::HierarchyIndex;
use crate::domain::node::{HierarchyNode, Indexed};

/// First line, standing for the implicit super-root.
pub const SEED: &str = ".";
pub const VERTICAL: &str = "│";
pub const LAST_BRANCH: &str = "└──";
pub const BRANCH: &str = "├──";
/// Suffix appended to every root.
pub const DECORATION: &str = "*";
pub const TAB_SIZE: usize = 4;

/// Receives rendered lines one at a time, in emission order.
pub trait LineSink {
    fn accept(&mut self, line: &str) -> io::Result<()>;
}

impl LineSink for Vec<String> {
    fn accept(&mut self, line: &str) -> io::Result<()> {
        self.push(line.to_string());
        Ok(())
    }
}

/// Writes each line followed by a newline.
pub struct WriteSink<W: Write>(pub W);

impl<W: Write> LineSink for WriteSink<W> {
    fn accept(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.0, "{line}")
    }
}

/// Adapts a closure into a sink.
pub struct FnSink<F>(pub F);

impl<F: FnMut(&str)> LineSink for FnSink<F> {
    fn accept(&mut self, line: &str) -> io::Result<()> {
        (self.0)(line);
        Ok(())
    }
}

/// One open sibling group on the render stack.
struct Frame<'a, T> {
    siblings: Vec<&'a HierarchyNode<T>>,
    position: usize,
}

/// Renders a forest depth-first, in the same order as [`HierarchyIndex::walk`].
pub struct TreeRenderer<'a, T> {
    index: &'a HierarchyIndex<T>,
    open_cell: String,
    blank_cell: String,
}

impl<'a, T> TreeRenderer<'a, T> {
    pub fn new(index: &'a HierarchyIndex<T>) -> Self {
        let open_cell = format!(
            "{VERTICAL}{}",
            " ".repeat(TAB_SIZE - VERTICAL.chars().count())
        );
        Self {
            index,
            open_cell,
            blank_cell: " ".repeat(TAB_SIZE),
        }
    }

    /// Emit the tree into `sink`. An empty forest emits nothing, not even the
    /// seed line.
    #[instrument(level = "debug", skip_all)]
    pub fn render<S: LineSink + ?Sized>(&self, sink: &mut S) -> io::Result<()> {
        if self.index.is_empty() {
            return Ok(());
        }
        sink.accept(SEED)?;

        let mut stack = vec![Frame {
            siblings: self.index.roots().iter().collect(),
            position: 0,
        }];
        // one entry per ancestor level: does that ancestor still have siblings below?
        let mut columns: Vec<bool> = Vec::new();
        let mut path: Vec<&str> = Vec::new();

        while let Some(frame) = stack.last_mut() {
            if frame.position == frame.siblings.len() {
                stack.pop();
                columns.pop();
                path.pop();
                continue;
            }
            let node = frame.siblings[frame.position];
            frame.position += 1;
            let is_last = frame.position == frame.siblings.len();

            sink.accept(&self.line(&columns, node, is_last))?;

            if let Some(children) = self.index.children_of(node) {
                columns.push(!is_last);
                path.push(node.index());
                // cyclic children are dropped before the group size decides the branch glyphs
                let siblings = children
                    .iter()
                    .filter(|child| {
                        let cyclic = path.contains(&child.index());
                        if cyclic {
                            warn!("cycle at '{}', subtree not rendered", child.index());
                        }
                        !cyclic
                    })
                    .collect();
                stack.push(Frame {
                    siblings,
                    position: 0,
                });
            }
        }
        Ok(())
    }

    pub fn render_to_vec(&self) -> Vec<String> {
        let mut lines = Vec::new();
        // pushing into a Vec cannot fail
        let _ = self.render(&mut lines);
        lines
    }

    fn line(&self, columns: &[bool], node: &HierarchyNode<T>, is_last: bool) -> String {
        let mut line = String::with_capacity((columns.len() + 1) * TAB_SIZE + node.index().len() + 2);
        for &open in columns {
            line.push_str(if open { &self.open_cell } else { &self.blank_cell });
        }
        line.push_str(if is_last { LAST_BRANCH } else { BRANCH });
        line.push(' ');
        line.push_str(node.index());
        if node.is_decorated() {
            line.push_str(DECORATION);
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_single_root_without_children_when_rendering_then_decorated_last_branch() {
        let index: HierarchyIndex<String> = HierarchyIndex::new(vec![("scratch", Vec::new())]);
        let lines = TreeRenderer::new(&index).render_to_vec();
        assert_eq!(lines, vec![".", "└── scratch*"]);
    }

    #[test]
    fn given_open_ancestor_when_rendering_then_column_keeps_spine() {
        let index = HierarchyIndex::new(vec![
            ("r", vec!["a".to_string(), "b".to_string()]),
            ("a", vec!["a1".to_string()]),
        ]);
        let lines = TreeRenderer::new(&index).render_to_vec();
        assert_eq!(
            lines,
            vec![".", "└── r*", "    ├── a", "    │   └── a1", "    └── b"]
        );
    }

    #[test]
    fn given_cyclic_last_child_when_rendering_then_previous_sibling_closes_group() {
        let index = HierarchyIndex::new(vec![
            ("r", vec!["x".to_string()]),
            ("x", vec!["y".to_string()]),
            ("y", vec!["x".to_string(), "m".to_string()]),
        ]);
        let lines = TreeRenderer::new(&index).render_to_vec();
        assert_eq!(
            lines,
            vec![".", "└── r*", "    └── x", "        └── y", "            └── m"]
        );
    }

    #[test]
    fn given_closure_sink_when_rendering_then_receives_every_line() {
        let index = HierarchyIndex::new(vec![("alpine", vec!["transmission".to_string()])]);
        let mut count = 0;
        TreeRenderer::new(&index)
            .render(&mut FnSink(|_: &str| count += 1))
            .unwrap();
        assert_eq!(count, 3);
    }

    #[test]
    fn given_writer_sink_when_rendering_then_lines_are_newline_terminated() {
        let index = HierarchyIndex::new(vec![("alpine", vec!["transmission".to_string()])]);
        let mut sink = WriteSink(Vec::new());
        TreeRenderer::new(&index).render(&mut sink).unwrap();
        assert_eq!(
            String::from_utf8(sink.0).unwrap(),
            ".\n└── alpine*\n    └── transmission\n"
        );
    }
}
