//! Conversion of a hierarchy into a `termtree::Tree` for callers that want to
//! compose it with other termtree output.

use termtree::Tree;

use crate::domain::hierarchy::HierarchyIndex;
use crate::domain::node::Indexed;
use crate::domain::render::{DECORATION, SEED};

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl<T> TreeNodeConvert for HierarchyIndex<T> {
    /// Built from the pre-order traversal: `open[d]` is the subtree still
    /// collecting children at depth `d - 1`, `open[0]` the seed.
    fn to_tree_string(&self) -> Tree<String> {
        let mut open = vec![Tree::new(SEED.to_string())];

        for (depth, node) in self.iter() {
            close_until(&mut open, depth + 1);
            let mut label = node.index().to_string();
            if node.is_decorated() {
                label.push_str(DECORATION);
            }
            open.push(Tree::new(label));
        }

        close_until(&mut open, 1);
        open.pop().unwrap_or_else(|| Tree::new(SEED.to_string()))
    }
}

/// Attach finished subtrees to their parents until `len` levels remain open.
fn close_until(open: &mut Vec<Tree<String>>, len: usize) {
    while open.len() > len {
        let Some(done) = open.pop() else { break };
        if let Some(parent) = open.last_mut() {
            parent.push(done);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_long_chain_when_converting_then_every_level_nested() {
        let chain: Vec<(String, Vec<String>)> = (0..1_000)
            .map(|i| (format!("n{i:05}"), vec![format!("n{:05}", i + 1)]))
            .collect();
        let index = HierarchyIndex::new(chain);

        let tree = index.to_tree_string();

        let mut depth = 0;
        let mut current = &tree;
        while let Some(child) = current.leaves.first() {
            depth += 1;
            current = child;
        }
        assert_eq!(depth, 1_001);
    }

    #[test]
    fn given_sibling_subtrees_when_converting_then_children_stay_with_parent() {
        let index = HierarchyIndex::new(vec![
            ("r", vec!["a".to_string(), "b".to_string()]),
            ("a", vec!["a1".to_string()]),
        ]);
        let tree = index.to_tree_string();
        assert_eq!(
            tree.to_string(),
            ".\n└── r*\n    ├── a\n    │   └── a1\n    └── b\n"
        );
    }
}
