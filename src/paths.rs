//! Iterator over root-to-leaf paths of a decision tree.
//!
//! Each path is the list of facts established along it (the comparison for a
//! `true` branch, its negation for a `false` branch) together with the order
//! the routine produced at the leaf.
//!
//! # Example
//!
//! ```
//! use sort_dtree::algorithms::insertion_sort;
//! use sort_dtree::analyzer::Analyzer;
//!
//! let tree = Analyzer::new(2).analyze(|items| insertion_sort(items)).unwrap();
//! let paths: Vec<_> = tree.paths().collect();
//! assert_eq!(paths.len(), 2);
//! assert_eq!(paths[0].truths[0].to_string(), "A > B");
//! assert_eq!(paths[1].truths[0].to_string(), "A < B");
//! ```

use crate::comparison::{Comparison, Symbol};
use crate::tree::{DecisionTree, Node, NodeId};

/// One complete path through the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreePath {
    pub truths: Vec<Comparison>,
    pub order: Vec<Symbol>,
}

impl TreePath {
    /// Whether `order` satisfies every fact on the path.
    pub fn is_satisfied_by(&self, order: &[Symbol]) -> bool {
        let rank = |s: Symbol| order.iter().position(|&x| x == s).unwrap_or(usize::MAX);
        self.truths.iter().all(|t| t.holds(rank))
    }
}

impl DecisionTree {
    /// Iterate over all paths, `true` branches first.
    pub fn paths(&self) -> TreePaths<'_> {
        TreePaths::new(self)
    }
}

#[derive(Debug, Clone, Copy)]
enum Branch {
    True,
    False,
}

#[derive(Debug)]
struct StackFrame {
    node: NodeId,
    next_branch: Option<Branch>,
}

/// Iterator created by [`DecisionTree::paths()`].
///
/// Depth-first with an explicit stack; the current path of facts is a single
/// vector that grows and shrinks with the stack.
pub struct TreePaths<'a> {
    tree: &'a DecisionTree,
    stack: Vec<StackFrame>,
    current: Vec<Comparison>,
}

impl<'a> TreePaths<'a> {
    pub fn new(tree: &'a DecisionTree) -> Self {
        TreePaths {
            tree,
            stack: vec![StackFrame {
                node: tree.root(),
                next_branch: Some(Branch::True),
            }],
            current: Vec::new(),
        }
    }

    fn backtrack(&mut self) {
        self.stack.pop();
        if !self.stack.is_empty() {
            self.current.pop();
        }
    }
}

impl Iterator for TreePaths<'_> {
    type Item = TreePath;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let frame = self.stack.last_mut()?;
            let node = frame.node;

            let comparison = match self.tree.node(node) {
                Node::Result { order } => {
                    let path = TreePath {
                        truths: self.current.clone(),
                        order: order.clone(),
                    };
                    self.backtrack();
                    return Some(path);
                }
                Node::Comparison { comparison, .. } => *comparison,
            };

            let outcome = match frame.next_branch {
                Some(Branch::True) => {
                    frame.next_branch = Some(Branch::False);
                    true
                }
                Some(Branch::False) => {
                    frame.next_branch = None;
                    false
                }
                None => {
                    self.backtrack();
                    continue;
                }
            };

            // Pruned branches have no child and yield no path.
            if let Some(child) = self.tree.node(node).child(outcome) {
                self.current.push(comparison.truth(outcome));
                self.stack.push(StackFrame {
                    node: child,
                    next_branch: Some(Branch::True),
                });
            }
        }
    }
}
