//! Search path bookkeeping.
//!
//! The [`PathStack`] is the current depth-first path from the root of the
//! decision tree down to the point of execution. Every [`Frame`] on it records
//! one answered comparison; the [`TruthSet`] holds the facts those answers
//! establish and is updated on every push and pop. Pushing a frame also links
//! its node under the previous top frame, so the tree is assembled as a side
//! effect of the search.

use std::collections::HashMap;

use log::trace;

use crate::comparison::{Comparison, Symbol};
use crate::tree::{DecisionTree, Node, NodeId};

/// One answered comparison on the current path.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Frame {
    pub comparison: Comparison,
    pub outcome: bool,
    pub node: NodeId,
}

impl Frame {
    pub fn new(comparison: Comparison, outcome: bool, node: NodeId) -> Self {
        Self {
            comparison,
            outcome,
            node,
        }
    }

    /// Fact established by this frame: the comparison itself, or its negation if answered `false`.
    pub fn truth(&self) -> Comparison {
        self.comparison.truth(self.outcome)
    }

    /// Same comparison and node, opposite outcome.
    pub fn flipped(&self) -> Self {
        Self {
            outcome: !self.outcome,
            ..*self
        }
    }
}

/// Multiset of facts established along the current path.
///
/// A routine may ask the same comparison more than once on a path, so each
/// fact is counted and only disappears when its last frame is popped.
#[derive(Debug, Default, Clone)]
pub struct TruthSet {
    counts: HashMap<Comparison, usize>,
}

impl TruthSet {
    pub fn insert(&mut self, truth: Comparison) {
        *self.counts.entry(truth).or_insert(0) += 1;
    }

    pub fn remove(&mut self, truth: &Comparison) {
        if let Some(count) = self.counts.get_mut(truth) {
            *count -= 1;
            if *count == 0 {
                self.counts.remove(truth);
            }
        }
    }

    pub fn contains(&self, truth: &Comparison) -> bool {
        self.counts.contains_key(truth)
    }

    /// Whether `truth` can be added without contradicting a known fact.
    pub fn admits(&self, truth: &Comparison) -> bool {
        !self.contains(&truth.negate())
    }

    /// Number of distinct facts.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Stack of frames from the tree root to the current point, plus the tree arena they link into.
#[derive(Debug, Default)]
pub struct PathStack {
    frames: Vec<Frame>,
    truths: TruthSet,
    nodes: Vec<Node>,
    root: Option<NodeId>,
}

impl PathStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn peek(&self) -> Option<&Frame> {
        self.frames.last()
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn truths(&self) -> &TruthSet {
        &self.truths
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Allocate a comparison node with both branches still open.
    pub fn new_comparison_node(&mut self, comparison: Comparison) -> NodeId {
        self.alloc(Node::Comparison {
            comparison,
            left: None,
            right: None,
        })
    }

    /// Allocate a leaf and hang it under the top frame. On an empty stack the leaf becomes the root.
    pub fn add_result(&mut self, order: Vec<Symbol>) -> NodeId {
        let id = self.alloc(Node::Result { order });
        match self.frames.last().copied() {
            Some(top) => self.link(top, id),
            None => self.root = Some(id),
        }
        id
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(node);
        id
    }

    fn link(&mut self, parent: Frame, child: NodeId) {
        if let Node::Comparison { left, right, .. } = &mut self.nodes[parent.node.index()] {
            if parent.outcome {
                *left = Some(child);
            } else {
                *right = Some(child);
            }
        }
    }

    /// Whether the frame's truth is consistent with the facts on the stack.
    pub fn is_consistent(&self, frame: &Frame) -> bool {
        self.truths.admits(&frame.truth())
    }

    /// Push a frame, record its truth, and link its node under the previous top frame.
    pub fn push(&mut self, frame: Frame) {
        trace!("push {} = {} ({})", frame.comparison, frame.outcome, frame.node);
        match self.frames.last().copied() {
            Some(top) => self.link(top, frame.node),
            None => {
                if self.root.is_none() {
                    self.root = Some(frame.node);
                }
            }
        }
        self.truths.insert(frame.truth());
        self.frames.push(frame);
    }

    pub fn pop(&mut self) -> Option<Frame> {
        let frame = self.frames.pop()?;
        trace!("pop {} = {} ({})", frame.comparison, frame.outcome, frame.node);
        self.truths.remove(&frame.truth());
        Some(frame)
    }

    /// Outcomes of all frames, oldest first.
    pub fn outcomes(&self) -> Vec<bool> {
        self.frames.iter().map(|f| f.outcome).collect()
    }

    /// Finish the search and hand the arena over as a tree.
    pub fn into_tree(self, size: usize) -> Option<DecisionTree> {
        let root = self.root?;
        Some(DecisionTree::new(self.nodes, root, size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    fn cmp(s: &str) -> Comparison {
        s.parse().unwrap()
    }

    #[test]
    fn test_truth_set_counts_duplicates() {
        let mut set = TruthSet::default();
        set.insert(cmp("A > B"));
        set.insert(cmp("B < A"));
        assert_eq!(set.len(), 1);
        set.remove(&cmp("A > B"));
        assert!(set.contains(&cmp("A > B")));
        set.remove(&cmp("A > B"));
        assert!(set.is_empty());
        set.remove(&cmp("A > B"));
        assert!(set.is_empty());
    }

    #[test]
    fn test_truth_set_admits() {
        let mut set = TruthSet::default();
        set.insert(cmp("A > B"));
        assert!(set.admits(&cmp("A > B")));
        assert!(set.admits(&cmp("B < A")));
        assert!(!set.admits(&cmp("A < B")));
        assert!(!set.admits(&cmp("B > A")));
        assert!(set.admits(&cmp("A != B")));
        assert!(set.admits(&cmp("A == B")));
    }

    #[test]
    fn test_push_links_children() {
        let mut stack = PathStack::new();
        let n1 = stack.new_comparison_node(cmp("A > B"));
        stack.push(Frame::new(cmp("A > B"), true, n1));
        let n2 = stack.new_comparison_node(cmp("B > C"));
        stack.push(Frame::new(cmp("B > C"), false, n2));
        let leaf = stack.add_result(vec![Symbol::new(1), Symbol::new(0), Symbol::new(2)]);

        assert_eq!(stack.root(), Some(n1));
        assert_eq!(stack.node(n1).child(true), Some(n2));
        assert_eq!(stack.node(n1).child(false), None);
        assert_eq!(stack.node(n2).child(false), Some(leaf));
        assert_eq!(stack.node(n2).child(true), None);
        assert_eq!(stack.outcomes(), vec![true, false]);
    }

    #[test]
    fn test_pop_restores_truths() {
        let mut stack = PathStack::new();
        let n1 = stack.new_comparison_node(cmp("A > B"));
        let f1 = Frame::new(cmp("A > B"), true, n1);
        stack.push(f1);
        assert!(stack.truths().contains(&cmp("A > B")));

        let flipped = f1.flipped();
        assert!(!stack.is_consistent(&flipped));
        assert_eq!(stack.pop(), Some(f1));
        assert!(stack.truths().is_empty());
        assert!(stack.is_consistent(&flipped));
        assert_eq!(stack.pop(), None);
    }

    #[test]
    fn test_root_is_kept_across_pops() {
        let mut stack = PathStack::new();
        let n1 = stack.new_comparison_node(cmp("A > B"));
        let f1 = Frame::new(cmp("A > B"), true, n1);
        stack.push(f1);
        stack.pop();
        stack.push(f1.flipped());
        assert_eq!(stack.root(), Some(n1));
        let tree = stack.into_tree(2).unwrap();
        assert_eq!(tree.root(), n1);
    }

    #[test]
    fn test_empty_path_result_is_root() {
        let mut stack = PathStack::new();
        let leaf = stack.add_result(vec![Symbol::new(0)]);
        let tree = stack.into_tree(1).unwrap();
        assert_eq!(tree.root(), leaf);
        assert_eq!(tree.label(leaf), "[A]");
    }
}
