//! Decision trees produced by the analyzer.
//!
//! Nodes live in an arena owned by [`DecisionTree`] and are addressed by
//! [`NodeId`] handles. A comparison node branches left when the comparison was
//! answered `true` and right when it was answered `false`; a missing child is a
//! branch that was pruned as logically impossible.

use std::fmt::{Display, Formatter, Write as _};

use crate::comparison::{Comparison, Symbol};

/// Handle of a node inside a [`DecisionTree`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        Self(u32::try_from(index).expect("node index exceeds u32"))
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "@{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Comparison {
        comparison: Comparison,
        /// Taken when the comparison is `true`.
        left: Option<NodeId>,
        /// Taken when the comparison is `false`.
        right: Option<NodeId>,
    },
    /// Leaf: order of the operands when the routine returned.
    Result { order: Vec<Symbol> },
}

impl Node {
    pub fn is_comparison(&self) -> bool {
        matches!(self, Node::Comparison { .. })
    }

    pub fn is_result(&self) -> bool {
        matches!(self, Node::Result { .. })
    }

    /// Child on the given branch, `None` for leaves and pruned branches.
    pub fn child(&self, outcome: bool) -> Option<NodeId> {
        match self {
            Node::Comparison { left, right, .. } => {
                if outcome {
                    *left
                } else {
                    *right
                }
            }
            Node::Result { .. } => None,
        }
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Node::Comparison { comparison, .. } => write!(f, "{}", comparison),
            Node::Result { order } => {
                write!(f, "[")?;
                for (i, s) in order.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", s)?;
                }
                write!(f, "]")
            }
        }
    }
}

/// Finished decision tree of a sorting routine. Read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionTree {
    nodes: Vec<Node>,
    root: NodeId,
    size: usize,
}

impl DecisionTree {
    pub(crate) fn new(nodes: Vec<Node>, root: NodeId, size: usize) -> Self {
        debug_assert!(root.index() < nodes.len());
        Self { nodes, root, size }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of operands the routine was analyzed with.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn is_comparison(&self, id: NodeId) -> bool {
        self.node(id).is_comparison()
    }

    pub fn is_result(&self, id: NodeId) -> bool {
        self.node(id).is_result()
    }

    /// Comparison text or resulting order of the node.
    pub fn label(&self, id: NodeId) -> String {
        self.node(id).to_string()
    }

    pub fn comparison(&self, id: NodeId) -> Option<Comparison> {
        match self.node(id) {
            Node::Comparison { comparison, .. } => Some(*comparison),
            Node::Result { .. } => None,
        }
    }

    pub fn order(&self, id: NodeId) -> Option<&[Symbol]> {
        match self.node(id) {
            Node::Result { order } => Some(order),
            Node::Comparison { .. } => None,
        }
    }

    pub fn left(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).child(true)
    }

    pub fn right(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).child(false)
    }

    /// Total number of nodes reachable from the root.
    pub fn num_nodes(&self) -> usize {
        self.descendants().len()
    }

    /// All nodes reachable from the root, in pre-order (true branch first).
    pub fn descendants(&self) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            result.push(id);
            if let Some(r) = self.right(id) {
                stack.push(r);
            }
            if let Some(l) = self.left(id) {
                stack.push(l);
            }
        }
        result
    }

    /// Compact nested representation: `{A > B ? <true> : <false>}`, with `_` for pruned branches.
    pub fn to_bracket_string(&self) -> String {
        let mut s = String::new();
        self.write_bracket(&mut s, Some(self.root));
        s
    }

    fn write_bracket(&self, out: &mut String, node: Option<NodeId>) {
        let Some(id) = node else {
            out.push('_');
            return;
        };
        match self.node(id) {
            Node::Comparison { comparison, left, right } => {
                write!(out, "{{{} ? ", comparison).unwrap();
                self.write_bracket(out, *left);
                out.push_str(" : ");
                self.write_bracket(out, *right);
                out.push('}');
            }
            leaf @ Node::Result { .. } => write!(out, "{}", leaf).unwrap(),
        }
    }
}

impl Display for DecisionTree {
    /// Indented outline, one node per line, branches tagged `T`/`F`.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut stack = vec![(Some(self.root), 0usize, "")];
        while let Some((node, depth, tag)) = stack.pop() {
            write!(f, "{:indent$}{}", "", tag, indent = depth * 2)?;
            match node {
                None => writeln!(f, "(pruned)")?,
                Some(id) => {
                    writeln!(f, "{}", self.node(id))?;
                    if let Node::Comparison { left, right, .. } = self.node(id) {
                        stack.push((*right, depth + 1, "F: "));
                        stack.push((*left, depth + 1, "T: "));
                    }
                }
            }
        }
        Ok(())
    }
}
