//! Decision tree to DOT (Graphviz) conversion.
//!
//! The generated DOT output follows these conventions:
//! - **Comparison nodes** are rendered as circles labeled with the comparison
//! - **Result nodes** are rendered as boxes labeled with the final order, at the bottom (sink rank)
//! - **Edges**:
//!   - Solid lines, labeled `true`, lead to the left (true) child
//!   - Dashed lines, labeled `false`, lead to the right (false) child
//! - **Pruned branches** end in a small point node
//!
//! # Examples
//!
//! ```
//! use sort_dtree::algorithms::Algorithm;
//!
//! let tree = Algorithm::Bubble.analyze(3).unwrap();
//! let dot = tree.to_dot().unwrap();
//! // Write to file and render with: dot -Tpng output.dot -o output.png
//! assert!(dot.starts_with("digraph {"));
//! ```

use crate::tree::{DecisionTree, Node};

/// Configuration options for DOT output generation.
///
/// # Examples
///
/// ```
/// use sort_dtree::algorithms::Algorithm;
/// use sort_dtree::dot::DotConfig;
///
/// let tree = Algorithm::Insertion.analyze(3).unwrap();
/// let config = DotConfig {
///     show_pruned: false,
///     ..DotConfig::default()
/// };
/// let dot = tree.to_dot_with_config(&config).unwrap();
/// assert!(!dot.contains("shape=point"));
/// ```
#[derive(Debug, Clone)]
pub struct DotConfig {
    /// Shape for comparison nodes (default: "circle")
    pub comparison_shape: &'static str,
    /// Shape for result nodes (default: "box")
    pub result_shape: &'static str,
    /// Style for true edges (default: "solid")
    pub true_edge_style: &'static str,
    /// Style for false edges (default: "dashed")
    pub false_edge_style: &'static str,
    /// Whether to draw pruned branches (default: true)
    pub show_pruned: bool,
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            comparison_shape: "circle",
            result_shape: "box",
            true_edge_style: "solid",
            false_edge_style: "dashed",
            show_pruned: true,
        }
    }
}

impl DecisionTree {
    /// Converts the tree to DOT format with the default configuration.
    pub fn to_dot(&self) -> Result<String, std::fmt::Error> {
        self.to_dot_with_config(&DotConfig::default())
    }

    /// Converts the tree to DOT format.
    ///
    /// Nodes are named `n<index>`; pruned branches get a point node `p<index>_<t|f>`.
    pub fn to_dot_with_config(&self, config: &DotConfig) -> Result<String, std::fmt::Error> {
        use std::fmt::Write as _;

        let nodes = self.descendants();

        let mut dot = String::new();
        writeln!(dot, "digraph {{")?;
        writeln!(dot, "node [shape={}];", config.comparison_shape)?;

        // Leaves at the bottom
        writeln!(dot, "{{ rank=sink")?;
        for &id in nodes.iter().filter(|&&id| self.is_result(id)) {
            writeln!(dot, "n{} [shape={}, label=\"{}\"];", id.index(), config.result_shape, self.label(id))?;
        }
        writeln!(dot, "}}")?;

        for &id in nodes.iter() {
            let Node::Comparison { comparison, left, right } = self.node(id) else {
                continue;
            };
            writeln!(dot, "n{} [label=\"{}\"];", id.index(), comparison)?;

            for (child, outcome, style) in [(left, true, config.true_edge_style), (right, false, config.false_edge_style)] {
                match child {
                    Some(c) => {
                        writeln!(dot, "n{} -> n{} [style={}, label=\"{}\"];", id.index(), c.index(), style, outcome)?;
                    }
                    None if config.show_pruned => {
                        let tag = if outcome { 't' } else { 'f' };
                        writeln!(dot, "p{}_{} [shape=point];", id.index(), tag)?;
                        writeln!(dot, "n{} -> p{}_{} [style=dotted, label=\"{}\"];", id.index(), id.index(), tag, outcome)?;
                    }
                    None => {}
                }
            }
        }

        writeln!(dot, "}}")?;
        Ok(dot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    use crate::algorithms::Algorithm;

    #[test]
    fn test_to_dot_basic() {
        let tree = Algorithm::Insertion.analyze(3).unwrap();
        let dot = tree.to_dot().unwrap();
        assert!(dot.starts_with("digraph {"));
        assert!(dot.ends_with("}\n"));
        assert_eq!(dot.matches("shape=box").count(), 6);
        assert_eq!(dot.matches(" -> ").count(), 10);
        assert!(!dot.contains("shape=point"));
    }

    #[test]
    fn test_to_dot_pruned() {
        let tree = Algorithm::Bubble.analyze(3).unwrap();
        let dot = tree.to_dot().unwrap();
        assert_eq!(dot.matches("shape=point").count(), 2);
        assert_eq!(dot.matches("style=dotted").count(), 2);

        let config = DotConfig {
            show_pruned: false,
            ..DotConfig::default()
        };
        let dot = tree.to_dot_with_config(&config).unwrap();
        assert!(!dot.contains("shape=point"));
    }

    #[test]
    fn test_to_dot_single_leaf() {
        let tree = Algorithm::Bubble.analyze(1).unwrap();
        let dot = tree.to_dot().unwrap();
        assert!(dot.contains("n0 [shape=box, label=\"[A]\"];"));
        assert!(!dot.contains(" -> "));
    }

    /// Helper test to write DOT file for manual inspection (disabled by default)
    #[test]
    #[ignore]
    fn test_write_dot_file() {
        let tree = Algorithm::Bubble.analyze(3).unwrap();
        let dot = tree.to_dot().unwrap();
        std::fs::write("test_output.dot", &dot).unwrap();
        println!("DOT output:\n{}", dot);
    }
}
