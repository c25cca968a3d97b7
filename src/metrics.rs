//! Statistics over finished decision trees.
//!
//! The depth of a result leaf is the number of comparisons the routine made to
//! reach it, so the average leaf depth is the average number of comparisons
//! over all outcomes the analysis explored.

use std::collections::HashSet;

use num_bigint::BigUint;

use crate::comparison::Symbol;
use crate::tree::{DecisionTree, Node, NodeId};

/// Summary of a decision tree.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeStats {
    pub comparison_nodes: usize,
    pub result_nodes: usize,
    /// Branches proven impossible by pruning.
    pub pruned_branches: usize,
    pub min_depth: usize,
    pub max_depth: usize,
    pub average_depth: f64,
    /// Number of different final orders among the leaves.
    pub distinct_orders: usize,
}

impl DecisionTree {
    /// Depths of all result leaves, in left-to-right order.
    pub fn leaf_depths(&self) -> Vec<usize> {
        let mut depths = Vec::new();
        let mut stack = vec![(self.root(), 0usize)];
        while let Some((id, depth)) = stack.pop() {
            match self.node(id) {
                Node::Result { .. } => depths.push(depth),
                Node::Comparison { left, right, .. } => {
                    if let Some(r) = right {
                        stack.push((*r, depth + 1));
                    }
                    if let Some(l) = left {
                        stack.push((*l, depth + 1));
                    }
                }
            }
        }
        depths
    }

    /// Mean depth of the result leaves, i.e. the average number of comparisons.
    pub fn average_path_length(&self) -> f64 {
        let depths = self.leaf_depths();
        if depths.is_empty() {
            return 0.0;
        }
        depths.iter().sum::<usize>() as f64 / depths.len() as f64
    }

    /// Number of empty child slots on comparison nodes.
    ///
    /// The search always runs to exhaustion, so every empty slot is a branch
    /// that was proven impossible.
    pub fn pruned_node_count(&self) -> usize {
        self.comparison_ids()
            .map(|id| [self.left(id), self.right(id)].iter().filter(|c| c.is_none()).count())
            .sum()
    }

    fn comparison_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.descendants().into_iter().filter(move |&id| self.is_comparison(id))
    }

    pub fn stats(&self) -> TreeStats {
        let depths = self.leaf_depths();
        let orders: HashSet<&[Symbol]> = self.descendants().into_iter().filter_map(|id| self.order(id)).collect();
        TreeStats {
            comparison_nodes: self.comparison_ids().count(),
            result_nodes: depths.len(),
            pruned_branches: self.pruned_node_count(),
            min_depth: depths.iter().copied().min().unwrap_or(0),
            max_depth: depths.iter().copied().max().unwrap_or(0),
            average_depth: self.average_path_length(),
            distinct_orders: orders.len(),
        }
    }
}

/// Relative change from `baseline` to `value` in percent, `None` for a zero baseline.
pub fn percent_change(value: f64, baseline: f64) -> Option<f64> {
    if baseline == 0.0 {
        return None;
    }
    Some((value - baseline) / baseline * 100.0)
}

/// `n!`, the number of orderings of `n` distinct items.
pub fn factorial(n: usize) -> BigUint {
    (1..=n as u64).fold(BigUint::from(1u32), |acc, k| acc * k)
}

/// `ceil(log2(n!))`: no comparison sort can order every input of size `n` in
/// fewer comparisons in the worst case.
pub fn lower_bound(n: usize) -> u64 {
    let f = factorial(n);
    if f <= BigUint::from(1u32) {
        return 0;
    }
    (f - 1u32).bits()
}
