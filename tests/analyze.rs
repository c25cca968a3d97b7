//! End-to-end tests of the analyzer on real sorting routines.

use std::cmp::Ordering;

use sort_dtree::algorithms::{bubble_sort, insertion_sort, Algorithm};
use sort_dtree::analyzer::{Analyzer, AnalyzerConfig};
use sort_dtree::comparison::Symbol;
use sort_dtree::error::AnalyzeError;
use sort_dtree::metrics::{factorial, lower_bound};
use sort_dtree::tree::{DecisionTree, Node};

fn permutations(n: usize) -> Vec<Vec<usize>> {
    if n == 0 {
        return vec![vec![]];
    }
    let mut result = Vec::new();
    for p in permutations(n - 1) {
        for pos in 0..=p.len() {
            let mut q = p.clone();
            q.insert(pos, n - 1);
            result.push(q);
        }
    }
    result
}

/// Follow the tree as the routine would on concrete values (`values[i]` is the value of symbol `i`).
fn follow(tree: &DecisionTree, values: &[usize]) -> Vec<Symbol> {
    let rank = |s: Symbol| values[s.index()];
    let mut id = tree.root();
    loop {
        match tree.node(id) {
            Node::Result { order } => return order.clone(),
            Node::Comparison { comparison, .. } => {
                let outcome = comparison.holds(rank);
                id = tree
                    .node(id)
                    .child(outcome)
                    .unwrap_or_else(|| panic!("input {:?} reached a pruned branch at '{}'", values, comparison));
            }
        }
    }
}

// ─── Exhaustiveness ────────────────────────────────────────────────────────────

#[test]
fn every_input_reaches_a_sorted_leaf() {
    for algorithm in Algorithm::ALL {
        for n in 0..=5 {
            let tree = algorithm.analyze(n).unwrap();
            for values in permutations(n) {
                let order = follow(&tree, &values);
                let sorted: Vec<usize> = order.iter().map(|s| values[s.index()]).collect();
                assert!(
                    sorted.windows(2).all(|w| w[0] < w[1]),
                    "{} on {:?} produced {:?}",
                    algorithm,
                    values,
                    order
                );
            }
        }
    }
}

#[test]
fn insertion_sort_leaves_are_all_permutations() {
    let tree = Analyzer::new(6).analyze(|items| insertion_sort(items)).unwrap();
    let stats = tree.stats();
    assert_eq!(stats.result_nodes, 720);
    assert_eq!(stats.distinct_orders, 720);
    assert_eq!(stats.pruned_branches, 0);
    assert_eq!(factorial(6).to_string(), "720");
}

#[test]
fn worst_case_meets_lower_bound() {
    for algorithm in Algorithm::ALL {
        for n in 1..=5 {
            let stats = algorithm.analyze(n).unwrap().stats();
            assert!(
                stats.max_depth as u64 >= lower_bound(n),
                "{} on {} items: max depth {}",
                algorithm,
                n,
                stats.max_depth
            );
            assert!(stats.average_depth <= stats.max_depth as f64);
            assert!(stats.average_depth >= stats.min_depth as f64);
        }
    }
}

// ─── Determinism ───────────────────────────────────────────────────────────────

#[test]
fn analysis_is_deterministic() {
    for algorithm in Algorithm::ALL {
        let t1 = algorithm.analyze(4).unwrap();
        let t2 = algorithm.analyze(4).unwrap();
        assert_eq!(t1, t2);
        assert_eq!(t1.to_bracket_string(), t2.to_bracket_string());
    }
}

// ─── Pruning ───────────────────────────────────────────────────────────────────

#[test]
fn bubble_sort_tree_on_three_items() {
    let tree = Analyzer::new(3).analyze(|items| bubble_sort(items)).unwrap();
    assert_eq!(
        tree.to_bracket_string(),
        "{A > B ? \
            {A > C ? {B > C ? [C, B, A] : [B, C, A]} : {B > A ? _ : [B, A, C]}} : \
            {B > C ? {A > C ? [C, A, B] : [A, C, B]} : {A > B ? _ : [A, B, C]}}}"
    );
    assert_eq!(tree.average_path_length(), 3.0);
    assert_eq!(tree.pruned_node_count(), 2);
}

#[test]
fn implied_comparison_does_not_branch() {
    let tree = Analyzer::new(2)
        .analyze(|items| {
            if items[0] > items[1] {
                // A > B is known here, so B > A can only be false.
                assert!(!(items[1] > items[0]));
            }
        })
        .unwrap();
    let root = tree.root();
    let implied = tree.left(root).unwrap();
    assert_eq!(tree.label(implied), "B > A");
    assert_eq!(tree.left(implied), None);
    assert!(tree.is_result(tree.right(implied).unwrap()));
    assert_eq!(tree.stats().comparison_nodes, 2);
}

#[test]
fn equality_operators_are_explored() {
    let tree = Analyzer::new(2)
        .analyze(|items| {
            if items[0] != items[1] && items[0] > items[1] {
                items.swap(0, 1);
            }
        })
        .unwrap();
    assert_eq!(tree.to_bracket_string(), "{A != B ? {A > B ? [B, A] : [A, B]} : [A, B]}");
}

// ─── Contract violations ───────────────────────────────────────────────────────

#[test]
fn nondeterministic_routine_is_rejected() {
    let mut runs = 0;
    let result = Analyzer::new(3).analyze(|items| {
        runs += 1;
        // Decides which pair to compare from its own counter, not from outcomes.
        let _ = if runs % 2 == 0 { items[1] > items[2] } else { items[0] > items[1] };
    });
    assert!(matches!(result, Err(AnalyzeError::Nondeterministic { position: 0, .. })));
}

#[test]
fn shrinking_routine_is_rejected() {
    let mut runs = 0;
    let result = Analyzer::new(3).analyze(|items| {
        runs += 1;
        let _ = items[0] > items[1];
        if runs == 1 {
            let _ = items[1] > items[2];
        }
    });
    assert_eq!(result.unwrap_err(), AnalyzeError::IncompleteReplay { remaining: 1 });
}

#[test]
fn non_strict_operators_are_rejected() {
    let result = Analyzer::new(2).analyze(|items| {
        if items[0] <= items[1] {
            items.swap(0, 1);
        }
    });
    assert_eq!(result.unwrap_err(), AnalyzeError::UnsupportedOperator("<=".to_string()));

    let result = Analyzer::new(3).analyze(|items| items.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal)));
    assert_eq!(result.unwrap_err(), AnalyzeError::UnsupportedOperator("partial_cmp".to_string()));
}

#[test]
fn depth_limit_stops_runaway_routines() {
    let analyzer = Analyzer::with_config(AnalyzerConfig {
        size: 4,
        max_depth: Some(2),
    });
    let result = analyzer.analyze(|items| bubble_sort(items));
    assert_eq!(result.unwrap_err(), AnalyzeError::DepthLimit { limit: 2 });
}

// ─── Sizes ─────────────────────────────────────────────────────────────────────

#[test]
fn no_cap_on_number_of_items() {
    let tree = Analyzer::new(30)
        .analyze(|items| {
            if items[0] > items[29] {
                items.swap(0, 29);
            }
        })
        .unwrap();
    assert_eq!(tree.label(tree.root()), "A > AD");
    assert_eq!(tree.order(tree.left(tree.root()).unwrap()).unwrap()[0].to_string(), "AD");
}
