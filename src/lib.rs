//! # sort-dtree: Decision trees of comparison sorts
//!
//! **`sort-dtree`** treats a comparison-based sorting routine as a black box and
//! builds its complete **binary decision tree**: every internal node is a
//! comparison the routine makes, every leaf is the order it ends up producing.
//!
//! ## How it works
//!
//! The routine sorts a slice of [`Item`][crate::item::Item]s. Items carry no
//! values; each `<`, `>`, `==` or `!=` between two of them is answered by the
//! [`Analyzer`][crate::analyzer::Analyzer], which explores every consistent
//! sequence of answers depth-first. Answers that would contradict a fact
//! already established on the current path are pruned, since the values being
//! sorted are distinct and totally ordered.
//!
//! Routines are re-run from scratch after every backtrack, replaying the
//! answers of the current path, so any deterministic routine can be analyzed
//! without being suspended mid-execution.
//!
//! ## Basic Usage
//!
//! ```rust
//! use sort_dtree::analyzer::Analyzer;
//!
//! // A routine under test: plain insertion sort over analyzer items.
//! let tree = Analyzer::new(3)
//!     .analyze(|items| {
//!         for i in 1..items.len() {
//!             let mut j = i;
//!             while j > 0 && items[j - 1] > items[j] {
//!                 items.swap(j - 1, j);
//!                 j -= 1;
//!             }
//!         }
//!     })
//!     .unwrap();
//!
//! assert_eq!(tree.label(tree.root()), "A > B");
//! assert_eq!(tree.stats().result_nodes, 6);
//! assert!((tree.average_path_length() - 8.0 / 3.0).abs() < 1e-9);
//! assert_eq!(tree.pruned_node_count(), 0);
//! ```
//!
//! ## Core Components
//!
//! - **[`analyzer`]**: The search engine and the comparison handler.
//! - **[`path`]**: Path stack and truth set driving the search.
//! - **[`comparison`]**: Comparison facts, negation and normalization.
//! - **[`tree`]**: The resulting decision tree.
//! - **[`metrics`]**: Average number of comparisons, pruned branches, lower bounds.
//! - **[`algorithms`]**: Reference sorting routines.

pub mod algorithms;
pub mod analyzer;
pub mod comparison;
pub mod dot;
pub mod error;
pub mod item;
pub mod metrics;
pub mod path;
pub mod paths;
pub mod tree;
