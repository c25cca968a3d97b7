//! Exhaustive exploration of a sorting routine's comparison outcomes.
//!
//! The routine under test is a black box: it receives a slice of [`Item`]s and
//! reorders it, asking `<`, `>`, `==` or `!=` between pairs of items along the
//! way. Each query is routed to the running analysis, which picks the outcome. The
//! analyzer enumerates every consistent sequence of outcomes by depth-first
//! search and records the resulting [`DecisionTree`].
//!
//! # Replay instead of suspension
//!
//! The routine cannot be paused at a comparison and resumed later, so after
//! every backtrack it is run again from scratch on fresh items. The outcomes of
//! the frames still on the [`PathStack`] are replayed by position
//! ([`Mode::StateRestoration`]); once they are exhausted the search continues
//! exploring ([`Mode::Exploratory`]). This is sound because the routine must be
//! deterministic: the same first `k` outcomes always lead to the same `k+1`-th
//! comparison.
//!
//! # Pruning
//!
//! Exploration always tries `true` before `false`. An outcome is taken only if
//! its fact does not contradict a fact already on the path; if only one
//! outcome is consistent, the other branch of the node stays empty and counts
//! as pruned.
//!
//! # Examples
//!
//! ```
//! use sort_dtree::algorithms::bubble_sort;
//! use sort_dtree::analyzer::Analyzer;
//!
//! let tree = Analyzer::new(3).analyze(|items| bubble_sort(items)).unwrap();
//! assert_eq!(tree.label(tree.root()), "A > B");
//! assert_eq!(tree.pruned_node_count(), 2);
//! ```

use std::cell::RefCell;
use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};

use log::{debug, error, info};

use crate::comparison::{Comparison, Symbol};
use crate::error::AnalyzeError;
use crate::item::Item;
use crate::path::{Frame, PathStack};
use crate::tree::DecisionTree;

/// Settings of an analysis.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Number of items handed to the routine.
    pub size: usize,
    /// Maximum number of comparisons in a single run of the routine (unbounded if `None`).
    pub max_depth: Option<usize>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            size: 3,
            max_depth: None,
        }
    }
}

/// How comparisons are currently being answered.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Mode {
    /// Choose outcomes, preferring `true`, and push a frame per comparison.
    Exploratory,
    /// Replay recorded outcomes to bring the routine back to the current path.
    StateRestoration,
}

#[derive(Debug)]
struct SearchState {
    mode: Mode,
    stack: PathStack,
    replay: VecDeque<bool>,
    /// Comparisons made during the current run.
    position: usize,
    max_depth: Option<usize>,
    /// First fault raised during the current run.
    fault: Option<AnalyzeError>,
}

/// Mutable state of one analysis, shared by all items of a run.
///
/// This is the handle behind every [`Item`]: the routine never sees it
/// directly, its comparisons reach it through the operator overloads.
#[derive(Debug)]
pub(crate) struct Search {
    state: RefCell<SearchState>,
}

/// Unwind payload raised out of the routine once a fault is latched.
struct Fault;

impl Search {
    fn new(config: &AnalyzerConfig) -> Self {
        Self {
            state: RefCell::new(SearchState {
                mode: Mode::Exploratory,
                stack: PathStack::new(),
                replay: VecDeque::new(),
                position: 0,
                max_depth: config.max_depth,
                fault: None,
            }),
        }
    }

    #[cfg(test)]
    fn mode(&self) -> Mode {
        self.state.borrow().mode
    }

    /// Answer a comparison asked by the routine.
    ///
    /// On a fault the routine is unwound back into [`Analyzer::analyze`], so
    /// it cannot keep running on made-up answers.
    pub(crate) fn compare(&self, comparison: Comparison) -> bool {
        match self.answer(comparison) {
            Some(outcome) => outcome,
            None => Self::abort(),
        }
    }

    /// Record the use of an operator that cannot be intercepted and abort the run.
    pub(crate) fn reject(&self, op: &str) -> ! {
        self.latch(AnalyzeError::UnsupportedOperator(op.to_string()));
        Self::abort()
    }

    /// Outcome of `comparison`, or `None` once a fault is latched.
    fn answer(&self, comparison: Comparison) -> Option<bool> {
        let mut state = self.state.borrow_mut();
        if state.fault.is_some() {
            return None;
        }
        match state.answer(comparison) {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                state.latch(e);
                None
            }
        }
    }

    /// Keep the first fault of the run.
    fn latch(&self, e: AnalyzeError) {
        let mut state = self.state.borrow_mut();
        if state.fault.is_none() {
            state.latch(e);
        }
    }

    fn abort() -> ! {
        // resume_unwind does not run the panic hook.
        panic::resume_unwind(Box::new(Fault))
    }

    fn begin_run(&self) {
        self.state.borrow_mut().position = 0;
    }

    /// Record the leaf reached by the last run and move to the next path.
    ///
    /// Returns `false` once the whole tree has been explored.
    fn finish_run(&self, order: Vec<Symbol>) -> Result<bool, AnalyzeError> {
        let mut state = self.state.borrow_mut();
        if let Some(e) = state.fault.take() {
            return Err(e);
        }
        if state.mode == Mode::StateRestoration && !state.replay.is_empty() {
            return Err(AnalyzeError::IncompleteReplay {
                remaining: state.replay.len(),
            });
        }
        state.stack.add_result(order);
        Ok(state.prepare_next_path())
    }

    fn into_tree(self, size: usize) -> DecisionTree {
        self.state
            .into_inner()
            .stack
            .into_tree(size)
            .expect("every analysis records at least one result")
    }
}

impl SearchState {
    fn answer(&mut self, comparison: Comparison) -> Result<bool, AnalyzeError> {
        let position = self.position;
        if let Some(limit) = self.max_depth {
            if position >= limit {
                return Err(AnalyzeError::DepthLimit { limit });
            }
        }
        self.position += 1;

        if self.mode == Mode::StateRestoration {
            if let Some(outcome) = self.replay.pop_front() {
                let expected = self.stack.frames()[position].comparison;
                if expected != comparison {
                    return Err(AnalyzeError::Nondeterministic {
                        position,
                        expected,
                        found: comparison,
                    });
                }
                return Ok(outcome);
            }
            debug!("replay finished after {} comparisons, exploring", position);
            self.mode = Mode::Exploratory;
        }
        self.explore(comparison)
    }

    fn explore(&mut self, comparison: Comparison) -> Result<bool, AnalyzeError> {
        for outcome in [true, false] {
            if self.stack.truths().admits(&comparison.truth(outcome)) {
                let node = self.stack.new_comparison_node(comparison);
                self.stack.push(Frame::new(comparison, outcome, node));
                return Ok(outcome);
            }
        }
        Err(AnalyzeError::Contradiction { comparison })
    }

    /// Backtrack to the deepest `true` frame whose `false` branch is consistent,
    /// flip it, and arm the replay of the path leading to it.
    fn prepare_next_path(&mut self) -> bool {
        while let Some(top) = self.stack.pop() {
            if !top.outcome {
                continue;
            }
            let flipped = top.flipped();
            if !self.stack.is_consistent(&flipped) {
                debug!("pruned: {} cannot be false at depth {}", top.comparison, self.stack.len());
                continue;
            }
            self.stack.push(flipped);
            self.replay = self.stack.outcomes().into();
            self.mode = Mode::StateRestoration;
            debug!("backtrack: {} = false at depth {}", top.comparison, self.stack.len() - 1);
            return true;
        }
        false
    }

    fn latch(&mut self, e: AnalyzeError) {
        error!("{}", e);
        self.fault = Some(e);
    }
}

/// Builds decision trees of sorting routines.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalyzerConfig,
}

impl Analyzer {
    /// Analyzer for arrays of `size` items, without a depth limit.
    pub fn new(size: usize) -> Self {
        Self::with_config(AnalyzerConfig {
            size,
            ..AnalyzerConfig::default()
        })
    }

    pub fn with_config(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Run `routine` along every consistent sequence of comparison outcomes and
    /// return the resulting decision tree.
    ///
    /// The routine must reorder the items in place using only `<`, `>`, `==`
    /// and `!=`, be deterministic in the outcomes it is fed, and terminate.
    /// A run that breaks these rules is cut short at the offending comparison
    /// and its fault is returned. Panics raised by the routine itself propagate.
    pub fn analyze<F>(&self, mut routine: F) -> Result<DecisionTree, AnalyzeError>
    where
        F: FnMut(&mut [Item<'_>]),
    {
        let size = self.config.size;
        info!("Analyzing routine on {} items", size);

        let count = u32::try_from(size).map_err(|_| AnalyzeError::TooManyItems { size })?;

        let search = Search::new(&self.config);
        let mut runs = 0usize;
        loop {
            let mut items = Item::sequence(count, &search);
            search.begin_run();
            let run = panic::catch_unwind(AssertUnwindSafe(|| routine(items.as_mut_slice())));
            if let Err(payload) = run {
                if !payload.is::<Fault>() {
                    panic::resume_unwind(payload);
                }
            }
            runs += 1;

            let order = items.iter().map(Item::symbol).collect();
            if !search.finish_run(order)? {
                break;
            }
        }

        let tree = search.into_tree(size);
        info!("Explored {} paths, tree has {} nodes", runs, tree.num_nodes());
        Ok(tree)
    }
}
