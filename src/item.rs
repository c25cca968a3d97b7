//! Instrumented operands.
//!
//! An [`Item`] is what a sorting routine under analysis actually sorts. It
//! carries no value: every `<`, `>`, `==` and `!=` between two items is routed
//! to the running analysis, which decides the answer. Items are `Copy`, so
//! routines can move, swap and duplicate them freely.
//!
//! `<=`, `>=` and [`PartialOrd::partial_cmp`] are not intercepted: using them
//! raises an [`AnalyzeError::UnsupportedOperator`] fault, which ends the run.
//!
//! [`AnalyzeError::UnsupportedOperator`]: crate::error::AnalyzeError::UnsupportedOperator

use std::cmp::Ordering;
use std::fmt::{Debug, Display, Formatter};

use crate::analyzer::Search;
use crate::comparison::{Comparison, Operator, Symbol};

#[derive(Copy, Clone)]
pub struct Item<'a> {
    symbol: Symbol,
    search: &'a Search,
}

impl<'a> Item<'a> {
    pub(crate) fn new(symbol: Symbol, search: &'a Search) -> Self {
        Self { symbol, search }
    }

    /// Fresh items `A`, `B`, `C`, ... in their canonical initial order.
    pub(crate) fn sequence(count: u32, search: &'a Search) -> Vec<Self> {
        Symbol::sequence(count).map(|s| Item::new(s, search)).collect()
    }

    pub fn symbol(&self) -> Symbol {
        self.symbol
    }

    /// Ask the analysis whether `self op other` holds.
    pub fn compare(&self, op: Operator, other: &Item<'_>) -> bool {
        self.search.compare(Comparison::new(self.symbol, other.symbol, op))
    }
}

#[allow(clippy::partialeq_ne_impl)]
impl PartialEq for Item<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.compare(Operator::Eq, other)
    }

    fn ne(&self, other: &Self) -> bool {
        self.compare(Operator::Ne, other)
    }
}

impl PartialOrd for Item<'_> {
    fn partial_cmp(&self, _other: &Self) -> Option<Ordering> {
        self.search.reject("partial_cmp")
    }

    fn lt(&self, other: &Self) -> bool {
        self.compare(Operator::Lt, other)
    }

    fn gt(&self, other: &Self) -> bool {
        self.compare(Operator::Gt, other)
    }

    fn le(&self, _other: &Self) -> bool {
        self.search.reject("<=")
    }

    fn ge(&self, _other: &Self) -> bool {
        self.search.reject(">=")
    }
}

impl Debug for Item<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Item({})", self.symbol)
    }
}

impl Display for Item<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol)
    }
}
