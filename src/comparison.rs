//! Comparison facts between symbolic operands.
//!
//! A [`Comparison`] is a single query `lhs op rhs` asked by a sorting routine.
//! Two comparisons are equal when they denote the same fact, regardless of the
//! order in which the operands were written: `A < B` and `B > A` are the same
//! comparison, and so are `A != B` and `B != A`.
//!
//! # Examples
//!
//! ```
//! use sort_dtree::comparison::{Comparison, Operator, Symbol};
//!
//! let a = Symbol::new(0);
//! let b = Symbol::new(1);
//!
//! let c = Comparison::new(a, b, Operator::Lt);
//! assert_eq!(c.to_string(), "A < B");
//! assert_eq!(c, Comparison::new(b, a, Operator::Gt));
//! assert_eq!(c.negate(), Comparison::new(a, b, Operator::Gt));
//! ```

use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::error::AnalyzeError;

/// Symbolic identity of an operand.
///
/// Symbols are ordered by their index, which fixes the total order used to
/// normalize comparisons. They are displayed as `A`, `B`, ..., `Z`, `AA`, `AB`, ...
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Symbol(u32);

impl Symbol {
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Return the 0-based index of the symbol.
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Symbols `A`, `B`, `C`, ... for an array of the given size.
    pub fn sequence(count: u32) -> impl Iterator<Item = Symbol> {
        (0..count).map(Symbol)
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // Bijective base-26: 0 -> A, 25 -> Z, 26 -> AA.
        let mut n = self.0 as u64 + 1;
        let mut letters = Vec::new();
        while n > 0 {
            n -= 1;
            letters.push(b'A' + (n % 26) as u8);
            n /= 26;
        }
        letters.reverse();
        write!(f, "{}", String::from_utf8_lossy(&letters))
    }
}

impl FromStr for Symbol {
    type Err = AnalyzeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(AnalyzeError::Parse(format!("invalid symbol '{}'", s)));
        }
        let mut n: u64 = 0;
        for b in s.bytes() {
            n = n * 26 + (b - b'A') as u64 + 1;
            if n > u32::MAX as u64 {
                return Err(AnalyzeError::Parse(format!("symbol '{}' is too long", s)));
            }
        }
        Ok(Symbol((n - 1) as u32))
    }
}

/// Operators a sorting routine may use between two operands.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Operator {
    Lt,
    Gt,
    Eq,
    Ne,
}

impl Operator {
    /// Negation under distinct, totally ordered values: `<` and `>`, `==` and `!=`.
    pub const fn negate(self) -> Self {
        match self {
            Operator::Lt => Operator::Gt,
            Operator::Gt => Operator::Lt,
            Operator::Eq => Operator::Ne,
            Operator::Ne => Operator::Eq,
        }
    }

    pub const fn is_relational(self) -> bool {
        matches!(self, Operator::Lt | Operator::Gt)
    }

    /// Operator to use after swapping the operands.
    pub const fn converse(self) -> Self {
        if self.is_relational() {
            self.negate()
        } else {
            self
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Operator::Lt => "<",
            Operator::Gt => ">",
            Operator::Eq => "==",
            Operator::Ne => "!=",
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Operator {
    type Err = AnalyzeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "<" => Ok(Operator::Lt),
            ">" => Ok(Operator::Gt),
            "==" => Ok(Operator::Eq),
            "!=" => Ok(Operator::Ne),
            _ => Err(AnalyzeError::UnsupportedOperator(s.to_string())),
        }
    }
}

/// A single comparison `lhs op rhs`.
///
/// Equality and hashing go through [`Comparison::normalize`], so the same fact
/// written in either direction compares equal. The original operand order is
/// kept for display.
#[derive(Debug, Copy, Clone)]
pub struct Comparison {
    lhs: Symbol,
    rhs: Symbol,
    op: Operator,
}

impl Comparison {
    pub const fn new(lhs: Symbol, rhs: Symbol, op: Operator) -> Self {
        Self { lhs, rhs, op }
    }

    pub const fn lhs(&self) -> Symbol {
        self.lhs
    }
    pub const fn rhs(&self) -> Symbol {
        self.rhs
    }
    pub const fn op(&self) -> Operator {
        self.op
    }

    /// The opposite fact, keeping the operand order.
    pub const fn negate(self) -> Self {
        Self {
            lhs: self.lhs,
            rhs: self.rhs,
            op: self.op.negate(),
        }
    }

    /// Equivalent comparison with operands in ascending symbol order.
    pub fn normalize(self) -> Self {
        if self.lhs > self.rhs {
            Self {
                lhs: self.rhs,
                rhs: self.lhs,
                op: self.op.converse(),
            }
        } else {
            self
        }
    }

    /// Fact established by answering this comparison with `outcome`.
    pub fn truth(self, outcome: bool) -> Self {
        if outcome {
            self
        } else {
            self.negate()
        }
    }

    /// Evaluate the comparison against a concrete ranking of symbols.
    pub fn holds(&self, rank: impl Fn(Symbol) -> usize) -> bool {
        let (l, r) = (rank(self.lhs), rank(self.rhs));
        match self.op {
            Operator::Lt => l < r,
            Operator::Gt => l > r,
            Operator::Eq => l == r,
            Operator::Ne => l != r,
        }
    }

    fn key(&self) -> (Symbol, Symbol, Operator) {
        let n = self.normalize();
        (n.lhs, n.rhs, n.op)
    }
}

impl PartialEq for Comparison {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Comparison {}

impl Hash for Comparison {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl Display for Comparison {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.lhs, self.op, self.rhs)
    }
}

impl FromStr for Comparison {
    type Err = AnalyzeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split_whitespace().collect();
        match parts.as_slice() {
            [lhs, op, rhs] => Ok(Comparison::new(lhs.parse()?, rhs.parse()?, op.parse()?)),
            _ => Err(AnalyzeError::Parse(format!("expected 'X op Y', got '{}'", s))),
        }
    }
}
