use std::fmt::{Display, Formatter};

use crate::comparison::Comparison;

/// Errors raised while analyzing a sorting routine.
///
/// All analysis faults are fatal: the routine under test broke the contract
/// (determinism over distinct, totally ordered values), so no tree is produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalyzeError {
    /// Neither outcome of the comparison is consistent with the current path.
    Contradiction { comparison: Comparison },
    /// The routine used an operator the analyzer does not intercept (`<=`, `>=`, `partial_cmp`).
    UnsupportedOperator(String),
    /// While replaying a validated prefix, the routine asked a different comparison.
    Nondeterministic {
        position: usize,
        expected: Comparison,
        found: Comparison,
    },
    /// The routine returned before consuming the whole replay prefix.
    IncompleteReplay { remaining: usize },
    /// A single run made more comparisons than allowed.
    DepthLimit { limit: usize },
    /// More items than there are symbols to name them.
    TooManyItems { size: usize },
    /// Malformed textual input.
    Parse(String),
}

impl Display for AnalyzeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalyzeError::Contradiction { comparison } => {
                write!(f, "sorting routine is not valid: no consistent outcome for '{}'", comparison)
            }
            AnalyzeError::UnsupportedOperator(op) => write!(f, "operator '{}' is not supported", op),
            AnalyzeError::Nondeterministic { position, expected, found } => write!(
                f,
                "sorting routine is not deterministic: comparison #{} was '{}', previously '{}'",
                position, found, expected
            ),
            AnalyzeError::IncompleteReplay { remaining } => write!(
                f,
                "sorting routine is not deterministic: returned with {} replayed outcomes left",
                remaining
            ),
            AnalyzeError::DepthLimit { limit } => write!(f, "more than {} comparisons on a single path", limit),
            AnalyzeError::TooManyItems { size } => write!(f, "cannot analyze {} items", size),
            AnalyzeError::Parse(msg) => write!(f, "parse error: {}", msg),
        }
    }
}

impl std::error::Error for AnalyzeError {}
