use std::fmt;

use crate::value::Numeric;

/// Comparison predicate applied by a `Compare` node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// `eq`
    Equal,
    /// `ne`
    NotEqual,
    /// `lt`
    LessThan,
    /// `le`
    LessEqual,
    /// `gt`
    GreaterThan,
    /// `ge`
    GreaterEqual,
}

impl CompareOp {
    pub fn apply<N: Numeric>(self, left: N, right: N) -> bool {
        match self {
            CompareOp::Equal => left == right,
            CompareOp::NotEqual => left != right,
            CompareOp::LessThan => left < right,
            CompareOp::LessEqual => left <= right,
            CompareOp::GreaterThan => left > right,
            CompareOp::GreaterEqual => left >= right,
        }
    }
}

/// A named associative combine operation with a baseline value.
///
/// A multiary value node folds its operands left-to-right into an
/// accumulator that starts at the baseline and is updated through `fold`
/// after each operand. The shipped delta types cover the standard stat
/// aggregations:
///
/// | name  | baseline | fold |
/// |-------|----------|------|
/// | `add` | zero     | sum  |
/// | `mul` | one      | product |
/// | `min` | maximum  | lesser of |
/// | `max` | minimum  | greater of |
#[derive(Debug, Clone, Copy)]
pub struct DeltaType<N> {
    name: &'static str,
    baseline: N,
    fold: fn(N, N) -> N,
}

impl<N: Numeric> DeltaType<N> {
    pub fn new(name: &'static str, baseline: N, fold: fn(N, N) -> N) -> Self {
        DeltaType {
            name,
            baseline,
            fold,
        }
    }

    pub fn additive() -> Self {
        DeltaType::new("add", N::ZERO, N::add)
    }

    pub fn multiplicative() -> Self {
        DeltaType::new("mul", N::ONE, N::mul)
    }

    pub fn minimum() -> Self {
        DeltaType::new("min", N::MAX, lesser)
    }

    pub fn maximum() -> Self {
        DeltaType::new("max", N::MIN, greater)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn baseline(&self) -> N {
        self.baseline
    }

    pub fn fold(&self, accumulator: N, operand: N) -> N {
        (self.fold)(accumulator, operand)
    }
}

// Delta types are identified by name; the fold function pointer itself is
// not part of the identity.
impl<N: PartialEq> PartialEq for DeltaType<N> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.baseline == other.baseline
    }
}

impl<N> fmt::Display for DeltaType<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

fn lesser<N: Numeric>(accumulator: N, operand: N) -> N {
    if operand < accumulator {
        operand
    } else {
        accumulator
    }
}

fn greater<N: Numeric>(accumulator: N, operand: N) -> N {
    if operand > accumulator {
        operand
    } else {
        accumulator
    }
}
