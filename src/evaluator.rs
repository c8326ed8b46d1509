use std::collections::HashMap;

use crate::ast::{Expr, LogicExpr, ValueExpr};
use crate::value::{Numeric, StatId};

/// Read-only source of current stat values, queried by identity during
/// evaluation. The engine requires no mutation contract; a stat set may
/// be shared read-only across threads.
pub trait StatSet<N: Numeric> {
    /// Current value of `stat`, or `None` when the stat set does not
    /// carry it. Absent stats evaluate as [`Numeric::ZERO`].
    fn stat_value(&self, stat: StatId) -> Option<N>;
}

impl<N: Numeric> StatSet<N> for HashMap<StatId, N> {
    fn stat_value(&self, stat: StatId) -> Option<N> {
        self.get(&stat).copied()
    }
}

impl<N: Numeric, S: StatSet<N> + ?Sized> StatSet<N> for &S {
    fn stat_value(&self, stat: StatId) -> Option<N> {
        (**self).stat_value(stat)
    }
}

/// Result of evaluating a root expression: one of the two node families'
/// outputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome<N> {
    Number(N),
    Bool(bool),
}

impl<N: Numeric> Outcome<N> {
    pub fn as_number(&self) -> Option<N> {
        match self {
            Outcome::Number(value) => Some(*value),
            Outcome::Bool(_) => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Outcome::Bool(value) => Some(*value),
            Outcome::Number(_) => None,
        }
    }
}

impl<N: Numeric> Expr<N> {
    /// Evaluate the tree against a stat set.
    ///
    /// Pure and infallible: no side effects, no mutation of the stat
    /// set, and a defined result for every input, so per-frame
    /// evaluation never needs an error path.
    pub fn evaluate<S: StatSet<N>>(&self, stats: &S) -> Outcome<N> {
        match self {
            Expr::Value(value) => Outcome::Number(value.evaluate(stats)),
            Expr::Logic(logic) => Outcome::Bool(logic.evaluate(stats)),
        }
    }
}

impl<N: Numeric> ValueExpr<N> {
    /// Evaluate a value-producing node to its number.
    ///
    /// A combine node folds every operand, left to right, from the delta
    /// type's baseline; there is no short-circuit, since a fold result
    /// may depend on all operands.
    pub fn evaluate<S: StatSet<N>>(&self, stats: &S) -> N {
        match self {
            ValueExpr::Literal(value) => *value,
            ValueExpr::Stat(stat) => stats.stat_value(*stat).unwrap_or(N::ZERO),
            ValueExpr::Combine { delta, operands } => {
                let mut accumulator = delta.baseline();
                for operand in operands {
                    accumulator = delta.fold(accumulator, operand.evaluate(stats));
                }
                accumulator
            }
        }
    }
}

impl<N: Numeric> LogicExpr<N> {
    /// Evaluate a boolean-producing node.
    ///
    /// Operand order and short-circuit behavior are part of the node
    /// contract:
    ///
    /// - `And`/`Or` evaluate the right operand only when the left does
    ///   not decide the result.
    /// - `Xor` always evaluates both operands.
    /// - `All` stops at the first false, `Any` at the first true.
    /// - `One` must keep scanning after a first true (a second true is
    ///   what falsifies it) and stops only when one is found.
    pub fn evaluate<S: StatSet<N>>(&self, stats: &S) -> bool {
        match self {
            LogicExpr::Literal(value) => *value,
            LogicExpr::Compare { op, left, right } => {
                let left = left.evaluate(stats);
                let right = right.evaluate(stats);
                op.apply(left, right)
            }
            LogicExpr::Not(operand) => !operand.evaluate(stats),
            LogicExpr::And(left, right) => left.evaluate(stats) && right.evaluate(stats),
            LogicExpr::Or(left, right) => left.evaluate(stats) || right.evaluate(stats),
            LogicExpr::Xor(left, right) => {
                let left = left.evaluate(stats);
                let right = right.evaluate(stats);
                left != right
            }
            LogicExpr::All(operands) => {
                for operand in operands {
                    if !operand.evaluate(stats) {
                        return false;
                    }
                }
                true
            }
            LogicExpr::Any(operands) => {
                for operand in operands {
                    if operand.evaluate(stats) {
                        return true;
                    }
                }
                false
            }
            LogicExpr::One(operands) => {
                let mut seen_true = false;
                for operand in operands {
                    if operand.evaluate(stats) {
                        if seen_true {
                            return false;
                        }
                        seen_true = true;
                    }
                }
                seen_true
            }
        }
    }
}
