use thiserror::Error;

use crate::ast::{CompareOp, DeltaType};
use crate::value::{Numeric, StatId};

/// Construction-time failure of a multiary node.
///
/// Surfaced at load time when content registration wires up a production,
/// never during evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ExprError {
    #[error("a multiary node requires at least one operand")]
    EmptyOperands,
}

/// A compiled formula: either a value-producing or a boolean-producing
/// tree.
///
/// Trees are immutable, hold no reference back to the registries or the
/// scanner, and are `Send + Sync`, so one compiled formula can be
/// evaluated concurrently from many threads against independent stat
/// sets.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr<N> {
    Value(ValueExpr<N>),
    Logic(LogicExpr<N>),
}

/// A node that produces a numeric result.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueExpr<N> {
    /// Literal constant
    ///
    /// # Example
    /// ```text
    /// 35
    /// ```
    Literal(N),

    /// Current value of a stat, read from the stat set at evaluation time
    ///
    /// # Example
    /// ```text
    /// *strength
    /// ```
    Stat(StatId),

    /// Multiary combine, folding every operand through a delta type
    ///
    /// # Example
    /// ```text
    /// (add 35 (mul *strength 3))
    /// ```
    Combine {
        delta: DeltaType<N>,
        operands: Vec<ValueExpr<N>>,
    },
}

/// A node that produces a boolean result.
#[derive(Debug, Clone, PartialEq)]
pub enum LogicExpr<N> {
    /// Boolean literal (`true` / `false`)
    Literal(bool),

    /// Comparison of two value operands
    ///
    /// # Example
    /// ```text
    /// (ge *level 10)
    /// ```
    Compare {
        op: CompareOp,
        left: Box<ValueExpr<N>>,
        right: Box<ValueExpr<N>>,
    },

    /// Negation
    Not(Box<LogicExpr<N>>),

    /// Binary conjunction; the right operand is evaluated only if the
    /// left is true
    And(Box<LogicExpr<N>>, Box<LogicExpr<N>>),

    /// Binary disjunction; the right operand is evaluated only if the
    /// left is false
    Or(Box<LogicExpr<N>>, Box<LogicExpr<N>>),

    /// Exclusive or; both operands are always evaluated
    Xor(Box<LogicExpr<N>>, Box<LogicExpr<N>>),

    /// N-ary conjunction, stopping at the first false operand
    All(Vec<LogicExpr<N>>),

    /// N-ary disjunction, stopping at the first true operand
    Any(Vec<LogicExpr<N>>),

    /// Exactly-one-true, stopping at the second true operand
    One(Vec<LogicExpr<N>>),
}

impl<N: Numeric> ValueExpr<N> {
    /// Build a multiary combine node. Rejects an empty operand list: an
    /// empty combine would silently evaluate to the baseline and hide
    /// authoring mistakes.
    pub fn combine(delta: DeltaType<N>, operands: Vec<ValueExpr<N>>) -> Result<Self, ExprError> {
        if operands.is_empty() {
            return Err(ExprError::EmptyOperands);
        }
        Ok(ValueExpr::Combine { delta, operands })
    }
}

impl<N: Numeric> LogicExpr<N> {
    pub fn compare(op: CompareOp, left: ValueExpr<N>, right: ValueExpr<N>) -> Self {
        LogicExpr::Compare {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(operand: LogicExpr<N>) -> Self {
        LogicExpr::Not(Box::new(operand))
    }

    pub fn and(left: LogicExpr<N>, right: LogicExpr<N>) -> Self {
        LogicExpr::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: LogicExpr<N>, right: LogicExpr<N>) -> Self {
        LogicExpr::Or(Box::new(left), Box::new(right))
    }

    pub fn xor(left: LogicExpr<N>, right: LogicExpr<N>) -> Self {
        LogicExpr::Xor(Box::new(left), Box::new(right))
    }

    pub fn all(operands: Vec<LogicExpr<N>>) -> Result<Self, ExprError> {
        if operands.is_empty() {
            return Err(ExprError::EmptyOperands);
        }
        Ok(LogicExpr::All(operands))
    }

    pub fn any(operands: Vec<LogicExpr<N>>) -> Result<Self, ExprError> {
        if operands.is_empty() {
            return Err(ExprError::EmptyOperands);
        }
        Ok(LogicExpr::Any(operands))
    }

    pub fn one(operands: Vec<LogicExpr<N>>) -> Result<Self, ExprError> {
        if operands.is_empty() {
            return Err(ExprError::EmptyOperands);
        }
        Ok(LogicExpr::One(operands))
    }
}
