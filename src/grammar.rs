//! The standard production set, plus the operand-reader building blocks
//! for registering custom productions.
//!
//! Keywords shipped by [`standard_grammar`]:
//!
//! - value combines: `add`/`sum`, `mul`/`product`, `min`, `max`
//! - comparisons: `eq`, `ne`, `lt`, `le`, `gt`, `ge`
//! - logic gates: `not`, `and`, `or`, `xor`, `all`, `any`, `one`
//!
//! Embedding applications that need more register their own productions
//! on top with [`ExpressionRegistry::add`], using the readers exported
//! here to describe operand shapes.

use crate::ast::{CompareOp, DeltaType, Expr, LogicExpr, ValueExpr};
use crate::parser::{Operand, ParseError};
use crate::registry::{ExpressionRegistry, NodeBuilder, OperandReader, RegistryError};
use crate::value::Numeric;

/// Build the ready-made expression registry for a numeric backing.
pub fn standard_grammar<N: Numeric>() -> ExpressionRegistry<N> {
    let mut registry = ExpressionRegistry::new();
    install_standard(&mut registry).expect("standard grammar keywords are well-formed");
    registry
}

fn install_standard<N: Numeric>(registry: &mut ExpressionRegistry<N>) -> Result<(), RegistryError> {
    registry.add(
        &["add", "sum"],
        value_operands(1),
        combine(DeltaType::additive()),
    )?;
    registry.add(
        &["mul", "product"],
        value_operands(1),
        combine(DeltaType::multiplicative()),
    )?;
    registry.add(&["min"], value_operands(1), combine(DeltaType::minimum()))?;
    registry.add(&["max"], value_operands(1), combine(DeltaType::maximum()))?;

    for (keyword, op) in [
        ("eq", CompareOp::Equal),
        ("ne", CompareOp::NotEqual),
        ("lt", CompareOp::LessThan),
        ("le", CompareOp::LessEqual),
        ("gt", CompareOp::GreaterThan),
        ("ge", CompareOp::GreaterEqual),
    ] {
        registry.add(&[keyword], value_pair(), comparison(op))?;
    }

    registry.add(&["not"], logic_single(), unary_gate(LogicExpr::not))?;
    registry.add(&["and"], logic_pair(), binary_gate(LogicExpr::and))?;
    registry.add(&["or"], logic_pair(), binary_gate(LogicExpr::or))?;
    registry.add(&["xor"], logic_pair(), binary_gate(LogicExpr::xor))?;
    registry.add(&["all"], logic_operands(1), multiary_gate(LogicExpr::all))?;
    registry.add(&["any"], logic_operands(1), multiary_gate(LogicExpr::any))?;
    registry.add(&["one"], logic_operands(1), multiary_gate(LogicExpr::one))?;

    Ok(())
}

// ----------------------------------------------------------------------
// Operand readers
// ----------------------------------------------------------------------

/// Read value operands until the closing parenthesis, requiring at least
/// `min` of them.
pub fn value_operands<N: Numeric>(min: usize) -> OperandReader<N> {
    Box::new(move |parser| {
        let start = parser.offset();
        let mut operands = Vec::new();
        while !parser.at_close() && !parser.at_end() {
            operands.push(Operand::Value(parser.value_operand()?));
        }
        if operands.len() < min {
            return Err(ParseError::NotEnoughOperands {
                expected: min,
                found: operands.len(),
                offset: start,
            });
        }
        Ok(operands)
    })
}

/// Read exactly two value operands.
pub fn value_pair<N: Numeric>() -> OperandReader<N> {
    Box::new(|parser| {
        let start = parser.offset();
        let mut operands = Vec::with_capacity(2);
        for _ in 0..2 {
            if parser.at_close() || parser.at_end() {
                return Err(ParseError::NotEnoughOperands {
                    expected: 2,
                    found: operands.len(),
                    offset: start,
                });
            }
            operands.push(Operand::Value(parser.value_operand()?));
        }
        Ok(operands)
    })
}

/// Read exactly one logic operand.
pub fn logic_single<N: Numeric>() -> OperandReader<N> {
    Box::new(|parser| {
        let start = parser.offset();
        if parser.at_close() || parser.at_end() {
            return Err(ParseError::NotEnoughOperands {
                expected: 1,
                found: 0,
                offset: start,
            });
        }
        Ok(vec![Operand::Logic(parser.logic_operand()?)])
    })
}

/// Read exactly two logic operands.
pub fn logic_pair<N: Numeric>() -> OperandReader<N> {
    Box::new(|parser| {
        let start = parser.offset();
        let mut operands = Vec::with_capacity(2);
        for _ in 0..2 {
            if parser.at_close() || parser.at_end() {
                return Err(ParseError::NotEnoughOperands {
                    expected: 2,
                    found: operands.len(),
                    offset: start,
                });
            }
            operands.push(Operand::Logic(parser.logic_operand()?));
        }
        Ok(operands)
    })
}

/// Read logic operands until the closing parenthesis, requiring at least
/// `min` of them.
pub fn logic_operands<N: Numeric>(min: usize) -> OperandReader<N> {
    Box::new(move |parser| {
        let start = parser.offset();
        let mut operands = Vec::new();
        while !parser.at_close() && !parser.at_end() {
            operands.push(Operand::Logic(parser.logic_operand()?));
        }
        if operands.len() < min {
            return Err(ParseError::NotEnoughOperands {
                expected: min,
                found: operands.len(),
                offset: start,
            });
        }
        Ok(operands)
    })
}

// ----------------------------------------------------------------------
// Node builders
// ----------------------------------------------------------------------

fn values<N>(operands: Vec<Operand<N>>) -> Result<Vec<ValueExpr<N>>, ParseError> {
    operands.into_iter().map(Operand::into_value).collect()
}

fn logics<N>(operands: Vec<Operand<N>>) -> Result<Vec<LogicExpr<N>>, ParseError> {
    operands.into_iter().map(Operand::into_logic).collect()
}

/// Fold all operands through `delta`.
pub fn combine<N: Numeric>(delta: DeltaType<N>) -> NodeBuilder<N> {
    Box::new(move |operands| {
        Ok(Expr::Value(ValueExpr::combine(delta, values(operands)?)?))
    })
}

/// Compare two value operands with `op`.
pub fn comparison<N: Numeric>(op: CompareOp) -> NodeBuilder<N> {
    Box::new(move |operands| {
        let mut operands = values(operands)?.into_iter();
        match (operands.next(), operands.next(), operands.next()) {
            (Some(left), Some(right), None) => {
                Ok(Expr::Logic(LogicExpr::compare(op, left, right)))
            }
            _ => Err(ParseError::OperandMismatch),
        }
    })
}

fn unary_gate<N: Numeric>(gate: fn(LogicExpr<N>) -> LogicExpr<N>) -> NodeBuilder<N> {
    Box::new(move |operands| {
        let mut operands = logics(operands)?.into_iter();
        match (operands.next(), operands.next()) {
            (Some(operand), None) => Ok(Expr::Logic(gate(operand))),
            _ => Err(ParseError::OperandMismatch),
        }
    })
}

fn binary_gate<N: Numeric>(
    gate: fn(LogicExpr<N>, LogicExpr<N>) -> LogicExpr<N>,
) -> NodeBuilder<N> {
    Box::new(move |operands| {
        let mut operands = logics(operands)?.into_iter();
        match (operands.next(), operands.next(), operands.next()) {
            (Some(left), Some(right), None) => Ok(Expr::Logic(gate(left, right))),
            _ => Err(ParseError::OperandMismatch),
        }
    })
}

fn multiary_gate<N: Numeric>(
    gate: fn(Vec<LogicExpr<N>>) -> Result<LogicExpr<N>, crate::ast::ExprError>,
) -> NodeBuilder<N> {
    Box::new(move |operands| Ok(Expr::Logic(gate(logics(operands)?)?)))
}
