//! Compile and evaluate formulas against a JSON stat set

use std::collections::HashMap;

use rust_decimal::Decimal;

use super::CliError;
use crate::ast::{Token, TokenKind};
use crate::evaluator::Outcome;
use crate::grammar::standard_grammar;
use crate::lexer::Lexer;
use crate::parser::Parser;
use crate::registry::StatRegistry;
use crate::value::{Numeric, StatId};

/// Numeric backing to run the engine with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum NumericMode {
    /// `f64`
    #[default]
    Float,
    /// `i64`
    Int,
    /// `rust_decimal::Decimal`
    Exact,
}

/// Options for the eval command
#[derive(Debug, Clone, Default)]
pub struct EvalOptions {
    /// The formula to compile
    pub formula: String,
    /// JSON object of stat name -> value
    pub stats: Option<String>,
    /// Numeric backing
    pub mode: NumericMode,
    /// Only validate syntax, don't evaluate
    pub syntax_only: bool,
}

/// Result of an eval operation
#[derive(Debug)]
pub enum EvalResult {
    /// Syntax validation passed
    SyntaxValid,
    /// Formula evaluated successfully, rendered as text
    Value(String),
}

/// Scan a formula into its token stream.
pub fn execute_scan(formula: &str) -> Result<Vec<Token>, CliError> {
    Ok(Lexer::scan(formula)?)
}

/// Execute an eval operation.
pub fn execute_eval(options: &EvalOptions) -> Result<EvalResult, CliError> {
    let tokens = Lexer::scan(&options.formula)?;

    if options.syntax_only {
        let stats = syntax_stat_registry(&tokens)?;
        match options.mode {
            NumericMode::Float => parse_only::<f64>(&tokens, &stats)?,
            NumericMode::Int => parse_only::<i64>(&tokens, &stats)?,
            NumericMode::Exact => parse_only::<Decimal>(&tokens, &stats)?,
        }
        return Ok(EvalResult::SyntaxValid);
    }

    let json = options.stats.as_ref().ok_or(CliError::NoStats)?;
    let document: serde_json::Value = serde_json::from_str(json)?;
    let object = document.as_object().ok_or(CliError::StatSetShape)?;

    let rendered = match options.mode {
        NumericMode::Float => evaluate_with(&tokens, object, serde_json::Number::as_f64)?,
        NumericMode::Int => evaluate_with(&tokens, object, serde_json::Number::as_i64)?,
        NumericMode::Exact => {
            evaluate_with::<Decimal>(&tokens, object, |number| number.to_string().parse().ok())?
        }
    };
    Ok(EvalResult::Value(rendered))
}

/// For syntax checking no stat set exists yet, so every identifier that
/// follows a `*` is registered on the fly.
fn syntax_stat_registry(tokens: &[Token]) -> Result<StatRegistry, CliError> {
    let mut stats = StatRegistry::new();
    let mut next_id = 0u64;
    let mut after_star = false;
    for token in tokens {
        match &token.kind {
            TokenKind::Star => after_star = true,
            TokenKind::Identifier(name) if after_star => {
                after_star = false;
                if stats.resolve(name).is_none() {
                    stats.add(name, StatId::new(next_id))?;
                    next_id += 1;
                }
            }
            _ => after_star = false,
        }
    }
    Ok(stats)
}

fn parse_only<N: Numeric>(tokens: &[Token], stats: &StatRegistry) -> Result<(), CliError> {
    let expressions = standard_grammar::<N>();
    Parser::new(tokens, &expressions, stats).parse()?;
    Ok(())
}

fn evaluate_with<N: Numeric>(
    tokens: &[Token],
    object: &serde_json::Map<String, serde_json::Value>,
    convert: impl Fn(&serde_json::Number) -> Option<N>,
) -> Result<String, CliError> {
    let expressions = standard_grammar::<N>();
    let mut stats = StatRegistry::new();
    let mut values: HashMap<StatId, N> = HashMap::new();

    for (index, (name, value)) in object.iter().enumerate() {
        let number = value
            .as_number()
            .and_then(|number| convert(number))
            .ok_or_else(|| CliError::NonNumericStat(name.clone()))?;
        let id = StatId::new(index as u64);
        stats.add(name, id)?;
        values.insert(id, number);
    }

    let root = Parser::new(tokens, &expressions, &stats).parse()?;
    Ok(match root.evaluate(&values) {
        Outcome::Number(value) => value.to_string(),
        Outcome::Bool(value) => value.to_string(),
    })
}
