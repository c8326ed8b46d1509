// tests/integration_tests.rs
//
// Full pipeline: registries built once at load time, a script scanned and
// parsed once, the tree evaluated many times against live stat data.

use std::collections::HashMap;
use std::sync::Arc;
use std::thread;

use rust_decimal::Decimal;
use statscript::ast::{CompareOp, Expr, LogicExpr};
use statscript::evaluator::Outcome;
use statscript::grammar::{self, standard_grammar};
use statscript::lexer::Lexer;
use statscript::parser::{Operand, ParseError, Parser};
use statscript::registry::StatRegistry;
use statscript::value::{Numeric, StatId};

fn compile<N: Numeric>(
    script: &str,
    names: &[&str],
) -> (Expr<N>, Vec<StatId>) {
    let grammar = standard_grammar::<N>();
    let mut stats = StatRegistry::new();
    let ids: Vec<StatId> = names
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let id = StatId::new(index as u64);
            stats.add(name, id).unwrap();
            id
        })
        .collect();

    let tokens = Lexer::scan(script).unwrap();
    let expr = Parser::new(&tokens, &grammar, &stats).parse().unwrap();
    (expr, ids)
}

// ============================================================================
// End to End
// ============================================================================

#[test]
fn test_derived_stat_formula() {
    let (expr, ids) = compile::<f64>("(add 35 (mul *strength 3))", &["strength"]);

    let stats: HashMap<StatId, f64> = [(ids[0], 7.0)].into_iter().collect();
    assert_eq!(expr.evaluate(&stats), Outcome::Number(56.0));
}

#[test]
fn test_simple_addition_against_any_stat_set() {
    let (expr, _) = compile::<f64>("(add 1 2)", &[]);

    let empty: HashMap<StatId, f64> = HashMap::new();
    let noisy: HashMap<StatId, f64> = [(StatId::new(9), 100.0)].into_iter().collect();
    assert_eq!(expr.evaluate(&empty), Outcome::Number(3.0));
    assert_eq!(expr.evaluate(&noisy), Outcome::Number(3.0));
}

#[test]
fn test_requirement_check_formula() {
    let (expr, ids) = compile::<f64>(
        "(all (ge *level 10) (any (eq *class 1) (gt *rage 50)))",
        &["level", "class", "rage"],
    );
    let (level, class, rage) = (ids[0], ids[1], ids[2]);

    let qualified: HashMap<StatId, f64> =
        [(level, 12.0), (class, 1.0), (rage, 0.0)].into_iter().collect();
    assert_eq!(expr.evaluate(&qualified), Outcome::Bool(true));

    let low_level: HashMap<StatId, f64> =
        [(level, 9.0), (class, 1.0), (rage, 99.0)].into_iter().collect();
    assert_eq!(expr.evaluate(&low_level), Outcome::Bool(false));

    let wrong_class_but_raging: HashMap<StatId, f64> =
        [(level, 10.0), (class, 2.0), (rage, 51.0)].into_iter().collect();
    assert_eq!(expr.evaluate(&wrong_class_but_raging), Outcome::Bool(true));
}

#[test]
fn test_one_tree_many_stat_sets_without_reparsing() {
    let (expr, ids) = compile::<f64>("(add *base_damage (mul *strength 2))", &["base_damage", "strength"]);
    let (base, strength) = (ids[0], ids[1]);

    for (base_value, strength_value, expected) in
        [(10.0, 5.0, 20.0), (0.0, 0.0, 0.0), (3.0, 100.0, 203.0)]
    {
        let stats: HashMap<StatId, f64> =
            [(base, base_value), (strength, strength_value)].into_iter().collect();
        assert_eq!(expr.evaluate(&stats), Outcome::Number(expected));
    }
}

#[test]
fn test_missing_stat_evaluates_with_the_default() {
    let (expr, _) = compile::<f64>("(add 5 *untracked)", &["untracked"]);
    let stats: HashMap<StatId, f64> = HashMap::new();
    assert_eq!(expr.evaluate(&stats), Outcome::Number(5.0));
}

// ============================================================================
// Numeric Backings
// ============================================================================

#[test]
fn test_integer_backing() {
    let (expr, ids) = compile::<i64>("(add 2 (mul *strength 3))", &["strength"]);
    let stats: HashMap<StatId, i64> = [(ids[0], 4)].into_iter().collect();
    assert_eq!(expr.evaluate(&stats), Outcome::Number(14));
}

#[test]
fn test_integer_backing_saturates_instead_of_overflowing() {
    let (expr, _) = compile::<i64>("(mul 9223372036854775807 2)", &[]);
    let stats: HashMap<StatId, i64> = HashMap::new();
    assert_eq!(expr.evaluate(&stats), Outcome::Number(i64::MAX));
}

#[test]
fn test_exact_backing_has_no_float_drift() {
    let (expr, _) = compile::<Decimal>("(add 0.1 0.2)", &[]);
    let stats: HashMap<StatId, Decimal> = HashMap::new();
    assert_eq!(
        expr.evaluate(&stats),
        Outcome::Number("0.3".parse().unwrap())
    );
}

#[test]
fn test_the_same_script_parses_under_every_backing() {
    let script = "(max 1 (min *haste 100))";
    compile::<f64>(script, &["haste"]);
    compile::<i64>(script, &["haste"]);
    compile::<Decimal>(script, &["haste"]);
}

// ============================================================================
// Custom Productions
// ============================================================================

#[test]
fn test_custom_production_on_top_of_the_standard_grammar() {
    let mut registry = standard_grammar::<f64>();
    // (between x lo hi) <=> (and (ge x lo) (le x hi))
    registry
        .add(
            &["between"],
            grammar::value_operands(3),
            Box::new(|operands| {
                let mut values = operands
                    .into_iter()
                    .map(Operand::into_value)
                    .collect::<Result<Vec<_>, _>>()?;
                if values.len() != 3 {
                    return Err(ParseError::OperandMismatch);
                }
                let hi = values.pop().ok_or(ParseError::OperandMismatch)?;
                let lo = values.pop().ok_or(ParseError::OperandMismatch)?;
                let probe = values.pop().ok_or(ParseError::OperandMismatch)?;
                Ok(Expr::Logic(LogicExpr::and(
                    LogicExpr::compare(CompareOp::GreaterEqual, probe.clone(), lo),
                    LogicExpr::compare(CompareOp::LessEqual, probe, hi),
                )))
            }),
        )
        .unwrap();

    let mut stats = StatRegistry::new();
    stats.add("haste", StatId::new(0)).unwrap();

    let tokens = Lexer::scan("(between *haste 0 100)").unwrap();
    let expr = Parser::new(&tokens, &registry, &stats).parse().unwrap();

    let in_range: HashMap<StatId, f64> = [(StatId::new(0), 55.0)].into_iter().collect();
    let out_of_range: HashMap<StatId, f64> = [(StatId::new(0), 101.0)].into_iter().collect();
    assert_eq!(expr.evaluate(&in_range), Outcome::Bool(true));
    assert_eq!(expr.evaluate(&out_of_range), Outcome::Bool(false));
}

// ============================================================================
// Concurrent Evaluation
// ============================================================================

#[test]
fn test_compiled_trees_evaluate_concurrently() {
    let (expr, ids) = compile::<f64>("(add *strength (mul *agility 2))", &["strength", "agility"]);
    let (strength, agility) = (ids[0], ids[1]);
    let expr = Arc::new(expr);

    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let expr = Arc::clone(&expr);
            thread::spawn(move || {
                let scale = worker as f64;
                let stats: HashMap<StatId, f64> =
                    [(strength, 1.0 * scale), (agility, 2.0 * scale)].into_iter().collect();
                expr.evaluate(&stats)
            })
        })
        .collect();

    for (worker, handle) in handles.into_iter().enumerate() {
        let scale = worker as f64;
        assert_eq!(handle.join().unwrap(), Outcome::Number(5.0 * scale));
    }
}
