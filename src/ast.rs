//! # Stat Formula Language - Abstract Syntax Tree
//!
//! This module defines the token model and the expression tree for the
//! compound-stat formula language: the textual form in which content
//! authors write derived stats, compiled once into an immutable tree and
//! evaluated repeatedly against live character data.
//!
//! ## Architecture Overview
//!
//! The AST module is organized into focused submodules:
//!
//! - **[tokens]** - Lexical tokens produced by the scanner
//! - **[expressions]** - Expression nodes (value-producing and
//!   boolean-producing families)
//! - **[operators]** - Comparison predicates and delta types (named
//!   baseline-plus-fold combine operations)
//!
//! ## Grammar
//!
//! Formulas are fully-parenthesized prefix notation:
//!
//! ```text
//! ( keyword operand operand ... )
//! ```
//!
//! where an operand is a nested production, a bare numeric literal, a
//! boolean literal, or a `*`-prefixed stat reference:
//!
//! ```text
//! (add 35 (mul *strength 3))
//! ```
//!
//! Which keywords exist is not fixed by the language: productions are
//! bound to keywords in an expression registry during the content-load
//! phase, and the parser dispatches through that registry. The ready-made
//! registry in [`crate::grammar`] covers the standard surface.
//!
//! ## The Two Node Families
//!
//! - **Value nodes** produce a number: literals, stat references, and
//!   multiary combines keyed by a delta type.
//! - **Logic nodes** produce a boolean: comparisons over value operands
//!   and the gates `not`, `and`, `or`, `xor`, `all`, `any`, `one`, each
//!   with a fixed evaluation order and short-circuit rule.
//!
//! ## Examples
//!
//! ### A derived stat
//!
//! ```text
//! (add *base_damage (mul *strength 2))
//! ```
//!
//! ### A requirement check
//!
//! ```text
//! (all (ge *level 10) (any (eq *class 1) (gt *rage 50)))
//! ```
//!
//! ### Clamping with delta types
//!
//! ```text
//! (max 1 (min *haste 100))
//! ```
pub mod expressions;
pub mod operators;
pub mod tokens;

pub use expressions::{Expr, ExprError, LogicExpr, ValueExpr};
pub use operators::{CompareOp, DeltaType};
pub use tokens::{Token, TokenKind};
