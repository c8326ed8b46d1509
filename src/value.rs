use std::fmt;

use rust_decimal::Decimal;

/// The numeric backing type a formula engine is instantiated with.
///
/// The scanner is backing-agnostic (numeric lexemes stay text until parse
/// time), so one grammar serves every backing. The engine ships three:
///
/// - `i64` for classic whole-number stat systems
/// - `f64` for fractional multipliers
/// - [`Decimal`] when fractional bonuses must not drift
///
/// # Examples
///
/// ```
/// use statscript::Numeric;
///
/// assert_eq!(i64::parse_literal("35"), Some(35));
/// assert_eq!(i64::parse_literal("3.5"), None);
/// assert_eq!(f64::parse_literal("3.5"), Some(3.5));
/// ```
pub trait Numeric:
    Copy + PartialEq + PartialOrd + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    /// Additive baseline, and the value a missing stat resolves to.
    const ZERO: Self;

    /// Multiplicative baseline.
    const ONE: Self;

    /// Baseline for a `min` fold.
    const MAX: Self;

    /// Baseline for a `max` fold.
    const MIN: Self;

    /// Convert a numeric lexeme to this backing, or `None` if the backing
    /// cannot represent it (e.g. a fractional lexeme under `i64`).
    fn parse_literal(text: &str) -> Option<Self>;

    /// Combine two values additively. Evaluation is defined never to fail,
    /// so integer backings saturate instead of overflowing.
    fn add(self, rhs: Self) -> Self;

    /// Combine two values multiplicatively, saturating like [`Numeric::add`].
    fn mul(self, rhs: Self) -> Self;
}

impl Numeric for i64 {
    const ZERO: Self = 0;
    const ONE: Self = 1;
    const MAX: Self = i64::MAX;
    const MIN: Self = i64::MIN;

    fn parse_literal(text: &str) -> Option<Self> {
        text.parse().ok()
    }

    fn add(self, rhs: Self) -> Self {
        self.saturating_add(rhs)
    }

    fn mul(self, rhs: Self) -> Self {
        self.saturating_mul(rhs)
    }
}

impl Numeric for f64 {
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;
    const MAX: Self = f64::INFINITY;
    const MIN: Self = f64::NEG_INFINITY;

    fn parse_literal(text: &str) -> Option<Self> {
        text.parse().ok()
    }

    fn add(self, rhs: Self) -> Self {
        self + rhs
    }

    fn mul(self, rhs: Self) -> Self {
        self * rhs
    }
}

impl Numeric for Decimal {
    const ZERO: Self = Decimal::ZERO;
    const ONE: Self = Decimal::ONE;
    const MAX: Self = Decimal::MAX;
    const MIN: Self = Decimal::MIN;

    fn parse_literal(text: &str) -> Option<Self> {
        text.parse().ok()
    }

    fn add(self, rhs: Self) -> Self {
        self.saturating_add(rhs)
    }

    fn mul(self, rhs: Self) -> Self {
        self.saturating_mul(rhs)
    }
}

/// Opaque identity of a stat, allocated by the embedding application.
///
/// The engine never interprets the payload; it only carries the identity
/// from the stat registry into compiled trees and back out to stat-set
/// lookups at evaluation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StatId(u64);

impl StatId {
    pub const fn new(raw: u64) -> Self {
        StatId(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for StatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stat#{}", self.0)
    }
}
