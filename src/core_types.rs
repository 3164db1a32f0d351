// Copyright (c) 2026 Hypermesh Foundation. All rights reserved.
// Licensed under the Business Source License 1.1.
// See the LICENSE file in the repository root for full license text.

//! Shared numeric vocabulary for both forecasting engines.
//!
//! Currency amounts are carried as [`Money`] (a `rust_decimal::Decimal`
//! newtype); percentages are plain `Decimal` values in 0-100 units and are
//! turned into factors with [`fraction`] and [`multiplier`].
//!
//! Arithmetic on caller-supplied figures saturates at `Decimal::MAX` /
//! `Decimal::MIN` instead of panicking, so oversized inputs produce pinned
//! results rather than aborting the module.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};

// ---------------------------------------------------------------------------
// Percentage helpers
// ---------------------------------------------------------------------------

/// `pct / 100`, e.g. `15` -> `0.15`.
pub fn fraction(pct: Decimal) -> Decimal {
    pct / Decimal::ONE_HUNDRED
}

/// `1 + pct / 100`, e.g. `-10` -> `0.9`.
pub fn multiplier(pct: Decimal) -> Decimal {
    Decimal::ONE + fraction(pct)
}

/// `numerator / denominator`, or zero when the denominator is zero or the
/// quotient does not fit a `Decimal`.
pub fn ratio_or_zero(numerator: Decimal, denominator: Decimal) -> Decimal {
    numerator.checked_div(denominator).unwrap_or(Decimal::ZERO)
}

// ---------------------------------------------------------------------------
// Money
// ---------------------------------------------------------------------------

/// Currency amount (SEK-equivalent units, never formatted by the engine).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(pub Decimal);

impl Money {
    /// Zero value
    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }
}

impl Add for Money {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sub for Money {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl Mul<Decimal> for Money {
    type Output = Self;
    fn mul(self, rhs: Decimal) -> Self::Output {
        Self(self.0.saturating_mul(rhs))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Horizon
// ---------------------------------------------------------------------------

/// Projection horizon for scenario deltas. Channel traffic is a monthly basis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Horizon {
    Week,
    Month,
    Year,
}

impl Horizon {
    /// Factor applied to a monthly figure.
    pub fn factor(&self) -> Decimal {
        match self {
            Self::Week => dec!(0.25),
            Self::Month => Decimal::ONE,
            Self::Year => dec!(12),
        }
    }

    pub fn all() -> [Horizon; 3] {
        [Self::Week, Self::Month, Self::Year]
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        };
        f.write_str(label)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fraction_and_multiplier() {
        assert_eq!(fraction(dec!(15)), dec!(0.15));
        assert_eq!(multiplier(dec!(-10)), dec!(0.9));
        assert_eq!(multiplier(dec!(0)), Decimal::ONE);
    }

    #[test]
    fn ratio_or_zero_guards_zero_denominator() {
        assert_eq!(ratio_or_zero(dec!(5), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(ratio_or_zero(dec!(5), dec!(2)), dec!(2.5));
        assert_eq!(ratio_or_zero(Decimal::MAX, dec!(0.5)), Decimal::ZERO);
    }

    #[test]
    fn money_arithmetic() {
        let a = Money(dec!(100));
        let b = Money(dec!(40));
        assert_eq!(a + b, Money(dec!(140)));
        assert_eq!(a - b, Money(dec!(60)));
        assert_eq!(a * dec!(1.5), Money(dec!(150)));
        let total: Money = vec![a, b].into_iter().sum();
        assert_eq!(total, Money(dec!(140)));
    }

    #[test]
    fn money_arithmetic_saturates() {
        let big = Money(Decimal::MAX);
        assert_eq!(big + Money(dec!(1)), big);
        assert_eq!(big * dec!(10), big);
        assert_eq!(Money(Decimal::MIN) - Money(dec!(1)), Money(Decimal::MIN));
        let mut acc = big;
        acc += big;
        assert_eq!(acc, big);
    }

    #[test]
    fn money_deserializes_from_plain_number() {
        let m: Money = serde_json::from_str("340").expect("test: parse money");
        assert_eq!(m, Money(dec!(340)));
    }

    #[test]
    fn horizon_factors() {
        assert_eq!(Horizon::Week.factor(), dec!(0.25));
        assert_eq!(Horizon::Month.factor(), dec!(1));
        assert_eq!(Horizon::Year.factor(), dec!(12));
    }
}
