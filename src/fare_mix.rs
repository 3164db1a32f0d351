// Copyright (c) 2026 Hypermesh Foundation. All rights reserved.
// Licensed under the Business Source License 1.1.
// See the LICENSE file in the repository root for full license text.

//! Fare-mix comparison engine.
//!
//! Compares a baseline fare structure against a challenger structure over a
//! shared annual transaction volume. The challenger may discount return
//! fares and sell a flexible-fare surcharge; passes are flat-priced and never
//! mix returns or flex.
//!
//! Out-of-range percentages are processed arithmetically. The only check is
//! the share-sum validation, which flags but never rejects. Oversized inputs
//! saturate at the `Decimal` bounds.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::core_types::{fraction, Money};
use crate::types::{FareKind, FareMixInputs, FareProduct};

/// Allowed drift of a share total from 100 before it is flagged invalid.
pub const SHARE_TOLERANCE: Decimal = dec!(0.1);

/// Months per `target_volume` period.
const MONTHS_PER_YEAR: Decimal = dec!(12);

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Baseline vs challenger figures for one fare product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductComparison {
    pub name: String,
    pub baseline_transactions: Decimal,
    pub baseline_blended_price: Money,
    pub baseline_revenue: Money,
    pub baseline_pax: Decimal,
    pub challenger_transactions: Decimal,
    pub challenger_blended_price: Money,
    pub flex_revenue: Money,
    /// Blended revenue plus the flex add-on.
    pub challenger_revenue: Money,
    pub challenger_pax: Decimal,
    pub monthly_delta: Money,
}

/// Sum of a share column and whether it lands within tolerance of 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareCheck {
    pub total: Decimal,
    pub valid: bool,
}

impl ShareCheck {
    pub fn from_total(total: Decimal) -> Self {
        Self {
            total,
            valid: total.saturating_sub(Decimal::ONE_HUNDRED).abs() <= SHARE_TOLERANCE,
        }
    }
}

/// Snapshot produced by [`compare`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FareMixResult {
    pub products: Vec<ProductComparison>,
    pub baseline_revenue: Money,
    pub challenger_revenue: Money,
    pub baseline_pax: Decimal,
    pub challenger_pax: Decimal,
    pub baseline_share: ShareCheck,
    pub challenger_share: ShareCheck,
}

impl FareMixResult {
    /// Sum of per-product monthly deltas.
    pub fn monthly_delta(&self) -> Money {
        self.products.iter().map(|p| p.monthly_delta).sum()
    }

    /// Challenger minus baseline over the full `target_volume` period.
    pub fn annual_delta(&self) -> Money {
        self.challenger_revenue - self.baseline_revenue
    }

    pub fn shares_valid(&self) -> bool {
        self.baseline_share.valid && self.challenger_share.valid
    }
}

// ---------------------------------------------------------------------------
// Pricing rules
// ---------------------------------------------------------------------------

/// Single/return blend by return share; passes are flat at the single price.
pub fn blended_price(
    product: &FareProduct,
    return_share: Decimal,
    return_price: Money,
) -> Money {
    if product.is_pass() {
        return product.single_price;
    }
    let returns = fraction(return_share);
    product.single_price * (Decimal::ONE - returns) + return_price * returns
}

/// Boardings credited to `transactions` units of the product.
pub fn passenger_equivalent(
    product: &FareProduct,
    transactions: Decimal,
    return_share: Decimal,
) -> Decimal {
    match product.kind {
        FareKind::Pass { trip_allowance } => {
            transactions.saturating_mul(Decimal::from(trip_allowance))
        }
        FareKind::Tier => transactions
            .saturating_mul(product.group_size)
            .saturating_mul(Decimal::ONE + fraction(return_share)),
    }
}

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

/// Baseline vs challenger for a single product.
pub fn compare_product(product: &FareProduct, inputs: &FareMixInputs) -> ProductComparison {
    let baseline_transactions =
        fraction(product.baseline_share).saturating_mul(inputs.target_volume);
    let baseline_blended_price =
        blended_price(product, product.baseline_return_share, product.return_price);
    let baseline_revenue = baseline_blended_price * baseline_transactions;
    let baseline_pax =
        passenger_equivalent(product, baseline_transactions, product.baseline_return_share);

    let challenger_transactions =
        fraction(product.challenger_share).saturating_mul(inputs.target_volume);
    let discounted_return = product.return_price * inputs.retained_fraction();
    let challenger_blended_price =
        blended_price(product, product.challenger_return_share, discounted_return);
    let flex_revenue = if product.is_pass() {
        Money::zero()
    } else {
        inputs.flex_price
            * challenger_transactions.saturating_mul(fraction(product.challenger_flex_share))
    };
    let challenger_revenue = challenger_blended_price * challenger_transactions + flex_revenue;
    let challenger_pax =
        passenger_equivalent(product, challenger_transactions, product.challenger_return_share);

    let monthly_delta = Money((challenger_revenue - baseline_revenue).0 / MONTHS_PER_YEAR);

    ProductComparison {
        name: product.name.clone(),
        baseline_transactions,
        baseline_blended_price,
        baseline_revenue,
        baseline_pax,
        challenger_transactions,
        challenger_blended_price,
        flex_revenue,
        challenger_revenue,
        challenger_pax,
        monthly_delta,
    }
}

fn saturating_sum(values: impl Iterator<Item = Decimal>) -> Decimal {
    values.fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Compare every product and aggregate totals plus share-sum checks.
pub fn compare(products: &[FareProduct], inputs: &FareMixInputs) -> FareMixResult {
    let comparisons: Vec<ProductComparison> =
        products.iter().map(|p| compare_product(p, inputs)).collect();

    let baseline_share =
        ShareCheck::from_total(saturating_sum(products.iter().map(|p| p.baseline_share)));
    let challenger_share =
        ShareCheck::from_total(saturating_sum(products.iter().map(|p| p.challenger_share)));

    if !baseline_share.valid || !challenger_share.valid {
        tracing::warn!(
            baseline_share = %baseline_share.total,
            challenger_share = %challenger_share.total,
            "fare-mix shares do not sum to 100"
        );
    }

    let result = FareMixResult {
        baseline_revenue: comparisons.iter().map(|c| c.baseline_revenue).sum(),
        challenger_revenue: comparisons.iter().map(|c| c.challenger_revenue).sum(),
        baseline_pax: saturating_sum(comparisons.iter().map(|c| c.baseline_pax)),
        challenger_pax: saturating_sum(comparisons.iter().map(|c| c.challenger_pax)),
        products: comparisons,
        baseline_share,
        challenger_share,
    };

    tracing::debug!(
        products = products.len(),
        baseline_revenue = %result.baseline_revenue,
        challenger_revenue = %result.challenger_revenue,
        "fare mix compared"
    );

    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
