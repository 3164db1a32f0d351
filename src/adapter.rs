//! Adapter layer: converts between the UI's f64 world and the engine's Decimal types.
//!
//! The presentation layer receives plain numbers; formatting, rounding and
//! colouring stay on its side.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::channel_yield::{ChannelMetrics, ForecastResult, ImpactDelta};
use crate::core_types::{Horizon, Money};
use crate::fare_mix::{FareMixResult, ProductComparison, ShareCheck};

/// Convert f64 to Decimal. NaN and infinities coerce to zero.
pub fn to_decimal(v: f64) -> Decimal {
    Decimal::from_f64(v).unwrap_or(Decimal::ZERO)
}

/// Convert Decimal to f64.
pub fn from_decimal(d: Decimal) -> f64 {
    d.to_f64().unwrap_or(0.0)
}

pub fn to_money(v: f64) -> Money {
    Money(to_decimal(v))
}

pub fn from_money(m: Money) -> f64 {
    from_decimal(m.0)
}

// ─── Channel-yield views ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsView {
    pub transactions: f64,
    pub total_passengers: f64,
    pub revenue: f64,
    pub effective_conversion_rate: f64,
}

impl From<&ChannelMetrics> for MetricsView {
    fn from(m: &ChannelMetrics) -> Self {
        Self {
            transactions: from_decimal(m.transactions),
            total_passengers: from_decimal(m.total_passengers),
            revenue: from_money(m.revenue),
            effective_conversion_rate: from_decimal(m.effective_conversion_rate),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalsView {
    pub pax: f64,
    pub revenue: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelView {
    pub id: String,
    pub name: String,
    pub base: MetricsView,
    pub sim: MetricsView,
    pub impacted: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactView {
    pub horizon: Horizon,
    pub pax: f64,
    pub revenue: f64,
}

impl From<&ImpactDelta> for ImpactView {
    fn from(d: &ImpactDelta) -> Self {
        Self {
            horizon: d.horizon,
            pax: from_decimal(d.passengers),
            revenue: from_money(d.revenue),
        }
    }
}

/// `{baseline, simulated, channelDetails}` plus yields and horizon deltas.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastView {
    pub business_yield: f64,
    pub leisure_yield: f64,
    pub baseline: TotalsView,
    pub simulated: TotalsView,
    pub channel_details: Vec<ChannelView>,
    pub impacts: Vec<ImpactView>,
}

pub fn forecast_view(r: &ForecastResult) -> ForecastView {
    ForecastView {
        business_yield: from_money(r.business_yield),
        leisure_yield: from_money(r.leisure_yield),
        baseline: TotalsView {
            pax: from_decimal(r.baseline.passengers),
            revenue: from_money(r.baseline.revenue),
        },
        simulated: TotalsView {
            pax: from_decimal(r.simulated.passengers),
            revenue: from_money(r.simulated.revenue),
        },
        channel_details: r
            .channel_details
            .iter()
            .map(|d| ChannelView {
                id: d.id.0.clone(),
                name: d.name.clone(),
                base: MetricsView::from(&d.base),
                sim: MetricsView::from(&d.sim),
                impacted: d.impacted,
            })
            .collect(),
        impacts: Horizon::all()
            .iter()
            .map(|&h| ImpactView::from(&r.impact(h)))
            .collect(),
    }
}

// ─── Fare-mix views ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    pub name: String,
    pub baseline_revenue: f64,
    pub challenger_revenue: f64,
    pub delta: f64,
    pub baseline_pax: f64,
    pub challenger_pax: f64,
}

impl From<&ProductComparison> for ProductView {
    fn from(p: &ProductComparison) -> Self {
        Self {
            name: p.name.clone(),
            baseline_revenue: from_money(p.baseline_revenue),
            challenger_revenue: from_money(p.challenger_revenue),
            delta: from_money(p.monthly_delta),
            baseline_pax: from_decimal(p.baseline_pax),
            challenger_pax: from_decimal(p.challenger_pax),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareView {
    pub total: f64,
    pub valid: bool,
}

impl From<ShareCheck> for ShareView {
    fn from(s: ShareCheck) -> Self {
        Self { total: from_decimal(s.total), valid: s.valid }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FareMixView {
    pub products: Vec<ProductView>,
    pub baseline_revenue: f64,
    pub challenger_revenue: f64,
    pub baseline_pax: f64,
    pub challenger_pax: f64,
    pub monthly_delta: f64,
    pub share_sums: [ShareView; 2],
}

pub fn fare_mix_view(r: &FareMixResult) -> FareMixView {
    FareMixView {
        products: r.products.iter().map(ProductView::from).collect(),
        baseline_revenue: from_money(r.baseline_revenue),
        challenger_revenue: from_money(r.challenger_revenue),
        baseline_pax: from_decimal(r.baseline_pax),
        challenger_pax: from_decimal(r.challenger_pax),
        monthly_delta: from_money(r.monthly_delta()),
        share_sums: [r.baseline_share.into(), r.challenger_share.into()],
    }
}
