// Copyright (c) 2026 Hypermesh Foundation. All rights reserved.
// Licensed under the Business Source License 1.1.
// See the LICENSE file in the repository root for full license text.

//! Channel-yield engine.
//!
//! Turns channel traffic, conversion, demographic pricing and a scenario into
//! baseline and simulated passenger/revenue figures:
//!
//! ```text
//! transactions = traffic * cr / 100
//! tickets      = transactions * avg_group_size
//! trip_factor  = single% * 1 + return% * 2
//! passengers   = tickets * trip_factor
//! revenue      = (tickets_biz * yield_biz + tickets_lei * yield_lei) * trip_factor
//! ```
//!
//! Every function here is pure: inputs are borrowed, results are fresh values.
//! Products and sums saturate at the `Decimal` bounds instead of overflowing.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core_types::{fraction, ratio_or_zero, Horizon, Money};
use crate::types::{Channel, ChannelId, Demographic, LeisureMix, PriceTable, Scenario};

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Metrics of one channel under one evaluation (baseline or simulated).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelMetrics {
    pub transactions: Decimal,
    pub total_tickets: Decimal,
    pub total_passengers: Decimal,
    pub revenue: Money,
    pub effective_conversion_rate: Decimal,
}

/// Passenger and revenue totals across all channels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub passengers: Decimal,
    pub revenue: Money,
}

impl Totals {
    fn add(&mut self, m: &ChannelMetrics) {
        self.passengers = self.passengers.saturating_add(m.total_passengers);
        self.revenue += m.revenue;
    }
}

/// Per-channel baseline vs simulated detail, kept for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelDetail {
    pub id: ChannelId,
    pub name: String,
    pub base: ChannelMetrics,
    pub sim: ChannelMetrics,
    /// Scenario is active and scoped to this channel.
    pub impacted: bool,
}

/// Simulated minus baseline, scaled to a horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactDelta {
    pub horizon: Horizon,
    pub passengers: Decimal,
    pub revenue: Money,
}

/// Snapshot produced by [`aggregate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastResult {
    pub business_yield: Money,
    pub leisure_yield: Money,
    pub baseline: Totals,
    pub simulated: Totals,
    pub channel_details: Vec<ChannelDetail>,
}

impl ForecastResult {
    /// Monthly delta (channel traffic is a monthly basis).
    pub fn delta(&self) -> ImpactDelta {
        self.impact(Horizon::Month)
    }

    pub fn impact(&self, horizon: Horizon) -> ImpactDelta {
        let factor = horizon.factor();
        ImpactDelta {
            horizon,
            passengers: self
                .simulated
                .passengers
                .saturating_sub(self.baseline.passengers)
                .saturating_mul(factor),
            revenue: (self.simulated.revenue - self.baseline.revenue) * factor,
        }
    }

    pub fn detail(&self, id: &ChannelId) -> Option<&ChannelDetail> {
        self.channel_details.iter().find(|d| &d.id == id)
    }
}

// ---------------------------------------------------------------------------
// Yield
// ---------------------------------------------------------------------------

/// Mix-weighted average ticket price. A zero total weight yields zero.
pub fn compute_blended_yield(prices: &PriceTable, mix: &LeisureMix) -> Money {
    let total = mix.total_weight();
    if total.is_zero() {
        return Money::zero();
    }
    Demographic::ALL
        .iter()
        .map(|&d| prices.price_for(d) * ratio_or_zero(mix.weight_for(d), total))
        .sum()
}

/// Business travellers are priced exclusively at the adult fare.
pub fn business_yield(prices: &PriceTable) -> Money {
    prices.adult
}

// ---------------------------------------------------------------------------
// Channel metrics
// ---------------------------------------------------------------------------

/// Metrics for one channel, optionally under the scenario.
///
/// With `apply_scenario` set and the scenario targeting this channel, the
/// business adjustment runs first and the leisure conversion uplift is taken
/// from the already-uplifted rate when both segments are targeted.
pub fn compute_channel_metrics(
    channel: &Channel,
    scenario: &Scenario,
    business_yield: Money,
    leisure_yield: Money,
    apply_scenario: bool,
) -> ChannelMetrics {
    let mut cr = channel.conversion_rate;
    let mut yield_biz = business_yield;
    let mut yield_lei = leisure_yield;

    if apply_scenario && scenario.targets(&channel.id) {
        let impact_yield = scenario.yield_multiplier();
        let impact_cr = scenario.cr_multiplier();

        if scenario.target_segment.includes_business() {
            yield_biz = yield_biz * impact_yield;
            cr = uplift(cr, channel.business_share, impact_cr);
        }
        if scenario.target_segment.includes_leisure() {
            yield_lei = yield_lei * impact_yield;
            cr = uplift(cr, channel.leisure_share(), impact_cr);
        }
    }

    let transactions = channel.traffic.saturating_mul(fraction(cr));
    let total_tickets = transactions.saturating_mul(channel.avg_group_size);
    let trip_factor = channel.trip_factor();
    let total_passengers = total_tickets.saturating_mul(trip_factor);

    let tickets_biz = total_tickets.saturating_mul(fraction(channel.business_share));
    let tickets_lei = total_tickets.saturating_mul(fraction(channel.leisure_share()));
    let revenue = yield_biz * tickets_biz.saturating_mul(trip_factor)
        + yield_lei * tickets_lei.saturating_mul(trip_factor);

    ChannelMetrics {
        transactions,
        total_tickets,
        total_passengers,
        revenue,
        effective_conversion_rate: cr,
    }
}

/// `cr + cr * share% * (multiplier - 1)`.
fn uplift(cr: Decimal, share: Decimal, multiplier: Decimal) -> Decimal {
    let gain = cr
        .saturating_mul(fraction(share))
        .saturating_mul(multiplier - Decimal::ONE);
    cr.saturating_add(gain)
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Baseline and simulated totals over every channel, in input order.
pub fn aggregate(
    channels: &[Channel],
    scenario: &Scenario,
    prices: &PriceTable,
    leisure_mix: &LeisureMix,
) -> ForecastResult {
    let yield_biz = business_yield(prices);
    let yield_lei = compute_blended_yield(prices, leisure_mix);

    let mut baseline = Totals::default();
    let mut simulated = Totals::default();
    let mut channel_details = Vec::with_capacity(channels.len());

    for ch in channels {
        let base = compute_channel_metrics(ch, scenario, yield_biz, yield_lei, false);
        let sim = compute_channel_metrics(ch, scenario, yield_biz, yield_lei, true);
        baseline.add(&base);
        simulated.add(&sim);
        channel_details.push(ChannelDetail {
            id: ch.id.clone(),
            name: ch.name.clone(),
            base,
            sim,
            impacted: scenario.targets(&ch.id),
        });
    }

    tracing::debug!(
        channels = channels.len(),
        scenario = %scenario.name,
        baseline_revenue = %baseline.revenue,
        simulated_revenue = %simulated.revenue,
        "channel forecast aggregated"
    );

    ForecastResult {
        business_yield: yield_biz,
        leisure_yield: yield_lei,
        baseline,
        simulated,
        channel_details,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
