// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Fare Forecast - Type Definitions

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core_types::{fraction, multiplier, Money};

// ─── Channel ────────────────────────────────────────────────────────────────

/// Stable channel identifier ("web", "app", "kiosk", ...).
#[derive(Debug, Clone, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelId(pub String);

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ChannelId {
    fn from(s: &str) -> Self { ChannelId(s.to_string()) }
}

impl From<String> for ChannelId {
    fn from(s: String) -> Self { ChannelId(s) }
}

/// One acquisition/sales channel. All percentages are 0-100 units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Channel {
    pub id: ChannelId,
    pub name: String,
    /// Monthly visits/leads.
    pub traffic: Decimal,
    #[serde(alias = "cr")]
    pub conversion_rate: Decimal,
    #[serde(alias = "bizShare")]
    pub business_share: Decimal,
    pub return_mix: Decimal,
    pub avg_group_size: Decimal,
}

impl Default for Channel {
    fn default() -> Self {
        Self {
            id: ChannelId::default(),
            name: String::new(),
            traffic: Decimal::ZERO,
            conversion_rate: Decimal::ZERO,
            business_share: Decimal::ZERO,
            return_mix: Decimal::ZERO,
            avg_group_size: Decimal::ONE,
        }
    }
}

impl Channel {
    pub fn new(id: &str, name: &str) -> Self {
        Self { id: ChannelId::from(id), name: name.to_string(), ..Self::default() }
    }

    pub fn leisure_share(&self) -> Decimal {
        Decimal::ONE_HUNDRED.saturating_sub(self.business_share)
    }

    /// Average boardings per ticket: singles count once, returns twice.
    pub fn trip_factor(&self) -> Decimal {
        fraction(Decimal::ONE_HUNDRED.saturating_sub(self.return_mix))
            + fraction(self.return_mix) * dec!(2)
    }
}

// ─── Prices & demographic mix ───────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Demographic {
    Adult,
    Pensioner,
    Youth,
    Child,
}

impl Demographic {
    pub const ALL: [Demographic; 4] =
        [Self::Adult, Self::Pensioner, Self::Youth, Self::Child];

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "adult" => Some(Self::Adult),
            "pensioner" => Some(Self::Pensioner),
            "youth" => Some(Self::Youth),
            "child" => Some(Self::Child),
            _ => None,
        }
    }
}

/// Single-ticket price per demographic. Adult doubles as the business yield.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceTable {
    pub adult: Money,
    pub pensioner: Money,
    pub youth: Money,
    pub child: Money,
}

impl Default for PriceTable {
    fn default() -> Self {
        Self {
            adult: Money(dec!(340)),
            pensioner: Money(dec!(210)),
            youth: Money(dec!(160)),
            child: Money(dec!(160)),
        }
    }
}

impl PriceTable {
    pub fn price_for(&self, d: Demographic) -> Money {
        match d {
            Demographic::Adult => self.adult,
            Demographic::Pensioner => self.pensioner,
            Demographic::Youth => self.youth,
            Demographic::Child => self.child,
        }
    }

    pub fn set(&mut self, d: Demographic, price: Money) {
        match d {
            Demographic::Adult => self.adult = price,
            Demographic::Pensioner => self.pensioner = price,
            Demographic::Youth => self.youth = price,
            Demographic::Child => self.child = price,
        }
    }
}

/// Leisure demographic weights. Nominally sum to 100; never force-normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeisureMix {
    pub adult: Decimal,
    pub pensioner: Decimal,
    pub youth: Decimal,
    pub child: Decimal,
}

impl Default for LeisureMix {
    fn default() -> Self {
        Self {
            adult: dec!(60),
            pensioner: dec!(20),
            youth: dec!(10),
            child: dec!(10),
        }
    }
}

impl LeisureMix {
    pub fn weight_for(&self, d: Demographic) -> Decimal {
        match d {
            Demographic::Adult => self.adult,
            Demographic::Pensioner => self.pensioner,
            Demographic::Youth => self.youth,
            Demographic::Child => self.child,
        }
    }

    pub fn set(&mut self, d: Demographic, weight: Decimal) {
        match d {
            Demographic::Adult => self.adult = weight,
            Demographic::Pensioner => self.pensioner = weight,
            Demographic::Youth => self.youth = weight,
            Demographic::Child => self.child = weight,
        }
    }

    pub fn total_weight(&self) -> Decimal {
        self.adult
            .saturating_add(self.pensioner)
            .saturating_add(self.youth)
            .saturating_add(self.child)
    }
}

// ─── Scenario ───────────────────────────────────────────────────────────────

/// Scenario channel scope: the wildcard "all" or a single channel id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TargetChannel {
    All,
    Channel(ChannelId),
}

impl Default for TargetChannel {
    fn default() -> Self { TargetChannel::All }
}

impl TargetChannel {
    pub fn matches(&self, id: &ChannelId) -> bool {
        match self {
            Self::All => true,
            Self::Channel(target) => target == id,
        }
    }
}

impl From<String> for TargetChannel {
    fn from(s: String) -> Self {
        if s == "all" { Self::All } else { Self::Channel(ChannelId(s)) }
    }
}

impl From<&str> for TargetChannel {
    fn from(s: &str) -> Self { Self::from(s.to_string()) }
}

impl From<TargetChannel> for String {
    fn from(t: TargetChannel) -> Self {
        match t {
            TargetChannel::All => "all".to_string(),
            TargetChannel::Channel(id) => id.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetSegment {
    Business,
    #[default]
    Leisure,
    Both,
}

impl TargetSegment {
    pub fn includes_business(&self) -> bool {
        matches!(self, Self::Business | Self::Both)
    }

    pub fn includes_leisure(&self) -> bool {
        matches!(self, Self::Leisure | Self::Both)
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "business" => Some(Self::Business),
            "leisure" => Some(Self::Leisure),
            "both" => Some(Self::Both),
            _ => None,
        }
    }
}

/// Hypothetical price/conversion shock scoped to a channel and segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Scenario {
    pub active: bool,
    pub name: String,
    pub target_channel: TargetChannel,
    pub target_segment: TargetSegment,
    /// Percentage delta on yield (-100..).
    pub yield_impact: Decimal,
    /// Percentage delta on conversion rate.
    pub cr_impact: Decimal,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            active: true,
            name: "New Campaign".to_string(),
            target_channel: TargetChannel::Channel(ChannelId::from("web")),
            target_segment: TargetSegment::Leisure,
            yield_impact: Decimal::ZERO,
            cr_impact: Decimal::ZERO,
        }
    }
}

impl Scenario {
    /// Active and scoped to this channel.
    pub fn targets(&self, id: &ChannelId) -> bool {
        self.active && self.target_channel.matches(id)
    }

    pub fn yield_multiplier(&self) -> Decimal {
        multiplier(self.yield_impact)
    }

    pub fn cr_multiplier(&self) -> Decimal {
        multiplier(self.cr_impact)
    }
}

// ─── Fare products ──────────────────────────────────────────────────────────

/// Ordinary tier (single/return mixing, flex uplift) or flat-price pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FareKind {
    #[default]
    Tier,
    Pass {
        /// Boardings credited per pass sold.
        #[serde(rename = "tripAllowance")]
        trip_allowance: u32,
    },
}

/// One priced fare tier or pass, with baseline and challenger structures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FareProduct {
    pub name: String,
    pub single_price: Money,
    pub return_price: Money,
    /// Tickets per unit sold.
    pub group_size: Decimal,
    pub kind: FareKind,
    pub baseline_share: Decimal,
    pub baseline_return_share: Decimal,
    pub challenger_share: Decimal,
    pub challenger_return_share: Decimal,
    pub challenger_flex_share: Decimal,
}

impl Default for FareProduct {
    fn default() -> Self {
        Self {
            name: String::new(),
            single_price: Money::zero(),
            return_price: Money::zero(),
            group_size: Decimal::ONE,
            kind: FareKind::Tier,
            baseline_share: Decimal::ZERO,
            baseline_return_share: Decimal::ZERO,
            challenger_share: Decimal::ZERO,
            challenger_return_share: Decimal::ZERO,
            challenger_flex_share: Decimal::ZERO,
        }
    }
}

impl FareProduct {
    pub fn is_pass(&self) -> bool {
        matches!(self.kind, FareKind::Pass { .. })
    }

    pub fn trip_allowance(&self) -> Option<u32> {
        match self.kind {
            FareKind::Pass { trip_allowance } => Some(trip_allowance),
            FareKind::Tier => None,
        }
    }
}

/// Global scalar inputs of the fare-mix comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FareMixInputs {
    /// Annual transaction basis shared by every product.
    pub target_volume: Decimal,
    /// Surcharge per flexible fare.
    pub flex_price: Money,
    /// Percentage discount on the challenger return price.
    pub return_discount: Decimal,
}

impl Default for FareMixInputs {
    fn default() -> Self {
        Self {
            target_volume: Decimal::ZERO,
            flex_price: Money::zero(),
            return_discount: Decimal::ZERO,
        }
    }
}

impl FareMixInputs {
    /// Share of the return price kept after the challenger discount.
    pub fn retained_fraction(&self) -> Decimal {
        fraction(Decimal::ONE_HUNDRED.saturating_sub(self.return_discount))
    }
}
