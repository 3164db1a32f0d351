// Copyright (c) 2026 Hypermesh Foundation. All rights reserved.
// Licensed under the Business Source License 1.1.
// See the LICENSE file in the repository root for full license text.

//! Model configuration values.
//!
//! A configuration is an immutable value handed to each calculation call;
//! the caller owns any read-modify-write cycle. Default validation is
//! permissive. [`ValidationMode::Strict`] rejects out-of-range inputs before
//! anything is computed.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::channel_yield::{self, ForecastResult};
use crate::core_types::Money;
use crate::fare_mix::{self, FareMixResult};
use crate::types::{
    Channel, ChannelId, Demographic, FareKind, FareMixInputs, FareProduct, LeisureMix,
    PriceTable, Scenario,
};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A single rejected input field (strict mode only).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid {field} = {value}: {reason}")]
pub struct ValidationError {
    pub field: String,
    pub value: Decimal,
    pub reason: &'static str,
}

/// Errors loading a configuration from disk or text.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

// ---------------------------------------------------------------------------
// Validation mode
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Accept everything and compute arithmetically.
    #[default]
    Permissive,
    /// Reject out-of-range inputs with a [`ValidationError`].
    Strict,
}

struct Checker {
    prefix: String,
}

impl Checker {
    fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }

    fn fail(&self, field: &str, value: Decimal, reason: &'static str) -> ValidationError {
        let field = if self.prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", self.prefix, field)
        };
        tracing::warn!(%field, %value, reason, "strict validation rejected input");
        ValidationError { field, value, reason }
    }

    fn percent(&self, field: &str, value: Decimal) -> Result<(), ValidationError> {
        if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
            return Err(self.fail(field, value, "percentage outside 0..=100"));
        }
        Ok(())
    }

    fn non_negative(&self, field: &str, value: Decimal) -> Result<(), ValidationError> {
        if value < Decimal::ZERO {
            return Err(self.fail(field, value, "must not be negative"));
        }
        Ok(())
    }

    fn positive(&self, field: &str, value: Decimal) -> Result<(), ValidationError> {
        if value <= Decimal::ZERO {
            return Err(self.fail(field, value, "must be positive"));
        }
        Ok(())
    }

    fn at_least_one(&self, field: &str, value: Decimal) -> Result<(), ValidationError> {
        if value < Decimal::ONE {
            return Err(self.fail(field, value, "must be at least 1"));
        }
        Ok(())
    }
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })
}

// ---------------------------------------------------------------------------
// ModelConfig
// ---------------------------------------------------------------------------

/// Inputs of the channel-yield engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModelConfig {
    pub channels: Vec<Channel>,
    pub prices: PriceTable,
    pub leisure_mix: LeisureMix,
    pub scenario: Scenario,
    pub validation: ValidationMode,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            channels: default_channels(),
            prices: PriceTable::default(),
            leisure_mix: LeisureMix::default(),
            scenario: Scenario::default(),
            validation: ValidationMode::Permissive,
        }
    }
}

/// Website, App and Kiosks with their monthly reference figures.
pub fn default_channels() -> Vec<Channel> {
    vec![
        Channel {
            traffic: dec!(150000),
            conversion_rate: dec!(15.0),
            business_share: dec!(50),
            return_mix: dec!(40),
            avg_group_size: dec!(1.2),
            ..Channel::new("web", "Website")
        },
        Channel {
            traffic: dec!(30000),
            conversion_rate: dec!(50.0),
            business_share: dec!(50),
            return_mix: dec!(30),
            avg_group_size: dec!(1.0),
            ..Channel::new("app", "App")
        },
        Channel {
            traffic: dec!(15000),
            conversion_rate: dec!(90.0),
            business_share: dec!(50),
            return_mix: dec!(50),
            avg_group_size: dec!(1.5),
            ..Channel::new("kiosk", "Kiosks")
        },
    ]
}

impl ModelConfig {
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::from_json_str(&read_file(path)?)?;
        if config.validation == ValidationMode::Strict {
            config.validate()?;
        }
        tracing::info!(path = %path.display(), channels = config.channels.len(), "model config loaded");
        Ok(config)
    }

    pub fn channel(&self, id: &ChannelId) -> Option<&Channel> {
        self.channels.iter().find(|c| &c.id == id)
    }

    pub fn channel_mut(&mut self, id: &ChannelId) -> Option<&mut Channel> {
        self.channels.iter_mut().find(|c| &c.id == id)
    }

    /// Strict range checks, independent of [`Self::validation`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        for ch in &self.channels {
            let c = Checker::new(format!("channels[{}]", ch.id));
            c.non_negative("traffic", ch.traffic)?;
            c.percent("conversionRate", ch.conversion_rate)?;
            c.percent("businessShare", ch.business_share)?;
            c.percent("returnMix", ch.return_mix)?;
            c.at_least_one("avgGroupSize", ch.avg_group_size)?;
        }

        let prices = Checker::new("prices");
        let mix = Checker::new("leisureMix");
        for d in Demographic::ALL {
            let name = format!("{d:?}").to_lowercase();
            prices.positive(&name, self.prices.price_for(d).0)?;
            mix.percent(&name, self.leisure_mix.weight_for(d))?;
        }

        let scenario = Checker::new("scenario");
        if self.scenario.yield_impact < -Decimal::ONE_HUNDRED {
            return Err(scenario.fail("yieldImpact", self.scenario.yield_impact, "must be at least -100"));
        }
        if self.scenario.cr_impact < -Decimal::ONE_HUNDRED {
            return Err(scenario.fail("crImpact", self.scenario.cr_impact, "must be at least -100"));
        }
        Ok(())
    }

    /// Run the channel-yield engine, validating first in strict mode.
    pub fn forecast(&self) -> Result<ForecastResult, ValidationError> {
        if self.validation == ValidationMode::Strict {
            self.validate()?;
        }
        Ok(channel_yield::aggregate(
            &self.channels,
            &self.scenario,
            &self.prices,
            &self.leisure_mix,
        ))
    }
}

// ---------------------------------------------------------------------------
// FareMixConfig
// ---------------------------------------------------------------------------

/// Inputs of the fare-mix comparison engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FareMixConfig {
    pub products: Vec<FareProduct>,
    #[serde(flatten)]
    pub inputs: FareMixInputs,
    pub validation: ValidationMode,
}

impl FareMixConfig {
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::from_json_str(&read_file(path)?)?;
        if config.validation == ValidationMode::Strict {
            config.validate()?;
        }
        tracing::info!(path = %path.display(), products = config.products.len(), "fare-mix config loaded");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let globals = Checker::new("");
        globals.non_negative("targetVolume", self.inputs.target_volume)?;
        globals.non_negative("flexPrice", self.inputs.flex_price.0)?;
        globals.percent("returnDiscount", self.inputs.return_discount)?;

        for p in &self.products {
            let c = Checker::new(format!("products[{}]", p.name));
            c.positive("singlePrice", p.single_price.0)?;
            c.percent("baselineShare", p.baseline_share)?;
            c.percent("baselineReturnShare", p.baseline_return_share)?;
            c.percent("challengerShare", p.challenger_share)?;
            c.percent("challengerReturnShare", p.challenger_return_share)?;
            c.percent("challengerFlexShare", p.challenger_flex_share)?;
            match p.kind {
                FareKind::Tier => {
                    c.positive("returnPrice", p.return_price.0)?;
                    c.at_least_one("groupSize", p.group_size)?
                }
                FareKind::Pass { trip_allowance } => {
                    c.positive("tripAllowance", Decimal::from(trip_allowance))?
                }
            }
        }
        Ok(())
    }

    /// Run the fare-mix engine, validating first in strict mode.
    pub fn compare(&self) -> Result<FareMixResult, ValidationError> {
        if self.validation == ValidationMode::Strict {
            self.validate()?;
        }
        Ok(fare_mix::compare(&self.products, &self.inputs))
    }

    pub fn flex_price(&self) -> Money {
        self.inputs.flex_price
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_reference_channels() {
        let cfg = ModelConfig::default();
        let ids: Vec<&str> = cfg.channels.iter().map(|c| c.id.0.as_str()).collect();
        assert_eq!(ids, vec!["web", "app", "kiosk"]);
        assert_eq!(cfg.prices.adult, Money(dec!(340)));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg = ModelConfig::from_json_str(r#"{"prices":{"adult":400}}"#)
            .expect("test: partial config");
        assert_eq!(cfg.prices.adult, Money(dec!(400)));
        assert_eq!(cfg.prices.child, Money(dec!(160)));
        assert_eq!(cfg.channels.len(), 3);
    }

    #[test]
    fn malformed_json_is_config_error() {
        let err = ModelConfig::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)), "got {err:?}");
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = ModelConfig::load(Path::new("/nonexistent/forecast.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }), "got {err:?}");
    }

    #[test]
    fn strict_mode_rejects_conversion_over_100() {
        let mut cfg = ModelConfig { validation: ValidationMode::Strict, ..ModelConfig::default() };
        cfg.channels[0].conversion_rate = dec!(120);
        let err = cfg.forecast().unwrap_err();
        assert_eq!(err.field, "channels[web].conversionRate");
        assert_eq!(err.value, dec!(120));
    }

    #[test]
    fn permissive_mode_computes_out_of_range() {
        let mut cfg = ModelConfig::default();
        cfg.channels[0].conversion_rate = dec!(120);
        assert!(cfg.forecast().is_ok());
    }

    #[test]
    fn fare_mix_json_flattens_inputs() {
        let json = r#"{
            "targetVolume": 1000, "flexPrice": 50, "returnDiscount": 10,
            "products": [{"name":"Adult","singlePrice":340,"returnPrice":640,
                          "baselineShare":100,"baselineReturnShare":30}]
        }"#;
        let cfg = FareMixConfig::from_json_str(json).expect("test: fare mix config");
        assert_eq!(cfg.inputs.target_volume, dec!(1000));
        assert_eq!(cfg.flex_price(), Money(dec!(50)));
        assert_eq!(cfg.products[0].group_size, dec!(1));
    }

    #[test]
    fn strict_fare_mix_rejects_zero_trip_allowance() {
        let cfg = FareMixConfig {
            products: vec![FareProduct {
                name: "Pass".to_string(),
                single_price: Money(dec!(2900)),
                kind: FareKind::Pass { trip_allowance: 0 },
                ..FareProduct::default()
            }],
            validation: ValidationMode::Strict,
            ..FareMixConfig::default()
        };
        let err = cfg.compare().unwrap_err();
        assert_eq!(err.field, "products[Pass].tripAllowance");
    }

    #[test]
    fn strict_fare_mix_rejects_zero_prices() {
        let adult = FareProduct {
            name: "Adult".to_string(),
            single_price: Money(dec!(340)),
            return_price: Money(dec!(640)),
            baseline_share: dec!(100),
            challenger_share: dec!(100),
            ..FareProduct::default()
        };
        let strict = |product: FareProduct| FareMixConfig {
            products: vec![product],
            validation: ValidationMode::Strict,
            ..FareMixConfig::default()
        };
        assert!(strict(adult.clone()).compare().is_ok());

        let free = FareProduct { single_price: Money::zero(), ..adult.clone() };
        let err = strict(free).compare().unwrap_err();
        assert_eq!(err.field, "products[Adult].singlePrice");
        assert_eq!(err.value, Decimal::ZERO);

        let no_return = FareProduct { return_price: Money::zero(), ..adult.clone() };
        let err = strict(no_return).compare().unwrap_err();
        assert_eq!(err.field, "products[Adult].returnPrice");

        // passes never sell returns, so their return price is not checked
        let pass = FareProduct {
            return_price: Money::zero(),
            kind: FareKind::Pass { trip_allowance: 12 },
            ..adult
        };
        assert!(strict(pass).compare().is_ok());
    }
}
