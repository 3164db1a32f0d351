// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Fare Forecast - Interactive Session
//
// Caller-owned parameter state for the interactive UI. Setters mutate the
// held configuration; every computation call runs the engines from scratch
// over the current values and returns a fresh snapshot.

use rust_decimal::Decimal;

use crate::channel_yield::ForecastResult;
use crate::config::{FareMixConfig, ModelConfig, ValidationError, ValidationMode};
use crate::core_types::Money;
use crate::fare_mix::FareMixResult;
use crate::types::{ChannelId, Demographic, TargetChannel, TargetSegment};

// ─── Errors ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    #[error("unknown channel: {0}")]
    UnknownChannel(String),

    #[error("unknown channel field: {0}")]
    UnknownField(String),

    #[error("unknown demographic: {0}")]
    UnknownDemographic(String),

    #[error("unknown segment: {0}")]
    UnknownSegment(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

// ─── Channel fields ─────────────────────────────────────────────────────────

/// Editable numeric field of a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelField {
    Traffic,
    ConversionRate,
    BusinessShare,
    ReturnMix,
    AvgGroupSize,
}

impl ChannelField {
    pub fn parse(s: &str) -> Result<Self, SessionError> {
        match s {
            "traffic" => Ok(Self::Traffic),
            "cr" | "conversionRate" => Ok(Self::ConversionRate),
            "bizShare" | "businessShare" => Ok(Self::BusinessShare),
            "returnMix" => Ok(Self::ReturnMix),
            "avgGroupSize" => Ok(Self::AvgGroupSize),
            other => Err(SessionError::UnknownField(other.to_string())),
        }
    }
}

// ─── Session ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct ForecastSession {
    pub model: ModelConfig,
    pub fare_mix: FareMixConfig,
}

impl ForecastSession {
    pub fn set_price(&mut self, demographic: &str, price: Money) -> Result<(), SessionError> {
        let d = parse_demographic(demographic)?;
        self.model.prices.set(d, price);
        Ok(())
    }

    pub fn set_mix(&mut self, demographic: &str, weight: Decimal) -> Result<(), SessionError> {
        let d = parse_demographic(demographic)?;
        self.model.leisure_mix.set(d, weight);
        Ok(())
    }

    pub fn update_channel(
        &mut self,
        id: &str,
        field: &str,
        value: Decimal,
    ) -> Result<(), SessionError> {
        let field = ChannelField::parse(field)?;
        let ch = self
            .model
            .channel_mut(&ChannelId::from(id))
            .ok_or_else(|| SessionError::UnknownChannel(id.to_string()))?;
        match field {
            ChannelField::Traffic => ch.traffic = value,
            ChannelField::ConversionRate => ch.conversion_rate = value,
            ChannelField::BusinessShare => ch.business_share = value,
            ChannelField::ReturnMix => ch.return_mix = value,
            ChannelField::AvgGroupSize => ch.avg_group_size = value,
        }
        Ok(())
    }

    pub fn set_scenario_active(&mut self, active: bool) {
        self.model.scenario.active = active;
    }

    pub fn set_scenario_name(&mut self, name: &str) {
        self.model.scenario.name = name.to_string();
    }

    /// "all" or an existing channel id.
    pub fn set_target_channel(&mut self, target: &str) -> Result<(), SessionError> {
        let target = TargetChannel::from(target);
        if let TargetChannel::Channel(id) = &target {
            if self.model.channel(id).is_none() {
                return Err(SessionError::UnknownChannel(id.0.clone()));
            }
        }
        self.model.scenario.target_channel = target;
        Ok(())
    }

    pub fn set_target_segment(&mut self, segment: &str) -> Result<(), SessionError> {
        self.model.scenario.target_segment = TargetSegment::parse(segment)
            .ok_or_else(|| SessionError::UnknownSegment(segment.to_string()))?;
        Ok(())
    }

    pub fn set_yield_impact(&mut self, pct: Decimal) {
        self.model.scenario.yield_impact = pct;
    }

    pub fn set_cr_impact(&mut self, pct: Decimal) {
        self.model.scenario.cr_impact = pct;
    }

    pub fn set_fare_mix(&mut self, fare_mix: FareMixConfig) {
        self.fare_mix = fare_mix;
    }

    pub fn set_validation(&mut self, mode: ValidationMode) {
        self.model.validation = mode;
        self.fare_mix.validation = mode;
    }

    pub fn forecast(&self) -> Result<ForecastResult, SessionError> {
        Ok(self.model.forecast()?)
    }

    pub fn compare_fares(&self) -> Result<FareMixResult, SessionError> {
        Ok(self.fare_mix.compare()?)
    }
}

fn parse_demographic(s: &str) -> Result<Demographic, SessionError> {
    Demographic::parse(s).ok_or_else(|| SessionError::UnknownDemographic(s.to_string()))
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn update_channel_by_short_and_long_field_names() {
        let mut s = ForecastSession::default();
        s.update_channel("web", "cr", dec!(20)).expect("test: cr");
        s.update_channel("web", "businessShare", dec!(30)).expect("test: share");
        let web = s.model.channel(&ChannelId::from("web")).expect("test: web exists");
        assert_eq!(web.conversion_rate, dec!(20));
        assert_eq!(web.business_share, dec!(30));
    }

    #[test]
    fn unknown_names_are_rejected() {
        let mut s = ForecastSession::default();
        assert_eq!(
            s.update_channel("bus", "traffic", dec!(1)),
            Err(SessionError::UnknownChannel("bus".to_string()))
        );
        assert_eq!(
            s.update_channel("web", "speed", dec!(1)),
            Err(SessionError::UnknownField("speed".to_string()))
        );
        assert!(matches!(s.set_price("senior", Money(dec!(1))), Err(SessionError::UnknownDemographic(_))));
        assert!(matches!(s.set_target_segment("vip"), Err(SessionError::UnknownSegment(_))));
        assert!(matches!(s.set_target_channel("bus"), Err(SessionError::UnknownChannel(_))));
    }

    #[test]
    fn setters_change_next_forecast() {
        let mut s = ForecastSession::default();
        let before = s.forecast().expect("test: forecast");
        s.set_target_channel("all").expect("test: target all");
        s.set_target_segment("both").expect("test: both");
        s.set_yield_impact(dec!(10));
        let after = s.forecast().expect("test: forecast");
        assert_eq!(before.baseline, after.baseline);
        assert!(after.simulated.revenue > before.simulated.revenue);
        assert!(after.channel_details.iter().all(|d| d.impacted));
    }

    #[test]
    fn strict_session_surfaces_validation_error() {
        let mut s = ForecastSession::default();
        s.set_validation(ValidationMode::Strict);
        s.set_mix("adult", dec!(150)).expect("test: mix");
        assert!(matches!(s.forecast(), Err(SessionError::Validation(_))));
    }
}
