// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Fare Forecast - channel yield and fare-mix revenue engines

pub mod core_types;
pub mod types;
pub mod config;
pub mod channel_yield;
pub mod fare_mix;
pub mod session;
pub mod adapter;

#[cfg(not(target_arch = "wasm32"))]
pub mod logging;

pub use types::*;
pub use core_types::{Horizon, Money};
pub use config::{ConfigError, FareMixConfig, ModelConfig, ValidationError, ValidationMode};
pub use channel_yield::{aggregate, compute_blended_yield, compute_channel_metrics, ForecastResult};
pub use fare_mix::{compare, FareMixResult};
pub use session::{ForecastSession, SessionError};

use adapter::{to_decimal, to_money};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

// ─── WASM Interface ──────────────────────────────────────────────────────────

/// Browser-facing handle over a [`ForecastSession`].
#[wasm_bindgen]
pub struct ForecastModel {
    session: ForecastSession,
}

#[wasm_bindgen]
impl ForecastModel {
    /// Reference preset: three channels, default prices, mix and scenario.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        #[cfg(target_arch = "wasm32")]
        std::panic::set_hook(Box::new(console_error_panic_hook::hook));

        Self { session: ForecastSession::default() }
    }

    /// Replace the whole channel model from a plain JS object.
    pub fn load_model(&mut self, config: JsValue) -> Result<(), JsValue> {
        let model: ModelConfig = serde_wasm_bindgen::from_value(config).map_err(js_err)?;
        self.session.model = model;
        Ok(())
    }

    pub fn set_fare_mix(&mut self, config: JsValue) -> Result<(), JsValue> {
        let fare_mix: FareMixConfig = serde_wasm_bindgen::from_value(config).map_err(js_err)?;
        self.session.set_fare_mix(fare_mix);
        Ok(())
    }

    pub fn set_price(&mut self, demographic: &str, value: f64) -> Result<(), JsValue> {
        self.session.set_price(demographic, to_money(value)).map_err(js_err)
    }

    pub fn set_mix(&mut self, demographic: &str, value: f64) -> Result<(), JsValue> {
        self.session.set_mix(demographic, to_decimal(value)).map_err(js_err)
    }

    pub fn update_channel(&mut self, id: &str, field: &str, value: f64) -> Result<(), JsValue> {
        self.session.update_channel(id, field, to_decimal(value)).map_err(js_err)
    }

    pub fn set_scenario_active(&mut self, active: bool) {
        self.session.set_scenario_active(active);
    }

    pub fn set_scenario_name(&mut self, name: &str) {
        self.session.set_scenario_name(name);
    }

    pub fn set_target_channel(&mut self, target: &str) -> Result<(), JsValue> {
        self.session.set_target_channel(target).map_err(js_err)
    }

    pub fn set_target_segment(&mut self, segment: &str) -> Result<(), JsValue> {
        self.session.set_target_segment(segment).map_err(js_err)
    }

    pub fn set_yield_impact(&mut self, pct: f64) {
        self.session.set_yield_impact(to_decimal(pct));
    }

    pub fn set_cr_impact(&mut self, pct: f64) {
        self.session.set_cr_impact(to_decimal(pct));
    }

    pub fn set_strict(&mut self, strict: bool) {
        let mode = if strict { ValidationMode::Strict } else { ValidationMode::Permissive };
        self.session.set_validation(mode);
    }

    /// `{baseline, simulated, channelDetails, impacts, ...}` as plain numbers.
    pub fn forecast(&self) -> Result<JsValue, JsValue> {
        let result = self.session.forecast().map_err(js_err)?;
        serde_wasm_bindgen::to_value(&adapter::forecast_view(&result)).map_err(js_err)
    }

    /// Per-product comparison, totals and share-sum checks as plain numbers.
    pub fn compare_fares(&self) -> Result<JsValue, JsValue> {
        let result = self.session.compare_fares().map_err(js_err)?;
        if !result.shares_valid() {
            log(&format!(
                "fare mix shares off 100: baseline {}, challenger {}",
                result.baseline_share.total, result.challenger_share.total
            ));
        }
        serde_wasm_bindgen::to_value(&adapter::fare_mix_view(&result)).map_err(js_err)
    }

    /// Current channel model as a JS object (Decimal fields as strings).
    pub fn get_model(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.session.model).unwrap_or(JsValue::NULL)
    }

    /// Restore the reference preset, keeping the fare-mix configuration.
    pub fn reset(&mut self) {
        self.session.model = ModelConfig::default();
    }
}

impl Default for ForecastModel {
    fn default() -> Self {
        Self::new()
    }
}
