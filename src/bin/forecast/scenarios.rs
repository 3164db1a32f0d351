// Scenario Catalogue: named what-if shocks evaluated against the loaded model
// Each preset only replaces the model's scenario; channels/prices/mix stay as loaded

use fare_forecast::{
    FareKind, FareMixConfig, FareMixInputs, FareProduct, Money, Scenario, TargetChannel,
    TargetSegment,
};
use rust_decimal_macros::dec;

// ─── Preset Configuration ───────────────────────────────────────────────────

pub struct Preset {
    pub name: &'static str,
    pub label: &'static str,
    pub category: &'static str,
    pub scenario: Scenario,
}

fn shock(
    name: &str,
    target: &str,
    segment: TargetSegment,
    yield_impact: rust_decimal::Decimal,
    cr_impact: rust_decimal::Decimal,
) -> Scenario {
    Scenario {
        active: true,
        name: name.to_string(),
        target_channel: TargetChannel::from(target),
        target_segment: segment,
        yield_impact,
        cr_impact,
    }
}

pub fn presets() -> Vec<Preset> {
    vec![
        // ─── Controls ───────────────────────────────────────────────────
        Preset { name: "CONTROL_NO_OP", label: "Zero-Impact Control", category: "control",
            scenario: shock("Control", "all", TargetSegment::Both, dec!(0), dec!(0)) },
        Preset { name: "CONTROL_INACTIVE", label: "Inactive Scenario", category: "control",
            scenario: Scenario { active: false,
                ..shock("Inactive", "all", TargetSegment::Both, dec!(25), dec!(25)) } },

        // ─── Pricing ────────────────────────────────────────────────────
        Preset { name: "WEB_LEISURE_DISCOUNT", label: "Web Leisure -15% / +25% CR", category: "pricing",
            scenario: shock("Web leisure discount", "web", TargetSegment::Leisure, dec!(-15), dec!(25)) },
        Preset { name: "FLEET_PRICE_RISE", label: "Fleet +5% Price / -3% CR", category: "pricing",
            scenario: shock("Fleet price rise", "all", TargetSegment::Both, dec!(5), dec!(-3)) },
        Preset { name: "BUSINESS_PREMIUM", label: "Business +10% Yield", category: "pricing",
            scenario: shock("Business premium", "all", TargetSegment::Business, dec!(10), dec!(-2)) },

        // ─── Conversion ─────────────────────────────────────────────────
        Preset { name: "APP_CONVERSION_PUSH", label: "App +20% CR", category: "conversion",
            scenario: shock("App push", "app", TargetSegment::Both, dec!(0), dec!(20)) },
        Preset { name: "KIOSK_OUTAGE", label: "Kiosk -50% CR", category: "conversion",
            scenario: shock("Kiosk outage", "kiosk", TargetSegment::Both, dec!(0), dec!(-50)) },
    ]
}

// ─── Fare-Mix Sample ────────────────────────────────────────────────────────

/// Built-in comparison used when no fare-mix file is given: the challenger
/// shifts volume from singles into flex-eligible returns and commuter passes.
pub fn sample_fare_mix() -> FareMixConfig {
    FareMixConfig {
        products: vec![
            FareProduct {
                name: "Adult".to_string(),
                single_price: Money(dec!(340)), return_price: Money(dec!(640)),
                group_size: dec!(1),
                baseline_share: dec!(55), baseline_return_share: dec!(30),
                challenger_share: dec!(50), challenger_return_share: dec!(40),
                challenger_flex_share: dec!(15),
                ..FareProduct::default()
            },
            FareProduct {
                name: "Youth".to_string(),
                single_price: Money(dec!(160)), return_price: Money(dec!(300)),
                group_size: dec!(1),
                baseline_share: dec!(20), baseline_return_share: dec!(25),
                challenger_share: dec!(20), challenger_return_share: dec!(30),
                challenger_flex_share: dec!(5),
                ..FareProduct::default()
            },
            FareProduct {
                name: "Group 4".to_string(),
                single_price: Money(dec!(900)), return_price: Money(dec!(1700)),
                group_size: dec!(4),
                baseline_share: dec!(10), baseline_return_share: dec!(50),
                challenger_share: dec!(10), challenger_return_share: dec!(55),
                challenger_flex_share: dec!(10),
                ..FareProduct::default()
            },
            FareProduct {
                name: "12-trip".to_string(),
                single_price: Money(dec!(2900)), return_price: Money(dec!(2900)),
                kind: FareKind::Pass { trip_allowance: 12 },
                baseline_share: dec!(10), challenger_share: dec!(12),
                ..FareProduct::default()
            },
            FareProduct {
                name: "24-trip".to_string(),
                single_price: Money(dec!(5200)), return_price: Money(dec!(5200)),
                kind: FareKind::Pass { trip_allowance: 24 },
                baseline_share: dec!(5), challenger_share: dec!(8),
                ..FareProduct::default()
            },
        ],
        inputs: FareMixInputs {
            target_volume: dec!(1200000),
            flex_price: Money(dec!(49)),
            return_discount: dec!(5),
        },
        ..FareMixConfig::default()
    }
}
