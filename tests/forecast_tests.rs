#[cfg(test)]
mod tests {
    use fare_forecast::channel_yield::{aggregate, compute_blended_yield, compute_channel_metrics};
    use fare_forecast::fare_mix::{compare, ShareCheck};
    use fare_forecast::{
        logging, Channel, ChannelId, FareKind, FareMixInputs, FareProduct, ForecastSession, Horizon,
        LeisureMix, ModelConfig, Money, PriceTable, Scenario, TargetChannel, TargetSegment,
    };
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn fleet_scenario(yield_impact: Decimal, cr_impact: Decimal) -> Scenario {
        Scenario {
            active: true,
            name: "fleet".to_string(),
            target_channel: TargetChannel::All,
            target_segment: TargetSegment::Both,
            yield_impact,
            cr_impact,
        }
    }

    fn channels() -> Vec<Channel> {
        ModelConfig::default().channels
    }

    // ========== Zero-Impact Invariance ==========

    #[test]
    fn test_zero_impact_scenario_matches_baseline() {
        logging::init_test();
        for segment in [TargetSegment::Business, TargetSegment::Leisure, TargetSegment::Both] {
            let s = Scenario { target_segment: segment, ..fleet_scenario(dec!(0), dec!(0)) };
            let r = aggregate(&channels(), &s, &PriceTable::default(), &LeisureMix::default());
            assert_eq!(r.baseline, r.simulated, "segment {segment:?}");
            for d in &r.channel_details {
                assert_eq!(d.base, d.sim, "channel {}", d.id);
            }
        }
    }

    #[test]
    fn test_inactive_scenario_matches_baseline() {
        let s = Scenario { active: false, ..fleet_scenario(dec!(30), dec!(40)) };
        let r = aggregate(&channels(), &s, &PriceTable::default(), &LeisureMix::default());
        assert_eq!(r.baseline, r.simulated);
        assert!(r.channel_details.iter().all(|d| !d.impacted));
    }

    // ========== Normalization Invariance ==========

    #[test]
    fn test_blended_yield_invariant_to_mix_scale() {
        let prices = PriceTable::default();
        let full = LeisureMix { adult: dec!(60), pensioner: dec!(20), youth: dec!(10), child: dec!(10) };
        let small = LeisureMix { adult: dec!(6), pensioner: dec!(2), youth: dec!(1), child: dec!(1) };
        let big = LeisureMix { adult: dec!(600), pensioner: dec!(200), youth: dec!(100), child: dec!(100) };
        let y = compute_blended_yield(&prices, &full);
        assert_eq!(y, compute_blended_yield(&prices, &small));
        assert_eq!(y, compute_blended_yield(&prices, &big));
        assert_eq!(y, Money(dec!(278)));
    }

    // ========== Zero-Traffic Boundary ==========

    #[test]
    fn test_zero_traffic_channel_is_all_zero() {
        let ch = Channel { traffic: dec!(0), ..channels()[0].clone() };
        let s = fleet_scenario(dec!(20), dec!(50));
        for apply in [false, true] {
            let m = compute_channel_metrics(&ch, &s, Money(dec!(340)), Money(dec!(278)), apply);
            assert_eq!(m.transactions, Decimal::ZERO);
            assert_eq!(m.total_passengers, Decimal::ZERO);
            assert_eq!(m.revenue, Money::zero());
        }
    }

    // ========== Monotonicity ==========

    #[test]
    fn test_cr_impact_monotone_in_passengers() {
        let mut last: Option<Decimal> = None;
        for cr_impact in [-50, -20, 0, 10, 25, 50, 100] {
            let s = fleet_scenario(dec!(0), Decimal::from(cr_impact));
            let r = aggregate(&channels(), &s, &PriceTable::default(), &LeisureMix::default());
            if let Some(prev) = last {
                assert!(
                    r.simulated.passengers > prev,
                    "crImpact {cr_impact}: {} <= {prev}",
                    r.simulated.passengers
                );
            }
            last = Some(r.simulated.passengers);
        }
    }

    // ========== Concrete Scenarios ==========

    #[test]
    fn test_web_reference_scenario() {
        let web = channels()[0].clone();
        let s = Scenario { active: false, ..Scenario::default() };
        let r = aggregate(&[web], &s, &PriceTable::default(), &LeisureMix::default());
        let d = &r.channel_details[0];
        assert_eq!(r.leisure_yield, Money(dec!(278)));
        assert_eq!(d.base.transactions, dec!(22500));
        assert_eq!(d.base.total_tickets, dec!(27000));
        assert_eq!(d.base.total_passengers, dec!(37800));
        // 13500*340*1.4 + 13500*278*1.4 = 6426000 + 5254200
        assert_eq!(d.base.revenue, Money(dec!(11680200)));
    }

    #[test]
    fn test_fare_mix_reference_product() {
        let product = FareProduct {
            name: "Adult".to_string(),
            single_price: Money(dec!(340)),
            return_price: Money(dec!(640)),
            group_size: dec!(1),
            baseline_share: dec!(100),
            baseline_return_share: dec!(30),
            ..FareProduct::default()
        };
        let inputs = FareMixInputs { target_volume: dec!(1000), ..FareMixInputs::default() };
        let r = compare(&[product], &inputs);
        let p = &r.products[0];
        assert_eq!(p.baseline_blended_price, Money(dec!(430)));
        assert_eq!(p.baseline_revenue, Money(dec!(430000)));
        assert_eq!(p.baseline_pax, dec!(1300));
        assert_eq!(r.baseline_revenue, Money(dec!(430000)));
    }

    // ========== Share-Sum Validation ==========

    #[test]
    fn test_share_sum_tolerance() {
        let product = |share: Decimal| FareProduct {
            baseline_share: share,
            challenger_share: share,
            ..FareProduct::default()
        };
        let inputs = FareMixInputs::default();
        let ok = compare(&[product(dec!(60)), product(dec!(40.05))], &inputs);
        assert_eq!(ok.baseline_share, ShareCheck { total: dec!(100.05), valid: true });
        let bad = compare(&[product(dec!(60)), product(dec!(40.2))], &inputs);
        assert!(!bad.baseline_share.valid);
        assert!(!bad.shares_valid());
    }

    #[test]
    fn test_pass_products_exempt_from_flex() {
        let pass = FareProduct {
            name: "12-trip".to_string(),
            single_price: Money(dec!(2900)),
            kind: FareKind::Pass { trip_allowance: 12 },
            baseline_share: dec!(100),
            challenger_share: dec!(100),
            challenger_flex_share: dec!(100),
            ..FareProduct::default()
        };
        let inputs = FareMixInputs {
            target_volume: dec!(120),
            flex_price: Money(dec!(49)),
            return_discount: dec!(50),
        };
        let r = compare(&[pass], &inputs);
        assert_eq!(r.challenger_revenue, r.baseline_revenue);
        assert_eq!(r.baseline_pax, dec!(1440));
        assert_eq!(r.monthly_delta(), Money::zero());
    }

    // ========== Session & Horizons ==========

    #[test]
    fn test_session_roundtrip_on_default_preset() {
        let mut s = ForecastSession::default();
        s.set_target_channel("web").expect("web exists");
        s.set_target_segment("leisure").expect("leisure segment");
        s.set_yield_impact(dec!(-15));
        s.set_cr_impact(dec!(25));
        let r = s.forecast().expect("permissive forecast");

        let web = r.detail(&ChannelId::from("web")).expect("web detail");
        assert!(web.impacted);
        // leisure share 50: 15 + 15 * 0.5 * 0.25
        assert_eq!(web.sim.effective_conversion_rate, dec!(16.875));
        let app = r.detail(&ChannelId::from("app")).expect("app detail");
        assert!(!app.impacted);
        assert_eq!(app.base, app.sim);

        let month = r.impact(Horizon::Month);
        let year = r.impact(Horizon::Year);
        assert_eq!(year.revenue, month.revenue * dec!(12));
        assert_eq!(year.passengers, month.passengers * dec!(12));
    }

    #[test]
    fn test_model_config_from_json() {
        let json = r#"{
            "channels": [{"id":"web","name":"Website","traffic":150000,"cr":15.0,
                          "bizShare":50,"returnMix":40,"avgGroupSize":1.2}],
            "scenario": {"active":true,"name":"Spring","targetChannel":"all",
                         "targetSegment":"both","yieldImpact":0,"crImpact":0}
        }"#;
        let cfg = ModelConfig::from_json_str(json).expect("valid config");
        let r = cfg.forecast().expect("permissive forecast");
        assert_eq!(r.baseline.revenue, Money(dec!(11680200)));
        assert_eq!(r.baseline, r.simulated);
    }
}
