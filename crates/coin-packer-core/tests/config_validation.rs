use coin_packer_core::prelude::*;
use coin_packer_core::CoinPackerError;

#[test]
fn default_config_is_valid() {
    let cfg = PackerConfig::default();
    assert!(cfg.validate().is_ok());
    assert_eq!(cfg.center(), (150.0, 150.0));
    assert_eq!(cfg.strategy, PackStrategy::Relaxation);
    assert_eq!(cfg.sort_order, SortOrder::SizeDesc);
}

#[test]
fn zero_or_non_finite_container_is_rejected() {
    for (w, h) in [(0.0, 100.0), (100.0, -1.0), (f64::NAN, 100.0), (100.0, f64::INFINITY)] {
        let cfg = PackerConfig::builder().with_container(w, h).build();
        match cfg.validate() {
            Err(CoinPackerError::InvalidDimensions { .. }) => {}
            other => panic!("{}x{}: expected InvalidDimensions, got {:?}", w, h, other),
        }
        assert!(PackingEngine::new(cfg).is_err());
    }
}

fn config_error(cfg: PackerConfig) -> String {
    match cfg.validate() {
        Err(CoinPackerError::InvalidConfig(msg)) => msg,
        other => panic!("expected InvalidConfig, got {:?}", other),
    }
}

#[test]
fn tuning_constants_are_range_checked() {
    let base = || PackerConfig::builder().with_container(200.0, 100.0);

    assert!(config_error(base().padding(-1.0).build()).contains("padding"));
    assert!(config_error(base().bounds_margin(50.0).build()).contains("bounds_margin"));
    assert!(config_error(base().step_size(0.0).build()).contains("step_size"));
    assert!(config_error(base().decay(0.0).build()).contains("decay"));
    assert!(config_error(base().decay(1.5).build()).contains("decay"));
    assert!(config_error(base().gravity_factor(-0.1).build()).contains("gravity_factor"));
    assert!(
        config_error(base().convergence_threshold(f64::NAN).build())
            .contains("convergence_threshold")
    );
    assert!(config_error(base().scan_angle_step_deg(0.0).build()).contains("scan_angle_step_deg"));
    assert!(config_error(base().scan_radial_step(-2.0).build()).contains("scan_radial_step"));
    assert!(config_error(base().scan_max_distance(0.0).build()).contains("scan_max_distance"));
}

#[test]
fn edge_values_are_accepted() {
    let cfg = PackerConfig::builder()
        .with_container(50.0, 50.0)
        .padding(0.0)
        .bounds_margin(0.0)
        .decay(1.0)
        .gravity_factor(0.0)
        .convergence_threshold(0.0)
        .max_iterations(0)
        .separation_passes(0)
        .scan_angle_step_deg(360.0)
        .build();
    assert!(cfg.validate().is_ok());
}

#[test]
fn error_messages_are_readable() {
    let err = PackingEngine::with_container(0.0, 10.0).unwrap_err();
    assert_eq!(err.to_string(), "Invalid container dimensions: 0x10");
}

#[test]
fn strategy_and_sort_order_parse_from_str() {
    assert_eq!("relax".parse::<PackStrategy>(), Ok(PackStrategy::Relaxation));
    assert_eq!("Radial_Scan".parse::<PackStrategy>(), Ok(PackStrategy::Radial));
    assert_eq!("scan".parse::<PackStrategy>(), Ok(PackStrategy::Radial));
    assert_eq!("auto".parse::<PackStrategy>(), Ok(PackStrategy::Auto));
    assert!("maxrects".parse::<PackStrategy>().is_err());

    assert_eq!("area_desc".parse::<SortOrder>(), Ok(SortOrder::AreaDesc));
    assert_eq!("KEY_ASC".parse::<SortOrder>(), Ok(SortOrder::KeyAsc));
    assert_eq!("none".parse::<SortOrder>(), Ok(SortOrder::None));
    assert!("random".parse::<SortOrder>().is_err());
}

#[test]
fn json_config_fills_in_defaults() {
    let cfg: PackerConfig = serde_json::from_str(
        r#"{"container_width": 240, "container_height": 120, "padding": 1.5, "strategy": "radialscan"}"#,
    )
    .unwrap();

    assert_eq!(cfg.container_width, 240.0);
    assert_eq!(cfg.padding, 1.5);
    assert_eq!(cfg.strategy, PackStrategy::Radial);
    assert_eq!(cfg.max_iterations, 150);
    assert_eq!(cfg.step_size, 0.5);
    assert_eq!(cfg.decay, 0.98);
    assert_eq!(cfg.gravity_factor, 0.01);
    assert_eq!(cfg.bounds_margin, 10.0);
    assert_eq!(cfg.sort_order, SortOrder::SizeDesc);
    assert!(!cfg.parallel);
}
