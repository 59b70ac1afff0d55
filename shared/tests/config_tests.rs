use shared::reveal::DEFAULT_QUERY;
use shared::{DashboardConfig, DashboardError};

#[test]
fn defaults_are_valid() {
    let config = DashboardConfig::default();
    config.validate().expect("defaults validate");
    assert_eq!(config.mount.visibility_threshold, 0.05);
    assert_eq!(config.mount.narrow_breakpoint, 768.0);
    assert_eq!(config.reveal.query(), DEFAULT_QUERY);
    assert_eq!(config.seed, None);
}

#[test]
fn partial_json_keeps_other_defaults() {
    let config = DashboardConfig::from_json(
        r#"{ "seed": 42, "mount": { "aspect": { "wide_radial": 1.3 } } }"#,
    )
    .expect("valid config");

    assert_eq!(config.seed, Some(42));
    assert_eq!(config.mount.aspect.wide_radial, 1.3);
    assert_eq!(config.mount.aspect.wide_rectangular, 2.0);
    assert_eq!(config.mount.visibility_threshold, 0.05);
    assert_eq!(config.log_level, "info");
}

#[test]
fn empty_object_is_the_default() {
    assert_eq!(
        DashboardConfig::from_json("{}").expect("valid"),
        DashboardConfig::default()
    );
}

#[test]
fn out_of_range_values_are_rejected() {
    for json in [
        r#"{ "mount": { "visibility_threshold": 0.0 } }"#,
        r#"{ "mount": { "visibility_threshold": 1.5 } }"#,
        r#"{ "mount": { "narrow_breakpoint": -1 } }"#,
        r#"{ "mount": { "aspect": { "narrow_radial": 0 } } }"#,
        r#"{ "reveal": { "threshold": 2 } }"#,
        r#"{ "reveal": { "selectors": [] } }"#,
        r#"{ "reveal": { "selectors": [".fade-in", "  "] } }"#,
        r#"{ "reveal": { "root_margin": "bogus" } }"#,
        r#"{ "reveal": { "root_margin": "0px 0px -20em 0px" } }"#,
        r#"{ "reveal": { "class_name": "is visible" } }"#,
    ] {
        let err = DashboardConfig::from_json(json).expect_err(json);
        assert!(matches!(err, DashboardError::InvalidConfig(_)), "{json}: {err}");
    }
}

#[test]
fn malformed_json_is_a_parse_error() {
    let err = DashboardConfig::from_json("{ seed: 1 }").expect_err("not json");
    assert!(matches!(err, DashboardError::ConfigParse(_)));
}

#[test]
fn reveal_overrides_within_grammar_are_accepted() {
    let config = DashboardConfig::from_json(
        r#"{ "reveal": { "root_margin": "10% 0px", "selectors": [".card"], "class_name": "shown" } }"#,
    )
    .expect("valid reveal config");
    assert_eq!(config.reveal.query(), ".card");
}
