use super::*;

#[test]
fn defaults_resolve_to_default_parameter_set() {
    let p = ModulatorSettings::default().resolve().unwrap();
    assert_eq!(p, ParameterSet::default());
    assert_eq!(p.scale, 5.0);
    assert_eq!(p.drawing_count, 10);
    assert_eq!(p.interval_count, 2);
    assert_eq!(p.line_width, 2);
    assert_eq!(p.threshold, 255);
}

#[test]
fn resolve_clamps_then_truncates() {
    let s = ModulatorSettings {
        scale: 0.01,
        drawing_count: 0.0,
        interval_count: 250.0,
        line_width: 3.9,
        threshold: -4.0,
        opacity_white: 300.0,
        opacity_black: 127.99,
        ..ModulatorSettings::default()
    };
    let p = s.resolve().unwrap();
    assert_eq!(p.scale, 0.25);
    assert_eq!(p.drawing_count, 1);
    assert_eq!(p.interval_count, 100);
    assert_eq!(p.line_width, 3);
    assert_eq!(p.threshold, 0);
    assert_eq!(p.opacity_white, 255);
    assert_eq!(p.opacity_black, 127);
}

#[test]
fn resolve_rejects_non_finite() {
    let s = ModulatorSettings {
        scale: f64::NAN,
        ..ModulatorSettings::default()
    };
    let err = s.resolve().unwrap_err();
    assert!(matches!(err, ModulatorError::Validation(_)));
    assert!(err.to_string().contains("scale"));

    let s = ModulatorSettings {
        threshold: f64::INFINITY,
        ..ModulatorSettings::default()
    };
    assert!(s.resolve().is_err());
}

#[test]
fn json_fills_missing_fields_with_defaults() {
    let s = ModulatorSettings::from_json(r#"{ "scale": 12.5, "direction": "btt", "invert": true }"#)
        .unwrap();
    assert_eq!(s.scale, 12.5);
    assert_eq!(s.direction, Direction::BottomToTop);
    assert!(s.invert);
    assert_eq!(s.line_width, 2.0);
}

#[test]
fn json_rejects_unknown_fields() {
    let err = ModulatorSettings::from_json(r#"{ "scael": 1.0 }"#).unwrap_err();
    assert!(matches!(err, ModulatorError::Serde(_)));
}

#[test]
fn clamped_forces_ranges() {
    let p = ParameterSet {
        scale: 1000.0,
        drawing_count: 0,
        interval_count: 101,
        line_width: 0,
        threshold: 999,
        ..ParameterSet::default()
    }
    .clamped();
    assert_eq!(p.scale, 100.0);
    assert_eq!(p.drawing_count, 1);
    assert_eq!(p.interval_count, 100);
    assert_eq!(p.line_width, 1);
    assert_eq!(p.threshold, 255);
}
