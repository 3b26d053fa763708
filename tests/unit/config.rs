use super::*;

#[test]
fn empty_object_gives_defaults() {
    let config = RasterConfig::from_json_str("{}").unwrap();
    assert_eq!(config, RasterConfig::default());
    assert_eq!(config.threads, 1);
    assert_eq!(config.culling, Culling::Clockwise);
    assert_eq!(config.clip_convention, ClipConvention::PositiveW);
    assert_eq!(config.fragment_batch_size, 2048);
}

#[test]
fn fields_override_defaults() {
    let config = RasterConfig::from_json_str(
        r#"{"threads": 4, "culling": "None", "clip_convention": "NegativeW", "triangle_batch_size": 7}"#,
    )
    .unwrap();
    assert_eq!(config.threads, 4);
    assert_eq!(config.culling, Culling::None);
    assert_eq!(config.clip_convention, ClipConvention::NegativeW);
    assert_eq!(config.triangle_batch_size, 7);
    assert_eq!(config.vertex_batch_size, 2048);
}

#[test]
fn zero_values_are_rejected() {
    assert!(RasterConfig::with_threads(0).validate().is_err());
    let err = RasterConfig::from_json_str(r#"{"vertex_batch_size": 0}"#).unwrap_err();
    assert!(matches!(err, RasterError::Validation(_)));
    assert!(err.to_string().contains("vertex_batch_size"));
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = RasterConfig::from_json_str("{threads: }").unwrap_err();
    assert!(matches!(err, RasterError::Serde(_)));
}

#[test]
fn from_json_file_round_trips() {
    let dir = std::env::temp_dir().join(format!("softraster-config-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("raster.json");
    let config = RasterConfig {
        threads: 3,
        culling: Culling::CounterClockwise,
        ..RasterConfig::default()
    };
    std::fs::write(&path, serde_json::to_string(&config).unwrap()).unwrap();

    assert_eq!(RasterConfig::from_json_file(&path).unwrap(), config);
    assert!(RasterConfig::from_json_file(dir.join("missing.json")).is_err());
    std::fs::remove_dir_all(&dir).ok();
}
