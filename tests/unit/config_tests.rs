use std::fs;

use pdx_redact::{ConfigError, Error, SweepConfig};
use tempfile::TempDir;

#[test]
fn test_load_config_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sweep.json");
    fs::write(
        &path,
        r#"{
            "unsupported_direct_filters": ["JBIG2Decode"],
            "arc_tolerance": 0.01
        }"#,
    )
    .unwrap();

    let config = SweepConfig::from_json_file(&path).unwrap();
    assert_eq!(config.unsupported_direct_filters, vec!["JBIG2Decode"]);
    assert_eq!(config.arc_tolerance, 0.01);
    assert_eq!(config.clipper_scale, SweepConfig::default().clipper_scale);
}

#[test]
fn test_missing_file_reports_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.json");

    match SweepConfig::from_json_file(&path) {
        Err(Error::ConfigError(ConfigError::Read { path: reported, .. })) => {
            assert!(reported.ends_with("absent.json"));
        }
        other => panic!("expected read error, got {:?}", other),
    }
}

#[test]
fn test_invalid_values_in_file_are_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, r#"{"epsilon": -1.0}"#).unwrap();

    assert!(matches!(
        SweepConfig::from_json_file(&path),
        Err(Error::ConfigError(ConfigError::Validation(_)))
    ));
}

#[test]
fn test_set_then_roundtrip_through_json() {
    let mut config = SweepConfig::default();
    config.set("curve_tolerance", "0.5").unwrap();
    config.set("unsupported_direct_filters", "").unwrap();

    let json = serde_json::to_string(&config).unwrap();
    let reloaded = SweepConfig::from_json_str(&json).unwrap();
    assert_eq!(reloaded, config);
    assert!(reloaded.unsupported_direct_filters.is_empty());
}

#[test]
fn test_filter_built_from_custom_config() {
    let config = SweepConfig::from_json_str(r#"{"unsupported_direct_filters": []}"#).unwrap();
    let filter = pdx_redact::RegionFilter::new(vec![], config).unwrap();
    let image = pdx_redact::PdfImage::new((1, 0), 2, 2)
        .with_color_space("DeviceGray")
        .with_filter(lopdf::Object::Name(b"DCTDecode".to_vec()));
    assert!(filter.supports_direct_cleaning(&image));
}
