//! 설정 로드 통합 테스트.

use arcmonitor_core::config::{AppConfig, ProbeKind};
use arcmonitor_core::config_manager::ConfigManager;
use std::time::Duration;

#[test]
fn partial_config_file_fills_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{ "monitor": { "probe": "static" }, "web": { "port": 7000 } }"#,
    )
    .unwrap();

    let config = ConfigManager::with_path(path).unwrap().get();
    assert_eq!(config.monitor.probe, ProbeKind::Static);
    assert_eq!(config.web.port, 7000);
    assert_eq!(config.metrics_interval(), Duration::from_secs(5));
    assert_eq!(config.vision.screenshot_interval_secs, 30);
    assert_eq!(config.monitor.inactivity_threshold_secs, 60);
    assert_eq!(config.vision.video_interval_secs, 1800);
    assert_eq!(config.video_duration(), Duration::from_secs(10));
}

#[test]
fn hand_edited_default_file_is_honored() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");

    ConfigManager::with_path(path.clone()).unwrap();
    let mut json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    json["vision"]["ocr_enabled"] = serde_json::Value::Bool(false);
    std::fs::write(&path, serde_json::to_string_pretty(&json).unwrap()).unwrap();

    let reloaded = ConfigManager::with_path(path).unwrap().get();
    assert!(!reloaded.vision.ocr_enabled);
    assert_eq!(reloaded.web.port, 5000);
}

#[test]
fn malformed_config_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = ConfigManager::with_path(path).unwrap_err();
    assert!(err.to_string().contains("설정"));
}

#[test]
fn default_config_round_trips_through_json() {
    let json = serde_json::to_string(&AppConfig::default_config()).unwrap();
    let parsed: AppConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.web.port, 5000);
    assert_eq!(parsed.monitor.probe, ProbeKind::Native);
}
