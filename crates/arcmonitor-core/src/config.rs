//! 애플리케이션 설정 구조체.
//!
//! 샘플링 주기, 캡처 주기, 저장소 경로, 웹 서버 설정 등
//! 런타임 설정을 정의한다. `ConfigManager`를 통해 JSON 파일에서 로드.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// 최상위 애플리케이션 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// 모니터링 설정
    #[serde(default)]
    pub monitor: MonitorConfig,
    /// 비전(스크린샷/영상) 설정
    #[serde(default)]
    pub vision: VisionConfig,
    /// 로컬 저장소 설정
    #[serde(default)]
    pub storage: StorageConfig,
    /// 웹 조회 API 설정
    #[serde(default)]
    pub web: WebConfig,
}

// ============================================================
// 모니터링 설정
// ============================================================

/// 활성 창 감지기 종류
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeKind {
    /// 플랫폼 네이티브 감지 (미지원 플랫폼은 고정값으로 대체)
    #[default]
    Native,
    /// 항상 같은 창을 보고하는 고정 감지기
    Static,
}

/// 샘플링 루프 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// 시작 시 모니터링 활성화 여부
    #[serde(default = "default_true")]
    pub enabled_at_start: bool,
    /// 메트릭 수집 주기 (초)
    #[serde(default = "default_metrics_interval_secs")]
    pub metrics_interval_secs: u64,
    /// 활동 루프 틱 주기 (밀리초)
    #[serde(default = "default_tick_ms")]
    pub activity_tick_ms: u64,
    /// 영상 루프 틱 주기 (밀리초)
    #[serde(default = "default_tick_ms")]
    pub video_tick_ms: u64,
    /// 모니터링 비활성 시 재확인 대기 (밀리초)
    #[serde(default = "default_tick_ms")]
    pub disabled_backoff_ms: u64,
    /// 유휴 판정 임계값 (초)
    #[serde(default = "default_inactivity_threshold_secs")]
    pub inactivity_threshold_secs: u64,
    /// 활성 창 감지기
    #[serde(default)]
    pub probe: ProbeKind,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            enabled_at_start: true,
            metrics_interval_secs: default_metrics_interval_secs(),
            activity_tick_ms: default_tick_ms(),
            video_tick_ms: default_tick_ms(),
            disabled_backoff_ms: default_tick_ms(),
            inactivity_threshold_secs: default_inactivity_threshold_secs(),
            probe: ProbeKind::Native,
        }
    }
}

// ============================================================
// 비전 설정
// ============================================================

/// 스크린샷/영상 캡처 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisionConfig {
    /// 활성 세션 스크린샷 주기 (초)
    #[serde(default = "default_screenshot_interval_secs")]
    pub screenshot_interval_secs: u64,
    /// 썸네일 최대 너비 (픽셀)
    #[serde(default = "default_thumbnail_width")]
    pub thumbnail_width: u32,
    /// 썸네일 최대 높이 (픽셀)
    #[serde(default = "default_thumbnail_height")]
    pub thumbnail_height: u32,
    /// JPEG 품질 (1-100)
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
    /// OCR 활성화 여부
    #[serde(default = "default_true")]
    pub ocr_enabled: bool,
    /// tessdata 경로 (None이면 시스템 기본값)
    #[serde(default)]
    pub tessdata_path: Option<PathBuf>,
    /// OCR 언어 (tesseract 언어 코드)
    #[serde(default = "default_ocr_language")]
    pub ocr_language: String,
    /// 영상 녹화 주기 (초)
    #[serde(default = "default_video_interval_secs")]
    pub video_interval_secs: u64,
    /// 영상 클립 길이 (초)
    #[serde(default = "default_video_duration_secs")]
    pub video_duration_secs: u64,
    /// 영상 프레임 레이트
    #[serde(default = "default_video_fps")]
    pub video_fps: u32,
    /// ffmpeg 실행 파일 경로
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: String,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            screenshot_interval_secs: default_screenshot_interval_secs(),
            thumbnail_width: default_thumbnail_width(),
            thumbnail_height: default_thumbnail_height(),
            jpeg_quality: default_jpeg_quality(),
            ocr_enabled: true,
            tessdata_path: None,
            ocr_language: default_ocr_language(),
            video_interval_secs: default_video_interval_secs(),
            video_duration_secs: default_video_duration_secs(),
            video_fps: default_video_fps(),
            ffmpeg_path: default_ffmpeg_path(),
        }
    }
}

// ============================================================
// 저장소 설정
// ============================================================

/// 로컬 저장소 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// 데이터 디렉토리 (None이면 플랫폼 기본 경로)
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    /// SQLite DB 파일 경로 (None이면 `<data_dir>/system_data.db`)
    #[serde(default)]
    pub db_path: Option<PathBuf>,
}

// ============================================================
// 웹 설정
// ============================================================

/// 웹 조회 API 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    /// 웹 서버 활성화 여부
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// 웹 서버 포트 (기본: 5000)
    #[serde(default = "default_web_port")]
    pub port: u16,
    /// 외부 접근 허용 여부 (false: 127.0.0.1 only)
    #[serde(default)]
    pub allow_external: bool,
    /// 조회 API 기본 이력 개수
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    /// 미디어 목록 스크린샷 개수
    #[serde(default = "default_media_screenshots")]
    pub media_screenshots: usize,
    /// 미디어 목록 영상 개수
    #[serde(default = "default_media_videos")]
    pub media_videos: usize,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            port: default_web_port(),
            allow_external: false,
            history_limit: default_history_limit(),
            media_screenshots: default_media_screenshots(),
            media_videos: default_media_videos(),
        }
    }
}

// ============================================================
// AppConfig impl
// ============================================================

impl AppConfig {
    /// 기본 설정값 반환
    pub fn default_config() -> Self {
        Self {
            monitor: MonitorConfig::default(),
            vision: VisionConfig::default(),
            storage: StorageConfig::default(),
            web: WebConfig::default(),
        }
    }

    /// 메트릭 수집 주기
    pub fn metrics_interval(&self) -> Duration {
        Duration::from_secs(self.monitor.metrics_interval_secs)
    }

    /// 활동 루프 틱 주기
    pub fn activity_tick(&self) -> Duration {
        Duration::from_millis(self.monitor.activity_tick_ms)
    }

    /// 영상 루프 틱 주기
    pub fn video_tick(&self) -> Duration {
        Duration::from_millis(self.monitor.video_tick_ms)
    }

    /// 비활성 상태 재확인 대기
    pub fn disabled_backoff(&self) -> Duration {
        Duration::from_millis(self.monitor.disabled_backoff_ms)
    }

    /// 영상 클립 길이
    pub fn video_duration(&self) -> Duration {
        Duration::from_secs(self.vision.video_duration_secs)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

// ============================================================
// 기본값 함수
// ============================================================

fn default_true() -> bool {
    true
}
fn default_metrics_interval_secs() -> u64 {
    5
}
fn default_tick_ms() -> u64 {
    1_000
}
fn default_inactivity_threshold_secs() -> u64 {
    60
}
fn default_screenshot_interval_secs() -> u64 {
    30
}
fn default_thumbnail_width() -> u32 {
    320
}
fn default_thumbnail_height() -> u32 {
    240
}
fn default_jpeg_quality() -> u8 {
    85
}
fn default_ocr_language() -> String {
    "eng".to_string()
}
fn default_video_interval_secs() -> u64 {
    1_800
}
fn default_video_duration_secs() -> u64 {
    10
}
fn default_video_fps() -> u32 {
    20
}
fn default_ffmpeg_path() -> String {
    "ffmpeg".to_string()
}
fn default_web_port() -> u16 {
    5000
}
fn default_history_limit() -> usize {
    10
}
fn default_media_screenshots() -> usize {
    5
}
fn default_media_videos() -> usize {
    3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_fills_defaults() {
        let json = r#"{ "vision": { "ocr_enabled": false }, "web": { "port": 8080 } }"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();

        assert!(!config.vision.ocr_enabled);
        assert_eq!(config.vision.screenshot_interval_secs, 30);
        assert_eq!(config.web.port, 8080);
        assert_eq!(config.web.history_limit, 10);
        assert_eq!(config.monitor.metrics_interval_secs, 5);
        assert_eq!(config.monitor.probe, ProbeKind::Native);
    }

    #[test]
    fn empty_json_is_default() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.vision.video_fps, 20);
        assert_eq!(config.web.media_screenshots, 5);
        assert_eq!(config.web.media_videos, 3);
        assert!(config.storage.data_dir.is_none());
    }

    #[test]
    fn probe_kind_lowercase() {
        let config: MonitorConfig = serde_json::from_str(r#"{ "probe": "static" }"#).unwrap();
        assert_eq!(config.probe, ProbeKind::Static);
    }

    #[test]
    fn duration_helpers() {
        let config = AppConfig::default_config();
        assert_eq!(config.metrics_interval(), Duration::from_secs(5));
        assert_eq!(config.activity_tick(), Duration::from_secs(1));
        assert_eq!(config.disabled_backoff(), Duration::from_secs(1));
        assert_eq!(config.video_duration(), Duration::from_secs(10));
    }
}
