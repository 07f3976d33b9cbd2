//! 캡처 서비스 포트.
//!
//! 구현: `arcmonitor-vision` crate (xcap, image, fast_image_resize, ffmpeg)

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::CoreError;

/// 스크린샷 캡처 결과
#[derive(Debug, Clone)]
pub struct ScreenshotArtifact {
    /// 캡처 시각 (파일 이름에 사용된 시각)
    pub captured_at: DateTime<Utc>,
    /// 원본 해상도 JPEG 파일 경로
    pub path: PathBuf,
    /// 저장용 축소 JPEG
    pub thumbnail: Vec<u8>,
    /// OCR 텍스트 (실패 또는 비활성 시 빈 문자열)
    pub extracted_text: String,
}

/// 화면 캡처 서비스: 호출마다 독립적이며 내부 상태 없음
#[async_trait]
pub trait CaptureService: Send + Sync {
    /// 전체 화면 캡처 → 원본 저장 + 썸네일 + 텍스트 추출
    async fn screenshot(&self) -> Result<ScreenshotArtifact, CoreError>;

    /// 주 모니터를 `duration` 동안 녹화하여 영상 파일 경로 반환
    ///
    /// 실패 시 부분 파일은 남기지 않는다.
    async fn record_clip(&self, duration: Duration) -> Result<PathBuf, CoreError>;
}
