//! `CaptureService` 포트 구현.
//!
//! 스크린샷: 캡처 → 원본 JPEG 저장 → 썸네일 → OCR.
//! 영상: ffmpeg 클립 녹화.
//! 모든 CPU/디스크 작업은 `spawn_blocking`에서 실행한다.

use arcmonitor_core::config::VisionConfig;
use arcmonitor_core::error::CoreError;
use arcmonitor_core::models::artifact::ArtifactKind;
use arcmonitor_core::ports::capture::{CaptureService, ScreenshotArtifact};
use arcmonitor_core::ports::text_extractor::TextExtractor;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use image::DynamicImage;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::capture::FrameSource;
use crate::video::ClipRecorder;
use crate::{encoder, ocr, thumbnail};

/// 캡처 설정
#[derive(Debug, Clone)]
pub struct CaptureSettings {
    /// 산출물 루트 (하위에 screenshots/, videos/)
    pub data_dir: PathBuf,
    pub thumbnail_width: u32,
    pub thumbnail_height: u32,
    pub jpeg_quality: u8,
    pub video_fps: u32,
    pub ffmpeg_path: String,
}

impl CaptureSettings {
    pub fn from_config(vision: &VisionConfig, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            thumbnail_width: vision.thumbnail_width,
            thumbnail_height: vision.thumbnail_height,
            jpeg_quality: vision.jpeg_quality,
            video_fps: vision.video_fps,
            ffmpeg_path: vision.ffmpeg_path.clone(),
        }
    }
}

/// 화면 캡처 서비스
#[derive(Clone)]
pub struct ScreenCaptureService {
    settings: CaptureSettings,
    source: Arc<dyn FrameSource>,
    extractor: Arc<dyn TextExtractor>,
    recorder: ClipRecorder,
}

impl ScreenCaptureService {
    pub fn new(
        settings: CaptureSettings,
        source: Arc<dyn FrameSource>,
        extractor: Arc<dyn TextExtractor>,
    ) -> Self {
        let recorder = ClipRecorder::new(settings.ffmpeg_path.clone(), settings.video_fps);
        Self {
            settings,
            source,
            extractor,
            recorder,
        }
    }

    /// 산출물 경로 준비 (디렉토리가 없으면 생성)
    fn artifact_path(&self, kind: ArtifactKind, at: DateTime<Utc>) -> Result<PathBuf, CoreError> {
        let dir = kind.dir_in(&self.settings.data_dir);
        std::fs::create_dir_all(&dir).map_err(|e| {
            CoreError::Capture(format!("산출물 디렉토리 생성 실패: {}: {e}", dir.display()))
        })?;
        Ok(dir.join(kind.file_name(at)))
    }

    fn screenshot_blocking(&self, captured_at: DateTime<Utc>) -> Result<ScreenshotArtifact, CoreError> {
        let frame = self.source.grab()?;
        let image = DynamicImage::ImageRgba8(frame);

        let path = self.artifact_path(ArtifactKind::Screenshot, captured_at)?;
        encoder::save_jpeg(&image, &path, self.settings.jpeg_quality)?;

        let thumbnail = match self.encode_thumbnail(&image) {
            Ok(bytes) => bytes,
            Err(e) => {
                let _ = std::fs::remove_file(&path);
                return Err(e);
            }
        };

        let extracted_text = ocr::extract_best_effort(self.extractor.as_ref(), &image);

        debug!(
            "스크린샷 저장: {} (썸네일 {}B, 텍스트 {}자)",
            path.display(),
            thumbnail.len(),
            extracted_text.chars().count()
        );

        Ok(ScreenshotArtifact {
            captured_at,
            path,
            thumbnail,
            extracted_text,
        })
    }

    fn encode_thumbnail(&self, image: &DynamicImage) -> Result<Vec<u8>, CoreError> {
        let thumb = thumbnail::make_thumbnail(
            image,
            self.settings.thumbnail_width,
            self.settings.thumbnail_height,
        )?;
        encoder::encode_jpeg(&thumb, self.settings.jpeg_quality)
    }

    fn record_blocking(&self, started_at: DateTime<Utc>, duration: Duration) -> Result<PathBuf, CoreError> {
        let path = self.artifact_path(ArtifactKind::Video, started_at)?;
        self.recorder.record(self.source.as_ref(), &path, duration)?;
        Ok(path)
    }
}

#[async_trait]
impl CaptureService for ScreenCaptureService {
    async fn screenshot(&self) -> Result<ScreenshotArtifact, CoreError> {
        let this = self.clone();
        let captured_at = Utc::now();
        tokio::task::spawn_blocking(move || this.screenshot_blocking(captured_at))
            .await
            .map_err(|e| CoreError::Internal(format!("스크린샷 작업 실패: {e}")))?
    }

    async fn record_clip(&self, duration: Duration) -> Result<PathBuf, CoreError> {
        let this = self.clone();
        let started_at = Utc::now();
        tokio::task::spawn_blocking(move || this.record_blocking(started_at, duration))
            .await
            .map_err(|e| CoreError::Internal(format!("영상 녹화 작업 실패: {e}")))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;
    use tempfile::TempDir;

    struct FakeScreen {
        width: u32,
        height: u32,
    }

    impl FrameSource for FakeScreen {
        fn grab(&self) -> Result<RgbaImage, CoreError> {
            Ok(RgbaImage::from_fn(self.width, self.height, |x, y| {
                image::Rgba([(x % 255) as u8, (y % 255) as u8, 90, 255])
            }))
        }
    }

    struct NoScreen;

    impl FrameSource for NoScreen {
        fn grab(&self) -> Result<RgbaImage, CoreError> {
            Err(CoreError::Capture("모니터를 찾을 수 없음".into()))
        }
    }

    struct EchoExtractor;

    impl TextExtractor for EchoExtractor {
        fn extract_text(&self, _: &[u8], width: u32, height: u32) -> Result<String, CoreError> {
            Ok(format!("{width}x{height}"))
        }
        fn is_enabled(&self) -> bool {
            true
        }
    }

    struct CrashingExtractor;

    impl TextExtractor for CrashingExtractor {
        fn extract_text(&self, _: &[u8], _: u32, _: u32) -> Result<String, CoreError> {
            Err(CoreError::OcrError("engine missing".into()))
        }
        fn is_enabled(&self) -> bool {
            true
        }
    }

    fn service(dir: &TempDir, source: Arc<dyn FrameSource>, extractor: Arc<dyn TextExtractor>) -> ScreenCaptureService {
        let settings = CaptureSettings::from_config(&VisionConfig::default(), dir.path());
        ScreenCaptureService::new(settings, source, extractor)
    }

    #[tokio::test]
    async fn screenshot_writes_artifact_and_thumbnail() {
        let dir = TempDir::new().unwrap();
        let svc = service(
            &dir,
            Arc::new(FakeScreen { width: 800, height: 600 }),
            Arc::new(EchoExtractor),
        );

        let artifact = svc.screenshot().await.unwrap();

        assert!(artifact.path.starts_with(dir.path().join("screenshots")));
        assert_eq!(
            artifact.path.file_name().unwrap().to_str().unwrap(),
            ArtifactKind::Screenshot.file_name(artifact.captured_at)
        );
        let full = image::open(&artifact.path).unwrap();
        assert_eq!((full.width(), full.height()), (800, 600));

        let thumb = image::load_from_memory(&artifact.thumbnail).unwrap();
        assert_eq!((thumb.width(), thumb.height()), (320, 240));

        // OCR은 썸네일이 아닌 원본 해상도에서 수행
        assert_eq!(artifact.extracted_text, "800x600");
    }

    #[tokio::test]
    async fn extraction_failure_keeps_capture() {
        let dir = TempDir::new().unwrap();
        let svc = service(
            &dir,
            Arc::new(FakeScreen { width: 100, height: 50 }),
            Arc::new(CrashingExtractor),
        );

        let artifact = svc.screenshot().await.unwrap();
        assert!(artifact.extracted_text.is_empty());
        assert!(artifact.path.exists());
        assert!(!artifact.thumbnail.is_empty());
    }

    #[tokio::test]
    async fn capture_failure_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let svc = service(&dir, Arc::new(NoScreen), Arc::new(EchoExtractor));

        let err = svc.screenshot().await.unwrap_err();
        assert!(matches!(err, CoreError::Capture(_)));
        assert!(!dir.path().join("screenshots").exists());
    }

    #[tokio::test]
    async fn clip_failure_leaves_no_video() {
        let dir = TempDir::new().unwrap();
        let mut settings = CaptureSettings::from_config(&VisionConfig::default(), dir.path());
        settings.ffmpeg_path = "arcmonitor-no-such-ffmpeg".to_string();
        let svc = ScreenCaptureService::new(
            settings,
            Arc::new(FakeScreen { width: 64, height: 48 }),
            Arc::new(EchoExtractor),
        );

        let err = svc.record_clip(Duration::from_millis(100)).await.unwrap_err();
        assert!(matches!(err, CoreError::VideoEncode(_)));
        let videos: Vec<_> = std::fs::read_dir(dir.path().join("videos"))
            .unwrap()
            .collect();
        assert!(videos.is_empty());
    }
}
