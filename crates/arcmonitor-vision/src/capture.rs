//! 스크린 캡처.
//!
//! xcap 기반 주 모니터 캡처.

use arcmonitor_core::error::CoreError;
use image::RgbaImage;
use tracing::debug;
use xcap::Monitor;

/// 프레임 소스: 호출마다 화면 한 장을 RGBA로 반환
///
/// 동기 호출이며 blocking 스레드에서 사용한다.
pub trait FrameSource: Send + Sync {
    fn grab(&self) -> Result<RgbaImage, CoreError>;
}

/// 스크린 캡처: xcap 기반
#[derive(Debug, Default, Clone, Copy)]
pub struct ScreenCapture;

impl ScreenCapture {
    pub fn new() -> Self {
        Self
    }

    /// 주 모니터 (없으면 첫 번째 모니터)
    fn primary_monitor() -> Result<Monitor, CoreError> {
        let monitors = Monitor::all()
            .map_err(|e| CoreError::Capture(format!("모니터 목록 조회 실패: {e}")))?;

        let mut fallback = None;
        for monitor in monitors {
            if monitor.is_primary().unwrap_or(false) {
                return Ok(monitor);
            }
            if fallback.is_none() {
                fallback = Some(monitor);
            }
        }
        fallback.ok_or_else(|| CoreError::Capture("모니터를 찾을 수 없음".to_string()))
    }

    /// 사용 가능한 모니터 수
    pub fn monitor_count() -> Result<usize, CoreError> {
        Monitor::all()
            .map(|m| m.len())
            .map_err(|e| CoreError::Capture(format!("모니터 목록 조회 실패: {e}")))
    }
}

impl FrameSource for ScreenCapture {
    fn grab(&self) -> Result<RgbaImage, CoreError> {
        let image = Self::primary_monitor()?
            .capture_image()
            .map_err(|e| CoreError::Capture(format!("스크린 캡처 실패: {e}")))?;

        debug!("스크린 캡처 완료: {}x{}", image.width(), image.height());
        Ok(image)
    }
}
