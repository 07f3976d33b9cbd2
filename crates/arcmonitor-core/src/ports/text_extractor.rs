//! 텍스트 추출 포트.
//!
//! 구현: `arcmonitor-vision` crate (Tesseract, `ocr` feature)

use crate::error::CoreError;

/// 흑백 이미지에서 텍스트 추출
///
/// CPU 바운드 작업이므로 동기 trait이며, 호출자는 blocking 스레드에서 실행한다.
pub trait TextExtractor: Send + Sync {
    /// `gray`: 행 우선 8비트 흑백 픽셀 (`width * height` 바이트)
    fn extract_text(&self, gray: &[u8], width: u32, height: u32) -> Result<String, CoreError>;

    /// 추출이 실제로 수행되는지 (비활성 구현은 false)
    fn is_enabled(&self) -> bool;
}
