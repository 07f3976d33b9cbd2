//! OCR 텍스트 추출.
//!
//! `TextExtractor` 포트 구현. Tesseract 구현은 `ocr` feature 활성화 시에만 빌드되며,
//! 그 외에는 항상 빈 텍스트를 돌려주는 `DisabledExtractor`를 쓴다.

use arcmonitor_core::error::CoreError;
use arcmonitor_core::ports::text_extractor::TextExtractor;
use image::DynamicImage;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// 텍스트 추출 비활성 구현
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledExtractor;

impl TextExtractor for DisabledExtractor {
    fn extract_text(&self, _gray: &[u8], _width: u32, _height: u32) -> Result<String, CoreError> {
        Ok(String::new())
    }

    fn is_enabled(&self) -> bool {
        false
    }
}

/// Tesseract 기반 추출기 (`ocr` feature)
#[cfg(feature = "ocr")]
pub struct TesseractExtractor {
    tessdata_path: Option<PathBuf>,
    language: String,
}

#[cfg(feature = "ocr")]
impl TesseractExtractor {
    pub fn new(tessdata_path: Option<PathBuf>, language: impl Into<String>) -> Self {
        Self {
            tessdata_path,
            language: language.into(),
        }
    }
}

#[cfg(feature = "ocr")]
impl TextExtractor for TesseractExtractor {
    fn extract_text(&self, gray: &[u8], width: u32, height: u32) -> Result<String, CoreError> {
        use std::io::Cursor;

        if width == 0 || height == 0 {
            return Err(CoreError::OcrError("빈 이미지: 너비 또는 높이가 0".to_string()));
        }

        let image = image::GrayImage::from_raw(width, height, gray.to_vec())
            .ok_or_else(|| CoreError::OcrError("흑백 버퍼 크기 불일치".to_string()))?;
        let mut png = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .map_err(|e| CoreError::OcrError(format!("PNG 변환 실패: {e}")))?;

        let tessdata = self
            .tessdata_path
            .as_ref()
            .map(|p| p.to_string_lossy().to_string());
        let mut lt = leptess::LepTess::new(tessdata.as_deref(), &self.language)
            .map_err(|e| CoreError::OcrError(format!("OCR 초기화 실패: {e}")))?;

        lt.set_image_from_mem(&png)
            .map_err(|e| CoreError::OcrError(format!("OCR 이미지 설정 실패: {e}")))?;

        let text = lt
            .get_utf8_text()
            .map_err(|e| CoreError::OcrError(format!("OCR 텍스트 추출 실패: {e}")))?;

        Ok(text.trim().to_string())
    }

    fn is_enabled(&self) -> bool {
        true
    }
}

/// 설정에 맞는 추출기 생성
pub fn build_extractor(
    enabled: bool,
    tessdata_path: Option<PathBuf>,
    language: &str,
) -> Arc<dyn TextExtractor> {
    if !enabled {
        info!("OCR 비활성 (설정)");
        return Arc::new(DisabledExtractor);
    }

    #[cfg(feature = "ocr")]
    {
        info!("OCR 활성: Tesseract ({language})");
        Arc::new(TesseractExtractor::new(tessdata_path, language))
    }

    #[cfg(not(feature = "ocr"))]
    {
        let _ = (tessdata_path, language);
        warn!("OCR 설정은 켜져 있으나 `ocr` feature 없이 빌드됨, 빈 텍스트 사용");
        Arc::new(DisabledExtractor)
    }
}

/// 원본 이미지를 흑백으로 바꿔 텍스트 추출. 실패는 빈 문자열로 낮춘다.
pub fn extract_best_effort(extractor: &dyn TextExtractor, image: &DynamicImage) -> String {
    if !extractor.is_enabled() {
        return String::new();
    }
    let gray = image.to_luma8();
    match extractor.extract_text(gray.as_raw(), gray.width(), gray.height()) {
        Ok(text) => text,
        Err(e) => {
            warn!("텍스트 추출 실패, 빈 텍스트로 대체: {e}");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FailingExtractor;

    impl TextExtractor for FailingExtractor {
        fn extract_text(&self, _: &[u8], _: u32, _: u32) -> Result<String, CoreError> {
            Err(CoreError::OcrError("tesseract crashed".into()))
        }
        fn is_enabled(&self) -> bool {
            true
        }
    }

    /// 받은 버퍼가 흑백(1바이트/픽셀)인지 확인하는 추출기
    struct GrayCheckingExtractor {
        calls: AtomicUsize,
    }

    impl TextExtractor for GrayCheckingExtractor {
        fn extract_text(&self, gray: &[u8], width: u32, height: u32) -> Result<String, CoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            assert_eq!(gray.len(), (width * height) as usize);
            Ok(format!("{width}x{height}"))
        }
        fn is_enabled(&self) -> bool {
            true
        }
    }

    fn image(w: u32, h: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(w, h, image::Rgba([200, 100, 50, 255])))
    }

    #[test]
    fn failure_becomes_empty_text() {
        assert_eq!(extract_best_effort(&FailingExtractor, &image(8, 8)), "");
    }

    #[test]
    fn full_resolution_grayscale_is_passed() {
        let extractor = GrayCheckingExtractor {
            calls: AtomicUsize::new(0),
        };
        assert_eq!(extract_best_effort(&extractor, &image(40, 30)), "40x30");
        assert_eq!(extractor.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn disabled_extractor_skips_work() {
        let extractor = build_extractor(false, None, "eng");
        assert!(!extractor.is_enabled());
        assert_eq!(extract_best_effort(extractor.as_ref(), &image(4, 4)), "");
    }
}
