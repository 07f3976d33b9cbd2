//! JPEG 인코더.

use arcmonitor_core::error::CoreError;
use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// JPEG 바이트로 인코딩 (알파 채널은 버림)
pub fn encode_jpeg(image: &DynamicImage, quality: u8) -> Result<Vec<u8>, CoreError> {
    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, quality.clamp(1, 100))
        .encode_image(&image.to_rgb8())
        .map_err(|e| CoreError::Capture(format!("JPEG 인코딩 실패: {e}")))?;
    Ok(buf)
}

/// JPEG 파일로 저장. 실패 시 쓰다 만 파일은 삭제한다.
pub fn save_jpeg(image: &DynamicImage, path: &Path, quality: u8) -> Result<(), CoreError> {
    let result = File::create(path)
        .map_err(|e| CoreError::Capture(format!("파일 생성 실패: {}: {e}", path.display())))
        .and_then(|file| {
            let mut writer = BufWriter::new(file);
            JpegEncoder::new_with_quality(&mut writer, quality.clamp(1, 100))
                .encode_image(&image.to_rgb8())
                .map_err(|e| CoreError::Capture(format!("JPEG 저장 실패: {e}")))
        });

    if result.is_err() {
        let _ = std::fs::remove_file(path);
    }
    result
}
