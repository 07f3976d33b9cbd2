//! 썸네일 생성.
//!
//! fast_image_resize 기반 리사이즈. 비율을 유지하며 경계 상자 안에 맞추고
//! 확대는 하지 않는다.

use arcmonitor_core::error::CoreError;
use fast_image_resize::{images::Image as FirImage, ResizeAlg, ResizeOptions, Resizer};
use image::{DynamicImage, RgbaImage};
use tracing::debug;

/// `max_w x max_h` 안에 들어가는 비율 유지 크기 (최소 1px, 확대 없음)
pub fn fit_within(src_w: u32, src_h: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    if src_w <= max_w && src_h <= max_h {
        return (src_w, src_h);
    }
    let scale = (max_w as f64 / src_w as f64).min(max_h as f64 / src_h as f64);
    let w = ((src_w as f64 * scale).round() as u32).clamp(1, max_w);
    let h = ((src_h as f64 * scale).round() as u32).clamp(1, max_h);
    (w, h)
}

/// 정확히 `width x height`로 리사이즈
pub fn fast_resize(
    image: &DynamicImage,
    width: u32,
    height: u32,
) -> Result<DynamicImage, CoreError> {
    let (src_w, src_h) = (image.width(), image.height());

    if src_w == width && src_h == height {
        return Ok(image.clone());
    }
    if src_w == 0 || src_h == 0 {
        return Err(CoreError::Internal("소스 이미지 크기 0".to_string()));
    }
    if width == 0 || height == 0 {
        return Err(CoreError::Internal("목표 이미지 크기 0".to_string()));
    }

    let src_image = FirImage::from_vec_u8(
        src_w,
        src_h,
        image.to_rgba8().into_raw(),
        fast_image_resize::PixelType::U8x4,
    )
    .map_err(|e| CoreError::Internal(format!("소스 이미지 생성 실패: {e}")))?;

    let mut dst_image = FirImage::new(width, height, fast_image_resize::PixelType::U8x4);

    let mut resizer = Resizer::new();
    let options = ResizeOptions::new().resize_alg(ResizeAlg::Convolution(
        fast_image_resize::FilterType::Bilinear,
    ));

    resizer
        .resize(&src_image, &mut dst_image, &options)
        .map_err(|e| CoreError::Internal(format!("리사이즈 실패: {e}")))?;

    let result = RgbaImage::from_raw(width, height, dst_image.into_vec())
        .ok_or_else(|| CoreError::Internal("결과 이미지 생성 실패".to_string()))?;

    Ok(DynamicImage::ImageRgba8(result))
}

/// 경계 상자 안으로 축소한 썸네일
pub fn make_thumbnail(
    image: &DynamicImage,
    max_w: u32,
    max_h: u32,
) -> Result<DynamicImage, CoreError> {
    let (w, h) = fit_within(image.width(), image.height(), max_w, max_h);
    debug!(
        "썸네일 생성: {}x{} → {w}x{h}",
        image.width(),
        image.height()
    );
    fast_resize(image, w, h)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(w: u32, h: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(w, h, image::Rgba([10, 20, 30, 255])))
    }

    #[test]
    fn fit_keeps_aspect_ratio() {
        assert_eq!(fit_within(1920, 1080, 320, 240), (320, 180));
        assert_eq!(fit_within(1080, 1920, 320, 240), (135, 240));
        assert_eq!(fit_within(640, 480, 320, 240), (320, 240));
    }

    #[test]
    fn fit_never_upscales() {
        assert_eq!(fit_within(100, 50, 320, 240), (100, 50));
    }

    #[test]
    fn fit_extreme_ratio_keeps_one_pixel() {
        assert_eq!(fit_within(10_000, 1, 320, 240), (320, 1));
    }

    #[test]
    fn thumbnail_fits_bounds() {
        let thumb = make_thumbnail(&solid(1280, 720), 320, 240).unwrap();
        assert_eq!((thumb.width(), thumb.height()), (320, 180));
    }

    #[test]
    fn resize_rejects_zero_target() {
        assert!(fast_resize(&solid(10, 10), 0, 5).is_err());
    }

    #[test]
    fn same_size_is_clone() {
        let image = solid(32, 16);
        let resized = fast_resize(&image, 32, 16).unwrap();
        assert_eq!(resized.to_rgba8().as_raw(), image.to_rgba8().as_raw());
    }
}
