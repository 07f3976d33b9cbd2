//! # arcmonitor-vision
//!
//! 화면 캡처 어댑터.
//! 주 모니터 캡처 → 원본 JPEG 저장 → 썸네일 축소 → OCR,
//! 그리고 ffmpeg 파이프를 이용한 짧은 영상 클립 녹화를 담당한다.
//!
//! ## 모듈
//! - `capture`: xcap 기반 프레임 소스
//! - `thumbnail`: fast_image_resize 기반 비율 유지 축소
//! - `encoder`: JPEG 인코딩/저장
//! - `ocr`: 텍스트 추출 (Tesseract, `ocr` feature)
//! - `video`: ffmpeg 영상 클립 녹화
//! - `service`: `CaptureService` 포트 구현

pub mod capture;
pub mod encoder;
pub mod ocr;
pub mod service;
pub mod thumbnail;
pub mod video;

pub use capture::{FrameSource, ScreenCapture};
pub use service::{CaptureSettings, ScreenCaptureService};
