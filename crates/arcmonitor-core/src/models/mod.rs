//! ARCMONITOR 도메인 모델.
//!
//! 저장소에 기록되는 세 가지 레코드 스트림(메트릭, 활동, 영상)과
//! 캡처 산출물 파일 규칙을 정의한다.

pub mod activity;
pub mod artifact;
pub mod metrics;
pub mod video;
