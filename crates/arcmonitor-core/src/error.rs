//! ARCMONITOR 핵심 에러 타입.
//!
//! 어댑터 crate는 외부 라이브러리 에러를 `map_err`로 `CoreError`에 매핑한다.

use thiserror::Error;

/// 코어 레이어 에러.
#[derive(Debug, Error)]
pub enum CoreError {
    /// JSON 직렬화/역직렬화 실패
    #[error("직렬화 에러: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 설정값 오류
    #[error("설정 에러: {0}")]
    Config(String),

    /// 내부 에러 (예상치 못한 상황)
    #[error("내부 에러: {0}")]
    Internal(String),

    /// I/O 에러
    #[error("I/O 에러: {0}")]
    Io(#[from] std::io::Error),

    /// 화면 캡처 실패 (장치 사용 중, 모니터 없음 등)
    #[error("캡처 에러: {0}")]
    Capture(String),

    /// 영상 인코딩 실패
    #[error("영상 인코딩 에러: {0}")]
    VideoEncode(String),

    /// OCR 처리 실패
    #[error("OCR 에러: {0}")]
    OcrError(String),

    /// 저장소 읽기/쓰기 실패
    #[error("저장소 에러: {0}")]
    Storage(String),

    /// 이미 닫힌 저장소에 접근
    #[error("저장소가 이미 닫혔습니다")]
    StoreClosed,
}

impl CoreError {
    /// 데이터 유실로 이어지는 에러인지 여부
    ///
    /// 저장소 에러는 기록이 버려졌음을 뜻하므로 `error!` 레벨로 남긴다.
    pub fn is_data_loss(&self) -> bool {
        matches!(self, CoreError::Storage(_) | CoreError::StoreClosed)
    }
}
