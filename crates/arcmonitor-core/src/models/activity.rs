//! 활동 스냅샷 모델.
//!
//! 활성 세션 중 스크린샷 주기가 도래했을 때만 생성되는 레코드.

use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 감지기가 보고하는 활성 창 식별자 (제목, 프로세스)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowIdentity {
    /// 창 제목
    #[serde(rename = "window_title")]
    pub title: String,
    /// 프로세스 이름
    #[serde(rename = "process_name")]
    pub process: String,
}

impl WindowIdentity {
    /// 감지 실패 시 반환되는 고정 값
    pub const UNKNOWN: &'static str = "Unknown";

    pub fn new(title: impl Into<String>, process: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            process: process.into(),
        }
    }

    /// 감지 실패 센티널 `("Unknown", "Unknown")`
    pub fn unknown() -> Self {
        Self::new(Self::UNKNOWN, Self::UNKNOWN)
    }

    /// 아직 아무 창도 관측되지 않은 초기 상태 `("", "")`
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_unknown(&self) -> bool {
        self.title == Self::UNKNOWN && self.process == Self::UNKNOWN
    }
}

/// 활동 스냅샷 레코드
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivitySnapshot {
    /// 저장소 행 ID (저장 전에는 None)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// 캡처 시각
    pub timestamp: DateTime<Utc>,
    /// 캡처 당시 활성 창
    #[serde(flatten)]
    pub window: WindowIdentity,
    /// JPEG 썸네일 (캡처 실패 시 빈 값). JSON에서는 base64 문자열.
    #[serde(with = "thumbnail_base64")]
    pub thumbnail: Vec<u8>,
    /// OCR 추출 텍스트 (실패 시 빈 문자열)
    pub extracted_text: String,
    /// 활성 세션 중 생성 여부
    pub active_session: bool,
    /// 원본 스크린샷 파일 경로
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact_path: Option<String>,
}

mod thumbnail_base64 {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded).map_err(serde::de::Error::custom)
    }
}

impl ActivitySnapshot {
    /// 썸네일을 base64 문자열로 변환
    pub fn thumbnail_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.thumbnail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_and_empty_differ() {
        assert!(WindowIdentity::unknown().is_unknown());
        assert!(!WindowIdentity::empty().is_unknown());
        assert_ne!(WindowIdentity::unknown(), WindowIdentity::empty());
    }

    #[test]
    fn snapshot_json_roundtrip_keeps_thumbnail() {
        let snapshot = ActivitySnapshot {
            id: Some(7),
            timestamp: Utc::now(),
            window: WindowIdentity::new("Terminal", "bash"),
            thumbnail: vec![1, 2, 3, 4, 5],
            extracted_text: String::new(),
            active_session: true,
            artifact_path: Some("screenshots/screenshot_20240101_000000.jpg".into()),
        };

        let json = serde_json::to_string(&snapshot).unwrap();
        let back: ActivitySnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
        assert_eq!(snapshot.thumbnail_base64(), "AQIDBAU=");
    }
}
