//! 영상 레코드 모델.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 영상 녹화 레코드 (인코딩 성공 후에만 기록)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRecord {
    /// 녹화 시작 시각
    pub timestamp: DateTime<Utc>,
    /// 클립 길이 (초)
    pub duration_seconds: u32,
    /// 영상 파일 경로
    pub file_path: String,
}
