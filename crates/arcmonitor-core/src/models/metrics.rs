//! 시스템 메트릭 모델.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 시스템 메트릭 샘플 (메트릭 루프가 틱마다 1건 생성)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSample {
    /// 수집 시각
    pub timestamp: DateTime<Utc>,
    /// CPU 사용률 (0.0 ~ 100.0)
    pub cpu_percent: f32,
    /// 메모리 사용률 (0.0 ~ 100.0)
    pub memory_percent: f32,
    /// 누적 송신 바이트
    pub bytes_sent: u64,
    /// 누적 수신 바이트
    pub bytes_recv: u64,
}

impl MetricSample {
    /// 사용량/전체량으로 백분율 계산 (전체가 0이면 0.0)
    pub fn percent_of(used: u64, total: u64) -> f32 {
        if total == 0 {
            return 0.0;
        }
        ((used as f64 / total as f64) * 100.0).clamp(0.0, 100.0) as f32
    }
}
