//! 시스템/활성 창 모니터링 포트.
//!
//! 구현: `arcmonitor-monitor` crate (sysinfo + 플랫폼별 감지)

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::activity::WindowIdentity;
use crate::models::metrics::MetricSample;

/// 시스템 리소스 모니터링 (CPU, 메모리, 누적 네트워크)
#[async_trait]
pub trait SystemMonitor: Send + Sync {
    /// 현재 시점의 메트릭 샘플 수집
    async fn collect_metrics(&self) -> Result<MetricSample, CoreError>;
}

/// 활성 창 감지기
///
/// 실패하지 않는다. 플랫폼 API 실패 시 `WindowIdentity::unknown()`을 반환한다.
#[async_trait]
pub trait ActivityProbe: Send + Sync {
    async fn current_window(&self) -> WindowIdentity;
}
