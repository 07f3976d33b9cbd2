//! 시스템 리소스 모니터링.
//!
//! `SystemMonitor` 포트 구현. sysinfo 기반 CPU/메모리/누적 네트워크 수집.

use arcmonitor_core::error::CoreError;
use arcmonitor_core::models::metrics::MetricSample;
use arcmonitor_core::ports::monitor::SystemMonitor;
use async_trait::async_trait;
use std::sync::Mutex;
use sysinfo::{Networks, System};
use tracing::debug;

/// sysinfo 기반 시스템 모니터: `SystemMonitor` 포트 구현
///
/// CPU 사용률은 직전 갱신 이후 구간 값이므로 첫 호출은 0에 가까울 수 있다.
pub struct SysInfoMonitor {
    sys: Mutex<System>,
    networks: Mutex<Networks>,
}

impl SysInfoMonitor {
    pub fn new() -> Self {
        let mut sys = System::new();
        sys.refresh_cpu_usage();
        sys.refresh_memory();
        Self {
            sys: Mutex::new(sys),
            networks: Mutex::new(Networks::new_with_refreshed_list()),
        }
    }
}

impl Default for SysInfoMonitor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SystemMonitor for SysInfoMonitor {
    async fn collect_metrics(&self) -> Result<MetricSample, CoreError> {
        let (cpu_percent, memory_percent) = {
            let mut sys = self
                .sys
                .lock()
                .map_err(|e| CoreError::Internal(format!("시스템 잠금 실패: {e}")))?;
            sys.refresh_cpu_usage();
            sys.refresh_memory();
            (
                sys.global_cpu_usage().clamp(0.0, 100.0),
                MetricSample::percent_of(sys.used_memory(), sys.total_memory()),
            )
        };

        let (bytes_sent, bytes_recv) = {
            let mut networks = self
                .networks
                .lock()
                .map_err(|e| CoreError::Internal(format!("네트워크 잠금 실패: {e}")))?;
            networks.refresh(true);
            networks
                .list()
                .values()
                .fold((0u64, 0u64), |(sent, recv), data| {
                    (
                        sent.saturating_add(data.total_transmitted()),
                        recv.saturating_add(data.total_received()),
                    )
                })
        };

        let sample = MetricSample {
            timestamp: chrono::Utc::now(),
            cpu_percent,
            memory_percent,
            bytes_sent,
            bytes_recv,
        };

        debug!(
            "시스템 메트릭: CPU {:.1}%, 메모리 {:.1}%, 송신 {}B, 수신 {}B",
            sample.cpu_percent, sample.memory_percent, sample.bytes_sent, sample.bytes_recv
        );

        Ok(sample)
    }
}
