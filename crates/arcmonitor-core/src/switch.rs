//! 모니터링 on/off 스위치.

use std::sync::atomic::{AtomicBool, Ordering};

/// 세 샘플링 루프와 제어 API가 공유하는 모니터링 활성화 플래그
///
/// 루프는 매 틱마다 `enabled()`를 확인하므로 토글은
/// 각 루프의 다음 틱에 반영된다.
#[derive(Debug)]
pub struct MonitoringSwitch {
    enabled: AtomicBool,
}

impl MonitoringSwitch {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled: AtomicBool::new(enabled),
        }
    }

    /// 현재 활성화 여부
    pub fn enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// 상태를 뒤집고 새 값을 반환
    pub fn toggle(&self) -> bool {
        !self.enabled.fetch_xor(true, Ordering::AcqRel)
    }

    /// 상태를 명시적으로 설정
    pub fn set(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Release);
    }
}

impl Default for MonitoringSwitch {
    fn default() -> Self {
        Self::new(true)
    }
}
