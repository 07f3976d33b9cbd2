//! 활성 창 감지기.
//!
//! `ActivityProbe` 포트 구현. 플랫폼 감지는 외부 명령/FFI 호출이라
//! blocking 스레드에서 실행한다.

use arcmonitor_core::config::ProbeKind;
use arcmonitor_core::models::activity::WindowIdentity;
use arcmonitor_core::ports::monitor::ActivityProbe;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

/// 플랫폼 네이티브 활성 창 감지기
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeActivityProbe;

impl NativeActivityProbe {
    pub fn new() -> Self {
        Self
    }

    /// 현재 플랫폼에서 네이티브 감지가 가능한지
    pub fn is_supported() -> bool {
        cfg!(any(target_os = "macos", target_os = "windows", target_os = "linux"))
    }

    fn detect() -> Option<WindowIdentity> {
        #[cfg(target_os = "macos")]
        {
            crate::macos::active_window_macos()
        }
        #[cfg(target_os = "windows")]
        {
            crate::windows::active_window_windows()
        }
        #[cfg(target_os = "linux")]
        {
            crate::linux::active_window_linux()
        }
        #[cfg(not(any(target_os = "macos", target_os = "windows", target_os = "linux")))]
        {
            None
        }
    }
}

#[async_trait]
impl ActivityProbe for NativeActivityProbe {
    async fn current_window(&self) -> WindowIdentity {
        match tokio::task::spawn_blocking(Self::detect).await {
            Ok(Some(identity)) => identity,
            Ok(None) => WindowIdentity::unknown(),
            Err(e) => {
                debug!("활성 창 감지 작업 실패: {e}");
                WindowIdentity::unknown()
            }
        }
    }
}

/// 항상 같은 창을 보고하는 감지기
///
/// 네이티브 감지가 없는 환경용. 첫 관측 이후 창 전환이 발생하지 않으므로
/// 유휴 임계값이 지나면 스크린샷이 멈춘다.
#[derive(Debug, Clone)]
pub struct StaticActivityProbe {
    identity: WindowIdentity,
}

impl StaticActivityProbe {
    pub fn new(identity: WindowIdentity) -> Self {
        Self { identity }
    }
}

impl Default for StaticActivityProbe {
    fn default() -> Self {
        Self::new(WindowIdentity::new("Terminal", "bash"))
    }
}

#[async_trait]
impl ActivityProbe for StaticActivityProbe {
    async fn current_window(&self) -> WindowIdentity {
        self.identity.clone()
    }
}

/// 설정에 맞는 감지기 생성
pub fn build_probe(kind: ProbeKind) -> Arc<dyn ActivityProbe> {
    match kind {
        ProbeKind::Native if NativeActivityProbe::is_supported() => {
            info!("활성 창 감지기: 네이티브");
            Arc::new(NativeActivityProbe::new())
        }
        ProbeKind::Native => {
            info!("네이티브 활성 창 감지 미지원 플랫폼, 고정 감지기 사용");
            Arc::new(StaticActivityProbe::default())
        }
        ProbeKind::Static => {
            info!("활성 창 감지기: 고정");
            Arc::new(StaticActivityProbe::default())
        }
    }
}
