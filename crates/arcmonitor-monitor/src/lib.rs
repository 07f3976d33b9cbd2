//! # arcmonitor-monitor
//!
//! 시스템 모니터링 어댑터.
//! CPU/메모리 사용률, 누적 네트워크 바이트, 활성 창/프로세스 정보를 수집한다.
//! 활성 창 감지는 플랫폼별(macOS, Windows, Linux) 방식으로 구현하며,
//! 실패 시 `("Unknown", "Unknown")`을 반환한다.

pub mod probe;
pub mod system;

#[cfg(target_os = "macos")]
pub mod macos;

#[cfg(target_os = "windows")]
pub mod windows;

#[cfg(target_os = "linux")]
pub mod linux;

pub use probe::{NativeActivityProbe, StaticActivityProbe};
pub use system::SysInfoMonitor;
