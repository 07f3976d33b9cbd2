//! Linux 플랫폼: 활성 창 감지.
//!
//! X11은 `xdotool`, 프로세스 이름은 `/proc/{pid}/comm`에서 읽는다.
//! Wayland는 XWayland 창만 감지 가능하다.

use arcmonitor_core::models::activity::WindowIdentity;
use std::process::Command;
use tracing::debug;

/// 현재 디스플레이 서버 유형
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayServer {
    X11,
    Wayland,
    Unknown,
}

/// 현재 사용 중인 디스플레이 서버 감지
pub fn detect_display_server() -> DisplayServer {
    if let Ok(session_type) = std::env::var("XDG_SESSION_TYPE") {
        match session_type.to_lowercase().as_str() {
            "x11" => return DisplayServer::X11,
            "wayland" => return DisplayServer::Wayland,
            _ => {}
        }
    }

    if std::env::var("WAYLAND_DISPLAY").is_ok() {
        return DisplayServer::Wayland;
    }

    if std::env::var("DISPLAY").is_ok() {
        return DisplayServer::X11;
    }

    DisplayServer::Unknown
}

/// Linux 활성 창 (제목, 프로세스). 감지 불가 시 None.
pub fn active_window_linux() -> Option<WindowIdentity> {
    match detect_display_server() {
        DisplayServer::X11 => active_window_x11(),
        DisplayServer::Wayland => {
            debug!("Wayland 감지됨 - XWayland fallback 시도");
            active_window_x11()
        }
        DisplayServer::Unknown => {
            debug!("디스플레이 서버 감지 실패");
            None
        }
    }
}

fn xdotool(args: &[&str]) -> Option<String> {
    match Command::new("xdotool").args(args).output() {
        Ok(output) if output.status.success() => {
            Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
        }
        Ok(output) => {
            debug!("xdotool {:?} 실패: {}", args, String::from_utf8_lossy(&output.stderr));
            None
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("xdotool 미설치 - 'sudo apt install xdotool' 실행 필요");
            None
        }
        Err(e) => {
            debug!("xdotool 실행 실패: {e}");
            None
        }
    }
}

fn active_window_x11() -> Option<WindowIdentity> {
    let window_id = xdotool(&["getactivewindow"]).filter(|id| !id.is_empty())?;

    let title = xdotool(&["getwindowname", &window_id]).unwrap_or_default();
    let process = xdotool(&["getwindowpid", &window_id])
        .and_then(|pid| pid.parse::<u32>().ok())
        .and_then(process_name)
        .unwrap_or_else(|| WindowIdentity::UNKNOWN.to_string());

    debug!("활성 창: {process} - {title}");
    Some(WindowIdentity::new(title, process))
}

/// PID로부터 프로세스 이름 가져오기
fn process_name(pid: u32) -> Option<String> {
    std::fs::read_to_string(format!("/proc/{pid}/comm"))
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_display_server_works() {
        let server = detect_display_server();
        assert!(matches!(
            server,
            DisplayServer::X11 | DisplayServer::Wayland | DisplayServer::Unknown
        ));
    }

    #[test]
    fn process_name_from_proc() {
        let name = process_name(std::process::id());
        assert!(name.is_some());
    }

    #[test]
    fn missing_pid_has_no_name() {
        assert!(process_name(u32::MAX).is_none());
    }

    #[test]
    fn active_window_does_not_panic() {
        let _ = active_window_linux();
    }
}
