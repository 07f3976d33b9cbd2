//! macOS 플랫폼: 활성 창 감지.
//!
//! `osascript`로 System Events의 전면 앱/창 제목을 조회한다.
//! 손쉬운 사용 권한이 없으면 창 제목은 빈 문자열이 된다.

use arcmonitor_core::models::activity::WindowIdentity;
use std::process::Command;
use tracing::debug;

const FRONT_WINDOW_SCRIPT: &str = r#"tell application "System Events"
    set frontApp to first application process whose frontmost is true
    set appName to name of frontApp
    set winTitle to ""
    try
        set winTitle to name of front window of frontApp
    end try
    return appName & "|" & winTitle
end tell"#;

/// macOS 활성 창 (제목, 프로세스). osascript 실패 시 None.
pub fn active_window_macos() -> Option<WindowIdentity> {
    let output = match Command::new("osascript")
        .arg("-e")
        .arg(FRONT_WINDOW_SCRIPT)
        .output()
    {
        Ok(output) if output.status.success() => output,
        Ok(_) => {
            debug!("활성 창 감지 실패 (osascript)");
            return None;
        }
        Err(e) => {
            debug!("osascript 실행 실패: {e}");
            return None;
        }
    };

    parse_front_window(&String::from_utf8_lossy(&output.stdout))
}

fn parse_front_window(raw: &str) -> Option<WindowIdentity> {
    let (app, title) = raw.trim().split_once('|').unwrap_or((raw.trim(), ""));
    if app.is_empty() {
        return None;
    }
    debug!("활성 창: {app} / {title}");
    Some(WindowIdentity::new(title, app))
}
