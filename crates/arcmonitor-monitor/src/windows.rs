//! Windows 플랫폼: 활성 창 감지.
//!
//! Win32 API `GetForegroundWindow` + `GetWindowTextW` 기반.

#![cfg(target_os = "windows")]

use arcmonitor_core::models::activity::WindowIdentity;
use tracing::debug;
use windows_sys::Win32::Foundation::HWND;
use windows_sys::Win32::UI::WindowsAndMessaging::{
    GetForegroundWindow, GetWindowTextW, GetWindowThreadProcessId,
};

/// Windows 활성 창 (제목, 프로세스). 전경 창이 없으면 None.
pub fn active_window_windows() -> Option<WindowIdentity> {
    // SAFETY: 반환된 HWND는 이 함수 안에서만 쓰이며 버퍼 길이를 함께 넘긴다.
    unsafe {
        let hwnd: HWND = GetForegroundWindow();
        if hwnd.is_null() {
            debug!("활성 창 없음 (GetForegroundWindow → null)");
            return None;
        }

        let mut title_buf = [0u16; 512];
        let len = GetWindowTextW(hwnd, title_buf.as_mut_ptr(), title_buf.len() as i32);
        let title = if len > 0 {
            String::from_utf16_lossy(&title_buf[..len as usize])
        } else {
            String::new()
        };

        let mut pid: u32 = 0;
        GetWindowThreadProcessId(hwnd, &mut pid);

        let process = process_name(pid).unwrap_or_else(|| WindowIdentity::UNKNOWN.to_string());
        debug!("활성 창: {process} / {title} (PID: {pid})");

        Some(WindowIdentity::new(title, process))
    }
}

/// PID로 프로세스 이름 조회
fn process_name(pid: u32) -> Option<String> {
    use sysinfo::{Pid, ProcessesToUpdate, System};

    if pid == 0 {
        return None;
    }
    let mut sys = System::new();
    sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]), true);
    sys.process(Pid::from_u32(pid))
        .map(|p| p.name().to_string_lossy().to_string())
}
