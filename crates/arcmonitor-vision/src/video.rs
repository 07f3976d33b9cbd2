//! 영상 클립 녹화.
//!
//! 주 모니터 프레임을 고정 주기로 캡처해 raw RGBA로 `ffmpeg` 표준 입력에 흘려
//! MPEG-4 `.mp4` 파일로 인코딩한다. 실패 시 부분 파일을 삭제한다.

use arcmonitor_core::error::CoreError;
use std::io::Write;
use std::path::Path;
use std::process::{Child, ChildStdin, Command, Stdio};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::capture::FrameSource;

/// ffmpeg 파이프 기반 클립 녹화기
#[derive(Debug, Clone)]
pub struct ClipRecorder {
    ffmpeg_path: String,
    fps: u32,
}

impl ClipRecorder {
    pub fn new(ffmpeg_path: impl Into<String>, fps: u32) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
            fps: fps.max(1),
        }
    }

    /// 녹화할 총 프레임 수 (최소 1)
    pub fn frame_count(&self, duration: Duration) -> u64 {
        ((duration.as_secs_f64() * self.fps as f64).round() as u64).max(1)
    }

    /// `duration` 동안 녹화하여 `output`에 저장 (blocking)
    pub fn record(
        &self,
        source: &dyn FrameSource,
        output: &Path,
        duration: Duration,
    ) -> Result<(), CoreError> {
        let first = source.grab()?;
        let (width, height) = first.dimensions();

        let mut child = self.spawn_encoder(width, height, output)?;
        let Some(stdin) = child.stdin.take() else {
            abort(&mut child, output);
            return Err(CoreError::VideoEncode("ffmpeg 표준 입력 없음".to_string()));
        };

        let started = Instant::now();
        let pumped = self.pump_frames(stdin, source, first, duration);
        let frames = match pumped {
            Ok(frames) => frames,
            Err(e) => {
                abort(&mut child, output);
                return Err(e);
            }
        };

        let result = child
            .wait_with_output()
            .map_err(|e| CoreError::VideoEncode(format!("ffmpeg 대기 실패: {e}")))
            .and_then(|out| {
                if out.status.success() {
                    Ok(())
                } else {
                    Err(CoreError::VideoEncode(format!(
                        "ffmpeg 종료 코드 {}: {}",
                        out.status,
                        String::from_utf8_lossy(&out.stderr).trim()
                    )))
                }
            });

        if let Err(e) = result {
            remove_partial(output);
            return Err(e);
        }

        info!(
            "영상 녹화 완료: {} ({frames}프레임, {:.1}초)",
            output.display(),
            started.elapsed().as_secs_f64()
        );
        Ok(())
    }

    fn spawn_encoder(&self, width: u32, height: u32, output: &Path) -> Result<Child, CoreError> {
        debug!("ffmpeg 시작: {width}x{height} @ {}fps → {}", self.fps, output.display());
        Command::new(&self.ffmpeg_path)
            .args(["-hide_banner", "-loglevel", "error", "-y"])
            .args(["-f", "rawvideo", "-pix_fmt", "rgba"])
            .args(["-s", &format!("{width}x{height}")])
            .args(["-r", &self.fps.to_string()])
            .args(["-i", "-"])
            .args(["-vf", "scale=trunc(iw/2)*2:trunc(ih/2)*2"])
            .args(["-c:v", "mpeg4", "-q:v", "5", "-pix_fmt", "yuv420p"])
            .arg(output)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| CoreError::VideoEncode(format!("ffmpeg 실행 실패 ({}): {e}", self.ffmpeg_path)))
    }

    /// 프레임을 고정 주기로 기록. stdin은 반환 시 닫혀 ffmpeg가 마무리한다.
    fn pump_frames(
        &self,
        mut stdin: ChildStdin,
        source: &dyn FrameSource,
        first: image::RgbaImage,
        duration: Duration,
    ) -> Result<u64, CoreError> {
        let total = self.frame_count(duration);
        let frame_interval = Duration::from_secs_f64(1.0 / self.fps as f64);
        let expected = first.dimensions();
        let started = Instant::now();

        let mut frame = first;
        for index in 0..total {
            if index > 0 {
                frame = source.grab()?;
                if frame.dimensions() != expected {
                    return Err(CoreError::Capture(format!(
                        "녹화 중 해상도 변경: {:?} → {:?}",
                        expected,
                        frame.dimensions()
                    )));
                }
            }

            stdin
                .write_all(frame.as_raw())
                .map_err(|e| CoreError::VideoEncode(format!("프레임 전송 실패: {e}")))?;

            let next_deadline = frame_interval * (index as u32 + 1);
            if let Some(wait) = next_deadline.checked_sub(started.elapsed()) {
                std::thread::sleep(wait);
            }
        }

        Ok(total)
    }
}

fn abort(child: &mut Child, output: &Path) {
    let _ = child.kill();
    let _ = child.wait();
    remove_partial(output);
}

fn remove_partial(output: &Path) {
    match std::fs::remove_file(output) {
        Ok(()) => warn!("부분 영상 파일 삭제: {}", output.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!("부분 영상 파일 삭제 실패: {}: {e}", output.display()),
    }
}
