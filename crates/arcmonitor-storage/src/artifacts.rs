//! 산출물 디렉토리.
//!
//! 구조: `<data_dir>/screenshots/screenshot_YYYYMMDD_HHMMSS.jpg`,
//! `<data_dir>/videos/recording_YYYYMMDD_HHMMSS.mp4`

use arcmonitor_core::error::CoreError;
use arcmonitor_core::models::artifact::ArtifactKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// 스크린샷/영상 디렉토리 관리자
#[derive(Debug, Clone)]
pub struct ArtifactDirs {
    data_dir: PathBuf,
}

impl ArtifactDirs {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// 종류별 디렉토리 경로
    pub fn dir(&self, kind: ArtifactKind) -> PathBuf {
        kind.dir_in(&self.data_dir)
    }

    /// 모든 산출물 디렉토리 생성 (이미 있으면 무시)
    pub fn ensure(&self) -> Result<(), CoreError> {
        for kind in [ArtifactKind::Screenshot, ArtifactKind::Video] {
            let dir = self.dir(kind);
            std::fs::create_dir_all(&dir).map_err(|e| {
                CoreError::Internal(format!("산출물 디렉토리 생성 실패: {}: {e}", dir.display()))
            })?;
        }
        info!("산출물 디렉토리 준비: {}", self.data_dir.display());
        Ok(())
    }

    /// 최신 파일 이름 최대 `n`개 (이름 역순 = 시간 역순)
    ///
    /// 디렉토리가 없으면 빈 목록.
    pub async fn list_recent(&self, kind: ArtifactKind, n: usize) -> Result<Vec<String>, CoreError> {
        let dir = self.dir(kind);
        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("산출물 디렉토리 없음: {}", dir.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(CoreError::Io(e)),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if kind.matches(name) {
                    names.push(name.to_string());
                }
            }
        }

        names.sort_unstable_by(|a, b| b.cmp(a));
        names.truncate(n);
        Ok(names)
    }
}
