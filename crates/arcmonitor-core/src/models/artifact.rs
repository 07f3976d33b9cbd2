//! 캡처 산출물 파일 규칙.
//!
//! 파일 이름은 캡처 시각 접두어를 가지므로 이름순 정렬이 곧 시간순 정렬이다.

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

/// 산출물 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// 원본 해상도 스크린샷 (JPEG)
    Screenshot,
    /// 짧은 화면 녹화 클립 (MP4)
    Video,
}

impl ArtifactKind {
    /// 데이터 디렉토리 아래 하위 디렉토리 이름
    pub fn dir_name(self) -> &'static str {
        match self {
            ArtifactKind::Screenshot => "screenshots",
            ArtifactKind::Video => "videos",
        }
    }

    pub fn prefix(self) -> &'static str {
        match self {
            ArtifactKind::Screenshot => "screenshot",
            ArtifactKind::Video => "recording",
        }
    }

    /// 확장자 (점 제외)
    pub fn extension(self) -> &'static str {
        match self {
            ArtifactKind::Screenshot => "jpg",
            ArtifactKind::Video => "mp4",
        }
    }

    /// `screenshot_20240101_093000.jpg` 형식의 파일 이름
    pub fn file_name(self, at: DateTime<Utc>) -> String {
        format!(
            "{}_{}.{}",
            self.prefix(),
            at.format("%Y%m%d_%H%M%S"),
            self.extension()
        )
    }

    /// 데이터 디렉토리 기준 산출물 디렉토리
    pub fn dir_in(self, data_dir: &Path) -> PathBuf {
        data_dir.join(self.dir_name())
    }

    /// 파일 이름이 이 종류의 산출물인지 (확장자 기준)
    pub fn matches(self, file_name: &str) -> bool {
        Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(self.extension()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn file_names_carry_timestamp() {
        let at = Utc.with_ymd_and_hms(2024, 3, 5, 9, 7, 1).unwrap();
        assert_eq!(
            ArtifactKind::Screenshot.file_name(at),
            "screenshot_20240305_090701.jpg"
        );
        assert_eq!(ArtifactKind::Video.file_name(at), "recording_20240305_090701.mp4");
    }

    #[test]
    fn dirs_are_nested_by_kind() {
        let data = Path::new("/data");
        assert_eq!(ArtifactKind::Video.dir_in(data), PathBuf::from("/data/videos"));
        assert_eq!(
            ArtifactKind::Screenshot.dir_in(data),
            PathBuf::from("/data/screenshots")
        );
    }

    #[test]
    fn matches_by_extension() {
        assert!(ArtifactKind::Screenshot.matches("screenshot_20240101_000000.jpg"));
        assert!(ArtifactKind::Screenshot.matches("legacy.JPG"));
        assert!(!ArtifactKind::Screenshot.matches("recording_20240101_000000.mp4"));
        assert!(!ArtifactKind::Video.matches("notes"));
    }
}
