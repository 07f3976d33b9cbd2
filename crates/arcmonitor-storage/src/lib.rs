//! # arcmonitor-storage
//!
//! 로컬 저장소 어댑터.
//! SQLite 기반 메트릭/활동/영상 레코드 저장, 스키마 마이그레이션,
//! 스크린샷/영상 산출물 디렉토리 관리.
//!
//! ## 모듈
//! - `sqlite`: 레코드 저장소 (TelemetryStore 구현)
//! - `artifacts`: 산출물 디렉토리 생성/최신 파일 목록
//! - `migration`: 스키마 마이그레이션

pub mod artifacts;
pub mod migration;
pub mod sqlite;

pub use artifacts::ArtifactDirs;
pub use sqlite::SqliteStorage;

/// 기본 DB 파일 이름
pub const DB_FILE_NAME: &str = "system_data.db";
