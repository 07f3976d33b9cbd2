//! SQLite 저장소 어댑터.
//!
//! `TelemetryStore` 포트 구현.
//!
//! # 모듈 구조
//! - `metrics`: 시스템 메트릭 스트림
//! - `activities`: 활동 스냅샷 스트림 (썸네일 BLOB 포함)
//! - `videos`: 영상 레코드 스트림

mod activities;
mod metrics;
mod videos;

use arcmonitor_core::error::CoreError;
use arcmonitor_core::models::activity::ActivitySnapshot;
use arcmonitor_core::models::artifact::ArtifactKind;
use arcmonitor_core::models::metrics::MetricSample;
use arcmonitor_core::models::video::VideoRecord;
use arcmonitor_core::ports::storage::TelemetryStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info};

use crate::artifacts::ArtifactDirs;
use crate::migration;

/// SQLite 저장소: `TelemetryStore` 포트 구현
///
/// 단일 연결을 `Mutex`로 감싸 모든 읽기/쓰기를 직렬화한다.
/// `close()` 이후에는 연결이 `None`이 되어 모든 접근이 `StoreClosed`로 실패한다.
pub struct SqliteStorage {
    conn: Mutex<Option<Connection>>,
    artifacts: ArtifactDirs,
}

impl SqliteStorage {
    /// 파일 기반 SQLite 저장소 생성
    pub fn open(path: &Path, artifacts: ArtifactDirs) -> Result<Self, CoreError> {
        let conn = Connection::open(path)
            .map_err(|e| CoreError::Storage(format!("SQLite 열기 실패: {e}")))?;

        conn.execute_batch(
            "
            PRAGMA journal_mode=WAL;
            PRAGMA synchronous=NORMAL;
            PRAGMA temp_store=MEMORY;
            ",
        )
        .map_err(|e| CoreError::Storage(format!("PRAGMA 설정 실패: {e}")))?;

        migration::run_migrations(&conn)
            .map_err(|e| CoreError::Storage(format!("마이그레이션 실패: {e}")))?;

        info!("SQLite 저장소 초기화: {}", path.display());
        Ok(Self::from_connection(conn, artifacts))
    }

    /// 인메모리 SQLite 저장소 생성 (테스트용)
    pub fn open_in_memory(artifacts: ArtifactDirs) -> Result<Self, CoreError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| CoreError::Storage(format!("인메모리 SQLite 생성 실패: {e}")))?;

        migration::run_migrations(&conn)
            .map_err(|e| CoreError::Storage(format!("마이그레이션 실패: {e}")))?;

        Ok(Self::from_connection(conn, artifacts))
    }

    fn from_connection(conn: Connection, artifacts: ArtifactDirs) -> Self {
        Self {
            conn: Mutex::new(Some(conn)),
            artifacts,
        }
    }

    /// 연결 잠금을 잡고 `f` 실행. 잠금은 `f`가 끝나는 즉시 해제된다.
    pub(crate) fn with_conn<T>(
        &self,
        context: &str,
        f: impl FnOnce(&Connection) -> rusqlite::Result<T>,
    ) -> Result<T, CoreError> {
        let guard = self
            .conn
            .lock()
            .map_err(|e| CoreError::Internal(format!("잠금 획득 실패: {e}")))?;
        let conn = guard.as_ref().ok_or(CoreError::StoreClosed)?;
        f(conn).map_err(|e| CoreError::Storage(format!("{context}: {e}")))
    }

    /// 연결 닫기. 여러 번 호출해도 안전하다.
    pub fn close_sync(&self) -> Result<(), CoreError> {
        let mut guard = self
            .conn
            .lock()
            .map_err(|e| CoreError::Internal(format!("잠금 획득 실패: {e}")))?;
        if let Some(conn) = guard.take() {
            conn.close()
                .map_err(|(_, e)| CoreError::Storage(format!("SQLite 닫기 실패: {e}")))?;
            info!("SQLite 저장소 닫힘");
        }
        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.conn.lock().map(|guard| guard.is_none()).unwrap_or(true)
    }
}

pub(crate) fn parse_timestamp(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| {
            debug!("잘못된 타임스탬프: {raw}");
            DateTime::<Utc>::UNIX_EPOCH
        })
}

#[async_trait]
impl TelemetryStore for SqliteStorage {
    async fn append_metric(&self, sample: &MetricSample) -> Result<(), CoreError> {
        self.insert_metric(sample)
    }

    async fn append_activity(&self, snapshot: &ActivitySnapshot) -> Result<(), CoreError> {
        self.insert_activity(snapshot).map(|_| ())
    }

    async fn append_video(&self, record: &VideoRecord) -> Result<(), CoreError> {
        self.insert_video(record)
    }

    async fn recent_activity(&self, limit: usize) -> Result<Vec<ActivitySnapshot>, CoreError> {
        self.query_recent_activity(limit)
    }

    async fn list_recent_screenshots(&self, n: usize) -> Result<Vec<String>, CoreError> {
        self.ensure_open()?;
        self.artifacts.list_recent(ArtifactKind::Screenshot, n).await
    }

    async fn list_recent_videos(&self, n: usize) -> Result<Vec<String>, CoreError> {
        self.ensure_open()?;
        self.artifacts.list_recent(ArtifactKind::Video, n).await
    }

    async fn close(&self) -> Result<(), CoreError> {
        self.close_sync()
    }
}

impl SqliteStorage {
    fn ensure_open(&self) -> Result<(), CoreError> {
        if self.is_closed() {
            return Err(CoreError::StoreClosed);
        }
        Ok(())
    }
}
