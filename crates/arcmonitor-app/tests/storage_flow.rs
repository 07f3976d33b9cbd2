//! 저장소 → 조회 파사드 통합 테스트.
//!
//! 바이너리와 같은 데이터 디렉토리 구성(`DB_FILE_NAME`, 산출물 하위 디렉토리)으로
//! 저장소를 열고, 재시작 후에도 조회 파사드에 그대로 보이는지 확인한다.

use arcmonitor_core::error::CoreError;
use arcmonitor_core::models::activity::{ActivitySnapshot, WindowIdentity};
use arcmonitor_core::models::metrics::MetricSample;
use arcmonitor_core::ports::monitor::SystemMonitor;
use arcmonitor_core::ports::storage::TelemetryStore;
use arcmonitor_core::state::ActivityTracker;
use arcmonitor_core::switch::MonitoringSwitch;
use arcmonitor_storage::{ArtifactDirs, SqliteStorage, DB_FILE_NAME};
use arcmonitor_web::QueryFacade;
use async_trait::async_trait;
use chrono::Utc;
use std::path::Path;
use std::sync::Arc;

struct IdleMonitor;

#[async_trait]
impl SystemMonitor for IdleMonitor {
    async fn collect_metrics(&self) -> Result<MetricSample, CoreError> {
        Ok(MetricSample {
            timestamp: Utc::now(),
            cpu_percent: 0.5,
            memory_percent: 10.0,
            bytes_sent: 0,
            bytes_recv: 0,
        })
    }
}

fn open_store(data_dir: &Path) -> Arc<SqliteStorage> {
    let artifacts = ArtifactDirs::new(data_dir);
    artifacts.ensure().unwrap();
    Arc::new(SqliteStorage::open(&data_dir.join(DB_FILE_NAME), artifacts).unwrap())
}

fn facade(store: Arc<SqliteStorage>) -> QueryFacade {
    QueryFacade::new(
        store,
        Arc::new(IdleMonitor),
        ActivityTracker::new(Utc::now()),
        Arc::new(MonitoringSwitch::default()),
        false,
    )
}

fn snapshot(title: &str, active: bool) -> ActivitySnapshot {
    ActivitySnapshot {
        id: None,
        timestamp: Utc::now(),
        window: WindowIdentity::new(title, "code"),
        thumbnail: vec![1, 2, 3],
        extracted_text: format!("{title} text"),
        active_session: active,
        artifact_path: None,
    }
}

#[tokio::test]
async fn fresh_data_dir_reads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let facade = facade(open_store(dir.path()));

    assert!(dir.path().join(DB_FILE_NAME).exists());
    assert!(facade.recent_activity(10).await.unwrap().is_empty());
    let media = facade.media_list().await.unwrap();
    assert!(media.screenshots.is_empty());
    assert!(media.videos.is_empty());
}

#[tokio::test]
async fn history_and_media_survive_restart() {
    let dir = tempfile::tempdir().unwrap();

    {
        let store = open_store(dir.path());
        store.append_activity(&snapshot("kept", true)).await.unwrap();
        store.append_activity(&snapshot("idle", false)).await.unwrap();
        store.close().await.unwrap();
    }
    std::fs::write(
        dir.path()
            .join("screenshots")
            .join("screenshot_20240501_120000.jpg"),
        b"jpeg",
    )
    .unwrap();

    let facade = facade(open_store(dir.path()));
    let rows = facade.recent_activity(10).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].window.title, "kept");
    assert_eq!(rows[0].thumbnail, vec![1, 2, 3]);
    assert_eq!(
        facade.media_list().await.unwrap().screenshots,
        vec!["screenshot_20240501_120000.jpg".to_string()]
    );
}
