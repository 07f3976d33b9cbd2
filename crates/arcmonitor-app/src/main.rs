//! # arcmonitor-app
//!
//! ARCMONITOR 에이전트 바이너리 진입점.
//! DI 컨테이너 역할, 라이프사이클 관리, 스케줄러 오케스트레이션.

mod lifecycle;
mod scheduler;

use anyhow::{Context, Result};
use arcmonitor_core::config::AppConfig;
use arcmonitor_core::config_manager::ConfigManager;
use arcmonitor_core::ports::capture::CaptureService;
use arcmonitor_core::ports::monitor::SystemMonitor;
use arcmonitor_core::ports::storage::TelemetryStore;
use arcmonitor_core::state::ActivityTracker;
use arcmonitor_core::switch::MonitoringSwitch;
use arcmonitor_monitor::probe::build_probe;
use arcmonitor_monitor::SysInfoMonitor;
use arcmonitor_storage::{ArtifactDirs, SqliteStorage, DB_FILE_NAME};
use arcmonitor_vision::ocr::build_extractor;
use arcmonitor_vision::{CaptureSettings, ScreenCapture, ScreenCaptureService};
use arcmonitor_web::{MediaLimits, QueryFacade, WebServer};
use chrono::Utc;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::lifecycle::LifecycleManager;
use crate::scheduler::{Scheduler, SchedulerConfig};

/// ARCMONITOR 텔레메트리 에이전트
///
/// 시스템 메트릭, 활성 창 활동, 스크린샷과 영상 클립을 로컬에 기록한다.
#[derive(Parser, Debug)]
#[command(name = "arcmonitor")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 설정 파일 경로 (기본: 플랫폼 설정 디렉토리의 config.json)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// 데이터 저장 경로 (DB, screenshots/, videos/)
    #[arg(long, short = 'd')]
    data_dir: Option<PathBuf>,

    /// 조회 API 포트
    #[arg(long, short = 'p')]
    port: Option<u16>,

    /// 외부 접근 허용 (0.0.0.0 바인드)
    #[arg(long)]
    allow_external: bool,

    /// OCR 비활성화
    #[arg(long)]
    no_ocr: bool,

    /// 모니터링 꺼진 상태로 시작 (조회 API로 토글)
    #[arg(long)]
    start_paused: bool,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, short = 'l', default_value = "info")]
    log_level: String,
}

impl Args {
    /// CLI 인자로 설정 오버라이드
    fn apply(&self, config: &mut AppConfig) {
        if let Some(ref dir) = self.data_dir {
            config.storage.data_dir = Some(dir.clone());
        }
        if let Some(port) = self.port {
            config.web.port = port;
        }
        if self.allow_external {
            config.web.allow_external = true;
        }
        if self.no_ocr {
            config.vision.ocr_enabled = false;
        }
        if self.start_paused {
            config.monitor.enabled_at_start = false;
        }
    }
}

/// 설정 로드. 설정 파일 문제는 경고 후 기본값으로 계속한다.
fn load_config(path: Option<PathBuf>) -> AppConfig {
    let manager = match path {
        Some(path) => ConfigManager::with_path(path),
        None => ConfigManager::new(),
    };
    match manager {
        Ok(manager) => {
            info!("설정 파일: {}", manager.config_path().display());
            manager.get()
        }
        Err(e) => {
            warn!("설정 로드 실패, 기본 설정 사용: {e}");
            AppConfig::default_config()
        }
    }
}

/// 데이터/DB 경로 결정 (설정 값 → 플랫폼 기본 경로)
fn resolve_paths(config: &AppConfig) -> (PathBuf, PathBuf) {
    let data_dir = config
        .storage
        .data_dir
        .clone()
        .unwrap_or_else(ConfigManager::data_dir);
    let db_path = config
        .storage
        .db_path
        .clone()
        .unwrap_or_else(|| data_dir.join(DB_FILE_NAME));
    (data_dir, db_path)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_filter = [
        "arcmonitor",
        "arcmonitor_core",
        "arcmonitor_monitor",
        "arcmonitor_vision",
        "arcmonitor_storage",
        "arcmonitor_web",
    ]
    .iter()
    .map(|target| format!("{target}={}", args.log_level))
    .collect::<Vec<_>>()
    .join(",");
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter)),
        )
        .init();

    info!("ARCMONITOR 에이전트 시작 (v{})", env!("CARGO_PKG_VERSION"));

    let mut config = load_config(args.config.clone());
    args.apply(&mut config);

    // ── 저장소 ──
    let (data_dir, db_path) = resolve_paths(&config);
    let artifacts = ArtifactDirs::new(&data_dir);
    artifacts
        .ensure()
        .with_context(|| format!("데이터 디렉토리 준비 실패: {}", data_dir.display()))?;
    let storage = Arc::new(
        SqliteStorage::open(&db_path, artifacts)
            .with_context(|| format!("DB 열기 실패: {}", db_path.display()))?,
    );
    info!("데이터 디렉토리: {}", data_dir.display());

    // ── 포트 어댑터 ──
    let store: Arc<dyn TelemetryStore> = storage.clone();
    let system_monitor: Arc<dyn SystemMonitor> = Arc::new(SysInfoMonitor::new());
    let probe = build_probe(config.monitor.probe);
    let extractor = build_extractor(
        config.vision.ocr_enabled,
        config.vision.tessdata_path.clone(),
        &config.vision.ocr_language,
    );
    let ocr_enabled = extractor.is_enabled();
    let capture: Arc<dyn CaptureService> = Arc::new(ScreenCaptureService::new(
        CaptureSettings::from_config(&config.vision, &data_dir),
        Arc::new(ScreenCapture::new()),
        extractor,
    ));

    // ── 공유 상태 ──
    let switch = Arc::new(MonitoringSwitch::new(config.monitor.enabled_at_start));
    let tracker = ActivityTracker::new(Utc::now());
    if !switch.enabled() {
        info!("모니터링 꺼진 상태로 시작");
    }

    let lifecycle = LifecycleManager::new();

    // ── 스케줄러 ──
    let sched = Arc::new(Scheduler::new(
        SchedulerConfig::from_app_config(&config),
        switch.clone(),
        tracker.clone(),
        system_monitor.clone(),
        probe,
        capture,
        store.clone(),
    ));
    let scheduler_task = tokio::spawn(sched.run(lifecycle.subscribe()));

    // ── 조회 API 서버 (config.web.enabled일 때만) ──
    let web_task = if config.web.enabled {
        let facade = QueryFacade::new(store.clone(), system_monitor, tracker, switch, ocr_enabled)
            .with_media_limits(MediaLimits {
                screenshots: config.web.media_screenshots,
                videos: config.web.media_videos,
            });
        let web_server = WebServer::new(Arc::new(facade), config.web.clone(), data_dir.clone());
        info!("조회 API: {}", web_server.url());
        let web_shutdown_rx = lifecycle.subscribe();
        Some(tokio::spawn(async move {
            if let Err(e) = web_server.run(web_shutdown_rx).await {
                error!("웹 서버 오류: {e}");
            }
        }))
    } else {
        None
    };

    info!("ARCMONITOR 실행 중 (Ctrl+C로 종료)");

    // OS 시그널 대기
    lifecycle.wait_for_signal().await;

    // 종료 순서: 루프 종료 → 웹 서버 종료 → 저장소 닫기
    if let Err(e) = scheduler_task.await {
        error!("스케줄러 태스크 비정상 종료: {e}");
    }
    if let Some(task) = web_task {
        if let Err(e) = task.await {
            error!("웹 서버 태스크 비정상 종료: {e}");
        }
    }
    store.close().await.context("저장소 닫기 실패")?;

    info!("ARCMONITOR 에이전트 종료");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_overrides_config() {
        let args = Args::parse_from([
            "arcmonitor",
            "--data-dir",
            "/tmp/arc",
            "--port",
            "6000",
            "--allow-external",
            "--no-ocr",
            "--start-paused",
        ]);
        let mut config = AppConfig::default_config();
        args.apply(&mut config);

        assert_eq!(config.storage.data_dir, Some(PathBuf::from("/tmp/arc")));
        assert_eq!(config.web.port, 6000);
        assert!(config.web.allow_external);
        assert!(!config.vision.ocr_enabled);
        assert!(!config.monitor.enabled_at_start);
    }

    #[test]
    fn defaults_leave_config_untouched() {
        let args = Args::parse_from(["arcmonitor"]);
        let mut config = AppConfig::default_config();
        args.apply(&mut config);

        assert_eq!(config.web.port, 5000);
        assert!(config.vision.ocr_enabled);
        assert!(config.monitor.enabled_at_start);
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn db_path_defaults_under_data_dir() {
        let mut config = AppConfig::default_config();
        config.storage.data_dir = Some(PathBuf::from("/var/lib/arc"));
        let (data_dir, db_path) = resolve_paths(&config);
        assert_eq!(data_dir, PathBuf::from("/var/lib/arc"));
        assert_eq!(db_path, PathBuf::from("/var/lib/arc/system_data.db"));

        config.storage.db_path = Some(PathBuf::from("/elsewhere/telemetry.db"));
        let (_, db_path) = resolve_paths(&config);
        assert_eq!(db_path, PathBuf::from("/elsewhere/telemetry.db"));
    }

    #[test]
    fn explicit_config_path_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = load_config(Some(path.clone()));
        assert!(path.exists());
        assert_eq!(config.web.port, 5000);
    }
}
