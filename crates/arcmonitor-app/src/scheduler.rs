//! 3-루프 샘플링 스케줄러.
//!
//! 메트릭(5초), 활동(1초 틱, 스크린샷 30초 / 유휴 60초), 영상(1초 틱, 30분 주기 10초 클립) 오케스트레이션.
//! 루프마다 틱은 순차 실행되며, 종료 신호는 각 루프의 대기 지점에서 관측된다.

use arcmonitor_core::config::AppConfig;
use arcmonitor_core::error::CoreError;
use arcmonitor_core::models::activity::ActivitySnapshot;
use arcmonitor_core::models::video::VideoRecord;
use arcmonitor_core::ports::capture::CaptureService;
use arcmonitor_core::ports::monitor::{ActivityProbe, SystemMonitor};
use arcmonitor_core::ports::storage::TelemetryStore;
use arcmonitor_core::state::ActivityTracker;
use arcmonitor_core::switch::MonitoringSwitch;
use chrono::{DateTime, Utc};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

/// 스케줄러 설정
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// 시스템 메트릭 수집 간격
    pub metrics_interval: Duration,
    /// 활동 루프 틱 간격
    pub activity_tick: Duration,
    /// 영상 루프 틱 간격
    pub video_tick: Duration,
    /// 모니터링 비활성 시 재확인 대기
    pub disabled_backoff: Duration,
    /// 스크린샷 최소 간격
    pub screenshot_interval: Duration,
    /// 유휴 판정 임계값
    pub inactivity_threshold: Duration,
    /// 영상 녹화 주기
    pub video_interval: Duration,
    /// 영상 클립 길이
    pub video_duration: Duration,
}

impl SchedulerConfig {
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            metrics_interval: config.metrics_interval(),
            activity_tick: config.activity_tick(),
            video_tick: config.video_tick(),
            disabled_backoff: config.disabled_backoff(),
            screenshot_interval: Duration::from_secs(config.vision.screenshot_interval_secs),
            inactivity_threshold: Duration::from_secs(config.monitor.inactivity_threshold_secs),
            video_interval: Duration::from_secs(config.vision.video_interval_secs),
            video_duration: config.video_duration(),
        }
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self::from_app_config(&AppConfig::default_config())
    }
}

/// 틱 한 번의 결과
///
/// 어떤 결과도 루프를 종료시키지 않는다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// 모니터링 꺼짐. 아무 상태도 건드리지 않음.
    Disabled,
    /// 주기 미도래
    NotDue,
    /// 유휴 세션이라 캡처 억제
    Idle,
    /// 레코드 저장 완료
    Recorded,
    /// 캡처/인코딩 실패. 다음 틱에 재시도.
    CaptureFailed,
    /// 메트릭 수집 실패
    CollectFailed,
    /// 저장 실패 (데이터 유실)
    StoreFailed,
}

/// 샘플링 스케줄러
pub struct Scheduler {
    config: SchedulerConfig,
    switch: Arc<MonitoringSwitch>,
    activity: ActivityTracker,
    system_monitor: Arc<dyn SystemMonitor>,
    probe: Arc<dyn ActivityProbe>,
    capture: Arc<dyn CaptureService>,
    store: Arc<dyn TelemetryStore>,
}

impl Scheduler {
    pub fn new(
        config: SchedulerConfig,
        switch: Arc<MonitoringSwitch>,
        activity: ActivityTracker,
        system_monitor: Arc<dyn SystemMonitor>,
        probe: Arc<dyn ActivityProbe>,
        capture: Arc<dyn CaptureService>,
        store: Arc<dyn TelemetryStore>,
    ) -> Self {
        Self {
            config,
            switch,
            activity,
            system_monitor,
            probe,
            capture,
            store,
        }
    }

    /// 메트릭 틱: 샘플 1건 수집 후 저장
    pub async fn metrics_tick(&self) -> TickOutcome {
        if !self.switch.enabled() {
            return TickOutcome::Disabled;
        }

        let sample = match self.system_monitor.collect_metrics().await {
            Ok(sample) => sample,
            Err(e) => {
                warn!("시스템 메트릭 수집 실패: {e}");
                return TickOutcome::CollectFailed;
            }
        };

        match self.store.append_metric(&sample).await {
            Ok(()) => {
                debug!(
                    cpu = sample.cpu_percent,
                    memory = sample.memory_percent,
                    "메트릭 저장"
                );
                TickOutcome::Recorded
            }
            Err(e) => store_failed("메트릭", &e),
        }
    }

    /// 활동 틱: 창 전환 반영 후 스크린샷 주기 도래 시 캡처
    pub async fn activity_tick(&self, now: DateTime<Utc>) -> TickOutcome {
        if !self.switch.enabled() {
            return TickOutcome::Disabled;
        }

        let identity = self.probe.current_window().await;
        let (changed, due, window) = self.activity.observe_and_check(
            identity,
            now,
            self.config.screenshot_interval,
            self.config.inactivity_threshold,
        );
        if changed {
            debug!(title = %window.title, process = %window.process, "활성 창 전환");
        }

        if !due {
            let state = self.activity.snapshot();
            if !state.is_active(now, self.config.inactivity_threshold) {
                return TickOutcome::Idle;
            }
            return TickOutcome::NotDue;
        }

        let artifact = match self.capture.screenshot().await {
            Ok(artifact) => artifact,
            Err(e) => {
                warn!("스크린샷 캡처 실패, 다음 틱에 재시도: {e}");
                return TickOutcome::CaptureFailed;
            }
        };
        let snapshot = ActivitySnapshot {
            id: None,
            timestamp: artifact.captured_at,
            window,
            thumbnail: artifact.thumbnail,
            extracted_text: artifact.extracted_text,
            active_session: true,
            artifact_path: Some(artifact.path.to_string_lossy().into_owned()),
        };

        match self.store.append_activity(&snapshot).await {
            Ok(()) => {
                // 저장에 성공한 캡처만 주기를 진행시킨다
                self.activity.mark_screenshot(now);
                debug!(path = %artifact.path.display(), "활동 스냅샷 저장");
                TickOutcome::Recorded
            }
            Err(e) => store_failed("활동 스냅샷", &e),
        }
    }

    /// 영상 틱: 주기 초과 시 클립 녹화 (클립 길이만큼 블로킹)
    pub async fn video_tick(&self, now: DateTime<Utc>) -> TickOutcome {
        if !self.switch.enabled() {
            return TickOutcome::Disabled;
        }
        if !self.activity.video_due(now, self.config.video_interval) {
            return TickOutcome::NotDue;
        }

        info!("영상 클립 녹화 시작 ({}초)", self.config.video_duration.as_secs());
        let path = match self.capture.record_clip(self.config.video_duration).await {
            Ok(path) => path,
            Err(e) => {
                warn!("영상 녹화 실패, 다음 틱에 재시도: {e}");
                return TickOutcome::CaptureFailed;
            }
        };
        self.activity.mark_video(now);

        let record = VideoRecord {
            timestamp: now,
            duration_seconds: self.config.video_duration.as_secs() as u32,
            file_path: path.to_string_lossy().into_owned(),
        };

        match self.store.append_video(&record).await {
            Ok(()) => {
                info!("영상 클립 저장: {}", record.file_path);
                TickOutcome::Recorded
            }
            Err(e) => store_failed("영상", &e),
        }
    }

    /// 세 루프 실행. 종료 신호 후 모든 루프가 끝날 때까지 대기한다.
    ///
    /// 진행 중인 틱(녹화 중인 클립 포함)은 끝까지 수행된 뒤 루프가 종료된다.
    pub async fn run(self: Arc<Self>, shutdown_rx: watch::Receiver<bool>) {
        info!(
            "스케줄러 시작: 메트릭 {}초, 스크린샷 {}초, 유휴 {}초, 영상 {}초",
            self.config.metrics_interval.as_secs(),
            self.config.screenshot_interval.as_secs(),
            self.config.inactivity_threshold.as_secs(),
            self.config.video_interval.as_secs()
        );

        // ============================================================
        // 1. 메트릭 루프 (5초)
        // ============================================================
        let sched = self.clone();
        let rx = shutdown_rx.clone();
        let metrics_task = tokio::spawn(async move {
            let (interval, backoff) = (sched.config.metrics_interval, sched.config.disabled_backoff);
            drive("메트릭", interval, backoff, rx, || sched.metrics_tick()).await;
        });

        // ============================================================
        // 2. 활동 루프 (1초 틱)
        // ============================================================
        let sched = self.clone();
        let rx = shutdown_rx.clone();
        let activity_task = tokio::spawn(async move {
            let (interval, backoff) = (sched.config.activity_tick, sched.config.disabled_backoff);
            drive("활동", interval, backoff, rx, || {
                sched.activity_tick(Utc::now())
            })
            .await;
        });

        // ============================================================
        // 3. 영상 루프 (1초 틱)
        // ============================================================
        let sched = self.clone();
        let rx = shutdown_rx;
        let video_task = tokio::spawn(async move {
            let (interval, backoff) = (sched.config.video_tick, sched.config.disabled_backoff);
            drive("영상", interval, backoff, rx, || sched.video_tick(Utc::now())).await;
        });

        let (metrics, activity, video) = tokio::join!(metrics_task, activity_task, video_task);
        for (name, result) in [("메트릭", metrics), ("활동", activity), ("영상", video)] {
            if let Err(e) = result {
                error!("{name} 루프 태스크 비정상 종료: {e}");
            }
        }
        info!("스케줄러 종료");
    }
}

/// 저장 실패는 데이터 유실이므로 `error!`로 남긴다
fn store_failed(what: &str, err: &CoreError) -> TickOutcome {
    if err.is_data_loss() {
        error!("{what} 저장 실패 (레코드 유실): {err}");
    } else {
        warn!("{what} 저장 실패: {err}");
    }
    TickOutcome::StoreFailed
}

/// 루프 본체: 틱 → 대기 반복. 대기 중 종료 신호가 오면 즉시 빠져나온다.
async fn drive<F, Fut>(
    name: &'static str,
    interval: Duration,
    disabled_backoff: Duration,
    mut shutdown_rx: watch::Receiver<bool>,
    mut tick: F,
) where
    F: FnMut() -> Fut,
    Fut: Future<Output = TickOutcome>,
{
    loop {
        if *shutdown_rx.borrow() {
            break;
        }

        let wait = match tick().await {
            TickOutcome::Disabled => disabled_backoff,
            _ => interval,
        };

        tokio::select! {
            _ = tokio::time::sleep(wait) => {}
            _ = shutdown_rx.changed() => {
                break;
            }
        }
    }
    info!("{name} 루프 종료");
}
