//! 조회 파사드.
//!
//! 라이브 활동 상태, 즉석 리소스 측정, 저장소 조회를 합성한다.
//! 캐시는 두지 않으며 모든 조회는 호출 시점의 상태를 반영한다.

use arcmonitor_core::error::CoreError;
use arcmonitor_core::models::activity::ActivitySnapshot;
use arcmonitor_core::ports::monitor::SystemMonitor;
use arcmonitor_core::ports::storage::TelemetryStore;
use arcmonitor_core::state::ActivityTracker;
use arcmonitor_core::switch::MonitoringSwitch;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

/// 현재 리소스 사용량 + 활성 창 + 유휴 시간
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiveStatus {
    /// CPU 사용률 (%)
    pub cpu: f32,
    /// 메모리 사용률 (%)
    pub memory: f32,
    /// 누적 네트워크 카운터
    pub network: NetworkCounters,
    /// 활성 창 제목
    pub current_window: String,
    /// 활성 창 프로세스
    pub current_process: String,
    /// 마지막 창 전환 이후 경과 초
    pub inactive_time: f64,
}

/// 누적 네트워크 송수신 바이트
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NetworkCounters {
    pub bytes_sent: u64,
    pub bytes_recv: u64,
}

/// 최신 산출물 파일 이름 목록
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MediaList {
    pub screenshots: Vec<String>,
    pub videos: Vec<String>,
}

/// 모니터링/OCR 플래그
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonitoringStatus {
    pub monitoring: bool,
    pub ocr_enabled: bool,
}

/// 미디어 목록 개수 제한
#[derive(Debug, Clone, Copy)]
pub struct MediaLimits {
    pub screenshots: usize,
    pub videos: usize,
}

impl Default for MediaLimits {
    fn default() -> Self {
        Self {
            screenshots: 5,
            videos: 3,
        }
    }
}

/// 외부 대시보드가 소비하는 읽기 전용 조회 계층
///
/// 쓰기 경로는 `toggle_monitoring` 하나뿐이다.
pub struct QueryFacade {
    store: Arc<dyn TelemetryStore>,
    system_monitor: Arc<dyn SystemMonitor>,
    activity: ActivityTracker,
    switch: Arc<MonitoringSwitch>,
    ocr_enabled: bool,
    media_limits: MediaLimits,
}

impl QueryFacade {
    pub fn new(
        store: Arc<dyn TelemetryStore>,
        system_monitor: Arc<dyn SystemMonitor>,
        activity: ActivityTracker,
        switch: Arc<MonitoringSwitch>,
        ocr_enabled: bool,
    ) -> Self {
        Self {
            store,
            system_monitor,
            activity,
            switch,
            ocr_enabled,
            media_limits: MediaLimits::default(),
        }
    }

    pub fn with_media_limits(mut self, limits: MediaLimits) -> Self {
        self.media_limits = limits;
        self
    }

    /// 현재 리소스 사용량과 활동 상태
    pub async fn live_status(&self) -> Result<LiveStatus, CoreError> {
        self.live_status_at(Utc::now()).await
    }

    /// `now` 기준 유휴 시간을 계산하는 변형
    pub async fn live_status_at(&self, now: DateTime<Utc>) -> Result<LiveStatus, CoreError> {
        let sample = self.system_monitor.collect_metrics().await?;
        // 창과 시각은 같은 잠금에서 복제된 스냅샷이므로 서로 어긋나지 않는다
        let state = self.activity.snapshot();

        Ok(LiveStatus {
            cpu: sample.cpu_percent,
            memory: sample.memory_percent,
            network: NetworkCounters {
                bytes_sent: sample.bytes_sent,
                bytes_recv: sample.bytes_recv,
            },
            current_window: state.current_window.title.clone(),
            current_process: state.current_window.process.clone(),
            inactive_time: state.inactive_secs(now),
        })
    }

    /// 활성 세션 활동 레코드 최신순 최대 `limit`건
    pub async fn recent_activity(&self, limit: usize) -> Result<Vec<ActivitySnapshot>, CoreError> {
        self.store.recent_activity(limit).await
    }

    /// 최신 스크린샷/영상 파일 이름
    pub async fn media_list(&self) -> Result<MediaList, CoreError> {
        let screenshots = self
            .store
            .list_recent_screenshots(self.media_limits.screenshots)
            .await?;
        let videos = self
            .store
            .list_recent_videos(self.media_limits.videos)
            .await?;
        Ok(MediaList {
            screenshots,
            videos,
        })
    }

    pub fn monitoring_status(&self) -> MonitoringStatus {
        MonitoringStatus {
            monitoring: self.switch.enabled(),
            ocr_enabled: self.ocr_enabled,
        }
    }

    /// 모니터링 토글 후 새 상태 반환
    pub fn toggle_monitoring(&self) -> bool {
        self.switch.toggle()
    }
}
