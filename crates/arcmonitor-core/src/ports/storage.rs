//! 텔레메트리 저장소 포트.
//!
//! 구현: `arcmonitor-storage` crate (rusqlite + 산출물 디렉토리)

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::activity::ActivitySnapshot;
use crate::models::metrics::MetricSample;
use crate::models::video::VideoRecord;

/// 세 레코드 스트림의 단일 저장소
///
/// 모든 쓰기는 추가 전용이다. 동시 호출은 구현 내부의 단일 연결에서 직렬화된다.
#[async_trait]
pub trait TelemetryStore: Send + Sync {
    async fn append_metric(&self, sample: &MetricSample) -> Result<(), CoreError>;

    async fn append_activity(&self, snapshot: &ActivitySnapshot) -> Result<(), CoreError>;

    async fn append_video(&self, record: &VideoRecord) -> Result<(), CoreError>;

    /// 활성 세션 활동 레코드를 최신순으로 최대 `limit`건
    async fn recent_activity(&self, limit: usize) -> Result<Vec<ActivitySnapshot>, CoreError>;

    /// 최신 스크린샷 파일 이름 최대 `n`개 (최신순)
    async fn list_recent_screenshots(&self, n: usize) -> Result<Vec<String>, CoreError>;

    /// 최신 영상 파일 이름 최대 `n`개 (최신순)
    async fn list_recent_videos(&self, n: usize) -> Result<Vec<String>, CoreError>;

    /// 저장소 닫기. 이후 모든 호출은 `CoreError::StoreClosed`.
    async fn close(&self) -> Result<(), CoreError>;
}
