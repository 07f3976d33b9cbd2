//! 현재 상태 API 핸들러.

use axum::extract::State;
use axum::Json;

use crate::error::ApiError;
use crate::facade::{LiveStatus, MonitoringStatus};
use crate::AppState;

/// 현재 리소스 사용량 + 활성 창 + 유휴 시간
///
/// GET /api/data
pub async fn get_live_data(State(state): State<AppState>) -> Result<Json<LiveStatus>, ApiError> {
    let status = state.facade.live_status().await?;
    Ok(Json(status))
}

/// 모니터링/OCR 플래그
///
/// GET /api/status
pub async fn get_status(State(state): State<AppState>) -> Json<MonitoringStatus> {
    Json(state.facade.monitoring_status())
}
