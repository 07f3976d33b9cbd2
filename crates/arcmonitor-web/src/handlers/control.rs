//! 모니터링 제어 API 핸들러.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::AppState;

/// 제어 요청 본문
#[derive(Debug, Deserialize)]
pub struct ControlRequest {
    /// 수행할 동작 (현재는 "toggle"만 인식)
    #[serde(default)]
    pub action: String,
}

/// 제어 응답 본문
#[derive(Debug, Serialize)]
pub struct ControlResponse {
    /// 요청 처리 후 모니터링 활성 여부
    pub status: bool,
}

/// 모니터링 토글
///
/// POST /api/control `{"action": "toggle"}`
///
/// 알 수 없는 동작은 상태를 바꾸지 않고 현재 상태만 반환한다.
pub async fn post_control(
    State(state): State<AppState>,
    Json(request): Json<ControlRequest>,
) -> Json<ControlResponse> {
    let status = match request.action.as_str() {
        "toggle" => {
            let enabled = state.facade.toggle_monitoring();
            info!(monitoring = enabled, "모니터링 토글");
            enabled
        }
        _ => state.facade.monitoring_status().monitoring,
    };
    Json(ControlResponse { status })
}
