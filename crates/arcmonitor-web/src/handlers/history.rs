//! 활동 이력 API 핸들러.

use arcmonitor_core::models::activity::ActivitySnapshot;
use axum::extract::{Query, State};
use axum::Json;
use serde::Serialize;

use crate::error::ApiError;
use crate::AppState;

use super::LimitQuery;

/// 활동 레코드 응답 DTO
#[derive(Debug, Serialize)]
pub struct ActivityResponse {
    /// 캡처 시각 (RFC3339)
    pub timestamp: String,
    /// 창 제목
    pub window: String,
    /// 프로세스 이름
    pub process: String,
    /// base64 인코딩된 JPEG 썸네일
    pub screenshot: String,
    /// OCR 텍스트
    pub ocr_text: String,
}

impl From<ActivitySnapshot> for ActivityResponse {
    fn from(snapshot: ActivitySnapshot) -> Self {
        let screenshot = snapshot.thumbnail_base64();
        Self {
            timestamp: snapshot.timestamp.to_rfc3339(),
            window: snapshot.window.title,
            process: snapshot.window.process,
            screenshot,
            ocr_text: snapshot.extracted_text,
        }
    }
}

/// 최근 활성 세션 활동 레코드 (최신순)
///
/// GET /api/history?limit=
pub async fn get_history(
    State(state): State<AppState>,
    Query(params): Query<LimitQuery>,
) -> Result<Json<Vec<ActivityResponse>>, ApiError> {
    let limit = params.limit_or(state.history_limit);
    let records = state.facade.recent_activity(limit).await?;
    Ok(Json(records.into_iter().map(ActivityResponse::from).collect()))
}
