//! 미디어 목록 API 핸들러.

use axum::extract::State;
use axum::Json;

use crate::error::ApiError;
use crate::facade::MediaList;
use crate::AppState;

/// 최신 스크린샷/영상 파일 이름
///
/// GET /api/media
pub async fn get_media(State(state): State<AppState>) -> Result<Json<MediaList>, ApiError> {
    let media = state.facade.media_list().await?;
    Ok(Json(media))
}
