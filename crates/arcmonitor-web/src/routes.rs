//! API 라우트 정의.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::AppState;

/// API 라우트 생성 (`/api` 아래에 중첩)
pub fn api_routes() -> Router<AppState> {
    query_routes("/media")
}

/// 루트 경로 라우트. 기존 대시보드가 쓰는 `/media-list` 이름을 유지한다.
pub fn root_routes() -> Router<AppState> {
    query_routes("/media-list")
}

fn query_routes(media_path: &str) -> Router<AppState> {
    Router::new()
        // 현재 리소스 + 활성 창
        .route("/data", get(handlers::status::get_live_data))
        // 활동 이력
        .route("/history", get(handlers::history::get_history))
        // 산출물 목록
        .route(media_path, get(handlers::media::get_media))
        // 모니터링 플래그
        .route("/status", get(handlers::status::get_status))
        .route("/control", post(handlers::control::post_control))
}
