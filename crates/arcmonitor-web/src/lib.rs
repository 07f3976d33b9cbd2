//! # arcmonitor-web
//!
//! 로컬 조회 API 서버.
//! Axum 기반 JSON API + 산출물 파일 서빙.
//!
//! ## 기능
//! - 현재 리소스 사용량 / 활성 창 / 유휴 시간 조회
//! - 활성 세션 활동 이력 조회
//! - 최신 스크린샷/영상 목록 및 파일 서빙
//! - 모니터링 토글

pub mod error;
pub mod facade;
pub mod handlers;
pub mod routes;

use arcmonitor_core::config::WebConfig;
use arcmonitor_core::models::artifact::ArtifactKind;
use axum::Router;
use std::io;
use std::net::{IpAddr, Ipv4Addr};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub use facade::{MediaLimits, QueryFacade};

/// 포트 바인드 최대 시도 횟수
const MAX_PORT_ATTEMPTS: u16 = 10;

/// 웹 서버 애플리케이션 상태
#[derive(Clone)]
pub struct AppState {
    /// 조회 파사드
    pub facade: Arc<QueryFacade>,
    /// `/api/history` 기본 개수
    pub history_limit: usize,
}

/// 라우터 구성
///
/// `/api/*` JSON 라우트, 같은 라우트의 루트 경로 별칭,
/// `/screenshots/*`, `/videos/*` 정적 파일 서빙.
pub fn build_router(state: AppState, data_dir: &Path) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let screenshots = ArtifactKind::Screenshot;
    let videos = ArtifactKind::Video;

    Router::new()
        .nest("/api", routes::api_routes())
        .merge(routes::root_routes())
        .nest_service(
            &format!("/{}", screenshots.dir_name()),
            ServeDir::new(screenshots.dir_in(data_dir)),
        )
        .nest_service(
            &format!("/{}", videos.dir_name()),
            ServeDir::new(videos.dir_in(data_dir)),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// `port`부터 차례로 시도해 처음 바인드되는 리스너. 사용 중인 포트만 건너뛴다.
async fn bind_first_free(ip: IpAddr, port: u16) -> io::Result<TcpListener> {
    let mut last_error = None;
    for candidate in (0..MAX_PORT_ATTEMPTS).map_while(|i| port.checked_add(i)) {
        match TcpListener::bind((ip, candidate)).await {
            Ok(listener) => return Ok(listener),
            Err(e) if e.kind() == io::ErrorKind::AddrInUse => {
                warn!("포트 {candidate} 이미 사용 중");
                last_error = Some(e);
            }
            Err(e) => return Err(e),
        }
    }
    Err(last_error.unwrap_or_else(|| {
        io::Error::new(
            io::ErrorKind::AddrInUse,
            format!("포트 {port}부터 사용 가능한 포트 없음"),
        )
    }))
}

/// 종료 신호가 켜지거나 송신측이 사라질 때 완료
async fn shutdown_requested(mut shutdown_rx: watch::Receiver<bool>) {
    let _ = shutdown_rx.wait_for(|stop| *stop).await;
    info!("웹 서버 종료 신호 수신");
}

/// 로컬 조회 API 서버
pub struct WebServer {
    config: WebConfig,
    state: AppState,
    data_dir: PathBuf,
}

impl WebServer {
    /// 새 웹 서버 생성
    pub fn new(facade: Arc<QueryFacade>, config: WebConfig, data_dir: PathBuf) -> Self {
        let state = AppState {
            facade,
            history_limit: config.history_limit,
        };
        Self {
            config,
            state,
            data_dir,
        }
    }

    /// 서버 실행. 종료 신호를 받으면 진행 중인 요청을 마치고 반환한다.
    pub async fn run(self, shutdown_rx: watch::Receiver<bool>) -> io::Result<()> {
        let ip = if self.config.allow_external {
            Ipv4Addr::UNSPECIFIED
        } else {
            Ipv4Addr::LOCALHOST
        };
        let listener = bind_first_free(ip.into(), self.config.port).await?;
        let addr = listener.local_addr()?;
        if self.config.port != 0 && addr.port() != self.config.port {
            warn!("포트 {} 사용 불가, 대체 포트 {} 사용", self.config.port, addr.port());
        }
        info!("조회 API 서버 시작: http://{addr}");

        axum::serve(listener, build_router(self.state, &self.data_dir))
            .with_graceful_shutdown(shutdown_requested(shutdown_rx))
            .await?;

        info!("조회 API 서버 종료");
        Ok(())
    }

    /// 서버 URL 반환
    pub fn url(&self) -> String {
        format!("http://localhost:{}", self.config.port)
    }
}
