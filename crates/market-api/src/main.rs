//! 마켓플레이스 API 서버.
//!
//! Axum 기반 REST API 서버를 시작합니다.
//! 회원 인증, 상품/카테고리 관리, 판매자 대시보드 엔드포인트를 제공합니다.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{http::StatusCode, Router};
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use market_api::auth::TokenService;
use market_api::openapi::swagger_ui_router;
use market_api::routes::create_api_router;
use market_api::state::AppState;
use market_core::config::AppConfig;
use market_core::logging::init_logging;

/// CORS 미들웨어 구성.
///
/// CORS_ORIGINS 환경변수가 설정되어 있으면 해당 origin만 허용합니다.
/// 설정되지 않으면 개발 모드로 간주하여 모든 origin을 허용합니다.
///
/// # 환경변수
///
/// - `CORS_ORIGINS`: 쉼표로 구분된 허용 origin 목록
///   예: `https://shop.example.com,https://admin.example.com`
fn cors_layer() -> CorsLayer {
    let allow_origin = match std::env::var("CORS_ORIGINS") {
        Ok(origins) if !origins.is_empty() => {
            // 프로덕션: 특정 origin만 허용
            let origins: Vec<_> = origins
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();

            if origins.is_empty() {
                warn!("CORS_ORIGINS is set but contains no valid origins, allowing any");
                AllowOrigin::any()
            } else {
                info!("CORS configured with {} allowed origins", origins.len());
                AllowOrigin::list(origins)
            }
        }
        _ => {
            // 개발: 모든 origin 허용
            warn!("CORS_ORIGINS not set, allowing any origin (development mode)");
            AllowOrigin::any()
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::AUTHORIZATION,
            axum::http::header::ACCEPT,
        ])
        // 자격 증명 포함 허용 (CORS_ORIGINS 설정 시에만)
        .allow_credentials(std::env::var("CORS_ORIGINS").is_ok())
        // preflight 요청 캐시 시간
        .max_age(Duration::from_secs(3600))
}

/// 전체 라우터 생성.
fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(create_api_router().with_state(state))
        // OpenAPI 문서 및 Swagger UI
        .merge(swagger_ui_router())
        .layer(TraceLayer::new_for_http())
        // 전역 타임아웃 (30초) - 408 상태 코드 반환
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(cors_layer())
}

/// Graceful shutdown 시그널 대기.
///
/// Ctrl+C 또는 SIGTERM 수신 시 서버를 정상 종료합니다.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env 파일 로드 (있는 경우)
    let _ = dotenvy::dotenv();

    // 설정 로드 (CONFIG_PATH 파일 우선, 없으면 환경변수만)
    let config = match std::env::var("CONFIG_PATH") {
        Ok(path) => AppConfig::load(&path)?,
        Err(_) => AppConfig::from_env()?,
    };

    // tracing 초기화
    init_logging(&config.logging)?;

    info!("Starting Marketplace API server...");

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| {
            error!(
                host = %config.server.host,
                port = config.server.port,
                "서버 주소 설정이 유효하지 않습니다. MARKET__SERVER__HOST/PORT를 확인하세요."
            );
            e
        })?;

    if config.auth.access_secret.starts_with("dev-") {
        warn!("기본 JWT 시크릿 사용 중 (개발 전용, 프로덕션에서 반드시 교체)");
    }

    // AppState 빌드
    let tokens = TokenService::new(&config.auth);
    let mut state = AppState::new(tokens);

    // DB 연결 설정 (DATABASE_URL 환경변수에서)
    if let Ok(database_url) = std::env::var("DATABASE_URL") {
        match PgPoolOptions::new()
            .max_connections(config.database.max_connections)
            .acquire_timeout(Duration::from_secs(config.database.connection_timeout_secs))
            .connect(&database_url)
            .await
        {
            Ok(pool) => {
                // 연결 테스트
                if sqlx::query("SELECT 1").fetch_one(&pool).await.is_ok() {
                    info!("Connected to PostgreSQL successfully");
                    state = state.with_db_pool(pool);
                } else {
                    error!("Failed to verify database connection");
                }
            }
            Err(e) => {
                error!("Failed to connect to database: {}", e);
                warn!("Starting without database (auth and catalog routes will return 503)");
            }
        }
    } else {
        warn!("DATABASE_URL not set, starting without database");
    }

    let app = create_router(Arc::new(state));

    info!("Listening on http://{}", addr);
    info!("Swagger UI available at http://{}/swagger-ui", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
