//! 모든 핸들러에서 공유되는 애플리케이션 상태.
//!
//! AppState는 모든 API 핸들러에서 공유되는 상태를 관리합니다.
//! Arc로 래핑되어 여러 요청 간에 안전하게 공유됩니다.

use sqlx::PgPool;

use crate::auth::TokenService;

/// 애플리케이션 공유 상태.
///
/// 이 구조체는 모든 API 핸들러에서 접근할 수 있는 공유 리소스를 포함합니다.
/// Axum의 State extractor를 통해 핸들러에 주입됩니다.
#[derive(Clone)]
pub struct AppState {
    /// 데이터베이스 연결 풀 (PostgreSQL)
    pub db_pool: Option<PgPool>,

    /// JWT 토큰 서비스 - Access/Refresh 토큰 발급 및 검증
    pub tokens: TokenService,

    /// 서버 시작 시간 (업타임 계산용)
    pub started_at: chrono::DateTime<chrono::Utc>,

    /// API 버전
    pub version: String,
}

impl AppState {
    /// 새로운 AppState 생성.
    ///
    /// DB 연결 없이 시작하며 [`with_db_pool`](Self::with_db_pool)로 주입합니다.
    pub fn new(tokens: TokenService) -> Self {
        Self {
            db_pool: None,
            tokens,
            started_at: chrono::Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// 데이터베이스 연결 설정.
    pub fn with_db_pool(mut self, pool: PgPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// DB 연결 설정 여부 확인.
    pub fn has_db_pool(&self) -> bool {
        self.db_pool.is_some()
    }

    /// 서버 업타임(초) 반환.
    pub fn uptime_secs(&self) -> i64 {
        chrono::Utc::now()
            .signed_duration_since(self.started_at)
            .num_seconds()
    }

    /// 데이터베이스 연결 상태 확인.
    pub async fn is_db_healthy(&self) -> bool {
        if let Some(pool) = &self.db_pool {
            sqlx::query("SELECT 1").fetch_one(pool).await.is_ok()
        } else {
            false
        }
    }
}

/// 테스트용 AppState 생성 헬퍼.
///
/// 실제 DB 연결 없이 라우터 테스트를 할 수 있는 최소한의 상태를 생성합니다.
#[cfg(any(test, feature = "test-utils"))]
pub fn create_test_state() -> AppState {
    use market_core::config::AuthConfig;

    let tokens = TokenService::new(&AuthConfig {
        access_secret: "test-access-secret-minimum-32-chars!!".to_string(),
        refresh_secret: "test-refresh-secret-minimum-32-chars!".to_string(),
        access_ttl_minutes: 60,
        refresh_ttl_days: 7,
    });

    AppState::new(tokens)
}
