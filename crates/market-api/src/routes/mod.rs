//! API 라우트.
//!
//! 모든 REST API 엔드포인트를 정의하고 라우터를 구성합니다.
//!
//! # 라우트 구조
//!
//! - `/health` - 헬스 체크 (liveness)
//! - `/health/ready` - 상세 헬스 체크 (readiness)
//! - `/api/auth` - 회원가입, 로그인, 토큰 갱신
//! - `/api/products` - 상품 목록/상세/등록
//! - `/api/categories` - 카테고리 목록/생성
//! - `/api/dashboard` - 판매자 대시보드 통계

pub mod auth;
pub mod categories;
pub mod dashboard;
pub mod health;
pub mod products;

pub use auth::{auth_router, AuthResponse, LoginRequest, RefreshRequest, RefreshResponse, SignupRequest};
pub use categories::{categories_router, CreateCategoryRequest};
pub use dashboard::{dashboard_router, SellerStatsResponse};
pub use health::{health_router, ComponentHealth, ComponentStatus, HealthResponse};
pub use products::{
    products_router, CreateProductRequest, ProductListQuery, ProductListResponse,
};

use axum::Router;
use std::sync::Arc;

use crate::state::AppState;

/// 전체 API 라우터 생성.
///
/// 모든 서브 라우터를 조합하여 하나의 라우터로 반환합니다.
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        // 헬스 체크 엔드포인트
        .nest("/health", health_router())
        // API 엔드포인트
        .nest("/api/auth", auth_router())
        .nest("/api/products", products_router())
        .nest("/api/categories", categories_router())
        .nest("/api/dashboard", dashboard_router())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::create_test_state;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_full_router_health() {
        let app = create_api_router().with_state(Arc::new(create_test_state()));

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route_returns_404() {
        let app = create_api_router().with_state(Arc::new(create_test_state()));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/unknown")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
