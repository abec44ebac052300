//! 마켓플레이스 REST API 서버.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - Axum 기반 REST API
//! - JWT 인증 (Access/Refresh 토큰)
//! - 역할 기반 접근 제어 (customer/seller/admin)
//! - 판매자 대시보드 집계
//! - 헬스 체크 엔드포인트
//!
//! # 모듈 구성
//!
//! - [`state`]: 애플리케이션 공유 상태 (AppState)
//! - [`routes`]: REST API 엔드포인트
//! - [`auth`]: JWT 인증 및 권한 관리
//! - [`repository`]: 데이터베이스 접근 레이어
//! - [`openapi`]: OpenAPI 문서 및 Swagger UI

pub mod auth;
pub mod error;
pub mod openapi;
pub mod repository;
pub mod routes;
pub mod state;

pub use auth::{
    hash_password, verify_password, AdminUser, AuthError, AuthUser, JwtError, SellerUser,
    TokenPair, TokenService,
};
pub use error::{ApiErrorResponse, ApiResult};
pub use routes::create_api_router;
pub use state::AppState;

#[cfg(any(test, feature = "test-utils"))]
pub use state::create_test_state;
