//! OpenAPI 문서화 설정.
//!
//! utoipa를 사용하여 REST API의 OpenAPI 3.0 스펙을 생성합니다.
//! Swagger UI는 `/swagger-ui` 경로에서 사용 가능합니다.
//!
//! # 자동 생성 구조
//!
//! 각 라우트 모듈은 자체 스키마를 정의하고, 중앙 `ApiDoc`에서 집계합니다.
//! 새로운 엔드포인트를 추가할 때:
//!
//! 1. 응답/요청 타입에 `#[derive(ToSchema)]` 추가
//! 2. 핸들러에 `#[utoipa::path(...)]` 어노테이션 추가
//! 3. 이 파일의 `components(schemas(...))` 및 `paths(...)` 섹션에 추가

use axum::Router;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use market_core::{ProductStatus, Role};

// ==================== 각 모듈에서 스키마 Import ====================

use crate::auth::TokenPair;
use crate::error::ApiErrorResponse;
use crate::repository::categories::CategoryRecord;
use crate::repository::orders::{RecentOrder, RecentOrderItem};
use crate::repository::products::{ProductDetail, ProductRecord};
use crate::repository::users::PublicUser;
use crate::routes::{
    AuthResponse, ComponentHealth, ComponentStatus, CreateCategoryRequest, CreateProductRequest,
    HealthResponse, LoginRequest, ProductListResponse, RefreshRequest, RefreshResponse,
    SellerStatsResponse, SignupRequest,
};

// ==================== OpenAPI 문서 정의 ====================

/// Marketplace API 문서.
///
/// 모든 엔드포인트와 스키마를 포함하는 OpenAPI 3.0 스펙입니다.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Marketplace API",
        version = "0.1.0",
        description = r#"
# 마켓플레이스 백엔드 REST API

회원 인증, 상품/카테고리 관리, 판매자 대시보드를 위한 REST API입니다.

## 주요 기능

- **인증**: JWT 기반 회원가입/로그인/토큰 갱신
- **상품**: 공개 목록/상세 조회, 판매자 상품 등록
- **카테고리**: 공개 목록, 관리자 전용 생성
- **대시보드**: 판매자 매출/주문/상품 통계

## 인증

보호된 엔드포인트는 JWT Bearer 토큰 인증이 필요합니다.
`Authorization: Bearer <token>` 헤더를 포함하세요.
"#,
        license(name = "MIT", url = "https://opensource.org/licenses/MIT"),
        contact(
            name = "Marketplace Team",
            url = "https://github.com/user/market"
        )
    ),
    servers(
        (url = "http://localhost:5000", description = "로컬 개발 서버"),
    ),
    tags(
        (name = "health", description = "헬스 체크 - 서버 상태 확인"),
        (name = "auth", description = "인증 - 회원가입/로그인/토큰 갱신"),
        (name = "products", description = "상품 - 목록/상세/등록"),
        (name = "categories", description = "카테고리 - 목록/생성"),
        (name = "dashboard", description = "대시보드 - 판매자 통계")
    ),
    // ==================== 스키마 등록 ====================
    components(
        schemas(
            // ===== Health =====
            HealthResponse,
            ComponentHealth,
            ComponentStatus,

            // ===== Common =====
            ApiErrorResponse,
            Role,
            ProductStatus,

            // ===== Auth =====
            SignupRequest,
            LoginRequest,
            RefreshRequest,
            AuthResponse,
            RefreshResponse,
            TokenPair,
            PublicUser,

            // ===== Products =====
            ProductRecord,
            ProductDetail,
            ProductListResponse,
            CreateProductRequest,

            // ===== Categories =====
            CategoryRecord,
            CreateCategoryRequest,

            // ===== Dashboard =====
            SellerStatsResponse,
            RecentOrder,
            RecentOrderItem,
        )
    ),
    // ==================== 경로 등록 ====================
    paths(
        // ===== Health =====
        crate::routes::health::health_check,
        crate::routes::health::health_ready,

        // ===== Auth =====
        crate::routes::auth::signup,
        crate::routes::auth::login,
        crate::routes::auth::refresh,

        // ===== Products =====
        crate::routes::products::list_products,
        crate::routes::products::get_product,
        crate::routes::products::create_product,
        crate::routes::products::my_products,

        // ===== Categories =====
        crate::routes::categories::list_categories,
        crate::routes::categories::create_category,

        // ===== Dashboard =====
        crate::routes::dashboard::seller_stats,
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Bearer 인증 스키마 등록.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

// ==================== Swagger UI 라우터 ====================

/// Swagger UI 라우터 생성.
///
/// 다음 경로에 문서 UI를 마운트합니다:
/// - `/swagger-ui` - Swagger UI 대화형 문서
/// - `/api-docs/openapi.json` - OpenAPI JSON 스펙
pub fn swagger_ui_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .into()
}

// ==================== 테스트 ====================
