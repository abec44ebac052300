//! 상품 endpoint.
//!
//! 공개 상품 목록/상세 조회와 판매자 전용 등록/내 상품 조회를 제공합니다.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use market_core::ProductStatus;

use crate::auth::SellerUser;
use crate::error::{db_error, ApiErrorResponse, ApiResult};
use crate::repository::products::{
    slugify, CreateProductInput, ProductFilter, ProductRecord, ProductRepository, PAGE_SIZE,
};
use crate::state::AppState;

// ==================== 요청/응답 타입 ====================

/// 공개 상품 목록 쿼리.
#[derive(Debug, Deserialize, IntoParams)]
pub struct ProductListQuery {
    /// 상품명 키워드 (부분 일치)
    pub keyword: Option<String>,
    /// 카테고리 slug
    pub category: Option<String>,
    /// 페이지 번호 (1부터, 기본 1)
    pub page: Option<i64>,
}

/// 공개 상품 목록 응답.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductListResponse {
    pub products: Vec<ProductRecord>,
    pub page: i64,
    pub total_pages: i64,
    pub total: i64,
}

/// 상품 등록 요청.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: String,
    pub description: String,
    /// 정가
    #[schema(value_type = String)]
    pub regular_price: Decimal,
    /// 할인가 (정가 이하, 선택)
    #[schema(value_type = Option<String>)]
    pub sale_price: Option<Decimal>,
    /// 재고 관리 코드 (선택)
    pub sku: Option<String>,
    pub stock: i32,
    pub category_id: Option<Uuid>,
    pub images: Option<Value>,
}

// ==================== 핸들러 ====================

fn require_db(state: &AppState) -> ApiResult<&sqlx::PgPool> {
    state.db_pool.as_ref().ok_or_else(|| {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ApiErrorResponse::new(
                "DB_UNAVAILABLE",
                "Service temporarily unavailable",
            )),
        )
    })
}

/// 공개 상품 목록 조회 (active 상태만).
///
/// GET /api/products
#[utoipa::path(
    get,
    path = "/api/products",
    params(ProductListQuery),
    responses(
        (status = 200, description = "목록 조회 성공", body = ProductListResponse),
        (status = 503, description = "DB 미연결", body = ApiErrorResponse)
    ),
    tag = "products"
)]
pub async fn list_products(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ProductListQuery>,
) -> ApiResult<impl IntoResponse> {
    let pool = require_db(&state)?;

    let filter = ProductFilter {
        keyword: query.keyword.filter(|k| !k.is_empty()),
        category_slug: query.category.filter(|c| !c.is_empty()),
        page: query.page.unwrap_or(1).max(1),
    };

    let (products, total) = ProductRepository::list_active(pool, &filter)
        .await
        .map_err(db_error)?;

    let total_pages = (total + PAGE_SIZE - 1) / PAGE_SIZE;

    Ok(Json(ProductListResponse {
        products,
        page: filter.page,
        total_pages,
        total,
    }))
}

/// slug로 상품 상세 조회.
///
/// GET /api/products/{slug}
#[utoipa::path(
    get,
    path = "/api/products/{slug}",
    params(("slug" = String, Path, description = "상품 slug")),
    responses(
        (status = 200, description = "상세 조회 성공"),
        (status = 404, description = "상품 없음", body = ApiErrorResponse)
    ),
    tag = "products"
)]
pub async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let pool = require_db(&state)?;

    let product = ProductRepository::find_by_slug(pool, &slug)
        .await
        .map_err(db_error)?
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                Json(ApiErrorResponse::new("NOT_FOUND", "Product not found")),
            )
        })?;

    Ok(Json(product))
}

/// 상품 등록 (판매자 전용).
///
/// 등록된 상품은 즉시 `active` 상태로 공개됩니다.
///
/// POST /api/products
#[utoipa::path(
    post,
    path = "/api/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "등록 성공"),
        (status = 400, description = "검증 실패", body = ApiErrorResponse),
        (status = 401, description = "인증 실패"),
        (status = 403, description = "판매자 권한 필요")
    ),
    security(("bearer_auth" = [])),
    tag = "products"
)]
pub async fn create_product(
    State(state): State<Arc<AppState>>,
    SellerUser(seller): SellerUser,
    Json(request): Json<CreateProductRequest>,
) -> ApiResult<impl IntoResponse> {
    if request.name.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiErrorResponse::new(
                "VALIDATION_ERROR",
                "Product name is required",
            )),
        ));
    }
    if request.regular_price < Decimal::ZERO || request.stock < 0 {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiErrorResponse::new(
                "VALIDATION_ERROR",
                "Price and stock must be non-negative",
            )),
        ));
    }
    if let Some(sale_price) = request.sale_price {
        // 할인가는 정가를 넘을 수 없음
        if sale_price < Decimal::ZERO || sale_price > request.regular_price {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ApiErrorResponse::new(
                    "VALIDATION_ERROR",
                    "Sale price must be between zero and the regular price",
                )),
            ));
        }
    }

    let pool = require_db(&state)?;

    let product = ProductRepository::create(
        pool,
        CreateProductInput {
            seller_id: seller.id,
            category_id: request.category_id,
            slug: slugify(&request.name),
            name: request.name,
            description: request.description,
            regular_price: request.regular_price,
            sale_price: request.sale_price,
            sku: request.sku,
            stock: request.stock,
            images: request.images,
            status: ProductStatus::Active,
        },
    )
    .await
    .map_err(db_error)?;

    info!(product_id = %product.id, seller_id = %seller.id, "상품 등록 완료");

    Ok((StatusCode::CREATED, Json(product)))
}

/// 판매자 본인 상품 목록 (상태 무관).
///
/// GET /api/products/seller/my-products
#[utoipa::path(
    get,
    path = "/api/products/seller/my-products",
    responses(
        (status = 200, description = "목록 조회 성공"),
        (status = 401, description = "인증 실패"),
        (status = 403, description = "판매자 권한 필요")
    ),
    security(("bearer_auth" = [])),
    tag = "products"
)]
pub async fn my_products(
    State(state): State<Arc<AppState>>,
    SellerUser(seller): SellerUser,
) -> ApiResult<impl IntoResponse> {
    let pool = require_db(&state)?;

    let products = ProductRepository::list_by_seller(pool, seller.id)
        .await
        .map_err(db_error)?;

    Ok(Json(products))
}

/// 상품 라우터 생성.
pub fn products_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/seller/my-products", get(my_products))
        .route("/{slug}", get(get_product))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::create_test_state;
    use axum::{
        body::Body,
        http::{Method, Request},
    };
    use tower::ServiceExt;

    fn test_app() -> Router {
        Router::new()
            .nest("/api/products", products_router())
            .with_state(Arc::new(create_test_state()))
    }

    #[tokio::test]
    async fn test_list_without_db_returns_503() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/api/products")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_create_without_token_returns_401() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/products")
                    .header("content-type", "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_my_products_without_token_returns_401() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/api/products/seller/my-products")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_create_request_carries_pricing_fields() {
        use rust_decimal_macros::dec;

        let request: CreateProductRequest = serde_json::from_value(serde_json::json!({
            "name": "Wireless Keyboard",
            "description": "Compact layout",
            "regularPrice": "50000",
            "salePrice": "39900",
            "sku": "KB-001",
            "stock": 10
        }))
        .unwrap();

        assert_eq!(request.regular_price, dec!(50000));
        assert_eq!(request.sale_price, Some(dec!(39900)));
        assert_eq!(request.sku.as_deref(), Some("KB-001"));
    }

    #[test]
    fn test_total_pages_rounding() {
        // 13건이면 12건 페이지 기준 2페이지
        let total: i64 = 13;
        assert_eq!((total + PAGE_SIZE - 1) / PAGE_SIZE, 2);
        let total: i64 = 12;
        assert_eq!((total + PAGE_SIZE - 1) / PAGE_SIZE, 1);
        let total: i64 = 0;
        assert_eq!((total + PAGE_SIZE - 1) / PAGE_SIZE, 0);
    }
}
