//! 판매자 대시보드 endpoint.
//!
//! 판매자의 매출 합계, 주문 수, 상품 수, 최근 주문을 한 번에 반환합니다.
//! 집계는 스냅샷 기준이며 트랜잭션으로 묶지 않습니다.

use axum::{
    extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;
use utoipa::ToSchema;

use market_core::domain::stats::summarize_seller_orders;

use crate::auth::SellerUser;
use crate::error::{db_error, ApiErrorResponse, ApiResult};
use crate::repository::orders::{OrderRepository, RecentOrder};
use crate::repository::products::ProductRepository;
use crate::state::AppState;

/// 판매자 대시보드 통계 응답.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SellerStatsResponse {
    /// 총 매출 (이 판매자의 라인 아이템만 합산)
    #[schema(value_type = String)]
    pub total_sales: Decimal,
    /// 이 판매자의 상품이 포함된 주문 수
    pub total_orders: i64,
    /// active 상태 상품 수
    pub active_products: i64,
    /// 전체 상품 수
    pub total_products: i64,
    /// 최근 주문 5건 (최신 순)
    pub recent_orders: Vec<RecentOrder>,
}

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

/// 판매자 대시보드 통계 조회.
///
/// 주문/상품이 전혀 없는 판매자는 에러가 아닌 0 집계를 받습니다.
///
/// GET /api/dashboard/seller-stats
#[utoipa::path(
    get,
    path = "/api/dashboard/seller-stats",
    responses(
        (status = 200, description = "통계 조회 성공", body = SellerStatsResponse),
        (status = 401, description = "인증 실패"),
        (status = 403, description = "판매자 권한 필요"),
        (status = 503, description = "DB 미연결", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "dashboard"
)]
pub async fn seller_stats(
    State(state): State<Arc<AppState>>,
    SellerUser(seller): SellerUser,
) -> ApiResult<impl IntoResponse> {
    let pool = require_db(&state)?;

    debug!(seller_id = %seller.id, "대시보드 집계 시작");

    let (line_items, total_products, active_products, recent_orders) = tokio::join!(
        OrderRepository::seller_line_items(pool, seller.id),
        ProductRepository::count_by_seller(pool, seller.id),
        ProductRepository::count_active_by_seller(pool, seller.id),
        OrderRepository::recent_orders_for_seller(pool, seller.id),
    );

    let line_items = line_items.map_err(db_error)?;
    let summary = summarize_seller_orders(&line_items, seller.id);

    Ok(Json(SellerStatsResponse {
        total_sales: summary.total_sales,
        total_orders: summary.total_orders,
        active_products: active_products.map_err(db_error)?,
        total_products: total_products.map_err(db_error)?,
        recent_orders: recent_orders.map_err(db_error)?,
    }))
}

/// 대시보드 라우터 생성.
pub fn dashboard_router() -> Router<Arc<AppState>> {
    Router::new().route("/seller-stats", get(seller_stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::create_test_state;
    use axum::{
        body::Body,
        http::{header, Request},
    };
    use tower::ServiceExt;

    fn test_app() -> Router {
        Router::new()
            .nest("/api/dashboard", dashboard_router())
            .with_state(Arc::new(create_test_state()))
    }

    #[tokio::test]
    async fn test_seller_stats_without_token_returns_401() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/api/dashboard/seller-stats")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_seller_stats_garbage_token_returns_401() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/api/dashboard/seller-stats")
                    .header(header::AUTHORIZATION, "Bearer not.a.token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_seller_stats_valid_token_without_db_returns_503() {
        // 서명은 유효하지만 사용자 조회 단계에서 DB가 없음
        let state = Arc::new(create_test_state());
        let token = state.tokens.issue_access(uuid::Uuid::new_v4()).unwrap();

        let app = Router::new()
            .nest("/api/dashboard", dashboard_router())
            .with_state(state);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/dashboard/seller-stats")
                    .header(header::AUTHORIZATION, format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
