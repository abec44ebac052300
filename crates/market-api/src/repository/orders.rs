//! 주문 저장소.
//!
//! 판매자 대시보드 집계에 필요한 주문(orders) 및 주문 항목(order_items)
//! 조회를 제공합니다. 주문 생성/결제 플로우는 이 서비스 범위 밖입니다.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use utoipa::ToSchema;
use uuid::Uuid;

use market_core::domain::stats::SellerOrderItem;

/// 대시보드 최근 주문 표시 개수.
pub const RECENT_ORDERS_LIMIT: i64 = 5;

/// 최근 주문 헤더 조회 쿼리.
///
/// created_at이 같은 주문끼리는 id로 정렬을 고정합니다.
const RECENT_ORDERS_SQL: &str = r#"
    SELECT o.id, u.full_name AS user_name, u.email AS user_email,
           o.total_amount, o.status, o.created_at
    FROM orders o
    JOIN users u ON u.id = o.user_id
    WHERE o.id IN (
        SELECT DISTINCT order_id FROM order_items WHERE seller_id = $1
    )
    ORDER BY o.created_at DESC, o.id DESC
    LIMIT $2
"#;

// =====================================================
// 타입
// =====================================================

/// 최근 주문 요약 (구매자 표시 정보 포함).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecentOrder {
    pub id: Uuid,
    /// 구매자 이름
    pub user_name: String,
    /// 구매자 이메일
    pub user_email: String,
    #[schema(value_type = String)]
    pub total_amount: Decimal,
    pub status: String,
    pub created_at: DateTime<Utc>,
    /// 주문에 포함된 전체 항목 (다른 판매자 상품 포함)
    pub items: Vec<RecentOrderItem>,
}

/// 최근 주문의 개별 항목.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecentOrderItem {
    #[serde(skip)]
    pub order_id: Uuid,
    pub product_id: Option<Uuid>,
    pub seller_id: Uuid,
    pub name: String,
    #[schema(value_type = String)]
    pub unit_price: Decimal,
    pub quantity: i32,
}

/// 주문 헤더 행 (items 조인 전).
#[derive(Debug, Clone, FromRow)]
struct RecentOrderRow {
    id: Uuid,
    user_name: String,
    user_email: String,
    total_amount: Decimal,
    status: String,
    created_at: DateTime<Utc>,
}

// =====================================================
// OrderRepository
// =====================================================

/// 주문 저장소.
pub struct OrderRepository;

impl OrderRepository {
    /// 특정 판매자의 주문 항목 전체 조회 (매출 집계용).
    pub async fn seller_line_items(
        pool: &PgPool,
        seller_id: Uuid,
    ) -> Result<Vec<SellerOrderItem>, sqlx::Error> {
        sqlx::query_as::<_, SellerOrderItem>(
            r#"
            SELECT order_id, seller_id, unit_price, quantity
            FROM order_items
            WHERE seller_id = $1
            "#,
        )
        .bind(seller_id)
        .fetch_all(pool)
        .await
    }

    /// 판매자 상품이 포함된 최근 주문 조회 (최신 순, 최대 5건).
    ///
    /// 주문 헤더와 구매자 표시 정보를 먼저 조회한 뒤, 해당 주문들의
    /// 항목을 한 번에 로드합니다. 항목은 판매자별로 필터링하지 않고
    /// 주문 전체를 그대로 반환합니다.
    pub async fn recent_orders_for_seller(
        pool: &PgPool,
        seller_id: Uuid,
    ) -> Result<Vec<RecentOrder>, sqlx::Error> {
        let rows = sqlx::query_as::<_, RecentOrderRow>(RECENT_ORDERS_SQL)
            .bind(seller_id)
            .bind(RECENT_ORDERS_LIMIT)
            .fetch_all(pool)
            .await?;

        let order_ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();

        let items = sqlx::query_as::<_, RecentOrderItem>(
            r#"
            SELECT order_id, product_id, seller_id, name, unit_price, quantity
            FROM order_items
            WHERE order_id = ANY($1)
            "#,
        )
        .bind(&order_ids)
        .fetch_all(pool)
        .await?;

        let orders = rows
            .into_iter()
            .map(|row| {
                let order_items = items
                    .iter()
                    .filter(|i| i.order_id == row.id)
                    .cloned()
                    .collect();
                RecentOrder {
                    id: row.id,
                    user_name: row.user_name,
                    user_email: row.user_email,
                    total_amount: row.total_amount,
                    status: row.status,
                    created_at: row.created_at,
                    items: order_items,
                }
            })
            .collect();

        Ok(orders)
    }
}
