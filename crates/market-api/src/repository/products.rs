//! 상품 저장소.
//!
//! 판매자가 등록한 상품(products)을 관리합니다.
//! 공개 목록에는 `active` 상태 상품만 노출됩니다.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::{FromRow, PgPool};
use utoipa::ToSchema;
use uuid::Uuid;

use market_core::ProductStatus;

/// 공개 목록 페이지 크기.
pub const PAGE_SIZE: i64 = 12;

// =====================================================
// 타입
// =====================================================

/// 상품 레코드.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub id: Uuid,
    pub seller_id: Uuid,
    pub category_id: Option<Uuid>,
    pub name: String,
    pub slug: String,
    pub description: String,
    /// 정가
    #[schema(value_type = String)]
    pub regular_price: Decimal,
    /// 할인가 (없으면 정가로 판매)
    #[schema(value_type = Option<String>)]
    pub sale_price: Option<Decimal>,
    /// 재고 관리 코드
    pub sku: Option<String>,
    pub stock: i32,
    /// 이미지 URL 배열 (JSONB)
    #[schema(value_type = Vec<String>)]
    pub images: Option<Value>,
    pub status: ProductStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProductRecord {
    /// 실제 판매 가격 (할인가가 있으면 할인가).
    pub fn effective_price(&self) -> Decimal {
        self.sale_price.unwrap_or(self.regular_price)
    }
}

/// 상품 상세 (판매자/카테고리 표시 정보 포함).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    pub id: Uuid,
    pub seller_id: Uuid,
    pub seller_name: String,
    pub category_id: Option<Uuid>,
    pub category_name: Option<String>,
    pub category_slug: Option<String>,
    pub name: String,
    pub slug: String,
    pub description: String,
    #[schema(value_type = String)]
    pub regular_price: Decimal,
    #[schema(value_type = Option<String>)]
    pub sale_price: Option<Decimal>,
    pub sku: Option<String>,
    pub stock: i32,
    #[schema(value_type = Vec<String>)]
    pub images: Option<Value>,
    pub status: ProductStatus,
    pub created_at: DateTime<Utc>,
}

/// 상품 생성 입력.
#[derive(Debug, Clone)]
pub struct CreateProductInput {
    pub seller_id: Uuid,
    pub category_id: Option<Uuid>,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub regular_price: Decimal,
    pub sale_price: Option<Decimal>,
    pub sku: Option<String>,
    pub stock: i32,
    pub images: Option<Value>,
    pub status: ProductStatus,
}

/// 공개 목록 조회 필터.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// 상품명 키워드 (부분 일치, 대소문자 무시)
    pub keyword: Option<String>,
    /// 카테고리 slug
    pub category_slug: Option<String>,
    /// 1부터 시작하는 페이지 번호
    pub page: i64,
}

// =====================================================
// ProductRepository
// =====================================================

/// 상품 저장소.
pub struct ProductRepository;

impl ProductRepository {
    /// 상품 생성.
    pub async fn create(
        pool: &PgPool,
        input: CreateProductInput,
    ) -> Result<ProductRecord, sqlx::Error> {
        sqlx::query_as::<_, ProductRecord>(
            r#"
            INSERT INTO products (
                id, seller_id, category_id, name, slug, description,
                regular_price, sale_price, sku, stock, images, status,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(input.seller_id)
        .bind(input.category_id)
        .bind(&input.name)
        .bind(&input.slug)
        .bind(&input.description)
        .bind(input.regular_price)
        .bind(input.sale_price)
        .bind(&input.sku)
        .bind(input.stock)
        .bind(&input.images)
        .bind(input.status)
        .fetch_one(pool)
        .await
    }

    /// slug 중복 여부 확인.
    pub async fn slug_exists(pool: &PgPool, slug: &str) -> Result<bool, sqlx::Error> {
        let row: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM products WHERE slug = $1)")
                .bind(slug)
                .fetch_one(pool)
                .await?;
        Ok(row.0)
    }

    /// 공개 상품 목록 조회 (active 상태만).
    ///
    /// 키워드는 상품명 부분 일치(ILIKE), 카테고리는 slug로 필터링합니다.
    /// 결과는 최신 등록 순이며 `(목록, 전체 건수)`를 반환합니다.
    pub async fn list_active(
        pool: &PgPool,
        filter: &ProductFilter,
    ) -> Result<(Vec<ProductRecord>, i64), sqlx::Error> {
        let page = filter.page.max(1);
        let keyword = filter
            .keyword
            .as_ref()
            .map(|k| format!("%{}%", k));

        let total: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*)
            FROM products p
            LEFT JOIN categories c ON c.id = p.category_id
            WHERE p.status = 'active'
              AND ($1::TEXT IS NULL OR p.name ILIKE $1)
              AND ($2::TEXT IS NULL OR c.slug = $2)
            "#,
        )
        .bind(&keyword)
        .bind(&filter.category_slug)
        .fetch_one(pool)
        .await?;

        let products = sqlx::query_as::<_, ProductRecord>(
            r#"
            SELECT p.*
            FROM products p
            LEFT JOIN categories c ON c.id = p.category_id
            WHERE p.status = 'active'
              AND ($1::TEXT IS NULL OR p.name ILIKE $1)
              AND ($2::TEXT IS NULL OR c.slug = $2)
            ORDER BY p.created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(&keyword)
        .bind(&filter.category_slug)
        .bind(PAGE_SIZE)
        .bind((page - 1) * PAGE_SIZE)
        .fetch_all(pool)
        .await?;

        Ok((products, total.0))
    }

    /// slug로 상품 상세 조회 (판매자/카테고리 표시 정보 포함).
    pub async fn find_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<ProductDetail>, sqlx::Error> {
        sqlx::query_as::<_, ProductDetail>(
            r#"
            SELECT
                p.id, p.seller_id, u.full_name AS seller_name,
                p.category_id, c.name AS category_name, c.slug AS category_slug,
                p.name, p.slug, p.description,
                p.regular_price, p.sale_price, p.sku, p.stock,
                p.images, p.status, p.created_at
            FROM products p
            JOIN users u ON u.id = p.seller_id
            LEFT JOIN categories c ON c.id = p.category_id
            WHERE p.slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(pool)
        .await
    }

    /// 판매자 본인의 상품 목록 (상태 무관, 최신 순).
    pub async fn list_by_seller(
        pool: &PgPool,
        seller_id: Uuid,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        sqlx::query_as::<_, ProductRecord>(
            "SELECT * FROM products WHERE seller_id = $1 ORDER BY created_at DESC",
        )
        .bind(seller_id)
        .fetch_all(pool)
        .await
    }

    /// 판매자의 전체 상품 수.
    pub async fn count_by_seller(pool: &PgPool, seller_id: Uuid) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products WHERE seller_id = $1")
            .bind(seller_id)
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// 판매자의 active 상태 상품 수.
    pub async fn count_active_by_seller(
        pool: &PgPool,
        seller_id: Uuid,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM products WHERE seller_id = $1 AND status = 'active'",
        )
        .bind(seller_id)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }
}

/// 상품명에서 URL slug 생성.
///
/// 영숫자 이외는 하이픈으로 바꾸고 소문자로 정규화한 뒤,
/// 중복을 피하기 위해 짧은 무작위 접미사를 붙입니다.
pub fn slugify(name: &str) -> String {
    let base: String = name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();

    let base = base
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-");

    let suffix = &Uuid::new_v4().simple().to_string()[..6];
    if base.is_empty() {
        format!("product-{}", suffix)
    } else {
        format!("{}-{}", base, suffix)
    }
}
