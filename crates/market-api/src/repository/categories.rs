//! 카테고리 저장소.
//!
//! 상품 분류(categories)를 관리합니다. 생성은 관리자 전용입니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use utoipa::ToSchema;
use uuid::Uuid;

/// 카테고리 레코드.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRecord {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    /// 상위 카테고리 (최상위면 None)
    pub parent_id: Option<Uuid>,
    /// 트리 깊이 (최상위 0, 하위는 상위 + 1)
    pub level: i32,
    /// 비활성 카테고리는 공개 목록에서 제외
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// 카테고리 생성 입력.
#[derive(Debug, Clone)]
pub struct CreateCategoryInput {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub parent_id: Option<Uuid>,
}

/// 카테고리 저장소.
pub struct CategoryRepository;

impl CategoryRepository {
    /// 공개 카테고리 목록 (활성만, 이름 순).
    pub async fn list_active(pool: &PgPool) -> Result<Vec<CategoryRecord>, sqlx::Error> {
        sqlx::query_as::<_, CategoryRecord>(
            "SELECT * FROM categories WHERE is_active = TRUE ORDER BY name ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// slug로 카테고리 조회.
    pub async fn find_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<CategoryRecord>, sqlx::Error> {
        sqlx::query_as::<_, CategoryRecord>("SELECT * FROM categories WHERE slug = $1")
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// slug 중복 여부 확인.
    pub async fn slug_exists(pool: &PgPool, slug: &str) -> Result<bool, sqlx::Error> {
        let row: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM categories WHERE slug = $1)")
                .bind(slug)
                .fetch_one(pool)
                .await?;
        Ok(row.0)
    }

    /// 카테고리 생성.
    ///
    /// 상위 카테고리가 지정되면 level은 상위 level + 1, 아니면 0입니다.
    /// 새 카테고리는 활성 상태로 생성됩니다.
    pub async fn create(
        pool: &PgPool,
        input: CreateCategoryInput,
    ) -> Result<CategoryRecord, sqlx::Error> {
        let level = match input.parent_id {
            Some(parent_id) => {
                let row: (i32,) =
                    sqlx::query_as("SELECT level FROM categories WHERE id = $1")
                        .bind(parent_id)
                        .fetch_one(pool)
                        .await?;
                row.0 + 1
            }
            None => 0,
        };

        sqlx::query_as::<_, CategoryRecord>(
            r#"
            INSERT INTO categories (
                id, name, slug, description, parent_id, level, is_active, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, TRUE, NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&input.name)
        .bind(&input.slug)
        .bind(&input.description)
        .bind(input.parent_id)
        .bind(level)
        .fetch_one(pool)
        .await
    }
}
