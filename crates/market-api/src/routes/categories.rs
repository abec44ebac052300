//! 카테고리 endpoint.
//!
//! 공개 카테고리 목록과 관리자 전용 카테고리 생성을 제공합니다.

use axum::{
    extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;
use utoipa::ToSchema;

use crate::auth::AdminUser;
use crate::error::{db_error, ApiErrorResponse, ApiResult};
use crate::repository::categories::{CategoryRepository, CreateCategoryInput};
use crate::state::AppState;

/// 카테고리 생성 요청.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    /// 상위 카테고리 ID (선택)
    pub parent_id: Option<uuid::Uuid>,
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

/// 카테고리 목록 조회 (활성만).
///
/// GET /api/categories
#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "목록 조회 성공"),
        (status = 503, description = "DB 미연결", body = ApiErrorResponse)
    ),
    tag = "categories"
)]
pub async fn list_categories(State(state): State<Arc<AppState>>) -> ApiResult<impl IntoResponse> {
    let pool = require_db(&state)?;

    let categories = CategoryRepository::list_active(pool)
        .await
        .map_err(db_error)?;

    Ok(Json(categories))
}

/// 카테고리 생성 (관리자 전용).
///
/// POST /api/categories
#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "생성 성공"),
        (status = 400, description = "검증 실패 또는 slug 중복", body = ApiErrorResponse),
        (status = 401, description = "인증 실패"),
        (status = 403, description = "관리자 권한 필요")
    ),
    security(("bearer_auth" = [])),
    tag = "categories"
)]
pub async fn create_category(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    Json(request): Json<CreateCategoryRequest>,
) -> ApiResult<impl IntoResponse> {
    if request.name.trim().is_empty() || request.slug.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiErrorResponse::new(
                "VALIDATION_ERROR",
                "Name and slug are required",
            )),
        ));
    }

    let pool = require_db(&state)?;

    let exists = CategoryRepository::slug_exists(pool, &request.slug)
        .await
        .map_err(db_error)?;
    if exists {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiErrorResponse::new(
                "SLUG_TAKEN",
                "Category slug already exists",
            )),
        ));
    }

    let category = CategoryRepository::create(
        pool,
        CreateCategoryInput {
            name: request.name,
            slug: request.slug,
            description: request.description,
            parent_id: request.parent_id,
        },
    )
    .await
    .map_err(|e| match e {
        // 상위 카테고리 level 조회 실패는 잘못된 parent_id
        sqlx::Error::RowNotFound => (
            StatusCode::BAD_REQUEST,
            Json(ApiErrorResponse::new(
                "PARENT_NOT_FOUND",
                "Parent category does not exist",
            )),
        ),
        other => db_error(other),
    })?;

    info!(category_id = %category.id, admin_id = %admin.id, "카테고리 생성 완료");

    Ok((StatusCode::CREATED, Json(category)))
}

/// 카테고리 라우터 생성.
pub fn categories_router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(list_categories).post(create_category))
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
            .nest("/api/categories", categories_router())
            .with_state(Arc::new(create_test_state()))
    }

    #[tokio::test]
    async fn test_list_without_db_returns_503() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/api/categories")
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
                    .uri("/api/categories")
                    .header("content-type", "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
