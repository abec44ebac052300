//! 인증 endpoint.
//!
//! 회원가입, 로그인, 토큰 갱신을 제공합니다.
//!
//! 로그인 실패는 이메일 미존재와 비밀번호 불일치를 구분하지 않고
//! 동일한 401 응답을 반환합니다 (계정 존재 여부 노출 방지).

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use market_core::Role;

use crate::auth::{hash_password, validate_password_strength, verify_password, TokenPair};
use crate::error::{ApiErrorResponse, ApiResult};
use crate::repository::users::{CreateUserInput, PublicUser, UserRepository};
use crate::state::AppState;

// ==================== 요청/응답 타입 ====================

/// 회원가입 요청.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    /// 사용자 이름
    #[validate(length(min = 1, message = "Name is required"))]
    pub full_name: String,
    /// 이메일 (로그인 ID)
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// 비밀번호 (8자 이상)
    pub password: String,
    /// 전화번호 (숫자 10자리 이상)
    #[validate(custom(function = validate_phone_number))]
    pub phone_number: String,
    /// 역할 (생략 시 customer)
    pub role: Option<Role>,
    /// 판매자 상호명 (선택)
    pub business_name: Option<String>,
    /// 판매자 사업자 등록번호 (선택)
    pub gst_number: Option<String>,
    /// 판매자 사업장 주소 (선택)
    pub business_address: Option<String>,
}

/// 전화번호 검증.
///
/// 서식 문자를 제외한 숫자가 10자리 이상이어야 합니다.
fn validate_phone_number(phone: &str) -> Result<(), ValidationError> {
    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
    if digits < 10 {
        return Err(ValidationError::new("phone_number")
            .with_message(std::borrow::Cow::Borrowed("Invalid phone number")));
    }
    Ok(())
}

/// 로그인 요청.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// 토큰 갱신 요청.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    /// Refresh Token (필수)
    pub refresh_token: Option<String>,
}

/// 회원가입/로그인 응답.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub user: PublicUser,
    pub tokens: TokenPair,
}

/// 토큰 갱신 응답.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    /// 새로 발급된 Access Token
    pub access_token: String,
    /// Access Token 만료 시간 (초)
    pub expires_in: i64,
    /// 토큰 타입 (항상 "Bearer")
    pub token_type: String,
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

fn validation_error(message: impl Into<String>) -> (StatusCode, Json<ApiErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiErrorResponse::new("VALIDATION_ERROR", message)),
    )
}

/// 회원가입.
///
/// POST /api/auth/signup
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "가입 성공", body = AuthResponse),
        (status = 400, description = "검증 실패 또는 이메일 중복", body = ApiErrorResponse),
        (status = 503, description = "DB 미연결", body = ApiErrorResponse)
    ),
    tag = "auth"
)]
pub async fn signup(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SignupRequest>,
) -> ApiResult<impl IntoResponse> {
    request
        .validate()
        .map_err(|e| validation_error(e.to_string()))?;
    validate_password_strength(&request.password).map_err(validation_error)?;

    let pool = require_db(&state)?;

    // 이메일 중복 확인
    let exists = UserRepository::email_exists(pool, &request.email)
        .await
        .map_err(crate::error::db_error)?;
    if exists {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiErrorResponse::new(
                "EMAIL_TAKEN",
                "Email already registered",
            )),
        ));
    }

    let password_hash = hash_password(&request.password).map_err(|e| {
        tracing::error!(error = %e, "비밀번호 해싱 실패");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiErrorResponse::new(
                "INTERNAL_ERROR",
                "Internal server error",
            )),
        )
    })?;

    let user = UserRepository::create(
        pool,
        CreateUserInput {
            full_name: request.full_name,
            email: request.email,
            password_hash,
            phone_number: Some(request.phone_number),
            role: request.role.unwrap_or_default(),
            business_name: request.business_name,
            gst_number: request.gst_number,
            business_address: request.business_address,
        },
    )
    .await
    .map_err(crate::error::db_error)?;

    let tokens = state.tokens.issue_pair(user.id).map_err(|e| {
        tracing::error!(error = %e, "토큰 발급 실패");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiErrorResponse::new(
                "INTERNAL_ERROR",
                "Internal server error",
            )),
        )
    })?;

    info!(user_id = %user.id, role = %user.role, "신규 가입 완료");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user: user.into_public(),
            tokens,
        }),
    ))
}

/// 로그인.
///
/// POST /api/auth/login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "로그인 성공", body = AuthResponse),
        (status = 401, description = "자격증명 불일치", body = ApiErrorResponse),
        (status = 503, description = "DB 미연결", body = ApiErrorResponse)
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    let pool = require_db(&state)?;

    // 미존재 계정과 비밀번호 불일치에 동일한 응답 사용
    let invalid_credentials = || {
        (
            StatusCode::UNAUTHORIZED,
            Json(ApiErrorResponse::new(
                "INVALID_CREDENTIALS",
                "Invalid email or password",
            )),
        )
    };

    let user = UserRepository::find_by_email(pool, &request.email)
        .await
        .map_err(crate::error::db_error)?
        .ok_or_else(invalid_credentials)?;

    if verify_password(&request.password, &user.password_hash).is_err() {
        warn!(email = %request.email, "로그인 실패");
        return Err(invalid_credentials());
    }

    let tokens = state.tokens.issue_pair(user.id).map_err(|e| {
        tracing::error!(error = %e, "토큰 발급 실패");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiErrorResponse::new(
                "INTERNAL_ERROR",
                "Internal server error",
            )),
        )
    })?;

    info!(user_id = %user.id, "로그인 성공");

    Ok((
        StatusCode::OK,
        Json(AuthResponse {
            user: user.into_public(),
            tokens,
        }),
    ))
}

/// Access Token 갱신.
///
/// Refresh Token을 검증하고 새 Access Token만 발급합니다.
/// Refresh Token은 로테이션하지 않습니다.
///
/// POST /api/auth/refresh
#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "갱신 성공", body = RefreshResponse),
        (status = 400, description = "Refresh Token 누락", body = ApiErrorResponse),
        (status = 401, description = "유효하지 않은 Refresh Token", body = ApiErrorResponse)
    ),
    tag = "auth"
)]
pub async fn refresh(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RefreshRequest>,
) -> ApiResult<impl IntoResponse> {
    let token = request
        .refresh_token
        .as_deref()
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            (
                StatusCode::BAD_REQUEST,
                Json(ApiErrorResponse::new(
                    "MISSING_REFRESH_TOKEN",
                    "Refresh token is required",
                )),
            )
        })?;

    let invalid_token = || {
        (
            StatusCode::UNAUTHORIZED,
            Json(ApiErrorResponse::new(
                "INVALID_REFRESH_TOKEN",
                "Invalid refresh token",
            )),
        )
    };

    let user_id = state
        .tokens
        .verify_refresh(token)
        .map_err(|_| invalid_token())?;

    // 토큰 발급 이후 계정이 삭제되었을 수 있음
    let pool = require_db(&state)?;
    UserRepository::find_public_by_id(pool, user_id)
        .await
        .map_err(crate::error::db_error)?
        .ok_or_else(invalid_token)?;

    let access_token = state.tokens.issue_access(user_id).map_err(|e| {
        tracing::error!(error = %e, "토큰 발급 실패");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiErrorResponse::new(
                "INTERNAL_ERROR",
                "Internal server error",
            )),
        )
    })?;

    Ok((
        StatusCode::OK,
        Json(RefreshResponse {
            access_token,
            expires_in: state.tokens.access_expires_in(),
            token_type: "Bearer".to_string(),
        }),
    ))
}

/// 인증 라우터 생성.
pub fn auth_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/refresh", post(refresh))
}
