//! Axum용 접근 제어 추출기.
//!
//! 요청의 Bearer 토큰을 검증하고 사용자를 로드하는 인증 게이트입니다.
//! 단계: 토큰 추출 → 서명/만료 검증 → 사용자 조회(비밀번호 해시 제외)
//! → (역할 게이트 라우트의 경우) 역할 확인.
//!
//! 인증 실패는 원인을 구분하지 않고 모두 401로 수렴합니다.
//! 역할 부족만 403으로 구분됩니다.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;

use market_core::Role;

use crate::auth::jwt::JwtError;
use crate::repository::users::{PublicUser, UserRepository};
use crate::state::AppState;

/// 인증 에러.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("인증 토큰이 필요합니다")]
    MissingToken,
    #[error("잘못된 Authorization 헤더 형식")]
    InvalidAuthHeader,
    #[error("토큰이 만료되었습니다")]
    TokenExpired,
    #[error("유효하지 않은 토큰")]
    InvalidToken,
    #[error("토큰에 해당하는 사용자가 없습니다")]
    UserNotFound,
    #[error("권한이 부족합니다")]
    InsufficientRole,
    #[error("데이터베이스를 사용할 수 없습니다")]
    DatabaseUnavailable,
    #[error("사용자 조회 실패")]
    Database,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        // 클라이언트에는 일반화된 메시지만 노출
        let (status, code, message) = match &self {
            AuthError::MissingToken => (
                StatusCode::UNAUTHORIZED,
                "MISSING_TOKEN",
                "Not authorized, no token",
            ),
            AuthError::InvalidAuthHeader => (
                StatusCode::UNAUTHORIZED,
                "INVALID_AUTH_HEADER",
                "Not authorized, no token",
            ),
            AuthError::TokenExpired => (
                StatusCode::UNAUTHORIZED,
                "TOKEN_EXPIRED",
                "Not authorized, token failed",
            ),
            AuthError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "INVALID_TOKEN",
                "Not authorized, token failed",
            ),
            AuthError::UserNotFound => (
                StatusCode::UNAUTHORIZED,
                "USER_NOT_FOUND",
                "Not authorized, token failed",
            ),
            AuthError::InsufficientRole => (
                StatusCode::FORBIDDEN,
                "INSUFFICIENT_ROLE",
                "Not authorized for this resource",
            ),
            AuthError::DatabaseUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "DB_UNAVAILABLE",
                "Service temporarily unavailable",
            ),
            AuthError::Database => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "DB_ERROR",
                "Internal server error",
            ),
        };

        let body = Json(json!({
            "success": false,
            "error": { "code": code, "message": message }
        }));

        (status, body).into_response()
    }
}

impl From<JwtError> for AuthError {
    fn from(e: JwtError) -> Self {
        match e {
            JwtError::TokenExpired => AuthError::TokenExpired,
            _ => AuthError::InvalidToken,
        }
    }
}

/// Authorization 헤더에서 Bearer 토큰 추출.
pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, AuthError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AuthError::MissingToken)?;

    auth_header
        .strip_prefix("Bearer ")
        .filter(|t| !t.is_empty())
        .ok_or(AuthError::InvalidAuthHeader)
}

/// 역할 요구사항 확인.
///
/// Admin은 모든 요구사항을 충족합니다.
pub fn require_role(required: Role, role: Role) -> Result<(), AuthError> {
    if role.satisfies(required) {
        Ok(())
    } else {
        Err(AuthError::InsufficientRole)
    }
}

/// 인증된 사용자 추출기.
///
/// 토큰을 검증하고 사용자를 DB에서 로드합니다 (비밀번호 해시 제외).
/// 역할 확인은 하지 않습니다.
///
/// # 사용 예시
///
/// ```rust,ignore
/// async fn me_handler(AuthUser(user): AuthUser) -> impl IntoResponse {
///     Json(user)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser(pub PublicUser);

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        // 1. 토큰 추출
        let token = extract_bearer(&parts.headers)?;

        // 2. 서명/만료 검증
        let user_id = state.tokens.verify_access(token)?;

        // 3. 사용자 조회 (토큰 발급 이후 계정이 사라졌을 수 있음)
        let pool = state.db_pool.as_ref().ok_or(AuthError::DatabaseUnavailable)?;
        let user = UserRepository::find_public_by_id(pool, user_id)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "사용자 조회 실패");
                AuthError::Database
            })?
            .ok_or(AuthError::UserNotFound)?;

        Ok(AuthUser(user))
    }
}

/// Seller 이상 권한을 요구하는 추출기.
///
/// `seller` 또는 `admin` 역할만 통과합니다.
#[derive(Debug, Clone)]
pub struct SellerUser(pub PublicUser);

impl FromRequestParts<Arc<AppState>> for SellerUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(user) = AuthUser::from_request_parts(parts, state).await?;
        require_role(Role::Seller, user.role)?;
        Ok(SellerUser(user))
    }
}

/// Admin 권한을 요구하는 추출기.
#[derive(Debug, Clone)]
pub struct AdminUser(pub PublicUser);

impl FromRequestParts<Arc<AppState>> for AdminUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(user) = AuthUser::from_request_parts(parts, state).await?;
        require_role(Role::Admin, user.role)?;
        Ok(AdminUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_require_role_matrix() {
        // customer는 seller 전용 라우트에서 거부
        assert!(require_role(Role::Seller, Role::Customer).is_err());
        // seller는 통과
        assert!(require_role(Role::Seller, Role::Seller).is_ok());
        // admin은 모든 역할 게이트 통과
        assert!(require_role(Role::Seller, Role::Admin).is_ok());
        assert!(require_role(Role::Customer, Role::Admin).is_ok());
        assert!(require_role(Role::Admin, Role::Admin).is_ok());
        // admin 전용 라우트는 seller 거부
        assert!(require_role(Role::Admin, Role::Seller).is_err());
    }

    #[test]
    fn test_extract_bearer() {
        let mut headers = HeaderMap::new();
        assert!(matches!(
            extract_bearer(&headers),
            Err(AuthError::MissingToken)
        ));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Token abc"));
        assert!(matches!(
            extract_bearer(&headers),
            Err(AuthError::InvalidAuthHeader)
        ));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert!(matches!(
            extract_bearer(&headers),
            Err(AuthError::InvalidAuthHeader)
        ));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(extract_bearer(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_auth_error_status_codes() {
        let unauthorized = [
            AuthError::MissingToken,
            AuthError::InvalidAuthHeader,
            AuthError::TokenExpired,
            AuthError::InvalidToken,
            AuthError::UserNotFound,
        ];
        for error in unauthorized {
            assert_eq!(error.into_response().status(), StatusCode::UNAUTHORIZED);
        }

        assert_eq!(
            AuthError::InsufficientRole.into_response().status(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_auth_failures_stay_generic() {
        // 만료와 위조를 클라이언트가 구분할 수 없도록 동일한 메시지 사용
        let expired = AuthError::TokenExpired.into_response();
        let invalid = AuthError::InvalidToken.into_response();
        assert_eq!(expired.status(), invalid.status());
    }
}
