//! 통합 API 에러 응답 타입.
//!
//! 모든 API 엔드포인트에서 일관된 에러 형식을 제공합니다.
//! 내부 에러의 상세(원인)는 tracing으로만 기록하고 클라이언트에는
//! 일반화된 메시지를 반환합니다.

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use market_core::MarketError;

/// 통합 API 에러 응답.
///
/// # 예시
///
/// ```json
/// {
///   "code": "EMAIL_TAKEN",
///   "message": "Email already registered",
///   "timestamp": 1738300800
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// 에러 코드 (예: "DB_ERROR", "VALIDATION_ERROR", "NOT_FOUND")
    pub code: String,
    /// 사람이 읽을 수 있는 에러 메시지
    pub message: String,
    /// 추가 에러 상세 정보 (선택적)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    /// 에러 발생 타임스탬프 (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl ApiErrorResponse {
    /// 기본 에러 생성 (타임스탬프 포함).
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            timestamp: Some(chrono::Utc::now().timestamp()),
        }
    }

    /// 상세 정보 포함 에러 생성.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: Value,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details),
            timestamp: Some(chrono::Utc::now().timestamp()),
        }
    }
}

impl std::fmt::Display for ApiErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiErrorResponse {}

/// API 핸들러 Result 타입 별칭.
pub type ApiResult<T> = Result<T, (StatusCode, Json<ApiErrorResponse>)>;

/// 핵심 에러를 HTTP 응답으로 변환.
///
/// 서버 측 에러(`Database`, `Internal`)의 상세 내용은 로그에만 남깁니다.
pub fn map_market_error(err: MarketError) -> (StatusCode, Json<ApiErrorResponse>) {
    let (status, code, message) = match &err {
        MarketError::Validation(msg) => {
            (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
        }
        MarketError::Unauthenticated(_) => (
            StatusCode::UNAUTHORIZED,
            "UNAUTHENTICATED",
            "Not authorized".to_string(),
        ),
        MarketError::Forbidden(_) => (
            StatusCode::FORBIDDEN,
            "FORBIDDEN",
            "Not authorized for this resource".to_string(),
        ),
        MarketError::Conflict(msg) => (StatusCode::BAD_REQUEST, "CONFLICT", msg.clone()),
        MarketError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
        MarketError::Database(detail) => {
            tracing::error!(detail = %detail, "데이터베이스 에러");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "DB_ERROR",
                "Internal server error".to_string(),
            )
        }
        MarketError::Internal(detail) => {
            tracing::error!(detail = %detail, "내부 에러");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "Internal server error".to_string(),
            )
        }
    };

    (status, Json(ApiErrorResponse::new(code, message)))
}

/// sqlx 에러를 500 응답으로 변환 (상세는 로그로만).
pub fn db_error(err: sqlx::Error) -> (StatusCode, Json<ApiErrorResponse>) {
    map_market_error(MarketError::Database(err.to_string()))
}
