//! 마켓플레이스 시스템의 에러 타입.
//!
//! 이 모듈은 시스템 전반에서 사용되는 에러 분류를 정의합니다.
//! API 경계 계층은 각 variant를 HTTP 상태 코드로 변환합니다.

use thiserror::Error;

/// 핵심 마켓플레이스 에러.
#[derive(Debug, Error)]
pub enum MarketError {
    /// 잘못되거나 누락된 입력 (400)
    #[error("잘못된 입력: {0}")]
    Validation(String),

    /// 토큰 누락/무효/만료 또는 사라진 계정 (401)
    #[error("인증 실패: {0}")]
    Unauthenticated(String),

    /// 인증은 되었으나 권한 부족 (403)
    #[error("권한 부족: {0}")]
    Forbidden(String),

    /// 고유 필드 중복 (400/409)
    #[error("중복 충돌: {0}")]
    Conflict(String),

    /// 찾을 수 없음 (404)
    #[error("찾을 수 없음: {0}")]
    NotFound(String),

    /// 데이터베이스 에러 (500)
    #[error("데이터베이스 에러: {0}")]
    Database(String),

    /// 내부 에러 (500)
    #[error("내부 에러: {0}")]
    Internal(String),
}

/// 마켓플레이스 작업을 위한 Result 타입.
pub type MarketResult<T> = Result<T, MarketError>;

impl MarketError {
    /// 클라이언트 측 원인(4xx)인지 확인합니다.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, MarketError::Database(_) | MarketError::Internal(_))
    }

    /// 클라이언트에 노출해도 안전한 메시지인지 확인합니다.
    ///
    /// 서버 측 에러의 상세 내용은 로그에만 남기고 응답에는 포함하지 않습니다.
    pub fn is_safe_to_expose(&self) -> bool {
        self.is_client_error()
    }
}

impl From<serde_json::Error> for MarketError {
    fn from(err: serde_json::Error) -> Self {
        MarketError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_classification() {
        assert!(MarketError::Validation("bad email".to_string()).is_client_error());
        assert!(MarketError::Unauthenticated("no token".to_string()).is_client_error());
        assert!(MarketError::Forbidden("not a seller".to_string()).is_client_error());
        assert!(MarketError::Conflict("email taken".to_string()).is_client_error());
        assert!(MarketError::NotFound("product".to_string()).is_client_error());

        assert!(!MarketError::Database("connection reset".to_string()).is_client_error());
        assert!(!MarketError::Internal("oops".to_string()).is_client_error());
    }

    #[test]
    fn test_server_errors_not_exposed() {
        let err = MarketError::Database("password=hunter2 in dsn".to_string());
        assert!(!err.is_safe_to_expose());
    }
}
