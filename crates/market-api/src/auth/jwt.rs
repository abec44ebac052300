//! JWT 토큰 처리.
//!
//! Access Token 및 Refresh Token 생성/검증 로직.
//!
//! 두 종류의 토큰은 서로 다른 시크릿으로 서명됩니다. Refresh 시크릿이
//! 유출되어도 Access Token을 위조할 수 없고, 그 반대도 마찬가지입니다.
//! 토큰은 서버에 저장되지 않으며 유효성은 서명과 만료 시간으로만
//! 판단됩니다 (폐기 목록 없음).

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use market_core::config::AuthConfig;

/// JWT Access Token 페이로드.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject - 사용자 ID
    pub sub: String,
    /// Issued At - 토큰 발급 시간 (Unix timestamp)
    pub iat: i64,
    /// Expiration - 토큰 만료 시간 (Unix timestamp)
    pub exp: i64,
}

impl AccessClaims {
    /// 새로운 Access Claims 생성.
    pub fn new(user_id: Uuid, expires_in_minutes: i64) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::minutes(expires_in_minutes)).timestamp(),
        }
    }
}

/// Refresh Token 페이로드.
///
/// Access Token 갱신에만 사용됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshClaims {
    /// Subject - 사용자 ID
    pub sub: String,
    /// Issued At
    pub iat: i64,
    /// Expiration
    pub exp: i64,
    /// JWT ID - 토큰 고유 식별자
    pub jti: String,
    /// Token type (항상 "refresh")
    pub token_type: String,
}

impl RefreshClaims {
    /// 새로운 Refresh Claims 생성.
    pub fn new(user_id: Uuid, expires_in_days: i64) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::days(expires_in_days)).timestamp(),
            jti: Uuid::new_v4().to_string(),
            token_type: "refresh".to_string(),
        }
    }
}

/// Access Token + Refresh Token 페어.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[derive(utoipa::ToSchema)]
pub struct TokenPair {
    /// Access Token
    pub access_token: String,
    /// Refresh Token
    pub refresh_token: String,
    /// Access Token 만료 시간 (초)
    pub expires_in: i64,
    /// 토큰 타입 (항상 "Bearer")
    pub token_type: String,
}

/// JWT 토큰 에러.
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("토큰 인코딩 실패: {0}")]
    Encoding(#[from] jsonwebtoken::errors::Error),
    #[error("토큰이 만료되었습니다")]
    TokenExpired,
    #[error("유효하지 않은 토큰")]
    InvalidToken,
}

/// JWT 토큰 서비스.
///
/// 시크릿 설정의 순수 함수로 동작하며 공유 가변 상태를 갖지 않습니다.
/// [`AuthConfig`]에서 생성되어 시작 시 `AppState`에 주입됩니다.
#[derive(Clone)]
pub struct TokenService {
    access_secret: String,
    refresh_secret: String,
    access_ttl_minutes: i64,
    refresh_ttl_days: i64,
}

impl TokenService {
    /// 인증 설정에서 토큰 서비스 생성.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            access_secret: config.access_secret.clone(),
            refresh_secret: config.refresh_secret.clone(),
            access_ttl_minutes: config.access_ttl_minutes,
            refresh_ttl_days: config.refresh_ttl_days,
        }
    }

    /// Access Token 유효 시간(초).
    ///
    /// 토큰 발급과 갱신 응답이 동일한 값을 보고하도록 여기서만 계산합니다.
    pub fn access_expires_in(&self) -> i64 {
        self.access_ttl_minutes * 60
    }

    /// Access Token + Refresh Token 쌍 발급.
    pub fn issue_pair(&self, user_id: Uuid) -> Result<TokenPair, JwtError> {
        let access_token = self.issue_access(user_id)?;

        let refresh_claims = RefreshClaims::new(user_id, self.refresh_ttl_days);
        let refresh_token = encode(
            &Header::default(),
            &refresh_claims,
            &EncodingKey::from_secret(self.refresh_secret.as_bytes()),
        )?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            expires_in: self.access_expires_in(),
            token_type: "Bearer".to_string(),
        })
    }

    /// Access Token만 발급 (refresh 플로우용).
    ///
    /// Refresh Token은 로테이션하지 않습니다.
    pub fn issue_access(&self, user_id: Uuid) -> Result<String, JwtError> {
        let claims = AccessClaims::new(user_id, self.access_ttl_minutes);
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.access_secret.as_bytes()),
        )
        .map_err(JwtError::from)
    }

    /// Access Token 검증 및 사용자 ID 복원.
    ///
    /// 서명 불일치, 만료, 잘못된 형식 모두 에러를 반환합니다.
    /// Refresh 시크릿으로 서명된 토큰은 여기서 거부됩니다.
    pub fn verify_access(&self, token: &str) -> Result<Uuid, JwtError> {
        let data = decode::<AccessClaims>(
            token,
            &DecodingKey::from_secret(self.access_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(map_decode_error)?;

        Uuid::parse_str(&data.claims.sub).map_err(|_| JwtError::InvalidToken)
    }

    /// Refresh Token 검증 및 사용자 ID 복원.
    pub fn verify_refresh(&self, token: &str) -> Result<Uuid, JwtError> {
        let data = decode::<RefreshClaims>(
            token,
            &DecodingKey::from_secret(self.refresh_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(map_decode_error)?;

        Uuid::parse_str(&data.claims.sub).map_err(|_| JwtError::InvalidToken)
    }
}

fn map_decode_error(e: jsonwebtoken::errors::Error) -> JwtError {
    match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::TokenExpired,
        _ => JwtError::InvalidToken,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_service() -> TokenService {
        TokenService::new(&AuthConfig {
            access_secret: "test-access-secret-minimum-32-chars!!".to_string(),
            refresh_secret: "test-refresh-secret-minimum-32-chars!".to_string(),
            access_ttl_minutes: 60,
            refresh_ttl_days: 7,
        })
    }

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let service = test_service();
        let user_id = Uuid::new_v4();

        let pair = service.issue_pair(user_id).unwrap();
        assert!(!pair.access_token.is_empty());
        assert!(!pair.refresh_token.is_empty());
        assert_eq!(pair.token_type, "Bearer");
        assert_eq!(pair.expires_in, 60 * 60);

        // 발급 직후 검증하면 동일한 사용자 ID가 복원되어야 함
        assert_eq!(service.verify_access(&pair.access_token).unwrap(), user_id);
        assert_eq!(
            service.verify_refresh(&pair.refresh_token).unwrap(),
            user_id
        );
    }

    #[test]
    fn test_cross_kind_rejection() {
        let service = test_service();
        let pair = service.issue_pair(Uuid::new_v4()).unwrap();

        // Refresh Token은 Access 검증을 통과할 수 없고, 그 반대도 마찬가지
        assert!(service.verify_access(&pair.refresh_token).is_err());
        assert!(service.verify_refresh(&pair.access_token).is_err());
    }

    #[test]
    fn test_expired_access_token_rejected() {
        let service = TokenService::new(&AuthConfig {
            access_secret: "test-access-secret-minimum-32-chars!!".to_string(),
            refresh_secret: "test-refresh-secret-minimum-32-chars!".to_string(),
            // 2시간 전에 만료된 토큰 (기본 leeway 60초를 넘김)
            access_ttl_minutes: -120,
            refresh_ttl_days: 7,
        });

        let token = service.issue_access(Uuid::new_v4()).unwrap();
        assert!(matches!(
            service.verify_access(&token),
            Err(JwtError::TokenExpired)
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let service = test_service();
        let other = TokenService::new(&AuthConfig {
            access_secret: "another-access-secret-32-characters!!".to_string(),
            refresh_secret: "another-refresh-secret-32-characters!".to_string(),
            access_ttl_minutes: 60,
            refresh_ttl_days: 7,
        });

        let token = service.issue_access(Uuid::new_v4()).unwrap();
        assert!(other.verify_access(&token).is_err());
    }

    #[test]
    fn test_garbage_token_rejected() {
        let service = test_service();
        assert!(matches!(
            service.verify_access("not.a.token"),
            Err(JwtError::InvalidToken)
        ));
    }

    #[test]
    fn test_expires_in_follows_configured_ttl() {
        // 기본값이 아닌 TTL에서도 발급 경로와 갱신 경로가 같은 값을 보고해야 함
        let service = TokenService::new(&AuthConfig {
            access_secret: "test-access-secret-minimum-32-chars!!".to_string(),
            refresh_secret: "test-refresh-secret-minimum-32-chars!".to_string(),
            access_ttl_minutes: 30,
            refresh_ttl_days: 7,
        });

        assert_eq!(service.access_expires_in(), 30 * 60);
        let pair = service.issue_pair(Uuid::new_v4()).unwrap();
        assert_eq!(pair.expires_in, service.access_expires_in());
    }

    #[test]
    fn test_refresh_flow_issues_new_access_only() {
        let service = test_service();
        let user_id = Uuid::new_v4();
        let pair = service.issue_pair(user_id).unwrap();

        let verified = service.verify_refresh(&pair.refresh_token).unwrap();
        let new_access = service.issue_access(verified).unwrap();
        assert_eq!(service.verify_access(&new_access).unwrap(), user_id);
    }
}
