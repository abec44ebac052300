//! 설정 관리.
//!
//! 이 모듈은 애플리케이션 설정을 정의하고 관리합니다.
//! JWT 시크릿을 포함한 모든 설정은 시작 시 명시적으로 구성된 구조체로
//! 전달되며, 프로세스 전역 가변 상태를 사용하지 않습니다.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// 애플리케이션 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// 서버 설정
    #[serde(default)]
    pub server: ServerConfig,
    /// 데이터베이스 설정
    #[serde(default)]
    pub database: DatabaseConfig,
    /// 인증 설정
    #[serde(default)]
    pub auth: AuthConfig,
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 서버 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 바인딩할 호스트
    pub host: String,
    /// 리스닝할 포트
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

/// 데이터베이스 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// 최대 연결 수
    pub max_connections: u32,
    /// 연결 타임아웃 (초)
    pub connection_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            max_connections: 10,
            connection_timeout_secs: 10,
        }
    }
}

/// 인증 설정.
///
/// Access Token과 Refresh Token은 서로 다른 시크릿으로 서명됩니다.
/// 한쪽 시크릿이 유출되어도 다른 종류의 토큰을 발급할 수 없습니다.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Access Token 서명 시크릿
    pub access_secret: String,
    /// Refresh Token 서명 시크릿
    pub refresh_secret: String,
    /// Access Token 만료 시간 (분)
    pub access_ttl_minutes: i64,
    /// Refresh Token 만료 시간 (일)
    pub refresh_ttl_days: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            access_secret: "dev-access-secret-change-in-production".to_string(),
            refresh_secret: "dev-refresh-secret-change-in-production".to_string(),
            access_ttl_minutes: 60,
            refresh_ttl_days: 7,
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 환경 변수는 `MARKET` 접두사와 `__` 구분자를 사용합니다.
    /// 예: `MARKET__AUTH__ACCESS_SECRET`, `MARKET__SERVER__PORT`
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            // 기본값으로 시작
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 5000)?
            // 파일에서 로드
            .add_source(config::File::from(path.as_ref()))
            // 환경 변수로 오버라이드
            .add_source(
                config::Environment::with_prefix("MARKET")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// 환경 변수만으로 설정을 로드합니다 (파일 없이).
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder().add_source(
            config::Environment::with_prefix("MARKET")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        // 누락된 섹션은 serde default로 채워지고, 잘못된 값은 에러로 전파됨
        config.try_deserialize()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.auth.access_ttl_minutes, 60);
        assert_eq!(config.auth.refresh_ttl_days, 7);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_distinct_default_secrets() {
        // 기본값이라도 access와 refresh 시크릿은 달라야 함
        let auth = AuthConfig::default();
        assert_ne!(auth.access_secret, auth.refresh_secret);
    }

    #[test]
    fn test_from_env_rejects_malformed_values() {
        // 환경 변수가 없으면 기본값
        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.auth.access_ttl_minutes, 60);

        // 잘못된 값은 기본값으로 조용히 대체되지 않고 에러가 되어야 함
        std::env::set_var("MARKET__SERVER__PORT", "not-a-port");
        let result = AppConfig::from_env();
        std::env::remove_var("MARKET__SERVER__PORT");
        assert!(result.is_err());
    }
}
