//! 인증 및 권한 부여.
//!
//! JWT 기반 인증 및 역할 기반 접근 제어를 제공합니다.
//!
//! # 구성 요소
//!
//! - [`TokenService`]: Access/Refresh 토큰 발급 및 검증
//! - [`AuthUser`] / [`SellerUser`] / [`AdminUser`]: Axum 추출기 형태의 접근 제어 게이트
//! - [`hash_password`] / [`verify_password`]: Argon2 비밀번호 처리

mod jwt;
mod middleware;
mod password;

pub use jwt::{AccessClaims, JwtError, RefreshClaims, TokenPair, TokenService};
pub use middleware::{
    extract_bearer, require_role, AdminUser, AuthError, AuthUser, SellerUser,
};
pub use password::{
    hash_password, validate_password_strength, verify_password, PasswordError,
};
