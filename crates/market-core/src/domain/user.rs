//! 사용자 역할 및 접근 제어 규칙.
//!
//! 역할은 닫힌 enum으로 표현되며 문자열 비교로 권한을 판단하지 않습니다.
//! "admin은 모든 역할 요구사항을 충족한다"는 규칙은
//! [`Role::satisfies`]에 명시적으로 인코딩되어 있습니다.

use serde::{Deserialize, Serialize};

/// 사용자 역할.
///
/// 시스템에서 사용자의 권한 수준을 정의합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx-support",
    sqlx(type_name = "TEXT", rename_all = "lowercase")
)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub enum Role {
    /// 구매자 - 기본 역할
    Customer,
    /// 판매자 - 상품 등록 및 대시보드 접근 권한
    Seller,
    /// 관리자 - 모든 역할 요구사항 충족
    Admin,
}

impl Role {
    /// 이 역할이 요구 역할을 충족하는지 확인.
    ///
    /// Admin은 모든 요구사항을 충족합니다 (admin superset 규칙).
    /// 그 외에는 정확히 일치해야 합니다. 역할 간 계층은 없습니다.
    pub fn satisfies(&self, required: Role) -> bool {
        matches!(self, Role::Admin) || *self == required
    }

    /// 문자열에서 역할 파싱.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "customer" => Some(Role::Customer),
            "seller" => Some(Role::Seller),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Customer
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Role::Customer => "customer",
            Role::Seller => "seller",
            Role::Admin => "admin",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_satisfies_everything() {
        assert!(Role::Admin.satisfies(Role::Customer));
        assert!(Role::Admin.satisfies(Role::Seller));
        assert!(Role::Admin.satisfies(Role::Admin));
    }

    #[test]
    fn test_exact_match_required_for_non_admin() {
        assert!(Role::Seller.satisfies(Role::Seller));
        assert!(!Role::Seller.satisfies(Role::Admin));
        assert!(!Role::Seller.satisfies(Role::Customer));

        assert!(Role::Customer.satisfies(Role::Customer));
        assert!(!Role::Customer.satisfies(Role::Seller));
        assert!(!Role::Customer.satisfies(Role::Admin));
    }

    #[test]
    fn test_role_parse() {
        assert_eq!(Role::parse("customer"), Some(Role::Customer));
        assert_eq!(Role::parse("SELLER"), Some(Role::Seller));
        assert_eq!(Role::parse("Admin"), Some(Role::Admin));
        assert_eq!(Role::parse("superuser"), None);
    }

    #[test]
    fn test_role_serialization() {
        let json = serde_json::to_string(&Role::Seller).unwrap();
        assert_eq!(json, "\"seller\"");

        let parsed: Role = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Role::Seller);
    }

    #[test]
    fn test_default_role_is_customer() {
        assert_eq!(Role::default(), Role::Customer);
    }
}
