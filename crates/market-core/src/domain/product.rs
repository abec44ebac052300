//! 상품 상태 라이프사이클.

use serde::{Deserialize, Serialize};

/// 상품 상태.
///
/// `Active` 상태의 상품만 공개 목록에 노출됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx-support",
    sqlx(type_name = "TEXT", rename_all = "lowercase")
)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub enum ProductStatus {
    /// 작성 중 - 판매자에게만 보임
    Draft,
    /// 판매 중 - 공개 목록에 노출
    Active,
    /// 판매 중지
    Inactive,
}

impl ProductStatus {
    /// 공개 목록에 노출 가능한 상태인지 확인.
    pub fn is_listable(&self) -> bool {
        matches!(self, ProductStatus::Active)
    }
}

impl Default for ProductStatus {
    fn default() -> Self {
        ProductStatus::Draft
    }
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ProductStatus::Draft => "draft",
            ProductStatus::Active => "active",
            ProductStatus::Inactive => "inactive",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_active_is_listable() {
        assert!(ProductStatus::Active.is_listable());
        assert!(!ProductStatus::Draft.is_listable());
        assert!(!ProductStatus::Inactive.is_listable());
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&ProductStatus::Active).unwrap(),
            "\"active\""
        );
        let parsed: ProductStatus = serde_json::from_str("\"draft\"").unwrap();
        assert_eq!(parsed, ProductStatus::Draft);
    }

    #[test]
    fn test_default_status_is_draft() {
        assert_eq!(ProductStatus::default(), ProductStatus::Draft);
    }
}
