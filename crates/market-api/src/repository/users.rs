//! 사용자 저장소.
//!
//! 회원 계정(users)을 관리합니다. 비밀번호 해시는 로그인 검증 경로에서만
//! 로드하며, API 응답용 [`PublicUser`]에는 포함되지 않습니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use utoipa::ToSchema;
use uuid::Uuid;

use market_core::Role;

// =====================================================
// 타입
// =====================================================

/// 사용자 레코드 (비밀번호 해시 포함).
///
/// 자격증명 검증 경로 전용. 직렬화하지 않습니다.
#[derive(Debug, Clone, FromRow)]
pub struct UserRecord {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub phone_number: Option<String>,
    pub role: Role,
    /// 판매자 상호명 (판매자 가입 시)
    pub business_name: Option<String>,
    /// 판매자 사업자 등록번호
    pub gst_number: Option<String>,
    /// 판매자 사업장 주소
    pub business_address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRecord {
    /// 비밀번호 해시를 제외한 공개 뷰로 변환.
    pub fn into_public(self) -> PublicUser {
        PublicUser {
            id: self.id,
            full_name: self.full_name,
            email: self.email,
            phone_number: self.phone_number,
            role: self.role,
            business_name: self.business_name,
            gst_number: self.gst_number,
            business_address: self.business_address,
            created_at: self.created_at,
        }
    }
}

/// API 응답용 사용자 뷰 (비밀번호 해시 제외).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub role: Role,
    pub business_name: Option<String>,
    pub gst_number: Option<String>,
    pub business_address: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// 사용자 생성 입력.
#[derive(Debug, Clone)]
pub struct CreateUserInput {
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub phone_number: Option<String>,
    pub role: Role,
    pub business_name: Option<String>,
    pub gst_number: Option<String>,
    pub business_address: Option<String>,
}

// =====================================================
// UserRepository
// =====================================================

/// 사용자 저장소.
pub struct UserRepository;

impl UserRepository {
    /// 사용자 생성.
    pub async fn create(pool: &PgPool, input: CreateUserInput) -> Result<UserRecord, sqlx::Error> {
        sqlx::query_as::<_, UserRecord>(
            r#"
            INSERT INTO users (
                id, full_name, email, password_hash, phone_number, role,
                business_name, gst_number, business_address,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&input.full_name)
        .bind(&input.email)
        .bind(&input.password_hash)
        .bind(&input.phone_number)
        .bind(input.role)
        .bind(&input.business_name)
        .bind(&input.gst_number)
        .bind(&input.business_address)
        .fetch_one(pool)
        .await
    }

    /// 이메일로 사용자 조회 (해시 포함, 로그인용).
    pub async fn find_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<UserRecord>, sqlx::Error> {
        sqlx::query_as::<_, UserRecord>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// ID로 사용자 공개 뷰 조회 (인증 게이트용).
    pub async fn find_public_by_id(
        pool: &PgPool,
        id: Uuid,
    ) -> Result<Option<PublicUser>, sqlx::Error> {
        sqlx::query_as::<_, PublicUser>(
            r#"
            SELECT id, full_name, email, phone_number, role,
                   business_name, gst_number, business_address, created_at
            FROM users WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// 이메일 중복 여부 확인.
    pub async fn email_exists(pool: &PgPool, email: &str) -> Result<bool, sqlx::Error> {
        let row: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(pool)
                .await?;
        Ok(row.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_public_drops_hash() {
        let record = UserRecord {
            id: Uuid::new_v4(),
            full_name: "Kim Seller".to_string(),
            email: "seller@example.com".to_string(),
            password_hash: "$argon2id$...".to_string(),
            phone_number: Some("010-1234-5678".to_string()),
            role: Role::Seller,
            business_name: Some("Kim Trading Co.".to_string()),
            gst_number: Some("29ABCDE1234F1Z5".to_string()),
            business_address: Some("12 Market Street".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let public = record.clone().into_public();
        assert_eq!(public.id, record.id);
        assert_eq!(public.role, Role::Seller);

        // 직렬화 결과에 해시가 섞이지 않아야 함
        let json = serde_json::to_string(&public).unwrap();
        assert!(!json.contains("argon2"));
        assert!(!json.contains("password"));

        // 판매자 사업자 정보는 공개 뷰에 그대로 유지되어야 함
        assert!(json.contains(r#""businessName":"Kim Trading Co.""#));
        assert!(json.contains(r#""gstNumber":"29ABCDE1234F1Z5""#));
        assert!(json.contains(r#""businessAddress":"12 Market Street""#));
    }

    #[test]
    fn test_public_user_serializes_camel_case() {
        let public = PublicUser {
            id: Uuid::new_v4(),
            full_name: "Lee Buyer".to_string(),
            email: "buyer@example.com".to_string(),
            phone_number: None,
            role: Role::Customer,
            business_name: None,
            gst_number: None,
            business_address: None,
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&public).unwrap();
        assert!(json.contains(r#""fullName":"Lee Buyer""#));
        assert!(json.contains(r#""role":"customer""#));
    }
}
