//! 도메인 모델.
//!
//! 마켓플레이스의 핵심 도메인 타입을 정의합니다:
//! - `Role` - 사용자 역할 및 접근 제어 규칙
//! - `ProductStatus` - 상품 상태 라이프사이클
//! - 판매자 대시보드 집계 (`stats`)

pub mod product;
pub mod stats;
pub mod user;

pub use product::ProductStatus;
pub use stats::{summarize_seller_orders, SellerOrderItem, SellerSalesSummary};
pub use user::Role;
