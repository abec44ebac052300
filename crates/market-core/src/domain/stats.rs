//! 판매자 대시보드 집계 로직.
//!
//! 주문 라인 아이템에서 판매자의 매출 합계와 주문 수를 계산합니다.
//! 금액 합산은 `Decimal`로 수행하며 부동소수점을 사용하지 않습니다.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// 집계 입력이 되는 주문 라인 아이템.
///
/// 한 주문에는 여러 판매자의 아이템이 섞여 있을 수 있습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
pub struct SellerOrderItem {
    /// 소속 주문 ID
    pub order_id: Uuid,
    /// 이 아이템을 판매한 판매자 ID
    pub seller_id: Uuid,
    /// 단가
    pub unit_price: Decimal,
    /// 수량
    pub quantity: i32,
}

/// 판매자 매출 요약.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellerSalesSummary {
    /// 총 매출 (이 판매자의 라인 아이템만 합산)
    pub total_sales: Decimal,
    /// 총 주문 수 (한 주문에 이 판매자의 아이템이 여러 개여도 1회로 집계)
    pub total_orders: i64,
}

impl SellerSalesSummary {
    /// 주문/매출이 전혀 없는 판매자의 요약.
    pub fn empty() -> Self {
        Self {
            total_sales: Decimal::ZERO,
            total_orders: 0,
        }
    }
}

/// 주문 라인 아이템 집합에서 판매자 매출을 집계합니다.
///
/// - `total_sales`: `seller_id`가 일치하는 아이템의 `단가 × 수량` 합.
///   혼합 주문 내 다른 판매자의 아이템은 합산에서 제외됩니다.
/// - `total_orders`: 이 판매자의 아이템을 하나 이상 포함한 주문의 수.
///
/// 아이템이 비어 있으면 모두 0인 요약을 반환합니다 (에러 아님).
pub fn summarize_seller_orders(items: &[SellerOrderItem], seller_id: Uuid) -> SellerSalesSummary {
    let mut total_sales = Decimal::ZERO;
    let mut order_ids: HashSet<Uuid> = HashSet::new();

    for item in items {
        if item.seller_id != seller_id {
            continue;
        }
        total_sales += item.unit_price * Decimal::from(item.quantity);
        order_ids.insert(item.order_id);
    }

    SellerSalesSummary {
        total_sales,
        total_orders: order_ids.len() as i64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn item(order_id: Uuid, seller_id: Uuid, price: Decimal, qty: i32) -> SellerOrderItem {
        SellerOrderItem {
            order_id,
            seller_id,
            unit_price: price,
            quantity: qty,
        }
    }

    #[test]
    fn test_mixed_seller_orders() {
        // 판매자 S: 주문 A에 (100 × 2), 주문 B에 (30 × 1)
        // 판매자 T: 주문 A에 (50 × 1) - 합산에서 제외되어야 함
        let seller_s = Uuid::new_v4();
        let seller_t = Uuid::new_v4();
        let order_a = Uuid::new_v4();
        let order_b = Uuid::new_v4();

        let items = vec![
            item(order_a, seller_s, dec!(100), 2),
            item(order_a, seller_t, dec!(50), 1),
            item(order_b, seller_s, dec!(30), 1),
        ];

        let summary = summarize_seller_orders(&items, seller_s);
        assert_eq!(summary.total_sales, dec!(230));
        assert_eq!(summary.total_orders, 2);
    }

    #[test]
    fn test_order_counted_once_with_multiple_items() {
        let seller = Uuid::new_v4();
        let order = Uuid::new_v4();

        let items = vec![
            item(order, seller, dec!(10), 1),
            item(order, seller, dec!(20), 3),
        ];

        let summary = summarize_seller_orders(&items, seller);
        assert_eq!(summary.total_sales, dec!(70));
        assert_eq!(summary.total_orders, 1);
    }

    #[test]
    fn test_empty_items_returns_zeros() {
        let summary = summarize_seller_orders(&[], Uuid::new_v4());
        assert_eq!(summary, SellerSalesSummary::empty());
    }

    #[test]
    fn test_other_sellers_only_returns_zeros() {
        let seller = Uuid::new_v4();
        let other = Uuid::new_v4();
        let items = vec![item(Uuid::new_v4(), other, dec!(99), 5)];

        let summary = summarize_seller_orders(&items, seller);
        assert_eq!(summary.total_sales, Decimal::ZERO);
        assert_eq!(summary.total_orders, 0);
    }

    #[test]
    fn test_decimal_prices_sum_exactly() {
        // 0.1 + 0.2 류의 부동소수점 오차가 없어야 함
        let seller = Uuid::new_v4();
        let items = vec![
            item(Uuid::new_v4(), seller, dec!(0.10), 1),
            item(Uuid::new_v4(), seller, dec!(0.20), 1),
        ];

        let summary = summarize_seller_orders(&items, seller);
        assert_eq!(summary.total_sales, dec!(0.30));
    }
}
