// ==========================================
// 家庭库存保质期跟踪 - 产品状态投影
// ==========================================
// 职责: 批次聚合 → 状态判定，为产品附加 {status, days_left, earliest_expiry}
// 红线: 纯函数；状态随批次/阈值变化必须重新投影，不缓存
// ==========================================

use crate::domain::product::{BatchWithStatus, Product, ProductWithStatus};
use crate::engine::batch_aggregator::BatchAggregator;
use crate::engine::classifier::ExpiryClassifier;
use chrono::NaiveDate;
use tracing::instrument;

// ==========================================
// StatusProjector - 产品状态投影器
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusProjector;

impl StatusProjector {
    pub fn new() -> Self {
        Self
    }

    /// 批量投影（保持输入顺序）
    #[instrument(skip(self, products), fields(count = products.len()))]
    pub fn project_all(
        &self,
        products: &[Product],
        warning_days: i64,
        today: NaiveDate,
    ) -> Vec<ProductWithStatus> {
        products
            .iter()
            .map(|p| self.project(p, warning_days, today))
            .collect()
    }

    /// 单个产品投影
    ///
    /// 1. 最早到期日 + 数量合计
    /// 2. 以最早到期日判定产品级状态
    /// 3. 各批次按自身到期日判定
    pub fn project(
        &self,
        product: &Product,
        warning_days: i64,
        today: NaiveDate,
    ) -> ProductWithStatus {
        let earliest_expiry = BatchAggregator::earliest_expiry(&product.batches);
        let total_quantity = BatchAggregator::total_quantity(&product.batches);
        let status = ExpiryClassifier::classify(earliest_expiry, warning_days, today);

        let batches = product
            .batches
            .iter()
            .map(|b| BatchWithStatus {
                batch: b.clone(),
                status: ExpiryClassifier::classify(b.expiry_date, warning_days, today),
            })
            .collect();

        ProductWithStatus {
            product: product.clone(),
            status,
            earliest_expiry,
            total_quantity,
            batches,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::Batch;
    use crate::domain::types::{ExpiryStatus, Provenance};
    use chrono::{Duration, TimeZone, Utc};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 17).unwrap()
    }

    fn batch(id: &str, offset: Option<i64>, qty: u32) -> Batch {
        Batch {
            id: id.to_string(),
            expiry_date: offset.map(|n| today() + Duration::days(n)),
            quantity: Some(qty),
            unit: None,
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 8, 0, 0).unwrap(),
        }
    }

    fn product(name: &str, batches: Vec<Batch>) -> Product {
        Product {
            id: format!("p_{}", name),
            name: name.to_string(),
            category: None,
            location: None,
            barcode: None,
            batches,
            source: Provenance::Manual,
        }
    }

    #[test]
    fn test_milk_scenario() {
        // 牛奶: 一批昨天过期，一批 10 天后到期
        let milk = product("Milk", vec![batch("b1", Some(-1), 1), batch("b2", Some(10), 2)]);
        let projected = StatusProjector::new().project(&milk, 14, today());

        assert_eq!(projected.earliest_expiry, Some(today() - Duration::days(1)));
        assert_eq!(projected.status.status, ExpiryStatus::Expired);
        assert_eq!(projected.status.days_left, Some(-1));
        assert_eq!(projected.total_quantity, 3);

        // 批次级状态按自身到期日
        assert_eq!(projected.batches[0].status.status, ExpiryStatus::Expired);
        assert_eq!(projected.batches[1].status.status, ExpiryStatus::Warning);
    }

    #[test]
    fn test_product_without_dates_is_unknown() {
        let flour = product("Flour", vec![batch("b1", None, 5)]);
        let projected = StatusProjector::new().project(&flour, 14, today());

        assert_eq!(projected.status.status, ExpiryStatus::Unknown);
        assert_eq!(projected.earliest_expiry, None);
        assert_eq!(projected.total_quantity, 5);
    }

    #[test]
    fn test_projection_is_idempotent() {
        let p = product("Yogurt", vec![batch("b1", Some(5), 1), batch("b2", Some(2), 1)]);
        let projector = StatusProjector::new();
        assert_eq!(projector.project(&p, 14, today()), projector.project(&p, 14, today()));
    }

    #[test]
    fn test_project_all_keeps_order() {
        let products = vec![
            product("A", vec![batch("b1", Some(30), 1)]),
            product("B", vec![batch("b1", Some(-3), 1)]),
        ];
        let projected = StatusProjector::new().project_all(&products, 14, today());
        assert_eq!(projected.len(), 2);
        assert_eq!(projected[0].product.name, "A");
        assert_eq!(projected[1].product.name, "B");
    }
}
