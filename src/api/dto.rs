// ==========================================
// 家庭库存保质期跟踪 - API 输出 DTO
// ==========================================
// 职责: 为展示层附带本地化标签与颜色
// 红线: 标签/颜色只来自 ExpiryStatus，展示层不得自行判定
// ==========================================

use crate::domain::product::{BatchWithStatus, ProductWithStatus};
use crate::domain::types::{ExpiryStatus, Provenance, StatusColor};
use crate::domain::views::{CalendarMonth, DashboardSummary, InventoryStatistics, UrgentGroups};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchStatusDto {
    pub batch_id: String,
    pub expiry_date: Option<NaiveDate>,
    pub quantity: u64,
    pub unit: String,
    pub status: ExpiryStatus,
    pub days_left: Option<i64>,
    pub label: String,
    pub color: StatusColor,
}

impl BatchStatusDto {
    pub fn from_projection(item: &BatchWithStatus, locale: &str) -> Self {
        Self {
            batch_id: item.batch.id.clone(),
            expiry_date: item.batch.expiry_date,
            quantity: item.batch.effective_quantity(),
            unit: item.batch.unit_or_default().to_string(),
            status: item.status.status,
            days_left: item.status.days_left,
            label: item.status.status.label_in(locale),
            color: item.status.color(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductStatusDto {
    pub product_id: String,
    pub name: String,
    pub category: Option<String>,
    pub location: Option<String>,
    pub barcode: Option<String>,
    pub source: Provenance,
    pub status: ExpiryStatus,
    pub days_left: Option<i64>,
    pub label: String,
    pub color: StatusColor,
    pub earliest_expiry: Option<NaiveDate>,
    pub total_quantity: u64,
    pub batches: Vec<BatchStatusDto>,
}

impl ProductStatusDto {
    pub fn from_projection(item: &ProductWithStatus, locale: &str) -> Self {
        let product = &item.product;
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            category: product.category.as_ref().map(|c| c.name.clone()),
            location: product.location.as_ref().map(|l| l.name.clone()),
            barcode: product.barcode.clone(),
            source: product.source,
            status: item.status.status,
            days_left: item.status.days_left,
            label: item.status.status.label_in(locale),
            color: item.status.color(),
            earliest_expiry: item.earliest_expiry,
            total_quantity: item.total_quantity,
            batches: item
                .batches
                .iter()
                .map(|b| BatchStatusDto::from_projection(b, locale))
                .collect(),
        }
    }
}

/// 一次性完整报表（CLI 输出）
#[derive(Debug, Clone, Serialize)]
pub struct InventoryReport {
    pub user_id: String,
    pub today: NaiveDate,
    pub warning_days: i64,
    pub locale: String,
    pub products: Vec<ProductStatusDto>,
    pub urgent: UrgentGroups,
    pub statistics: InventoryStatistics,
    pub dashboard: DashboardSummary,
    pub calendar: CalendarMonth,
}
