// ==========================================
// 家庭库存保质期跟踪 - 产品与批次领域模型
// ==========================================
// 用途: 持久化协作方提供快照，引擎层只读
// 红线: 状态不落在实体上，每次读取时重新派生
// ==========================================

use crate::domain::status::StatusAssessment;
use crate::domain::types::Provenance;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 未指定单位时的默认计数单位
pub const DEFAULT_UNIT: &str = "pcs";

// ==========================================
// Batch - 批次
// ==========================================
// 同一产品下共享一个到期日的一批数量
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    pub id: String,                      // 批次标识（产品内唯一）
    pub expiry_date: Option<NaiveDate>,  // 到期日（日历日；缺失则不参与到期计算）
    pub quantity: Option<u32>,           // 数量（缺失/非法视为 0）
    pub unit: Option<String>,            // 单位（缺省为计数单位）
    pub created_at: DateTime<Utc>,       // 录入时间
}

impl Batch {
    /// 新建批次（自动生成批次号）
    pub fn new(expiry_date: Option<NaiveDate>, quantity: u32) -> Self {
        Self {
            id: generate_batch_id(),
            expiry_date,
            quantity: Some(quantity),
            unit: None,
            created_at: Utc::now(),
        }
    }

    /// 计入汇总的数量（缺失视为 0）
    pub fn effective_quantity(&self) -> u64 {
        self.quantity.map(u64::from).unwrap_or(0)
    }

    /// 单位（缺省为计数单位）
    pub fn unit_or_default(&self) -> &str {
        self.unit.as_deref().unwrap_or(DEFAULT_UNIT)
    }
}

/// 生成批次号: batch_<uuid>
pub fn generate_batch_id() -> String {
    format!("batch_{}", Uuid::new_v4().simple())
}

// ==========================================
// NamedRef - 分类 / 存放位置引用
// ==========================================
// 持久化协作方已解析出显示名称
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRef {
    pub id: String,
    pub name: String,
}

impl NamedRef {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
        }
    }
}

// ==========================================
// Product - 产品
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    // ===== 主键 =====
    pub id: String,

    // ===== 基础信息 =====
    pub name: String,                  // 名称（非空）
    pub category: Option<NamedRef>,    // 分类
    pub location: Option<NamedRef>,    // 存放位置
    pub barcode: Option<String>,       // 来源条码

    // ===== 批次 =====
    pub batches: Vec<Batch>,           // 有序批次列表（可为空）

    // ===== 来源 =====
    pub source: Provenance,
}

impl Product {
    /// 新建空产品（无批次、手工来源）
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            category: None,
            location: None,
            barcode: None,
            batches: Vec::new(),
            source: Provenance::Manual,
        }
    }

    /// 分类名称（未分类返回 None）
    pub fn category_name(&self) -> Option<&str> {
        self.category.as_ref().map(|c| c.name.as_str())
    }
}

// ==========================================
// BatchWithStatus - 批次 + 自身到期状态
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchWithStatus {
    pub batch: Batch,
    pub status: StatusAssessment,
}

// ==========================================
// ProductWithStatus - 产品投影
// ==========================================
// 由投影器生成，仅在一次视图计算内有效
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductWithStatus {
    pub product: Product,
    pub status: StatusAssessment,            // 基于最早到期日的产品级状态
    pub earliest_expiry: Option<NaiveDate>,  // 最早到期日
    pub total_quantity: u64,                 // 全部批次数量合计
    pub batches: Vec<BatchWithStatus>,       // 各批次自身状态（与 product.batches 同序）
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_quantity_treats_missing_as_zero() {
        let mut batch = Batch::new(None, 4);
        assert_eq!(batch.effective_quantity(), 4);

        batch.quantity = None;
        assert_eq!(batch.effective_quantity(), 0);
    }

    #[test]
    fn test_unit_default() {
        let mut batch = Batch::new(None, 1);
        assert_eq!(batch.unit_or_default(), DEFAULT_UNIT);

        batch.unit = Some("kg".to_string());
        assert_eq!(batch.unit_or_default(), "kg");
    }

    #[test]
    fn test_generated_batch_ids_are_unique() {
        let a = generate_batch_id();
        let b = generate_batch_id();
        assert!(a.starts_with("batch_"));
        assert_ne!(a, b);
    }
}
