// ==========================================
// 家庭库存保质期跟踪 - 产品录入草稿
// ==========================================
// 职责: 表单 / 扫码结果 → Product 的校验与构造
// 规则:
// - 名称去除首尾空白后不可为空
// - 批次需同时具备到期日且数量 > 0，否则丢弃
// - 至少保留一个批次
// ==========================================

use crate::domain::product::{generate_batch_id, Batch, NamedRef, Product};
use crate::domain::types::Provenance;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    #[error("产品名称不能为空")]
    EmptyName,

    #[error("至少需要一个带到期日且数量大于 0 的批次")]
    NoValidBatch,
}

/// 草稿批次（表单原始输入）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchDraft {
    pub id: Option<String>,
    pub expiry_date: Option<NaiveDate>,
    pub quantity: Option<u32>,
    pub unit: Option<String>,
}

/// 产品草稿
///
/// 扫码/查询协作方提供的种子数据也走这里，核心不补全也不校验其内容
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub barcode: Option<String>,
    pub category: Option<NamedRef>,
    pub location: Option<NamedRef>,
    pub source: Provenance,
    pub batches: Vec<BatchDraft>,
}

impl ProductDraft {
    /// 校验并构造产品
    ///
    /// # 参数
    /// - id: 持久化协作方分配的产品标识
    pub fn into_product(self, id: &str) -> Result<Product, DraftError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(DraftError::EmptyName);
        }

        let now = Utc::now();
        let batches: Vec<Batch> = self
            .batches
            .into_iter()
            .filter(|b| b.expiry_date.is_some() && b.quantity.unwrap_or(0) > 0)
            .map(|b| Batch {
                id: b.id.unwrap_or_else(generate_batch_id),
                expiry_date: b.expiry_date,
                quantity: b.quantity,
                unit: b.unit,
                created_at: now,
            })
            .collect();

        if batches.is_empty() {
            return Err(DraftError::NoValidBatch);
        }

        let barcode = self
            .barcode
            .map(|b| b.trim().to_string())
            .filter(|b| !b.is_empty());

        Ok(Product {
            id: id.to_string(),
            name,
            category: self.category,
            location: self.location,
            barcode,
            batches,
            source: self.source,
        })
    }
}
