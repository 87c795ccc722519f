// ==========================================
// 家庭库存保质期跟踪 - 原始快照记录
// ==========================================
// JSON: 托管数据库返回的产品行（批次嵌套，camelCase 字段）
// CSV : 每行一个批次，按 product_id 归并
// ==========================================

use serde::Deserialize;
use serde_json::Value;

// JSON 记录的全部字段都按 Value 读取，类型不符只影响该字段本身
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawNamedRef {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub name: Value,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBatchRecord {
    #[serde(default)]
    pub id: Value,
    #[serde(default, alias = "expiry_date")]
    pub expiry_date: Value,
    #[serde(default)]
    pub quantity: Value,
    #[serde(default)]
    pub unit: Value,
    #[serde(default, alias = "added_at", alias = "created_at", alias = "createdAt")]
    pub added_at: Value,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProductRecord {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub name: Value,
    #[serde(default)]
    pub barcode: Value,
    #[serde(default)]
    pub source: Value,
    #[serde(default)]
    pub category: Value,
    #[serde(default)]
    pub location: Value,
    #[serde(default, alias = "category_id")]
    pub category_id: Value,
    #[serde(default, alias = "location_id")]
    pub location_id: Value,
    #[serde(default)]
    pub batches: Value,
}

/// CSV 行（全部字段可缺失）
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCsvRow {
    #[serde(default)]
    pub product_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub location_id: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub barcode: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub batch_id: Option<String>,
    #[serde(default)]
    pub expiry_date: Option<String>,
    #[serde(default)]
    pub quantity: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub added_at: Option<String>,
}

/// JSON 文本/标识字段（字符串或数字，其余视为缺失）
///
/// 条码常以数字形式出现，按原样转成字符串
pub fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

