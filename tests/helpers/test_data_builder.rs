// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use pantry_tracker::domain::product::{Batch, NamedRef, Product};
use pantry_tracker::domain::types::Provenance;

/// 固定"今天"（2026-01-17，周六）
pub fn fixed_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 17).unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// 相对固定"今天"的偏移日期
pub fn in_days(offset: i64) -> NaiveDate {
    fixed_today() + Duration::days(offset)
}

// ==========================================
// Product 构建器
// ==========================================

pub struct ProductBuilder {
    id: String,
    name: String,
    category: Option<NamedRef>,
    location: Option<NamedRef>,
    barcode: Option<String>,
    source: Provenance,
    batches: Vec<Batch>,
}

impl ProductBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: id.to_string(),
            category: None,
            location: None,
            barcode: None,
            source: Provenance::Manual,
            batches: Vec::new(),
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn category(mut self, id: &str, name: &str) -> Self {
        self.category = Some(NamedRef::new(id, name));
        self
    }

    pub fn location(mut self, id: &str, name: &str) -> Self {
        self.location = Some(NamedRef::new(id, name));
        self
    }

    pub fn barcode(mut self, barcode: &str) -> Self {
        self.barcode = Some(barcode.to_string());
        self
    }

    pub fn source(mut self, source: Provenance) -> Self {
        self.source = source;
        self
    }

    /// 追加批次（到期日 = 固定今天 + offset）
    pub fn batch_in(self, offset: i64, quantity: u32) -> Self {
        self.batch_on(Some(in_days(offset)), Some(quantity))
    }

    /// 追加无到期日批次
    pub fn batch_without_date(self, quantity: u32) -> Self {
        self.batch_on(None, Some(quantity))
    }

    /// 追加任意批次
    pub fn batch_on(mut self, expiry_date: Option<NaiveDate>, quantity: Option<u32>) -> Self {
        let seq = self.batches.len() + 1;
        self.batches.push(Batch {
            id: format!("{}_b{}", self.id, seq),
            expiry_date,
            quantity,
            unit: None,
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 8, 0, 0).unwrap(),
        });
        self
    }

    pub fn build(self) -> Product {
        Product {
            id: self.id,
            name: self.name,
            category: self.category,
            location: self.location,
            barcode: self.barcode,
            batches: self.batches,
            source: self.source,
        }
    }
}
