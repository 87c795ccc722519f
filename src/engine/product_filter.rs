// ==========================================
// 家庭库存保质期跟踪 - 产品列表过滤
// ==========================================
// 规则: 名称包含关键字（忽略大小写）且 分类匹配 且 存放位置匹配
// 未设置的条件视为全部匹配
// ==========================================

use crate::domain::product::{NamedRef, Product};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFilter {
    pub query: Option<String>,
    pub category_id: Option<String>,
    pub location_id: Option<String>,
}

impl ProductFilter {
    pub fn matches(&self, product: &Product) -> bool {
        let matches_query = match self.query.as_deref().map(str::trim) {
            Some(q) if !q.is_empty() => product.name.to_lowercase().contains(&q.to_lowercase()),
            _ => true,
        };

        matches_query
            && ref_matches(self.category_id.as_deref(), product.category.as_ref())
            && ref_matches(self.location_id.as_deref(), product.location.as_ref())
    }

    /// 过滤（保持输入顺序）
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        products.iter().filter(|p| self.matches(p)).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.query.as_deref().map_or(true, |q| q.trim().is_empty())
            && self.category_id.as_deref().map_or(true, str::is_empty)
            && self.location_id.as_deref().map_or(true, str::is_empty)
    }
}

fn ref_matches(wanted: Option<&str>, actual: Option<&NamedRef>) -> bool {
    match wanted {
        Some(id) if !id.is_empty() => actual.map_or(false, |r| r.id == id),
        _ => true,
    }
}
