// ==========================================
// 家庭库存保质期跟踪 - 紧急列表视图
// ==========================================
// 职责: 过滤 expired/critical/warning → 按最早到期日升序 → 分三组
// 排序: 无到期日排最后；相等时保持输入顺序（稳定排序）
// ==========================================

use crate::domain::product::{Product, ProductWithStatus};
use crate::domain::types::ExpiryStatus;
use crate::domain::views::UrgentGroups;
use crate::engine::projector::StatusProjector;
use chrono::NaiveDate;
use std::cmp::Ordering;
use tracing::{debug, instrument};

#[derive(Debug, Clone, Copy, Default)]
pub struct UrgentListView {
    projector: StatusProjector,
}

impl UrgentListView {
    pub fn new() -> Self {
        Self {
            projector: StatusProjector::new(),
        }
    }

    /// 构建紧急列表
    #[instrument(skip(self, products), fields(count = products.len()))]
    pub fn build(&self, products: &[Product], warning_days: i64, today: NaiveDate) -> UrgentGroups {
        let mut urgent: Vec<ProductWithStatus> = self
            .projector
            .project_all(products, warning_days, today)
            .into_iter()
            .filter(|p| p.status.status.is_urgent())
            .collect();

        sort_by_earliest_expiry(&mut urgent);

        let mut groups = UrgentGroups::default();
        for item in urgent {
            match item.status.status {
                ExpiryStatus::Expired => groups.expired.push(item),
                ExpiryStatus::Critical => groups.critical.push(item),
                ExpiryStatus::Warning => groups.warning.push(item),
                ExpiryStatus::Good | ExpiryStatus::Unknown => {}
            }
        }

        debug!(
            expired = groups.expired.len(),
            critical = groups.critical.len(),
            warning = groups.warning.len(),
            "紧急列表构建完成"
        );
        groups
    }
}

/// 按最早到期日升序（None 排最后，稳定）
pub fn sort_by_earliest_expiry(items: &mut [ProductWithStatus]) {
    items.sort_by(|a, b| compare_optional_dates(a.earliest_expiry, b.earliest_expiry));
}

fn compare_optional_dates(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
