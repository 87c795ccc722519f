// ==========================================
// 家庭库存保质期跟踪 - 首页摘要
// ==========================================
// 职责: 总数 / 紧急 / 已过期 / 临界 / 今日待处理 + 最近录入产品
// 约定: 输入按创建时间倒序（持久化协作方的默认排序）
// ==========================================

use crate::domain::product::Product;
use crate::domain::types::ExpiryStatus;
use crate::domain::views::DashboardSummary;
use crate::engine::projector::StatusProjector;
use chrono::NaiveDate;
use tracing::instrument;

/// 最近产品条数
pub const RECENT_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, Default)]
pub struct DashboardEngine {
    projector: StatusProjector,
}

impl DashboardEngine {
    pub fn new() -> Self {
        Self {
            projector: StatusProjector::new(),
        }
    }

    #[instrument(skip(self, products), fields(count = products.len()))]
    pub fn summarize(
        &self,
        products: &[Product],
        warning_days: i64,
        today: NaiveDate,
    ) -> DashboardSummary {
        let projected = self.projector.project_all(products, warning_days, today);

        let count_of = |status: ExpiryStatus| {
            projected
                .iter()
                .filter(|p| p.status.status == status)
                .count()
        };
        let expired_count = count_of(ExpiryStatus::Expired);
        let critical_count = count_of(ExpiryStatus::Critical);
        let urgent_count = projected.iter().filter(|p| p.status.status.is_urgent()).count();

        let recent = projected.iter().take(RECENT_LIMIT).cloned().collect();

        DashboardSummary {
            total_products: products.len(),
            urgent_count,
            expired_count,
            critical_count,
            action_count: expired_count + critical_count,
            recent,
        }
    }
}
