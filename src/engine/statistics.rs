// ==========================================
// 家庭库存保质期跟踪 - 统计引擎
// ==========================================
// 职责:
// 1. 按状态计数（unknown 单独计数）+ 百分比
// 2. 平均剩余天数（仅 days_left ≥ 0 的产品）
// 3. 分类分布（降序）
// 4. 近 6 个月批次到期趋势（含当月）
// 5. 即将到期列表（今天前 7 天起，升序，最多 10 条）
// ==========================================

use crate::domain::calendar::MonthKey;
use crate::domain::product::Product;
use crate::domain::views::{
    CategoryCount, ExpiryEntry, InventoryStatistics, MonthlyExpiryCount, StatusCounts,
    StatusPercentages,
};
use crate::engine::calendar::expiry_entries;
use crate::engine::projector::StatusProjector;
use crate::i18n;
use chrono::{Duration, NaiveDate};
use std::collections::HashMap;
use tracing::{debug, instrument};

/// 未分类产品分类名的翻译键
pub const UNCATEGORIZED_KEY: &str = "category.uncategorized";

/// 趋势月数（含当月）
pub const TREND_MONTHS: u32 = 6;

/// 即将到期列表回看天数（含已过期一周内）
pub const UPCOMING_LOOKBACK_DAYS: i64 = 7;

/// 即将到期列表上限
pub const UPCOMING_LIMIT: usize = 10;

#[derive(Debug, Clone)]
pub struct StatisticsEngine {
    projector: StatusProjector,
    uncategorized_label: String,
}

impl Default for StatisticsEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl StatisticsEngine {
    /// 默认语言（hu）
    pub fn new() -> Self {
        Self::with_locale(i18n::DEFAULT_LOCALE)
    }

    /// 分类分布中的“未分类”名称按指定语言显示
    pub fn with_locale(locale: &str) -> Self {
        Self {
            projector: StatusProjector::new(),
            uncategorized_label: i18n::t_in(UNCATEGORIZED_KEY, locale),
        }
    }

    pub fn uncategorized_label(&self) -> &str {
        &self.uncategorized_label
    }

    /// 计算全部统计
    #[instrument(skip(self, products), fields(count = products.len()))]
    pub fn compute(
        &self,
        products: &[Product],
        warning_days: i64,
        today: NaiveDate,
    ) -> InventoryStatistics {
        let mut by_status = StatusCounts::default();
        let mut days_sum: i64 = 0;
        let mut days_samples: i64 = 0;

        for projected in self.projector.project_all(products, warning_days, today) {
            by_status.record(projected.status.status);

            if let Some(days_left) = projected.status.days_left {
                if days_left >= 0 {
                    days_sum += days_left;
                    days_samples += 1;
                }
            }
        }

        let total_products = products.len();
        let (avg_days_exact, avg_days_to_expiry) = average_days(days_sum, days_samples);

        debug!(
            total_products,
            urgent = by_status.urgent(),
            days_samples,
            "状态统计完成"
        );

        InventoryStatistics {
            total_products,
            by_status,
            urgent: by_status.urgent(),
            percentages: status_percentages(&by_status, total_products),
            avg_days_exact,
            avg_days_to_expiry,
            categories: self.category_distribution(products),
            monthly_trend: self.monthly_trend(products, today),
            upcoming: self.upcoming(products, warning_days, today),
        }
    }

    /// 分类分布: 按产品数降序，同数保持首次出现顺序
    pub fn category_distribution(&self, products: &[Product]) -> Vec<CategoryCount> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut counts: Vec<CategoryCount> = Vec::new();

        for product in products {
            let name = product
                .category_name()
                .unwrap_or(self.uncategorized_label.as_str());
            match index.get(name) {
                Some(&i) => counts[i].count += 1,
                None => {
                    index.insert(name, counts.len());
                    counts.push(CategoryCount {
                        name: name.to_string(),
                        count: 1,
                    });
                }
            }
        }

        counts.sort_by(|a, b| b.count.cmp(&a.count));
        counts
    }

    /// 近 6 个月（含当月）批次到期数量，与状态无关
    pub fn monthly_trend(&self, products: &[Product], today: NaiveDate) -> Vec<MonthlyExpiryCount> {
        let current = MonthKey::from(today);

        (0..TREND_MONTHS)
            .rev()
            .filter_map(|back| current.months_back(back))
            .map(|month| {
                let count = products
                    .iter()
                    .flat_map(|p| p.batches.iter())
                    .filter_map(|b| b.expiry_date)
                    .filter(|d| month.contains(*d))
                    .count();
                MonthlyExpiryCount { month, count }
            })
            .collect()
    }

    /// 即将到期: 到期日 ≥ today-7 的批次，升序（稳定），取前 10 条
    pub fn upcoming(
        &self,
        products: &[Product],
        warning_days: i64,
        today: NaiveDate,
    ) -> Vec<ExpiryEntry> {
        let cutoff = today - Duration::days(UPCOMING_LOOKBACK_DAYS);

        let mut entries: Vec<ExpiryEntry> = expiry_entries(products, warning_days, today)
            .filter(|e| e.expiry_date >= cutoff)
            .collect();

        entries.sort_by_key(|e| e.expiry_date);
        entries.truncate(UPCOMING_LIMIT);
        entries
    }
}

/// 平均剩余天数: (精确值，四舍五入值)
///
/// 四舍五入为"半数进一"（3.5 → 4）；无样本返回 (None, 0)
pub fn average_days(sum: i64, samples: i64) -> (Option<f64>, i64) {
    if samples <= 0 {
        return (None, 0);
    }
    let exact = sum as f64 / samples as f64;
    let rounded = (2 * sum + samples).div_euclid(2 * samples);
    (Some(exact), rounded)
}

/// 状态百分比: round_half_up(count / total * 100)，total 为 0 时按 1 计
pub fn status_percentages(counts: &StatusCounts, total: usize) -> StatusPercentages {
    let total = total.max(1);
    let pct = |count: usize| -> u32 { ((count * 200 + total) / (2 * total)) as u32 };

    StatusPercentages {
        expired: pct(counts.expired),
        critical: pct(counts.critical),
        warning: pct(counts.warning),
        good: pct(counts.good),
    }
}
