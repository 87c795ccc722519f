// ==========================================
// 家庭库存保质期跟踪 - 视图输出模型
// ==========================================
// 职责: 紧急列表 / 日历 / 统计 / 首页摘要的输出结构
// 红线: 只承载派生结果，不含计算逻辑
// ==========================================

use crate::domain::calendar::{DayKey, MonthKey};
use crate::domain::product::{Batch, ProductWithStatus};
use crate::domain::status::StatusAssessment;
use crate::domain::types::ExpiryStatus;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// ExpiryEntry - 单个批次的到期条目
// ==========================================
// 日历与"即将到期"列表共用；状态按该批次自身到期日判定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpiryEntry {
    pub product_id: String,
    pub product_name: String,
    pub category_name: Option<String>,
    pub expiry_date: NaiveDate,
    pub batch: Batch,
    pub status: StatusAssessment,
}

// ==========================================
// UrgentGroups - 紧急列表
// ==========================================
// 各组内保持"最早到期日升序"的排序结果；
// 状态随剩余天数单调，所以依次拼接三组即为整体排序
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UrgentGroups {
    pub expired: Vec<ProductWithStatus>,
    pub critical: Vec<ProductWithStatus>,
    pub warning: Vec<ProductWithStatus>,
}

impl UrgentGroups {
    pub fn total(&self) -> usize {
        self.expired.len() + self.critical.len() + self.warning.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// 按排序顺序遍历全部紧急产品
    pub fn iter(&self) -> impl Iterator<Item = &ProductWithStatus> {
        self.expired
            .iter()
            .chain(self.critical.iter())
            .chain(self.warning.iter())
    }
}

// ==========================================
// ExpiryCalendar - 按日历日分桶的批次
// ==========================================
// 稀疏映射: 没有条目的日期不出现
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpiryCalendar {
    pub days: BTreeMap<DayKey, Vec<ExpiryEntry>>,
}

impl ExpiryCalendar {
    /// 指定日期的条目（无条目返回空切片）
    pub fn entries_on(&self, key: DayKey) -> &[ExpiryEntry] {
        self.days.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// 指定日期的汇总状态
    ///
    /// 优先级: expired > critical > warning，否则 good；无条目返回 None
    pub fn day_status(&self, key: DayKey) -> Option<ExpiryStatus> {
        let entries = self.entries_on(key);
        if entries.is_empty() {
            return None;
        }

        let has = |s: ExpiryStatus| entries.iter().any(|e| e.status.status == s);
        if has(ExpiryStatus::Expired) {
            Some(ExpiryStatus::Expired)
        } else if has(ExpiryStatus::Critical) {
            Some(ExpiryStatus::Critical)
        } else if has(ExpiryStatus::Warning) {
            Some(ExpiryStatus::Warning)
        } else {
            Some(ExpiryStatus::Good)
        }
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

// ==========================================
// CalendarMonth - 月视图网格
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarCell {
    pub date: NaiveDate,
    pub key: DayKey,
    pub is_current_month: bool,
    pub is_today: bool,
    pub day_status: Option<ExpiryStatus>,
    pub entries: Vec<ExpiryEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarMonth {
    pub month: MonthKey,
    pub cells: Vec<CalendarCell>, // 6 行 x 7 列，周一开头
}

// ==========================================
// 统计
// ==========================================

/// 按状态计数（unknown 单独计数，不进四个标准桶）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub expired: usize,
    pub critical: usize,
    pub warning: usize,
    pub good: usize,
    pub unknown: usize,
}

impl StatusCounts {
    pub fn record(&mut self, status: ExpiryStatus) {
        match status {
            ExpiryStatus::Expired => self.expired += 1,
            ExpiryStatus::Critical => self.critical += 1,
            ExpiryStatus::Warning => self.warning += 1,
            ExpiryStatus::Good => self.good += 1,
            ExpiryStatus::Unknown => self.unknown += 1,
        }
    }

    pub fn get(&self, status: ExpiryStatus) -> usize {
        match status {
            ExpiryStatus::Expired => self.expired,
            ExpiryStatus::Critical => self.critical,
            ExpiryStatus::Warning => self.warning,
            ExpiryStatus::Good => self.good,
            ExpiryStatus::Unknown => self.unknown,
        }
    }

    /// 紧急合计: expired + critical + warning
    pub fn urgent(&self) -> usize {
        self.expired + self.critical + self.warning
    }
}

/// 各状态占产品总数的百分比（四舍五入到整数）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusPercentages {
    pub expired: u32,
    pub critical: u32,
    pub warning: u32,
    pub good: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyExpiryCount {
    pub month: MonthKey,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryStatistics {
    pub total_products: usize,
    pub by_status: StatusCounts,
    pub urgent: usize,
    pub percentages: StatusPercentages,
    pub avg_days_exact: Option<f64>,       // 平均剩余天数（精确值，无样本为 None）
    pub avg_days_to_expiry: i64,           // 平均剩余天数（四舍五入，无样本为 0）
    pub categories: Vec<CategoryCount>,    // 按数量降序
    pub monthly_trend: Vec<MonthlyExpiryCount>, // 最近 6 个月（含当月），时间升序
    pub upcoming: Vec<ExpiryEntry>,        // 最多 10 条，到期日升序
}

// ==========================================
// DashboardSummary - 首页摘要
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_products: usize,
    pub urgent_count: usize,
    pub expired_count: usize,
    pub critical_count: usize,
    pub action_count: usize, // 今日待处理 = expired + critical
    pub recent: Vec<ProductWithStatus>,
}
