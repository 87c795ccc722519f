// ==========================================
// 家庭库存保质期跟踪 - 日历键
// ==========================================
// 红线: 内部分桶用复合键 (年，月，日)，不拼字符串、不用时间戳
// ==========================================

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// DayKey - 日历日键
// ==========================================
// month 为 1 起始；展示层需要 0 起始月份时使用 zero_based_month()
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DayKey {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl DayKey {
    pub fn zero_based_month(&self) -> u32 {
        self.month.saturating_sub(1)
    }

    /// 还原为日期（键总是由合法日期构造，非法组合返回 None）
    pub fn to_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }

    pub fn month_key(&self) -> MonthKey {
        MonthKey {
            year: self.year,
            month: self.month,
        }
    }
}

impl From<NaiveDate> for DayKey {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        }
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

// ==========================================
// MonthKey - 日历月键
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn zero_based_month(&self) -> u32 {
        self.month.saturating_sub(1)
    }

    /// 当月 1 日
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// 向前回退 n 个月
    pub fn months_back(&self, n: u32) -> Option<MonthKey> {
        self.first_day()
            .and_then(|d| d.checked_sub_months(Months::new(n)))
            .map(MonthKey::from)
    }

    /// 是否包含该日期
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl From<NaiveDate> for MonthKey {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
