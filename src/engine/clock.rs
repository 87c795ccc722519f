// ==========================================
// 家庭库存保质期跟踪 - 时间源
// ==========================================
// 红线: 每次顶层计算只读取一次"今天"，随后以参数形式下传
// ==========================================

use chrono::NaiveDate;

/// 可注入的时间源
pub trait Clock: Send + Sync {
    /// 当前日历日（本地时区的当天起点）
    fn today(&self) -> NaiveDate;
}

/// 系统时钟（本地时区）
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().naive_local().date()
    }
}

/// 固定日期时钟（测试 / 回放）
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
