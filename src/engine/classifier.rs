// ==========================================
// 家庭库存保质期跟踪 - 到期状态判定引擎
// ==========================================
// 红线: 状态是"分级制"，不是评分制
// ==========================================
// 职责: 单个到期日 + 预警阈值 → 状态 + 剩余天数
// 输入: expiry_date (可缺失), warning_days, today
// 输出: StatusAssessment
// ==========================================

use crate::domain::status::StatusAssessment;
use crate::domain::types::ExpiryStatus;
use chrono::NaiveDate;

/// 临界区间（天），与预警阈值无关
pub const CRITICAL_DAYS: i64 = 3;

/// 未配置时的预警阈值（天）；判定器本身不做缺省处理
pub const DEFAULT_WARNING_DAYS: i64 = 14;

// ==========================================
// ExpiryClassifier - 到期状态判定
// ==========================================
pub struct ExpiryClassifier;

impl ExpiryClassifier {
    /// 判定单个到期日
    ///
    /// 规则（顺序执行，命中即返回）:
    /// 1) expiry_date 缺失 → Unknown（days_left = None）
    /// 2) days_left < 0 → Expired
    /// 3) days_left ≤ 3 → Critical（优先于预警区间，即使 warning_days < 3）
    /// 4) days_left ≤ warning_days → Warning
    /// 5) 其他 → Good
    ///
    /// 边界处理:
    /// - days_left == 3 为 Critical
    /// - days_left == warning_days 为 Warning
    /// - warning_days ≤ 3（含 0 / 负数）时预警区间塌缩，3 天以上一律 Good
    pub fn classify(
        expiry_date: Option<NaiveDate>,
        warning_days: i64,
        today: NaiveDate,
    ) -> StatusAssessment {
        let expiry = match expiry_date {
            Some(d) => d,
            None => return StatusAssessment::unknown(),
        };

        let days_left = Self::days_between(today, expiry);

        let status = if days_left < 0 {
            ExpiryStatus::Expired
        } else if days_left <= CRITICAL_DAYS {
            ExpiryStatus::Critical
        } else if days_left <= warning_days {
            ExpiryStatus::Warning
        } else {
            ExpiryStatus::Good
        };

        StatusAssessment {
            status,
            days_left: Some(days_left),
        }
    }

    /// 两个日历日之间的整日差（expiry - today）
    pub fn days_between(today: NaiveDate, expiry: NaiveDate) -> i64 {
        expiry.signed_duration_since(today).num_days()
    }
}
