// ==========================================
// 家庭库存保质期跟踪 - 状态判定结果
// ==========================================

use crate::domain::types::{ExpiryStatus, StatusColor};
use serde::{Deserialize, Serialize};

/// 单个到期日的判定结果
///
/// - `days_left`: 到期日与当天之间的整日差（已过期为负，今天到期为 0）
/// - `Unknown` 时 `days_left` 恒为 None
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusAssessment {
    pub status: ExpiryStatus,
    pub days_left: Option<i64>,
}

impl StatusAssessment {
    /// 无到期日
    pub fn unknown() -> Self {
        Self {
            status: ExpiryStatus::Unknown,
            days_left: None,
        }
    }

    pub fn color(&self) -> StatusColor {
        self.status.color()
    }
}
