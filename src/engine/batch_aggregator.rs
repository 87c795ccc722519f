// ==========================================
// 家庭库存保质期跟踪 - 批次聚合
// ==========================================
// 职责: 最早到期日 + 数量合计
// 红线: 无到期日的批次不参与到期计算，但计入数量合计
// ==========================================

use crate::domain::product::Batch;
use chrono::NaiveDate;

pub struct BatchAggregator;

impl BatchAggregator {
    /// 最早到期日
    ///
    /// - 空列表或全部批次无到期日 → None
    /// - 相同日期取先出现者（结果为日期值，不影响输出）
    pub fn earliest_expiry(batches: &[Batch]) -> Option<NaiveDate> {
        batches
            .iter()
            .filter_map(|b| b.expiry_date)
            .reduce(|earliest, d| if d < earliest { d } else { earliest })
    }

    /// 数量合计（缺失数量视为 0）
    pub fn total_quantity(batches: &[Batch]) -> u64 {
        batches.iter().map(Batch::effective_quantity).sum()
    }
}
