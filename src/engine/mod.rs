// ==========================================
// 家庭库存保质期跟踪 - 引擎层
// ==========================================
// 职责: 到期状态派生 + 批次聚合 + 集合视图
// 红线: 纯计算，不做 I/O；"今天"由调用方读取一次后下传
// ==========================================

pub mod batch_aggregator;
pub mod calendar;
pub mod classifier;
pub mod clock;
pub mod dashboard;
pub mod product_filter;
pub mod projector;
pub mod statistics;
pub mod urgent_list;

// 重导出核心引擎
pub use batch_aggregator::BatchAggregator;
pub use calendar::{expiry_entries, CalendarView};
pub use classifier::{ExpiryClassifier, CRITICAL_DAYS, DEFAULT_WARNING_DAYS};
pub use clock::{Clock, FixedClock, SystemClock};
pub use dashboard::DashboardEngine;
pub use product_filter::ProductFilter;
pub use projector::StatusProjector;
pub use statistics::{StatisticsEngine, UNCATEGORIZED_KEY};
pub use urgent_list::{sort_by_earliest_expiry, UrgentListView};
