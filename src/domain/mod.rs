// ==========================================
// 家庭库存保质期跟踪 - 领域模型层
// ==========================================
// 职责: 定义领域实体、封闭类型、视图输出结构
// 红线: 不含数据访问逻辑，不含引擎逻辑
// ==========================================

pub mod calendar;
pub mod draft;
pub mod product;
pub mod status;
pub mod types;
pub mod views;

// 重导出核心类型
pub use calendar::{DayKey, MonthKey};
pub use draft::{BatchDraft, DraftError, ProductDraft};
pub use product::{
    generate_batch_id, Batch, BatchWithStatus, NamedRef, Product, ProductWithStatus, DEFAULT_UNIT,
};
pub use status::StatusAssessment;
pub use types::{ExpiryStatus, Provenance, StatusColor};
pub use views::{
    CalendarCell, CalendarMonth, CategoryCount, DashboardSummary, ExpiryCalendar, ExpiryEntry,
    InventoryStatistics, MonthlyExpiryCount, StatusCounts, StatusPercentages, UrgentGroups,
};
