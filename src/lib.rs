// ==========================================
// 家庭库存保质期跟踪 - 核心库
// ==========================================
// 技术栈: Rust + SQLite（设置存储）
// 系统定位: 到期状态派生 + 批次聚合 + 集合视图（纯计算核心）
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 到期规则与视图
pub mod engine;

// 导入层 - 库存快照
pub mod importer;

// 配置层 - 用户设置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{ExpiryStatus, Provenance, StatusColor};

// 领域实体
pub use domain::{
    Batch, DayKey, MonthKey, NamedRef, Product, ProductDraft, ProductWithStatus,
    StatusAssessment,
};

// 引擎
pub use engine::{
    BatchAggregator, CalendarView, Clock, DashboardEngine, ExpiryClassifier, FixedClock,
    ProductFilter, StatisticsEngine, StatusProjector, SystemClock, UrgentListView,
};

// API
pub use api::{ApiError, ApiResult, InventoryApi, InventoryReport};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "pantry-tracker";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert_eq!(APP_NAME, "pantry-tracker");
    }
}
