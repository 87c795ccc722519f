// ==========================================
// 家庭库存保质期跟踪 - API 层
// ==========================================
// 职责: 提供业务 API 接口，供 CLI / 展示层调用
// ==========================================

pub mod dto;
pub mod error;
pub mod inventory_api;

// 重导出核心类型
pub use dto::{BatchStatusDto, InventoryReport, ProductStatusDto};
pub use error::{ApiError, ApiResult};
pub use inventory_api::{InventoryApi, ViewContext};
