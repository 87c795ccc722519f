// ==========================================
// 家庭库存保质期跟踪 - 快照导入层
// ==========================================
// 职责: JSON / CSV 快照 → 领域对象
// 红线: 记录级问题只降级（日期 → 缺失，数量 → 0），不报错；
//       只有整个文件不可读/不可解析时才返回错误
// ==========================================

pub mod lenient;
pub mod raw_record;
pub mod snapshot_importer;

use thiserror::Error;

pub use lenient::{parse_expiry_date, parse_quantity, parse_timestamp};
pub use raw_record::{RawBatchRecord, RawCsvRow, RawNamedRef, RawProductRecord};
pub use snapshot_importer::{ImportReport, SnapshotFormat, SnapshotImporter};

/// 导入层错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("不支持的快照格式: {0}")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON 解析失败: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV 解析失败: {0}")]
    Csv(#[from] csv::Error),
}
