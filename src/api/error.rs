// ==========================================
// 家庭库存保质期跟踪 - API层错误类型
// ==========================================
// 职责: 汇总配置层/导入层错误，转换为调用方可读的错误消息
// 红线: 引擎层本身不产生错误，这里只承载外围失败
// ==========================================

use crate::config::ConfigError;
use crate::domain::draft::DraftError;
use crate::importer::ImportError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 输入错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("产品草稿校验失败: {0}")]
    DraftRejected(#[from] DraftError),

    // ==========================================
    // 外围协作方错误
    // ==========================================
    #[error("配置读取失败: {0}")]
    Config(#[from] ConfigError),

    #[error("快照导入失败: {0}")]
    Import(#[from] ImportError),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// API层结果类型
pub type ApiResult<T> = Result<T, ApiError>;
