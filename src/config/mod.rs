// ==========================================
// 家庭库存保质期跟踪 - 配置层
// ==========================================
// 职责: 用户设置管理，支持 用户 → global 两级覆写
// 存储: config_kv 表
// ==========================================

pub mod config_manager;
pub mod settings_reader;

use thiserror::Error;

// 重导出核心配置管理器
pub use config_manager::{
    config_keys, parse_locale, parse_warning_days, ConfigManager, DEFAULT_LOCALE, GLOBAL_SCOPE,
};
pub use settings_reader::SettingsReader;

/// 配置层错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置存储错误: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("配置锁获取失败: {0}")]
    LockPoisoned(String),

    #[error("配置值非法 (key={key}, value={value}): {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    #[error("配置序列化失败: {0}")]
    Serialization(#[from] serde_json::Error),
}
