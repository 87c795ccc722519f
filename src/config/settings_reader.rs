// ==========================================
// 家庭库存保质期跟踪 - 用户设置读取 Trait
// ==========================================
// 职责: 定义 API 层所需的设置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::config::ConfigError;
use async_trait::async_trait;

// ==========================================
// SettingsReader Trait
// ==========================================
// 用途: 解析用户的预警阈值与语言
// 实现者: ConfigManager（从 config_kv 表读取）
#[async_trait]
pub trait SettingsReader: Send + Sync {
    /// 获取用户的到期预警天数
    ///
    /// # 返回
    /// - i64: 正整数天数
    ///
    /// # 默认值
    /// - 14（未设置、非数字或 ≤ 0 均回退）
    async fn get_warning_days(&self, user_id: &str) -> Result<i64, ConfigError>;

    /// 获取用户界面语言
    ///
    /// # 默认值
    /// - hu
    async fn get_locale(&self, user_id: &str) -> Result<String, ConfigError>;
}
