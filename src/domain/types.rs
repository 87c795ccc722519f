// ==========================================
// 家庭库存保质期跟踪 - 领域类型定义
// ==========================================
// 红线: 状态是"分级制"封闭枚举，不是字符串标签
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 到期状态 (Expiry Status)
// ==========================================
// 派生值，不落库；由批次到期日 + 预警阈值计算
// 顺序: Expired < Critical < Warning < Good < Unknown (按紧急程度递减)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpiryStatus {
    Expired,  // 已过期
    Critical, // 3 天内到期
    Warning,  // 预警阈值内到期
    Good,     // 正常
    Unknown,  // 无到期日
}

impl ExpiryStatus {
    /// 全部状态（固定顺序）
    pub const ALL: [ExpiryStatus; 5] = [
        ExpiryStatus::Expired,
        ExpiryStatus::Critical,
        ExpiryStatus::Warning,
        ExpiryStatus::Good,
        ExpiryStatus::Unknown,
    ];

    /// 是否属于"紧急"列表（已过期 / 临界 / 预警）
    pub fn is_urgent(&self) -> bool {
        matches!(
            self,
            ExpiryStatus::Expired | ExpiryStatus::Critical | ExpiryStatus::Warning
        )
    }

    /// 稳定的小写标识（与序列化一致）
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpiryStatus::Expired => "expired",
            ExpiryStatus::Critical => "critical",
            ExpiryStatus::Warning => "warning",
            ExpiryStatus::Good => "good",
            ExpiryStatus::Unknown => "unknown",
        }
    }

    /// 翻译键（locales/*.yml 中的 status.*）
    pub fn label_key(&self) -> &'static str {
        match self {
            ExpiryStatus::Expired => "status.expired",
            ExpiryStatus::Critical => "status.critical",
            ExpiryStatus::Warning => "status.warning",
            ExpiryStatus::Good => "status.good",
            ExpiryStatus::Unknown => "status.unknown",
        }
    }

    /// 指定语言下的显示标签
    pub fn label_in(&self, locale: &str) -> String {
        crate::i18n::t_in(self.label_key(), locale)
    }

    /// 展示颜色
    pub fn color(&self) -> StatusColor {
        match self {
            ExpiryStatus::Expired | ExpiryStatus::Critical => StatusColor::Red,
            ExpiryStatus::Warning => StatusColor::Yellow,
            ExpiryStatus::Good => StatusColor::Green,
            ExpiryStatus::Unknown => StatusColor::Gray,
        }
    }
}

impl fmt::Display for ExpiryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 状态颜色 (Status Color)
// ==========================================
// 展示层只读取此值，不得自行根据天数着色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusColor {
    Red,
    Yellow,
    Green,
    Gray,
}

impl fmt::Display for StatusColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusColor::Red => write!(f, "red"),
            StatusColor::Yellow => write!(f, "yellow"),
            StatusColor::Green => write!(f, "green"),
            StatusColor::Gray => write!(f, "gray"),
        }
    }
}

// ==========================================
// 数据来源 (Provenance)
// ==========================================
// 标记产品初始数据的获取方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    #[default]
    Manual,  // 手工录入
    Learned, // 历史学习
    Api,     // 外部商品库
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

impl Provenance {
    /// 从字符串解析来源（未知值回退为 Manual）
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "learned" => Provenance::Learned,
            "api" => Provenance::Api,
            _ => Provenance::Manual,
        }
    }

    /// 转换为存储字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Provenance::Manual => "manual",
            Provenance::Learned => "learned",
            Provenance::Api => "api",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urgent_membership() {
        assert!(ExpiryStatus::Expired.is_urgent());
        assert!(ExpiryStatus::Critical.is_urgent());
        assert!(ExpiryStatus::Warning.is_urgent());
        assert!(!ExpiryStatus::Good.is_urgent());
        assert!(!ExpiryStatus::Unknown.is_urgent());
    }

    #[test]
    fn test_status_colors() {
        assert_eq!(ExpiryStatus::Expired.color(), StatusColor::Red);
        assert_eq!(ExpiryStatus::Critical.color(), StatusColor::Red);
        assert_eq!(ExpiryStatus::Warning.color(), StatusColor::Yellow);
        assert_eq!(ExpiryStatus::Good.color(), StatusColor::Green);
        assert_eq!(ExpiryStatus::Unknown.color(), StatusColor::Gray);
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&ExpiryStatus::Critical).unwrap();
        assert_eq!(json, "\"critical\"");
        let parsed: ExpiryStatus = serde_json::from_str("\"good\"").unwrap();
        assert_eq!(parsed, ExpiryStatus::Good);
    }

    #[test]
    fn test_localized_labels() {
        assert_eq!(ExpiryStatus::Warning.label_in("hu"), "Figyelem");
        assert_eq!(ExpiryStatus::Good.label_in("en"), "OK");
        assert_eq!(ExpiryStatus::Unknown.label_key(), "status.unknown");
    }

    #[test]
    fn test_provenance_from_str() {
        assert_eq!(Provenance::from_str("learned"), Provenance::Learned);
        assert_eq!(Provenance::from_str("API"), Provenance::Api);
        assert_eq!(Provenance::from_str("manual"), Provenance::Manual);
        assert_eq!(Provenance::from_str("whatever"), Provenance::Manual);
    }
}
