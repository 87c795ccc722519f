// ==========================================
// 家庭库存保质期跟踪 - 配置管理器
// ==========================================
// 职责: 用户设置加载、查询、覆写
// 存储: config_kv 表 (scope_id + key → value)
// 解析顺序: 用户 scope → global scope → 内置默认值
// ==========================================

use crate::config::settings_reader::SettingsReader;
use crate::config::ConfigError;
use crate::db::{configure_sqlite_connection, ensure_config_schema, open_sqlite_connection};
use crate::engine::classifier::DEFAULT_WARNING_DAYS;
use crate::i18n;
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, warn};

/// 全局 scope
pub const GLOBAL_SCOPE: &str = "global";

/// 默认界面语言
pub const DEFAULT_LOCALE: &str = i18n::DEFAULT_LOCALE;

pub mod config_keys {
    pub const EXPIRY_WARNING_DAYS: &str = "expiry_warning_days";
    pub const LOCALE: &str = "locale";

    pub const ALL: [&str; 2] = [EXPIRY_WARNING_DAYS, LOCALE];
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例（自动建表）
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> Result<Self, ConfigError> {
        let conn = open_sqlite_connection(db_path)?;
        ensure_config_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明: 会对传入连接再次应用统一 PRAGMA 与建表（幂等）
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, ConfigError> {
        {
            let guard = lock(&conn)?;
            configure_sqlite_connection(&guard)?;
            ensure_config_schema(&guard)?;
        }

        Ok(Self { conn })
    }

    /// 读取指定 scope 的配置值
    pub fn get_config_value(&self, scope_id: &str, key: &str) -> Result<Option<String>, ConfigError> {
        let conn = lock(&self.conn)?;
        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE scope_id = ?1 AND key = ?2",
                params![scope_id, key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    /// 按 用户 → global 顺序解析配置值
    pub fn resolve_config_value(&self, user_id: &str, key: &str) -> Result<Option<String>, ConfigError> {
        if let Some(value) = self.get_config_value(user_id, key)? {
            return Ok(Some(value));
        }
        self.get_config_value(GLOBAL_SCOPE, key)
    }

    /// 写入配置值（存在则覆盖）
    pub fn set_config_value(&self, scope_id: &str, key: &str, value: &str) -> Result<(), ConfigError> {
        let conn = lock(&self.conn)?;
        conn.execute(
            r#"
            INSERT INTO config_kv (scope_id, key, value, updated_at)
            VALUES (?1, ?2, ?3, datetime('now'))
            ON CONFLICT(scope_id, key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
            params![scope_id, key, value],
        )?;
        debug!(scope_id, key, value, "配置已写入");
        Ok(())
    }

    /// 删除配置值（回退到上一级）
    pub fn remove_config_value(&self, scope_id: &str, key: &str) -> Result<bool, ConfigError> {
        let conn = lock(&self.conn)?;
        let affected = conn.execute(
            "DELETE FROM config_kv WHERE scope_id = ?1 AND key = ?2",
            params![scope_id, key],
        )?;
        Ok(affected > 0)
    }

    /// 设置用户预警天数（必须为正整数）
    pub fn set_warning_days(&self, user_id: &str, days: i64) -> Result<(), ConfigError> {
        if days <= 0 {
            return Err(ConfigError::InvalidValue {
                key: config_keys::EXPIRY_WARNING_DAYS.to_string(),
                value: days.to_string(),
                reason: "预警天数必须为正整数".to_string(),
            });
        }
        self.set_config_value(user_id, config_keys::EXPIRY_WARNING_DAYS, &days.to_string())
    }

    /// 设置用户界面语言（仅接受已提供翻译的语言）
    pub fn set_locale(&self, user_id: &str, locale: &str) -> Result<(), ConfigError> {
        let locale = locale.trim();
        if locale.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: config_keys::LOCALE.to_string(),
                value: String::new(),
                reason: "语言代码不能为空".to_string(),
            });
        }
        if !i18n::is_supported(locale) {
            return Err(ConfigError::InvalidValue {
                key: config_keys::LOCALE.to_string(),
                value: locale.to_string(),
                reason: format!("不支持的语言，可选: {}", i18n::SUPPORTED_LOCALES.join(", ")),
            });
        }
        self.set_config_value(user_id, config_keys::LOCALE, locale)
    }

    /// 获取用户生效配置的快照（JSON）
    ///
    /// # 用途
    /// - 诊断输出 / 报表附带配置
    pub fn get_config_snapshot(&self, user_id: &str) -> Result<String, ConfigError> {
        let mut effective: BTreeMap<&str, String> = BTreeMap::new();
        for key in config_keys::ALL {
            if let Some(value) = self.resolve_config_value(user_id, key)? {
                effective.insert(key, value);
            }
        }

        let snapshot = json!({
            "user_id": user_id,
            "values": effective,
        });
        Ok(serde_json::to_string(&snapshot)?)
    }
}

#[async_trait]
impl SettingsReader for ConfigManager {
    async fn get_warning_days(&self, user_id: &str) -> Result<i64, ConfigError> {
        let raw = self.resolve_config_value(user_id, config_keys::EXPIRY_WARNING_DAYS)?;
        Ok(parse_warning_days(raw.as_deref()))
    }

    async fn get_locale(&self, user_id: &str) -> Result<String, ConfigError> {
        let raw = self.resolve_config_value(user_id, config_keys::LOCALE)?;
        Ok(parse_locale(raw.as_deref()))
    }
}

/// 解析界面语言: 缺失、空白或未提供翻译 → hu
pub fn parse_locale(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        None | Some("") => DEFAULT_LOCALE.to_string(),
        Some(s) if i18n::is_supported(s) => s.to_string(),
        Some(s) => {
            warn!(value = s, "语言配置不受支持，使用默认值 {}", DEFAULT_LOCALE);
            DEFAULT_LOCALE.to_string()
        }
    }
}

/// 解析预警天数: 缺失、非数字或 ≤ 0 → 14
pub fn parse_warning_days(raw: Option<&str>) -> i64 {
    match raw.map(str::trim) {
        None => DEFAULT_WARNING_DAYS,
        Some(s) => match s.parse::<i64>() {
            Ok(days) if days > 0 => days,
            _ => {
                warn!(value = s, "预警天数配置非法，使用默认值 {}", DEFAULT_WARNING_DAYS);
                DEFAULT_WARNING_DAYS
            }
        },
    }
}

fn lock(conn: &Arc<Mutex<Connection>>) -> Result<MutexGuard<'_, Connection>, ConfigError> {
    conn.lock()
        .map_err(|e| ConfigError::LockPoisoned(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_memory() -> ConfigManager {
        let conn = Connection::open_in_memory().unwrap();
        ConfigManager::from_connection(Arc::new(Mutex::new(conn))).unwrap()
    }

    #[test]
    fn test_parse_warning_days() {
        assert_eq!(parse_warning_days(None), 14);
        assert_eq!(parse_warning_days(Some("7")), 7);
        assert_eq!(parse_warning_days(Some(" 21 ")), 21);
        assert_eq!(parse_warning_days(Some("0")), 14);
        assert_eq!(parse_warning_days(Some("-3")), 14);
        assert_eq!(parse_warning_days(Some("abc")), 14);
    }

    #[test]
    fn test_user_scope_overrides_global() {
        let config = in_memory();
        config
            .set_config_value(GLOBAL_SCOPE, config_keys::EXPIRY_WARNING_DAYS, "10")
            .unwrap();
        config.set_warning_days("u1", 5).unwrap();

        assert_eq!(
            config
                .resolve_config_value("u1", config_keys::EXPIRY_WARNING_DAYS)
                .unwrap()
                .as_deref(),
            Some("5")
        );
        assert_eq!(
            config
                .resolve_config_value("u2", config_keys::EXPIRY_WARNING_DAYS)
                .unwrap()
                .as_deref(),
            Some("10")
        );
    }

    #[test]
    fn test_set_warning_days_rejects_non_positive() {
        let config = in_memory();
        assert!(matches!(
            config.set_warning_days("u1", 0),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(config.set_warning_days("u1", -1).is_err());
    }

    #[test]
    fn test_parse_locale() {
        assert_eq!(parse_locale(None), "hu");
        assert_eq!(parse_locale(Some("  ")), "hu");
        assert_eq!(parse_locale(Some(" en ")), "en");
        assert_eq!(parse_locale(Some("zh-CN")), "zh-CN");
        assert_eq!(parse_locale(Some("de")), "hu");
    }

    #[test]
    fn test_set_locale_rejects_unsupported() {
        let config = in_memory();
        assert!(matches!(
            config.set_locale("u1", "de"),
            Err(ConfigError::InvalidValue { .. })
        ));
        // 拒绝后不写入任何值
        assert_eq!(config.get_config_value("u1", config_keys::LOCALE).unwrap(), None);

        config.set_locale("u1", " zh-CN ").unwrap();
        assert_eq!(
            config.get_config_value("u1", config_keys::LOCALE).unwrap().as_deref(),
            Some("zh-CN")
        );
    }

    #[test]
    fn test_remove_falls_back() {
        let config = in_memory();
        config.set_locale("u1", "en").unwrap();
        assert!(config.remove_config_value("u1", config_keys::LOCALE).unwrap());
        assert!(!config.remove_config_value("u1", config_keys::LOCALE).unwrap());
        assert_eq!(config.get_config_value("u1", config_keys::LOCALE).unwrap(), None);
    }

    #[test]
    fn test_snapshot_contains_effective_values() {
        let config = in_memory();
        config.set_warning_days("u1", 9).unwrap();
        let snapshot: serde_json::Value =
            serde_json::from_str(&config.get_config_snapshot("u1").unwrap()).unwrap();
        assert_eq!(snapshot["user_id"], "u1");
        assert_eq!(snapshot["values"]["expiry_warning_days"], "9");
        assert!(snapshot["values"].get("locale").is_none());
    }
}
