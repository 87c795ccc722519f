// ==========================================
// ConfigManager 集成测试
// ==========================================
// 测试目标: 验证用户设置的存储、覆写与回退
// ==========================================


use pantry_tracker::config::{config_keys, ConfigError, ConfigManager, SettingsReader, GLOBAL_SCOPE};
use test_helpers::{create_test_db, insert_raw_config, open_test_connection};

#[tokio::test]
async fn test_config_manager_creation() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");

    let config_manager = ConfigManager::new(&db_path);
    assert!(
        config_manager.is_ok(),
        "ConfigManager should be created successfully"
    );
}

#[tokio::test]
async fn test_defaults_when_nothing_stored() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let config_manager = ConfigManager::new(&db_path).expect("Failed to create ConfigManager");

    assert_eq!(config_manager.get_warning_days("u1").await.unwrap(), 14);
    assert_eq!(config_manager.get_locale("u1").await.unwrap(), "hu");
}

#[tokio::test]
async fn test_user_scope_then_global_fallback() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let config_manager = ConfigManager::new(&db_path).expect("Failed to create ConfigManager");

    config_manager.set_warning_days(GLOBAL_SCOPE, 10).unwrap();
    config_manager.set_warning_days("u1", 5).unwrap();

    assert_eq!(config_manager.get_warning_days("u1").await.unwrap(), 5);
    assert_eq!(config_manager.get_warning_days("u2").await.unwrap(), 10);

    // 删除用户覆写后回退到 global
    let removed = config_manager
        .remove_config_value("u1", config_keys::EXPIRY_WARNING_DAYS)
        .unwrap();
    assert!(removed);
    assert_eq!(config_manager.get_warning_days("u1").await.unwrap(), 10);
}

#[tokio::test]
async fn test_invalid_stored_threshold_falls_back_to_default() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = open_test_connection(&db_path).expect("Failed to open db");
    insert_raw_config(&conn, "zero", config_keys::EXPIRY_WARNING_DAYS, "0").unwrap();
    insert_raw_config(&conn, "negative", config_keys::EXPIRY_WARNING_DAYS, "-5").unwrap();
    insert_raw_config(&conn, "garbage", config_keys::EXPIRY_WARNING_DAYS, "two weeks").unwrap();
    drop(conn);

    let config_manager = ConfigManager::new(&db_path).expect("Failed to create ConfigManager");

    for user in ["zero", "negative", "garbage"] {
        assert_eq!(
            config_manager.get_warning_days(user).await.unwrap(),
            14,
            "user={}",
            user
        );
    }
}

#[tokio::test]
async fn test_non_positive_threshold_is_rejected_on_write() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let config_manager = ConfigManager::new(&db_path).expect("Failed to create ConfigManager");

    let result = config_manager.set_warning_days("u1", 0);
    assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));

    let result = config_manager.set_locale("u1", "   ");
    assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));

    assert_eq!(config_manager.get_warning_days("u1").await.unwrap(), 14);
}

#[tokio::test]
async fn test_unsupported_locale_is_rejected_and_ignored() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = open_test_connection(&db_path).expect("Failed to open db");
    // 绕过写入校验，模拟历史遗留的非法语言值
    insert_raw_config(&conn, "legacy", config_keys::LOCALE, "de").unwrap();
    drop(conn);

    let config_manager = ConfigManager::new(&db_path).expect("Failed to create ConfigManager");

    let result = config_manager.set_locale("u1", "de");
    assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    assert_eq!(config_manager.get_locale("u1").await.unwrap(), "hu");

    // 存量非法值读取时回退到默认语言
    assert_eq!(config_manager.get_locale("legacy").await.unwrap(), "hu");
}

#[tokio::test]
async fn test_settings_persist_across_instances() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");

    {
        let config_manager = ConfigManager::new(&db_path).expect("Failed to create ConfigManager");
        config_manager.set_warning_days("u1", 21).unwrap();
        config_manager.set_locale("u1", "en").unwrap();
    }

    let config_manager = ConfigManager::new(&db_path).expect("Failed to create ConfigManager");
    assert_eq!(config_manager.get_warning_days("u1").await.unwrap(), 21);
    assert_eq!(config_manager.get_locale("u1").await.unwrap(), "en");
}

#[tokio::test]
async fn test_config_snapshot_reports_effective_values() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let config_manager = ConfigManager::new(&db_path).expect("Failed to create ConfigManager");

    config_manager.set_locale(GLOBAL_SCOPE, "zh-CN").unwrap();
    config_manager.set_warning_days("u1", 7).unwrap();

    let snapshot = config_manager.get_config_snapshot("u1").unwrap();
    let value: serde_json::Value = serde_json::from_str(&snapshot).unwrap();

    assert_eq!(value["user_id"], "u1");
    assert_eq!(value["values"]["expiry_warning_days"], "7");
    assert_eq!(value["values"]["locale"], "zh-CN");
}
