// ==========================================
// 家庭库存保质期跟踪 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为
// - 统一 busy_timeout，减少并发写入时的偶发 busy 错误
// - 建立本地用户配置表 config_kv（幂等）
// ==========================================

use rusqlite::Connection;
use std::path::PathBuf;
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 数据库路径环境变量
pub const DB_PATH_ENV: &str = "PANTRY_TRACKER_DB_PATH";

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明: busy_timeout 需要"每个连接"单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 建立 config_kv 表（scope_id = 用户ID 或 'global'）
pub fn ensure_config_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS config_kv (
            scope_id TEXT NOT NULL,
            key TEXT NOT NULL,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (datetime('now')),
            PRIMARY KEY (scope_id, key)
        );
        "#,
    )
}

/// 默认数据库路径
///
/// 优先级: 环境变量 → 用户数据目录 → 当前目录
pub fn get_default_db_path() -> String {
    if let Ok(path) = std::env::var(DB_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./pantry_tracker.db");

    if let Some(data_dir) = dirs::data_dir() {
        let app_dir = data_dir.join("pantry-tracker");
        match std::fs::create_dir_all(&app_dir) {
            Ok(()) => path = app_dir.join("pantry_tracker.db"),
            Err(e) => tracing::warn!("无法创建数据目录 {}: {}", app_dir.display(), e),
        }
    }

    path.to_string_lossy().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        configure_sqlite_connection(&conn).unwrap();
        ensure_config_schema(&conn).unwrap();
        ensure_config_schema(&conn).unwrap();

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='config_kv'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }
}
