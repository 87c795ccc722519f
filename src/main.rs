// ==========================================
// 家庭库存保质期跟踪 - 命令行入口
// ==========================================
// 用法: pantry-tracker <snapshot.json|snapshot.csv> [user_id]
// 输出: stdout 打印 JSON 报表；日志写 stderr
// ==========================================

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use pantry_tracker::config::{ConfigManager, GLOBAL_SCOPE};
use pantry_tracker::db::get_default_db_path;
use pantry_tracker::engine::SystemClock;
use pantry_tracker::importer::SnapshotImporter;
use pantry_tracker::{logging, InventoryApi};

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志系统
    logging::init();

    let mut args = std::env::args().skip(1);
    let Some(snapshot_path) = args.next() else {
        bail!("用法: pantry-tracker <snapshot.json|snapshot.csv> [user_id]");
    };
    let user_id = args.next().unwrap_or_else(|| GLOBAL_SCOPE.to_string());

    tracing::info!("pantry-tracker {}", pantry_tracker::VERSION);

    // 获取数据库路径
    let db_path = get_default_db_path();
    tracing::info!("使用数据库: {}", db_path);

    let config = ConfigManager::new(&db_path)
        .with_context(|| format!("无法打开配置数据库: {}", db_path))?;

    let import = SnapshotImporter::new()
        .import_file(&snapshot_path)
        .with_context(|| format!("无法导入快照: {}", snapshot_path))?;

    tracing::info!(
        products = import.products.len(),
        batches = import.batch_count(),
        skipped = import.skipped_records,
        skipped_batches = import.skipped_batches,
        degraded_dates = import.degraded_dates,
        degraded_quantities = import.degraded_quantities,
        "快照导入完成"
    );

    let api = InventoryApi::new(Arc::new(config), Arc::new(SystemClock));
    let report = api
        .build_report(&user_id, &import.products)
        .await
        .context("报表生成失败")?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
