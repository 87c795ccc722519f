// ==========================================
// 家庭库存保质期跟踪 - 快照导入器
// ==========================================
// 职责:
// 1. 读取 JSON / CSV 快照文件
// 2. 字段宽松解析（日期 / 数量降级，不报错）
// 3. CSV 按 product_id 归并为产品（首次出现顺序）
// 4. 输出导入报告（含降级计数）
// ==========================================

use crate::domain::product::{generate_batch_id, Batch, NamedRef, Product};
use crate::domain::types::Provenance;
use crate::importer::lenient::{
    parse_expiry_date, parse_expiry_value, parse_quantity, parse_quantity_str, parse_timestamp,
};
use crate::importer::raw_record::{
    value_to_text, RawBatchRecord, RawCsvRow, RawNamedRef, RawProductRecord,
};
use crate::importer::ImportError;
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use tracing::{info, instrument, warn};

/// 快照格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    Csv,
}

impl SnapshotFormat {
    /// 按文件扩展名判断格式
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "json" => Some(SnapshotFormat::Json),
            "csv" => Some(SnapshotFormat::Csv),
            _ => None,
        }
    }
}

/// 导入报告
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportReport {
    pub products: Vec<Product>,
    pub skipped_records: usize,      // 无名称/无标识/非对象而跳过的记录
    pub skipped_batches: usize,      // 非对象而跳过的批次
    pub degraded_dates: usize,       // 非法到期日 → 缺失
    pub degraded_quantities: usize,  // 非法数量 → 缺失
}

impl ImportReport {
    pub fn batch_count(&self) -> usize {
        self.products.iter().map(|p| p.batches.len()).sum()
    }
}

// ==========================================
// SnapshotImporter - 快照导入器
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct SnapshotImporter;

impl SnapshotImporter {
    pub fn new() -> Self {
        Self
    }

    /// 从文件导入（主入口，按扩展名分派）
    #[instrument(skip(self))]
    pub fn import_file(&self, file_path: &str) -> Result<ImportReport, ImportError> {
        let path = Path::new(file_path);
        if !path.exists() {
            return Err(ImportError::FileNotFound(file_path.to_string()));
        }

        let format = SnapshotFormat::from_path(path)
            .ok_or_else(|| ImportError::UnsupportedFormat(file_path.to_string()))?;

        let report = match format {
            SnapshotFormat::Json => {
                let content = std::fs::read_to_string(path)?;
                self.import_json_str(&content)?
            }
            SnapshotFormat::Csv => {
                let file = std::fs::File::open(path)?;
                self.import_csv_reader(file)?
            }
        };

        info!(
            products = report.products.len(),
            batches = report.batch_count(),
            skipped = report.skipped_records,
            skipped_batches = report.skipped_batches,
            degraded_dates = report.degraded_dates,
            degraded_quantities = report.degraded_quantities,
            "快照导入完成"
        );
        Ok(report)
    }

    /// 从 JSON 文本导入（顶层为产品数组）
    pub fn import_json_str(&self, content: &str) -> Result<ImportReport, ImportError> {
        // 只有顶层不是 JSON 数组才算文件级错误
        let records: Vec<Value> = serde_json::from_str(content)?;
        let mut report = ImportReport::default();

        for (index, value) in records.into_iter().enumerate() {
            let record = match serde_json::from_value::<RawProductRecord>(value) {
                Ok(record) => record,
                Err(e) => {
                    warn!(index, error = %e, "产品记录不是对象，已跳过");
                    report.skipped_records += 1;
                    continue;
                }
            };
            if let Some(product) = self.map_json_record(record, index, &mut report) {
                report.products.push(product);
            }
        }

        Ok(report)
    }

    /// 从 CSV 读取器导入（首行为表头）
    pub fn import_csv_reader<R: Read>(&self, reader: R) -> Result<ImportReport, ImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let mut report = ImportReport::default();
        let mut index: HashMap<String, usize> = HashMap::new();

        for (row_no, row) in csv_reader.deserialize::<RawCsvRow>().enumerate() {
            let row = row?;

            let product_id = match non_blank(row.product_id.as_deref()) {
                Some(id) => id,
                None => {
                    warn!(row = row_no + 2, "CSV 行缺少 product_id，已跳过");
                    report.skipped_records += 1;
                    continue;
                }
            };

            let existing = index.get(&product_id).copied();
            let slot = match existing {
                Some(i) => i,
                None => {
                    let name = match non_blank(row.name.as_deref()) {
                        Some(name) => name,
                        None => {
                            warn!(row = row_no + 2, product_id = %product_id, "CSV 行缺少产品名称，已跳过");
                            report.skipped_records += 1;
                            continue;
                        }
                    };
                    report.products.push(Product {
                        id: product_id.clone(),
                        name,
                        category: csv_ref(row.category_id.as_deref(), row.category.as_deref()),
                        location: csv_ref(row.location_id.as_deref(), row.location.as_deref()),
                        barcode: non_blank(row.barcode.as_deref()),
                        batches: Vec::new(),
                        source: row
                            .source
                            .as_deref()
                            .map(Provenance::from_str)
                            .unwrap_or_default(),
                    });
                    index.insert(product_id.clone(), report.products.len() - 1);
                    report.products.len() - 1
                }
            };

            let batch = self.map_csv_batch(&row, &product_id, &mut report);
            report.products[slot].batches.push(batch);
        }

        Ok(report)
    }

    // ==========================================
    // 字段映射
    // ==========================================

    fn map_json_record(
        &self,
        record: RawProductRecord,
        index: usize,
        report: &mut ImportReport,
    ) -> Option<Product> {
        let name = match value_to_text(&record.name) {
            Some(name) => name,
            None => {
                warn!(index, "产品记录缺少名称，已跳过");
                report.skipped_records += 1;
                return None;
            }
        };

        let id = value_to_text(&record.id).unwrap_or_else(|| format!("product_{}", index));

        let raw_batches = match record.batches {
            Value::Array(items) => items,
            Value::Null => Vec::new(),
            other => {
                warn!(product_id = %id, value = %other, "batches 不是数组，按无批次处理");
                Vec::new()
            }
        };

        let mut batches = Vec::with_capacity(raw_batches.len());
        for value in raw_batches {
            match serde_json::from_value::<RawBatchRecord>(value) {
                Ok(raw) => batches.push(self.map_json_batch(&raw, &id, report)),
                Err(e) => {
                    warn!(product_id = %id, error = %e, "批次记录不是对象，已跳过");
                    report.skipped_batches += 1;
                }
            }
        }

        Some(Product {
            category: json_ref(&record.category, &record.category_id),
            location: json_ref(&record.location, &record.location_id),
            barcode: value_to_text(&record.barcode),
            batches,
            source: value_to_text(&record.source)
                .map(|s| Provenance::from_str(&s))
                .unwrap_or_default(),
            id,
            name,
        })
    }

    fn map_json_batch(&self, raw: &RawBatchRecord, product_id: &str, report: &mut ImportReport) -> Batch {
        let expiry_date = parse_expiry_value(&raw.expiry_date);
        if expiry_date.is_none() && is_present(&raw.expiry_date) {
            warn!(product_id, value = %raw.expiry_date, "到期日无法解析，按无到期日处理");
            report.degraded_dates += 1;
        }

        let quantity = parse_quantity(&raw.quantity);
        if quantity.is_none() && !raw.quantity.is_null() {
            warn!(product_id, value = %raw.quantity, "数量非法，按 0 计");
            report.degraded_quantities += 1;
        }

        Batch {
            id: value_to_text(&raw.id).unwrap_or_else(generate_batch_id),
            expiry_date,
            quantity,
            unit: value_to_text(&raw.unit),
            created_at: value_to_text(&raw.added_at)
                .as_deref()
                .and_then(parse_timestamp)
                .unwrap_or_else(Utc::now),
        }
    }

    fn map_csv_batch(&self, row: &RawCsvRow, product_id: &str, report: &mut ImportReport) -> Batch {
        let raw_expiry = non_blank(row.expiry_date.as_deref());
        let expiry_date = raw_expiry.as_deref().and_then(parse_expiry_date);
        if expiry_date.is_none() && raw_expiry.is_some() {
            warn!(product_id, value = ?raw_expiry, "到期日无法解析，按无到期日处理");
            report.degraded_dates += 1;
        }

        let raw_quantity = non_blank(row.quantity.as_deref());
        let quantity = raw_quantity.as_deref().and_then(parse_quantity_str);
        if quantity.is_none() && raw_quantity.is_some() {
            warn!(product_id, value = ?raw_quantity, "数量非法，按 0 计");
            report.degraded_quantities += 1;
        }

        Batch {
            id: non_blank(row.batch_id.as_deref()).unwrap_or_else(generate_batch_id),
            expiry_date,
            quantity,
            unit: non_blank(row.unit.as_deref()),
            created_at: row
                .added_at
                .as_deref()
                .and_then(parse_timestamp)
                .unwrap_or_else(Utc::now),
        }
    }
}

fn non_blank(s: Option<&str>) -> Option<String> {
    s.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// 空字符串与 null 都视为"未填写"，不计入降级
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        _ => true,
    }
}

/// 嵌套引用优先；只有 *_id 时以 id 作为名称
fn json_ref(nested: &Value, flat_id: &Value) -> Option<NamedRef> {
    let nested = match nested {
        Value::Object(_) => serde_json::from_value::<RawNamedRef>(nested.clone()).ok(),
        _ => None,
    };
    let nested_id = nested.as_ref().and_then(|r| value_to_text(&r.id));
    let id = nested_id.or_else(|| value_to_text(flat_id))?;
    let name = nested
        .as_ref()
        .and_then(|r| value_to_text(&r.name))
        .unwrap_or_else(|| id.clone());
    Some(NamedRef { id, name })
}

fn csv_ref(id: Option<&str>, name: Option<&str>) -> Option<NamedRef> {
    let id = non_blank(id);
    let name = non_blank(name);
    match (id, name) {
        (Some(id), Some(name)) => Some(NamedRef { id, name }),
        (Some(id), None) => Some(NamedRef { name: id.clone(), id }),
        (None, Some(name)) => Some(NamedRef { id: name.clone(), name }),
        (None, None) => None,
    }
}
