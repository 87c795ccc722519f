// ==========================================
// 家庭库存保质期跟踪 - 宽松字段解析
// ==========================================
// 日期: YYYY-MM-DD / RFC 3339（转本地日历日）/ 无时区 ISO 时间；其余 → None
// 数量: 整数 / 数字字符串 / 浮点（截断）；负数、非数字、缺失 → None
// ==========================================

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

/// 解析到期日
pub fn parse_expiry_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local).date_naive());
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    None
}

/// 解析 JSON 中的到期日字段（字符串以外的类型一律视为缺失）
pub fn parse_expiry_value(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::String(s) => parse_expiry_date(s),
        _ => None,
    }
}

/// 解析数量
pub fn parse_quantity(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                u32::try_from(u).ok()
            } else if n.as_i64().is_some() {
                None
            } else {
                n.as_f64().and_then(float_to_quantity)
            }
        }
        Value::String(s) => parse_quantity_str(s),
        _ => None,
    }
}

/// 解析字符串数量
pub fn parse_quantity_str(raw: &str) -> Option<u32> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(n) = s.parse::<i64>() {
        return u32::try_from(n).ok();
    }
    s.parse::<f64>().ok().and_then(float_to_quantity)
}

fn float_to_quantity(f: f64) -> Option<u32> {
    if f.is_finite() && f >= 0.0 && f <= f64::from(u32::MAX) {
        Some(f.trunc() as u32)
    } else {
        None
    }
}

/// 解析时间戳（RFC 3339 → UTC）
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
