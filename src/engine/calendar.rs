// ==========================================
// 家庭库存保质期跟踪 - 日历视图
// ==========================================
// 职责:
// 1. 所有带到期日的批次按日历日 (年，月，日) 分桶
// 2. 生成周一开头的 6x7 月视图网格
// 红线: 条目状态按"该批次自身到期日"判定，不用产品最早到期日
// ==========================================

use crate::domain::calendar::{DayKey, MonthKey};
use crate::domain::product::Product;
use crate::domain::views::{CalendarCell, CalendarMonth, ExpiryCalendar, ExpiryEntry};
use crate::engine::classifier::ExpiryClassifier;
use chrono::{Datelike, Duration, NaiveDate};
use tracing::instrument;

/// 月视图格数（6 行 x 7 列）
pub const GRID_CELLS: usize = 42;

#[derive(Debug, Clone, Copy, Default)]
pub struct CalendarView;

impl CalendarView {
    pub fn new() -> Self {
        Self
    }

    /// 批次按到期日分桶（稀疏）
    #[instrument(skip(self, products), fields(count = products.len()))]
    pub fn build(&self, products: &[Product], warning_days: i64, today: NaiveDate) -> ExpiryCalendar {
        let mut calendar = ExpiryCalendar::default();
        for entry in expiry_entries(products, warning_days, today) {
            calendar
                .days
                .entry(DayKey::from(entry.expiry_date))
                .or_default()
                .push(entry);
        }
        calendar
    }

    /// 月视图网格
    ///
    /// - 首格为该月 1 日所在周的周一（可能落在上月）
    /// - 共 42 格，不足部分由下月补齐
    /// - 月份非法返回 None
    pub fn month_grid(
        &self,
        calendar: &ExpiryCalendar,
        month: MonthKey,
        today: NaiveDate,
    ) -> Option<CalendarMonth> {
        let first = month.first_day()?;
        let leading = i64::from(first.weekday().num_days_from_monday());
        let start = first - Duration::days(leading);

        let cells = (0..GRID_CELLS as i64)
            .map(|offset| {
                let date = start + Duration::days(offset);
                let key = DayKey::from(date);
                CalendarCell {
                    date,
                    key,
                    is_current_month: month.contains(date),
                    is_today: date == today,
                    day_status: calendar.day_status(key),
                    entries: calendar.entries_on(key).to_vec(),
                }
            })
            .collect();

        Some(CalendarMonth { month, cells })
    }
}

/// 展开所有带到期日的批次（产品顺序 → 批次顺序）
pub fn expiry_entries<'a>(
    products: &'a [Product],
    warning_days: i64,
    today: NaiveDate,
) -> impl Iterator<Item = ExpiryEntry> + 'a {
    products.iter().flat_map(move |product| {
        product.batches.iter().filter_map(move |batch| {
            let expiry_date = batch.expiry_date?;
            Some(ExpiryEntry {
                product_id: product.id.clone(),
                product_name: product.name.clone(),
                category_name: product.category_name().map(str::to_string),
                expiry_date,
                batch: batch.clone(),
                status: ExpiryClassifier::classify(Some(expiry_date), warning_days, today),
            })
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::Batch;
    use crate::domain::types::{ExpiryStatus, Provenance};
    use chrono::{TimeZone, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2026, 1, 17)
    }

    fn batch(id: &str, expiry: Option<NaiveDate>) -> Batch {
        Batch {
            id: id.to_string(),
            expiry_date: expiry,
            quantity: Some(1),
            unit: None,
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 8, 0, 0).unwrap(),
        }
    }

    fn product(id: &str, batches: Vec<Batch>) -> Product {
        Product {
            id: id.to_string(),
            name: id.to_string(),
            category: None,
            location: None,
            barcode: None,
            batches,
            source: Provenance::Manual,
        }
    }

    #[test]
    fn test_batches_bucketed_by_own_date() {
        let products = vec![
            product("milk", vec![batch("m1", Some(date(2026, 1, 16))), batch("m2", Some(date(2026, 1, 27)))]),
            product("eggs", vec![batch("e1", Some(date(2026, 1, 27))), batch("e2", None)]),
        ];

        let calendar = CalendarView::new().build(&products, 14, today());
        assert_eq!(calendar.len(), 2);

        let jan27 = calendar.entries_on(DayKey::from(date(2026, 1, 27)));
        assert_eq!(jan27.len(), 2);
        assert_eq!(jan27[0].product_id, "milk");
        assert_eq!(jan27[1].product_id, "eggs");
        // 牛奶产品级最早到期为已过期，但该批次自身为预警
        assert_eq!(jan27[0].status.status, ExpiryStatus::Warning);

        let jan16 = calendar.entries_on(DayKey::from(date(2026, 1, 16)));
        assert_eq!(jan16[0].status.status, ExpiryStatus::Expired);

        assert!(calendar.entries_on(DayKey::from(date(2026, 1, 20))).is_empty());
    }

    #[test]
    fn test_day_status_picks_most_urgent() {
        let products = vec![
            product("a", vec![batch("a1", Some(date(2026, 1, 19)))]),
            product("b", vec![batch("b1", Some(date(2026, 1, 19)))]),
            product("c", vec![batch("c1", Some(date(2026, 3, 1)))]),
        ];
        let calendar = CalendarView::new().build(&products, 14, today());

        assert_eq!(
            calendar.day_status(DayKey::from(date(2026, 1, 19))),
            Some(ExpiryStatus::Critical)
        );
        assert_eq!(
            calendar.day_status(DayKey::from(date(2026, 3, 1))),
            Some(ExpiryStatus::Good)
        );
        assert_eq!(calendar.day_status(DayKey::from(date(2026, 3, 2))), None);
    }

    #[test]
    fn test_month_grid_starts_on_monday() {
        // 2026-01-01 是周四 → 网格从 2025-12-29（周一）开始
        let view = CalendarView::new();
        let grid = view
            .month_grid(&ExpiryCalendar::default(), MonthKey { year: 2026, month: 1 }, today())
            .unwrap();

        assert_eq!(grid.cells.len(), GRID_CELLS);
        assert_eq!(grid.cells[0].date, date(2025, 12, 29));
        assert!(!grid.cells[0].is_current_month);
        assert_eq!(grid.cells[3].date, date(2026, 1, 1));
        assert!(grid.cells[3].is_current_month);
        assert_eq!(grid.cells[41].date, date(2026, 2, 8));
        assert!(!grid.cells[41].is_current_month);

        let today_cells: Vec<_> = grid.cells.iter().filter(|c| c.is_today).collect();
        assert_eq!(today_cells.len(), 1);
        assert_eq!(today_cells[0].date, today());
    }

    #[test]
    fn test_month_grid_monday_first_day_has_no_leading_cells() {
        // 2026-06-01 是周一
        let grid = CalendarView::new()
            .month_grid(&ExpiryCalendar::default(), MonthKey { year: 2026, month: 6 }, today())
            .unwrap();
        assert_eq!(grid.cells[0].date, date(2026, 6, 1));
    }

    #[test]
    fn test_month_grid_invalid_month() {
        let grid = CalendarView::new().month_grid(
            &ExpiryCalendar::default(),
            MonthKey { year: 2026, month: 13 },
            today(),
        );
        assert!(grid.is_none());
    }
}
