// ==========================================
// 家庭库存保质期跟踪 - 库存 API
// ==========================================
// 职责: 解析用户阈值/语言 → 读取一次"今天" → 调用引擎视图
// 架构: API 层 → Engine 层（纯计算）
//       配置经 SettingsReader 注入，时间经 Clock 注入
// ==========================================

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::api::dto::{InventoryReport, ProductStatusDto};
use crate::api::error::{ApiError, ApiResult};
use crate::config::SettingsReader;
use crate::domain::calendar::MonthKey;
use crate::domain::draft::ProductDraft;
use crate::domain::product::Product;
use crate::domain::views::{CalendarMonth, DashboardSummary, InventoryStatistics, UrgentGroups};
use crate::engine::{
    CalendarView, Clock, DashboardEngine, ProductFilter, StatisticsEngine, StatusProjector,
    UrgentListView,
};

// ==========================================
// ViewContext - 单次调用的计算上下文
// ==========================================
// 同一次调用内所有视图共享同一个 today / 阈值
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewContext {
    pub user_id: String,
    pub today: NaiveDate,
    pub warning_days: i64,
    pub locale: String,
}

// ==========================================
// InventoryApi - 库存 API
// ==========================================
pub struct InventoryApi {
    settings: Arc<dyn SettingsReader>,
    clock: Arc<dyn Clock>,
    projector: StatusProjector,
    urgent_view: UrgentListView,
    calendar_view: CalendarView,
    dashboard: DashboardEngine,
}

impl InventoryApi {
    /// 创建新的 InventoryApi 实例
    ///
    /// # 参数
    /// - settings: 用户设置读取器（预警天数 / 语言）
    /// - clock: 时间源
    pub fn new(settings: Arc<dyn SettingsReader>, clock: Arc<dyn Clock>) -> Self {
        Self {
            settings,
            clock,
            projector: StatusProjector::new(),
            urgent_view: UrgentListView::new(),
            calendar_view: CalendarView::new(),
            dashboard: DashboardEngine::new(),
        }
    }

    /// 解析计算上下文（读取一次时钟）
    pub async fn resolve_context(&self, user_id: &str) -> ApiResult<ViewContext> {
        let user_id = user_id.trim();
        if user_id.is_empty() {
            return Err(ApiError::InvalidInput("用户ID不能为空".to_string()));
        }

        let warning_days = self.settings.get_warning_days(user_id).await?;
        let locale = self.settings.get_locale(user_id).await?;

        Ok(ViewContext {
            user_id: user_id.to_string(),
            today: self.clock.today(),
            warning_days,
            locale,
        })
    }

    // ==========================================
    // 产品列表
    // ==========================================

    /// 产品列表（过滤后附带状态）
    #[instrument(skip(self, products, filter), fields(count = products.len()))]
    pub async fn list_products(
        &self,
        user_id: &str,
        products: &[Product],
        filter: &ProductFilter,
    ) -> ApiResult<Vec<ProductStatusDto>> {
        let ctx = self.resolve_context(user_id).await?;
        Ok(self.product_rows(&ctx, products, filter))
    }

    fn product_rows(
        &self,
        ctx: &ViewContext,
        products: &[Product],
        filter: &ProductFilter,
    ) -> Vec<ProductStatusDto> {
        filter
            .apply(products)
            .into_iter()
            .map(|p| {
                let projected = self.projector.project(p, ctx.warning_days, ctx.today);
                ProductStatusDto::from_projection(&projected, &ctx.locale)
            })
            .collect()
    }

    /// 录入新产品（草稿校验 + 分配产品ID）
    pub fn create_product(&self, draft: ProductDraft) -> ApiResult<Product> {
        let id = format!("product_{}", Uuid::new_v4().simple());
        let product = draft.into_product(&id)?;
        info!(product_id = %product.id, batches = product.batches.len(), "产品草稿校验通过");
        Ok(product)
    }

    // ==========================================
    // 集合视图
    // ==========================================

    /// 紧急列表
    #[instrument(skip(self, products), fields(count = products.len()))]
    pub async fn get_urgent_view(
        &self,
        user_id: &str,
        products: &[Product],
    ) -> ApiResult<UrgentGroups> {
        let ctx = self.resolve_context(user_id).await?;
        Ok(self.urgent_view.build(products, ctx.warning_days, ctx.today))
    }

    /// 日历月视图
    ///
    /// # 参数
    /// - year / month: 月份 1-12
    #[instrument(skip(self, products), fields(count = products.len()))]
    pub async fn get_calendar_month(
        &self,
        user_id: &str,
        products: &[Product],
        year: i32,
        month: u32,
    ) -> ApiResult<CalendarMonth> {
        let ctx = self.resolve_context(user_id).await?;
        self.calendar_for(&ctx, products, MonthKey { year, month })
    }

    fn calendar_for(
        &self,
        ctx: &ViewContext,
        products: &[Product],
        month: MonthKey,
    ) -> ApiResult<CalendarMonth> {
        let calendar = self.calendar_view.build(products, ctx.warning_days, ctx.today);
        self.calendar_view
            .month_grid(&calendar, month, ctx.today)
            .ok_or_else(|| {
                ApiError::InvalidInput(format!("月份非法: {}-{}", month.year, month.month))
            })
    }

    /// 统计
    #[instrument(skip(self, products), fields(count = products.len()))]
    pub async fn get_statistics(
        &self,
        user_id: &str,
        products: &[Product],
    ) -> ApiResult<InventoryStatistics> {
        let ctx = self.resolve_context(user_id).await?;
        Ok(statistics_for(&ctx, products))
    }

    /// 首页摘要
    #[instrument(skip(self, products), fields(count = products.len()))]
    pub async fn get_dashboard(
        &self,
        user_id: &str,
        products: &[Product],
    ) -> ApiResult<DashboardSummary> {
        let ctx = self.resolve_context(user_id).await?;
        Ok(self.dashboard.summarize(products, ctx.warning_days, ctx.today))
    }

    /// 完整报表（当前月日历）
    #[instrument(skip(self, products), fields(count = products.len()))]
    pub async fn build_report(
        &self,
        user_id: &str,
        products: &[Product],
    ) -> ApiResult<InventoryReport> {
        let ctx = self.resolve_context(user_id).await?;

        let report = InventoryReport {
            products: self.product_rows(&ctx, products, &ProductFilter::default()),
            urgent: self.urgent_view.build(products, ctx.warning_days, ctx.today),
            statistics: statistics_for(&ctx, products),
            dashboard: self.dashboard.summarize(products, ctx.warning_days, ctx.today),
            calendar: self.calendar_for(&ctx, products, MonthKey::from(ctx.today))?,
            user_id: ctx.user_id,
            today: ctx.today,
            warning_days: ctx.warning_days,
            locale: ctx.locale,
        };

        info!(
            products = report.products.len(),
            urgent = report.urgent.total(),
            "库存报表生成完成"
        );
        Ok(report)
    }
}

/// 统计（未分类名称随用户语言）
fn statistics_for(ctx: &ViewContext, products: &[Product]) -> InventoryStatistics {
    StatisticsEngine::with_locale(&ctx.locale).compute(products, ctx.warning_days, ctx.today)
}
