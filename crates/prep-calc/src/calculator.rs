//! 備料主計算器

use prep_core::{
    CatalogIndex, OptimalQuantities, OrderHeader, OrderLine, OrderWeek, PlanningConfig,
    ProductionPlan, WeeklySalesTable,
};
use rayon::prelude::*;

use crate::aggregation::DemandAggregator;
use crate::bucketing::{BucketingCalculator, OrderWeekIndex};
use crate::profit::ProfitSimulator;
use crate::rollup::IngredientRollup;
use crate::search::{QuantitySearch, SearchOutcome};
use crate::summary::SummaryCalculator;
use crate::{PrepResult, PrepWarning};

/// 備料計算器
pub struct PrepCalculator {
    /// 產品目錄
    catalog: CatalogIndex,

    /// 計劃參數
    config: PlanningConfig,
}

impl PrepCalculator {
    /// 創建新的備料計算器
    pub fn new(catalog: CatalogIndex, config: PlanningConfig) -> prep_core::Result<Self> {
        config.validate()?;
        Ok(Self { catalog, config })
    }

    /// 主計算入口（帶日期的訂單）
    pub fn calculate(
        &self,
        headers: &[OrderHeader],
        lines: &[OrderLine],
    ) -> prep_core::Result<PrepResult> {
        tracing::debug!("Step 0: 訂單分週");
        let (calendar, orders) = BucketingCalculator::bucket_orders(headers)?;
        tracing::debug!(
            "日曆範圍 {} ~ {}，最後一週 {} 天",
            calendar.start_date,
            calendar.end_date,
            calendar.days_in_week(calendar.week_count())
        );

        self.calculate_bucketed(&orders, lines)
    }

    /// 主計算入口（已分週的訂單）
    pub fn calculate_bucketed(
        &self,
        orders: &[OrderWeek],
        lines: &[OrderLine],
    ) -> prep_core::Result<PrepResult> {
        tracing::info!(
            "開始備料計算：訂單 {} 筆，明細 {} 筆，產品 {} 個",
            orders.len(),
            lines.len(),
            self.catalog.len()
        );

        let start_time = std::time::Instant::now();

        // Step 1: 建立訂單週次索引
        tracing::debug!("Step 1: 訂單週次索引");
        let order_index = OrderWeekIndex::from_weeks(orders)?;
        tracing::debug!("總週數: {}", order_index.week_count());

        // Step 2: 彙總每週銷量
        tracing::debug!("Step 2: 每週銷量彙總");
        let weekly_sales = DemandAggregator::aggregate(&self.catalog, &order_index, lines)?;

        // Step 3: 逐產品搜尋最佳產量
        tracing::debug!("Step 3: 最佳產量搜尋");
        let search_outcomes = self.search_all(&weekly_sales)?;
        let optimal_quantities: OptimalQuantities = search_outcomes
            .iter()
            .map(|o| (o.product_id.clone(), o.quantity))
            .collect();

        // Step 4: 原料展開
        tracing::debug!("Step 4: 原料展開");
        let ingredient_demand = IngredientRollup::rollup(&self.catalog, &optimal_quantities)?;

        // Step 5: 利潤模擬與摘要
        tracing::debug!("Step 5: 利潤模擬與銷售摘要");
        let weekly_profit = ProfitSimulator::simulate(
            &weekly_sales,
            &optimal_quantities,
            &self.catalog,
            &self.config,
        )?;
        let weekly_totals = SummaryCalculator::weekly_totals(&weekly_sales);
        let sales_mix = SummaryCalculator::sales_mix(&self.catalog, lines)?;

        let warnings = self.collect_warnings(&weekly_sales, &search_outcomes)?;

        let plan = ProductionPlan::new(weekly_sales, optimal_quantities, ingredient_demand)
            .with_weekly_profit(weekly_profit)
            .with_weekly_totals(weekly_totals)
            .with_sales_mix(sales_mix);

        let result = PrepResult {
            plan,
            search_outcomes,
            warnings,
            calculation_time_ms: Some(start_time.elapsed().as_millis()),
        };

        tracing::info!("備料計算完成，耗時 {:?}", start_time.elapsed());
        tracing::info!(
            "原料種類: {}，模擬總利潤: {}",
            result.plan.ingredient_demand.len(),
            result.plan.total_profit().round_dp(2)
        );

        Ok(result)
    }

    /// 對每個產品執行產量搜尋（結果依目錄順序）
    ///
    /// 各產品只讀取自己的銷量列，可安全並行。
    fn search_all(&self, weekly_sales: &WeeklySalesTable) -> prep_core::Result<Vec<SearchOutcome>> {
        let search_one = |row: &prep_core::WeeklySales| -> prep_core::Result<SearchOutcome> {
            let price = self.catalog.price_of(&row.product_id)?;
            QuantitySearch::search(row, price, &self.config)
        };

        if self.config.parallel_search {
            weekly_sales.rows().par_iter().map(search_one).collect()
        } else {
            weekly_sales.rows().iter().map(search_one).collect()
        }
    }

    /// 收集搜尋相關警告
    fn collect_warnings(
        &self,
        weekly_sales: &WeeklySalesTable,
        outcomes: &[SearchOutcome],
    ) -> prep_core::Result<Vec<PrepWarning>> {
        let mut warnings = Vec::new();

        for outcome in outcomes {
            let sales = weekly_sales.get(&outcome.product_id)?;

            if sales.is_zero() {
                warnings.push(PrepWarning::info(
                    outcome.product_id.clone(),
                    "整年無銷量，最佳產量為 0".to_string(),
                ));
            } else if outcome.offset == self.config.min_offset && outcome.quantity > 0 {
                tracing::warn!(
                    "產品 {} 選中搜尋區間下界 {}，區間可能過窄",
                    outcome.product_id,
                    outcome.offset
                );
                warnings.push(PrepWarning::warning(
                    outcome.product_id.clone(),
                    format!("選中搜尋區間下界 {}，區間可能過窄", outcome.offset),
                ));
            }
        }

        Ok(warnings)
    }

    /// 獲取產品目錄引用
    pub fn catalog(&self) -> &CatalogIndex {
        &self.catalog
    }

    /// 獲取計劃參數引用
    pub fn config(&self) -> &PlanningConfig {
        &self.config
    }
}
