//! 每週需求彙總

use indexmap::IndexMap;
use prep_core::{CatalogIndex, OrderLine, PrepError, WeeklySales, WeeklySalesTable};

use crate::bucketing::OrderWeekIndex;

/// 需求彙總計算器
pub struct DemandAggregator;

impl DemandAggregator {
    /// 將訂單明細彙總為「產品 × 週」的銷量表
    ///
    /// 目錄中的每個產品都會有一列，沒有銷量的週記為 0。
    /// 平均值以總週數（含最後不完整的一週）為分母。
    pub fn aggregate(
        catalog: &CatalogIndex,
        orders: &OrderWeekIndex,
        lines: &[OrderLine],
    ) -> prep_core::Result<WeeklySalesTable> {
        let week_count = orders.week_count();

        let mut grid: IndexMap<&str, Vec<u32>> = catalog
            .product_ids()
            .map(|id| (id, vec![0u32; week_count as usize]))
            .collect();

        for line in lines {
            let week = orders
                .week_of(line.order_id)
                .ok_or_else(|| PrepError::UnknownOrder {
                    order_id: line.order_id,
                    variant: line.variant_id.clone(),
                })?;

            let product = catalog.resolve_variant(&line.variant_id)?;

            let row = grid
                .get_mut(product.product_id.as_str())
                .ok_or_else(|| PrepError::ProductNotFound(product.product_id.clone()))?;

            let cell = &mut row[week as usize - 1];
            *cell = cell.checked_add(line.quantity).ok_or_else(|| {
                PrepError::CalculationError(format!(
                    "產品 {} 第 {} 週銷量溢位",
                    product.product_id, week
                ))
            })?;
        }

        let rows = grid
            .into_iter()
            .map(|(id, weeks)| WeeklySales::from_weeks(id.to_string(), weeks))
            .collect();

        let table = WeeklySalesTable::new(week_count, rows)?;

        tracing::debug!(
            "需求彙總完成：明細 {} 筆，產品 {} 個，週數 {}，總銷量 {}",
            lines.len(),
            table.rows().len(),
            week_count,
            table.total_units()
        );

        Ok(table)
    }
}
