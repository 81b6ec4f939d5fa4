//! 每週利潤模擬
//!
//! 以最佳週產量回測歷史銷量：產量全部售出時計入毛利，
//! 有剩餘時扣除剩餘部分的成本。

use prep_core::{
    CatalogIndex, OptimalQuantities, PlanningConfig, PrepError, WeeklyProfit, WeeklySalesTable,
};
use rust_decimal::Decimal;

/// 利潤模擬器
pub struct ProfitSimulator;

impl ProfitSimulator {
    /// 單一產品單週利潤
    pub fn week_profit(quantity: u32, sold: u32, price: Decimal, config: &PlanningConfig) -> Decimal {
        if sold >= quantity {
            Decimal::from(quantity) * price * config.margin_rate
        } else {
            -(Decimal::from(quantity - sold) * price * config.cost_rate())
        }
    }

    /// 模擬每週全產品利潤
    pub fn simulate(
        table: &WeeklySalesTable,
        quantities: &OptimalQuantities,
        catalog: &CatalogIndex,
        config: &PlanningConfig,
    ) -> prep_core::Result<Vec<WeeklyProfit>> {
        let mut profits = vec![Decimal::ZERO; table.week_count() as usize];

        for row in table.rows() {
            let quantity = quantities
                .get(&row.product_id)
                .copied()
                .ok_or_else(|| PrepError::ProductNotFound(row.product_id.clone()))?;
            let price = catalog.price_of(&row.product_id)?;

            for (slot, &sold) in profits.iter_mut().zip(&row.weeks) {
                *slot += Self::week_profit(quantity, sold, price, config);
            }
        }

        Ok(profits
            .into_iter()
            .enumerate()
            .map(|(i, profit)| WeeklyProfit {
                week: i as u32 + 1,
                profit,
            })
            .collect())
    }
}
