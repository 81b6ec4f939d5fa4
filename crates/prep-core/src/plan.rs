//! 備料計劃模型（計算結果）

use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{PrepError, Result, WeeklySalesTable};

/// 各產品的最佳週產量（依目錄順序）
pub type OptimalQuantities = IndexMap<String, u32>;

/// 原料總需求（保留原料首次出現順序）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IngredientDemand {
    quantities: IndexMap<String, u64>,
}

impl IngredientDemand {
    pub fn new(quantities: IndexMap<String, u64>) -> Self {
        Self { quantities }
    }

    /// 某原料的需求量
    pub fn get(&self, ingredient: &str) -> Option<u64> {
        self.quantities.get(ingredient).copied()
    }

    /// 依首次出現順序迭代
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.quantities.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// 全部原料的需求總量
    pub fn total(&self) -> u64 {
        self.quantities.values().sum()
    }

    pub fn len(&self) -> usize {
        self.quantities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }
}

/// 單週模擬利潤
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyProfit {
    /// 週次
    pub week: u32,
    /// 利潤（可能為負）
    pub profit: Decimal,
}

/// 單週合計銷量
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyTotal {
    pub week: u32,
    pub units: u64,
}

/// 分類訂單明細數
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: u64,
}

/// 產品佔比（百分比，四捨五入至小數兩位）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductShare {
    pub product_id: String,
    pub percentage: Decimal,
}

/// 銷售組合
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesMix {
    /// 依分類名稱排序
    pub categories: Vec<CategoryCount>,
    /// 依佔比由小到大排序
    pub products: Vec<ProductShare>,
}

/// 備料計劃
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductionPlan {
    /// 計劃ID
    pub id: Uuid,

    /// 每週銷量表
    pub weekly_sales: WeeklySalesTable,

    /// 各產品最佳週產量
    pub optimal_quantities: OptimalQuantities,

    /// 原料總需求
    pub ingredient_demand: IngredientDemand,

    /// 每週模擬利潤
    pub weekly_profit: Vec<WeeklyProfit>,

    /// 每週合計銷量
    pub weekly_totals: Vec<WeeklyTotal>,

    /// 銷售組合
    pub sales_mix: SalesMix,
}

impl ProductionPlan {
    /// 創建新的備料計劃
    pub fn new(
        weekly_sales: WeeklySalesTable,
        optimal_quantities: OptimalQuantities,
        ingredient_demand: IngredientDemand,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            weekly_sales,
            optimal_quantities,
            ingredient_demand,
            weekly_profit: Vec::new(),
            weekly_totals: Vec::new(),
            sales_mix: SalesMix::default(),
        }
    }

    /// 建構器模式：設置每週利潤
    pub fn with_weekly_profit(mut self, weekly_profit: Vec<WeeklyProfit>) -> Self {
        self.weekly_profit = weekly_profit;
        self
    }

    /// 建構器模式：設置每週合計銷量
    pub fn with_weekly_totals(mut self, weekly_totals: Vec<WeeklyTotal>) -> Self {
        self.weekly_totals = weekly_totals;
        self
    }

    /// 建構器模式：設置銷售組合
    pub fn with_sales_mix(mut self, sales_mix: SalesMix) -> Self {
        self.sales_mix = sales_mix;
        self
    }

    /// 取得產品最佳週產量
    pub fn optimal_quantity(&self, product_id: &str) -> Result<u32> {
        self.optimal_quantities
            .get(product_id)
            .copied()
            .ok_or_else(|| PrepError::ProductNotFound(product_id.to_string()))
    }

    /// 全年模擬總利潤
    pub fn total_profit(&self) -> Decimal {
        self.weekly_profit.iter().map(|w| w.profit).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WeeklySales;

    #[test]
    fn test_ingredient_demand_keeps_order_and_zeros() {
        let mut map = IndexMap::new();
        map.insert("Tomatoes".to_string(), 12);
        map.insert("Anchovies".to_string(), 0);
        map.insert("Basil".to_string(), 3);
        let demand = IngredientDemand::new(map);

        let names: Vec<_> = demand.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["Tomatoes", "Anchovies", "Basil"]);
        assert_eq!(demand.get("Anchovies"), Some(0));
        assert_eq!(demand.get("Garlic"), None);
        assert_eq!(demand.total(), 15);

        let json = serde_json::to_string(&demand).unwrap();
        assert_eq!(json, r#"{"Tomatoes":12,"Anchovies":0,"Basil":3}"#);
        assert_eq!(serde_json::from_str::<IngredientDemand>(&json).unwrap(), demand);
    }

    #[test]
    fn test_production_plan() {
        let table = WeeklySalesTable::new(
            2,
            vec![WeeklySales::from_weeks("hawaiian".to_string(), vec![3, 5])],
        )
        .unwrap();
        let mut quantities = OptimalQuantities::new();
        quantities.insert("hawaiian".to_string(), 3);

        let plan = ProductionPlan::new(table, quantities, IngredientDemand::default())
            .with_weekly_profit(vec![
                WeeklyProfit {
                    week: 1,
                    profit: Decimal::from(4),
                },
                WeeklyProfit {
                    week: 2,
                    profit: Decimal::from(-1),
                },
            ]);

        assert_eq!(plan.optimal_quantity("hawaiian").unwrap(), 3);
        assert!(plan.optimal_quantity("mexicana").is_err());
        assert_eq!(plan.total_profit(), Decimal::from(3));
    }
}
