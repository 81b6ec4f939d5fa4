//! 銷售摘要（每週合計、銷售組合）

use prep_core::{
    CatalogIndex, CategoryCount, OrderLine, ProductShare, SalesMix, WeeklySalesTable, WeeklyTotal,
};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};

/// 無分類產品的歸類名稱
pub const UNCATEGORIZED: &str = "uncategorized";

/// 摘要計算器
pub struct SummaryCalculator;

impl SummaryCalculator {
    /// 每週所有產品合計銷量
    pub fn weekly_totals(table: &WeeklySalesTable) -> Vec<WeeklyTotal> {
        table
            .weekly_totals()
            .into_iter()
            .enumerate()
            .map(|(i, units)| WeeklyTotal {
                week: i as u32 + 1,
                units,
            })
            .collect()
    }

    /// 以訂單明細筆數計算分類與產品佔比
    pub fn sales_mix(catalog: &CatalogIndex, lines: &[OrderLine]) -> prep_core::Result<SalesMix> {
        let mut categories: BTreeMap<String, u64> = BTreeMap::new();
        let mut products: HashMap<&str, u64> = HashMap::new();

        for line in lines {
            let product = catalog.resolve_variant(&line.variant_id)?;
            let category = product.category.as_deref().unwrap_or(UNCATEGORIZED);

            *categories.entry(category.to_string()).or_insert(0) += 1;
            *products.entry(product.product_id.as_str()).or_insert(0) += 1;
        }

        let total = Decimal::from(lines.len() as u64);
        let mut shares: Vec<ProductShare> = products
            .into_iter()
            .map(|(product_id, count)| ProductShare {
                product_id: product_id.to_string(),
                percentage: (Decimal::from(count) * Decimal::ONE_HUNDRED / total).round_dp(2),
            })
            .collect();
        shares.sort_by(|a, b| {
            a.percentage
                .cmp(&b.percentage)
                .then_with(|| a.product_id.cmp(&b.product_id))
        });

        Ok(SalesMix {
            categories: categories
                .into_iter()
                .map(|(category, count)| CategoryCount { category, count })
                .collect(),
            products: shares,
        })
    }
}
