//! 原料需求展開

use indexmap::IndexMap;
use prep_core::{CatalogIndex, IngredientDemand, OptimalQuantities, PrepError};

/// 原料需求建構器
///
/// 建立時以目錄中所有被引用的原料預置為 0（依首次出現順序），
/// 之後逐產品累加，最後由 `build` 產出不可變的結果。
pub struct IngredientDemandBuilder<'a> {
    catalog: &'a CatalogIndex,
    quantities: IndexMap<String, u64>,
}

impl<'a> IngredientDemandBuilder<'a> {
    pub fn new(catalog: &'a CatalogIndex) -> Self {
        let quantities = catalog
            .ingredient_names()
            .into_iter()
            .map(|name| (name.to_string(), 0))
            .collect();

        Self {
            catalog,
            quantities,
        }
    }

    /// 累加單一產品：每個原料（含重複）加上產品產量
    pub fn add(&mut self, product_id: &str, quantity: u32) -> prep_core::Result<&mut Self> {
        let ingredients = self.catalog.ingredients_of(product_id)?;

        for ingredient in ingredients {
            let slot = self.quantities.get_mut(ingredient.as_str()).ok_or_else(|| {
                PrepError::CalculationError(format!("原料 {} 未登錄", ingredient))
            })?;
            *slot += u64::from(quantity);
        }

        Ok(self)
    }

    pub fn build(self) -> IngredientDemand {
        IngredientDemand::new(self.quantities)
    }
}

/// 原料展開計算器
pub struct IngredientRollup;

impl IngredientRollup {
    /// 將各產品最佳產量展開為原料總需求
    pub fn rollup(
        catalog: &CatalogIndex,
        quantities: &OptimalQuantities,
    ) -> prep_core::Result<IngredientDemand> {
        let mut builder = IngredientDemandBuilder::new(catalog);
        for (product_id, &quantity) in quantities {
            builder.add(product_id, quantity)?;
        }

        let demand = builder.build();
        tracing::debug!(
            "原料展開完成：產品 {} 個，原料 {} 種，總量 {}",
            quantities.len(),
            demand.len(),
            demand.total()
        );

        Ok(demand)
    }
}
