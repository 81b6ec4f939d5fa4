//! 產品目錄索引

use indexmap::{IndexMap, IndexSet};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::variant::VariantResolver;
use crate::{PlanningConfig, PrepError, PriceAveraging, Result};

/// 產品目錄資料列
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// 基礎產品代碼
    pub product_id: String,

    /// 產品分類（如 Classic、Veggie）
    pub category: Option<String>,

    /// 原料字串（以分隔符串接）
    pub ingredients: String,
}

impl CatalogEntry {
    /// 創建新的目錄資料列
    pub fn new(product_id: &str, ingredients: &str) -> Self {
        Self {
            product_id: product_id.to_string(),
            category: None,
            ingredients: ingredients.to_string(),
        }
    }

    /// 建構器模式：設置分類
    pub fn with_category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }
}

/// 價格表資料列（以規格為單位）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceEntry {
    /// 規格代碼（含尺寸）
    pub variant_id: String,

    /// 售價
    pub price: Decimal,
}

impl PriceEntry {
    pub fn new(variant_id: &str, price: Decimal) -> Self {
        Self {
            variant_id: variant_id.to_string(),
            price,
        }
    }
}

/// 產品（目錄建立後不可變）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// 基礎產品代碼
    pub product_id: String,

    /// 產品分類
    pub category: Option<String>,

    /// 原料清單（保留順序，不去重）
    pub ingredients: Vec<String>,

    /// 單價（各尺寸平均）
    pub price: Decimal,
}

impl Product {
    /// 某原料在此產品中出現的次數
    pub fn multiplicity(&self, ingredient: &str) -> u32 {
        self.ingredients.iter().filter(|i| *i == ingredient).count() as u32
    }
}

/// 產品目錄索引
#[derive(Debug, Clone)]
pub struct CatalogIndex {
    /// 產品（依目錄順序）
    products: IndexMap<String, Product>,

    /// 規格解析器
    resolver: VariantResolver,
}

impl CatalogIndex {
    /// 由目錄與價格表建立索引
    ///
    /// 價格表中的規格先還原為基礎產品，再依配置的平均方式合併。
    /// 目錄中任何產品缺少價格、或價格表引用未知產品，都視為配置錯誤。
    pub fn build(
        entries: &[CatalogEntry],
        prices: &[PriceEntry],
        config: &PlanningConfig,
    ) -> Result<Self> {
        config.validate()?;
        let resolver = VariantResolver::from_config(config);

        let known: IndexSet<&str> = entries.iter().map(|e| e.product_id.as_str()).collect();

        // 合併各規格價格：(總和, 規格數)
        let mut price_sums: IndexMap<&str, (Decimal, u32)> = IndexMap::new();
        for row in prices {
            let base = resolver.resolve(&row.variant_id)?;
            if !known.contains(base) {
                return Err(PrepError::ProductNotFound(base.to_string()));
            }
            let slot = price_sums.entry(base).or_insert((Decimal::ZERO, 0));
            slot.0 += row.price;
            slot.1 += 1;
        }

        let mut products = IndexMap::with_capacity(entries.len());
        for entry in entries {
            if products.contains_key(&entry.product_id) {
                return Err(PrepError::InvalidConfig(format!(
                    "目錄中產品重複: {}",
                    entry.product_id
                )));
            }

            let (sum, count) = price_sums
                .get(entry.product_id.as_str())
                .copied()
                .ok_or_else(|| PrepError::PriceNotFound(entry.product_id.clone()))?;

            let divisor = match config.price_averaging {
                PriceAveraging::ObservedVariants => count,
                PriceAveraging::FixedDivisor(n) => n,
            };

            let ingredients = entry
                .ingredients
                .split(config.ingredient_delimiter.as_str())
                .filter(|s| !s.is_empty())
                .map(|s| s.to_string())
                .collect();

            products.insert(
                entry.product_id.clone(),
                Product {
                    product_id: entry.product_id.clone(),
                    category: entry.category.clone(),
                    ingredients,
                    price: sum / Decimal::from(divisor),
                },
            );
        }

        Ok(Self { products, resolver })
    }

    /// 取得產品
    pub fn product(&self, product_id: &str) -> Result<&Product> {
        self.products
            .get(product_id)
            .ok_or_else(|| PrepError::ProductNotFound(product_id.to_string()))
    }

    /// 取得產品原料清單
    pub fn ingredients_of(&self, product_id: &str) -> Result<&[String]> {
        Ok(&self.product(product_id)?.ingredients)
    }

    /// 取得產品單價
    pub fn price_of(&self, product_id: &str) -> Result<Decimal> {
        Ok(self.product(product_id)?.price)
    }

    /// 某原料在產品中的用量倍數
    pub fn multiplicity(&self, product_id: &str, ingredient: &str) -> Result<u32> {
        Ok(self.product(product_id)?.multiplicity(ingredient))
    }

    /// 將規格代碼解析為目錄中的產品
    pub fn resolve_variant(&self, variant_id: &str) -> Result<&Product> {
        let base = self.resolver.resolve(variant_id)?;
        self.product(base)
    }

    /// 所有產品（依目錄順序）
    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    /// 所有產品代碼（依目錄順序）
    pub fn product_ids(&self) -> impl Iterator<Item = &str> {
        self.products.keys().map(|k| k.as_str())
    }

    /// 所有被引用的原料（依首次出現順序，不重複）
    pub fn ingredient_names(&self) -> Vec<&str> {
        self.products
            .values()
            .flat_map(|p| p.ingredients.iter().map(|i| i.as_str()))
            .collect::<IndexSet<&str>>()
            .into_iter()
            .collect()
    }

    pub fn contains(&self, product_id: &str) -> bool {
        self.products.contains_key(product_id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entries() -> Vec<CatalogEntry> {
        vec![
            CatalogEntry::new("bbq_ckn", "Barbecued Chicken, Red Peppers, Green Peppers, Tomatoes")
                .with_category("Chicken"),
            CatalogEntry::new("the_greek", "Kalamata Olives, Feta Cheese, Tomatoes")
                .with_category("Classic"),
        ]
    }

    fn sample_prices() -> Vec<PriceEntry> {
        vec![
            PriceEntry::new("bbq_ckn_s", Decimal::new(1275, 2)),
            PriceEntry::new("bbq_ckn_m", Decimal::new(1675, 2)),
            PriceEntry::new("bbq_ckn_l", Decimal::new(2075, 2)),
            PriceEntry::new("the_greek_s", Decimal::from(12)),
            PriceEntry::new("the_greek_m", Decimal::from(20)),
            PriceEntry::new("the_greek_l", Decimal::from(20)),
            PriceEntry::new("the_greek_xl", Decimal::new(2550, 2)),
            PriceEntry::new("the_greek_xxl", Decimal::new(3595, 2)),
        ]
    }

    #[test]
    fn test_build_catalog() {
        let catalog =
            CatalogIndex::build(&sample_entries(), &sample_prices(), &PlanningConfig::default())
                .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(
            catalog.ingredients_of("the_greek").unwrap(),
            &["Kalamata Olives", "Feta Cheese", "Tomatoes"]
        );
        assert_eq!(catalog.price_of("bbq_ckn").unwrap(), Decimal::new(1675, 2));
        // (12 + 20 + 20 + 25.50 + 35.95) / 5
        assert_eq!(catalog.price_of("the_greek").unwrap(), Decimal::new(2269, 2));
    }

    #[test]
    fn test_fixed_divisor_averaging() {
        let config = PlanningConfig::default().with_price_averaging(PriceAveraging::FixedDivisor(3));
        let catalog = CatalogIndex::build(&sample_entries(), &sample_prices(), &config).unwrap();

        assert_eq!(catalog.price_of("bbq_ckn").unwrap(), Decimal::new(1675, 2));
        // 113.45 / 3
        assert_eq!(
            catalog.price_of("the_greek").unwrap(),
            Decimal::new(11345, 2) / Decimal::from(3)
        );
    }

    #[test]
    fn test_missing_price_fails_fast() {
        let mut entries = sample_entries();
        entries.push(CatalogEntry::new("hawaiian", "Sliced Ham, Pineapple, Mozzarella Cheese"));

        let result = CatalogIndex::build(&entries, &sample_prices(), &PlanningConfig::default());
        assert!(matches!(result, Err(PrepError::PriceNotFound(p)) if p == "hawaiian"));
    }

    #[test]
    fn test_price_for_unknown_product() {
        let mut prices = sample_prices();
        prices.push(PriceEntry::new("mexicana_m", Decimal::from(16)));

        let result = CatalogIndex::build(&sample_entries(), &prices, &PlanningConfig::default());
        assert!(matches!(result, Err(PrepError::ProductNotFound(p)) if p == "mexicana"));
    }

    #[test]
    fn test_duplicate_ingredients_kept() {
        let entries = vec![CatalogEntry::new("four_cheese", "Mozzarella, Mozzarella, Fontina, Gorgonzola")];
        let prices = vec![PriceEntry::new("four_cheese_m", Decimal::from(14))];
        let catalog = CatalogIndex::build(&entries, &prices, &PlanningConfig::default()).unwrap();

        assert_eq!(catalog.ingredients_of("four_cheese").unwrap().len(), 4);
        assert_eq!(catalog.multiplicity("four_cheese", "Mozzarella").unwrap(), 2);
        assert_eq!(catalog.multiplicity("four_cheese", "Basil").unwrap(), 0);
        assert_eq!(
            catalog.ingredient_names(),
            vec!["Mozzarella", "Fontina", "Gorgonzola"]
        );
    }

    #[test]
    fn test_duplicate_product_rejected() {
        let mut entries = sample_entries();
        entries.push(CatalogEntry::new("bbq_ckn", "Barbecued Chicken"));

        let result = CatalogIndex::build(&entries, &sample_prices(), &PlanningConfig::default());
        assert!(matches!(result, Err(PrepError::InvalidConfig(msg)) if msg.contains("bbq_ckn")));
    }

    #[test]
    fn test_custom_delimiter_and_size_codes() {
        let config = PlanningConfig::default()
            .with_ingredient_delimiter(";")
            .with_size_codes(vec!["small".to_string(), "large".to_string()]);
        let entries = vec![CatalogEntry::new("calabrese", "Nduja;;Pancetta;Tomatoes")];
        let prices = vec![
            PriceEntry::new("calabrese_small", Decimal::from(12)),
            PriceEntry::new("calabrese_large", Decimal::from(20)),
        ];

        let catalog = CatalogIndex::build(&entries, &prices, &config).unwrap();

        assert_eq!(
            catalog.ingredients_of("calabrese").unwrap(),
            &["Nduja", "Pancetta", "Tomatoes"]
        );
        assert_eq!(catalog.price_of("calabrese").unwrap(), Decimal::from(16));
        assert!(matches!(
            catalog.resolve_variant("calabrese_m"),
            Err(PrepError::UnresolvedVariant(_))
        ));
    }

    #[test]
    fn test_resolve_variant() {
        let catalog =
            CatalogIndex::build(&sample_entries(), &sample_prices(), &PlanningConfig::default())
                .unwrap();

        assert_eq!(catalog.resolve_variant("the_greek_xxl").unwrap().product_id, "the_greek");
        assert!(matches!(
            catalog.resolve_variant("hawaiian_l"),
            Err(PrepError::ProductNotFound(_))
        ));
        assert!(matches!(
            catalog.resolve_variant("the_greek"),
            Err(PrepError::UnresolvedVariant(_))
        ));
        assert!(catalog.product("spinach_fet").is_err());
    }
}
