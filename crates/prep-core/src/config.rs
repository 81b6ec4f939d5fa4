//! 備料計劃參數配置

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{PrepError, Result};

/// 價格平均方式（合併同一產品的各尺寸價格）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceAveraging {
    /// 以實際出現的規格數量為除數
    ObservedVariants,
    /// 固定除數（舊版報表固定除以 3）
    FixedDivisor(u32),
}

/// 備料計劃參數
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanningConfig {
    /// 毛利率（售出一個產品實現的利潤比例）
    pub margin_rate: Decimal,

    /// 搜尋區間下限（相對於平均值的偏移，含）
    pub min_offset: i64,

    /// 搜尋區間上限（含）
    pub max_offset: i64,

    /// 原料字串分隔符
    pub ingredient_delimiter: String,

    /// 規格代碼分隔符
    pub variant_delimiter: char,

    /// 已知的尺寸代碼
    pub size_codes: Vec<String>,

    /// 價格平均方式
    pub price_averaging: PriceAveraging,

    /// 是否並行執行各產品的數量搜尋
    pub parallel_search: bool,
}

impl PlanningConfig {
    /// 創建預設配置
    pub fn new() -> Self {
        Self {
            margin_rate: Decimal::new(15, 2),
            min_offset: -8,
            max_offset: -1,
            ingredient_delimiter: ", ".to_string(),
            variant_delimiter: '_',
            size_codes: ["s", "m", "l", "xl", "xxl"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            price_averaging: PriceAveraging::ObservedVariants,
            parallel_search: true,
        }
    }

    /// 從 JSON 載入配置並驗證
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| PrepError::InvalidConfig(format!("JSON 解析失敗: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// 建構器模式：設置毛利率
    pub fn with_margin_rate(mut self, margin_rate: Decimal) -> Self {
        self.margin_rate = margin_rate;
        self
    }

    /// 建構器模式：設置搜尋區間
    pub fn with_offset_window(mut self, min_offset: i64, max_offset: i64) -> Self {
        self.min_offset = min_offset;
        self.max_offset = max_offset;
        self
    }

    /// 建構器模式：設置原料分隔符
    pub fn with_ingredient_delimiter(mut self, delimiter: &str) -> Self {
        self.ingredient_delimiter = delimiter.to_string();
        self
    }

    /// 建構器模式：設置尺寸代碼
    pub fn with_size_codes(mut self, size_codes: Vec<String>) -> Self {
        self.size_codes = size_codes;
        self
    }

    /// 建構器模式：設置價格平均方式
    pub fn with_price_averaging(mut self, averaging: PriceAveraging) -> Self {
        self.price_averaging = averaging;
        self
    }

    /// 建構器模式：設置是否並行搜尋
    pub fn with_parallel_search(mut self, parallel: bool) -> Self {
        self.parallel_search = parallel;
        self
    }

    /// 滯銷成本率（1 - 毛利率）
    pub fn cost_rate(&self) -> Decimal {
        Decimal::ONE - self.margin_rate
    }

    /// 搜尋偏移量（由小到大）
    pub fn offsets(&self) -> std::ops::RangeInclusive<i64> {
        self.min_offset..=self.max_offset
    }

    /// 驗證配置
    pub fn validate(&self) -> Result<()> {
        if self.margin_rate <= Decimal::ZERO || self.margin_rate >= Decimal::ONE {
            return Err(PrepError::InvalidConfig(format!(
                "毛利率必須介於 0 與 1 之間: {}",
                self.margin_rate
            )));
        }

        if self.min_offset > self.max_offset {
            return Err(PrepError::EmptySearchWindow {
                min_offset: self.min_offset,
                max_offset: self.max_offset,
            });
        }

        if self.ingredient_delimiter.is_empty() {
            return Err(PrepError::InvalidConfig("原料分隔符不可為空".to_string()));
        }

        if self.size_codes.is_empty() {
            return Err(PrepError::InvalidConfig("至少需要一個尺寸代碼".to_string()));
        }

        if self.price_averaging == PriceAveraging::FixedDivisor(0) {
            return Err(PrepError::InvalidConfig("價格除數不可為 0".to_string()));
        }

        Ok(())
    }
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self::new()
    }
}
