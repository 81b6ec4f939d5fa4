//! 產品規格解析
//!
//! 將帶尺寸後綴的規格代碼（如 `bbq_ckn_l`、`the_greek_xxl`）還原為基礎產品代碼。

use serde::{Deserialize, Serialize};

use crate::{PlanningConfig, PrepError, Result};

/// 規格解析器
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantResolver {
    /// 規格代碼分隔符
    delimiter: char,
    /// 已知的尺寸代碼
    size_codes: Vec<String>,
}

impl VariantResolver {
    /// 創建新的規格解析器
    pub fn new(delimiter: char, size_codes: Vec<String>) -> Self {
        Self {
            delimiter,
            size_codes,
        }
    }

    /// 從計劃參數建立解析器
    pub fn from_config(config: &PlanningConfig) -> Self {
        Self::new(config.variant_delimiter, config.size_codes.clone())
    }

    /// 解析基礎產品代碼
    ///
    /// 最後一個分隔符之後必須是已知的尺寸代碼，且之前的部分不可為空。
    /// 無法辨識的規格直接回報錯誤，不做猜測。
    pub fn resolve<'a>(&self, variant_id: &'a str) -> Result<&'a str> {
        let (base, size) = variant_id
            .rsplit_once(self.delimiter)
            .ok_or_else(|| PrepError::UnresolvedVariant(variant_id.to_string()))?;

        if base.is_empty() || !self.is_size_code(size) {
            return Err(PrepError::UnresolvedVariant(variant_id.to_string()));
        }

        Ok(base)
    }

    /// 檢查是否為已知尺寸代碼
    pub fn is_size_code(&self, code: &str) -> bool {
        self.size_codes.iter().any(|c| c == code)
    }
}

impl Default for VariantResolver {
    fn default() -> Self {
        Self::from_config(&PlanningConfig::default())
    }
}
