//! # Prep Calculation Engine
//!
//! 週銷量彙總、最佳產量搜尋與原料需求展開

pub mod aggregation;
pub mod bucketing;
pub mod calculator;
pub mod profit;
pub mod rollup;
pub mod search;
pub mod summary;

// Re-export 主要類型
pub use bucketing::OrderWeekIndex;
pub use calculator::PrepCalculator;
pub use search::{CandidateEvaluation, SearchOutcome};

/// 備料計算結果
#[derive(Debug, Clone)]
pub struct PrepResult {
    /// 備料計劃
    pub plan: prep_core::ProductionPlan,

    /// 各產品搜尋明細（依目錄順序）
    pub search_outcomes: Vec<SearchOutcome>,

    /// 警告信息
    pub warnings: Vec<PrepWarning>,

    /// 計算耗時（毫秒）
    pub calculation_time_ms: Option<u128>,
}

impl PrepResult {
    /// 添加警告
    pub fn add_warning(&mut self, warning: PrepWarning) {
        self.warnings.push(warning);
    }

    /// 取得產品搜尋明細
    pub fn search_outcome(&self, product_id: &str) -> Option<&SearchOutcome> {
        self.search_outcomes
            .iter()
            .find(|o| o.product_id == product_id)
    }
}

/// 備料警告
#[derive(Debug, Clone)]
pub struct PrepWarning {
    pub product_id: String,
    pub message: String,
    pub severity: WarningSeverity,
}

impl PrepWarning {
    pub fn new(product_id: String, message: String, severity: WarningSeverity) -> Self {
        Self {
            product_id,
            message,
            severity,
        }
    }

    pub fn info(product_id: String, message: String) -> Self {
        Self::new(product_id, message, WarningSeverity::Info)
    }

    pub fn warning(product_id: String, message: String) -> Self {
        Self::new(product_id, message, WarningSeverity::Warning)
    }

    pub fn error(product_id: String, message: String) -> Self {
        Self::new(product_id, message, WarningSeverity::Error)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningSeverity {
    Info,
    Warning,
    Error,
}
