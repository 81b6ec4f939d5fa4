//! # Prep Core
//!
//! 核心資料模型與類型定義

pub mod calendar;
pub mod catalog;
pub mod config;
pub mod order;
pub mod plan;
pub mod sales;
pub mod variant;

// Re-export 主要類型
pub use calendar::WeekCalendar;
pub use catalog::{CatalogEntry, CatalogIndex, PriceEntry, Product};
pub use config::{PlanningConfig, PriceAveraging};
pub use order::{OrderHeader, OrderLine, OrderWeek};
pub use plan::{
    CategoryCount, IngredientDemand, OptimalQuantities, ProductShare, ProductionPlan, SalesMix,
    WeeklyProfit, WeeklyTotal,
};
pub use sales::{WeeklySales, WeeklySalesTable};
pub use variant::VariantResolver;

/// 備料計算錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum PrepError {
    #[error("找不到產品: {0}")]
    ProductNotFound(String),

    #[error("找不到產品價格: {0}")]
    PriceNotFound(String),

    #[error("無法解析產品規格: {0}")]
    UnresolvedVariant(String),

    #[error("訂單明細引用了不存在的訂單 {order_id}（產品規格 {variant}）")]
    UnknownOrder { order_id: u64, variant: String },

    #[error("訂單 {order_id} 的週次無效: {week}")]
    InvalidWeek { order_id: u64, week: u32 },

    #[error("重複的訂單編號: {0}")]
    DuplicateOrder(u64),

    #[error("搜尋區間為空: {min_offset}..={max_offset}")]
    EmptySearchWindow { min_offset: i64, max_offset: i64 },

    #[error("無效的配置: {0}")]
    InvalidConfig(String),

    #[error("沒有任何訂單資料")]
    EmptyDataset,

    #[error("計算錯誤: {0}")]
    CalculationError(String),
}

pub type Result<T> = std::result::Result<T, PrepError>;
