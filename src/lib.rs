//! # Pizza Prep
//!
//! 依全年銷售紀錄計算每週最佳產量與原料需求
//!
//! - [`prep_core`]：資料模型、配置與錯誤類型
//! - [`prep_calc`]：週銷量彙總、產量搜尋、原料展開

pub use prep_calc;
pub use prep_core;

pub use prep_calc::{PrepCalculator, PrepResult, PrepWarning, WarningSeverity};
pub use prep_core::{
    CatalogEntry, CatalogIndex, IngredientDemand, OrderHeader, OrderLine, OrderWeek,
    PlanningConfig, PrepError, PriceAveraging, PriceEntry, ProductionPlan, WeeklySales,
    WeeklySalesTable,
};
