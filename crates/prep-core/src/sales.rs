//! 每週銷量模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{PrepError, Result};

/// 單一產品的每週銷量
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklySales {
    /// 基礎產品代碼
    pub product_id: String,

    /// 每週銷量（索引 0 = 第 1 週）
    pub weeks: Vec<u32>,

    /// 歷史週平均（含零銷量週）
    pub mean: Decimal,
}

impl WeeklySales {
    /// 由每週銷量建立，並計算平均值
    pub fn from_weeks(product_id: String, weeks: Vec<u32>) -> Self {
        let mean = if weeks.is_empty() {
            Decimal::ZERO
        } else {
            Decimal::from(weeks.iter().map(|&u| u64::from(u)).sum::<u64>())
                / Decimal::from(weeks.len() as u64)
        };

        Self {
            product_id,
            weeks,
            mean,
        }
    }

    /// 總銷量
    pub fn total(&self) -> u64 {
        self.weeks.iter().map(|&u| u64::from(u)).sum()
    }

    /// 某週銷量（週次從 1 開始）
    pub fn week(&self, week: u32) -> Option<u32> {
        if week == 0 {
            return None;
        }
        self.weeks.get(week as usize - 1).copied()
    }

    /// 是否完全沒有銷量
    pub fn is_zero(&self) -> bool {
        self.weeks.iter().all(|&u| u == 0)
    }
}

/// 每週銷量表（產品 × 週）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklySalesTable {
    /// 總週數
    week_count: u32,

    /// 各產品銷量（依目錄順序）
    rows: Vec<WeeklySales>,
}

impl WeeklySalesTable {
    /// 創建銷量表，所有列長度必須等於總週數
    pub fn new(week_count: u32, rows: Vec<WeeklySales>) -> Result<Self> {
        if let Some(row) = rows.iter().find(|r| r.weeks.len() != week_count as usize) {
            return Err(PrepError::CalculationError(format!(
                "產品 {} 的週數 {} 與總週數 {} 不一致",
                row.product_id,
                row.weeks.len(),
                week_count
            )));
        }
        Ok(Self { week_count, rows })
    }

    pub fn week_count(&self) -> u32 {
        self.week_count
    }

    pub fn rows(&self) -> &[WeeklySales] {
        &self.rows
    }

    /// 取得產品的銷量列
    pub fn get(&self, product_id: &str) -> Result<&WeeklySales> {
        self.rows
            .iter()
            .find(|r| r.product_id == product_id)
            .ok_or_else(|| PrepError::ProductNotFound(product_id.to_string()))
    }

    /// 所有產品的總銷量
    pub fn total_units(&self) -> u64 {
        self.rows.iter().map(|r| r.total()).sum()
    }

    /// 每週所有產品合計銷量（索引 0 = 第 1 週）
    pub fn weekly_totals(&self) -> Vec<u64> {
        let mut totals = vec![0u64; self.week_count as usize];
        for row in &self.rows {
            for (slot, &units) in totals.iter_mut().zip(&row.weeks) {
                *slot += u64::from(units);
            }
        }
        totals
    }
}
