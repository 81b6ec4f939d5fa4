//! 訂單模型（已由清理流程正規化）

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 訂單表頭（含日期）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderHeader {
    /// 訂單編號
    pub order_id: u64,

    /// 下單日期
    pub date: NaiveDate,
}

impl OrderHeader {
    /// 創建新的訂單表頭
    pub fn new(order_id: u64, date: NaiveDate) -> Self {
        Self { order_id, date }
    }
}

/// 已分週的訂單表頭
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderWeek {
    /// 訂單編號
    pub order_id: u64,

    /// 週次（從 1 開始）
    pub week: u32,
}

impl OrderWeek {
    pub fn new(order_id: u64, week: u32) -> Self {
        Self { order_id, week }
    }
}

/// 訂單明細
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    /// 所屬訂單編號
    pub order_id: u64,

    /// 產品規格代碼（含尺寸，如 `bbq_ckn_l`）
    pub variant_id: String,

    /// 數量
    pub quantity: u32,
}

impl OrderLine {
    /// 創建新的訂單明細
    pub fn new(order_id: u64, variant_id: &str, quantity: u32) -> Self {
        Self {
            order_id,
            variant_id: variant_id.to_string(),
            quantity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_order_line() {
        let line = OrderLine::new(1, "hawaiian_m", 2);

        assert_eq!(line.order_id, 1);
        assert_eq!(line.variant_id, "hawaiian_m");
        assert_eq!(line.quantity, 2);
    }

    #[test]
    fn test_order_header_serde() {
        let header = OrderHeader::new(7, NaiveDate::from_ymd_opt(2015, 1, 3).unwrap());
        let json = serde_json::to_string(&header).unwrap();

        assert_eq!(json, r#"{"order_id":7,"date":"2015-01-03"}"#);
        assert_eq!(serde_json::from_str::<OrderHeader>(&json).unwrap(), header);
    }
}
