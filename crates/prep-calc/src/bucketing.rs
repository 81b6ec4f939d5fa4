//! 時間分桶（訂單 → 週次）

use prep_core::{OrderHeader, OrderWeek, PrepError, WeekCalendar};
use std::collections::HashMap;

/// 訂單週次索引
#[derive(Debug, Clone)]
pub struct OrderWeekIndex {
    /// 訂單編號 → 週次
    weeks: HashMap<u64, u32>,

    /// 總週數
    week_count: u32,
}

impl OrderWeekIndex {
    /// 由已分週的訂單建立索引
    ///
    /// 週次必須從 1 開始，總週數取最大週次，中間沒有訂單的週仍計入。
    pub fn from_weeks(orders: &[OrderWeek]) -> prep_core::Result<Self> {
        if orders.is_empty() {
            return Err(PrepError::EmptyDataset);
        }

        let mut weeks = HashMap::with_capacity(orders.len());
        let mut week_count = 0;

        for order in orders {
            if order.week == 0 {
                return Err(PrepError::InvalidWeek {
                    order_id: order.order_id,
                    week: order.week,
                });
            }
            if weeks.insert(order.order_id, order.week).is_some() {
                return Err(PrepError::DuplicateOrder(order.order_id));
            }
            week_count = week_count.max(order.week);
        }

        Ok(Self { weeks, week_count })
    }

    /// 訂單所屬週次
    pub fn week_of(&self, order_id: u64) -> Option<u32> {
        self.weeks.get(&order_id).copied()
    }

    pub fn week_count(&self) -> u32 {
        self.week_count
    }

    pub fn order_count(&self) -> usize {
        self.weeks.len()
    }
}

/// 時間分桶計算器
pub struct BucketingCalculator;

impl BucketingCalculator {
    /// 將帶日期的訂單分配到週次
    ///
    /// 以最早日期為第 1 週起點，每 7 個日曆日一週。
    pub fn bucket_orders(
        headers: &[OrderHeader],
    ) -> prep_core::Result<(WeekCalendar, Vec<OrderWeek>)> {
        let calendar = WeekCalendar::from_dates(headers.iter().map(|h| h.date))?;

        let mut orders = Vec::with_capacity(headers.len());
        for header in headers {
            let week = calendar.week_of(header.date).ok_or_else(|| {
                PrepError::CalculationError(format!(
                    "訂單 {} 的日期 {} 超出日曆範圍",
                    header.order_id, header.date
                ))
            })?;
            orders.push(OrderWeek::new(header.order_id, week));
        }

        tracing::debug!(
            "分桶完成：訂單 {} 筆，週數 {}，起始日期 {}",
            orders.len(),
            calendar.week_count(),
            calendar.start_date
        );

        Ok((calendar, orders))
    }

    /// 將帶日期的訂單直接建成週次索引
    ///
    /// 最晚日期所在週即最大週次，因此總週數涵蓋首尾之間的每一週。
    pub fn index_orders(headers: &[OrderHeader]) -> prep_core::Result<OrderWeekIndex> {
        let (_, orders) = Self::bucket_orders(headers)?;
        OrderWeekIndex::from_weeks(&orders)
    }
}
