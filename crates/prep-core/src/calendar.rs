//! 週次日曆模型

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{PrepError, Result};

/// 每週天數
pub const DAYS_PER_WEEK: i64 = 7;

/// 週次日曆
///
/// 以第一個觀測日期為起點，每 7 個日曆日為一週，週次從 1 開始。
/// 最後一週可能不足 7 天，仍算作獨立一週。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekCalendar {
    /// 起始日期（第 1 週第 1 天）
    pub start_date: NaiveDate,

    /// 最後觀測日期
    pub end_date: NaiveDate,
}

impl WeekCalendar {
    /// 創建新的週次日曆
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Result<Self> {
        if end_date < start_date {
            return Err(PrepError::InvalidConfig(format!(
                "結束日期 {} 早於起始日期 {}",
                end_date, start_date
            )));
        }
        Ok(Self {
            start_date,
            end_date,
        })
    }

    /// 由觀測日期建立日曆（取最早與最晚日期）
    pub fn from_dates<I>(dates: I) -> Result<Self>
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        let mut bounds: Option<(NaiveDate, NaiveDate)> = None;
        for date in dates {
            bounds = Some(match bounds {
                None => (date, date),
                Some((lo, hi)) => (lo.min(date), hi.max(date)),
            });
        }

        let (start, end) = bounds.ok_or(PrepError::EmptyDataset)?;
        Self::new(start, end)
    }

    /// 取得日期所屬週次（超出範圍回傳 None）
    pub fn week_of(&self, date: NaiveDate) -> Option<u32> {
        if date < self.start_date || date > self.end_date {
            return None;
        }
        let days = (date - self.start_date).num_days();
        Some((days / DAYS_PER_WEEK) as u32 + 1)
    }

    /// 總週數（含最後不完整的一週）
    pub fn week_count(&self) -> u32 {
        // end_date 必在範圍內
        self.week_of(self.end_date).unwrap_or(1)
    }

    /// 某週的起始日期
    pub fn week_start(&self, week: u32) -> Option<NaiveDate> {
        if week == 0 || week > self.week_count() {
            return None;
        }
        self.start_date
            .checked_add_signed(Duration::days(i64::from(week - 1) * DAYS_PER_WEEK))
    }

    /// 某週實際包含的天數
    pub fn days_in_week(&self, week: u32) -> u32 {
        match self.week_start(week) {
            Some(start) => {
                let remaining = (self.end_date - start).num_days() + 1;
                remaining.min(DAYS_PER_WEEK) as u32
            }
            None => 0,
        }
    }

    /// 最後一週是否不完整
    pub fn has_partial_final_week(&self) -> bool {
        self.days_in_week(self.week_count()) < DAYS_PER_WEEK as u32
    }
}
