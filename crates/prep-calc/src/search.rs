//! 最小損失產量搜尋
//!
//! 以歷史週平均（取整）為基準，在固定偏移區間內逐一試算每個候選週產量，
//! 對所有觀測週累計不對稱損失：
//! - 產量高於實際銷量：多出部分損失 `單價 × 成本率`（原料已購入但未售出）
//! - 產量低於實際銷量：短缺部分損失 `單價 × 毛利率`（錯失的利潤）
//!
//! 取總損失最小者，同分時取先試算（偏移較小）的候選。

use prep_core::{PlanningConfig, PrepError, WeeklySales};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 候選產量試算結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateEvaluation {
    /// 相對於平均值（取整）的偏移
    pub offset: i64,
    /// 候選週產量（不低於 0）
    pub quantity: u32,
    /// 所有週的總損失
    pub loss: Decimal,
}

/// 單一產品的搜尋結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOutcome {
    /// 產品代碼
    pub product_id: String,
    /// 選中的偏移
    pub offset: i64,
    /// 最佳週產量
    pub quantity: u32,
    /// 最佳產量的總損失
    pub loss: Decimal,
    /// 所有候選的試算（依偏移由小到大）
    pub candidates: Vec<CandidateEvaluation>,
}

/// 產量搜尋器
pub struct QuantitySearch;

impl QuantitySearch {
    /// 單週損失
    pub fn week_loss(quantity: u32, sold: u32, price: Decimal, config: &PlanningConfig) -> Decimal {
        if quantity > sold {
            Decimal::from(quantity - sold) * price * config.cost_rate()
        } else {
            Decimal::from(sold - quantity) * price * config.margin_rate
        }
    }

    /// 候選產量在所有週的總損失
    pub fn total_loss(
        weeks: &[u32],
        quantity: u32,
        price: Decimal,
        config: &PlanningConfig,
    ) -> Decimal {
        weeks
            .iter()
            .map(|&sold| Self::week_loss(quantity, sold, price, config))
            .sum()
    }

    /// 由平均值與偏移計算候選產量（負值截為 0）
    pub fn candidate_quantity(mean: Decimal, offset: i64) -> prep_core::Result<u32> {
        let base = mean.floor().to_i64().ok_or_else(|| {
            PrepError::CalculationError(format!("平均值超出範圍: {}", mean))
        })?;

        let candidate = base.saturating_add(offset).max(0);
        u32::try_from(candidate).map_err(|_| {
            PrepError::CalculationError(format!("候選產量超出範圍: {}", candidate))
        })
    }

    /// 搜尋單一產品的最佳週產量
    pub fn search(
        sales: &WeeklySales,
        price: Decimal,
        config: &PlanningConfig,
    ) -> prep_core::Result<SearchOutcome> {
        let mut candidates: Vec<CandidateEvaluation> =
            Vec::with_capacity(config.offsets().count());
        let mut best: Option<usize> = None;

        for offset in config.offsets() {
            let quantity = Self::candidate_quantity(sales.mean, offset)?;
            let loss = Self::total_loss(&sales.weeks, quantity, price, config);

            // 嚴格小於：同分保留先出現的偏移
            let improved = match best {
                Some(idx) => loss < candidates[idx].loss,
                None => true,
            };
            if improved {
                best = Some(candidates.len());
            }

            candidates.push(CandidateEvaluation {
                offset,
                quantity,
                loss,
            });
        }

        let best = best.ok_or(PrepError::EmptySearchWindow {
            min_offset: config.min_offset,
            max_offset: config.max_offset,
        })?;
        let chosen = candidates[best].clone();

        tracing::debug!(
            "產品 {} 搜尋完成：平均 {}，偏移 {}，產量 {}，損失 {}",
            sales.product_id,
            sales.mean.round_dp(2),
            chosen.offset,
            chosen.quantity,
            chosen.loss
        );

        Ok(SearchOutcome {
            product_id: sales.product_id.clone(),
            offset: chosen.offset,
            quantity: chosen.quantity,
            loss: chosen.loss,
            candidates,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn sales(weeks: Vec<u32>) -> WeeklySales {
        WeeklySales::from_weeks("pizza_a".to_string(), weeks)
    }

    #[test]
    fn test_week_loss_is_asymmetric() {
        let config = PlanningConfig::default();
        let price = Decimal::from(10);

        // 多做 2 個：2 × 10 × 0.85
        assert_eq!(QuantitySearch::week_loss(7, 5, price, &config), Decimal::from(17));
        // 少做 2 個：2 × 10 × 0.15
        assert_eq!(QuantitySearch::week_loss(3, 5, price, &config), Decimal::from(3));
        assert_eq!(QuantitySearch::week_loss(5, 5, price, &config), Decimal::ZERO);
    }

    #[test]
    fn test_constant_sales_picks_highest_below_mean() {
        let outcome =
            QuantitySearch::search(&sales(vec![5; 5]), Decimal::from(10), &PlanningConfig::default())
                .unwrap();

        assert_eq!(outcome.offset, -1);
        assert_eq!(outcome.quantity, 4);
        // 每週少 1 個：1 × 10 × 0.15 × 5 週
        assert_eq!(outcome.loss, Decimal::new(75, 1));
        assert_eq!(outcome.candidates.len(), 8);
        let quantities: Vec<u32> = outcome.candidates.iter().map(|c| c.quantity).collect();
        assert_eq!(quantities, vec![0, 0, 0, 0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_all_zero_sales_selects_zero() {
        let outcome =
            QuantitySearch::search(&sales(vec![0; 51]), Decimal::from(12), &PlanningConfig::default())
                .unwrap();

        assert_eq!(outcome.quantity, 0);
        assert_eq!(outcome.loss, Decimal::ZERO);
        // 全部同分，取第一個偏移
        assert_eq!(outcome.offset, -8);
    }

    #[rstest]
    #[case(vec![20, 20, 20, 20], -1, 19)]
    #[case(vec![0, 0, 0, 40], -8, 2)]
    #[case(vec![3, 3, 3], -1, 2)]
    fn test_search_cases(
        #[case] weeks: Vec<u32>,
        #[case] expected_offset: i64,
        #[case] expected_quantity: u32,
    ) {
        let outcome =
            QuantitySearch::search(&sales(weeks), Decimal::from(10), &PlanningConfig::default())
                .unwrap();

        assert_eq!(outcome.offset, expected_offset);
        assert_eq!(outcome.quantity, expected_quantity);
    }

    #[test]
    fn test_symmetric_window_can_exceed_mean() {
        // 毛利率高時，寧可多做
        let config = PlanningConfig::default()
            .with_margin_rate(Decimal::new(90, 2))
            .with_offset_window(-2, 2);
        let outcome = QuantitySearch::search(&sales(vec![2, 10]), Decimal::from(10), &config).unwrap();

        assert_eq!(outcome.quantity, 8);
        assert_eq!(outcome.offset, 2);
    }

    #[test]
    fn test_single_offset_window() {
        let config = PlanningConfig::default().with_offset_window(-3, -3);
        let outcome = QuantitySearch::search(&sales(vec![6, 6]), Decimal::from(10), &config).unwrap();

        assert_eq!(outcome.candidates.len(), 1);
        assert_eq!(outcome.offset, -3);
        assert_eq!(outcome.quantity, 3);
        // 每週少 3 個：3 × 10 × 0.15 × 2 週
        assert_eq!(outcome.loss, Decimal::from(9));
    }

    #[test]
    fn test_empty_window() {
        let mut config = PlanningConfig::default();
        config.min_offset = 1;
        config.max_offset = 0;

        assert!(matches!(
            QuantitySearch::search(&sales(vec![1]), Decimal::ONE, &config),
            Err(PrepError::EmptySearchWindow { .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_search_is_deterministic_and_minimal(
            weeks in prop::collection::vec(0u32..60, 1..52),
            cents in 100i64..5000,
        ) {
            let config = PlanningConfig::default();
            let price = Decimal::new(cents, 2);
            let sales = sales(weeks);

            let first = QuantitySearch::search(&sales, price, &config).unwrap();
            let second = QuantitySearch::search(&sales, price, &config).unwrap();
            prop_assert_eq!(&first, &second);

            prop_assert!(first.candidates.iter().all(|c| c.loss >= first.loss));
            let floor = sales.mean.floor().to_i64().unwrap();
            prop_assert!(i64::from(first.quantity) <= (floor - 1).max(0));
        }
    }
}
