//! 利潤回測與銷售組合範例
//!
//! 使用已分週的訂單與 JSON 配置，輸出每週利潤、每週銷量與分類佔比

use pizza_prep::{
    CatalogEntry, CatalogIndex, OrderLine, OrderWeek, PlanningConfig, PrepCalculator, PriceEntry,
};
use rust_decimal::Decimal;

const CONFIG_JSON: &str = r#"{
    "margin_rate": "0.15",
    "min_offset": -8,
    "max_offset": -1,
    "ingredient_delimiter": ", ",
    "variant_delimiter": "_",
    "size_codes": ["s", "m", "l", "xl", "xxl"],
    "price_averaging": { "FixedDivisor": 3 },
    "parallel_search": false
}"#;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    println!("===== Pizza Prep Profit Report Example =====\n");

    let config = PlanningConfig::from_json(CONFIG_JSON)?;
    println!("[1] Config: margin {}, window {}..={}\n", config.margin_rate, config.min_offset, config.max_offset);

    let catalog = CatalogIndex::build(
        &[
            CatalogEntry::new("pepperoni", "Mozzarella Cheese, Pepperoni").with_category("Classic"),
            CatalogEntry::new("veggie_veg", "Mushrooms, Tomatoes, Red Peppers, Green Peppers, Red Onions, Zucchini, Spinach, Garlic")
                .with_category("Veggie"),
        ],
        &[
            PriceEntry::new("pepperoni_s", Decimal::new(950, 2)),
            PriceEntry::new("pepperoni_m", Decimal::new(1250, 2)),
            PriceEntry::new("pepperoni_l", Decimal::new(1550, 2)),
            PriceEntry::new("veggie_veg_s", Decimal::from(12)),
            PriceEntry::new("veggie_veg_m", Decimal::from(16)),
            PriceEntry::new("veggie_veg_l", Decimal::new(2025, 2)),
        ],
        &config,
    )?;

    // 12 週，每週一張訂單；第 7 週停業
    let mut orders = Vec::new();
    let mut lines = Vec::new();
    for week in 1..=12u32 {
        if week == 7 {
            continue;
        }
        let order_id = u64::from(week);
        orders.push(OrderWeek::new(order_id, week));
        lines.push(OrderLine::new(order_id, "pepperoni_m", 20 + week % 4));
        lines.push(OrderLine::new(order_id, "veggie_veg_l", 5 + week % 3));
    }

    let calculator = PrepCalculator::new(catalog, config)?;
    let result = calculator.calculate_bucketed(&orders, &lines)?;

    println!("[2] Weekly Profit / Units");
    for (profit, total) in result.plan.weekly_profit.iter().zip(&result.plan.weekly_totals) {
        println!(
            "    week {:>2} | units {:>3} | profit {:>8}",
            profit.week,
            total.units,
            profit.profit.round_dp(2)
        );
    }
    println!("    Total profit: {}\n", result.plan.total_profit().round_dp(2));

    println!("[3] Sales Mix");
    for category in &result.plan.sales_mix.categories {
        println!("    {:<10} {}", category.category, category.count);
    }
    for share in &result.plan.sales_mix.products {
        println!("    {:<10} {}%", share.product_id, share.percentage);
    }

    println!("\n===== Report Complete =====\n");

    Ok(())
}
