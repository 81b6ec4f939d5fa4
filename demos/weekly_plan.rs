//! 披薩店全年備料計算範例
//!
//! 產生一年的模擬訂單，計算每種披薩的最佳週產量，再展開為原料需求

use chrono::{Duration, NaiveDate};
use pizza_prep::{
    CatalogEntry, CatalogIndex, OrderHeader, OrderLine, PlanningConfig, PrepCalculator, PriceEntry,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    println!("===== Pizza Prep Weekly Plan Example =====\n");

    // 步驟 1: 建立產品目錄
    println!("[1] Build Catalog");
    let config = PlanningConfig::default();
    let catalog = CatalogIndex::build(&catalog_entries(), &price_entries(), &config)?;
    for product in catalog.products() {
        println!(
            "    {:<12} price {:>6} | {}",
            product.product_id,
            product.price.round_dp(2),
            product.ingredients.join(", ")
        );
    }
    println!();

    // 步驟 2: 產生模擬訂單
    println!("[2] Generate Orders");
    let (headers, lines) = generate_orders(2015, 42);
    println!("    Orders: {}, Lines: {}\n", headers.len(), lines.len());

    // 步驟 3: 執行計算
    println!("[3] Execute Prep Calculation");
    let calculator = PrepCalculator::new(catalog, config)?;
    let result = calculator.calculate(&headers, &lines)?;
    println!(
        "    Completed in {} ms, {} weeks\n",
        result.calculation_time_ms.unwrap_or(0),
        result.plan.weekly_sales.week_count()
    );

    // 步驟 4: 最佳週產量
    println!("[4] Optimal Weekly Quantities");
    for outcome in &result.search_outcomes {
        let mean = result.plan.weekly_sales.get(&outcome.product_id)?.mean;
        println!(
            "    {:<12} mean {:>6} | offset {:>3} | qty {:>3} | loss {}",
            outcome.product_id,
            mean.round_dp(2),
            outcome.offset,
            outcome.quantity,
            outcome.loss.round_dp(2)
        );
    }
    println!();

    // 步驟 5: 原料需求
    println!("[5] Ingredients");
    println!("    {:<34}Quantity:", "Ingredients:");
    println!("    {}", "-".repeat(40));
    for (ingredient, quantity) in result.plan.ingredient_demand.iter() {
        println!("    {:<35}{}", ingredient, quantity);
    }
    println!();

    if !result.warnings.is_empty() {
        println!("    Warnings:");
        for warning in &result.warnings {
            println!("      - [{}] {}", warning.product_id, warning.message);
        }
    }

    println!("===== Prep Calculation Complete =====\n");

    Ok(())
}

fn catalog_entries() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry::new(
            "bbq_ckn",
            "Barbecued Chicken, Red Peppers, Green Peppers, Tomatoes, Red Onions, Barbecue Sauce",
        )
        .with_category("Chicken"),
        CatalogEntry::new("hawaiian", "Sliced Ham, Pineapple, Mozzarella Cheese")
            .with_category("Classic"),
        CatalogEntry::new(
            "the_greek",
            "Kalamata Olives, Feta Cheese, Tomatoes, Garlic, Beef Chuck Roast, Red Onions",
        )
        .with_category("Classic"),
        CatalogEntry::new("spinach_fet", "Spinach, Mushrooms, Red Onions, Feta Cheese, Garlic")
            .with_category("Veggie"),
    ]
}

fn price_entries() -> Vec<PriceEntry> {
    let rows = [
        ("bbq_ckn_s", 1275),
        ("bbq_ckn_m", 1675),
        ("bbq_ckn_l", 2075),
        ("hawaiian_s", 1050),
        ("hawaiian_m", 1325),
        ("hawaiian_l", 1650),
        ("the_greek_s", 1200),
        ("the_greek_m", 2000),
        ("the_greek_l", 2000),
        ("the_greek_xl", 2550),
        ("the_greek_xxl", 3595),
        ("spinach_fet_s", 1200),
        ("spinach_fet_m", 1600),
        ("spinach_fet_l", 2025),
    ];
    rows.iter()
        .map(|&(variant, cents)| PriceEntry::new(variant, Decimal::new(cents, 2)))
        .collect()
}

/// 產生一年的模擬訂單（固定亂數種子，可重現）
fn generate_orders(year: i32, seed: u64) -> (Vec<OrderHeader>, Vec<OrderLine>) {
    let variants = [
        "bbq_ckn_s",
        "bbq_ckn_l",
        "hawaiian_m",
        "hawaiian_l",
        "the_greek_xl",
        "the_greek_m",
        "spinach_fet_s",
    ];
    let mut rng = StdRng::seed_from_u64(seed);
    let mut headers = Vec::new();
    let mut lines = Vec::new();

    let start = NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or_default();
    let mut order_id = 0u64;
    for day in 0..365 {
        let date = start + Duration::days(day);
        for _ in 0..rng.gen_range(5..15) {
            order_id += 1;
            headers.push(OrderHeader::new(order_id, date));
            for _ in 0..rng.gen_range(1..4) {
                let variant = variants[rng.gen_range(0..variants.len())];
                lines.push(OrderLine::new(order_id, variant, rng.gen_range(1..3)));
            }
        }
    }

    (headers, lines)
}
