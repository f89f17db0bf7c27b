use expense_tracker_core::prelude::*;
use std::env;

fn bar(value: f64, max: f64) -> String {
    let width = 24;
    let filled = if max > 0.0 {
        ((value / max) * width as f64).round() as usize
    } else {
        0
    };
    "█".repeat(filled.min(width)) + &"░".repeat(width - filled.min(width))
}

fn main() -> Result<()> {
    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| "demo-expenses.json".to_string());

    println!("Opening expense store: {}", path);
    let mut tracker = ExpenseTracker::open(&path)?;

    if tracker.is_empty() {
        println!("Store is empty, seeding a few sample expenses...");
        let today = chrono::Local::now().date_naive();
        tracker.add(ExpenseDraft::new(today, Category::Food, 12.40, "Lunch"))?;
        tracker.add(ExpenseDraft::new(
            today - chrono::Duration::days(1),
            Category::Fuel,
            52.00,
            "Tank refill",
        ))?;
        tracker.add(ExpenseDraft::new(
            today - chrono::Duration::days(9),
            Category::Entertainment,
            21.99,
            "",
        ))?;
        tracker.add(ExpenseDraft::new(
            today - chrono::Duration::days(40),
            Category::Utilities,
            88.10,
            "Electricity",
        ))?;
    }

    let now = chrono::Local::now().date_naive();

    println!("\n--- Expenses ({}) ---", tracker.len());
    for record in tracker.records() {
        println!(
            "{}  {:<10} {:<13} ${:>8.2}  {}",
            record.id(),
            record.date(),
            record.category().to_string(),
            record.amount(),
            record.description()
        );
    }

    println!("\n--- Totals ---");
    println!("All time:   ${:.2}", tracker.total_sum());
    println!("This week:  ${:.2}", tracker.current_week_sum(now));
    println!("This month: ${:.2}", tracker.current_month_sum(now));

    println!("\n--- By category ---");
    let totals = tracker.category_totals();
    let mut sorted: Vec<_> = totals.iter().collect();
    sorted.sort_by(|a, b| b.1.partial_cmp(a.1).unwrap());
    for (category, total) in sorted {
        println!("{:<13} ${:.2}", category.to_string(), total);
    }

    println!("\n--- Last 4 weeks ---");
    let weekly = tracker.weekly_series(now);
    let max = weekly.values().iter().cloned().fold(0.0, f64::max);
    for (label, value) in weekly.labels().iter().zip(weekly.values()) {
        println!("{:<9} {} ${:.2}", label, bar(*value, max), value);
    }

    println!("\n--- Last 6 months ---");
    let monthly = tracker.monthly_series(now);
    let max = monthly.values().iter().cloned().fold(0.0, f64::max);
    for (label, value) in monthly.labels().iter().zip(monthly.values()) {
        println!("{:<9} {} ${:.2}", label, bar(*value, max), value);
    }

    println!("\n--- Filtering ---");
    let criteria = FilterCriteria::new().with_category(Category::Food);
    let food = tracker.filtered(&criteria);
    println!("Food expenses: {}", food.len());

    Ok(())
}
