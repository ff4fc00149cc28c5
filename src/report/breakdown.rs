//! Per-city overview: category breakdown and headline metrics

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Color, Table};
use console::style;

use super::estimate::affordability_color;
use crate::pipeline::{Affordability, IncomeTier, IndexedRecord};
use crate::utils::{format_money, format_ratio, print_indented};

/// Width of the bar column in the breakdown table
const BAR_WIDTH: usize = 30;

/// Horizontal bar proportional to `value / max`
pub fn render_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let filled = ((value / max) * width as f64).round() as usize;
    "█".repeat(filled.min(width))
}

/// Table of the six spending categories with proportional bars
pub fn build_breakdown_table(record: &IndexedRecord) -> Table {
    let spending = record.categories().spending();
    let max = spending.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max);

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Category").add_attribute(Attribute::Bold),
        Cell::new("Monthly (USD)").add_attribute(Attribute::Bold),
        Cell::new(""),
    ]);

    for (category, value) in spending {
        table.add_row(vec![
            Cell::new(category.label()),
            Cell::new(format_money(value)).set_alignment(CellAlignment::Right),
            Cell::new(render_bar(value, max, BAR_WIDTH)).fg(Color::Cyan),
        ]);
    }

    table
}

/// Table of cost of living, ratio, income and tier
pub fn build_metrics_table(record: &IndexedRecord) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Metric").add_attribute(Attribute::Bold),
        Cell::new("Value").add_attribute(Attribute::Bold),
    ]);

    table.add_row(vec![
        Cell::new("💵 Estimated Cost of Living (USD)"),
        Cell::new(format_money(record.cost_of_living))
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
    ]);

    let ratio_cell = match record.cost_to_income_ratio {
        Some(ratio) => Cell::new(format_ratio(ratio)).fg(ratio_color(ratio)),
        None => Cell::new("unavailable").fg(Color::DarkGrey),
    };
    table.add_row(vec![Cell::new("📈 Cost-to-Income Ratio"), ratio_cell]);

    table.add_row(vec![
        Cell::new("💼 Net Monthly Income (USD)"),
        Cell::new(format_money(record.income())),
    ]);

    table.add_row(vec![
        Cell::new("🏷️  Income Tier"),
        Cell::new(record.income_tier.to_string())
            .fg(tier_color(record.income_tier))
            .add_attribute(Attribute::Bold),
    ]);

    table
}

pub fn ratio_color(ratio: f64) -> Color {
    affordability_color(Affordability::from_ratio(ratio))
}

pub fn tier_color(tier: IncomeTier) -> Color {
    match tier {
        IncomeTier::Low => Color::Red,
        IncomeTier::Medium => Color::Yellow,
        IncomeTier::High => Color::Green,
    }
}

/// Print the overview for one city
pub fn display_overview(record: &IndexedRecord) {
    println!();
    println!(
        "    {} {}",
        style("📊").cyan(),
        style(format!(
            "COST OF LIVING BREAKDOWN IN {}, {}",
            record.city(),
            record.country()
        ))
        .white()
        .bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
    println!();

    print_indented(&build_breakdown_table(record));
    println!();
    print_indented(&build_metrics_table(record));
}
