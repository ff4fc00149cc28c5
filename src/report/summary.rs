//! Load summary and tier distribution reports

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::{Dataset, IncomeTier, LoadSummary};
use crate::utils::{format_money, print_indented};

fn count_cell(count: usize, highlight: Color) -> Cell {
    Cell::new(count).fg(if count == 0 { Color::White } else { highlight })
}

pub fn build_summary_table(summary: &LoadSummary) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Metric").add_attribute(Attribute::Bold),
        Cell::new("Value").add_attribute(Attribute::Bold),
    ]);

    table.add_row(vec![Cell::new("📁 Rows Read"), Cell::new(summary.rows_read)]);
    table.add_row(vec![
        Cell::new("🗑️  Dropped (Sparse)"),
        count_cell(summary.dropped_sparse, Color::Red),
    ]);
    table.add_row(vec![
        Cell::new("🗑️  Dropped (No Country/City)"),
        count_cell(summary.dropped_unlabeled, Color::Red),
    ]);
    table.add_row(vec![
        Cell::new("🩹 Filled (Country Median)"),
        count_cell(summary.filled_by_country, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("🩹 Filled (Global Mean)"),
        count_cell(summary.filled_by_global_mean, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("🔗 Duplicates Removed"),
        count_cell(summary.duplicates_removed, Color::Red),
    ]);
    table.add_row(vec![
        Cell::new("✅ Cities Available"),
        Cell::new(summary.records)
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
    ]);

    table
}

pub fn display_summary(summary: &LoadSummary) {
    println!();
    println!(
        "    {} {}",
        style("📋").cyan(),
        style("DATASET SUMMARY").white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
    println!();

    print_indented(&build_summary_table(summary));
}

pub fn build_tier_table(dataset: &Dataset) -> Table {
    let edges = dataset.tier_edges();

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Tier").add_attribute(Attribute::Bold),
        Cell::new("Income Range (USD)").add_attribute(Attribute::Bold),
        Cell::new("Cities").add_attribute(Attribute::Bold),
    ]);

    for (tier, count) in dataset.tier_counts() {
        let range = match (tier, edges) {
            (_, None) => String::from("-"),
            (IncomeTier::Low, Some(e)) => format!("≤ {}", format_money(e.low_upper)),
            (IncomeTier::Medium, Some(e)) => format!(
                "{} – {}",
                format_money(e.low_upper),
                format_money(e.medium_upper)
            ),
            (IncomeTier::High, Some(e)) => format!("> {}", format_money(e.medium_upper)),
        };
        table.add_row(vec![
            Cell::new(tier.to_string()).add_attribute(Attribute::Bold),
            Cell::new(range),
            Cell::new(count),
        ]);
    }

    table
}

pub fn display_tiers(dataset: &Dataset) {
    println!();
    println!(
        "    {} {}",
        style("💼").cyan(),
        style("INCOME TIERS").white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
    println!();

    print_indented(&build_tier_table(dataset));
}
