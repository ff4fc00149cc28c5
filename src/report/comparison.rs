//! Side-by-side comparison of two cities

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Color, Table};
use console::style;
use serde::Serialize;

use crate::pipeline::{Category, IndexedRecord};
use crate::utils::{format_money, print_indented};

/// One comparison line: a category (or the total) for both cities
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub label: String,
    pub first: f64,
    pub second: f64,
}

impl ComparisonRow {
    pub fn difference(&self) -> f64 {
        self.second - self.first
    }
}

/// The six spending categories followed by the cost-of-living total
pub fn comparison_rows(first: &IndexedRecord, second: &IndexedRecord) -> Vec<ComparisonRow> {
    let mut rows: Vec<ComparisonRow> = Category::SPENDING
        .iter()
        .map(|&category| ComparisonRow {
            label: category.label().to_string(),
            first: first.categories().get(category),
            second: second.categories().get(category),
        })
        .collect();

    rows.push(ComparisonRow {
        label: "Total".to_string(),
        first: first.cost_of_living,
        second: second.cost_of_living,
    });

    rows
}

pub fn build_comparison_table(first: &IndexedRecord, second: &IndexedRecord) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Category").add_attribute(Attribute::Bold),
        Cell::new(first.city()).add_attribute(Attribute::Bold),
        Cell::new(second.city()).add_attribute(Attribute::Bold),
        Cell::new("Difference").add_attribute(Attribute::Bold),
    ]);

    for row in comparison_rows(first, second) {
        let diff = row.difference();
        let diff_color = if diff > 0.0 {
            Color::Red
        } else if diff < 0.0 {
            Color::Green
        } else {
            Color::White
        };
        let sign = if diff > 0.0 { "+" } else { "" };

        let mut label = Cell::new(&row.label);
        if row.label == "Total" {
            label = label.add_attribute(Attribute::Bold);
        }

        table.add_row(vec![
            label,
            Cell::new(format_money(row.first)).set_alignment(CellAlignment::Right),
            Cell::new(format_money(row.second)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{}{}", sign, format_money(diff)))
                .fg(diff_color)
                .set_alignment(CellAlignment::Right),
        ]);
    }

    table
}

pub fn display_comparison(first: &IndexedRecord, second: &IndexedRecord) {
    println!();
    println!(
        "    {} {}",
        style("🔁").cyan(),
        style(format!(
            "{}, {} vs. {}, {}",
            first.city(),
            first.country(),
            second.city(),
            second.country()
        ))
        .white()
        .bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
    println!();

    print_indented(&build_comparison_table(first, second));
}
