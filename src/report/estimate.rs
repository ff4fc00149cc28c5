//! Custom estimate rendering

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Color, Table};
use console::style;

use crate::pipeline::{Affordability, Category, CustomEstimate, CustomEstimateInput};
use crate::utils::{format_money, format_ratio, print_indented};

pub fn build_inputs_table(input: &CustomEstimateInput) -> Table {
    let amounts = input.amounts();

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Input").add_attribute(Attribute::Bold),
        Cell::new("Monthly (USD)").add_attribute(Attribute::Bold),
        Cell::new("Weight").add_attribute(Attribute::Bold),
    ]);

    for category in Category::SPENDING {
        let weight = category
            .weight()
            .map(|w| format!("{:.0}%", w * 100.0))
            .unwrap_or_default();
        table.add_row(vec![
            Cell::new(category.label()),
            Cell::new(format_money(amounts.get(category))).set_alignment(CellAlignment::Right),
            Cell::new(weight).set_alignment(CellAlignment::Right),
        ]);
    }
    table.add_row(vec![
        Cell::new("Monthly Net Income").add_attribute(Attribute::Bold),
        Cell::new(format_money(input.income)).set_alignment(CellAlignment::Right),
        Cell::new(""),
    ]);

    table
}

pub fn affordability_color(affordability: Affordability) -> Color {
    match affordability {
        Affordability::Exceeds => Color::Red,
        Affordability::Tight => Color::Yellow,
        Affordability::Manageable => Color::Green,
    }
}

pub fn display_estimate(input: &CustomEstimateInput, result: &CustomEstimate) {
    println!();
    println!(
        "    {} {}",
        style("🧮").cyan(),
        style("CUSTOM LIVING COST ESTIMATE").white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
    println!();

    print_indented(&build_inputs_table(input));
    println!();

    println!(
        "    {} Estimated Cost of Living: {}",
        style("✓").green().bold(),
        style(format_money(result.cost_of_living)).green().bold()
    );
    println!(
        "    {} Cost-to-Income Ratio: {}",
        style("ℹ").cyan(),
        style(format_ratio(result.cost_to_income_ratio)).yellow()
    );

    let message = result.affordability.message();
    match result.affordability {
        Affordability::Manageable => {
            println!("    {} {}", style("✅").green(), style(message).green())
        }
        Affordability::Tight => {
            println!("    {} {}", style("⚠️ ").yellow(), style(message).yellow())
        }
        Affordability::Exceeds => {
            println!("    {} {}", style("⚠️ ").red(), style(message).red().bold())
        }
    }
}
