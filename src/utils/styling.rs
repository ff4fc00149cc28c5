//! Terminal styling utilities

use std::fmt::Display;
use std::path::Path;

use console::{style, Emoji};

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static GLOBE: Emoji<'_, '_> = Emoji("🌍 ", "");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "[!] ");

/// Print the application banner
pub fn print_banner(version: &str) {
    println!();
    println!(
        "    {}{}",
        GLOBE,
        style("Cost of Living Estimator").cyan().bold()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
}

/// Print the data source line
pub fn print_source(path: &Path) {
    println!(
        "    {}Data: {}",
        FOLDER,
        style(truncate_path(path, 60)).dim()
    );
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {}{}", INFO, message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("    {}{}", WARN, style(message).yellow());
}

/// Print a table (or any multi-line text) indented to match the other output
pub fn print_indented<T: Display>(content: &T) {
    for line in content.to_string().lines() {
        println!("    {}", line);
    }
}

/// Dollar amount with thousands separators and two decimals, e.g. `$1,234.50`
pub fn format_money(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (whole, fraction) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && formatted != "0.00" { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, fraction)
}

/// Ratio with two decimals
pub fn format_ratio(value: f64) -> String {
    format!("{:.2}", value)
}

// Helper functions

fn truncate_path(path: &Path, max_len: usize) -> String {
    let path_str = path.display().to_string();
    truncate_string(&path_str, max_len)
}

fn truncate_string(s: &str, max_len: usize) -> String {
    let count = s.chars().count();
    if count <= max_len {
        s.to_string()
    } else {
        let tail: String = s.chars().skip(count - max_len + 3).collect();
        format!("...{}", tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(0.0), "$0.00");
        assert_eq!(format_money(530.0), "$530.00");
        assert_eq!(format_money(1234.5), "$1,234.50");
        assert_eq!(format_money(1234567.891), "$1,234,567.89");
        assert_eq!(format_money(-250.0), "-$250.00");
        assert_eq!(format_money(-0.001), "$0.00");
    }

    #[test]
    fn test_format_ratio() {
        assert_eq!(format_ratio(530.0 / 3000.0), "0.18");
        assert_eq!(format_ratio(1.06), "1.06");
    }

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("short", 10), "short");
        assert_eq!(truncate_string("abcdefghijkl", 8), "...hijkl");
    }
}
