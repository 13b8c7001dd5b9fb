//! Output formatting for CLI

use crate::{menace::TableStats, pipeline::TrainingResult};

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{key}:"), value);
}

pub fn print_result(result: &TrainingResult) {
    print_kv("Total games", &format_number(result.total_games));
    print_kv(
        "Wins",
        &format!("{} ({:.1}%)", result.wins, result.win_rate * 100.0),
    );
    print_kv(
        "Draws",
        &format!("{} ({:.1}%)", result.draws, result.draw_rate * 100.0),
    );
    print_kv(
        "Losses",
        &format!("{} ({:.1}%)", result.losses, result.loss_rate * 100.0),
    );
    if result.resignations > 0 {
        print_kv("Resignations", &result.resignations.to_string());
    }
}

pub fn print_table_stats(stats: &TableStats) {
    print_kv("Matchboxes", &format_number(stats.boxes));
    print_kv("Total beads", &stats.total_beads.to_string());
    print_kv("Empty matchboxes", &format_number(stats.empty_boxes));
}
