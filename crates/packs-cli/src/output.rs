//! Human-readable and JSON rendering of allocation results.

use anyhow::Result;
use colored::Colorize;
use packs_core::{AllocationResult, Catalog, CrossCheck};
use serde::Serialize;

/// Render a value as pretty JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Lines describing one allocation, without a trailing newline
pub fn format_result(result: &AllocationResult) -> String {
    let mut lines = Vec::with_capacity(result.packs.len() + 2);
    lines.push(format!(
        "Order {}: {} items in {} packs ({} waste)",
        result.amount,
        result.total_items,
        result.total_packs,
        result.waste()
    ));
    for pack in &result.packs {
        lines.push(format!("  {:>8} x {}", pack.pack_size, pack.count));
    }
    lines.join("\n")
}

pub fn print_result(result: &AllocationResult) {
    let text = format_result(result);
    let (header, body) = text.split_once('\n').unwrap_or((&text, ""));
    println!("{}", header.bold());
    if !body.is_empty() {
        println!("{}", body);
    }
}

pub fn print_distractors(amount: u64, distractors: &[AllocationResult]) {
    if distractors.is_empty() {
        println!("No distractors for {}", amount);
        return;
    }
    println!("{}", format!("Distractors for {}:", amount).bold());
    for (i, distractor) in distractors.iter().enumerate() {
        let packs: Vec<String> = distractor
            .packs
            .iter()
            .map(|p| format!("{}x{}", p.pack_size, p.count))
            .collect();
        println!(
            "  {}. {} ({} items, {} waste)",
            i + 1,
            packs.join(" + "),
            distractor.total_items,
            distractor.waste()
        );
    }
}

pub fn print_cross_check(check: &CrossCheck) {
    println!("{}", format!("[{}]", check.strategy).cyan());
    print_result(&check.primary);
    println!("{}", "[greedy-merge]".cyan());
    print_result(&check.reference);

    if check.agrees() {
        println!("{}", "Strategies agree".green());
    } else if check.primary_is_no_worse() {
        println!(
            "{}",
            format!("{} improves on greedy-merge", check.strategy).yellow()
        );
    } else {
        println!(
            "{}",
            format!("{} is worse than greedy-merge", check.strategy).red()
        );
    }
}

pub fn print_catalog(catalog: &Catalog) {
    println!("Pack sizes: {}", catalog.to_string().bold());
}
