//! List rules command implementation.

use gatekeeper_rules::{rule_docs, Category};

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!(
        "{:<7} {:<24} {:<7} {:<8} Description",
        "Code", "Name", "Kind", "Category"
    );
    println!("{}", "-".repeat(100));

    for doc in rule_docs() {
        println!(
            "{:<7} {:<24} {:<7} {:<8} {}",
            doc.code,
            doc.name,
            doc.kind.to_string(),
            doc.category.name(),
            doc.description
        );
    }

    println!("\nCategories:");
    for category in Category::ALL {
        let codes: Vec<&'static str> = category.rules().iter().map(|r| r.code()).collect();
        println!(
            "  {:<8} {:<22} {}",
            category.name(),
            codes.join(", "),
            category.description()
        );
    }

    println!("\nRun one category, every rule, or all categories in isolation:");
    println!("  gatekeeper check tokens");
    println!("  gatekeeper check");
    println!("  gatekeeper gate");
    println!("\nDetails for one rule:");
    println!("  gatekeeper explain hardcoded-value");
}
