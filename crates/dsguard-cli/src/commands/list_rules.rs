//! List rules command implementation.

use dsguard_rules::{all_project_rules, all_rules};

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<10} {:<25} Description", "Code", "Name");
    println!("{}", "-".repeat(80));

    for rule in all_rules() {
        println!(
            "{:<10} {:<25} {}",
            rule.code(),
            rule.name(),
            rule.description()
        );
    }
    for rule in all_project_rules() {
        println!(
            "{:<10} {:<25} {}",
            rule.code(),
            rule.name(),
            rule.description()
        );
    }

    println!("\nPresets:");
    println!("  recommended  - DS001-DS003 plus all provider checks (default)");
    println!("  strict       - Same rules, test files checked, locale provider required");
    println!("  minimal      - DS001 only (for gradual adoption)");

    println!("\nUse --rules to filter specific rules, e.g.:");
    println!("  dsguard check --rules no-raw-html,no-inline-styles");
    println!("  dsguard check --rules DS001,DS102");
}
