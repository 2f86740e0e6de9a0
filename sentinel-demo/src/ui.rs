// SPDX-License-Identifier: PMPL-1.0-or-later
//! Shared banner helper for the scenario catalogues.

use colored::Colorize;

pub fn banner(title: &str, contract: &str, blurb: &str) {
    println!();
    println!("{}", "=".repeat(67).blue());
    println!("  {}", title.bold());
    println!("  {} {}", "contract:".dimmed(), contract.yellow());
    println!("{}", "=".repeat(67).blue());
    println!("  {blurb}");
}
