//! # Closing Report
//!
//! Plain-text closing report for a branch: cash metrics, product ranking,
//! and the most recent cash movements.
//!
//! Rendering is pure: the caller hands in snapshots from the stores and
//! gets a string back. Spreadsheet or widget output is a presentation
//! concern built on the same accessors.

use crate::types::{low_stock, CashTotals, LedgerEntry, StockLine, StockMode};
use crate::DEFAULT_LOW_STOCK_THRESHOLD;

/// How many movements the report tail shows, newest first.
const MOVEMENT_TAIL: usize = 10;

/// Renders the closing report for one branch.
///
/// ## Sections
/// 1. Cash metrics: balance, total income, total expense
/// 2. Product ranking sorted by state descending (kilograms on hand in
///    quantity mode, money generated in revenue mode)
/// 3. Low-stock warnings (quantity mode only)
/// 4. The last movements, newest first. The ledger accessor returns
///    entries in insertion order, so the reversal happens here at the
///    rendering edge
pub fn render_closing_report(
    branch: &str,
    mode: StockMode,
    lines: &[StockLine],
    entries: &[LedgerEntry],
    totals: &CashTotals,
) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== Closing report: {branch} ===\n"));
    out.push_str(&format!("Cash balance:  $ {:.2}\n", totals.balance()));
    out.push_str(&format!("Total income:  $ {:.2}\n", totals.income));
    out.push_str(&format!("Total expense: $ {:.2}\n", totals.expense));
    out.push('\n');

    let unit = match mode {
        StockMode::Quantity => "kg on hand",
        StockMode::Revenue => "$ generated",
    };
    out.push_str(&format!("--- Ranking ({unit}) ---\n"));

    let mut ranked: Vec<&StockLine> = lines.iter().collect();
    ranked.sort_by(|a, b| {
        b.state
            .partial_cmp(&a.state)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });
    if ranked.is_empty() {
        out.push_str("(no products registered)\n");
    }
    for line in &ranked {
        out.push_str(&format!("{:<24} {:>10.2}\n", line.name, line.state));
    }

    if mode == StockMode::Quantity {
        let low = low_stock(lines, DEFAULT_LOW_STOCK_THRESHOLD);
        if !low.is_empty() {
            out.push('\n');
            out.push_str("--- Low stock ---\n");
            for line in low {
                out.push_str(&format!("{:<24} {:>10.2}kg\n", line.name, line.state));
            }
        }
    }

    out.push('\n');
    out.push_str("--- Last movements ---\n");
    if entries.is_empty() {
        out.push_str("(no movements)\n");
    }
    for entry in entries.iter().rev().take(MOVEMENT_TAIL) {
        out.push_str(&format!(
            "#{:<5} {} {:>10.2}  {}\n",
            entry.id,
            entry.created_at.format("%Y-%m-%d %H:%M"),
            entry.signed_amount(),
            entry.memo,
        ));
    }

    out
}

// =============================================================================
// Unit Tests
// =============================================================================
