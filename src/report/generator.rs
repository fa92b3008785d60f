//! Text and JSON rendering of results.
//!
//! Every command's output goes through this module so that the text and
//! JSON forms stay in step.

use crate::aggregate::Summary;
use crate::cli::OutputFormat;
use crate::fizzbuzz::Move;
use crate::models::{Ledger, LedgerTotal, RevenueReport};
use anyhow::Result;
use serde::Serialize;

/// Render the result of `sum`.
pub fn render_sum(summary: &Summary, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => generate_json(summary),
        OutputFormat::Text => Ok(format!(
            "{}\n({} values, rounding: {})\n",
            summary.sum, summary.count, summary.mode
        )),
    }
}

/// Render a revenue report.
pub fn render_revenue(report: &RevenueReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => generate_json(report),
        OutputFormat::Text => Ok(generate_revenue_text(report)),
    }
}

/// Render the list of known ledgers.
pub fn render_ledgers(ledgers: &[Ledger], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => generate_json(&ledgers),
        OutputFormat::Text => {
            let mut output = String::new();
            for ledger in ledgers {
                output.push_str(&format!(
                    "{}: {} entries (per {})\n",
                    ledger.name,
                    ledger.entries.len(),
                    ledger.period
                ));
            }
            Ok(output)
        }
    }
}

/// Render fizzbuzz moves, one per line in text form.
pub fn render_fizzbuzz(moves: &[Move], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let calls: Vec<String> = moves.iter().map(|m| m.to_string()).collect();
            generate_json(&calls)
        }
        OutputFormat::Text => {
            let mut output = String::new();
            for m in moves {
                output.push_str(&m.to_string());
                output.push('\n');
            }
            Ok(output)
        }
    }
}

fn generate_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    Ok(json)
}

/// Generate the text form of a revenue report.
fn generate_revenue_text(report: &RevenueReport) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Revenue report ({})\n",
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    output.push_str(&format!("Rounding: {}\n\n", report.rounding));

    if report.ledgers.is_empty() {
        output.push_str("No ledgers selected.\n\n");
    } else {
        output.push_str(&format!(
            "{:<16} {:<8} {:>7} {:>14}\n",
            "Ledger", "Period", "Entries", "Total"
        ));
        for total in &report.ledgers {
            output.push_str(&generate_ledger_row(total));
        }
        output.push('\n');
    }

    output.push_str(&format!("Grand total: {:.2}\n", report.grand_total));

    output
}

fn generate_ledger_row(total: &LedgerTotal) -> String {
    format!(
        "{:<16} {:<8} {:>7} {:>14.2}\n",
        total.name,
        total.period.to_string(),
        total.entries,
        total.total
    )
}
