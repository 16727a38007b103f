//! Deposit Compare CLI
//!
//! Loads a bank/rate catalog from CSV and prints a side-by-side comparison
//! of every offer for the given amount and term.

use anyhow::Context;
use clap::Parser;
use deposit_compare::comparison::best_row;
use deposit_compare::{load_catalog, ComparisonEngine, ComparisonRequest, GrowthCalculator};
use std::fs::File;
use std::io::Write;

#[derive(Debug, Parser)]
#[command(name = "deposit_compare", about = "Compare term-deposit offers")]
struct Args {
    /// Path to banks.csv
    #[arg(long, default_value = "data/banks.csv")]
    banks: String,

    /// Path to rates.csv
    #[arg(long, default_value = "data/rates.csv")]
    rates: String,

    /// Amount to invest
    #[arg(long)]
    amount: f64,

    /// Requested term in months
    #[arg(long)]
    term: u32,

    /// Write month-by-month growth series to this CSV file
    #[arg(long)]
    output: Option<String>,

    /// Print rows as JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();

    let catalog = load_catalog(&args.banks, &args.rates)
        .with_context(|| format!("loading catalog from {} and {}", args.banks, args.rates))?;

    let engine = ComparisonEngine::new(GrowthCalculator::new());
    let request = ComparisonRequest::new(args.amount, args.term);
    let rows = engine.compare(&catalog, &request)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!(
        "Comparing ${:.2} over {} months across {} offers\n",
        args.amount,
        args.term,
        rows.len()
    );
    println!(
        "{:<20} {:>10} {:>10} {:>8} {:>14}",
        "Bank", "Offered", "Effective", "Rate %", "Final Amount"
    );
    println!("{}", "-".repeat(66));

    for row in &rows {
        println!(
            "{:<20} {:>8}mo {:>8}mo {:>8.2} {:>14.2}",
            row.bank_name,
            row.offered_term_months,
            row.effective_term_months,
            row.interest_rate * 100.0,
            row.final_amount,
        );
    }

    if let Some(best) = best_row(&rows) {
        println!(
            "\nBest outcome: {} at ${:.2} after {} months",
            best.bank_name, best.final_amount, best.effective_term_months
        );
    }

    if let Some(path) = &args.output {
        let mut file = File::create(path).with_context(|| format!("creating {}", path))?;
        writeln!(file, "Bank,OfferedTermMonths,EffectiveTermMonths,InterestRate,Month,Amount")?;
        for row in &rows {
            for point in &row.growth {
                writeln!(
                    file,
                    "{},{},{},{:.6},{},{:.2}",
                    row.bank_name,
                    row.offered_term_months,
                    row.effective_term_months,
                    row.interest_rate,
                    point.month,
                    point.amount,
                )?;
            }
        }
        println!("\nGrowth series written to: {}", path);
    }

    Ok(())
}
