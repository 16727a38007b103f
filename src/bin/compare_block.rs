//! Run comparisons for a grid of amounts and terms against one catalog
//!
//! Outputs one summary line per request with the best offer, for sanity
//! checking rate tables after bulk updates.

use anyhow::Context;
use deposit_compare::comparison::best_row;
use deposit_compare::{load_catalog, ComparisonEngine, ComparisonRequest, GrowthCalculator};
use rayon::prelude::*;
use std::fs::File;
use std::io::Write;
use std::time::Instant;

const AMOUNTS: [f64; 4] = [1_000.0, 10_000.0, 50_000.0, 250_000.0];
const TERMS: [u32; 5] = [3, 6, 12, 24, 60];

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let banks_path = std::env::args().nth(1).unwrap_or_else(|| "data/banks.csv".to_string());
    let rates_path = std::env::args().nth(2).unwrap_or_else(|| "data/rates.csv".to_string());

    let start = Instant::now();
    let catalog = load_catalog(&banks_path, &rates_path)
        .with_context(|| format!("loading catalog from {} and {}", banks_path, rates_path))?;
    println!(
        "Loaded {} banks / {} offers in {:?}",
        catalog.banks().len(),
        catalog.offer_count(),
        start.elapsed()
    );

    let requests: Vec<ComparisonRequest> = AMOUNTS
        .iter()
        .flat_map(|&amount| TERMS.iter().map(move |&term| ComparisonRequest::new(amount, term)))
        .collect();

    println!("Running {} comparisons...", requests.len());
    let compare_start = Instant::now();

    // The engine is pure and stateless, so requests fan out freely
    let engine = ComparisonEngine::new(GrowthCalculator::new());
    let results: Vec<_> = requests
        .par_iter()
        .map(|request| engine.compare(&catalog, request).map(|rows| (*request, rows)))
        .collect::<Result<_, _>>()?;

    println!("Comparisons complete in {:?}", compare_start.elapsed());

    let output_path = "comparison_block_output.csv";
    let mut file = File::create(output_path).context("creating output file")?;
    writeln!(file, "Amount,RequestedTermMonths,Offers,BestBank,BestFinalAmount")?;

    for (request, rows) in &results {
        let (best_bank, best_amount) = match best_row(rows) {
            Some(best) => (best.bank_name.as_str(), best.final_amount),
            None => ("", 0.0),
        };
        writeln!(
            file,
            "{:.2},{},{},{},{:.2}",
            request.amount,
            request.term_months,
            rows.len(),
            best_bank,
            best_amount,
        )?;
    }

    println!("Summary written to: {}", output_path);
    Ok(())
}
