//! Comparison output rows
//!
//! One row per `(bank, rate)` offer, consumed unchanged by every display and
//! export collaborator (tables, charts, spreadsheets) so they all agree.

use crate::growth::GrowthPoint;
use serde::{Deserialize, Serialize};

/// Projected outcome of one offer for the requested principal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    /// Display name of the offering bank
    pub bank_name: String,

    /// Term the bank actually offers, in months
    pub offered_term_months: u32,

    /// Term the projection was computed over:
    /// min(requested term, offered term)
    pub effective_term_months: u32,

    /// Annual interest rate as a decimal fraction
    pub interest_rate: f64,

    /// Projected balance at the end of the effective term, rounded to cents
    pub final_amount: f64,

    /// Month-by-month balances over the effective term
    pub growth: Vec<GrowthPoint>,
}

impl ComparisonRow {
    /// Whether the projection ran over a shorter period than the bank's
    /// offered term (the user asked to compare fewer months)
    pub fn projection_shorter_than_offer(&self) -> bool {
        self.effective_term_months < self.offered_term_months
    }
}

/// The row with the highest final amount, if any
///
/// Display ordering stays catalog order; this is only a convenience for
/// summary lines and batch output.
pub fn best_row(rows: &[ComparisonRow]) -> Option<&ComparisonRow> {
    rows.iter()
        .max_by(|a, b| a.final_amount.total_cmp(&b.final_amount))
}
