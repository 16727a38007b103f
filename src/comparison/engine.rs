//! Core comparison engine: one projected row per catalog offer

use super::rows::ComparisonRow;
use crate::catalog::RateCatalog;
use crate::growth::{GrowthCalculator, GrowthError};
use thiserror::Error;

/// A user's comparison request
///
/// Immutable, constructed per invocation. `amount` is the principal to
/// invest; `term_months` is how long the user wants to compare over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComparisonRequest {
    pub amount: f64,
    pub term_months: u32,
}

impl ComparisonRequest {
    pub fn new(amount: f64, term_months: u32) -> Self {
        Self { amount, term_months }
    }
}

/// Errors at the comparison boundary
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ComparisonError {
    /// Malformed request; surfaced to the request layer for user-facing
    /// validation messaging. No partial comparison is returned.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Growth(#[from] GrowthError),
}

/// Comparison engine combining a catalog snapshot with a request
///
/// Pure and stateless: `compare` has no side effects and is safe to call
/// concurrently from any number of request handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComparisonEngine {
    calculator: GrowthCalculator,
}

impl ComparisonEngine {
    /// Create an engine with an explicitly injected calculator
    pub fn new(calculator: GrowthCalculator) -> Self {
        Self { calculator }
    }

    /// Project every offer in the catalog against the request
    ///
    /// Emits one row per `(bank, rate)` offer in catalog order - banks in
    /// catalog order, each bank's rates in catalog order - so consumers can
    /// display rows without sorting. Offers are never filtered out by term
    /// mismatch; each projection runs over the effective term
    /// `min(request.term_months, rate.term_months)`, and the row carries the
    /// offered term alongside it. An empty catalog yields an empty result.
    pub fn compare(
        &self,
        catalog: &RateCatalog,
        request: &ComparisonRequest,
    ) -> Result<Vec<ComparisonRow>, ComparisonError> {
        validate_request(request)?;

        let mut rows = Vec::with_capacity(catalog.offer_count());
        for (bank, rate) in catalog.offers() {
            let effective_term = request.term_months.min(rate.term_months);

            // Catalog ingestion guarantees term >= 1 and a well-formed rate,
            // so the calculator cannot reject these arguments.
            let final_amount =
                self.calculator
                    .final_amount(request.amount, rate.interest_rate, effective_term)?;
            let growth =
                self.calculator
                    .growth_series(request.amount, rate.interest_rate, effective_term)?;

            rows.push(ComparisonRow {
                bank_name: bank.name.clone(),
                offered_term_months: rate.term_months,
                effective_term_months: effective_term,
                interest_rate: rate.interest_rate,
                final_amount,
                growth,
            });
        }

        Ok(rows)
    }
}

fn validate_request(request: &ComparisonRequest) -> Result<(), ComparisonError> {
    if !request.amount.is_finite() || request.amount <= 0.0 {
        return Err(ComparisonError::InvalidRequest(format!(
            "amount must be positive, got {}",
            request.amount
        )));
    }
    if request.term_months < 1 {
        return Err(ComparisonError::InvalidRequest(
            "term must be at least 1 month".to_string(),
        ));
    }
    Ok(())
}
