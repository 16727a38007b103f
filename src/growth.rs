//! Compound-growth calculations for a single principal/rate/term triple
//!
//! All amounts are rounded to cents using round-half-up. Terms are expressed
//! in months and converted to fractional years, so a 6-month deposit compounds
//! with an exponent of 0.5 rather than a whole number of years.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Projected balance at the end of a given month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthPoint {
    /// Month index, 1-based
    pub month: u32,

    /// Cumulative amount at the end of this month, rounded to cents
    pub amount: f64,
}

/// Errors from malformed calculator input
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GrowthError {
    /// Caller misuse: surfaced synchronously, never retried
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Stateless compound-growth calculator
///
/// Construct explicitly and pass where needed; instances are interchangeable
/// and safe to share across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct GrowthCalculator;

impl GrowthCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Final amount after `term_months` of annual compounding:
    /// principal * (1 + annual_rate)^(term_months / 12), rounded to cents.
    ///
    /// `annual_rate` is a fraction (0.035 = 3.5%), not a percentage. Zero and
    /// negative rates are allowed; rates at or below -100% are rejected since
    /// the fractional power is undefined there.
    pub fn final_amount(
        &self,
        principal: f64,
        annual_rate: f64,
        term_months: u32,
    ) -> Result<f64, GrowthError> {
        validate_args(principal, annual_rate, term_months)?;

        let years = term_months as f64 / 12.0;
        let amount = principal * (1.0 + annual_rate).powf(years);
        Ok(round_to_cents(amount))
    }

    /// Growth series: one point per month of the term, point `m` computed as
    /// `final_amount(principal, annual_rate, m)`.
    ///
    /// Each point depends only on elapsed time, not on earlier points, so the
    /// series is a closed-form evaluation rather than an iterative recurrence.
    pub fn growth_series(
        &self,
        principal: f64,
        annual_rate: f64,
        term_months: u32,
    ) -> Result<Vec<GrowthPoint>, GrowthError> {
        validate_args(principal, annual_rate, term_months)?;

        let series = (1..=term_months)
            .map(|month| {
                let years = month as f64 / 12.0;
                let amount = principal * (1.0 + annual_rate).powf(years);
                GrowthPoint {
                    month,
                    amount: round_to_cents(amount),
                }
            })
            .collect();

        Ok(series)
    }
}

fn validate_args(principal: f64, annual_rate: f64, term_months: u32) -> Result<(), GrowthError> {
    if !principal.is_finite() || principal <= 0.0 {
        return Err(GrowthError::InvalidArgument(format!(
            "principal must be positive, got {}",
            principal
        )));
    }
    if !annual_rate.is_finite() || annual_rate <= -1.0 {
        return Err(GrowthError::InvalidArgument(format!(
            "annual rate must be a finite fraction above -1.0, got {}",
            annual_rate
        )));
    }
    if term_months < 1 {
        return Err(GrowthError::InvalidArgument(
            "term must be at least 1 month".to_string(),
        ));
    }
    Ok(())
}

/// Round-half-up to 2 decimal places (currency rounding)
fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_final_amount_one_year() {
        let calc = GrowthCalculator::new();
        let amount = calc.final_amount(10_000.0, 0.05, 12).unwrap();
        assert_eq!(amount, 10_500.00);
    }

    #[test]
    fn test_final_amount_fractional_year() {
        let calc = GrowthCalculator::new();

        // 6 months = 0.5 years: 10000 * 1.05^0.5 = 10246.95...
        let amount = calc.final_amount(10_000.0, 0.05, 6).unwrap();
        assert_abs_diff_eq!(amount, 10_246.95, epsilon = 0.005);
    }

    #[test]
    fn test_series_last_point_matches_final_amount() {
        let calc = GrowthCalculator::new();
        let series = calc.growth_series(10_000.0, 0.05, 6).unwrap();
        let direct = calc.final_amount(10_000.0, 0.05, 6).unwrap();

        assert_eq!(series.last().unwrap().amount, direct);
    }

    #[test]
    fn test_series_shape_and_monotonicity() {
        let calc = GrowthCalculator::new();
        let series = calc.growth_series(10_000.0, 0.05, 24).unwrap();

        assert_eq!(series.len(), 24);
        for (i, point) in series.iter().enumerate() {
            assert_eq!(point.month, (i + 1) as u32);
        }
        for pair in series.windows(2) {
            assert!(pair[1].amount > pair[0].amount);
        }
    }

    #[test]
    fn test_zero_rate_is_flat() {
        let calc = GrowthCalculator::new();
        let series = calc.growth_series(5_000.0, 0.0, 12).unwrap();

        assert!(series.iter().all(|p| p.amount == 5_000.00));
    }

    #[test]
    fn test_negative_rate_shrinks() {
        let calc = GrowthCalculator::new();
        let amount = calc.final_amount(10_000.0, -0.02, 12).unwrap();

        assert!(amount < 10_000.0);
        assert_eq!(amount, 9_800.00);
    }

    #[test]
    fn test_invalid_arguments_rejected() {
        let calc = GrowthCalculator::new();

        assert!(calc.final_amount(0.0, 0.05, 12).is_err());
        assert!(calc.final_amount(-100.0, 0.05, 12).is_err());
        assert!(calc.final_amount(10_000.0, 0.05, 0).is_err());
        assert!(calc.final_amount(10_000.0, -1.0, 12).is_err());
        assert!(calc.final_amount(10_000.0, f64::NAN, 12).is_err());
        assert!(calc.growth_series(10_000.0, 0.05, 0).is_err());
    }
}
