//! Catalog data structures: banks, rate offers, and the immutable snapshot

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A bank offering term deposits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bank {
    /// Unique bank identifier
    pub id: u32,

    /// Display name, unique within a catalog
    pub name: String,

    /// Bank website URL
    pub website: String,

    /// Logo reference for display layers
    #[serde(default)]
    pub logo_url: Option<String>,
}

/// A single term-deposit offer belonging to one bank
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rate {
    /// Unique rate identifier
    pub id: u32,

    /// Owning bank
    pub bank_id: u32,

    /// Term length in months, at least 1
    pub term_months: u32,

    /// Annual interest rate as a decimal fraction (0.035 = 3.5%)
    pub interest_rate: f64,
}

/// Data-integrity violations caught at catalog ingestion
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("duplicate bank id {0}")]
    DuplicateBankId(u32),

    #[error("duplicate bank name '{0}'")]
    DuplicateBankName(String),

    #[error("rate {rate_id} references unknown bank {bank_id}")]
    UnknownBank { rate_id: u32, bank_id: u32 },

    #[error("bank {bank_id} already offers a {term_months}-month term")]
    DuplicateOffer { bank_id: u32, term_months: u32 },

    #[error("rate {rate_id} has invalid term of {term_months} months")]
    InvalidTerm { rate_id: u32, term_months: u32 },

    #[error("rate {rate_id} has invalid interest rate {interest_rate}")]
    InvalidRate { rate_id: u32, interest_rate: f64 },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Immutable, point-in-time view of all banks and their offers
///
/// Validated on construction; once built, every rate references a known bank,
/// every term is at least one month, and each `(bank, term)` pair is unique.
/// Iteration order is the ingestion order and is stable across calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateCatalog {
    banks: Vec<Bank>,
    rates: Vec<Rate>,
}

impl RateCatalog {
    /// Build a catalog from banks and rates, validating all integrity rules
    pub fn new(banks: Vec<Bank>, rates: Vec<Rate>) -> Result<Self, CatalogError> {
        for (i, bank) in banks.iter().enumerate() {
            if banks[..i].iter().any(|b| b.id == bank.id) {
                return Err(CatalogError::DuplicateBankId(bank.id));
            }
            if banks[..i].iter().any(|b| b.name == bank.name) {
                return Err(CatalogError::DuplicateBankName(bank.name.clone()));
            }
        }

        for (i, rate) in rates.iter().enumerate() {
            validate_rate(rate)?;
            if !banks.iter().any(|b| b.id == rate.bank_id) {
                return Err(CatalogError::UnknownBank {
                    rate_id: rate.id,
                    bank_id: rate.bank_id,
                });
            }
            if rates[..i]
                .iter()
                .any(|r| r.bank_id == rate.bank_id && r.term_months == rate.term_months)
            {
                return Err(CatalogError::DuplicateOffer {
                    bank_id: rate.bank_id,
                    term_months: rate.term_months,
                });
            }
        }

        Ok(Self { banks, rates })
    }

    /// An empty catalog (valid; comparisons over it yield no rows)
    pub fn empty() -> Self {
        Self {
            banks: Vec::new(),
            rates: Vec::new(),
        }
    }

    pub fn banks(&self) -> &[Bank] {
        &self.banks
    }

    pub fn rates(&self) -> &[Rate] {
        &self.rates
    }

    /// Rates offered by one bank, in ingestion order
    pub fn rates_for(&self, bank_id: u32) -> impl Iterator<Item = &Rate> {
        self.rates.iter().filter(move |r| r.bank_id == bank_id)
    }

    /// All `(bank, rate)` offers: banks in catalog order, each bank's rates
    /// in catalog order. This is the order comparison rows are emitted in.
    pub fn offers(&self) -> impl Iterator<Item = (&Bank, &Rate)> {
        self.banks
            .iter()
            .flat_map(move |bank| self.rates_for(bank.id).map(move |rate| (bank, rate)))
    }

    /// Total number of `(bank, rate)` offers
    pub fn offer_count(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

/// Shared rate validation for ingestion and the write path
pub(crate) fn validate_rate(rate: &Rate) -> Result<(), CatalogError> {
    if rate.term_months < 1 {
        return Err(CatalogError::InvalidTerm {
            rate_id: rate.id,
            term_months: rate.term_months,
        });
    }
    if !rate.interest_rate.is_finite() || rate.interest_rate <= -1.0 {
        return Err(CatalogError::InvalidRate {
            rate_id: rate.id,
            interest_rate: rate.interest_rate,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bank(id: u32, name: &str) -> Bank {
        Bank {
            id,
            name: name.to_string(),
            website: format!("https://{}.example.com", name.to_lowercase()),
            logo_url: None,
        }
    }

    fn rate(id: u32, bank_id: u32, term_months: u32, interest_rate: f64) -> Rate {
        Rate {
            id,
            bank_id,
            term_months,
            interest_rate,
        }
    }

    #[test]
    fn test_valid_catalog() {
        let catalog = RateCatalog::new(
            vec![bank(1, "ANZ"), bank(2, "Kiwibank")],
            vec![rate(1, 1, 12, 0.04), rate(2, 1, 24, 0.045), rate(3, 2, 12, 0.041)],
        )
        .unwrap();

        assert_eq!(catalog.banks().len(), 2);
        assert_eq!(catalog.offer_count(), 3);
        assert_eq!(catalog.rates_for(1).count(), 2);
    }

    #[test]
    fn test_offers_in_catalog_order() {
        // Rates interleaved across banks; offers() groups by bank order
        let catalog = RateCatalog::new(
            vec![bank(1, "ANZ"), bank(2, "Kiwibank")],
            vec![rate(1, 2, 6, 0.03), rate(2, 1, 12, 0.04), rate(3, 2, 12, 0.041)],
        )
        .unwrap();

        let order: Vec<(u32, u32)> = catalog.offers().map(|(b, r)| (b.id, r.id)).collect();
        assert_eq!(order, vec![(1, 2), (2, 1), (2, 3)]);
    }

    #[test]
    fn test_zero_month_term_rejected() {
        let result = RateCatalog::new(vec![bank(1, "ANZ")], vec![rate(1, 1, 0, 0.04)]);
        assert!(matches!(result, Err(CatalogError::InvalidTerm { .. })));
    }

    #[test]
    fn test_duplicate_offer_rejected() {
        let result = RateCatalog::new(
            vec![bank(1, "ANZ")],
            vec![rate(1, 1, 12, 0.04), rate(2, 1, 12, 0.05)],
        );
        assert!(matches!(result, Err(CatalogError::DuplicateOffer { .. })));
    }

    #[test]
    fn test_unknown_bank_rejected() {
        let result = RateCatalog::new(vec![bank(1, "ANZ")], vec![rate(1, 9, 12, 0.04)]);
        assert!(matches!(result, Err(CatalogError::UnknownBank { .. })));
    }

    #[test]
    fn test_duplicate_bank_name_rejected() {
        let result = RateCatalog::new(vec![bank(1, "ANZ"), bank(2, "ANZ")], vec![]);
        assert!(matches!(result, Err(CatalogError::DuplicateBankName(_))));
    }

    #[test]
    fn test_out_of_range_rate_rejected() {
        let result = RateCatalog::new(vec![bank(1, "ANZ")], vec![rate(1, 1, 12, -1.5)]);
        assert!(matches!(result, Err(CatalogError::InvalidRate { .. })));
    }
}
