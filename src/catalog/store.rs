//! Write path for the bank/rate registry
//!
//! The store owns the mutable catalog state and the notifier explicitly: a
//! rate create or update publishes a [`RateChangeEvent`] only after the
//! mutation has succeeded. There are no implicit lifecycle hooks and no
//! global dispatcher.

use super::data::{validate_rate, Bank, CatalogError, Rate, RateCatalog};
use crate::notify::{ChangeNotifier, RateChangeEvent, RATES_CHANNEL};
use chrono::Utc;
use std::sync::{Arc, RwLock};

#[derive(Debug, Default)]
struct StoreState {
    banks: Vec<Bank>,
    rates: Vec<Rate>,
    next_rate_id: u32,
}

/// In-memory bank/rate registry with explicit change notification
///
/// Readers take a [`snapshot`](Self::snapshot); writers go through
/// [`add_bank`](Self::add_bank) and [`set_rate`](Self::set_rate). Clones
/// share the same underlying state.
#[derive(Clone)]
pub struct CatalogStore {
    state: Arc<RwLock<StoreState>>,
    notifier: ChangeNotifier,
}

impl CatalogStore {
    /// Create an empty store wired to the given notifier
    pub fn new(notifier: ChangeNotifier) -> Self {
        Self {
            state: Arc::new(RwLock::new(StoreState {
                banks: Vec::new(),
                rates: Vec::new(),
                next_rate_id: 1,
            })),
            notifier,
        }
    }

    /// Seed a store from an existing catalog snapshot
    pub fn from_catalog(catalog: &RateCatalog, notifier: ChangeNotifier) -> Self {
        let next_rate_id = catalog.rates().iter().map(|r| r.id + 1).max().unwrap_or(1);
        Self {
            state: Arc::new(RwLock::new(StoreState {
                banks: catalog.banks().to_vec(),
                rates: catalog.rates().to_vec(),
                next_rate_id,
            })),
            notifier,
        }
    }

    /// Register a bank; names and ids must be unique
    pub fn add_bank(&self, bank: Bank) -> Result<(), CatalogError> {
        let mut state = self.state.write().unwrap();
        if state.banks.iter().any(|b| b.id == bank.id) {
            return Err(CatalogError::DuplicateBankId(bank.id));
        }
        if state.banks.iter().any(|b| b.name == bank.name) {
            return Err(CatalogError::DuplicateBankName(bank.name));
        }
        state.banks.push(bank);
        Ok(())
    }

    /// Create or update the rate a bank offers for a term
    ///
    /// Validates first; nothing is mutated and no event is published on
    /// failure. On success the updated rate is returned and a change event
    /// goes out on [`RATES_CHANNEL`].
    pub fn set_rate(
        &self,
        bank_id: u32,
        term_months: u32,
        interest_rate: f64,
    ) -> Result<Rate, CatalogError> {
        let rate = {
            let mut state = self.state.write().unwrap();
            if !state.banks.iter().any(|b| b.id == bank_id) {
                return Err(CatalogError::UnknownBank {
                    rate_id: state.next_rate_id,
                    bank_id,
                });
            }

            let existing_idx = state
                .rates
                .iter()
                .position(|r| r.bank_id == bank_id && r.term_months == term_months);

            let rate = Rate {
                id: existing_idx
                    .map(|i| state.rates[i].id)
                    .unwrap_or(state.next_rate_id),
                bank_id,
                term_months,
                interest_rate,
            };
            validate_rate(&rate)?;

            match existing_idx {
                Some(i) => state.rates[i] = rate,
                None => {
                    state.next_rate_id += 1;
                    state.rates.push(rate);
                }
            }
            rate
        };

        // Publish only after the write lock is released and the mutation is
        // durable; the writer succeeds even with zero reachable subscribers.
        self.notifier.publish(
            RATES_CHANNEL,
            RateChangeEvent {
                rate_id: rate.id,
                bank_id: rate.bank_id,
                term_months: rate.term_months,
                interest_rate: rate.interest_rate,
                changed_at: Utc::now(),
            },
        );

        Ok(rate)
    }

    /// Point-in-time catalog snapshot
    ///
    /// The snapshot is fully independent: writes committed after this call
    /// are not visible through it.
    pub fn snapshot(&self) -> RateCatalog {
        let state = self.state.read().unwrap();
        // Store invariants match catalog invariants, so this cannot fail
        RateCatalog::new(state.banks.clone(), state.rates.clone())
            .expect("store state satisfies catalog invariants")
    }

    /// The notifier this store publishes on
    pub fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }
}
