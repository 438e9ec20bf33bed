//! Application state shared by front ends.
//!
//! Holds the editable debt portfolio together with the user's extra payment
//! and chosen strategy. Only the debt list is persisted; it is written to the
//! store verbatim as JSON after every edit.

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, warn};

use crate::calculations::{PayoffSimulator, PortfolioSummary, StrategyComparison};
use crate::db::store::{KeyValueStore, StoreError};
use crate::models::{
    DEFAULT_EXTRA_PAYMENT, Debt, DebtUpdate, Strategy, default_debts, new_placeholder_debt,
    next_debt_id,
};

/// Key the debt list is stored under.
pub const DEBTS_STORAGE_KEY: &str = "debt_calculator_debts";

#[derive(Debug, Error)]
pub enum StateError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Saved debt list is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("No debt with id '{0}'")]
    UnknownDebt(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub debts: Vec<Debt>,
    pub extra_payment: Decimal,
    pub strategy: Strategy,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            debts: default_debts(),
            extra_payment: DEFAULT_EXTRA_PAYMENT,
            strategy: Strategy::default(),
        }
    }
}

impl AppState {
    /// Loads the saved debt list, falling back to the default portfolio when
    /// nothing has been saved yet.
    ///
    /// # Errors
    /// [`StateError::Store`] when the store fails, or
    /// [`StateError::Serialization`] when the saved blob cannot be parsed.
    pub async fn load(store: &dyn KeyValueStore) -> Result<Self, StateError> {
        let debts = match store.get(DEBTS_STORAGE_KEY).await? {
            Some(json) => {
                let debts: Vec<Debt> = serde_json::from_str(&json)?;
                debug!(count = debts.len(), "loaded saved debts");
                debts
            }
            None => {
                debug!("no saved debts, using defaults");
                default_debts()
            }
        };

        Ok(Self {
            debts,
            ..Self::default()
        })
    }

    /// Like [`AppState::load`] but treats an unreadable blob as absent.
    ///
    /// # Errors
    /// Only store failures are returned.
    pub async fn load_or_default(store: &dyn KeyValueStore) -> Result<Self, StateError> {
        match Self::load(store).await {
            Err(StateError::Serialization(err)) => {
                warn!(error = %err, "discarding unreadable saved debts");
                Ok(Self::default())
            }
            other => other,
        }
    }

    pub async fn save(
        &self,
        store: &dyn KeyValueStore,
    ) -> Result<(), StateError> {
        let json = serde_json::to_string(&self.debts)?;
        store.set(DEBTS_STORAGE_KEY, &json).await?;
        debug!(count = self.debts.len(), "saved debts");
        Ok(())
    }

    pub fn debt(
        &self,
        id: &str,
    ) -> Option<&Debt> {
        self.debts.iter().find(|d| d.id == id)
    }

    /// Appends a placeholder debt and returns it.
    pub fn add_debt(&mut self) -> &Debt {
        let debt = new_placeholder_debt(&self.debts);
        self.push(debt)
    }

    /// Appends `debt`, assigning the next free id when its id is empty or
    /// already taken.
    pub fn add(
        &mut self,
        mut debt: Debt,
    ) -> &Debt {
        if debt.id.trim().is_empty() || self.debt(&debt.id).is_some() {
            debt.id = next_debt_id(&self.debts);
        }
        self.push(debt)
    }

    fn push(
        &mut self,
        debt: Debt,
    ) -> &Debt {
        self.debts.push(debt);
        let index = self.debts.len() - 1;
        &self.debts[index]
    }

    pub fn remove_debt(
        &mut self,
        id: &str,
    ) -> Result<Debt, StateError> {
        let index = self
            .debts
            .iter()
            .position(|d| d.id == id)
            .ok_or_else(|| StateError::UnknownDebt(id.to_string()))?;
        Ok(self.debts.remove(index))
    }

    pub fn update_debt(
        &mut self,
        id: &str,
        update: &DebtUpdate,
    ) -> Result<&Debt, StateError> {
        let debt = self
            .debts
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| StateError::UnknownDebt(id.to_string()))?;
        debt.apply(update);
        Ok(debt)
    }

    /// Replaces the portfolio with the default seed debts.
    pub fn reset(&mut self) {
        self.debts = default_debts();
    }

    pub fn summary(&self) -> PortfolioSummary {
        PortfolioSummary::from_debts(&self.debts, self.extra_payment)
    }

    pub fn compare(
        &self,
        simulator: &PayoffSimulator,
    ) -> StrategyComparison {
        StrategyComparison::run(simulator, &self.debts, self.extra_payment)
    }
}
