//! Headline numbers for a portfolio before any simulation runs.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::Debt;

/// Totals shown on the dashboard next to the simulation results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortfolioSummary {
    pub debt_count: usize,
    pub total_balance: Decimal,
    pub total_min_payment: Decimal,
    pub extra_payment: Decimal,
    /// What the user commits to paying every month: minimums plus extra.
    pub monthly_payment: Decimal,
}

impl PortfolioSummary {
    pub fn from_debts(
        debts: &[Debt],
        extra_payment: Decimal,
    ) -> Self {
        let total_balance = debts.iter().map(|d| d.balance).sum();
        let total_min_payment: Decimal = debts.iter().map(|d| d.min_payment).sum();

        Self {
            debt_count: debts.len(),
            total_balance,
            total_min_payment,
            extra_payment,
            monthly_payment: total_min_payment + extra_payment,
        }
    }
}
