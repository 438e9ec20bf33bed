use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::strategy::Strategy;

/// Why a simulation did not finish with every balance at zero.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum PayoffError {
    /// The month ceiling was reached with balances still outstanding.
    #[error("Debts may not be payable with current parameters (interest > payments)")]
    NotPayable {
        months: u32,
        remaining_balance: Decimal,
    },
}

/// Snapshot of the portfolio at the end of one simulated month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyData {
    /// 1-based month index.
    pub month: u32,
    pub date: NaiveDate,
    pub total_balance: Decimal,
    pub total_interest_paid: Decimal,
    /// Balance per debt id, clamped at zero.
    pub debts: BTreeMap<String, Decimal>,
}

impl MonthlyData {
    /// Balance recorded for `debt_id`, zero when the id is unknown.
    pub fn balance_of(
        &self,
        debt_id: &str,
    ) -> Decimal {
        self.debts.get(debt_id).copied().unwrap_or(Decimal::ZERO)
    }
}

/// Outcome of one payoff simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoffResult {
    pub strategy: Strategy,
    pub total_interest: Decimal,
    pub months_to_payoff: u32,
    pub payoff_date: NaiveDate,
    pub monthly_data: Vec<MonthlyData>,

    /// Set only when the month ceiling was hit before full payoff.
    pub error: Option<PayoffError>,
}

impl PayoffResult {
    pub fn is_paid_off(&self) -> bool {
        self.error.is_none()
    }

    pub fn final_month(&self) -> Option<&MonthlyData> {
        self.monthly_data.last()
    }
}
