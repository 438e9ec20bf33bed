//! Month-by-month debt payoff simulation.
//!
//! Each simulated month runs four steps over a private copy of the portfolio:
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Accrue `balance × rate / 100 / 12` on every outstanding debt |
//! | 2    | Pay each outstanding debt its minimum (capped at its balance) out of the base budget |
//! | 3    | Throw whatever is left of the budget at the highest-priority debt, cascading overpayment |
//! | 4    | Record a [`MonthlyData`] snapshot |
//!
//! The base budget is `Σ minimum payments + extra payment`, computed once from
//! the input portfolio. It never shrinks, so a paid-off debt's minimum rolls
//! over into the surplus for the rest of the simulation.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//! use debt_core::calculations::{PayoffSimulator, SimulationConfig};
//! use debt_core::{Debt, Strategy};
//!
//! let debts = vec![Debt::new("1", "Car", dec!(1200), dec!(0), dec!(100))];
//! let start = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
//!
//! let simulator = PayoffSimulator::new(SimulationConfig::starting(start));
//! let result = simulator.simulate(&debts, Strategy::Snowball, dec!(0));
//!
//! assert_eq!(result.months_to_payoff, 12);
//! assert_eq!(result.total_interest, dec!(0));
//! assert_eq!(result.payoff_date, NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
//! assert!(result.error.is_none());
//! ```

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{Local, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::calculations::common::{is_outstanding, outstanding_balance};
use crate::models::{Debt, MonthlyData, PayoffError, PayoffResult, Strategy};

/// Hard ceiling on simulated months (50 years).
pub const MAX_MONTHS: u32 = 600;

/// How far an overpayment of the top-priority debt is carried.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverflowCascade {
    /// Carry through every outstanding debt in priority order until spent.
    #[default]
    AllActive,
    /// Carry to the second-priority debt only; anything beyond is dropped.
    NextOnly,
}

/// Parameters for a [`PayoffSimulator`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Month 0. Snapshot dates and the payoff date are offsets from here.
    pub start_date: NaiveDate,

    /// Months simulated before giving up and reporting non-convergence.
    pub max_months: u32,

    pub overflow: OverflowCascade,
}

impl SimulationConfig {
    /// Default configuration anchored at `start_date` instead of today.
    pub fn starting(start_date: NaiveDate) -> Self {
        Self {
            start_date,
            ..Self::default()
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            start_date: Local::now().date_naive(),
            max_months: MAX_MONTHS,
            overflow: OverflowCascade::default(),
        }
    }
}

/// Per-simulation mutable copy of a [`Debt`].
#[derive(Debug, Clone)]
struct WorkingDebt {
    /// Index in the caller's list; secondary sort key.
    position: usize,
    id: String,
    balance: Decimal,
    rate: Decimal,
    monthly_rate: Decimal,
    min_payment: Decimal,
}

impl WorkingDebt {
    fn from_debt(
        position: usize,
        debt: &Debt,
    ) -> Self {
        Self {
            position,
            id: debt.id.clone(),
            balance: debt.balance,
            rate: debt.rate,
            monthly_rate: debt.rate / Decimal::ONE_HUNDRED / Decimal::from(12),
            min_payment: debt.min_payment,
        }
    }

    fn is_outstanding(&self) -> bool {
        is_outstanding(self.balance)
    }
}

/// Simulates paying down a portfolio under a [`Strategy`].
///
/// The simulator holds only its configuration, so one instance can be shared
/// and called repeatedly; every call works on its own copy of the debts.
#[derive(Debug, Clone, Default)]
pub struct PayoffSimulator {
    config: SimulationConfig,
}

impl PayoffSimulator {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Runs the simulation to payoff or to the month ceiling.
    ///
    /// Never panics on odd input: negative fields give unspecified but finite
    /// results, and arithmetic that would overflow saturates, which then shows
    /// up as non-convergence.
    ///
    /// Non-convergence is not an `Err`: the truncated result is returned with
    /// [`PayoffResult::error`] set.
    pub fn simulate(
        &self,
        debts: &[Debt],
        strategy: Strategy,
        extra_monthly_payment: Decimal,
    ) -> PayoffResult {
        let mut working: Vec<WorkingDebt> = debts
            .iter()
            .enumerate()
            .map(|(position, debt)| WorkingDebt::from_debt(position, debt))
            .collect();
        let base_budget = Self::base_budget(debts, extra_monthly_payment);

        let mut monthly_data = Vec::new();
        let mut total_interest = Decimal::ZERO;
        let mut months = 0;

        while months < self.config.max_months && working.iter().any(WorkingDebt::is_outstanding) {
            months += 1;

            total_interest = total_interest.saturating_add(Self::accrue_interest(&mut working));

            let remaining = Self::pay_minimums(&mut working, base_budget);
            if remaining > Decimal::ZERO {
                self.allocate_surplus(&mut working, strategy, remaining);
            }

            monthly_data.push(self.snapshot(&working, months, total_interest));
        }

        let error = if working.iter().any(WorkingDebt::is_outstanding) {
            let remaining_balance = Self::total_balance(&working);
            warn!(
                strategy = %strategy,
                months,
                remaining_balance = %remaining_balance,
                "month ceiling reached before payoff"
            );
            Some(PayoffError::NotPayable {
                months,
                remaining_balance,
            })
        } else {
            None
        };

        debug!(
            strategy = %strategy,
            debts = debts.len(),
            months,
            total_interest = %total_interest,
            "payoff simulation finished"
        );

        PayoffResult {
            strategy,
            total_interest,
            months_to_payoff: months,
            payoff_date: self.month_date(months),
            monthly_data,
            error,
        }
    }

    /// Sum of every original minimum payment plus the extra payment.
    fn base_budget(
        debts: &[Debt],
        extra_monthly_payment: Decimal,
    ) -> Decimal {
        debts
            .iter()
            .fold(extra_monthly_payment, |budget, debt| {
                budget.saturating_add(debt.min_payment)
            })
    }

    /// Step 1: adds one month of interest to every outstanding debt and
    /// returns the total accrued.
    fn accrue_interest(working: &mut [WorkingDebt]) -> Decimal {
        let mut accrued = Decimal::ZERO;
        for debt in working.iter_mut().filter(|d| d.is_outstanding()) {
            let interest = debt.balance.saturating_mul(debt.monthly_rate);
            debt.balance = debt.balance.saturating_add(interest);
            accrued = accrued.saturating_add(interest);
        }
        accrued
    }

    /// Step 2: pays each outstanding debt `min(minimum, balance)` and returns
    /// what is left of the base budget.
    fn pay_minimums(
        working: &mut [WorkingDebt],
        base_budget: Decimal,
    ) -> Decimal {
        let mut remaining = base_budget;
        for debt in working.iter_mut().filter(|d| d.is_outstanding()) {
            let payment = debt.min_payment.min(debt.balance);
            debt.balance = debt.balance.saturating_sub(payment);
            remaining = remaining.saturating_sub(payment);
        }
        remaining
    }

    /// Step 3: applies `surplus` to outstanding debts in priority order.
    fn allocate_surplus(
        &self,
        working: &mut [WorkingDebt],
        strategy: Strategy,
        surplus: Decimal,
    ) {
        let targets: Vec<usize> = priority_order(working, strategy)
            .into_iter()
            .filter(|&index| working[index].is_outstanding())
            .collect();
        let reach = match self.config.overflow {
            OverflowCascade::AllActive => targets.len(),
            OverflowCascade::NextOnly => 2,
        };

        let mut carry = surplus;
        for &index in targets.iter().take(reach) {
            let debt = &mut working[index];
            debt.balance -= carry;
            if debt.balance >= Decimal::ZERO {
                return;
            }
            carry = -debt.balance;
            debt.balance = Decimal::ZERO;
        }

        trace!(unallocated = %carry, "surplus left after overflow cascade");
    }

    /// Step 4: records balances at month end.
    fn snapshot(
        &self,
        working: &[WorkingDebt],
        month: u32,
        total_interest: Decimal,
    ) -> MonthlyData {
        let debts: BTreeMap<String, Decimal> = working
            .iter()
            .map(|d| (d.id.clone(), outstanding_balance(d.balance)))
            .collect();

        MonthlyData {
            month,
            date: self.month_date(month),
            total_balance: Self::total_balance(working),
            total_interest_paid: total_interest,
            debts,
        }
    }

    fn total_balance(working: &[WorkingDebt]) -> Decimal {
        working
            .iter()
            .fold(Decimal::ZERO, |sum, d| sum.saturating_add(outstanding_balance(d.balance)))
    }

    /// Start date plus `months` calendar months, clamped to the month's last day.
    fn month_date(
        &self,
        months: u32,
    ) -> NaiveDate {
        self.config
            .start_date
            .checked_add_months(Months::new(months))
            .unwrap_or(NaiveDate::MAX)
    }
}

/// Indices of `working` in repayment priority order.
///
/// Paid-off debts always come last. Among outstanding debts Snowball takes the
/// smallest balance and Avalanche the highest rate; ties fall back to input
/// order.
fn priority_order(
    working: &[WorkingDebt],
    strategy: Strategy,
) -> Vec<usize> {
    let mut order: Vec<usize> = (0..working.len()).collect();
    order.sort_by(|&a, &b| compare_priority(&working[a], &working[b], strategy));
    order
}

fn compare_priority(
    a: &WorkingDebt,
    b: &WorkingDebt,
    strategy: Strategy,
) -> Ordering {
    match (a.is_outstanding(), b.is_outstanding()) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.position.cmp(&b.position),
        (true, true) => {
            let primary = match strategy {
                Strategy::Snowball => a.balance.cmp(&b.balance),
                Strategy::Avalanche => b.rate.cmp(&a.rate),
            };
            primary.then(a.position.cmp(&b.position))
        }
    }
}

/// Simulates with the default configuration (today as start date, 600-month
/// ceiling, full overflow cascade).
pub fn calculate_payoff(
    debts: &[Debt],
    strategy: Strategy,
    extra_monthly_payment: Decimal,
) -> PayoffResult {
    PayoffSimulator::default().simulate(debts, strategy, extra_monthly_payment)
}
