mod debt;
mod defaults;
mod payoff;
mod strategy;

pub use debt::{Debt, DebtUpdate, next_debt_id};
pub use defaults::{DEFAULT_EXTRA_PAYMENT, default_debts, new_placeholder_debt};
pub use payoff::{MonthlyData, PayoffError, PayoffResult};
pub use strategy::Strategy;
