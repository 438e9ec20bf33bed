//! Optional hardening checks for a debt portfolio.
//!
//! The simulator accepts any input. Front ends call these checks before
//! saving edits so that negative amounts and duplicate ids never reach the
//! store, and to warn when a minimum payment cannot keep up with interest.

use std::collections::HashSet;

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::warn;

use crate::calculations::common::is_outstanding;
use crate::models::Debt;

/// A problem found in a debt or portfolio.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PortfolioIssue {
    #[error("debt id must not be empty")]
    EmptyId,

    #[error("debt '{0}' has no name")]
    EmptyName(String),

    #[error("duplicate debt id '{0}'")]
    DuplicateId(String),

    #[error("debt '{id}' has a negative balance ({value})")]
    NegativeBalance { id: String, value: Decimal },

    #[error("debt '{id}' has a negative interest rate ({value})")]
    NegativeRate { id: String, value: Decimal },

    #[error("debt '{id}' has a negative minimum payment ({value})")]
    NegativeMinPayment { id: String, value: Decimal },

    /// Soft issue: the debt can still be simulated but may never be paid off.
    #[error("minimum payment {min_payment} on debt '{id}' does not cover monthly interest {interest}")]
    MinimumBelowInterest {
        id: String,
        min_payment: Decimal,
        interest: Decimal,
    },
}

/// Checks one debt's fields in isolation.
///
/// # Errors
///
/// Returns every [`PortfolioIssue`] found, in field order.
pub fn validate_debt(debt: &Debt) -> Result<(), Vec<PortfolioIssue>> {
    let mut issues = Vec::new();

    if debt.id.trim().is_empty() {
        issues.push(PortfolioIssue::EmptyId);
    }
    if debt.name.trim().is_empty() {
        issues.push(PortfolioIssue::EmptyName(debt.id.clone()));
    }
    if debt.balance < Decimal::ZERO {
        issues.push(PortfolioIssue::NegativeBalance {
            id: debt.id.clone(),
            value: debt.balance,
        });
    }
    if debt.rate < Decimal::ZERO {
        issues.push(PortfolioIssue::NegativeRate {
            id: debt.id.clone(),
            value: debt.rate,
        });
    }
    if debt.min_payment < Decimal::ZERO {
        issues.push(PortfolioIssue::NegativeMinPayment {
            id: debt.id.clone(),
            value: debt.min_payment,
        });
    }

    if issues.is_empty() { Ok(()) } else { Err(issues) }
}

/// Checks every debt plus id uniqueness across the portfolio.
///
/// # Errors
///
/// Returns every [`PortfolioIssue`] found. Soft interest warnings are not
/// included; see [`interest_warnings`].
pub fn validate_portfolio(debts: &[Debt]) -> Result<(), Vec<PortfolioIssue>> {
    let mut issues = Vec::new();
    let mut seen = HashSet::new();

    for debt in debts {
        if let Err(found) = validate_debt(debt) {
            issues.extend(found);
        }
        if !seen.insert(debt.id.as_str()) {
            issues.push(PortfolioIssue::DuplicateId(debt.id.clone()));
        }
    }

    if issues.is_empty() { Ok(()) } else { Err(issues) }
}

/// Debts whose minimum payment does not exceed their first month's interest.
///
/// Each hit is also logged at `warn` level.
pub fn interest_warnings(debts: &[Debt]) -> Vec<PortfolioIssue> {
    debts
        .iter()
        .filter(|d| is_outstanding(d.balance))
        .filter_map(|d| {
            let interest = d.monthly_interest();
            if d.min_payment > interest {
                return None;
            }
            warn!(
                debt = %d.id,
                min_payment = %d.min_payment,
                interest = %interest,
                "minimum payment does not cover monthly interest"
            );
            Some(PortfolioIssue::MinimumBelowInterest {
                id: d.id.clone(),
                min_payment: d.min_payment,
                interest,
            })
        })
        .collect()
}
