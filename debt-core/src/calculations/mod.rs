//! Debt payoff calculations.
//!
//! The simulator in [`payoff`] is the only stateful arithmetic in the crate;
//! [`comparison`], [`summary`] and [`validation`] are read-only views over a
//! portfolio or over simulation results.

pub mod common;
pub mod comparison;
pub mod payoff;
pub mod summary;
pub mod validation;

pub use comparison::{ChartPoint, DEFAULT_CHART_POINTS, StrategyComparison};
pub use payoff::{MAX_MONTHS, OverflowCascade, PayoffSimulator, SimulationConfig, calculate_payoff};
pub use summary::PortfolioSummary;
pub use validation::{PortfolioIssue, interest_warnings, validate_debt, validate_portfolio};
