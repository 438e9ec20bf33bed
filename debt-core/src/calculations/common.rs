//! Common money helpers shared by the payoff calculations.
//!
//! This module provides the paid-off threshold and the rounding and clamping
//! operations used by the simulator and the report builders.

use rust_decimal::{Decimal, RoundingStrategy};

/// Balances at or below one cent count as paid off.
pub const PAID_OFF_THRESHOLD: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Returns `true` while a balance is still above [`PAID_OFF_THRESHOLD`].
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use debt_core::calculations::common::is_outstanding;
///
/// assert!(is_outstanding(dec!(0.02)));
/// assert!(!is_outstanding(dec!(0.01)));
/// assert!(!is_outstanding(dec!(-5.00)));
/// ```
pub fn is_outstanding(balance: Decimal) -> bool {
    balance > PAID_OFF_THRESHOLD
}

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// This follows standard financial rounding conventions where values at exactly
/// 0.005 are rounded up to 0.01 (away from zero).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use debt_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds to whole currency units, half away from zero.
pub fn round_whole(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Balance as recorded in snapshots: anything already paid off reads as zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use debt_core::calculations::common::outstanding_balance;
///
/// assert_eq!(outstanding_balance(dec!(-0.50)), dec!(0));
/// assert_eq!(outstanding_balance(dec!(0.005)), dec!(0));
/// assert_eq!(outstanding_balance(dec!(12.34)), dec!(12.34));
/// ```
pub fn outstanding_balance(balance: Decimal) -> Decimal {
    if is_outstanding(balance) {
        balance
    } else {
        Decimal::ZERO
    }
}

/// Formats a money value with exactly two decimals, e.g. `1234.50`.
pub fn format_cents(value: Decimal) -> String {
    format!("{:.2}", round_half_up(value))
}
