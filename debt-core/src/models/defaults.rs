use rust_decimal::Decimal;

use super::debt::{Debt, next_debt_id};

/// Extra monthly payment used when the user has not chosen one.
pub const DEFAULT_EXTRA_PAYMENT: Decimal = Decimal::ONE_HUNDRED;

/// Seed portfolio shown before anything has been saved.
pub fn default_debts() -> Vec<Debt> {
    vec![
        Debt::new(
            "1",
            "Credit Card A",
            Decimal::new(5000, 0),
            Decimal::new(1899, 2),
            Decimal::new(150, 0),
        ),
        Debt::new(
            "2",
            "Student Loan",
            Decimal::new(12000, 0),
            Decimal::new(65, 1),
            Decimal::new(200, 0),
        ),
        Debt::new(
            "3",
            "Personal Loan",
            Decimal::new(2500, 0),
            Decimal::new(120, 1),
            Decimal::new(100, 0),
        ),
    ]
}

/// A fresh `Debt #n` entry appended by "add debt" before the user edits it.
pub fn new_placeholder_debt(existing: &[Debt]) -> Debt {
    Debt::new(
        next_debt_id(existing),
        format!("Debt #{}", existing.len() + 1),
        Decimal::new(2000, 0),
        Decimal::new(150, 1),
        Decimal::new(50, 0),
    )
}
