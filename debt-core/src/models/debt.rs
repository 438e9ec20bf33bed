use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single debt in the user's portfolio.
///
/// Serialized with camelCase keys so the stored blob keeps the
/// `id, name, balance, rate, minPayment` shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Debt {
    pub id: String,
    pub name: String,

    /// Principal owed.
    pub balance: Decimal,

    /// Annual percentage rate, e.g. `18.99` for 18.99%.
    pub rate: Decimal,

    /// Contractual minimum monthly payment.
    pub min_payment: Decimal,
}

impl Debt {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        balance: Decimal,
        rate: Decimal,
        min_payment: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            balance,
            rate,
            min_payment,
        }
    }

    /// Interest accrued over one month on the current balance.
    pub fn monthly_interest(&self) -> Decimal {
        self.balance
            .saturating_mul(self.rate / Decimal::ONE_HUNDRED / Decimal::from(12))
    }

    /// Applies every `Some` field of `update` to this debt.
    pub fn apply(
        &mut self,
        update: &DebtUpdate,
    ) {
        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(balance) = update.balance {
            self.balance = balance;
        }
        if let Some(rate) = update.rate {
            self.rate = rate;
        }
        if let Some(min_payment) = update.min_payment {
            self.min_payment = min_payment;
        }
    }
}

/// Partial edit of a [`Debt`]; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DebtUpdate {
    pub name: Option<String>,
    pub balance: Option<Decimal>,
    pub rate: Option<Decimal>,
    pub min_payment: Option<Decimal>,
}

impl DebtUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.balance.is_none()
            && self.rate.is_none()
            && self.min_payment.is_none()
    }
}

/// Next free id for a new debt: one past the largest numeric id.
///
/// Non-numeric ids are ignored, so an empty or all-text portfolio yields `"1"`.
pub fn next_debt_id(debts: &[Debt]) -> String {
    let max = debts
        .iter()
        .filter_map(|d| d.id.trim().parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    (max + 1).to_string()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn card() -> Debt {
        Debt::new("1", "Card", dec!(1200.00), dec!(12.00), dec!(50.00))
    }

    #[test]
    fn monthly_interest_uses_twelfth_of_apr() {
        assert_eq!(card().monthly_interest(), dec!(12.00));
    }

    #[test]
    fn monthly_interest_is_zero_for_zero_rate() {
        let debt = Debt {
            rate: dec!(0),
            ..card()
        };

        assert_eq!(debt.monthly_interest(), dec!(0));
    }

    #[test]
    fn apply_updates_only_provided_fields() {
        let mut debt = card();

        debt.apply(&DebtUpdate {
            balance: Some(dec!(900.00)),
            ..Default::default()
        });

        assert_eq!(debt.balance, dec!(900.00));
        assert_eq!(debt.name, "Card");
        assert_eq!(debt.rate, dec!(12.00));
        assert_eq!(debt.min_payment, dec!(50.00));
    }

    #[test]
    fn debt_update_default_is_empty() {
        assert!(DebtUpdate::default().is_empty());
        assert!(
            !DebtUpdate {
                name: Some("x".into()),
                ..Default::default()
            }
            .is_empty()
        );
    }

    #[test]
    fn next_debt_id_is_one_past_largest_numeric_id() {
        let debts = vec![
            Debt { id: "3".into(), ..card() },
            Debt { id: "abc".into(), ..card() },
            Debt { id: "7".into(), ..card() },
        ];

        assert_eq!(next_debt_id(&debts), "8");
    }

    #[test]
    fn next_debt_id_starts_at_one() {
        assert_eq!(next_debt_id(&[]), "1");
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let json = serde_json::to_value(card()).unwrap();

        assert!(json.get("minPayment").is_some());
        assert!(json.get("min_payment").is_none());
    }

    #[test]
    fn deserializes_numeric_json_fields() {
        let json = r#"{"id":"1","name":"Credit Card A","balance":5000,"rate":18.99,"minPayment":150}"#;

        let debt: Debt = serde_json::from_str(json).unwrap();

        assert_eq!(debt.balance, dec!(5000));
        assert_eq!(debt.rate, dec!(18.99));
        assert_eq!(debt.min_payment, dec!(150));
    }
}
