//! CSV import of debt portfolios.
//!
//! ## CSV Format
//!
//! Headers are matched by name; column order does not matter.
//!
//! | Column        | Required | Notes                                   |
//! |---------------|----------|-----------------------------------------|
//! | `id`          | no       | Generated when empty or already taken   |
//! | `name`        | yes      |                                         |
//! | `balance`     | yes      | decimal, e.g. `5000.00`                 |
//! | `rate`        | yes      | annual percent, e.g. `18.99`            |
//! | `min_payment` | yes      | decimal                                 |
//!
//! ```csv
//! id,name,balance,rate,min_payment
//! 1,Credit Card A,5000,18.99,150
//! ,Car Loan,8000,4.5,250
//! ```

use std::io::Read;
use std::path::Path;

use debt_core::calculations::{PortfolioIssue, validate_debt};
use debt_core::{AppState, Debt, KeyValueStore, StateError};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, error};

#[derive(Debug, Error)]
pub enum DebtLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// `row` is 1-based, header excluded.
    #[error("invalid debt on row {row}: {}", format_issues(.issues))]
    InvalidRecord {
        row: usize,
        issues: Vec<PortfolioIssue>,
    },

    #[error(transparent)]
    State(#[from] StateError),
}

fn format_issues(issues: &[PortfolioIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A single row of a debt CSV file.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct DebtRecord {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub balance: Decimal,
    pub rate: Decimal,
    pub min_payment: Decimal,
}

impl DebtRecord {
    fn into_debt(self) -> Debt {
        Debt::new(
            self.id.unwrap_or_default(),
            self.name,
            self.balance,
            self.rate,
            self.min_payment,
        )
    }
}

/// Reads debt CSV files and merges them into the saved portfolio.
pub struct DebtLoader;

impl DebtLoader {
    /// Parses records from any reader, rows in file order.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<DebtRecord>, DebtLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();
        for (idx, result) in csv_reader.deserialize().enumerate() {
            let record: DebtRecord = result?;
            let row = idx + 1;
            let candidate = Debt::new(
                "-",
                record.name.clone(),
                record.balance,
                record.rate,
                record.min_payment,
            );
            if let Err(issues) = validate_debt(&candidate) {
                error!(row, issues = %format_issues(&issues), "rejecting debt row");
                return Err(DebtLoaderError::InvalidRecord { row, issues });
            }
            records.push(record);
        }

        Ok(records)
    }

    pub fn load_from_str(input: &str) -> Result<Vec<DebtRecord>, DebtLoaderError> {
        Self::parse(input.as_bytes())
    }

    pub fn load_from_file(path: &Path) -> Result<Vec<DebtRecord>, DebtLoaderError> {
        let contents = std::fs::read_to_string(path)?;
        Self::load_from_str(&contents)
    }

    /// Adds `records` to `state`, or replaces its debts when `replace` is set.
    /// Ids that are missing or collide with an existing debt are regenerated.
    /// Returns the number of debts added.
    pub fn apply(
        state: &mut AppState,
        records: Vec<DebtRecord>,
        replace: bool,
    ) -> usize {
        if replace {
            state.debts.clear();
        }
        let count = records.len();
        for record in records {
            state.add(record.into_debt());
        }
        count
    }

    /// Loads the saved portfolio from `store`, applies `records` and saves
    /// the result back.
    pub async fn load(
        store: &dyn KeyValueStore,
        records: Vec<DebtRecord>,
        replace: bool,
    ) -> Result<usize, DebtLoaderError> {
        let mut state = AppState::load(store).await?;
        let added = Self::apply(&mut state, records, replace);
        state.save(store).await?;
        debug!(added, total = state.debts.len(), replace, "imported debts");
        Ok(added)
    }
}

#[cfg(test)]
mod tests {
    use debt_core::default_debts;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const TWO_DEBTS: &str = "\
id,name,balance,rate,min_payment
10,Car Loan,8000.00,4.5,250
,Store Card,650,24.99,35
";

    #[test]
    fn parse_reads_rows_in_order() {
        let records = DebtLoader::load_from_str(TWO_DEBTS).unwrap();

        assert_eq!(
            records,
            vec![
                DebtRecord {
                    id: Some("10".to_string()),
                    name: "Car Loan".to_string(),
                    balance: dec!(8000.00),
                    rate: dec!(4.5),
                    min_payment: dec!(250),
                },
                DebtRecord {
                    id: None,
                    name: "Store Card".to_string(),
                    balance: dec!(650),
                    rate: dec!(24.99),
                    min_payment: dec!(35),
                },
            ]
        );
    }

    #[test]
    fn parse_allows_missing_id_column_and_any_order() {
        let csv = "min_payment,rate,balance,name\n50, 15.0 ,2000, Gym \n";

        let records = DebtLoader::load_from_str(csv).unwrap();

        assert_eq!(records[0].id, None);
        assert_eq!(records[0].name, "Gym");
        assert_eq!(records[0].rate, dec!(15.0));
    }

    #[test]
    fn parse_rejects_missing_required_column() {
        let csv = "name,balance,rate\nCard,100,5\n";

        let result = DebtLoader::load_from_str(csv);

        assert!(matches!(result, Err(DebtLoaderError::CsvParse(_))));
    }

    #[test]
    fn parse_rejects_non_numeric_amount() {
        let csv = "name,balance,rate,min_payment\nCard,lots,5,10\n";

        assert!(matches!(
            DebtLoader::load_from_str(csv),
            Err(DebtLoaderError::CsvParse(_))
        ));
    }

    #[test]
    fn parse_rejects_negative_values_with_row_number() {
        let csv = "name,balance,rate,min_payment\nOk,1,1,1\nBad,-5,1,1\n";

        match DebtLoader::load_from_str(csv) {
            Err(DebtLoaderError::InvalidRecord { row, issues }) => {
                assert_eq!(row, 2);
                assert_eq!(issues.len(), 1);
            }
            other => panic!("expected InvalidRecord, got {other:?}"),
        }
    }

    #[test]
    fn apply_appends_and_regenerates_colliding_ids() {
        let mut state = AppState::default();
        let csv = "id,name,balance,rate,min_payment\n1,Dup,100,1,10\n,New,200,2,20\n";
        let records = DebtLoader::load_from_str(csv).unwrap();

        let added = DebtLoader::apply(&mut state, records, false);

        assert_eq!(added, 2);
        let ids: Vec<&str> = state.debts.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn apply_with_replace_drops_existing_debts() {
        let mut state = AppState::default();
        let records = DebtLoader::load_from_str(TWO_DEBTS).unwrap();

        DebtLoader::apply(&mut state, records, true);

        assert_eq!(state.debts.len(), 2);
        assert_eq!(state.debts[0].id, "10");
        assert_eq!(state.debts[1].id, "11");
        assert!(state.debts.iter().all(|d| !default_debts().contains(d)));
    }
}
