//! CSV output for payoff schedules and debt lists.
//!
//! A schedule has one row per simulated month:
//!
//! | Month | Date       | Total Balance | Total Interest Paid | <debt name> ... |
//! |-------|------------|---------------|---------------------|-----------------|
//! | 1     | 2025-02-15 | 19186.79      | 118.67              | 4933.74 ...     |
//!
//! Every row carries `4 + debts.len()` fields. Money is written with exactly
//! two decimals; a debt missing from a month's map reads `0.00`.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use debt_core::calculations::common::format_cents;
use debt_core::{Debt, MonthlyData, PayoffResult};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Output is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

impl<W> From<csv::IntoInnerError<W>> for ExportError {
    fn from(err: csv::IntoInnerError<W>) -> Self {
        ExportError::Io(err.into_error())
    }
}

/// Fixed leading columns of a schedule export.
const SCHEDULE_COLUMNS: [&str; 4] = ["Month", "Date", "Total Balance", "Total Interest Paid"];

/// Debt list columns, matching what [`crate::DebtLoader`] reads.
const DEBT_COLUMNS: [&str; 5] = ["id", "name", "balance", "rate", "min_payment"];

/// Header row for a schedule over `debts`.
pub fn schedule_headers(debts: &[Debt]) -> Vec<String> {
    SCHEDULE_COLUMNS
        .iter()
        .map(|c| c.to_string())
        .chain(debts.iter().map(|d| d.name.clone()))
        .collect()
}

fn schedule_row(
    month: &MonthlyData,
    debts: &[Debt],
) -> Vec<String> {
    let mut row = vec![
        month.month.to_string(),
        month.date.format("%Y-%m-%d").to_string(),
        format_cents(month.total_balance),
        format_cents(month.total_interest_paid),
    ];
    row.extend(debts.iter().map(|d| format_cents(month.balance_of(&d.id))));
    row
}

/// Writes `result` as CSV. `debts` must be the list the result was
/// simulated from; it supplies column order and names.
pub fn write_schedule<W: Write>(
    writer: W,
    result: &PayoffResult,
    debts: &[Debt],
) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(schedule_headers(debts))?;
    for month in &result.monthly_data {
        csv_writer.write_record(schedule_row(month, debts))?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn schedule_to_string(
    result: &PayoffResult,
    debts: &[Debt],
) -> Result<String, ExportError> {
    let mut buffer = Vec::new();
    write_schedule(&mut buffer, result, debts)?;
    Ok(String::from_utf8(buffer)?)
}

pub fn write_schedule_file(
    path: &Path,
    result: &PayoffResult,
    debts: &[Debt],
) -> Result<(), ExportError> {
    let file = File::create(path)?;
    write_schedule(file, result, debts)?;
    debug!(path = %path.display(), rows = result.monthly_data.len(), "wrote schedule");
    Ok(())
}

/// Writes the portfolio itself, one debt per row.
pub fn write_debts<W: Write>(
    writer: W,
    debts: &[Debt],
) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(DEBT_COLUMNS)?;
    for debt in debts {
        csv_writer.write_record([
            debt.id.clone(),
            debt.name.clone(),
            debt.balance.to_string(),
            debt.rate.to_string(),
            debt.min_payment.to_string(),
        ])?;
    }
    let mut inner = csv_writer.into_inner()?;
    inner.flush()?;
    Ok(())
}

pub fn debts_to_string(debts: &[Debt]) -> Result<String, ExportError> {
    let mut buffer = Vec::new();
    write_debts(&mut buffer, debts)?;
    Ok(String::from_utf8(buffer)?)
}
