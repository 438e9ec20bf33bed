//! Command-line surface of `debt-planner`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use debt_core::{DebtUpdate, Strategy};
use rust_decimal::Decimal;

use crate::config::SettingsOverrides;
use crate::utils::{ParseMoneyError, parse_money};

/// Compare Snowball and Avalanche payoff plans for a list of debts.
///
/// Debts are kept in a local database between runs. Settings are read from
/// `debt-planner.toml` in the working directory when present.
#[derive(Debug, Parser)]
#[command(name = "debt-planner", version, about, long_about = None)]
pub struct Cli {
    /// Settings file to read instead of ./debt-planner.toml.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Storage backend (`sqlite` or `memory`).
    #[arg(long, global = true)]
    pub backend: Option<String>,

    /// Database file, `:memory:`, or a `sqlite:` URL.
    #[arg(long, global = true)]
    pub db: Option<String>,

    /// Log filter, e.g. `warn` or `debt_core=debug`.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Also append log output to this file.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show the saved debts and monthly totals.
    List,

    /// Add a debt. Omitted fields take placeholder values.
    Add(DebtFields),

    /// Delete a debt by id.
    Remove { id: String },

    /// Change fields of an existing debt.
    Update {
        id: String,
        #[command(flatten)]
        fields: DebtFields,
    },

    /// Load debts from a CSV file (id,name,balance,rate,min_payment).
    Import {
        path: PathBuf,

        /// Replace the saved debts instead of appending.
        #[arg(long)]
        replace: bool,
    },

    /// Restore the three sample debts.
    Reset,

    /// Compare both strategies side by side.
    Compare {
        #[command(flatten)]
        plan: PlanArgs,

        /// Rows in the balance chart.
        #[arg(long, default_value_t = 12)]
        chart_points: usize,
    },

    /// Month-by-month payoff table for one strategy.
    Schedule {
        #[command(flatten)]
        plan: PlanArgs,

        /// Also write the schedule to this CSV file.
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Write the saved debts to a CSV file that `import` can read.
    Export { path: PathBuf },
}

#[derive(Debug, Clone, Default, Args)]
pub struct DebtFields {
    #[arg(long)]
    pub name: Option<String>,

    /// Current balance, e.g. `5,000` or `$5000.00`.
    #[arg(long, value_parser = parse_money_arg, allow_hyphen_values = true)]
    pub balance: Option<Decimal>,

    /// Annual interest rate in percent, e.g. `18.99`.
    #[arg(long, value_parser = parse_money_arg, allow_hyphen_values = true)]
    pub rate: Option<Decimal>,

    /// Minimum monthly payment.
    #[arg(long, value_parser = parse_money_arg, allow_hyphen_values = true)]
    pub min_payment: Option<Decimal>,
}

impl DebtFields {
    pub fn to_update(&self) -> DebtUpdate {
        DebtUpdate {
            name: self.name.clone(),
            balance: self.balance,
            rate: self.rate,
            min_payment: self.min_payment,
        }
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct PlanArgs {
    /// Extra amount paid on top of the minimums each month.
    #[arg(long, value_parser = parse_money_arg)]
    pub extra: Option<Decimal>,

    /// `snowball` or `avalanche`.
    #[arg(long, value_parser = parse_strategy_arg)]
    pub strategy: Option<Strategy>,
}

fn parse_money_arg(s: &str) -> Result<Decimal, ParseMoneyError> {
    parse_money(s)
}

fn parse_strategy_arg(s: &str) -> Result<Strategy, String> {
    Strategy::parse(s).ok_or_else(|| format!("unknown strategy '{s}', expected snowball or avalanche"))
}

impl Cli {
    /// Flag values that override the settings file.
    pub fn overrides(&self) -> SettingsOverrides {
        let plan = match &self.command {
            Command::Compare { plan, .. } | Command::Schedule { plan, .. } => plan.clone(),
            _ => PlanArgs::default(),
        };

        SettingsOverrides {
            extra_payment: plan.extra,
            strategy: plan.strategy,
            log_level: self.log_level.clone(),
            log_file: self.log_file.clone(),
            backend: self.backend.clone(),
            database: self.db.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn money_flags_accept_currency_formatting() {
        let cli = Cli::try_parse_from([
            "debt-planner",
            "add",
            "--name",
            "Car",
            "--balance",
            "$8,400.50",
            "--rate",
            "4.9%",
        ])
        .unwrap();

        match cli.command {
            Command::Add(fields) => {
                assert_eq!(fields.balance, Some(dec!(8400.50)));
                assert_eq!(fields.rate, Some(dec!(4.9)));
                assert_eq!(fields.min_payment, None);
            }
            other => panic!("expected add, got {other:?}"),
        }
    }

    #[test]
    fn plan_flags_become_overrides() {
        let cli = Cli::try_parse_from([
            "debt-planner",
            "--db",
            ":memory:",
            "schedule",
            "--extra",
            "250",
            "--strategy",
            "avalanche",
        ])
        .unwrap();

        let overrides = cli.overrides();

        assert_eq!(overrides.extra_payment, Some(dec!(250)));
        assert_eq!(overrides.strategy, Some(Strategy::Avalanche));
        assert_eq!(overrides.database, Some(":memory:".to_string()));
    }

    #[test]
    fn global_flags_work_after_subcommand() {
        let cli = Cli::try_parse_from(["debt-planner", "list", "--backend", "memory"]).unwrap();

        assert_eq!(cli.backend, Some("memory".to_string()));
    }

    #[test]
    fn unknown_strategy_is_rejected() {
        let result = Cli::try_parse_from(["debt-planner", "compare", "--strategy", "fastest"]);

        assert!(result.is_err());
    }
}
