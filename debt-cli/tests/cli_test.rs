//! End-to-end command runs against an in-memory store.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;
use debt_cli::app::Planner;
use debt_cli::cli::Cli;
use debt_cli::config::Settings;
use debt_core::db::MemoryStore;
use debt_core::{AppState, PayoffSimulator, SimulationConfig, Strategy, default_debts};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("debt-cli-{}-{}", std::process::id(), name))
}

fn planner(settings: Settings) -> Planner {
    Planner::new(
        Box::new(MemoryStore::new()),
        settings,
        PayoffSimulator::new(SimulationConfig::starting(
            NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
        )),
    )
}

/// Parses `args` like the binary does and runs the command.
async fn run(
    planner: &Planner,
    args: &[&str],
) -> anyhow::Result<String> {
    let cli = Cli::try_parse_from(std::iter::once("debt-planner").chain(args.iter().copied()))?;
    let mut out = Vec::new();
    planner.run(cli.command, &mut out).await?;
    Ok(String::from_utf8(out)?)
}

async fn saved(planner: &Planner) -> AppState {
    AppState::load(planner.store()).await.unwrap()
}

#[test]
fn settings_fixture_parses() {
    let settings = Settings::load(Some(&fixture("settings.toml"))).unwrap();

    assert_eq!(settings.extra_payment, dec!(200));
    assert_eq!(settings.strategy, Strategy::Avalanche);
    assert_eq!(settings.store.backend, "memory");
}

#[tokio::test]
async fn list_shows_default_portfolio() {
    let planner = planner(Settings::default());

    let output = run(&planner, &["list"]).await.unwrap();

    assert!(output.contains("Credit Card A"));
    assert!(output.contains("Total debt:      $19,500"));
    assert!(output.contains("Monthly payment: $550"));
}

#[tokio::test]
async fn add_then_remove_persists_changes() {
    let planner = planner(Settings::default());

    let output = run(
        &planner,
        &["add", "--name", "Car", "--balance", "$8,000", "--rate", "4.5", "--min-payment", "250"],
    )
    .await
    .unwrap();
    assert_eq!(output.trim(), "Added debt 4 (Car).");
    assert_eq!(saved(&planner).await.debts.len(), 4);

    run(&planner, &["remove", "1"]).await.unwrap();

    let ids: Vec<String> = saved(&planner).await.debts.into_iter().map(|d| d.id).collect();
    assert_eq!(ids, vec!["2", "3", "4"]);
}

#[tokio::test]
async fn add_without_fields_uses_placeholder() {
    let planner = planner(Settings::default());

    run(&planner, &["add"]).await.unwrap();

    let last = saved(&planner).await.debts.pop().unwrap();
    assert_eq!(last.name, "Debt #4");
    assert_eq!(last.balance, dec!(2000));
}

#[tokio::test]
async fn add_rejects_negative_balance() {
    let planner = planner(Settings::default());

    let err = run(&planner, &["add", "--balance", "-5"]).await.unwrap_err();

    assert!(err.to_string().contains("negative balance"), "{err}");
    assert_eq!(saved(&planner).await.debts, default_debts());
}

#[tokio::test]
async fn add_warns_when_minimum_cannot_cover_interest() {
    let planner = planner(Settings::default());

    let output = run(
        &planner,
        &["add", "--balance", "10000", "--rate", "36", "--min-payment", "10"],
    )
    .await
    .unwrap();

    assert!(output.contains("warning: minimum payment"), "{output}");
}

#[tokio::test]
async fn update_changes_only_given_fields() {
    let planner = planner(Settings::default());

    run(&planner, &["update", "2", "--balance", "11,000"]).await.unwrap();

    let state = saved(&planner).await;
    let debt = state.debt("2").unwrap();
    assert_eq!(debt.balance, dec!(11000));
    assert_eq!(debt.name, "Student Loan");
}

#[tokio::test]
async fn update_requires_a_field_and_known_id() {
    let planner = planner(Settings::default());

    assert!(run(&planner, &["update", "2"]).await.is_err());
    let err = run(&planner, &["update", "42", "--rate", "1"]).await.unwrap_err();
    assert!(err.to_string().contains("42"));
}

#[tokio::test]
async fn import_appends_fixture_rows() {
    let planner = planner(Settings::default());
    let path = fixture("debts.csv");

    let output = run(&planner, &["import", path.to_str().unwrap()]).await.unwrap();

    assert!(output.starts_with("Imported 2 debts"));
    let state = saved(&planner).await;
    assert_eq!(state.debts.len(), 5);
    assert_eq!(state.debts[3].balance, dec!(8400.50));
    assert_eq!(state.debts[4].id, "5");
}

#[tokio::test]
async fn import_with_replace_then_reset() {
    let planner = planner(Settings::default());
    let path = fixture("debts.csv");

    run(&planner, &["import", path.to_str().unwrap(), "--replace"]).await.unwrap();
    assert_eq!(saved(&planner).await.debts.len(), 2);

    run(&planner, &["reset"]).await.unwrap();
    assert_eq!(saved(&planner).await.debts, default_debts());
}

#[tokio::test]
async fn compare_prints_both_strategies_and_chart() {
    let planner = planner(Settings::default());

    let output = run(&planner, &["compare", "--chart-points", "5"]).await.unwrap();

    assert!(output.contains("Snowball\n"));
    assert!(output.contains("Avalanche\n"));
    assert!(output.contains("Total interest"));
    assert!(output.contains("Feb 2025"));
}

#[tokio::test]
async fn compare_survives_runaway_interest() {
    let planner = planner(Settings::default());
    run(&planner, &["reset"]).await.unwrap();
    run(
        &planner,
        &["add", "--name", "Payday", "--balance", "1000", "--rate", "400", "--min-payment", "10"],
    )
    .await
    .unwrap();

    let output = run(&planner, &["compare"]).await.unwrap();

    assert!(output.contains("warning: "));
    assert!(output.contains(
        "Debts may not be payable with current parameters (interest > payments)"
    ));
    assert!(output.contains(&"#".repeat(40)));
}

#[tokio::test]
async fn schedule_reports_non_convergence_instead_of_rows() {
    let settings = Settings {
        extra_payment: dec!(0),
        ..Settings::default()
    };
    let planner = planner(settings);
    for id in ["1", "2", "3"] {
        run(&planner, &["remove", id]).await.unwrap();
    }
    run(
        &planner,
        &["add", "--name", "Payday", "--balance", "10000", "--rate", "36", "--min-payment", "10"],
    )
    .await
    .unwrap();

    let output = run(&planner, &["schedule"]).await.unwrap();

    assert!(output.contains(
        "Debts may not be payable with current parameters (interest > payments)"
    ));
    assert!(!output.contains("Month"));
}

#[tokio::test]
async fn schedule_writes_csv_file() {
    let settings = Settings {
        extra_payment: dec!(500),
        ..Settings::default()
    };
    let planner = planner(settings);
    let path = temp_path("schedule.csv");

    let output = run(&planner, &["schedule", "--csv", path.to_str().unwrap()])
        .await
        .unwrap();

    assert!(output.starts_with("Snowball schedule with $500 extra per month"));
    let csv = std::fs::read_to_string(&path).unwrap();
    let header = csv.lines().next().unwrap();
    assert_eq!(
        header,
        "Month,Date,Total Balance,Total Interest Paid,Credit Card A,Student Loan,Personal Loan"
    );
    assert!(csv.lines().nth(1).unwrap().starts_with("1,2025-02-15,"));
    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn export_round_trips_through_import() {
    let planner = planner(Settings::default());
    let path = temp_path("export.csv");
    run(&planner, &["update", "1", "--name", "Visa, gold"]).await.unwrap();

    run(&planner, &["export", path.to_str().unwrap()]).await.unwrap();
    run(&planner, &["import", path.to_str().unwrap(), "--replace"]).await.unwrap();

    let state = saved(&planner).await;
    assert_eq!(state.debts.len(), 3);
    assert_eq!(state.debts[0].name, "Visa, gold");
    let _ = std::fs::remove_file(&path);
}
