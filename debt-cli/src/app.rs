use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, bail};
use debt_core::calculations::{PortfolioIssue, interest_warnings, validate_debt};
use debt_core::db::{MemoryStoreFactory, StoreRegistry};
use debt_core::{AppState, Debt, DebtUpdate, KeyValueStore, PayoffSimulator, new_placeholder_debt};
use debt_data::{DebtLoader, write_debts, write_schedule_file};
use debt_db_sqlite::SqliteStoreFactory;
use tracing::{debug, info, warn};

use crate::cli::Command;
use crate::config::Settings;
use crate::report::{BalanceChart, Dashboard, DebtTable, ScheduleTable};
use crate::utils::format_currency;

/// Registry with every backend this binary ships.
pub fn build_registry() -> StoreRegistry {
    let mut registry = StoreRegistry::new();
    registry.register(Box::new(SqliteStoreFactory));
    registry.register(Box::new(MemoryStoreFactory));
    registry
}

fn describe(issues: &[PortfolioIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Runs commands against one store with fixed settings.
pub struct Planner {
    store: Box<dyn KeyValueStore>,
    settings: Settings,
    simulator: PayoffSimulator,
}

impl Planner {
    /// Opens the store named in `settings`, simulating from today.
    pub async fn open(settings: Settings) -> Result<Self> {
        debug!(backend = %settings.store.backend, "opening store");
        let store = build_registry()
            .create(&settings.store)
            .await
            .with_context(|| {
                format!(
                    "Failed to open {} store '{}'",
                    settings.store.backend, settings.store.connection_string
                )
            })?;
        Ok(Self::new(store, settings, PayoffSimulator::default()))
    }

    pub fn new(
        store: Box<dyn KeyValueStore>,
        settings: Settings,
        simulator: PayoffSimulator,
    ) -> Self {
        Self {
            store,
            settings,
            simulator,
        }
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    async fn state(&self) -> Result<AppState> {
        let mut state = AppState::load(self.store())
            .await
            .context("Failed to load saved debts")?;
        state.extra_payment = self.settings.extra_payment;
        state.strategy = self.settings.strategy;
        Ok(state)
    }

    async fn save(
        &self,
        state: &AppState,
    ) -> Result<()> {
        state
            .save(self.store())
            .await
            .context("Failed to save debts")
    }

    pub async fn run(
        &self,
        command: Command,
        out: &mut dyn Write,
    ) -> Result<()> {
        match command {
            Command::List => self.list(out).await,
            Command::Add(fields) => self.add(fields.to_update(), out).await,
            Command::Remove { id } => self.remove(&id, out).await,
            Command::Update { id, fields } => self.update(&id, fields.to_update(), out).await,
            Command::Import { path, replace } => self.import(&path, replace, out).await,
            Command::Reset => self.reset(out).await,
            Command::Compare { chart_points, .. } => self.compare(chart_points, out).await,
            Command::Schedule { csv, .. } => self.schedule(csv.as_deref(), out).await,
            Command::Export { path } => self.export(&path, out).await,
        }
    }

    async fn list(
        &self,
        out: &mut dyn Write,
    ) -> Result<()> {
        let state = self.state().await?;
        let summary = state.summary();
        write!(
            out,
            "{}",
            DebtTable {
                debts: &state.debts,
                summary: &summary,
            }
        )?;
        Ok(())
    }

    async fn add(
        &self,
        update: DebtUpdate,
        out: &mut dyn Write,
    ) -> Result<()> {
        let mut state = self.state().await?;
        let mut debt = new_placeholder_debt(&state.debts);
        debt.apply(&update);
        check(&debt)?;

        let added = state.add(debt).clone();
        self.save(&state).await?;
        info!(id = %added.id, name = %added.name, "added debt");
        writeln!(out, "Added debt {} ({}).", added.id, added.name)?;
        warn_interest(&added, out)
    }

    async fn remove(
        &self,
        id: &str,
        out: &mut dyn Write,
    ) -> Result<()> {
        let mut state = self.state().await?;
        let removed = state.remove_debt(id)?;
        self.save(&state).await?;
        info!(id, "removed debt");
        writeln!(out, "Removed debt {} ({}).", removed.id, removed.name)?;
        Ok(())
    }

    async fn update(
        &self,
        id: &str,
        update: DebtUpdate,
        out: &mut dyn Write,
    ) -> Result<()> {
        if update.is_empty() {
            bail!("nothing to update; pass --name, --balance, --rate or --min-payment");
        }
        let mut state = self.state().await?;
        let updated = state.update_debt(id, &update)?.clone();
        check(&updated)?;

        self.save(&state).await?;
        info!(id, "updated debt");
        writeln!(out, "Updated debt {} ({}).", updated.id, updated.name)?;
        warn_interest(&updated, out)
    }

    async fn import(
        &self,
        path: &Path,
        replace: bool,
        out: &mut dyn Write,
    ) -> Result<()> {
        let records = DebtLoader::load_from_file(path)
            .with_context(|| format!("Failed to read debts from {}", path.display()))?;
        let added = DebtLoader::load(self.store(), records, replace)
            .await
            .context("Failed to import debts")?;
        info!(added, replace, path = %path.display(), "imported debts");
        writeln!(out, "Imported {added} debts from {}.", path.display())?;
        Ok(())
    }

    async fn reset(
        &self,
        out: &mut dyn Write,
    ) -> Result<()> {
        let mut state = self.state().await?;
        state.reset();
        self.save(&state).await?;
        info!("reset debts to defaults");
        writeln!(out, "Restored {} sample debts.", state.debts.len())?;
        Ok(())
    }

    async fn compare(
        &self,
        chart_points: usize,
        out: &mut dyn Write,
    ) -> Result<()> {
        let state = self.state().await?;
        for issue in interest_warnings(&state.debts) {
            writeln!(out, "warning: {issue}")?;
        }

        let summary = state.summary();
        let comparison = state.compare(&self.simulator);
        write!(
            out,
            "{}",
            Dashboard {
                summary: &summary,
                comparison: &comparison,
                current: state.strategy,
            }
        )?;

        let points = comparison.chart_series(chart_points);
        if !points.is_empty() {
            writeln!(out)?;
            write!(out, "{}", BalanceChart { points: &points })?;
        }
        Ok(())
    }

    async fn schedule(
        &self,
        csv: Option<&Path>,
        out: &mut dyn Write,
    ) -> Result<()> {
        let state = self.state().await?;
        let result = self
            .simulator
            .simulate(&state.debts, state.strategy, state.extra_payment);

        writeln!(
            out,
            "{} schedule with {} extra per month",
            state.strategy,
            format_currency(state.extra_payment)
        )?;
        write!(
            out,
            "{}",
            ScheduleTable {
                result: &result,
                debts: &state.debts,
            }
        )?;

        if let Some(path) = csv {
            if let Some(error) = &result.error {
                warn!(%error, "skipping CSV export");
                writeln!(out, "CSV not written: {error}")?;
            } else {
                write_schedule_file(path, &result, &state.debts)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                writeln!(out, "Wrote {}.", path.display())?;
            }
        }
        Ok(())
    }

    async fn export(
        &self,
        path: &Path,
        out: &mut dyn Write,
    ) -> Result<()> {
        let state = self.state().await?;
        let file =
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
        write_debts(file, &state.debts)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        writeln!(
            out,
            "Exported {} debts to {}.",
            state.debts.len(),
            path.display()
        )?;
        Ok(())
    }
}

fn check(debt: &Debt) -> Result<()> {
    if let Err(issues) = validate_debt(debt) {
        bail!("invalid debt: {}", describe(&issues));
    }
    Ok(())
}

fn warn_interest(
    debt: &Debt,
    out: &mut dyn Write,
) -> Result<()> {
    for issue in interest_warnings(std::slice::from_ref(debt)) {
        writeln!(out, "warning: {issue}")?;
    }
    Ok(())
}
