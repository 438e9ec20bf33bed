//! Plain-text views printed by the commands.

use std::fmt;

use debt_core::calculations::{ChartPoint, PortfolioSummary, StrategyComparison};
use debt_core::{Debt, PayoffResult, Strategy};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::utils::{format_currency, format_duration, format_money, format_month_year};

const CHART_WIDTH: usize = 40;

/// Portfolio listing with a totals footer.
pub struct DebtTable<'a> {
    pub debts: &'a [Debt],
    pub summary: &'a PortfolioSummary,
}

impl fmt::Display for DebtTable<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        if self.debts.is_empty() {
            writeln!(f, "No debts. Use `add` or `import` to create some.")?;
        } else {
            writeln!(
                f,
                "{:<6} {:<24} {:>14} {:>8} {:>12}",
                "ID", "Name", "Balance", "Rate", "Minimum"
            )?;
            for debt in self.debts {
                writeln!(
                    f,
                    "{:<6} {:<24} {:>14} {:>7}% {:>12}",
                    debt.id,
                    debt.name,
                    format_money(debt.balance),
                    debt.rate,
                    format_money(debt.min_payment)
                )?;
            }
        }
        writeln!(f)?;
        writeln!(
            f,
            "Total debt:      {}",
            format_currency(self.summary.total_balance)
        )?;
        writeln!(
            f,
            "Minimums:        {}",
            format_currency(self.summary.total_min_payment)
        )?;
        writeln!(
            f,
            "Extra payment:   {}",
            format_currency(self.summary.extra_payment)
        )?;
        writeln!(
            f,
            "Monthly payment: {}",
            format_currency(self.summary.monthly_payment)
        )
    }
}

fn write_outcome(
    f: &mut fmt::Formatter<'_>,
    result: &PayoffResult,
) -> fmt::Result {
    writeln!(f, "{}", result.strategy)?;
    if let Some(error) = &result.error {
        return writeln!(f, "  {error}");
    }
    writeln!(
        f,
        "  Debt-free:      {}",
        format_month_year(result.payoff_date)
    )?;
    writeln!(
        f,
        "  Time to payoff: {}",
        format_duration(result.months_to_payoff)
    )?;
    writeln!(
        f,
        "  Total interest: {}",
        format_currency(result.total_interest)
    )
}

/// Summary cards for both strategies plus the switching advice.
pub struct Dashboard<'a> {
    pub summary: &'a PortfolioSummary,
    pub comparison: &'a StrategyComparison,
    pub current: Strategy,
}

impl fmt::Display for Dashboard<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(
            f,
            "Total debt {} | Monthly payment {} | Current strategy {}",
            format_currency(self.summary.total_balance),
            format_currency(self.summary.monthly_payment),
            self.current
        )?;
        writeln!(f)?;
        write_outcome(f, &self.comparison.snowball)?;
        writeln!(f)?;
        write_outcome(f, &self.comparison.avalanche)?;
        writeln!(f)?;

        let converged = self.comparison.snowball.error.is_none()
            && self.comparison.avalanche.error.is_none();
        if !converged {
            return Ok(());
        }

        let savings = self.comparison.savings_by_switching(self.current);
        if savings > Decimal::ZERO {
            writeln!(
                f,
                "Switching to {} saves {} in interest.",
                self.current.other(),
                format_currency(savings)
            )
        } else if savings < Decimal::ZERO {
            writeln!(
                f,
                "{} already saves {} over {}.",
                self.current,
                format_currency(-savings),
                self.current.other()
            )
        } else {
            writeln!(f, "Both strategies cost the same in interest.")
        }
    }
}

/// Side-by-side balance bars over time.
pub struct BalanceChart<'a> {
    pub points: &'a [ChartPoint],
}

fn bar(
    value: Decimal,
    max: Decimal,
) -> String {
    if max <= Decimal::ZERO || value <= Decimal::ZERO {
        return String::new();
    }
    // value <= max, so the share stays within 0..=1 even at Decimal::MAX.
    let width = (value.min(max) / max * Decimal::from(CHART_WIDTH))
        .round()
        .to_usize()
        .unwrap_or(0)
        .clamp(1, CHART_WIDTH);
    "#".repeat(width)
}

impl fmt::Display for BalanceChart<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let max = self
            .points
            .iter()
            .map(|p| p.snowball.max(p.avalanche))
            .max()
            .unwrap_or(Decimal::ZERO);

        for point in self.points {
            let label = point
                .date
                .map(format_month_year)
                .unwrap_or_else(|| format!("Month {}", point.index + 1));
            writeln!(
                f,
                "{:<9} S {:<w$} {:>10}",
                label,
                bar(point.snowball, max),
                format_currency(point.snowball),
                w = CHART_WIDTH
            )?;
            writeln!(
                f,
                "{:<9} A {:<w$} {:>10}",
                "",
                bar(point.avalanche, max),
                format_currency(point.avalanche),
                w = CHART_WIDTH
            )?;
        }
        Ok(())
    }
}

/// Month-by-month amortization table for one strategy.
pub struct ScheduleTable<'a> {
    pub result: &'a PayoffResult,
    pub debts: &'a [Debt],
}

impl fmt::Display for ScheduleTable<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        if let Some(error) = &self.result.error {
            return writeln!(f, "{error}");
        }

        write!(f, "{:>5} {:<9}", "Month", "Date")?;
        for debt in self.debts {
            write!(f, " {:>14}", truncate(&debt.name, 14))?;
        }
        writeln!(f, " {:>14} {:>14}", "Total", "Interest")?;

        for month in &self.result.monthly_data {
            write!(f, "{:>5} {:<9}", month.month, format_month_year(month.date))?;
            for debt in self.debts {
                write!(f, " {:>14}", format_money(month.balance_of(&debt.id)))?;
            }
            writeln!(
                f,
                " {:>14} {:>14}",
                format_money(month.total_balance),
                format_money(month.total_interest_paid)
            )?;
        }
        Ok(())
    }
}

fn truncate(
    s: &str,
    max: usize,
) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max - 1).collect();
        out.push('~');
        out
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use debt_core::{PayoffSimulator, SimulationConfig};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn simulator() -> PayoffSimulator {
        PayoffSimulator::new(SimulationConfig::starting(
            NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
        ))
    }

    fn loan() -> Vec<Debt> {
        vec![Debt::new("1", "Loan", dec!(300), dec!(0), dec!(100))]
    }

    #[test]
    fn debt_table_lists_debts_and_totals() {
        let debts = loan();
        let summary = PortfolioSummary::from_debts(&debts, dec!(50));

        let text = DebtTable {
            debts: &debts,
            summary: &summary,
        }
        .to_string();

        assert!(text.contains("Loan"));
        assert!(text.contains("$300.00"));
        assert!(text.contains("Monthly payment: $150"));
    }

    #[test]
    fn debt_table_hints_when_empty() {
        let summary = PortfolioSummary::from_debts(&[], dec!(0));

        let text = DebtTable {
            debts: &[],
            summary: &summary,
        }
        .to_string();

        assert!(text.starts_with("No debts."));
    }

    #[test]
    fn schedule_table_has_row_per_month() {
        let debts = loan();
        let result = simulator().simulate(&debts, Strategy::Snowball, dec!(0));

        let text = ScheduleTable {
            result: &result,
            debts: &debts,
        }
        .to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[1].contains("Feb 2025"));
        assert!(lines[3].contains("$0.00"));
    }

    #[test]
    fn schedule_table_prints_error_instead_of_rows() {
        let debts = vec![Debt::new("1", "Payday", dec!(10000), dec!(36), dec!(10))];
        let result = simulator().simulate(&debts, Strategy::Snowball, dec!(0));

        let text = ScheduleTable {
            result: &result,
            debts: &debts,
        }
        .to_string();

        assert_eq!(
            text.trim(),
            "Debts may not be payable with current parameters (interest > payments)"
        );
    }

    #[test]
    fn dashboard_recommends_cheaper_strategy() {
        let debts = vec![
            Debt::new("1", "Small low rate", dec!(1000), dec!(2), dec!(25)),
            Debt::new("2", "Large high rate", dec!(6000), dec!(24), dec!(150)),
        ];
        let summary = PortfolioSummary::from_debts(&debts, dec!(300));
        let comparison = StrategyComparison::run(&simulator(), &debts, dec!(300));

        let text = Dashboard {
            summary: &summary,
            comparison: &comparison,
            current: Strategy::Snowball,
        }
        .to_string();

        assert!(text.contains("Switching to Avalanche saves"), "{text}");
    }

    #[test]
    fn chart_scales_bars_to_largest_balance() {
        let points = vec![
            ChartPoint {
                index: 0,
                date: None,
                snowball: dec!(100),
                avalanche: dec!(50),
            },
            ChartPoint {
                index: 1,
                date: None,
                snowball: dec!(0),
                avalanche: dec!(0),
            },
        ];

        let text = BalanceChart { points: &points }.to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[0].contains(&"#".repeat(CHART_WIDTH)));
        assert!(lines[1].contains(&"#".repeat(CHART_WIDTH / 2)));
        assert!(!lines[1].contains(&"#".repeat(CHART_WIDTH / 2 + 1)));
        assert!(!lines[2].contains('#'));
    }

    #[test]
    fn chart_handles_saturated_balances() {
        let points = vec![
            ChartPoint {
                index: 0,
                date: None,
                snowball: Decimal::MAX,
                avalanche: dec!(1000),
            },
        ];

        let text = BalanceChart { points: &points }.to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[0].contains(&"#".repeat(CHART_WIDTH)));
        assert!(lines[1].contains(" A # "), "{text}");
    }

    #[test]
    fn runaway_portfolio_renders_errors_in_every_view() {
        let debts = vec![Debt::new("1", "Payday", dec!(1000), dec!(400), dec!(10))];
        let summary = PortfolioSummary::from_debts(&debts, dec!(0));
        let comparison = StrategyComparison::run(&simulator(), &debts, dec!(0));
        let last = comparison.snowball.final_month().unwrap();
        assert!(last.total_balance > Decimal::from(u64::MAX));

        let dashboard = Dashboard {
            summary: &summary,
            comparison: &comparison,
            current: Strategy::Snowball,
        }
        .to_string();
        let chart = BalanceChart {
            points: &comparison.chart_series(12),
        }
        .to_string();
        let schedule = ScheduleTable {
            result: &comparison.avalanche,
            debts: &debts,
        }
        .to_string();

        assert!(dashboard.contains("may not be payable"));
        assert!(!dashboard.contains("Switching"));
        assert!(chart.contains(&"#".repeat(CHART_WIDTH)));
        assert!(schedule.contains("may not be payable"));
    }

    #[test]
    fn truncate_marks_cut_names() {
        assert_eq!(truncate("Short", 14), "Short");
        assert_eq!(truncate("A very long debt name", 8), "A very ~");
    }
}
