//! Side-by-side Snowball vs Avalanche results for one portfolio.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::calculations::common::round_whole;
use crate::calculations::payoff::PayoffSimulator;
use crate::models::{Debt, PayoffResult, Strategy};

/// Most points a chart series is downsampled to.
pub const DEFAULT_CHART_POINTS: usize = 100;

/// One x-axis position of the balance-over-time chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    /// 0-based index into the monthly data.
    pub index: usize,
    pub date: Option<NaiveDate>,
    /// Whole-unit balances; a strategy that already finished reads as zero.
    pub snowball: Decimal,
    pub avalanche: Decimal,
}

/// Both strategies simulated over the same portfolio and extra payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyComparison {
    pub snowball: PayoffResult,
    pub avalanche: PayoffResult,
}

impl StrategyComparison {
    pub fn run(
        simulator: &PayoffSimulator,
        debts: &[Debt],
        extra_monthly_payment: Decimal,
    ) -> Self {
        Self {
            snowball: simulator.simulate(debts, Strategy::Snowball, extra_monthly_payment),
            avalanche: simulator.simulate(debts, Strategy::Avalanche, extra_monthly_payment),
        }
    }

    pub fn result(
        &self,
        strategy: Strategy,
    ) -> &PayoffResult {
        match strategy {
            Strategy::Snowball => &self.snowball,
            Strategy::Avalanche => &self.avalanche,
        }
    }

    /// Snowball interest minus Avalanche interest.
    pub fn interest_savings(&self) -> Decimal {
        self.snowball
            .total_interest
            .saturating_sub(self.avalanche.total_interest)
    }

    /// Snowball months minus Avalanche months.
    pub fn months_difference(&self) -> i64 {
        i64::from(self.snowball.months_to_payoff) - i64::from(self.avalanche.months_to_payoff)
    }

    /// Strategy with the lower total interest, `None` on a tie.
    pub fn cheaper_strategy(&self) -> Option<Strategy> {
        match self
            .snowball
            .total_interest
            .cmp(&self.avalanche.total_interest)
        {
            std::cmp::Ordering::Less => Some(Strategy::Snowball),
            std::cmp::Ordering::Greater => Some(Strategy::Avalanche),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Interest saved by moving from `current` to the other strategy.
    /// Negative when `current` is already the cheaper one.
    pub fn savings_by_switching(
        &self,
        current: Strategy,
    ) -> Decimal {
        self.result(current)
            .total_interest
            .saturating_sub(self.result(current.other()).total_interest)
    }

    /// Merged balance series for charting both strategies.
    ///
    /// When there are more than `max_points` months only every
    /// `ceil(n / max_points)`-th month is kept, plus the last one.
    pub fn chart_series(
        &self,
        max_points: usize,
    ) -> Vec<ChartPoint> {
        let snowball = &self.snowball.monthly_data;
        let avalanche = &self.avalanche.monthly_data;
        let len = snowball.len().max(avalanche.len());
        let max_points = max_points.max(1);
        let step = if len > max_points {
            len.div_ceil(max_points)
        } else {
            1
        };

        (0..len)
            .filter(|&i| i % step == 0 || i == len - 1)
            .map(|i| {
                let s = snowball.get(i);
                let a = avalanche.get(i);
                ChartPoint {
                    index: i,
                    date: s.or(a).map(|m| m.date),
                    snowball: s.map_or(Decimal::ZERO, |m| round_whole(m.total_balance)),
                    avalanche: a.map_or(Decimal::ZERO, |m| round_whole(m.total_balance)),
                }
            })
            .collect()
    }
}
