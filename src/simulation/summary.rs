// src/simulation/summary.rs

use crate::simulation::engine::{DailyRecord, RunTotals};
use serde::Serialize;

/// Aggregate KPIs of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationSummary {
    pub average_stock_level: f64,
    pub total_demand: u64,
    pub total_orders: u32,
    pub stockout_days: u32,
    /// Fraction of days that ended with stock on hand.
    pub service_level: f64,
    /// Total demand over average stock; `None` when the shelf was empty all run.
    pub inventory_turnover: Option<f64>,
    /// Mean number of days between consecutive orders, 0 with fewer than two orders.
    pub average_order_cycle: f64,
}

impl SimulationSummary {
    pub(crate) fn from_totals(totals: &RunTotals, duration: u32) -> Self {
        let days = f64::from(duration);
        let average_stock_level = totals.cumulative_stock as f64 / days;

        let inventory_turnover = if average_stock_level > 0.0 {
            Some(totals.total_demand as f64 / average_stock_level)
        } else {
            None
        };

        let average_order_cycle = if totals.order_cycles.is_empty() {
            0.0
        } else {
            let sum: u64 = totals.order_cycles.iter().map(|&c| u64::from(c)).sum();
            sum as f64 / totals.order_cycles.len() as f64
        };

        Self {
            average_stock_level,
            total_demand: totals.total_demand,
            total_orders: totals.total_orders,
            stockout_days: totals.stockout_days,
            service_level: 1.0 - f64::from(totals.stockout_days) / days,
            inventory_turnover,
            average_order_cycle,
        }
    }
}

/// Overwrites `stockout_duration` on every record of each contiguous stockout
/// run with the full length of that run, including a run still open on the last day.
pub fn backfill_stockout_durations(records: &mut [DailyRecord]) {
    let mut run_start: Option<usize> = None;

    for i in 0..=records.len() {
        let in_stockout = records.get(i).map_or(false, |r| r.stockout);
        match (run_start, in_stockout) {
            (None, true) => run_start = Some(i),
            (Some(start), false) => {
                let length = (i - start) as u32;
                for record in &mut records[start..i] {
                    record.stockout_duration = length;
                }
                run_start = None;
            }
            _ => {}
        }
    }
}
