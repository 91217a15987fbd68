// src/simulation/series.rs

//! Chart-ready views over a run's daily records.

use crate::simulation::engine::SimulationResults;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeriesPoint {
    pub day: u32,
    pub value: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderEvent {
    pub day: u32,
    pub quantity: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StockoutEvent {
    pub day: u32,
    pub duration: u32,
}

impl SimulationResults {
    pub fn stock_levels_over_time(&self) -> Vec<SeriesPoint> {
        self.daily_data
            .iter()
            .map(|r| SeriesPoint {
                day: r.day,
                value: r.stock_level,
            })
            .collect()
    }

    pub fn demand_over_time(&self) -> Vec<SeriesPoint> {
        self.daily_data
            .iter()
            .map(|r| SeriesPoint {
                day: r.day,
                value: r.demand,
            })
            .collect()
    }

    /// Only the days on which an order was placed.
    pub fn orders_over_time(&self) -> Vec<OrderEvent> {
        self.daily_data
            .iter()
            .filter(|r| r.order_placed)
            .map(|r| OrderEvent {
                day: r.day,
                quantity: r.order_quantity,
            })
            .collect()
    }

    pub fn stockouts_over_time(&self) -> Vec<StockoutEvent> {
        self.daily_data
            .iter()
            .filter(|r| r.stock_level == 0)
            .map(|r| StockoutEvent {
                day: r.day,
                duration: r.stockout_duration,
            })
            .collect()
    }
}
