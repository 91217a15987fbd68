// src/simulation/config.rs

use crate::error::{Result, SimulationError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Input to a single simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimulationParameters {
    /// Fraction of random swing applied to daily demand (0 = none, 1 = +/-100%).
    pub demand_variability: f64,
    pub order_quantity: u32,
    pub lead_time: u32,
    pub reorder_point: u32,
    pub initial_stock: u32,
    pub simulation_duration: u32,
    pub seasonality_enabled: bool,
    pub external_factors_enabled: bool,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            demand_variability: 0.5,
            order_quantity: 50,
            lead_time: 7,
            reorder_point: 20,
            initial_stock: 100,
            simulation_duration: 90,
            seasonality_enabled: true,
            external_factors_enabled: true,
        }
    }
}

impl SimulationParameters {
    /// Loads parameters from a JSON file. Missing fields take their default value.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Rejects parameter sets that would produce a degenerate run.
    ///
    /// Variability above 1 is allowed: the demand factor may then go negative,
    /// in which case that day's demand clamps to zero.
    pub fn validate(&self) -> Result<()> {
        if self.simulation_duration == 0 {
            return Err(SimulationError::validation(
                "simulationDuration must be at least 1 day",
            ));
        }
        if self.order_quantity == 0 {
            return Err(SimulationError::validation(
                "orderQuantity must be greater than 0",
            ));
        }
        if !self.demand_variability.is_finite() || self.demand_variability < 0.0 {
            return Err(SimulationError::validation(format!(
                "demandVariability must be a finite, non-negative number (got {})",
                self.demand_variability
            )));
        }
        Ok(())
    }

    /// Merges a partial update into these parameters.
    pub fn apply(&mut self, update: &ParameterUpdate) {
        if let Some(v) = update.demand_variability {
            self.demand_variability = v;
        }
        if let Some(v) = update.order_quantity {
            self.order_quantity = v;
        }
        if let Some(v) = update.lead_time {
            self.lead_time = v;
        }
        if let Some(v) = update.reorder_point {
            self.reorder_point = v;
        }
        if let Some(v) = update.initial_stock {
            self.initial_stock = v;
        }
        if let Some(v) = update.simulation_duration {
            self.simulation_duration = v;
        }
        if let Some(v) = update.seasonality_enabled {
            self.seasonality_enabled = v;
        }
        if let Some(v) = update.external_factors_enabled {
            self.external_factors_enabled = v;
        }
    }
}

/// Partial parameter update; `None` fields leave the current value alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParameterUpdate {
    pub demand_variability: Option<f64>,
    pub order_quantity: Option<u32>,
    pub lead_time: Option<u32>,
    pub reorder_point: Option<u32>,
    pub initial_stock: Option<u32>,
    pub simulation_duration: Option<u32>,
    pub seasonality_enabled: Option<bool>,
    pub external_factors_enabled: Option<bool>,
}
