// src/scenario/mod.rs

//! Named parameter sets, run history and side-by-side comparison.

use crate::error::{Result, SimulationError};
use crate::simulation::config::{ParameterUpdate, SimulationParameters};
use crate::simulation::engine::{InventorySimulation, SimulationResults};
use crate::simulation::summary::SimulationSummary;
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::collections::{BTreeMap, VecDeque};
use tracing::{info, warn};

pub const DEFAULT_SCENARIO_ID: &str = "default";
pub const DEFAULT_SCENARIO_NAME: &str = "Default Scenario";
/// Number of past runs kept in the history.
pub const HISTORY_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scenario {
    pub name: String,
    pub parameters: SimulationParameters,
    pub results: Option<SimulationResults>,
}

/// KPIs kept for each past run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistorySummary {
    pub average_stock_level: f64,
    pub total_demand: u64,
    pub stockout_days: u32,
    pub service_level: f64,
}

impl From<&SimulationSummary> for HistorySummary {
    fn from(s: &SimulationSummary) -> Self {
        Self {
            average_stock_level: s.average_stock_level,
            total_demand: s.total_demand,
            stockout_days: s.stockout_days,
            service_level: s.service_level,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub parameters: SimulationParameters,
    pub summary: HistorySummary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioInfo {
    pub id: String,
    pub name: String,
}

/// One column of a scenario comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonEntry {
    pub id: String,
    pub name: String,
    pub summary: Option<SimulationSummary>,
}

/// Lower-cased name with each inner whitespace run replaced by `-`;
/// leading and trailing whitespace is dropped.
pub fn scenario_id(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

pub struct ScenarioStore<R: Rng = StdRng> {
    parameters: SimulationParameters,
    results: Option<SimulationResults>,
    history: VecDeque<HistoryEntry>,
    current: String,
    saved: BTreeMap<String, Scenario>,
    comparison_mode: bool,
    comparison: Vec<String>,
    last_error: Option<String>,
    runs: u64,
    rng: R,
}

impl ScenarioStore<StdRng> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for ScenarioStore<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> ScenarioStore<R> {
    pub fn with_rng(rng: R) -> Self {
        let parameters = SimulationParameters::default();
        let mut saved = BTreeMap::new();
        saved.insert(
            DEFAULT_SCENARIO_ID.to_string(),
            Scenario {
                name: DEFAULT_SCENARIO_NAME.to_string(),
                parameters: parameters.clone(),
                results: None,
            },
        );

        Self {
            parameters,
            results: None,
            history: VecDeque::with_capacity(HISTORY_LIMIT),
            current: DEFAULT_SCENARIO_ID.to_string(),
            saved,
            comparison_mode: false,
            comparison: Vec::new(),
            last_error: None,
            runs: 0,
            rng,
        }
    }

    pub fn parameters(&self) -> &SimulationParameters {
        &self.parameters
    }

    pub fn results(&self) -> Option<&SimulationResults> {
        self.results.as_ref()
    }

    pub fn summary(&self) -> Option<&SimulationSummary> {
        self.results.as_ref().map(|r| &r.summary)
    }

    pub fn history(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.history.iter()
    }

    pub fn current_scenario(&self) -> &str {
        &self.current
    }

    pub fn scenario(&self, id: &str) -> Option<&Scenario> {
        self.saved.get(id)
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn comparison_mode(&self) -> bool {
        self.comparison_mode
    }

    pub fn comparison_ids(&self) -> &[String] {
        &self.comparison
    }

    pub fn available_scenarios(&self) -> Vec<ScenarioInfo> {
        self.saved
            .iter()
            .map(|(id, s)| ScenarioInfo {
                id: id.clone(),
                name: s.name.clone(),
            })
            .collect()
    }

    pub fn update_parameters(&mut self, update: &ParameterUpdate) {
        self.parameters.apply(update);
    }

    /// Runs the current parameters and records the outcome.
    pub fn run_simulation(&mut self) -> Result<&SimulationResults> {
        self.last_error = None;

        let sim = match InventorySimulation::new(self.parameters.clone(), &mut self.rng) {
            Ok(sim) => sim,
            Err(err) => {
                warn!(error = %err, scenario = %self.current, "simulation failed");
                self.last_error = Some(err.to_string());
                return Err(err);
            }
        };
        let results = sim.run();

        self.runs += 1;
        self.history.push_back(HistoryEntry {
            id: format!("sim-{}", self.runs),
            timestamp: Utc::now(),
            parameters: self.parameters.clone(),
            summary: HistorySummary::from(&results.summary),
        });
        while self.history.len() > HISTORY_LIMIT {
            self.history.pop_front();
        }

        if let Some(scenario) = self.saved.get_mut(&self.current) {
            scenario.results = Some(results.clone());
        }

        Ok(&*self.results.insert(results))
    }

    /// Saves the current parameters and results under `name`, returning its id.
    pub fn save_scenario(&mut self, name: &str) -> String {
        let id = scenario_id(name);
        self.saved.insert(
            id.clone(),
            Scenario {
                name: name.to_string(),
                parameters: self.parameters.clone(),
                results: self.results.clone(),
            },
        );
        self.current = id.clone();

        info!(scenario = %id, "scenario saved");
        id
    }

    pub fn load_scenario(&mut self, id: &str) -> Result<()> {
        let scenario = self
            .saved
            .get(id)
            .ok_or_else(|| SimulationError::ScenarioNotFound(id.to_string()))?;

        self.parameters = scenario.parameters.clone();
        self.results = scenario.results.clone();
        self.current = id.to_string();
        Ok(())
    }

    pub fn delete_scenario(&mut self, id: &str) -> Result<()> {
        if id == DEFAULT_SCENARIO_ID {
            return Err(SimulationError::ProtectedScenario(id.to_string()));
        }
        if self.saved.remove(id).is_none() {
            return Err(SimulationError::ScenarioNotFound(id.to_string()));
        }

        if self.current == id {
            self.load_scenario(DEFAULT_SCENARIO_ID)?;
        }
        self.comparison.retain(|s| s != id);

        info!(scenario = %id, "scenario deleted");
        Ok(())
    }

    pub fn toggle_comparison_mode(&mut self) {
        self.comparison_mode = !self.comparison_mode;

        if self.comparison_mode && !self.comparison.contains(&self.current) {
            self.comparison.push(self.current.clone());
        }
    }

    pub fn add_to_comparison(&mut self, id: &str) -> Result<()> {
        if !self.saved.contains_key(id) {
            return Err(SimulationError::ScenarioNotFound(id.to_string()));
        }
        if !self.comparison.iter().any(|s| s == id) {
            self.comparison.push(id.to_string());
        }
        Ok(())
    }

    pub fn remove_from_comparison(&mut self, id: &str) {
        self.comparison.retain(|s| s != id);
    }

    pub fn clear_comparison(&mut self) {
        self.comparison.clear();
        self.comparison_mode = false;
    }

    pub fn reset_to_defaults(&mut self) -> Result<()> {
        self.load_scenario(DEFAULT_SCENARIO_ID)
    }

    /// Compared scenarios in the order they were added.
    pub fn comparison(&self) -> Vec<ComparisonEntry> {
        self.comparison
            .iter()
            .filter_map(|id| {
                self.saved.get(id).map(|s| ComparisonEntry {
                    id: id.clone(),
                    name: s.name.clone(),
                    summary: s.results.as_ref().map(|r| r.summary.clone()),
                })
            })
            .collect()
    }
}
