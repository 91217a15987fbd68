//! Discrete-event inventory simulation.
//!
//! A single item is simulated day by day under a reorder-point policy with a
//! fixed order quantity, lead time and lost sales. See [`simulate`] for a
//! one-shot run and [`scenario::ScenarioStore`] for managing named parameter sets.

pub mod error;
pub mod io;
pub mod logging;
pub mod model;
pub mod scenario;
pub mod simulation;

pub use error::{Result, SimulationError};
pub use simulation::config::{ParameterUpdate, SimulationParameters};
pub use simulation::engine::{simulate, DailyRecord, InventorySimulation, SimulationResults};
pub use simulation::summary::SimulationSummary;
