// src/model/demand.rs

use crate::simulation::config::SimulationParameters;
use rand::Rng;
use rand_distr::{Distribution, Uniform};
use std::f64::consts::PI;

/// Units demanded per day before any modifiers.
pub const BASE_DAILY_DEMAND: f64 = 10.0;
pub const SEASONAL_PERIOD_DAYS: f64 = 30.0;
pub const SEASONAL_AMPLITUDE: f64 = 0.3;
/// Daily chance of an external event spiking demand.
pub const EXTERNAL_EVENT_PROBABILITY: f64 = 0.05;
pub const SPIKE_MIN: f64 = 1.0;
pub const SPIKE_MAX: f64 = 2.5;

/// Generates daily customer demand.
///
/// Draw order per day: event check (external factors only), spike factor
/// (only when the event fires), variability draw (always).
#[derive(Debug, Clone)]
pub struct DemandModel {
    variability: f64,
    seasonality: bool,
    external_factors: bool,
    spike: Uniform<f64>,
}

impl DemandModel {
    pub fn new(variability: f64, seasonality: bool, external_factors: bool) -> Self {
        Self {
            variability,
            seasonality,
            external_factors,
            spike: Uniform::new(SPIKE_MIN, SPIKE_MAX),
        }
    }

    pub fn from_parameters(params: &SimulationParameters) -> Self {
        Self::new(
            params.demand_variability,
            params.seasonality_enabled,
            params.external_factors_enabled,
        )
    }

    /// Multiplier from the 30-day sine wave, between 0.7 and 1.3.
    pub fn seasonal_factor(day: u32) -> f64 {
        (f64::from(day) / SEASONAL_PERIOD_DAYS * PI).sin() * SEASONAL_AMPLITUDE + 1.0
    }

    /// Demand for the 1-based `day`.
    pub fn sample<R: Rng + ?Sized>(&self, day: u32, rng: &mut R) -> u32 {
        let mut base = BASE_DAILY_DEMAND;

        if self.seasonality {
            base *= Self::seasonal_factor(day);
        }

        if self.external_factors && rng.gen_bool(EXTERNAL_EVENT_PROBABILITY) {
            base *= self.spike.sample(rng);
        }

        let u: f64 = rng.gen();
        let factor = 1.0 + (u * 2.0 - 1.0) * self.variability;

        // Factors can go negative when variability > 1; demand never does.
        let demand = (base * factor).round();
        if demand <= 0.0 {
            0
        } else {
            demand as u32
        }
    }
}
