// src/simulation/engine.rs

use crate::error::Result;
use crate::model::demand::DemandModel;
use crate::model::queues::PendingOrderQueue;
use crate::model::stock::StockPoint;
use crate::simulation::config::SimulationParameters;
use crate::simulation::summary::{backfill_stockout_durations, SimulationSummary};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info, trace, warn};

/// One simulated day. Serialize so it can be written to CSV/JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRecord {
    pub day: u32,
    pub demand: u32,
    pub stock_level: u32,
    pub order_placed: bool,
    pub order_quantity: u32,
    pub stockout: bool,
    /// Length of the stockout run this day belongs to, 0 if in stock.
    pub stockout_duration: u32,
}

/// Output of one run: the daily series plus the aggregated KPIs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResults {
    pub daily_data: Vec<DailyRecord>,
    #[serde(flatten)]
    pub summary: SimulationSummary,
}

/// Per-run accumulators.
#[derive(Debug, Default)]
pub(crate) struct RunTotals {
    pub total_demand: u64,
    pub total_orders: u32,
    pub stockout_days: u32,
    pub cumulative_stock: u64,
    pub order_cycles: Vec<u32>,
    pub last_order_day: Option<u32>,
}

pub struct InventorySimulation<R: Rng = StdRng> {
    params: SimulationParameters,
    demand: DemandModel,
    stock: StockPoint,
    pending: PendingOrderQueue,
    rng: R,

    pub current_day: u32,
    pub history: Vec<DailyRecord>,
    totals: RunTotals,
}

impl InventorySimulation<StdRng> {
    /// Reproducible run: the same seed and parameters always give the same results.
    pub fn seeded(params: SimulationParameters, seed: u64) -> Result<Self> {
        Self::new(params, StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy(params: SimulationParameters) -> Result<Self> {
        Self::new(params, StdRng::from_entropy())
    }
}

impl<R: Rng> InventorySimulation<R> {
    pub fn new(params: SimulationParameters, rng: R) -> Result<Self> {
        params.validate()?;
        if params.demand_variability > 1.0 {
            warn!(
                demand_variability = params.demand_variability,
                "demand variability above 1, some days will clamp to zero demand"
            );
        }

        Ok(Self {
            demand: DemandModel::from_parameters(&params),
            stock: StockPoint::new(params.initial_stock),
            pending: PendingOrderQueue::new(),
            rng,
            current_day: 1,
            history: Vec::with_capacity(params.simulation_duration as usize),
            totals: RunTotals::default(),
            params,
        })
    }

    pub fn parameters(&self) -> &SimulationParameters {
        &self.params
    }

    pub fn pending_orders(&self) -> &PendingOrderQueue {
        &self.pending
    }

    /// Runs every remaining day, then post-processes and summarises.
    pub fn run(mut self) -> SimulationResults {
        while self.step().is_some() {}
        self.finish()
    }

    /// Simulates the next day and returns its record, or `None` once every
    /// day of the run has been simulated.
    pub fn step(&mut self) -> Option<&DailyRecord> {
        let day = self.current_day;
        if day > self.params.simulation_duration {
            return None;
        }

        // 1. Customer demand
        let demand = self.demand.sample(day, &mut self.rng);
        self.totals.total_demand += u64::from(demand);

        // 2. Morning arrivals
        let arrived = self.pending.pop_arrivals(day);
        if arrived > 0 {
            debug!(day, quantity = arrived, "replenishment arrived");
        }
        self.stock.receive_shipment(arrived);

        // 3. Serve demand, the shortfall is lost
        self.stock.fulfill(demand);

        // 4. Reorder, at most one order outstanding
        let mut order_quantity = 0;
        if self.stock.at_or_below(self.params.reorder_point) && self.pending.is_empty() {
            let order =
                self.pending
                    .push_departure(self.params.order_quantity, day, self.params.lead_time);
            order_quantity = order.quantity;
            self.totals.total_orders += 1;

            if let Some(last) = self.totals.last_order_day {
                self.totals.order_cycles.push(day - last);
            }
            self.totals.last_order_day = Some(day);

            debug!(
                day,
                stock = self.stock.stock_level,
                quantity = order.quantity,
                arrival_day = order.arrival_day,
                "order placed"
            );
        }

        // 5. Stockout bookkeeping
        let stockout = self.stock.is_stocked_out();
        if stockout {
            self.totals.stockout_days += 1;
        }

        // 6. Running stock for the average
        self.totals.cumulative_stock += u64::from(self.stock.stock_level);

        if day % 5 == 0 {
            trace!(
                day,
                stock = self.stock.stock_level,
                demand,
                received = self.stock.last_received,
                lost = self.stock.lost_sales(),
                "daily position"
            );
        }

        // 7. Record, duration is backfilled once the run completes
        self.history.push(DailyRecord {
            day,
            demand,
            stock_level: self.stock.stock_level,
            order_placed: order_quantity > 0,
            order_quantity,
            stockout,
            stockout_duration: u32::from(stockout),
        });
        self.current_day += 1;

        self.history.last()
    }

    fn finish(mut self) -> SimulationResults {
        backfill_stockout_durations(&mut self.history);
        let summary = SimulationSummary::from_totals(&self.totals, self.params.simulation_duration);

        info!(
            days = self.params.simulation_duration,
            total_demand = summary.total_demand,
            total_orders = summary.total_orders,
            stockout_days = summary.stockout_days,
            service_level = summary.service_level,
            "simulation complete"
        );

        SimulationResults {
            daily_data: self.history,
            summary,
        }
    }
}

/// Validates `params` and runs them once with a freshly seeded generator.
pub fn simulate(params: &SimulationParameters) -> Result<SimulationResults> {
    Ok(InventorySimulation::from_entropy(params.clone())?.run())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimulationError;

    fn deterministic(duration: u32) -> SimulationParameters {
        SimulationParameters {
            demand_variability: 0.0,
            order_quantity: 50,
            lead_time: 7,
            reorder_point: 20,
            initial_stock: 100,
            simulation_duration: duration,
            seasonality_enabled: false,
            external_factors_enabled: false,
        }
    }

    fn run_seeded(params: SimulationParameters, seed: u64) -> SimulationResults {
        InventorySimulation::seeded(params, seed).unwrap().run()
    }

    #[test]
    fn thirty_day_trajectory_is_predictable() {
        let results = run_seeded(deterministic(30), 0);
        let stock: Vec<u32> = results.daily_data.iter().map(|r| r.stock_level).collect();

        assert_eq!(
            stock,
            vec![
                90, 80, 70, 60, 50, 40, 30, 20, 10, 0, // order on day 8
                0, 0, 0, 0, 40, 30, 20, 10, 0, 0, // arrives day 15, reorder day 17
                0, 0, 0, 40, 30, 20, 10, 0, 0, 0, // arrives day 24, reorder day 26
            ]
        );
        assert!(results.daily_data.iter().all(|r| r.demand == 10));

        let order_days: Vec<u32> = results
            .daily_data
            .iter()
            .filter(|r| r.order_placed)
            .map(|r| r.day)
            .collect();
        assert_eq!(order_days, vec![8, 17, 26]);

        let s = &results.summary;
        assert_eq!(s.total_demand, 300);
        assert_eq!(s.total_orders, 3);
        assert_eq!(s.stockout_days, 13);
        assert_eq!(s.average_order_cycle, 9.0);
        assert_eq!(s.service_level, 1.0 - 13.0 / 30.0);
        assert!((s.average_stock_level - 650.0 / 30.0).abs() < 1e-12);
    }

    #[test]
    fn trailing_stockout_run_is_backfilled() {
        let results = run_seeded(deterministic(30), 0);
        let durations: Vec<u32> = results.daily_data[27..]
            .iter()
            .map(|r| r.stockout_duration)
            .collect();
        assert_eq!(durations, vec![3, 3, 3]);
        assert!(results.daily_data[9..14].iter().all(|r| r.stockout_duration == 5));
        assert_eq!(results.daily_data[14].stockout_duration, 0);
    }

    #[test]
    fn ninety_day_scenario_totals() {
        let results = run_seeded(deterministic(90), 0);
        let s = &results.summary;

        assert_eq!(results.daily_data.len(), 90);
        assert_eq!(s.total_demand, 900);
        assert_eq!(s.total_orders, 10);
        assert_eq!(s.stockout_days, 45);
        assert_eq!(s.service_level, 0.5);
        assert_eq!(s.average_stock_level, 15.0);
        assert_eq!(s.inventory_turnover, Some(60.0));
        assert_eq!(s.average_order_cycle, 9.0);
    }

    #[test]
    fn single_day_run() {
        let results = run_seeded(deterministic(1), 0);
        assert_eq!(results.daily_data.len(), 1);
        assert_eq!(results.daily_data[0].stock_level, 90);
        assert_eq!(results.summary.average_order_cycle, 0.0);
    }

    #[test]
    fn empty_start_orders_and_stocks_out_on_day_one() {
        let params = SimulationParameters {
            initial_stock: 0,
            ..deterministic(10)
        };
        let results = run_seeded(params, 0);
        let first = &results.daily_data[0];

        assert!(first.order_placed);
        assert_eq!(first.order_quantity, 50);
        assert!(first.stockout);
        assert_eq!(first.stock_level, 0);
    }

    #[test]
    fn never_stocked_turnover_is_none() {
        let params = SimulationParameters {
            initial_stock: 0,
            lead_time: 100,
            ..deterministic(20)
        };
        let results = run_seeded(params, 0);

        assert_eq!(results.summary.average_stock_level, 0.0);
        assert_eq!(results.summary.inventory_turnover, None);
        assert_eq!(results.summary.service_level, 0.0);
        assert!(results.daily_data.iter().all(|r| r.stockout_duration == 20));
    }

    #[test]
    fn zero_lead_time_keeps_reordering() {
        let params = SimulationParameters {
            lead_time: 0,
            initial_stock: 30,
            ..deterministic(10)
        };
        let results = run_seeded(params, 0);
        assert!(results.summary.total_orders > 1);
    }

    #[test]
    fn zero_lead_time_matches_one_day_lead_time() {
        let base = SimulationParameters {
            initial_stock: 30,
            ..deterministic(12)
        };
        let zero = run_seeded(SimulationParameters { lead_time: 0, ..base.clone() }, 0);
        let one = run_seeded(SimulationParameters { lead_time: 1, ..base }, 0);

        let stock: Vec<u32> = zero.daily_data.iter().map(|r| r.stock_level).collect();
        assert_eq!(stock, vec![20, 60, 50, 40, 30, 20, 60, 50, 40, 30, 20, 60]);
        assert_eq!(zero, one);
    }

    #[test]
    fn pending_order_never_outlives_its_arrival_day() {
        let params = SimulationParameters {
            lead_time: 0,
            initial_stock: 30,
            ..deterministic(12)
        };
        let mut sim = InventorySimulation::seeded(params, 0).unwrap();
        while sim.step().is_some() {
            let today = sim.current_day - 1;
            assert!(sim.pending_orders().iter().all(|o| o.arrival_day > today));
        }
    }

    #[test]
    fn stepping_past_the_horizon_is_a_no_op() {
        let mut sim = InventorySimulation::seeded(deterministic(3), 0).unwrap();
        for _ in 0..3 {
            assert!(sim.step().is_some());
        }
        assert!(sim.step().is_none());
        assert!(sim.step().is_none());

        let results = sim.run();
        assert_eq!(results.daily_data.len(), 3);
        assert_eq!(results.summary.total_demand, 30);
    }

    #[test]
    fn at_most_one_order_outstanding() {
        crate::logging::init_test();
        let mut sim = InventorySimulation::seeded(SimulationParameters::default(), 5).unwrap();
        while sim.step().is_some() {
            assert!(sim.pending_orders().len() <= 1);
        }
    }

    #[test]
    fn same_seed_same_results() {
        let params = SimulationParameters::default();
        assert_eq!(run_seeded(params.clone(), 42), run_seeded(params, 42));
    }

    #[test]
    fn invalid_parameters_are_rejected_up_front() {
        let params = SimulationParameters {
            simulation_duration: 0,
            ..Default::default()
        };
        assert!(matches!(
            simulate(&params),
            Err(SimulationError::Validation(_))
        ));
    }

    #[test]
    fn results_serialize_flat_camel_case() {
        let results = run_seeded(deterministic(2), 0);
        let json = serde_json::to_value(&results).unwrap();

        assert_eq!(json["dailyData"].as_array().unwrap().len(), 2);
        assert_eq!(json["totalDemand"], 20);
        assert_eq!(json["dailyData"][0]["stockLevel"], 90);
        assert!(json.get("summary").is_none());
    }
}
