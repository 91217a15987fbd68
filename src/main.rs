use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use inventory_sim::io::reporting;
use inventory_sim::logging;
use inventory_sim::scenario::ScenarioStore;
use inventory_sim::{InventorySimulation, ParameterUpdate, SimulationParameters, SimulationSummary};
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "inventory-sim", about = "Day-by-day inventory simulation")]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run one simulation and print its KPIs
    Run(RunArgs),
    /// Run every scenario in a file and compare them
    Compare(CompareArgs),
}

#[derive(Args)]
struct RunArgs {
    /// JSON parameter file; flags below override its values
    #[arg(long)]
    params: Option<PathBuf>,
    #[arg(long)]
    demand_variability: Option<f64>,
    #[arg(long)]
    lead_time: Option<u32>,
    #[arg(long)]
    reorder_point: Option<u32>,
    #[arg(long)]
    order_quantity: Option<u32>,
    #[arg(long)]
    initial_stock: Option<u32>,
    #[arg(long)]
    duration: Option<u32>,
    #[arg(long)]
    no_seasonality: bool,
    #[arg(long)]
    no_external_factors: bool,
    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,
    /// Write the daily records to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,
    /// Print the full results as JSON instead of the KPI table
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct CompareArgs {
    /// JSON object mapping scenario names to parameter sets
    #[arg(long)]
    scenarios: PathBuf,
    #[arg(long)]
    seed: Option<u64>,
}

impl RunArgs {
    fn update(&self) -> ParameterUpdate {
        ParameterUpdate {
            demand_variability: self.demand_variability,
            order_quantity: self.order_quantity,
            lead_time: self.lead_time,
            reorder_point: self.reorder_point,
            initial_stock: self.initial_stock,
            simulation_duration: self.duration,
            seasonality_enabled: self.no_seasonality.then_some(false),
            external_factors_enabled: self.no_external_factors.then_some(false),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if cli.json_logs {
        logging::init_json();
    } else {
        logging::init();
    }

    match cli.command {
        Command::Run(args) => run(args),
        Command::Compare(args) => compare(args),
    }
}

fn run(args: RunArgs) -> anyhow::Result<()> {
    let mut params = match &args.params {
        Some(path) => SimulationParameters::from_json_file(path)
            .with_context(|| format!("failed to load parameters from {}", path.display()))?,
        None => SimulationParameters::default(),
    };
    params.apply(&args.update());

    let sim = match args.seed {
        Some(seed) => InventorySimulation::seeded(params, seed),
        None => InventorySimulation::from_entropy(params),
    }
    .context("invalid simulation parameters")?;
    let results = sim.run();

    if let Some(path) = &args.csv {
        reporting::write_daily_csv(path, &results.daily_data)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        print_summary(&results.summary);
    }
    Ok(())
}

fn compare(args: CompareArgs) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(&args.scenarios)
        .with_context(|| format!("failed to read {}", args.scenarios.display()))?;
    let scenarios: BTreeMap<String, SimulationParameters> =
        serde_json::from_str(&raw).context("scenario file must map names to parameter sets")?;

    let mut store = match args.seed {
        Some(seed) => ScenarioStore::seeded(seed),
        None => ScenarioStore::new(),
    };

    for (name, params) in &scenarios {
        store.update_parameters(&full_update(params));
        let id = store.save_scenario(name);
        store
            .run_simulation()
            .with_context(|| format!("scenario '{name}' failed"))?;
        store.add_to_comparison(&id)?;
    }

    println!(
        "{:<24} {:>10} {:>10} {:>8} {:>10} {:>9} {:>10}",
        "scenario", "avg stock", "demand", "orders", "stockouts", "service", "turnover"
    );
    for entry in store.comparison() {
        let Some(s) = entry.summary else { continue };
        println!(
            "{:<24} {:>10.2} {:>10} {:>8} {:>10} {:>8.1}% {:>10}",
            entry.name,
            s.average_stock_level,
            s.total_demand,
            s.total_orders,
            s.stockout_days,
            s.service_level * 100.0,
            format_turnover(s.inventory_turnover),
        );
    }
    Ok(())
}

fn full_update(p: &SimulationParameters) -> ParameterUpdate {
    ParameterUpdate {
        demand_variability: Some(p.demand_variability),
        order_quantity: Some(p.order_quantity),
        lead_time: Some(p.lead_time),
        reorder_point: Some(p.reorder_point),
        initial_stock: Some(p.initial_stock),
        simulation_duration: Some(p.simulation_duration),
        seasonality_enabled: Some(p.seasonality_enabled),
        external_factors_enabled: Some(p.external_factors_enabled),
    }
}

fn format_turnover(turnover: Option<f64>) -> String {
    turnover.map_or_else(|| "n/a".to_string(), |t| format!("{t:.2}"))
}

fn print_summary(s: &SimulationSummary) {
    println!("=== Simulation Summary ===");
    println!("Average stock level:  {:.2}", s.average_stock_level);
    println!("Total demand:         {}", s.total_demand);
    println!("Orders placed:        {}", s.total_orders);
    println!("Stockout days:        {}", s.stockout_days);
    println!("Service level:        {:.1}%", s.service_level * 100.0);
    println!("Inventory turnover:   {}", format_turnover(s.inventory_turnover));
    println!("Average order cycle:  {:.1} days", s.average_order_cycle);
}
