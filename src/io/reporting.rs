// src/io/reporting.rs

use crate::error::Result;
use crate::simulation::engine::{DailyRecord, SimulationResults};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::info;

/// Writes the daily records to a CSV file, one row per simulated day.
///
/// # Arguments
/// * `file_path` - The path to save the file (e.g., "results/run_1.csv").
/// * `data` - The daily records of a finished run.
pub fn write_daily_csv(file_path: impl AsRef<Path>, data: &[DailyRecord]) -> Result<()> {
    let path = file_path.as_ref();
    let mut wtr = csv::Writer::from_path(path)?;

    for record in data {
        wtr.serialize(record)?;
    }

    // Flush the buffer to ensure all data is written
    wtr.flush()?;

    info!(rows = data.len(), path = %path.display(), "exported daily records");
    Ok(())
}

/// Writes the full results (daily data and summary) as pretty-printed JSON.
pub fn write_results_json(file_path: impl AsRef<Path>, results: &SimulationResults) -> Result<()> {
    let path = file_path.as_ref();
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, results)?;

    info!(path = %path.display(), "exported simulation results");
    Ok(())
}
