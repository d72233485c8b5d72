//! Plot generation pipeline
//!
//! 1. Loads the stack log into records
//! 2. Builds the long-form table and checks round lengths
//! 3. Groups the table into one series per round
//! 4. Renders the chart and writes the PNG
//!
//! Every failure aborts the run before the output file is touched.

use crate::config::{PlotConfig, RowCheck};
use crate::stacks::error::{Result, StackPlotError};
use crate::stacks::logger::RunLogger;
use crate::stacks::table::check_row_lengths;
use crate::stacks::{load_records, palettes, render_chart, PlotResult, StackTable};

/// Run the full read → table → plot → save sequence once
pub fn generate_plot(config: &PlotConfig) -> Result<PlotResult> {
    let mut log = RunLogger::new(4);

    log.step(1, format!("Loading {}...", config.input_path.display()));
    let records = load_records(&config.input_path)?;
    log.done(format!("Loaded {} records", records.len()));

    log.step(2, "Building stack table...");
    let table = StackTable::from_records(&records)?;
    drop(records);
    let summary = table.summary()?;
    log.detail(summary.to_string());

    match (config.row_check, check_row_lengths(&table.row_lengths()?)) {
        (RowCheck::Ignore, _) | (_, Ok(())) => {}
        (RowCheck::Warn, Err(e)) => log.warn(format!("{} (legend may be misleading)", e)),
        (RowCheck::Error, Err(e)) => return Err(e),
    }
    log.done(format!("Table ready ({} rows)", table.height()));

    log.step(3, "Grouping by round...");
    let series = table.round_series()?;
    if series.is_empty() {
        log.detail("No rounds - rendering an empty chart");
    }
    log.done(format!("{} round series", series.len()));

    log.step(4, "Rendering chart...");
    let palette = palettes::registry()
        .get_or_default(&config.palette)
        .ok_or_else(|| StackPlotError::Config("no palettes available".to_string()))?;
    log.detail(format!("Palette: {} ({} colors)", palette.name, palette.len()));

    let result = render_chart(&series, config, palette)?;
    log.done(format!(
        "Saved {} ({} bytes, {}×{})",
        result.path.display(),
        result.bytes,
        result.width,
        result.height
    ));
    println!("\nFinished in {:.2}s", log.elapsed_secs());

    Ok(result)
}
