//! Inspect a stack log without rendering
//!
//! Prints the long-form table, its summary, per-round hand counts and the
//! palette color each round would get. Uses the same configuration as the
//! main binary (`stack_plot.json` overrides, if present).
//!
//! Usage:
//! ```bash
//! cargo run --bin inspect
//! ```

use stack_plot::config::{self, PlotConfig};
use stack_plot::stacks::table::check_row_lengths;
use stack_plot::stacks::{load_records, palettes, StackTable};
use std::time::Instant;

fn log_phase(start: Instant, phase: &str) {
    eprintln!("[PHASE @{:.3}s] {}", start.elapsed().as_secs_f64(), phase);
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let start = Instant::now();
    println!("=== Stack Log Inspection ===\n");

    let config = PlotConfig::load(config::OVERRIDE_FILE)?;
    println!("Input: {}\n", config.input_path.display());

    log_phase(start, "PHASE 1: Loading records");
    let records = load_records(&config.input_path)?;
    let table = StackTable::from_records(&records)?;
    println!("{}", table.inner());
    println!("\n{}", table.summary()?);

    log_phase(start, "PHASE 2: Checking rounds");
    let lengths = table.row_lengths()?;
    let palette = palettes::registry().get_or_default(&config.palette);

    println!("\n=== Rounds ({}) ===", lengths.len());
    for (idx, (round, hands)) in lengths.iter().enumerate() {
        let color = palette
            .map(|p| {
                let [r, g, b] = p.get_color(idx);
                format!("#{:02X}{:02X}{:02X}", r, g, b)
            })
            .unwrap_or_default();
        println!("  Round {:>4}: {:>5} hands  {}", round, hands, color);
    }

    match check_row_lengths(&lengths) {
        Ok(()) => println!("\n✓ All rounds have the same number of hands"),
        Err(e) => println!("\n⚠ {}", e),
    }

    log_phase(start, "COMPLETE");
    Ok(())
}
