//! Stack Plot - main entry point
//!
//! Reads `data/kuhn__vs__counter_exploit.txt` and writes
//! `data/kuhn__vs__counter_exploit.png`. Takes no arguments; paths, title
//! and styling may be overridden through `stack_plot.json` in the working
//! directory.

use anyhow::Context;
use stack_plot::config::{self, PlotConfig};
use stack_plot::pipeline;

#[cfg(feature = "jemalloc")]
use tikv_jemallocator::Jemalloc;

#[cfg(feature = "jemalloc")]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

fn main() {
    println!("Stack Plot v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run() {
        eprintln!("\n✗ Plot generation failed: {:#}", e);
        std::process::exit(1);
    }

    println!("\n=== Plot Complete ===");
}

fn run() -> anyhow::Result<()> {
    let config = PlotConfig::load(config::OVERRIDE_FILE).context("Failed to load configuration")?;

    println!("Configuration:");
    println!("  Input: {}", config.input_path.display());
    println!("  Output: {}", config.output_path.display());
    println!("  Title: {}", config.title);
    println!("  Palette: {}", config.palette);

    pipeline::generate_plot(&config).with_context(|| {
        format!(
            "Failed to plot {} to {}",
            config.input_path.display(),
            config.output_path.display()
        )
    })?;

    Ok(())
}
