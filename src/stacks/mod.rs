//! Stack log processing
//!
//! Structure:
//! - `loader.rs`: stack log → `StackRecord`s
//! - `table.rs`: records ↔ Polars DataFrame, per-round series, summary
//! - `render.rs`: per-round series → PNG line chart
//! - `palettes.rs`: categorical palettes (palettes.json)
//! - `properties.rs`: property registry and reader (plot.json)
//! - `logger.rs`: progress, phase timing and memory reporting
//! - `error.rs`: error types

pub mod error;
pub mod loader;
pub mod logger;
pub mod palettes;
pub mod properties;
pub mod render;
pub mod table;

pub use error::{Result, StackPlotError};
pub use loader::{load_records, read_records, StackRecord};
pub use render::{render_chart, PlotResult};
pub use table::{RoundSeries, StackTable, TableSummary};
