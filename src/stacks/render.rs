//! Line chart rendering with plotters
//!
//! One line per round: hand on the x axis, stack on the y axis, coloured by
//! the round's position in the palette. The PNG is drawn to a scratch file
//! next to the target and renamed over it once complete, so a failed render
//! never replaces an existing image. Text uses the bundled DejaVu Sans, so
//! rendering does not depend on fonts installed on the host.

use super::error::{Result, StackPlotError};
use super::palettes::PaletteDefinition;
use super::table::RoundSeries;
use crate::config::{LegendPosition, PlotConfig};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::fs;
use std::io;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

const LEGEND_SWATCH_PX: i32 = 20;
const AXIS_MARGIN: f64 = 0.05;
const FONT_FAMILY: &str = "sans-serif";
static DEJAVU_SANS: &[u8] = include_bytes!("../../fonts/DejaVuSans.ttf");

/// Description of a rendered chart
#[derive(Debug, Clone, PartialEq)]
pub struct PlotResult {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    /// Number of lines drawn
    pub rounds: usize,
    /// Number of points across all lines
    pub points: usize,
    /// Size of the written PNG
    pub bytes: u64,
}

/// Render `series` and write the PNG to `config.output_path`
pub fn render_chart(
    series: &[RoundSeries],
    config: &PlotConfig,
    palette: &PaletteDefinition,
) -> Result<PlotResult> {
    let output = &config.output_path;
    let dir = output_dir(output);
    if !dir.is_dir() {
        return Err(StackPlotError::io(
            dir,
            io::Error::new(io::ErrorKind::NotFound, "output directory does not exist"),
        ));
    }

    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "plot".to_string());
    let scratch = dir.join(format!(".{}.{}.png", stem, uuid::Uuid::new_v4()));

    register_fonts()?;
    let (width, height) = config.resolve_dimensions();
    let root = BitMapBackend::new(&scratch, (width, height)).into_drawing_area();
    if let Err(e) = draw(root, series, config, palette) {
        let _ = fs::remove_file(&scratch);
        return Err(e);
    }

    if let Err(e) = fs::rename(&scratch, output) {
        let _ = fs::remove_file(&scratch);
        return Err(StackPlotError::io(output, e));
    }

    let bytes = fs::metadata(output)
        .map_err(|e| StackPlotError::io(output, e))?
        .len();

    Ok(PlotResult {
        path: output.clone(),
        width,
        height,
        rounds: series.len(),
        points: series.iter().map(|s| s.points.len()).sum(),
        bytes,
    })
}

/// Register the bundled font under the family name plotters asks for
fn register_fonts() -> Result<()> {
    static REGISTERED: OnceLock<bool> = OnceLock::new();
    let ok = *REGISTERED.get_or_init(|| {
        plotters::style::register_font(FONT_FAMILY, FontStyle::Normal, DEJAVU_SANS).is_ok()
    });
    if ok {
        Ok(())
    } else {
        Err(StackPlotError::Render(
            "bundled DejaVu Sans font could not be loaded".to_string(),
        ))
    }
}

fn draw<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    series: &[RoundSeries],
    config: &PlotConfig,
    palette: &PaletteDefinition,
) -> Result<()> {
    root.fill(&WHITE).map_err(render_err)?;

    let (x_range, y_range) = axis_ranges(series);
    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, (FONT_FAMILY, 22))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(55)
        .build_cartesian_2d(x_range, y_range)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .x_desc(config.x_axis_label.as_str())
        .y_desc(config.y_axis_label.as_str())
        .draw()
        .map_err(render_err)?;

    let legend = series_label_position(config.legend_position);
    let show_legend = legend.is_some() && !series.is_empty();

    // Heading entry: label only, no swatch
    if show_legend && !config.legend_title.is_empty() {
        chart
            .draw_series(std::iter::empty::<PathElement<(f64, f64)>>())
            .map_err(render_err)?
            .label(config.legend_title.as_str())
            .legend(|(x, y)| PathElement::new(vec![(x, y)], TRANSPARENT));
    }

    let stroke = config.line_width;
    for (idx, round) in series.iter().enumerate() {
        let [r, g, b] = palette.get_color(idx);
        let color = RGBColor(r, g, b);

        chart
            .draw_series(LineSeries::new(
                round.points.iter().map(|&(hand, stack)| (hand as f64, stack as f64)),
                color.stroke_width(stroke),
            ))
            .map_err(render_err)?
            .label(round.round.to_string())
            .legend(move |(x, y)| {
                PathElement::new(
                    vec![(x, y), (x + LEGEND_SWATCH_PX, y)],
                    color.stroke_width(stroke),
                )
            });
    }

    if let (true, Some(position)) = (show_legend, legend) {
        chart
            .configure_series_labels()
            .position(position)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK.mix(0.3))
            .draw()
            .map_err(render_err)?;
    }

    root.present().map_err(render_err)?;
    Ok(())
}

/// Axis ranges covering every point; degenerate spans are widened
fn axis_ranges(series: &[RoundSeries]) -> (Range<f64>, Range<f64>) {
    let mut points = series.iter().flat_map(|s| s.points.iter().copied());
    let Some((h0, s0)) = points.next() else {
        return (0.0..1.0, 0.0..1.0);
    };

    let (mut h_min, mut h_max, mut s_min, mut s_max) = (h0, h0, s0, s0);
    for (hand, stack) in points {
        h_min = h_min.min(hand);
        h_max = h_max.max(hand);
        s_min = s_min.min(stack);
        s_max = s_max.max(stack);
    }

    (
        padded(h_min as f64, h_max as f64, 0.5),
        padded(s_min as f64, s_max as f64, 1.0),
    )
}

/// `lo..hi` widened by a margin on each side, or by `flat` when `lo == hi`
fn padded(lo: f64, hi: f64, flat: f64) -> Range<f64> {
    let pad = if hi > lo { (hi - lo) * AXIS_MARGIN } else { flat };
    (lo - pad)..(hi + pad)
}

fn series_label_position(position: LegendPosition) -> Option<SeriesLabelPosition> {
    match position {
        LegendPosition::UpperLeft => Some(SeriesLabelPosition::UpperLeft),
        LegendPosition::UpperMiddle => Some(SeriesLabelPosition::UpperMiddle),
        LegendPosition::UpperRight => Some(SeriesLabelPosition::UpperRight),
        LegendPosition::MiddleLeft => Some(SeriesLabelPosition::MiddleLeft),
        LegendPosition::MiddleRight => Some(SeriesLabelPosition::MiddleRight),
        LegendPosition::LowerLeft => Some(SeriesLabelPosition::LowerLeft),
        LegendPosition::LowerMiddle => Some(SeriesLabelPosition::LowerMiddle),
        LegendPosition::LowerRight => Some(SeriesLabelPosition::LowerRight),
        LegendPosition::None => None,
    }
}

fn output_dir(output: &Path) -> &Path {
    match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}

fn render_err<E: std::fmt::Display>(e: E) -> StackPlotError {
    StackPlotError::Render(e.to_string())
}
