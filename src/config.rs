//! Plot configuration
//!
//! All default values come from plot.json (embedded at compile time); see
//! `stacks::properties`. A run may override any property through an optional
//! flat JSON file, `stack_plot.json`, in the working directory. Without that
//! file the configuration reproduces the fixed paths, title and palette.

use crate::stacks::error::{Result, StackPlotError};
use crate::stacks::properties::{PlotDimension, PlotPropertyReader};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Name of the optional override file
pub const OVERRIDE_FILE: &str = "stack_plot.json";

/// Pixel size used when width/height are "auto" (6.4 × 4.8 in at 100 dpi)
pub const AUTO_WIDTH: u32 = 640;
pub const AUTO_HEIGHT: u32 = 480;

/// What to do when rounds have different hand counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowCheck {
    /// Plot without comment
    Ignore,
    /// Plot, warning on stderr
    #[default]
    Warn,
    /// Fail before anything is written
    Error,
}

impl RowCheck {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "ignore" => Self::Ignore,
            "error" => Self::Error,
            _ => Self::Warn,
        }
    }
}

/// Where the round legend is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LegendPosition {
    UpperLeft,
    UpperMiddle,
    #[default]
    UpperRight,
    MiddleLeft,
    MiddleRight,
    LowerLeft,
    LowerMiddle,
    LowerRight,
    None,
}

impl LegendPosition {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "upper-left" => Self::UpperLeft,
            "upper-middle" => Self::UpperMiddle,
            "middle-left" => Self::MiddleLeft,
            "middle-right" => Self::MiddleRight,
            "lower-left" => Self::LowerLeft,
            "lower-middle" => Self::LowerMiddle,
            "lower-right" => Self::LowerRight,
            "none" => Self::None,
            _ => Self::UpperRight,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PlotConfig {
    /// Stack log to read
    pub input_path: PathBuf,

    /// PNG to write (overwritten)
    pub output_path: PathBuf,

    pub title: String,

    pub plot_width: PlotDimension,
    pub plot_height: PlotDimension,

    /// Categorical palette name (see palettes.json)
    pub palette: String,

    pub x_axis_label: String,
    pub y_axis_label: String,

    /// Heading of the legend, shown above the round entries
    pub legend_title: String,
    pub legend_position: LegendPosition,

    /// Line stroke width in pixels
    pub line_width: u32,

    pub row_check: RowCheck,
}

impl PlotConfig {
    /// Create config from properties; unset values take plot.json defaults
    pub fn from_properties(props: &PlotPropertyReader) -> Self {
        let plot_width = PlotDimension::parse(&props.get_string("plot.width"), PlotDimension::Auto);
        let plot_height =
            PlotDimension::parse(&props.get_string("plot.height"), PlotDimension::Auto);

        let line_width = props.get_f64_in_range("line.width", 1.0, 20.0).round() as u32;

        Self {
            input_path: PathBuf::from(props.get_string("input.path")),
            output_path: PathBuf::from(props.get_string("output.path")),
            title: props.get_string("plot.title"),
            plot_width,
            plot_height,
            palette: props.get_string("palette"),
            x_axis_label: props.get_string("axis.x.label"),
            y_axis_label: props.get_string("axis.y.label"),
            legend_title: props.get_string("legend.title"),
            legend_position: LegendPosition::parse(&props.get_enum("legend.position")),
            line_width,
            row_check: RowCheck::parse(&props.get_enum("rows.check")),
        }
    }

    /// Load configuration, applying overrides from `path` if it exists
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let props = match fs::read_to_string(path) {
            Ok(json) => {
                let props = PlotPropertyReader::from_json(&json).map_err(|e| {
                    StackPlotError::Config(format!("{}: {}", path.display(), e))
                })?;
                println!(
                    "  Loaded {} override(s) from {}",
                    props.len(),
                    path.display()
                );
                props
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                println!("  No {} found, using defaults", path.display());
                PlotPropertyReader::default()
            }
            Err(e) => return Err(StackPlotError::io(path, e)),
        };

        Ok(Self::from_properties(&props))
    }

    /// Resolve image size in pixels
    pub fn resolve_dimensions(&self) -> (u32, u32) {
        (
            self.plot_width.resolve(AUTO_WIDTH),
            self.plot_height.resolve(AUTO_HEIGHT),
        )
    }
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self::from_properties(&PlotPropertyReader::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_reproduce_fixed_behaviour() {
        let config = PlotConfig::default();
        assert_eq!(
            config.input_path,
            PathBuf::from("data/kuhn__vs__counter_exploit.txt")
        );
        assert_eq!(
            config.output_path,
            PathBuf::from("data/kuhn__vs__counter_exploit.png")
        );
        assert_eq!(config.title, "Kuhn vs Counter Exploit");
        assert_eq!(config.palette, "colorblind");
        assert_eq!(config.x_axis_label, "hand");
        assert_eq!(config.y_axis_label, "stack");
        assert_eq!(config.legend_title, "round");
        assert_eq!(config.legend_position, LegendPosition::UpperRight);
        assert_eq!(config.line_width, 2);
        assert_eq!(config.row_check, RowCheck::Warn);
        assert_eq!(config.resolve_dimensions(), (AUTO_WIDTH, AUTO_HEIGHT));
    }

    #[test]
    fn test_overrides() {
        let props = PlotPropertyReader::new(vec![
            ("plot.width".to_string(), "1000".to_string()),
            ("legend.position".to_string(), "lower-left".to_string()),
            ("rows.check".to_string(), "error".to_string()),
            ("line.width".to_string(), "3.6".to_string()),
        ]);
        let config = PlotConfig::from_properties(&props);
        assert_eq!(config.resolve_dimensions(), (1000, AUTO_HEIGHT));
        assert_eq!(config.legend_position, LegendPosition::LowerLeft);
        assert_eq!(config.row_check, RowCheck::Error);
        assert_eq!(config.line_width, 4);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = PlotConfig::load("no/such/stack_plot.json").unwrap();
        assert_eq!(config.title, "Kuhn vs Counter Exploit");
    }

    #[test]
    fn test_load_malformed_file() {
        let dir = std::env::temp_dir().join(format!("stack_plot_cfg_{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(OVERRIDE_FILE);
        fs::write(&path, "{not json").unwrap();

        let err = PlotConfig::load(&path).unwrap_err();
        assert!(matches!(err, StackPlotError::Config(_)));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_enum_parsing() {
        assert_eq!(RowCheck::parse("IGNORE"), RowCheck::Ignore);
        assert_eq!(RowCheck::parse("whatever"), RowCheck::Warn);
        assert_eq!(LegendPosition::parse("none"), LegendPosition::None);
        assert_eq!(LegendPosition::parse("middle-right"), LegendPosition::MiddleRight);
    }
}
