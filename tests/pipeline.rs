use stack_plot::config::{PlotConfig, RowCheck};
use stack_plot::pipeline::generate_plot;
use stack_plot::stacks::StackPlotError;
use std::fs;
use std::path::PathBuf;

struct Scratch {
    dir: PathBuf,
}

impl Scratch {
    fn new() -> Self {
        let dir = std::env::temp_dir().join(format!("stack_plot_it_{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        Scratch { dir }
    }

    fn config(&self, input: &str) -> PlotConfig {
        let input_path = self.dir.join("log.txt");
        fs::write(&input_path, input).unwrap();
        PlotConfig {
            input_path,
            output_path: self.dir.join("log.png"),
            ..PlotConfig::default()
        }
    }
}

impl Drop for Scratch {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.dir);
    }
}

#[test]
fn plots_two_rounds() {
    let scratch = Scratch::new();
    let config = scratch.config("10,8,9\n7,12,5\n");

    let result = generate_plot(&config).unwrap();
    assert_eq!(result.rounds, 2);
    assert_eq!(result.points, 6);
    assert_eq!(result.path, config.output_path);
    assert!(result.bytes > 0);
}

#[test]
fn same_input_gives_same_image() {
    let scratch = Scratch::new();
    let config = scratch.config("10,8,9\n7,12,5\n9,9,11\n");

    generate_plot(&config).unwrap();
    let first = fs::read(&config.output_path).unwrap();
    generate_plot(&config).unwrap();
    let second = fs::read(&config.output_path).unwrap();

    assert_eq!(first, second);
}

#[test]
fn empty_input_renders_blank_chart() {
    let scratch = Scratch::new();
    let config = scratch.config("");

    let result = generate_plot(&config).unwrap();
    assert_eq!(result.rounds, 0);
    assert_eq!(result.points, 0);
    assert!(config.output_path.exists());
}

#[test]
fn bad_token_fails_before_writing() {
    let scratch = Scratch::new();
    let config = scratch.config("1,2,3\n4,five,6\n");

    let err = generate_plot(&config).unwrap_err();
    assert!(matches!(err, StackPlotError::Parse { line: 2, field: 2, .. }));
    assert!(!config.output_path.exists());
}

#[test]
fn failed_run_keeps_previous_image() {
    let scratch = Scratch::new();
    let config = scratch.config("1,2\n3,4\n");
    generate_plot(&config).unwrap();
    let before = fs::read(&config.output_path).unwrap();

    fs::write(&config.input_path, "1,2\noops\n").unwrap();
    assert!(generate_plot(&config).is_err());
    assert_eq!(fs::read(&config.output_path).unwrap(), before);
}

#[test]
fn missing_input_is_an_io_error() {
    let scratch = Scratch::new();
    let config = PlotConfig {
        input_path: scratch.dir.join("absent.txt"),
        output_path: scratch.dir.join("absent.png"),
        ..PlotConfig::default()
    };

    assert!(matches!(
        generate_plot(&config),
        Err(StackPlotError::Io { .. })
    ));
}

#[test]
fn jagged_rows_follow_row_check() {
    let scratch = Scratch::new();
    let mut config = scratch.config("1,2,3\n4,5\n");

    config.row_check = RowCheck::Error;
    assert!(matches!(
        generate_plot(&config),
        Err(StackPlotError::JaggedRows {
            round: 1,
            expected: 3,
            found: 2
        })
    ));
    assert!(!config.output_path.exists());

    config.row_check = RowCheck::Warn;
    assert_eq!(generate_plot(&config).unwrap().points, 5);

    config.row_check = RowCheck::Ignore;
    assert_eq!(generate_plot(&config).unwrap().rounds, 2);
}

#[test]
fn unknown_palette_falls_back() {
    let scratch = Scratch::new();
    let mut config = scratch.config("1,2\n");
    config.palette = "no-such-palette".to_string();

    assert!(generate_plot(&config).is_ok());
}
