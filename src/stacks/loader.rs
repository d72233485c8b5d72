//! Stack log loader
//!
//! A stack log is plain text: one round per line, each line a comma-separated
//! list of signed base-10 integers (the stack after each hand). There is no
//! header row. Loading produces long-form records ordered by round, then hand.

use super::error::{Result, StackPlotError};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// One stack observation: the value of field `hand` on input line `round`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackRecord {
    /// 0-based input line index
    pub round: u32,
    /// 0-based field index within the line
    pub hand: u32,
    /// Parsed stack value
    pub stack: i64,
}

impl StackRecord {
    pub fn new(round: u32, hand: u32, stack: i64) -> Self {
        StackRecord { round, hand, stack }
    }
}

/// Load every record from the log at `path`
///
/// The file is held open only while it is being read. Any I/O or parse
/// failure aborts the load; no partial results are returned.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<StackRecord>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| StackPlotError::io(path, e))?;
    read_records(BufReader::new(file)).map_err(|e| match e {
        StackPlotError::Io { source, .. } => StackPlotError::io(path, source),
        other => other,
    })
}

/// Read records from any buffered reader
pub fn read_records<R: BufRead>(reader: R) -> Result<Vec<StackRecord>> {
    let mut records = Vec::new();

    for (round, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| StackPlotError::io("<reader>", e))?;
        records.extend(parse_line(round as u32, &line)?);
    }

    Ok(records)
}

/// Parse one line of the log into the records of round `round`
///
/// Surrounding whitespace on each token is ignored, so CRLF line endings and
/// `"1, 2, 3"` both parse. A line that is blank after trimming yields no
/// records. An empty field (`"1,,2"`) is a parse error.
pub fn parse_line(round: u32, line: &str) -> Result<Vec<StackRecord>> {
    if line.trim().is_empty() {
        return Ok(Vec::new());
    }

    line.split(',')
        .enumerate()
        .map(|(hand, raw)| {
            let token = raw.trim();
            token
                .parse::<i64>()
                .map(|stack| StackRecord::new(round, hand as u32, stack))
                .map_err(|source| StackPlotError::Parse {
                    line: round as usize + 1,
                    field: hand + 1,
                    token: token.to_string(),
                    source,
                })
        })
        .collect()
}
