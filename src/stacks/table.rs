//! Long-form stack table backed by a Polars DataFrame
//!
//! Columns: `round`, `hand`, `stack`, all Int64, one row per record in load
//! order. The table is the hand-off point between the loader and the
//! renderer.

use super::error::{Result, StackPlotError};
use super::loader::StackRecord;
use polars::prelude::*;
use std::collections::BTreeMap;

pub const ROUND: &str = "round";
pub const HAND: &str = "hand";
pub const STACK: &str = "stack";

/// All points of one round, ordered by hand
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundSeries {
    pub round: u32,
    /// (hand, stack) pairs
    pub points: Vec<(u32, i64)>,
}

/// Record table in long form
#[derive(Debug, Clone)]
pub struct StackTable {
    df: DataFrame,
}

impl StackTable {
    /// Build the table from loaded records, preserving their order
    pub fn from_records(records: &[StackRecord]) -> Result<Self> {
        let rounds: Vec<i64> = records.iter().map(|r| r.round as i64).collect();
        let hands: Vec<i64> = records.iter().map(|r| r.hand as i64).collect();
        let stacks: Vec<i64> = records.iter().map(|r| r.stack).collect();

        let df = DataFrame::new(vec![
            Series::new(ROUND.into(), rounds).into_column(),
            Series::new(HAND.into(), hands).into_column(),
            Series::new(STACK.into(), stacks).into_column(),
        ])?;

        Ok(StackTable { df })
    }

    /// Underlying DataFrame
    pub fn inner(&self) -> &DataFrame {
        &self.df
    }

    pub fn height(&self) -> usize {
        self.df.height()
    }

    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    /// Convert back to records in table order
    pub fn to_records(&self) -> Result<Vec<StackRecord>> {
        let (rounds, hands, stacks) = self.columns()?;

        rounds
            .iter()
            .zip(hands.iter())
            .zip(stacks.iter())
            .map(|((round, hand), stack)| match (round, hand, stack) {
                (Some(round), Some(hand), Some(stack)) => {
                    Ok(StackRecord::new(round as u32, hand as u32, stack))
                }
                _ => Err(null_error()),
            })
            .collect()
    }

    /// Group rows by round, ordered by round then hand
    pub fn round_series(&self) -> Result<Vec<RoundSeries>> {
        let sorted = self
            .df
            .clone()
            .lazy()
            .sort([ROUND, HAND], SortMultipleOptions::default())
            .collect()?;
        let sorted = StackTable { df: sorted };
        let (rounds, hands, stacks) = sorted.columns()?;

        let mut series: Vec<RoundSeries> = Vec::new();
        for ((round, hand), stack) in rounds.iter().zip(hands.iter()).zip(stacks.iter()) {
            let (round, hand, stack) = match (round, hand, stack) {
                (Some(r), Some(h), Some(s)) => (r as u32, h as u32, s),
                _ => return Err(null_error()),
            };

            match series.last_mut() {
                Some(last) if last.round == round => last.points.push((hand, stack)),
                _ => series.push(RoundSeries {
                    round,
                    points: vec![(hand, stack)],
                }),
            }
        }

        Ok(series)
    }

    /// Number of hands recorded for each round
    pub fn row_lengths(&self) -> Result<BTreeMap<u32, usize>> {
        let mut lengths = BTreeMap::new();
        for round in self.df.column(ROUND)?.i64()?.iter().flatten() {
            *lengths.entry(round as u32).or_insert(0) += 1;
        }
        Ok(lengths)
    }

    /// Row count, round count and value ranges
    pub fn summary(&self) -> Result<TableSummary> {
        let (rounds, hands, stacks) = self.columns()?;
        let n_rounds = self.row_lengths()?.len();

        let hand_range = hands
            .min()
            .zip(hands.max())
            .map(|(lo, hi)| (lo as u32, hi as u32));
        let stack_range = stacks.min().zip(stacks.max());

        Ok(TableSummary {
            rows: rounds.len(),
            rounds: n_rounds,
            hand_range,
            stack_range,
        })
    }

    fn columns(&self) -> Result<(&Int64Chunked, &Int64Chunked, &Int64Chunked)> {
        Ok((
            self.df.column(ROUND)?.i64()?,
            self.df.column(HAND)?.i64()?,
            self.df.column(STACK)?.i64()?,
        ))
    }
}

/// Verify every round has the same number of hands as the first one
pub fn check_row_lengths(lengths: &BTreeMap<u32, usize>) -> Result<()> {
    let mut iter = lengths.iter();
    let Some((_, &expected)) = iter.next() else {
        return Ok(());
    };

    for (&round, &found) in iter {
        if found != expected {
            return Err(StackPlotError::JaggedRows {
                round,
                expected,
                found,
            });
        }
    }
    Ok(())
}

fn null_error() -> StackPlotError {
    StackPlotError::Table(PolarsError::NoData("null value in stack table".into()))
}

/// Summary statistics for a stack table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSummary {
    pub rows: usize,
    pub rounds: usize,
    pub hand_range: Option<(u32, u32)>,
    pub stack_range: Option<(i64, i64)>,
}

impl std::fmt::Display for TableSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TableSummary {{ rows: {}, rounds: {}", self.rows, self.rounds)?;
        if let Some((lo, hi)) = self.hand_range {
            write!(f, ", hand: [{}, {}]", lo, hi)?;
        }
        if let Some((lo, hi)) = self.stack_range {
            write!(f, ", stack: [{}, {}]", lo, hi)?;
        }
        write!(f, " }}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stacks::loader::read_records;

    fn table(input: &str) -> StackTable {
        StackTable::from_records(&read_records(input.as_bytes()).unwrap()).unwrap()
    }

    #[test]
    fn test_records_survive_the_table() {
        let records = read_records("10,8,9\n7,12,5\n-3,0,+4\n".as_bytes()).unwrap();
        let table = StackTable::from_records(&records).unwrap();

        assert_eq!(table.height(), records.len());
        assert_eq!(table.to_records().unwrap(), records);
    }

    #[test]
    fn test_column_types() {
        let table = table("1,2\n");
        let df = table.inner();
        assert_eq!(df.width(), 3);
        for name in [ROUND, HAND, STACK] {
            assert_eq!(df.column(name).unwrap().dtype(), &DataType::Int64);
        }
    }

    #[test]
    fn test_round_series() {
        let series = table("10,8,9\n7,12,5\n").round_series().unwrap();
        assert_eq!(
            series,
            vec![
                RoundSeries {
                    round: 0,
                    points: vec![(0, 10), (1, 8), (2, 9)],
                },
                RoundSeries {
                    round: 1,
                    points: vec![(0, 7), (1, 12), (2, 5)],
                },
            ]
        );
    }

    #[test]
    fn test_round_series_sorts_unordered_rows() {
        let records = vec![
            StackRecord::new(1, 1, 4),
            StackRecord::new(0, 1, 2),
            StackRecord::new(1, 0, 3),
            StackRecord::new(0, 0, 1),
        ];
        let series = StackTable::from_records(&records)
            .unwrap()
            .round_series()
            .unwrap();
        assert_eq!(series[0].points, vec![(0, 1), (1, 2)]);
        assert_eq!(series[1].points, vec![(0, 3), (1, 4)]);
    }

    #[test]
    fn test_empty_table() {
        let table = table("");
        assert!(table.is_empty());
        assert!(table.round_series().unwrap().is_empty());
        assert!(table.to_records().unwrap().is_empty());

        let summary = table.summary().unwrap();
        assert_eq!(summary.rows, 0);
        assert_eq!(summary.rounds, 0);
        assert_eq!(summary.hand_range, None);
        assert_eq!(summary.stack_range, None);
    }

    #[test]
    fn test_summary() {
        let summary = table("10,8,9\n7,12,5\n").summary().unwrap();
        assert_eq!(summary.rows, 6);
        assert_eq!(summary.rounds, 2);
        assert_eq!(summary.hand_range, Some((0, 2)));
        assert_eq!(summary.stack_range, Some((5, 12)));
        assert_eq!(
            summary.to_string(),
            "TableSummary { rows: 6, rounds: 2, hand: [0, 2], stack: [5, 12] }"
        );
    }

    #[test]
    fn test_row_lengths_and_check() {
        let even = table("1,2,3\n4,5,6\n").row_lengths().unwrap();
        assert!(check_row_lengths(&even).is_ok());

        let jagged = table("1,2,3\n4,5\n").row_lengths().unwrap();
        assert_eq!(jagged.get(&1), Some(&2));
        match check_row_lengths(&jagged) {
            Err(StackPlotError::JaggedRows {
                round,
                expected,
                found,
            }) => {
                assert_eq!((round, expected, found), (1, 3, 2));
            }
            other => panic!("expected JaggedRows, got {:?}", other),
        }
    }
}
