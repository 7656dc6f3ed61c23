//! Built-in device layout tables.
//!
//! Tables are written as compact run-length descriptions: a row is a list of
//! [`ColumnGroup`]s (a column pattern repeated `repeat` times) and a table is
//! a list of [`RowRun`]s (a row repeated over several clock-region rows).

pub mod series7;
pub mod spartan6;
pub mod virtex5;

use crate::column::Column;
use crate::family::Family;
use crate::model::Row;

/// A column pattern repeated a number of times within a row.
#[derive(Clone, Copy, Debug)]
pub struct ColumnGroup {
    /// Number of repetitions of the pattern.
    pub repeat: usize,
    /// The pattern, in left-to-right order.
    pub columns: &'static [Column],
}

/// Repeats a column pattern `repeat` times.
pub const fn times(repeat: usize, columns: &'static [Column]) -> ColumnGroup {
    ColumnGroup { repeat, columns }
}

/// A column pattern appearing once.
pub const fn once(columns: &'static [Column]) -> ColumnGroup {
    ColumnGroup { repeat: 1, columns }
}

/// A row layout shared by `repeat` consecutive clock-region rows.
#[derive(Clone, Copy, Debug)]
pub struct RowRun {
    /// Number of consecutive rows with this layout.
    pub repeat: usize,
    /// Column groups of the row.
    pub groups: &'static [ColumnGroup],
}

/// A static device layout table.
#[derive(Debug)]
pub struct DeviceTable {
    /// Normalized device identifier (e.g. `"7z020clg400"`).
    pub id: &'static str,
    /// Human-readable name.
    pub name: &'static str,
    /// Family providing frame geometry.
    pub family: Family,
    /// Row layouts, bottom clock-region row first.
    pub rows: &'static [RowRun],
    /// Order in which rows are serialized in the bitstream.
    pub bitstream_row_order: &'static [usize],
}

impl DeviceTable {
    /// Expands the run-length description into one [`Row`] per clock-region row.
    pub fn expand_rows(&self) -> Vec<Row> {
        let mut rows = Vec::new();
        for run in self.rows {
            let columns: Vec<Column> = run
                .groups
                .iter()
                .flat_map(|g| (0..g.repeat).flat_map(move |_| g.columns.iter().copied()))
                .collect();
            for _ in 0..run.repeat {
                rows.push(Row::new(columns.clone()));
            }
        }
        rows
    }
}

/// Every built-in device table.
pub const BUILTIN_TABLES: &[&DeviceTable] = &[
    &series7::XC7Z020_CLG400,
    &series7::XC7Z100_FFG900,
    &series7::XC7K325T_FFG900,
    &virtex5::XC5VLX110T_FF1136,
    &virtex5::XC5VFX130T_FF1738,
    &spartan6::XC6SLX150_FGG484,
];
