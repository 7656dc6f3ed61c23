//! Four-axis coordinate requests and their resolution into index ranges.
//!
//! A request names a clock-region row, a column, a word within the frame and
//! a frame within the column window. Each axis is given as an [`AxisSpec`]
//! and resolved against the axis length with slice semantics.

use crate::error::{BitstreamError, BitstreamResult};
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

/// The selection made on one axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AxisSpec {
    /// The whole axis. On the word and frame axes this means "no narrowing".
    #[default]
    All,
    /// A single index; negative values count from the end.
    Index(isize),
    /// A half-open range with optional, possibly negative ends.
    Range {
        /// Inclusive start; `None` means 0.
        start: Option<isize>,
        /// Exclusive stop; `None` means the axis length.
        stop: Option<isize>,
    },
}

impl AxisSpec {
    /// A range with both ends given.
    pub fn range(start: isize, stop: isize) -> Self {
        AxisSpec::Range {
            start: Some(start),
            stop: Some(stop),
        }
    }

    /// Resolves against an axis of `len` entries; `All` yields `None`.
    pub fn resolve(&self, len: usize, axis: &str) -> BitstreamResult<Option<Range<usize>>> {
        let ilen = to_isize(len);
        match *self {
            AxisSpec::All => Ok(None),
            AxisSpec::Index(i) => {
                let n = if i < 0 { i + ilen } else { i };
                if n < 0 || n >= ilen {
                    return Err(BitstreamError::InvalidCoordinateRange(format!(
                        "{axis} index {i} is out of range for length {len}"
                    )));
                }
                let n = n as usize;
                Ok(Some(n..n + 1))
            }
            AxisSpec::Range { start, stop } => {
                let clamp = |v: isize| -> usize {
                    let v = if v < 0 { (v + ilen).max(0) } else { v.min(ilen) };
                    v as usize
                };
                let s = start.map_or(0, clamp);
                let e = stop.map_or(len, clamp);
                if s > e {
                    return Err(BitstreamError::InvalidCoordinateRange(format!(
                        "{axis} range {self} resolves to {s}..{e} for length {len}"
                    )));
                }
                Ok(Some(s..e))
            }
        }
    }

    /// Resolves against an axis of `len` entries; `All` yields `0..len`.
    pub fn resolve_or_full(&self, len: usize, axis: &str) -> BitstreamResult<Range<usize>> {
        Ok(self.resolve(len, axis)?.unwrap_or(0..len))
    }
}

fn to_isize(len: usize) -> isize {
    isize::try_from(len).unwrap_or(isize::MAX)
}

impl fmt::Display for AxisSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxisSpec::All => Ok(()),
            AxisSpec::Index(i) => write!(f, "{i}"),
            AxisSpec::Range { start, stop } => {
                if let Some(s) = start {
                    write!(f, "{s}")?;
                }
                f.write_str(":")?;
                if let Some(e) = stop {
                    write!(f, "{e}")?;
                }
                Ok(())
            }
        }
    }
}

impl FromStr for AxisSpec {
    type Err = BitstreamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let bound = |part: &str| -> BitstreamResult<Option<isize>> {
            let part = part.trim();
            if part.is_empty() {
                return Ok(None);
            }
            part.parse::<isize>().map(Some).map_err(|_| {
                BitstreamError::InvalidCoordinateRange(format!("'{part}' is not an integer"))
            })
        };
        if s.is_empty() {
            return Ok(AxisSpec::All);
        }
        match s.split_once(':') {
            Some((start, stop)) => {
                if stop.contains(':') {
                    return Err(BitstreamError::InvalidCoordinateRange(format!(
                        "stepped range '{s}' is not supported"
                    )));
                }
                Ok(AxisSpec::Range {
                    start: bound(start)?,
                    stop: bound(stop)?,
                })
            }
            None => Ok(AxisSpec::Index(bound(s)?.unwrap_or_default())),
        }
    }
}

/// A coordinate request over (row, column, word, frame).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Coords {
    /// Clock-region row.
    pub row: AxisSpec,
    /// Column within the row.
    pub column: AxisSpec,
    /// Word within each frame.
    pub word: AxisSpec,
    /// Frame within the column window.
    pub frame: AxisSpec,
}

impl Coords {
    /// Selects one row entirely.
    pub fn row(row: isize) -> Self {
        Self {
            row: AxisSpec::Index(row),
            ..Self::default()
        }
    }

    /// Selects one column of one row.
    pub fn column(row: isize, column: isize) -> Self {
        Self {
            row: AxisSpec::Index(row),
            column: AxisSpec::Index(column),
            ..Self::default()
        }
    }

    /// Narrows the word axis.
    pub fn with_words(mut self, word: AxisSpec) -> Self {
        self.word = word;
        self
    }

    /// Narrows the frame axis.
    pub fn with_frames(mut self, frame: AxisSpec) -> Self {
        self.frame = frame;
        self
    }
}

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.row, self.column, self.word, self.frame)
    }
}

/// Parses `row[,column[,word[,frame]]]`, e.g. `7,43:45,0:10` or `1,5,:,26:36`.
impl FromStr for Coords {
    type Err = BitstreamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() > 4 {
            return Err(BitstreamError::InvalidCoordinateRange(format!(
                "'{s}' has {} axes, at most 4 are allowed",
                parts.len()
            )));
        }
        let axis = |i: usize| -> BitstreamResult<AxisSpec> {
            parts.get(i).map_or(Ok(AxisSpec::All), |p| p.parse())
        };
        Ok(Coords {
            row: axis(0)?,
            column: axis(1)?,
            word: axis(2)?,
            frame: axis(3)?,
        })
    }
}
