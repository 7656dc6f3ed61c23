//! Placement-block (pblock) extraction across clock regions.
//!
//! A pblock `XaYb:XcYd` is a rectangle of device columns `a..=c` and device
//! (tile) rows `b..=d`. Device rows are grouped into clock regions; inside a
//! region every frame holds `words_per_row` words per device row, with the
//! clock word(s) splitting the lower half from the upper half. Extraction
//! therefore cuts each frame of each column down to the words covering the
//! requested device rows, region by region.

use crate::error::{BitstreamError, BitstreamResult, Unavailable};
use crate::Bitstream;
use pbslice_device::{ClockRegionGeometry, ColumnKind, Section};
use regex::Regex;
use std::fmt;
use std::ops::Range;
use std::str::FromStr;
use std::sync::LazyLock;

static PBLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^X([0-9]+)Y([0-9]+):X([0-9]+)Y([0-9]+)$").unwrap());

/// A rectangle in device X (column) / Y (device row) coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pblock {
    /// First column.
    pub x0: usize,
    /// First device row.
    pub y0: usize,
    /// Last column, inclusive.
    pub x1: usize,
    /// Last device row, inclusive.
    pub y1: usize,
}

impl Pblock {
    /// Creates a pblock from its corners.
    pub fn new(x0: usize, y0: usize, x1: usize, y1: usize) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Splits the pblock into one slice per clock-region row it touches.
    ///
    /// `region_count` is the number of clock-region rows in the device
    /// table; a pblock reaching past the last one is rejected before any
    /// slice is planned.
    pub fn plan(
        &self,
        geometry: &ClockRegionGeometry,
        frame_word_count: usize,
        region_count: usize,
    ) -> BitstreamResult<Vec<RegionSlice>> {
        let invalid =
            |what: String| BitstreamError::InvalidCoordinateRange(format!("pblock {self} {what}"));
        if self.x0 > self.x1 || self.y0 > self.y1 {
            return Err(invalid("has reversed corners".into()));
        }
        let rows = geometry.rows_per_clock_region;
        let half = geometry.half_words(frame_word_count);
        let first = self.y0 / rows;
        let last = self.y1 / rows;
        if last >= region_count {
            return Err(invalid(format!(
                "reaches clock region {last}, the device has {region_count}"
            )));
        }
        let column_end = self
            .x1
            .checked_add(1)
            .ok_or_else(|| invalid("has an out-of-range column".into()))?;

        let mut slices = Vec::with_capacity(last - first + 1);
        for region in first..=last {
            let bottom = region * rows;
            let first_unused = if region == first {
                (self.y0 - bottom) * geometry.words_per_row
            } else {
                0
            };
            let last_unused = if region == last {
                (bottom + rows - 1 - self.y1) * geometry.words_per_row
            } else {
                0
            };
            let span = ClockRegionSpan::classify(first_unused, last_unused, half).ok_or_else(|| {
                invalid(format!("selects no valid half of clock region {region}"))
            })?;
            slices.push(RegionSlice {
                clock_region_row: region,
                columns: self.x0..column_end,
                first_unused,
                last_unused,
                span,
            });
        }
        Ok(slices)
    }
}

impl fmt::Display for Pblock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "X{}Y{}:X{}Y{}", self.x0, self.y0, self.x1, self.y1)
    }
}

impl FromStr for Pblock {
    type Err = BitstreamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || {
            BitstreamError::InvalidCoordinateRange(format!(
                "'{s}' is not a pblock of the form XaYb:XcYd"
            ))
        };
        let caps = PBLOCK_RE.captures(s).ok_or_else(invalid)?;
        let n = |i: usize| -> BitstreamResult<usize> { caps[i].parse().map_err(|_| invalid()) };
        Ok(Pblock::new(n(1)?, n(2)?, n(3)?, n(4)?))
    }
}

/// Parses a whitespace-separated list of pblocks.
pub fn parse_pblock_list(s: &str) -> BitstreamResult<Vec<Pblock>> {
    let pblocks = s
        .split_whitespace()
        .map(str::parse)
        .collect::<BitstreamResult<Vec<Pblock>>>()?;
    if pblocks.is_empty() {
        return Err(BitstreamError::InvalidCoordinateRange(
            "empty pblock list".to_string(),
        ));
    }
    Ok(pblocks)
}

/// Which part of a clock region's frames a slice covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClockRegionSpan {
    /// Rows on both sides of the clock word; each frame yields two word ranges.
    Both,
    /// Rows above the clock word only.
    Upper,
    /// Rows below the clock word only.
    Lower,
}

impl ClockRegionSpan {
    /// Chooses the span from the unused word counts at both ends of the frame.
    pub fn classify(first_unused: usize, last_unused: usize, half: usize) -> Option<Self> {
        match (first_unused < half, last_unused < half) {
            (true, true) => Some(ClockRegionSpan::Both),
            (false, true) => Some(ClockRegionSpan::Upper),
            (true, false) => Some(ClockRegionSpan::Lower),
            (false, false) => None,
        }
    }
}

/// The part of a pblock inside one clock-region row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegionSlice {
    /// Clock-region row (the device table row).
    pub clock_region_row: usize,
    /// Columns covered.
    pub columns: Range<usize>,
    /// Words skipped at the start of each frame.
    pub first_unused: usize,
    /// Words skipped at the end of each frame.
    pub last_unused: usize,
    /// Which halves are covered.
    pub span: ClockRegionSpan,
}

impl RegionSlice {
    /// Word ranges copied out of every frame, in output order.
    pub fn word_ranges(
        &self,
        geometry: &ClockRegionGeometry,
        frame_word_count: usize,
    ) -> Vec<Range<usize>> {
        let half = geometry.half_words(frame_word_count);
        let clock = geometry.clock_words;
        let top = frame_word_count - self.last_unused;
        match self.span {
            ClockRegionSpan::Both => vec![self.first_unused..half, half + clock..top],
            ClockRegionSpan::Upper => vec![self.first_unused + clock..top],
            ClockRegionSpan::Lower => vec![self.first_unused..top - clock],
        }
    }
}

impl Bitstream {
    /// Extracts the frames covering each pblock, in list order.
    ///
    /// Within a clock region, a slice covering both halves is emitted column
    /// by column and frame by frame (lower words, then upper words), followed
    /// by the 128 content frames of every block-RAM column treated the same
    /// way. A single-half slice is emitted as one pass over the column range,
    /// followed by the block-RAM section of the same range.
    pub fn extract_multi_region(&self, pblocks: &[Pblock]) -> BitstreamResult<Vec<u8>> {
        let (base, index) = self.addressable()?;
        let geometry = self
            .device
            .clock_region()
            .ok_or_else(|| Unavailable::NoClockRegionGeometry(self.device.id().to_string()))?;
        let frame_words = self.device.frame_word_count();
        let frame_bytes = self.device.frame_bytes();
        let word_bytes = self.device.word_byte_size();

        let mut out = Vec::new();
        for pblock in pblocks {
            for slice in pblock.plan(&geometry, frame_words, index.row_count())? {
                let r = slice.clock_region_row;
                let row = self.device.rows().get(r).ok_or_else(|| {
                    BitstreamError::InvalidCoordinateRange(format!(
                        "pblock {pblock} reaches clock region {r}, the device has {}",
                        index.row_count()
                    ))
                })?;
                if slice.columns.end > row.len() {
                    return Err(BitstreamError::InvalidCoordinateRange(format!(
                        "pblock {pblock} reaches column {}, clock region {r} has {}",
                        slice.columns.end - 1,
                        row.len()
                    )));
                }
                let ranges = slice.word_ranges(&geometry, frame_words);
                let mut copy_frames = |section: Section, cols: Range<usize>| -> BitstreamResult<()> {
                    let breakpoints = &index.section(section)[r];
                    let (start, end) = (breakpoints[cols.start], breakpoints[cols.end]);
                    for frame in (start..end).step_by(frame_bytes) {
                        for words in &ranges {
                            let from = base + frame + words.start * word_bytes;
                            let to = base + frame + words.end * word_bytes;
                            out.extend_from_slice(self.window(from..to)?);
                        }
                    }
                    Ok(())
                };

                match slice.span {
                    ClockRegionSpan::Both => {
                        for j in slice.columns.clone() {
                            copy_frames(Section::Config, j..j + 1)?;
                        }
                        for j in slice.columns.clone() {
                            if row.columns()[j].kind == ColumnKind::BlockRam {
                                copy_frames(Section::BlockRam, j..j + 1)?;
                            }
                        }
                    }
                    ClockRegionSpan::Upper | ClockRegionSpan::Lower => {
                        copy_frames(Section::Config, slice.columns.clone())?;
                        copy_frames(Section::BlockRam, slice.columns.clone())?;
                    }
                }
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SERIES7: ClockRegionGeometry = ClockRegionGeometry {
        rows_per_clock_region: 50,
        words_per_row: 2,
        clock_words: 1,
    };

    #[test]
    fn parse_pblock() {
        let p: Pblock = "X3Y5:X8Y12".parse().unwrap();
        assert_eq!(p, Pblock::new(3, 5, 8, 12));
        assert_eq!(p.to_string(), "X3Y5:X8Y12");
    }

    #[test]
    fn parse_rejects_malformed() {
        for text in ["X3Y5-X8Y12", "x3y5:x8y12", "X3Y5:X8Y12 ", "prefixX3Y5:X8Y12", "X3Y5:X8", ""] {
            assert!(
                matches!(
                    text.parse::<Pblock>(),
                    Err(BitstreamError::InvalidCoordinateRange(_))
                ),
                "{text:?}"
            );
        }
    }

    #[test]
    fn parse_list() {
        let list = parse_pblock_list("X0Y0:X1Y10\n  X4Y50:X9Y60").unwrap();
        assert_eq!(list, vec![Pblock::new(0, 0, 1, 10), Pblock::new(4, 50, 9, 60)]);
        assert!(parse_pblock_list("   ").is_err());
        assert!(parse_pblock_list("X0Y0:X1Y10 X4Y50").is_err());
    }

    #[test]
    fn classify_cases() {
        assert_eq!(ClockRegionSpan::classify(10, 18, 50), Some(ClockRegionSpan::Both));
        assert_eq!(ClockRegionSpan::classify(52, 0, 50), Some(ClockRegionSpan::Upper));
        assert_eq!(ClockRegionSpan::classify(10, 74, 50), Some(ClockRegionSpan::Lower));
        assert_eq!(ClockRegionSpan::classify(50, 50, 50), None);
    }

    #[test]
    fn plan_lower_half() {
        let slices = Pblock::new(3, 5, 8, 12).plan(&SERIES7, 101, 3).unwrap();
        assert_eq!(slices.len(), 1);
        let s = &slices[0];
        assert_eq!((s.first_unused, s.last_unused), (10, 74));
        assert_eq!(s.span, ClockRegionSpan::Lower);
        assert_eq!(s.columns, 3..9);
        assert_eq!(s.word_ranges(&SERIES7, 101), vec![10..26]);
    }

    #[test]
    fn plan_upper_half() {
        let slices = Pblock::new(0, 26, 0, 49).plan(&SERIES7, 101, 3).unwrap();
        let s = &slices[0];
        assert_eq!((s.first_unused, s.last_unused), (52, 0));
        assert_eq!(s.span, ClockRegionSpan::Upper);
        assert_eq!(s.word_ranges(&SERIES7, 101), vec![53..101]);
    }

    #[test]
    fn plan_crossing_clock_word() {
        let slices = Pblock::new(0, 5, 0, 40).plan(&SERIES7, 101, 3).unwrap();
        let s = &slices[0];
        assert_eq!(s.span, ClockRegionSpan::Both);
        assert_eq!(s.word_ranges(&SERIES7, 101), vec![10..50, 51..83]);
    }

    #[test]
    fn plan_multiple_regions() {
        let slices = Pblock::new(2, 30, 4, 120).plan(&SERIES7, 101, 3).unwrap();
        let rows: Vec<usize> = slices.iter().map(|s| s.clock_region_row).collect();
        assert_eq!(rows, vec![0, 1, 2]);
        assert_eq!(slices[0].span, ClockRegionSpan::Upper);
        assert_eq!(slices[0].word_ranges(&SERIES7, 101), vec![61..101]);
        assert_eq!(slices[1].span, ClockRegionSpan::Both);
        assert_eq!(slices[1].word_ranges(&SERIES7, 101), vec![0..50, 51..101]);
        // region 2 covers rows 100..=120: last_unused = (149 - 120) * 2
        assert_eq!(slices[2].last_unused, 58);
        assert_eq!(slices[2].span, ClockRegionSpan::Lower);
        assert_eq!(slices[2].word_ranges(&SERIES7, 101), vec![0..42]);
    }

    #[test]
    fn plan_rejects_reversed() {
        assert!(Pblock::new(5, 0, 3, 10).plan(&SERIES7, 101, 3).is_err());
        assert!(Pblock::new(0, 10, 3, 5).plan(&SERIES7, 101, 3).is_err());
    }

    #[test]
    fn plan_rejects_regions_past_table() {
        let err = Pblock::new(0, 0, 0, 150).plan(&SERIES7, 101, 3).unwrap_err();
        assert!(err.to_string().contains("clock region 3"));
        assert!(Pblock::new(0, 0, 0, 149).plan(&SERIES7, 101, 3).is_ok());
    }

    #[test]
    fn plan_rejects_huge_coordinates() {
        for text in [
            "X0Y0:X0Y18446744073709551615",
            "X18446744073709551615Y0:X18446744073709551615Y10",
            "X0Y2000000000:X0Y2000000010",
        ] {
            let pblock: Pblock = text.parse().unwrap();
            assert!(
                matches!(
                    pblock.plan(&SERIES7, 101, 7),
                    Err(BitstreamError::InvalidCoordinateRange(_))
                ),
                "{text}"
            );
        }
    }
}
