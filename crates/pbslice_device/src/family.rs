//! FPGA families and their frame geometry.
//!
//! Each family fixes the size of a configuration frame, the byte width of a
//! configuration word, the byte sequence that announces frame data inside the
//! container payload, and the named column types its device tables use.

use crate::column::Column;
use crate::tables;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Geometry of one clock region, used by multi-region pblock extraction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockRegionGeometry {
    /// Device (tile) rows per clock region.
    pub rows_per_clock_region: usize,
    /// Frame words covering one device row.
    pub words_per_row: usize,
    /// Words of the horizontal clock column splitting the region in two.
    pub clock_words: usize,
}

impl ClockRegionGeometry {
    /// Number of words in each half of a frame, on either side of the clock word(s).
    pub fn half_words(&self, frame_word_count: usize) -> usize {
        if self.words_per_row == 0 {
            return 0;
        }
        frame_word_count.saturating_sub(self.clock_words) / self.words_per_row
    }
}

/// Static per-family frame geometry and configuration-data marker.
#[derive(Debug)]
pub struct FamilyParams {
    /// Human-readable family name.
    pub display_name: &'static str,
    /// Words per configuration frame.
    pub frame_word_count: usize,
    /// Bytes per configuration word.
    pub word_byte_size: usize,
    /// Byte sequence preceding the frame-data write command.
    pub start_marker: &'static [u8],
    /// Distance from the marker start to the first frame-data byte.
    pub marker_offset: usize,
    /// Mask applied to the word count stored just before the frame data.
    pub size_field_mask: u32,
    /// Clock-region geometry, when multi-region extraction is supported.
    pub clock_region: Option<ClockRegionGeometry>,
    /// Named column types available to device tables of this family.
    pub columns: &'static [(&'static str, Column)],
}

/// The FPGA families with built-in frame geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Family {
    /// 7-series (Artix-7, Kintex-7, Virtex-7, Zynq-7000).
    Series7,
    /// Virtex-5.
    Virtex5,
    /// Spartan-6.
    Spartan6,
}

impl Family {
    /// All known families.
    pub const ALL: [Family; 3] = [Family::Series7, Family::Virtex5, Family::Spartan6];

    /// Looks up a family by its canonical name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "series7" | "7series" => Some(Family::Series7),
            "virtex5" => Some(Family::Virtex5),
            "spartan6" => Some(Family::Spartan6),
            _ => None,
        }
    }

    /// Canonical family name, also used as the placeholder device identifier.
    pub fn name(self) -> &'static str {
        match self {
            Family::Series7 => "series7",
            Family::Virtex5 => "virtex5",
            Family::Spartan6 => "spartan6",
        }
    }

    /// The family's frame geometry.
    pub fn params(self) -> &'static FamilyParams {
        match self {
            Family::Series7 => &tables::series7::PARAMS,
            Family::Virtex5 => &tables::virtex5::PARAMS,
            Family::Spartan6 => &tables::spartan6::PARAMS,
        }
    }

    /// Looks up a named column type (e.g. `"CLB"`, `"IOB_A"`).
    pub fn column(self, name: &str) -> Option<Column> {
        self.params()
            .columns
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, c)| *c)
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
