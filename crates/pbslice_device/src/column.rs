//! Configuration columns and their functional kinds.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of block-RAM content frames stored for every block-RAM column,
/// independent of the column's own configuration frame count.
pub const RAM_FRAMES_PER_BLOCK_RAM_COLUMN: usize = 128;

/// The functional type of a configuration column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// Configurable logic blocks (CLB, CLBL, CLBM).
    Logic,
    /// Block RAM interconnect/configuration; content frames live in the RAM section.
    BlockRam,
    /// DSP slices.
    Dsp,
    /// Clock distribution column.
    Clock,
    /// Configuration block column.
    Config,
    /// I/O blocks.
    Io,
    /// Multi-gigabit transceivers.
    Transceiver,
    /// Hard memory controller blocks.
    MemoryController,
    /// Padding frames closing a row; also padded in the RAM section.
    Pad,
    /// Undocumented trailing frames that are not padded in the RAM section.
    Reserved,
}

impl ColumnKind {
    /// Short vendor-style tag used when printing device tables.
    pub fn tag(self) -> &'static str {
        match self {
            ColumnKind::Logic => "CLB",
            ColumnKind::BlockRam => "BRAM",
            ColumnKind::Dsp => "DSP",
            ColumnKind::Clock => "CLK",
            ColumnKind::Config => "CFG",
            ColumnKind::Io => "IOB",
            ColumnKind::Transceiver => "GT",
            ColumnKind::MemoryController => "MCB",
            ColumnKind::Pad => "PAD",
            ColumnKind::Reserved => "RSVD",
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One column of a clock-region row: a run of frames of a single kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Column {
    /// Number of configuration frames in this column.
    pub frame_count: u32,
    /// Functional kind of the column.
    pub kind: ColumnKind,
}

impl Column {
    /// Creates a column.
    pub const fn new(frame_count: u32, kind: ColumnKind) -> Self {
        Self { frame_count, kind }
    }

    /// Number of frames this column occupies in the block-RAM content section.
    pub fn ram_frame_count(self) -> usize {
        match self.kind {
            ColumnKind::BlockRam => RAM_FRAMES_PER_BLOCK_RAM_COLUMN,
            ColumnKind::Pad => self.frame_count as usize,
            _ => 0,
        }
    }
}
