//! Spartan-6 frame geometry and device tables.

use super::{once, times, DeviceTable, RowRun};
use crate::column::{Column, ColumnKind};
use crate::family::FamilyParams;

/// Configuration column.
pub const CFG: Column = Column::new(4, ColumnKind::Config);
/// I/O column.
pub const IOB: Column = Column::new(30, ColumnKind::Io);
/// CLB column with SLICEL/SLICEX slices.
pub const CLBL: Column = Column::new(30, ColumnKind::Logic);
/// CLB column with SLICEM slices.
pub const CLBM: Column = Column::new(31, ColumnKind::Logic);
/// Block RAM column.
pub const BRAM: Column = Column::new(25, ColumnKind::BlockRam);
/// DSP column.
pub const DSP: Column = Column::new(24, ColumnKind::Dsp);
/// Wide DSP column.
pub const DSP1: Column = Column::new(31, ColumnKind::Dsp);
/// Memory controller column.
pub const MCB: Column = Column::new(30, ColumnKind::MemoryController);
/// CLBL column sharing its frames with a DCM.
pub const CLBLD: Column = Column::new(31, ColumnKind::Logic);
/// Row padding.
pub const PAD: Column = Column::new(2, ColumnKind::Pad);

const CLBLM: &[Column] = &[CLBL, CLBM];

/// Spartan-6 family parameters.
pub const PARAMS: FamilyParams = FamilyParams {
    display_name: "Spartan-6",
    frame_word_count: 65,
    word_byte_size: 2,
    start_marker: &[0x50, 0x60, 0x00],
    marker_offset: 6,
    size_field_mask: 0x0FFF_FFFF,
    clock_region: None,
    columns: &[
        ("CFG", CFG),
        ("IOB", IOB),
        ("CLBL", CLBL),
        ("CLBM", CLBM),
        ("BRAM", BRAM),
        ("DSP", DSP),
        ("DSP1", DSP1),
        ("MCB", MCB),
        ("CLBLD", CLBLD),
        ("PAD", PAD),
    ],
};

/// Spartan-6 LX150 in the FGG484 package.
pub const XC6SLX150_FGG484: DeviceTable = DeviceTable {
    id: "6slx150fgg484",
    name: "Spartan-6 LX150-FGG484",
    family: crate::Family::Spartan6,
    rows: &[RowRun {
        repeat: 12,
        groups: &[
            once(&[CFG, IOB]),
            once(CLBLM),
            once(&[BRAM]),
            once(CLBLM),
            once(&[DSP]),
            times(5, CLBLM),
            once(&[BRAM]),
            once(CLBLM),
            once(&[CLBL, DSP]),
            times(2, CLBLM),
            once(&[CLBL, BRAM, CLBM]),
            times(5, CLBLM),
            once(&[CLBLD, CLBM]),
            times(4, CLBLM),
            once(&[CLBL, BRAM]),
            times(2, CLBLM),
            once(&[CLBL, DSP1]),
            once(CLBLM),
            once(&[CLBL, BRAM, CLBM]),
            times(3, CLBLM),
            once(&[CLBL, DSP, CLBM, CLBL, BRAM, CLBM, CLBL, IOB, PAD]),
        ],
    }],
    bitstream_row_order: &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11],
};
