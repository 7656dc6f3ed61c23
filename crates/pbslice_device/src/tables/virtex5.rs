//! Virtex-5 frame geometry and device tables.

use super::{once, times, DeviceTable, RowRun};
use crate::column::{Column, ColumnKind};
use crate::family::FamilyParams;

/// Block RAM column.
pub const BRAM: Column = Column::new(30, ColumnKind::BlockRam);
/// CLB column.
pub const CLB: Column = Column::new(36, ColumnKind::Logic);
/// Clock column.
pub const CLK: Column = Column::new(4, ColumnKind::Clock);
/// DSP column.
pub const DSP: Column = Column::new(28, ColumnKind::Dsp);
/// I/O column.
pub const IOB: Column = Column::new(54, ColumnKind::Io);
/// Undocumented 34-frame tail closing every row. Not padded in the RAM section.
pub const TAIL: Column = Column::new(34, ColumnKind::Reserved);

/// Virtex-5 family parameters.
pub const PARAMS: FamilyParams = FamilyParams {
    display_name: "Virtex-5",
    frame_word_count: 41,
    word_byte_size: 4,
    start_marker: &[0x30, 0x00, 0x40, 0x00],
    marker_offset: 8,
    size_field_mask: 0x07FF_FFFF,
    clock_region: None,
    columns: &[
        ("BRAM", BRAM),
        ("CLB", CLB),
        ("CLK", CLK),
        ("DSP", DSP),
        ("IOB", IOB),
        ("TAIL", TAIL),
    ],
};

/// Virtex-5 LX110T in the FF1136 package.
pub const XC5VLX110T_FF1136: DeviceTable = DeviceTable {
    id: "5vlx110tff1136",
    name: "Virtex-5 LX110T-FF1136",
    family: crate::Family::Virtex5,
    rows: &[RowRun {
        repeat: 8,
        groups: &[
            once(&[IOB]),
            times(4, &[CLB]),
            once(&[BRAM]),
            times(10, &[CLB]),
            once(&[BRAM]),
            times(2, &[CLB]),
            once(&[DSP]),
            times(8, &[CLB]),
            once(&[IOB, CLK]),
            times(12, &[CLB]),
            once(&[BRAM]),
            times(10, &[CLB]),
            once(&[BRAM]),
            times(4, &[CLB]),
            once(&[IOB]),
            times(4, &[CLB]),
            once(&[BRAM, TAIL]),
        ],
    }],
    bitstream_row_order: &[4, 5, 6, 7, 3, 2, 1, 0],
};

/// Virtex-5 FX130T in the FF1738 package.
pub const XC5VFX130T_FF1738: DeviceTable = DeviceTable {
    id: "5vfx130tff1738",
    name: "Virtex-5 FX130T-FF1738",
    family: crate::Family::Virtex5,
    rows: &[RowRun {
        repeat: 10,
        groups: &[
            once(&[IOB]),
            times(4, &[CLB]),
            times(3, &[BRAM, CLB, CLB, CLB, CLB, CLB, CLB]),
            once(&[BRAM]),
            times(2, &[CLB]),
            times(2, &[DSP, CLB, CLB]),
            once(&[BRAM]),
            times(4, &[CLB]),
            once(&[IOB, CLK]),
            times(4, &[CLB]),
            once(&[BRAM]),
            times(2, &[CLB]),
            times(2, &[DSP, CLB, CLB]),
            once(&[BRAM]),
            times(6, &[CLB]),
            once(&[BRAM]),
            times(4, &[CLB]),
            once(&[IOB]),
            times(4, &[CLB]),
            once(&[BRAM, TAIL]),
        ],
    }],
    bitstream_row_order: &[5, 6, 7, 8, 9, 4, 3, 2, 1, 0],
};
