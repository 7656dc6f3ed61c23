//! 7-series frame geometry and device tables.

use super::{once, times, DeviceTable, RowRun};
use crate::column::{Column, ColumnKind};
use crate::family::{ClockRegionGeometry, FamilyParams};

/// I/O column, outer half (42 frames).
pub const IOB_A: Column = Column::new(42, ColumnKind::Io);
/// I/O column, inner half (30 frames).
pub const IOB_B: Column = Column::new(30, ColumnKind::Io);
/// CLB column.
pub const CLB: Column = Column::new(36, ColumnKind::Logic);
/// Block RAM column.
pub const BRAM: Column = Column::new(28, ColumnKind::BlockRam);
/// DSP column.
pub const DSP: Column = Column::new(28, ColumnKind::Dsp);
/// Clock column.
pub const CLK: Column = Column::new(30, ColumnKind::Clock);
/// Configuration column.
pub const CFG: Column = Column::new(30, ColumnKind::Config);
/// Transceiver column.
pub const GT: Column = Column::new(32, ColumnKind::Transceiver);
/// Row padding.
pub const PAD: Column = Column::new(2, ColumnKind::Pad);

/// 7-series family parameters.
pub const PARAMS: FamilyParams = FamilyParams {
    display_name: "7-series",
    frame_word_count: 101,
    word_byte_size: 4,
    start_marker: &[0x30, 0x00, 0x40, 0x00],
    marker_offset: 8,
    size_field_mask: 0x07FF_FFFF,
    clock_region: Some(ClockRegionGeometry {
        rows_per_clock_region: 50,
        words_per_row: 2,
        clock_words: 1,
    }),
    columns: &[
        ("IOB_A", IOB_A),
        ("IOB_B", IOB_B),
        ("CLB", CLB),
        ("BRAM", BRAM),
        ("DSP", DSP),
        ("CLK", CLK),
        ("CFG", CFG),
        ("GT", GT),
        ("PAD", PAD),
    ],
};

/// Zynq 7020 in the CLG400 package.
pub const XC7Z020_CLG400: DeviceTable = DeviceTable {
    id: "7z020clg400",
    name: "Zynq 7020-CLG400",
    family: crate::Family::Series7,
    rows: &[RowRun {
        repeat: 3,
        groups: &[
            once(&[IOB_A, IOB_B]),
            times(4, &[CLB]),
            once(&[BRAM]),
            times(2, &[CLB]),
            once(&[DSP]),
            times(4, &[CLB]),
            once(&[DSP]),
            times(2, &[CLB]),
            once(&[BRAM]),
            times(4, &[CLB]),
            once(&[BRAM]),
            times(2, &[CLB]),
            once(&[DSP]),
            times(7, &[CLB]),
            once(&[CLK]),
            times(2, &[CLB]),
            once(&[BRAM]),
            times(13, &[CLB]),
            once(&[CFG]),
            times(5, &[CLB]),
            once(&[BRAM]),
            times(2, &[CLB]),
            once(&[DSP]),
            times(4, &[CLB]),
            once(&[DSP]),
            times(2, &[CLB]),
            once(&[BRAM]),
            times(4, &[CLB]),
            once(&[IOB_B, IOB_A, PAD]),
        ],
    }],
    bitstream_row_order: &[2, 1, 0],
};

macro_rules! z100_common {
    ($($tail:expr),* $(,)?) => {
        &[
            once(&[IOB_A, IOB_B]),
            times(4, &[CLB]),
            once(&[BRAM]),
            times(2, &[CLB]),
            once(&[DSP]),
            times(4, &[CLB]),
            once(&[DSP]),
            times(2, &[CLB]),
            once(&[BRAM]),
            times(4, &[CLB]),
            once(&[BRAM]),
            times(2, &[CLB]),
            once(&[DSP]),
            times(5, &[CLB]),
            once(&[DSP]),
            times(2, &[CLB]),
            once(&[BRAM]),
            times(2, &[CLB]),
            once(&[DSP]),
            times(4, &[CLB]),
            once(&[DSP]),
            times(2, &[CLB]),
            once(&[BRAM]),
            times(6, &[CLB]),
            once(&[CFG]),
            times(4, &[CLB]),
            once(&[DSP]),
            times(2, &[CLB]),
            once(&[BRAM]),
            times(2, &[CLB]),
            once(&[DSP]),
            times(5, &[CLB]),
            once(&[CLK]),
            times(9, &[CLB]),
            once(&[DSP]),
            times(2, &[CLB]),
            once(&[BRAM]),
            times(2, &[CLB]),
            once(&[DSP]),
            times(10, &[CLB]),
            once(&[DSP]),
            times(2, &[CLB]),
            once(&[BRAM]),
            times(2, &[CLB]),
            once(&[DSP]),
            times(7, &[CLB]),
            once(&[DSP]),
            times(2, &[CLB]),
            once(&[BRAM]),
            times(3, &[CLB]),
            once(&[DSP]),
            times(2, &[CLB]),
            once(&[BRAM]),
            times(5, &[CLB]),
            once(&[BRAM]),
            times(2, &[CLB]),
            once(&[DSP]),
            times(3, &[CLB]),
            $($tail),*
        ]
    };
}

/// Zynq 7100 in the FFG900 package.
pub const XC7Z100_FFG900: DeviceTable = DeviceTable {
    id: "7z100ffg900",
    name: "Zynq 70100-FFG900",
    family: crate::Family::Series7,
    rows: &[
        RowRun {
            repeat: 4,
            groups: z100_common![once(&[GT, PAD])],
        },
        RowRun {
            repeat: 3,
            groups: z100_common![
                once(&[BRAM]),
                times(4, &[CLB]),
                once(&[IOB_B, IOB_A, PAD])
            ],
        },
    ],
    bitstream_row_order: &[3, 4, 5, 6, 2, 1, 0],
};

macro_rules! k325t_common {
    ($($tail:expr),* $(,)?) => {
        &[
            once(&[IOB_A, IOB_B]),
            times(4, &[CLB]),
            once(&[BRAM]),
            times(2, &[CLB]),
            once(&[DSP]),
            times(4, &[CLB]),
            once(&[DSP]),
            times(2, &[CLB]),
            once(&[BRAM]),
            times(6, &[CLB]),
            once(&[CFG]),
            times(7, &[CLB]),
            once(&[BRAM]),
            times(2, &[CLB]),
            once(&[DSP]),
            times(13, &[CLB]),
            once(&[CLK]),
            times(12, &[CLB]),
            once(&[BRAM]),
            times(2, &[CLB]),
            once(&[DSP]),
            times(5, &[CLB]),
            once(&[DSP]),
            times(2, &[CLB]),
            once(&[BRAM]),
            times(5, &[CLB]),
            once(&[BRAM]),
            times(2, &[CLB]),
            once(&[DSP]),
            times(5, &[CLB]),
            $($tail),*
        ]
    };
}

/// Kintex-7 325T in the FFG900 package.
pub const XC7K325T_FFG900: DeviceTable = DeviceTable {
    id: "7k325tffg900",
    name: "Kintex 7 325T-FFG900",
    family: crate::Family::Series7,
    rows: &[
        RowRun {
            repeat: 3,
            groups: k325t_common![
                once(&[BRAM]),
                times(4, &[CLB]),
                once(&[IOB_B, IOB_A, PAD])
            ],
        },
        RowRun {
            repeat: 4,
            groups: k325t_common![once(&[GT, PAD])],
        },
    ],
    bitstream_row_order: &[3, 4, 5, 6, 2, 1, 0],
};
