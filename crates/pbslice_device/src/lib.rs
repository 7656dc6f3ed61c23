//! Device layout tables and configuration-frame offset indices.
//!
//! A [`DeviceModel`] describes one FPGA: the clock-region rows of its
//! configuration memory, the columns in each row with their frame counts,
//! the order rows are serialized in the bitstream and the family's frame
//! geometry. From that table the model derives an [`OffsetIndex`] mapping
//! every (row, column) pair to a byte window of the configuration payload,
//! both for configuration frames and for block-RAM content frames.
//!
//! Models are obtained from a [`DeviceRegistry`]:
//!
//! ```
//! use pbslice_device::DeviceRegistry;
//! use pbslice_diagnostics::DiagnosticSink;
//!
//! let registry = DeviceRegistry::with_builtins();
//! let sink = DiagnosticSink::new();
//! let model = registry.lookup("xc7z020clg400-1", &sink);
//! assert_eq!(model.name(), "Zynq 7020-CLG400");
//! assert_eq!(model.offset_index().row_count(), 3);
//! ```

#![warn(missing_docs)]

pub mod column;
pub mod error;
pub mod family;
pub mod model;
pub mod offsets;
pub mod registry;
pub mod tables;

pub use column::{Column, ColumnKind, RAM_FRAMES_PER_BLOCK_RAM_COLUMN};
pub use error::DeviceError;
pub use family::{ClockRegionGeometry, Family, FamilyParams};
pub use model::{ConfigData, DeviceModel, FrameLayout, Row, UNKNOWN_DEVICE_ID};
pub use offsets::{OffsetIndex, Section};
pub use registry::{normalize_device_id, DeviceRegistry, UNKNOWN_DEVICE};
pub use tables::{DeviceTable, BUILTIN_TABLES};
