//! The per-device model: layout table, frame geometry and the lazily built
//! offset index.

use crate::column::Column;
use crate::error::DeviceError;
use crate::family::{ClockRegionGeometry, Family, FamilyParams};
use crate::offsets::OffsetIndex;
use crate::tables::DeviceTable;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// One clock-region row: its columns from left to right.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    columns: Vec<Column>,
}

impl Row {
    /// Creates a row from its columns.
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    /// The row's columns, left to right.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns `true` if the row has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Total configuration frames in the row.
    pub fn frame_count(&self) -> usize {
        self.columns.iter().map(|c| c.frame_count as usize).sum()
    }
}

/// Frame geometry and configuration-data marker of a device.
///
/// Normally copied from the family's [`FamilyParams`]; device table files
/// may override individual values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameLayout {
    /// Words per configuration frame.
    pub frame_word_count: usize,
    /// Bytes per word.
    pub word_byte_size: usize,
    /// Byte sequence locating frame data; empty when unknown.
    pub start_marker: Vec<u8>,
    /// Distance from the start of the marker to the first frame-data byte.
    pub marker_offset: usize,
    /// Mask applied to the big-endian word count preceding the frame data.
    pub size_field_mask: u32,
    /// Clock-region geometry, if the device supports multi-region extraction.
    pub clock_region: Option<ClockRegionGeometry>,
}

impl FrameLayout {
    /// A layout with no geometry and no marker.
    pub fn unset() -> Self {
        Self {
            frame_word_count: 0,
            word_byte_size: 0,
            start_marker: Vec::new(),
            marker_offset: 0,
            size_field_mask: 0,
            clock_region: None,
        }
    }

    /// Bytes per configuration frame.
    pub fn frame_bytes(&self) -> usize {
        self.frame_word_count * self.word_byte_size
    }
}

impl From<&FamilyParams> for FrameLayout {
    fn from(params: &FamilyParams) -> Self {
        Self {
            frame_word_count: params.frame_word_count,
            word_byte_size: params.word_byte_size,
            start_marker: params.start_marker.to_vec(),
            marker_offset: params.marker_offset,
            size_field_mask: params.size_field_mask,
            clock_region: params.clock_region,
        }
    }
}

/// Where the configuration frames start inside the container content, and
/// how many bytes the preceding size field announces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigData {
    /// Byte offset of the first frame byte.
    pub offset: usize,
    /// Announced frame-data length in bytes.
    pub length: usize,
}

/// Identifier of the placeholder model returned for unknown devices.
pub const UNKNOWN_DEVICE_ID: &str = "unknown";

/// Immutable description of one FPGA device.
///
/// The offset index is derived from the layout table on first use and cached
/// for the lifetime of the model; concurrent first callers build it once.
#[derive(Debug)]
pub struct DeviceModel {
    id: String,
    name: String,
    family: Option<Family>,
    layout: FrameLayout,
    rows: Vec<Row>,
    bitstream_row_order: Vec<usize>,
    index: OnceLock<OffsetIndex>,
}

impl DeviceModel {
    /// Creates a validated device model.
    ///
    /// The row order must be a permutation of `0..rows.len()` and the frame
    /// geometry must be non-zero.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        family: Option<Family>,
        layout: FrameLayout,
        rows: Vec<Row>,
        bitstream_row_order: Vec<usize>,
    ) -> Result<Self, DeviceError> {
        let id = id.into();
        if layout.frame_word_count == 0 {
            return Err(DeviceError::ZeroGeometry {
                device: id,
                field: "frame_word_count",
            });
        }
        if layout.word_byte_size == 0 {
            return Err(DeviceError::ZeroGeometry {
                device: id,
                field: "word_byte_size",
            });
        }
        if let Some(cr) = layout.clock_region {
            if cr.words_per_row == 0 || cr.rows_per_clock_region == 0 {
                return Err(DeviceError::ZeroGeometry {
                    device: id,
                    field: "clock_region",
                });
            }
            let needed = cr
                .rows_per_clock_region
                .checked_mul(cr.words_per_row)
                .and_then(|w| w.checked_add(cr.clock_words));
            if !matches!(needed, Some(n) if n <= layout.frame_word_count) {
                return Err(DeviceError::InvalidClockRegion {
                    device: id,
                    frame_word_count: layout.frame_word_count,
                    rows_per_clock_region: cr.rows_per_clock_region,
                    words_per_row: cr.words_per_row,
                    clock_words: cr.clock_words,
                });
            }
        }
        if !is_permutation(&bitstream_row_order, rows.len()) {
            return Err(DeviceError::InvalidRowOrder {
                device: id,
                order: bitstream_row_order,
                rows: rows.len(),
            });
        }
        Ok(Self {
            id,
            name: name.into(),
            family,
            layout,
            rows,
            bitstream_row_order,
            index: OnceLock::new(),
        })
    }

    /// Builds a model from a built-in table.
    pub fn from_table(table: &DeviceTable) -> Self {
        Self {
            id: table.id.to_string(),
            name: table.name.to_string(),
            family: Some(table.family),
            layout: FrameLayout::from(table.family.params()),
            rows: table.expand_rows(),
            bitstream_row_order: table.bitstream_row_order.to_vec(),
            index: OnceLock::new(),
        }
    }

    /// The model used for unrecognized devices: no table, no marker.
    pub fn placeholder() -> Self {
        Self {
            id: UNKNOWN_DEVICE_ID.to_string(),
            name: "Unknown model".to_string(),
            family: None,
            layout: FrameLayout::unset(),
            rows: Vec::new(),
            bitstream_row_order: Vec::new(),
            index: OnceLock::new(),
        }
    }

    /// A model carrying a family's geometry and marker but no layout table.
    ///
    /// Such a model can locate configuration data but cannot extract regions.
    pub fn family_placeholder(family: Family) -> Self {
        let params = family.params();
        Self {
            id: family.name().to_string(),
            name: format!("{}, unknown model", params.display_name),
            family: Some(family),
            layout: FrameLayout::from(params),
            rows: Vec::new(),
            bitstream_row_order: Vec::new(),
            index: OnceLock::new(),
        }
    }

    /// Device identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Human-readable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Family, if known.
    pub fn family(&self) -> Option<Family> {
        self.family
    }

    /// Frame geometry and marker.
    pub fn layout(&self) -> &FrameLayout {
        &self.layout
    }

    /// Words per frame.
    pub fn frame_word_count(&self) -> usize {
        self.layout.frame_word_count
    }

    /// Bytes per word.
    pub fn word_byte_size(&self) -> usize {
        self.layout.word_byte_size
    }

    /// Bytes per frame.
    pub fn frame_bytes(&self) -> usize {
        self.layout.frame_bytes()
    }

    /// Clock-region geometry, if declared.
    pub fn clock_region(&self) -> Option<ClockRegionGeometry> {
        self.layout.clock_region
    }

    /// Clock-region rows, bottom first.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Physical order of rows in the serialized bitstream.
    pub fn bitstream_row_order(&self) -> &[usize] {
        &self.bitstream_row_order
    }

    /// Returns `true` if the model carries a layout table.
    pub fn has_table(&self) -> bool {
        !self.rows.is_empty()
    }

    /// The offset index, built on first call.
    pub fn offset_index(&self) -> &OffsetIndex {
        self.index.get_or_init(|| OffsetIndex::build(self))
    }

    /// Returns `true` once the offset index has been built.
    pub fn is_index_built(&self) -> bool {
        self.index.get().is_some()
    }

    /// Searches `content` for the start marker and reads the frame-data size
    /// field preceding the data.
    ///
    /// Returns `None` when the marker is unset or absent, or when the
    /// computed offset falls outside `content`.
    pub fn locate_config_data(&self, content: &[u8]) -> Option<ConfigData> {
        let marker = self.layout.start_marker.as_slice();
        if marker.is_empty() {
            return None;
        }
        let found = content.windows(marker.len()).position(|w| w == marker)?;
        let offset = found + self.layout.marker_offset;
        let size_field: [u8; 4] = content.get(offset.checked_sub(4)?..offset)?.try_into().ok()?;
        let words = (u32::from_be_bytes(size_field) & self.layout.size_field_mask) as usize;
        Some(ConfigData {
            offset,
            length: words * self.layout.word_byte_size,
        })
    }
}

fn is_permutation(order: &[usize], len: usize) -> bool {
    if order.len() != len {
        return false;
    }
    let mut seen = vec![false; len];
    for &i in order {
        match seen.get_mut(i) {
            Some(slot) if !*slot => *slot = true,
            _ => return false,
        }
    }
    true
}
