//! Byte-offset indices over the configuration and block-RAM sections.
//!
//! Both indices are prefix sums taken in physical (stream) row order and then
//! stored in logical row order, so `config()[r][c]` is the first byte of
//! column `c` of clock-region row `r` and `config()[r][c + 1]` is one past
//! its last byte. The block-RAM section follows the whole configuration
//! section in the stream, so its breakpoints continue from the configuration
//! total.

use crate::column::Column;
use crate::model::DeviceModel;

/// Which of the two frame sections an index refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Section {
    /// Configuration frames.
    Config,
    /// Block-RAM content frames.
    BlockRam,
}

/// Column breakpoints for every row of a device, in both sections.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OffsetIndex {
    config: Vec<Vec<usize>>,
    ram: Vec<Vec<usize>>,
    config_size: usize,
    total_size: usize,
}

impl OffsetIndex {
    /// Builds both indices from a device's layout table.
    pub fn build(model: &DeviceModel) -> Self {
        let frame_bytes = model.frame_bytes();
        let mut total = 0;

        let config = prefix_sums(model, &mut total, |c| c.frame_count as usize * frame_bytes);
        let config_size = total;
        let ram = prefix_sums(model, &mut total, |c| c.ram_frame_count() * frame_bytes);

        let order = model.bitstream_row_order();
        Self {
            config: to_logical(config, order),
            ram: to_logical(ram, order),
            config_size,
            total_size: total,
        }
    }

    /// Breakpoints of the requested section, in logical row order.
    pub fn section(&self, section: Section) -> &[Vec<usize>] {
        match section {
            Section::Config => &self.config,
            Section::BlockRam => &self.ram,
        }
    }

    /// Configuration-frame breakpoints.
    pub fn config(&self) -> &[Vec<usize>] {
        &self.config
    }

    /// Block-RAM content breakpoints.
    pub fn ram(&self) -> &[Vec<usize>] {
        &self.ram
    }

    /// Number of rows covered.
    pub fn row_count(&self) -> usize {
        self.config.len()
    }

    /// Number of columns in a row, if the row exists.
    pub fn column_count(&self, row: usize) -> Option<usize> {
        self.config.get(row).map(|b| b.len().saturating_sub(1))
    }

    /// Byte window `[start, end)` of columns `col_start..col_stop` of `row`.
    pub fn window(
        &self,
        section: Section,
        row: usize,
        col_start: usize,
        col_stop: usize,
    ) -> Option<(usize, usize)> {
        let breakpoints = self.section(section).get(row)?;
        Some((*breakpoints.get(col_start)?, *breakpoints.get(col_stop)?))
    }

    /// Bytes in the configuration section.
    pub fn config_size(&self) -> usize {
        self.config_size
    }

    /// Bytes in the block-RAM section.
    pub fn ram_size(&self) -> usize {
        self.total_size - self.config_size
    }

    /// Bytes in both sections.
    pub fn total_size(&self) -> usize {
        self.total_size
    }

    /// The section's rows rearranged back into stream order.
    pub fn physical_rows(&self, section: Section, order: &[usize]) -> Vec<&[usize]> {
        let rows = self.section(section);
        order
            .iter()
            .filter_map(|&r| rows.get(r).map(Vec::as_slice))
            .collect()
    }
}

fn prefix_sums(
    model: &DeviceModel,
    total: &mut usize,
    bytes_of: impl Fn(Column) -> usize,
) -> Vec<Vec<usize>> {
    let mut physical = Vec::with_capacity(model.bitstream_row_order().len());
    for &r in model.bitstream_row_order() {
        let Some(row) = model.rows().get(r) else {
            continue;
        };
        let mut breakpoints = Vec::with_capacity(row.len() + 1);
        breakpoints.push(*total);
        for &column in row.columns() {
            *total += bytes_of(column);
            breakpoints.push(*total);
        }
        physical.push(breakpoints);
    }
    physical
}

fn to_logical(physical: Vec<Vec<usize>>, order: &[usize]) -> Vec<Vec<usize>> {
    let mut logical = vec![Vec::new(); physical.len()];
    for (breakpoints, &r) in physical.into_iter().zip(order) {
        if let Some(slot) = logical.get_mut(r) {
            *slot = breakpoints;
        }
    }
    logical
}
