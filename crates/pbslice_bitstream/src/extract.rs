//! Coordinate-based region extraction.

use crate::coords::Coords;
use crate::error::{BitstreamError, BitstreamResult, Unavailable};
use crate::Bitstream;
use pbslice_device::{OffsetIndex, Section, UNKNOWN_DEVICE_ID};
use std::ops::Range;

impl Bitstream {
    /// Extracts configuration frames selected by `coords`.
    ///
    /// Rows are visited in ascending logical order regardless of their order
    /// in the stream. When a word range is given, only those words of every
    /// frame in the window are copied.
    pub fn extract(&self, coords: &Coords) -> BitstreamResult<Vec<u8>> {
        self.extract_section(Section::Config, coords)
    }

    /// Extracts block-RAM content frames selected by `coords`.
    pub fn extract_ram(&self, coords: &Coords) -> BitstreamResult<Vec<u8>> {
        self.extract_section(Section::BlockRam, coords)
    }

    /// Region writes are not supported.
    pub fn write_region(&mut self, _coords: &Coords, _data: &[u8]) -> BitstreamResult<()> {
        Err(BitstreamError::EditNotSupported)
    }

    /// Region clears are not supported.
    pub fn clear_region(&mut self, _coords: &Coords) -> BitstreamResult<()> {
        Err(BitstreamError::EditNotSupported)
    }

    fn extract_section(&self, section: Section, coords: &Coords) -> BitstreamResult<Vec<u8>> {
        let (base, index) = self.addressable()?;
        let frame_bytes = self.device.frame_bytes();
        let word_bytes = self.device.word_byte_size();
        let breakpoints = index.section(section);

        let mut out = Vec::new();
        for r in coords.row.resolve_or_full(index.row_count(), "row")? {
            let row = &breakpoints[r];
            let columns = coords
                .column
                .resolve_or_full(row.len().saturating_sub(1), "column")?;
            let mut start = row[columns.start];
            let mut end = row[columns.end];

            let frames = (end - start) / frame_bytes;
            if let Some(f) = coords.frame.resolve(frames, "frame")? {
                end = start + f.end * frame_bytes;
                start += f.start * frame_bytes;
            }

            match coords
                .word
                .resolve(self.device.frame_word_count(), "word")?
            {
                None => out.extend_from_slice(self.window(base + start..base + end)?),
                Some(w) => {
                    for frame in (start..end).step_by(frame_bytes) {
                        let from = base + frame + w.start * word_bytes;
                        let to = base + frame + w.end * word_bytes;
                        out.extend_from_slice(self.window(from..to)?);
                    }
                }
            }
        }
        Ok(out)
    }

    /// Checks that the bitstream can be addressed and returns the content
    /// offset of the frame data together with the device's offset index.
    pub(crate) fn addressable(&self) -> BitstreamResult<(usize, &OffsetIndex)> {
        if !self.device.has_table() {
            let reason = if self.device.id() == UNKNOWN_DEVICE_ID {
                Unavailable::UnknownDevice(self.container.device_id.clone())
            } else {
                Unavailable::EmptyTable(self.device.id().to_string())
            };
            return Err(reason.into());
        }
        let base = self
            .config_offset()
            .ok_or(Unavailable::ConfigMarkerNotFound)?;
        Ok((base, self.device.offset_index()))
    }

    /// Borrows `range` of the content, failing if it runs past the end.
    pub(crate) fn window(&self, range: Range<usize>) -> BitstreamResult<&[u8]> {
        let len = self.container.content.len();
        self.container
            .content
            .get(range.clone())
            .ok_or(BitstreamError::RegionOutOfBounds {
                start: range.start,
                end: range.end,
                len,
            })
    }
}
