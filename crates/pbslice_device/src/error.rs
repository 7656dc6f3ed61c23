//! Error types for device table validation.

/// Errors raised when a device table is structurally invalid.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DeviceError {
    /// The bitstream row order is not a permutation of the table's rows.
    #[error("device '{device}': bitstream row order {order:?} is not a permutation of 0..{rows}")]
    InvalidRowOrder {
        /// The device identifier.
        device: String,
        /// The offending row order.
        order: Vec<usize>,
        /// Number of rows in the table.
        rows: usize,
    },

    /// A frame geometry value is zero.
    #[error("device '{device}': {field} must be non-zero")]
    ZeroGeometry {
        /// The device identifier.
        device: String,
        /// The name of the zero-valued field.
        field: &'static str,
    },

    /// The clock-region geometry does not fit inside a frame.
    #[error(
        "device '{device}': {rows_per_clock_region} row(s) of {words_per_row} word(s) plus \
         {clock_words} clock word(s) do not fit a {frame_word_count}-word frame"
    )]
    InvalidClockRegion {
        /// The device identifier.
        device: String,
        /// Words per frame.
        frame_word_count: usize,
        /// Device rows per clock region.
        rows_per_clock_region: usize,
        /// Frame words per device row.
        words_per_row: usize,
        /// Words of the clock column.
        clock_words: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_row_order() {
        let err = DeviceError::InvalidRowOrder {
            device: "7z020clg400".into(),
            order: vec![0, 0, 1],
            rows: 3,
        };
        assert_eq!(
            format!("{err}"),
            "device '7z020clg400': bitstream row order [0, 0, 1] is not a permutation of 0..3"
        );
    }

    #[test]
    fn display_zero_geometry() {
        let err = DeviceError::ZeroGeometry {
            device: "custom".into(),
            field: "word_byte_size",
        };
        assert_eq!(format!("{err}"), "device 'custom': word_byte_size must be non-zero");
    }
}
