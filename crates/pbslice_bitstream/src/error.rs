//! Error types for bitstream loading and extraction.

use std::fmt;

/// Why a bitstream cannot be addressed by coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unavailable {
    /// The container's device identifier has no registered model.
    UnknownDevice(String),
    /// The start-of-configuration marker is unset or was not found.
    ConfigMarkerNotFound,
    /// The device model carries no layout table.
    EmptyTable(String),
    /// The device model declares no clock-region geometry.
    NoClockRegionGeometry(String),
}

impl fmt::Display for Unavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unavailable::UnknownDevice(id) => write!(f, "unknown device '{id}'"),
            Unavailable::ConfigMarkerNotFound => {
                f.write_str("configuration data marker not found")
            }
            Unavailable::EmptyTable(id) => write!(f, "device '{id}' has no layout table"),
            Unavailable::NoClockRegionGeometry(id) => {
                write!(f, "device '{id}' has no clock-region geometry")
            }
        }
    }
}

/// Errors raised by the container codec and the region extractor.
#[derive(Debug, thiserror::Error)]
pub enum BitstreamError {
    /// The input is not a well-formed `.bit` container.
    #[error("malformed container: {0}")]
    MalformedContainer(String),

    /// The bitstream cannot be addressed by coordinates.
    #[error("extraction unavailable: {0}")]
    ExtractionUnavailable(Unavailable),

    /// A coordinate, range or pblock is invalid for the device.
    #[error("invalid coordinate range: {0}")]
    InvalidCoordinateRange(String),

    /// A byte window extends past the end of the content.
    #[error("region {start:#x}..{end:#x} lies outside the {len}-byte content")]
    RegionOutOfBounds {
        /// Window start, relative to the content.
        start: usize,
        /// Window end (exclusive), relative to the content.
        end: usize,
        /// Content length.
        len: usize,
    },

    /// Region writes and clears are not supported.
    #[error("editing bitstream regions is not supported")]
    EditNotSupported,

    /// An I/O error occurred while reading or writing a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<Unavailable> for BitstreamError {
    fn from(reason: Unavailable) -> Self {
        BitstreamError::ExtractionUnavailable(reason)
    }
}

/// Result alias for bitstream operations.
pub type BitstreamResult<T> = Result<T, BitstreamError>;
