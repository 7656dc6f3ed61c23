//! Error types for configuration loading and validation.

use pbslice_device::DeviceError;

/// Errors that can occur when loading a device table or `pbslice.toml`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An I/O error occurred while reading a configuration file.
    #[error("failed to read configuration: {0}")]
    IoError(#[from] std::io::Error),

    /// The TOML content could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    /// The device table names a family without built-in geometry.
    #[error("unknown device family '{0}'")]
    UnknownFamily(String),

    /// A row references a column type that is neither custom nor a family column.
    #[error("unknown column type '{0}'")]
    UnknownColumn(String),

    /// A required field is missing from the configuration.
    #[error("missing required field: {0}")]
    MissingField(String),

    /// A configuration value failed validation.
    #[error("validation error: {0}")]
    ValidationError(String),

    /// The resolved device table is structurally invalid.
    #[error(transparent)]
    Device(#[from] DeviceError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_unknown_family() {
        let err = ConfigError::UnknownFamily("ultrascale".to_string());
        assert_eq!(format!("{err}"), "unknown device family 'ultrascale'");
    }

    #[test]
    fn display_unknown_column() {
        let err = ConfigError::UnknownColumn("URAM".to_string());
        assert_eq!(format!("{err}"), "unknown column type 'URAM'");
    }

    #[test]
    fn display_missing_field() {
        let err = ConfigError::MissingField("device.id".to_string());
        assert_eq!(format!("{err}"), "missing required field: device.id");
    }

    #[test]
    fn display_parse_error() {
        let err = ConfigError::ParseError("expected '=' at line 3".to_string());
        assert_eq!(
            format!("{err}"),
            "failed to parse configuration: expected '=' at line 3"
        );
    }

    #[test]
    fn display_device_error_is_transparent() {
        let err = ConfigError::from(DeviceError::ZeroGeometry {
            device: "d".into(),
            field: "word_byte_size",
        });
        assert_eq!(format!("{err}"), "device 'd': word_byte_size must be non-zero");
    }

    #[test]
    fn display_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = ConfigError::IoError(io_err);
        assert!(format!("{err}").starts_with("failed to read configuration:"));
    }
}
