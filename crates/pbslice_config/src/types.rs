//! Configuration types deserialized from TOML.

use pbslice_device::{ClockRegionGeometry, ColumnKind};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;

/// A device table file: metadata, optional custom columns and the rows.
#[derive(Debug, Deserialize)]
pub struct DeviceTableFile {
    /// Device metadata and geometry overrides.
    pub device: DeviceSection,
    /// Custom column types, keyed by the name rows refer to them with.
    #[serde(default)]
    pub columns: BTreeMap<String, ColumnDef>,
    /// Row layouts, bottom clock-region row first.
    #[serde(default)]
    pub rows: Vec<RowDef>,
}

/// The `[device]` section of a device table file.
#[derive(Debug, Deserialize)]
pub struct DeviceSection {
    /// Device identifier (e.g. "7z010clg400").
    pub id: String,
    /// Human-readable name; defaults to the identifier.
    #[serde(default)]
    pub name: Option<String>,
    /// Family providing default geometry and named columns.
    #[serde(default)]
    pub family: Option<String>,
    /// Stream order of rows; defaults to ascending.
    #[serde(default)]
    pub bitstream_row_order: Option<Vec<usize>>,
    /// Overrides the family's words per frame.
    #[serde(default)]
    pub frame_word_count: Option<usize>,
    /// Overrides the family's bytes per word.
    #[serde(default)]
    pub word_byte_size: Option<usize>,
    /// Overrides the start marker, as a hex string or a list of bytes.
    #[serde(default, deserialize_with = "deserialize_marker")]
    pub start_marker: Option<Vec<u8>>,
    /// Overrides the marker offset.
    #[serde(default)]
    pub marker_offset: Option<usize>,
    /// Overrides the size field mask.
    #[serde(default)]
    pub size_field_mask: Option<u32>,
    /// Overrides the clock-region geometry.
    #[serde(default)]
    pub clock_region: Option<ClockRegionGeometry>,
}

/// A custom column type.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct ColumnDef {
    /// Configuration frames in the column.
    pub frames: u32,
    /// Functional kind.
    pub kind: ColumnKind,
}

/// One `[[rows]]` entry.
#[derive(Debug, Deserialize)]
pub struct RowDef {
    /// Number of consecutive rows sharing this layout.
    #[serde(default = "default_repeat")]
    pub repeat: usize,
    /// Column tokens, `NAME` or `N*NAME`.
    pub columns: Vec<String>,
}

fn default_repeat() -> usize {
    1
}

/// Deserializes a byte marker given either as a hex string (`"30004000"`,
/// spaces allowed) or as a list of byte values.
fn deserialize_marker<'de, D>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error>
where
    D: Deserializer<'de>,
{
    struct HexOrBytes;

    impl<'de> Visitor<'de> for HexOrBytes {
        type Value = Vec<u8>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            formatter.write_str("a hex string or a list of bytes")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            let digits: Vec<char> = v.chars().filter(|c| !c.is_whitespace()).collect();
            if digits.len() % 2 != 0 {
                return Err(E::custom("hex marker has an odd number of digits"));
            }
            digits
                .chunks(2)
                .map(|pair| {
                    let s: String = pair.iter().collect();
                    u8::from_str_radix(&s, 16)
                        .map_err(|_| E::custom(format!("invalid hex byte '{s}'")))
                })
                .collect()
        }

        fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut bytes = Vec::new();
            while let Some(b) = seq.next_element::<u8>()? {
                bytes.push(b);
            }
            Ok(bytes)
        }
    }

    deserializer.deserialize_any(HexOrBytes).map(Some)
}

/// The tool configuration, `pbslice.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct ToolConfig {
    /// Device table files to register, relative to the configuration file.
    #[serde(default)]
    pub device_tables: Vec<String>,
    /// Output defaults.
    #[serde(default)]
    pub output: OutputConfig,
}

/// The `[output]` section.
#[derive(Debug, Default, Deserialize)]
pub struct OutputConfig {
    /// Default partial-bitstream format when the destination does not imply one.
    #[serde(default)]
    pub format: OutputKind,
}

/// Partial-bitstream output format.
#[derive(Debug, Default, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputKind {
    /// Raw extracted bytes.
    #[default]
    Pbs,
    /// Bytes reversed within each word.
    Rpb,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_from_hex_string() {
        let f: DeviceTableFile = toml::from_str(
            r#"
[device]
id = "d"
start_marker = "30 00 40 00"
"#,
        )
        .unwrap();
        assert_eq!(f.device.start_marker, Some(vec![0x30, 0x00, 0x40, 0x00]));
    }

    #[test]
    fn marker_from_byte_list() {
        let f: DeviceTableFile = toml::from_str(
            r#"
[device]
id = "d"
start_marker = [80, 96, 0]
"#,
        )
        .unwrap();
        assert_eq!(f.device.start_marker, Some(vec![0x50, 0x60, 0x00]));
    }

    #[test]
    fn marker_odd_digits_rejected() {
        let res: Result<DeviceTableFile, _> = toml::from_str(
            r#"
[device]
id = "d"
start_marker = "300"
"#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn row_repeat_defaults_to_one() {
        let f: DeviceTableFile = toml::from_str(
            r#"
[device]
id = "d"

[[rows]]
columns = ["CLB"]
"#,
        )
        .unwrap();
        assert_eq!(f.rows[0].repeat, 1);
        assert!(f.device.start_marker.is_none());
    }

    #[test]
    fn custom_column_kind() {
        let f: DeviceTableFile = toml::from_str(
            r#"
[device]
id = "d"

[columns.URAM]
frames = 30
kind = "block_ram"
"#,
        )
        .unwrap();
        assert_eq!(
            f.columns["URAM"],
            ColumnDef {
                frames: 30,
                kind: ColumnKind::BlockRam
            }
        );
    }

    #[test]
    fn tool_config_defaults() {
        let c: ToolConfig = toml::from_str("").unwrap();
        assert!(c.device_tables.is_empty());
        assert_eq!(c.output.format, OutputKind::Pbs);
    }

    #[test]
    fn tool_config_rpb() {
        let c: ToolConfig = toml::from_str("[output]\nformat = \"rpb\"\n").unwrap();
        assert_eq!(c.output.format, OutputKind::Rpb);
    }
}
