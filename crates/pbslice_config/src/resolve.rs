//! Resolution of device table files into device models, and registry
//! assembly from the tool configuration.

use crate::error::ConfigError;
use crate::loader::load_device_table;
use crate::types::{DeviceTableFile, ToolConfig};
use pbslice_device::{Column, DeviceModel, DeviceRegistry, Family, FrameLayout, Row};
use std::path::Path;

/// Upper bound on columns in one clock-region row.
pub const MAX_COLUMNS_PER_ROW: usize = 4096;
/// Upper bound on clock-region rows in one device table.
pub const MAX_ROWS: usize = 1024;

/// Splits a column token into its repeat count and column name.
///
/// `"4*CLB"` yields `(4, "CLB")` and `"BRAM"` yields `(1, "BRAM")`.
pub fn parse_column_token(token: &str) -> Result<(usize, &str), ConfigError> {
    let (count, name) = match token.split_once('*') {
        Some((count, name)) => {
            let count = count.trim().parse::<usize>().map_err(|_| {
                ConfigError::ValidationError(format!("invalid repeat count in column '{token}'"))
            })?;
            if count > MAX_COLUMNS_PER_ROW {
                return Err(ConfigError::ValidationError(format!(
                    "repeat count in column '{token}' exceeds {MAX_COLUMNS_PER_ROW}"
                )));
            }
            (count, name.trim())
        }
        None => (1, token.trim()),
    };
    if name.is_empty() {
        return Err(ConfigError::ValidationError(format!(
            "column token '{token}' has no column name"
        )));
    }
    Ok((count, name))
}

/// Resolves a parsed device table file into a validated [`DeviceModel`].
///
/// Geometry starts from the named family (if any) and is then overridden
/// field by field. Column names resolve against the file's custom columns
/// first and the family's named columns second.
pub fn resolve_device_table(file: &DeviceTableFile) -> Result<DeviceModel, ConfigError> {
    let section = &file.device;
    if section.id.trim().is_empty() {
        return Err(ConfigError::MissingField("device.id".to_string()));
    }

    let family = section
        .family
        .as_deref()
        .map(|name| Family::from_name(name).ok_or_else(|| ConfigError::UnknownFamily(name.to_string())))
        .transpose()?;

    let mut layout = family
        .map(|f| FrameLayout::from(f.params()))
        .unwrap_or_else(FrameLayout::unset);
    if let Some(v) = section.frame_word_count {
        layout.frame_word_count = v;
    } else if family.is_none() {
        return Err(ConfigError::MissingField("device.frame_word_count".to_string()));
    }
    if let Some(v) = section.word_byte_size {
        layout.word_byte_size = v;
    } else if family.is_none() {
        return Err(ConfigError::MissingField("device.word_byte_size".to_string()));
    }
    if let Some(v) = &section.start_marker {
        layout.start_marker = v.clone();
    }
    if let Some(v) = section.marker_offset {
        layout.marker_offset = v;
    }
    if let Some(v) = section.size_field_mask {
        layout.size_field_mask = v;
    }
    if let Some(v) = section.clock_region {
        layout.clock_region = Some(v);
    }

    if file.rows.is_empty() {
        return Err(ConfigError::ValidationError(format!(
            "device '{}' has no rows",
            section.id
        )));
    }

    let mut rows = Vec::new();
    for def in &file.rows {
        let mut columns = Vec::new();
        for token in &def.columns {
            let (count, name) = parse_column_token(token)?;
            let column = lookup_column(file, family, name)?;
            if columns.len() + count > MAX_COLUMNS_PER_ROW {
                return Err(ConfigError::ValidationError(format!(
                    "device '{}': row has more than {MAX_COLUMNS_PER_ROW} columns",
                    section.id
                )));
            }
            columns.extend(std::iter::repeat(column).take(count));
        }
        if def.repeat > MAX_ROWS - rows.len() {
            return Err(ConfigError::ValidationError(format!(
                "device '{}' has more than {MAX_ROWS} rows",
                section.id
            )));
        }
        for _ in 0..def.repeat {
            rows.push(Row::new(columns.clone()));
        }
    }

    let order = section
        .bitstream_row_order
        .clone()
        .unwrap_or_else(|| (0..rows.len()).collect());
    let name = section.name.clone().unwrap_or_else(|| section.id.clone());
    Ok(DeviceModel::new(
        section.id.trim(),
        name,
        family,
        layout,
        rows,
        order,
    )?)
}

fn lookup_column(
    file: &DeviceTableFile,
    family: Option<Family>,
    name: &str,
) -> Result<Column, ConfigError> {
    if let Some(def) = file.columns.get(name) {
        return Ok(Column::new(def.frames, def.kind));
    }
    family
        .and_then(|f| f.column(name))
        .ok_or_else(|| ConfigError::UnknownColumn(name.to_string()))
}

/// Builds the device registry: built-in tables plus every table file listed
/// in the tool configuration, resolved relative to `base_dir`.
///
/// A listed table replaces a built-in one with the same identifier.
pub fn build_registry(config: &ToolConfig, base_dir: &Path) -> Result<DeviceRegistry, ConfigError> {
    let mut registry = DeviceRegistry::with_builtins();
    for path in &config.device_tables {
        registry.register(load_device_table(&base_dir.join(path))?);
    }
    Ok(registry)
}
