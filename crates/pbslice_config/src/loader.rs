//! Configuration file loading.

use crate::error::ConfigError;
use crate::resolve::resolve_device_table;
use crate::types::{DeviceTableFile, ToolConfig};
use pbslice_device::DeviceModel;
use std::path::Path;

/// File name of the tool configuration looked up in the working directory.
pub const TOOL_CONFIG_FILE: &str = "pbslice.toml";

/// Loads and resolves a device table file.
pub fn load_device_table(path: &Path) -> Result<DeviceModel, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_device_table_from_str(&content)
}

/// Parses and resolves a device table from a string.
pub fn load_device_table_from_str(content: &str) -> Result<DeviceModel, ConfigError> {
    let file: DeviceTableFile =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    resolve_device_table(&file)
}

/// Loads the tool configuration from `path`.
pub fn load_tool_config(path: &Path) -> Result<ToolConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_tool_config_from_str(&content)
}

/// Parses the tool configuration from a string.
pub fn load_tool_config_from_str(content: &str) -> Result<ToolConfig, ConfigError> {
    let config: ToolConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    if let Some(empty) = config.device_tables.iter().position(|p| p.trim().is_empty()) {
        return Err(ConfigError::ValidationError(format!(
            "device_tables[{empty}] is an empty path"
        )));
    }
    Ok(config)
}
