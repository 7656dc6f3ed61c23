//! Parsing and validation of pbslice configuration files.
//!
//! Two kinds of TOML file are read here: device table files, which describe
//! the column layout of a device missing from the built-in tables, and the
//! tool configuration `pbslice.toml`, which lists device table files to load
//! and sets output defaults.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod resolve;
pub mod types;

pub use error::ConfigError;
pub use loader::{
    load_device_table, load_device_table_from_str, load_tool_config, load_tool_config_from_str,
    TOOL_CONFIG_FILE,
};
pub use resolve::{
    build_registry, parse_column_token, resolve_device_table, MAX_COLUMNS_PER_ROW, MAX_ROWS,
};
pub use types::*;
