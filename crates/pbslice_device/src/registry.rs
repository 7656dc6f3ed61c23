//! Lookup of device models by identifier.

use crate::family::Family;
use crate::model::DeviceModel;
use crate::tables::BUILTIN_TABLES;
use pbslice_diagnostics::{Category, Diagnostic, DiagnosticCode, DiagnosticSink};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Emitted when a device identifier has no registered model.
pub const UNKNOWN_DEVICE: DiagnosticCode = DiagnosticCode::new(Category::Device, 1);

/// Normalizes a device identifier for lookup.
///
/// Lowercases, strips a leading `xc` vendor prefix and drops everything from
/// the first `-` (speed grade), so `XC7Z020CLG400-1` becomes `7z020clg400`.
pub fn normalize_device_id(id: &str) -> String {
    let lower = id.trim().to_ascii_lowercase();
    let base = lower.split('-').next().unwrap_or_default();
    base.strip_prefix("xc").unwrap_or(base).to_string()
}

/// Registered device models keyed by normalized identifier.
#[derive(Debug, Clone)]
pub struct DeviceRegistry {
    devices: BTreeMap<String, Arc<DeviceModel>>,
    placeholder: Arc<DeviceModel>,
}

impl Default for DeviceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceRegistry {
    /// An empty registry. Every lookup falls back to the placeholder model.
    pub fn new() -> Self {
        Self {
            devices: BTreeMap::new(),
            placeholder: Arc::new(DeviceModel::placeholder()),
        }
    }

    /// A registry holding every built-in table plus one placeholder per family.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for family in Family::ALL {
            registry.register(DeviceModel::family_placeholder(family));
        }
        for table in BUILTIN_TABLES {
            registry.register(DeviceModel::from_table(table));
        }
        registry
    }

    /// Registers a model under its normalized identifier, returning any
    /// model it replaced.
    pub fn register(&mut self, model: DeviceModel) -> Option<Arc<DeviceModel>> {
        let key = normalize_device_id(model.id());
        self.devices.insert(key, Arc::new(model))
    }

    /// Finds a registered model.
    pub fn get(&self, id: &str) -> Option<Arc<DeviceModel>> {
        self.devices.get(&normalize_device_id(id)).cloned()
    }

    /// Finds a model, falling back to the placeholder and emitting
    /// [`UNKNOWN_DEVICE`] when the identifier is not registered.
    pub fn lookup(&self, id: &str, sink: &DiagnosticSink) -> Arc<DeviceModel> {
        if let Some(model) = self.get(id) {
            return model;
        }
        sink.emit(
            Diagnostic::warning(UNKNOWN_DEVICE, format!("unknown device model '{id}'"))
                .with_note("falling back to the placeholder model; extraction is unavailable")
                .with_help("register a device table with `device_tables` in pbslice.toml"),
        );
        Arc::clone(&self.placeholder)
    }

    /// The shared placeholder model.
    pub fn placeholder(&self) -> Arc<DeviceModel> {
        Arc::clone(&self.placeholder)
    }

    /// Registered models in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<DeviceModel>> {
        self.devices.values()
    }

    /// Number of registered models.
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// Returns `true` if no model is registered.
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}
